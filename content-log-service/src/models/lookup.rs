use super::identifier::{InvalidReason, RawIdentifier};
use mongodb::bson::Document;

/// One inbound fetch-by-id call.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub raw_identifier: RawIdentifier,
}

impl LookupRequest {
    pub fn new(raw_identifier: impl Into<RawIdentifier>) -> Self {
        Self {
            raw_identifier: raw_identifier.into(),
        }
    }
}

/// Outcome of a lookup that reached a verdict. Query faults are reported
/// separately as `StoreError` and never folded into `NotFound`.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    Found(Document),
    NotFound,
    InvalidIdentifier(InvalidReason),
}
