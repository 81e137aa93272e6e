//! Caller-supplied document identifiers.
//!
//! The transport may hand us one value or several (a repeated query key).
//! Several values are reduced to the first one, always; the survivor must be
//! a 24-character hex object id before anything touches the database.

use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawIdentifier {
    Single(String),
    Multiple(Vec<String>),
}

impl RawIdentifier {
    /// The value that takes part in the lookup.
    pub fn first(&self) -> Option<&str> {
        match self {
            RawIdentifier::Single(value) => Some(value.as_str()),
            RawIdentifier::Multiple(values) => values.first().map(String::as_str),
        }
    }

    /// Collects every `id` value of a raw query string, in order.
    pub fn from_query(query: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = query
            .and_then(|q| serde_urlencoded::from_str(q).ok())
            .unwrap_or_default();

        let mut values: Vec<String> = pairs
            .into_iter()
            .filter(|(key, _)| key == "id")
            .map(|(_, value)| value)
            .collect();

        if values.len() == 1 {
            RawIdentifier::Single(values.remove(0))
        } else {
            RawIdentifier::Multiple(values)
        }
    }
}

impl From<String> for RawIdentifier {
    fn from(value: String) -> Self {
        RawIdentifier::Single(value)
    }
}

impl From<Vec<String>> for RawIdentifier {
    fn from(values: Vec<String>) -> Self {
        RawIdentifier::Multiple(values)
    }
}

/// Machine-readable rejection reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    MissingIdentifier,
    MalformedIdentifier,
}

impl InvalidReason {
    pub fn as_str(self) -> &'static str {
        match self {
            InvalidReason::MissingIdentifier => "missing_identifier",
            InvalidReason::MalformedIdentifier => "malformed_identifier",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn parse_identifier(raw: &RawIdentifier) -> Result<ObjectId, InvalidReason> {
    let value = raw
        .first()
        .filter(|v| !v.is_empty())
        .ok_or(InvalidReason::MissingIdentifier)?;

    ObjectId::parse_str(value).map_err(|_| InvalidReason::MalformedIdentifier)
}
