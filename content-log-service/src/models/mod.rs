pub mod content;
pub mod identifier;
pub mod lookup;

pub use content::document_to_json;
pub use identifier::{parse_identifier, InvalidReason, RawIdentifier};
pub use lookup::{LookupRequest, LookupResult};
