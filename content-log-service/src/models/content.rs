use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// Renders a stored document as plain JSON.
///
/// Object ids become their hex string and datetimes an RFC 3339 string;
/// everything else uses relaxed extended JSON.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
