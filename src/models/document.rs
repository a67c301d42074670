use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

use crate::utils::AppError;

/// Renders a stored document as JSON.
///
/// `_id` becomes its hex string, the rest is relaxed extended JSON.
pub fn document_to_json(mut doc: Document) -> Value {
    if let Ok(id) = doc.get_object_id("_id") {
        doc.insert("_id", id.to_hex());
    }
    Bson::Document(doc).into_relaxed_extjson()
}

pub fn documents_to_json(docs: Vec<Document>) -> Vec<Value> {
    docs.into_iter().map(document_to_json).collect()
}

/// Converts a request body into a document ready for insert or `$set`.
///
/// Ids are store-assigned and immutable, so a client-supplied `_id` is dropped.
pub fn json_to_document(body: Map<String, Value>) -> Result<Document, AppError> {
    let mut doc = bson::to_document(&body)
        .map_err(|e| AppError::InvalidRequest(format!("Invalid document: {}", e)))?;
    doc.remove("_id");
    Ok(doc)
}

/// Numeric view of a field that may be stored as a number or a numeric string.
pub fn numeric_value(value: Option<&Bson>) -> Option<f64> {
    let number = match value? {
        Bson::Double(v) => *v,
        Bson::Int32(v) => f64::from(*v),
        Bson::Int64(v) => *v as f64,
        Bson::String(s) => s.trim().parse().ok()?,
        Bson::Decimal128(d) => d.to_string().parse().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}
