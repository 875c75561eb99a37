// JSON record import
//
// Grids are typically seeded from an API payload or a generated fixture:
// a JSON array of objects, one object per record.

use std::path::Path;

use labtable_core::coord::{ColId, RowId};
use labtable_engine::grid::Record;
use labtable_engine::value::Value;

/// Import records from a JSON file holding an array of objects.
pub fn import(path: &Path) -> Result<Vec<Record>, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    records_from_str(&content)
}

/// Parse a JSON array of objects into records.
///
/// The "id" member (string or number) becomes the row id; objects without
/// a usable one get a positional fallback. Scalars map directly; booleans
/// and nested structures degrade to text.
pub fn records_from_str(content: &str) -> Result<Vec<Record>, String> {
    let parsed: serde_json::Value =
        serde_json::from_str(content).map_err(|e| e.to_string())?;
    let serde_json::Value::Array(items) = parsed else {
        return Err("expected a JSON array of objects".to_string());
    };

    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let serde_json::Value::Object(map) = item else {
            return Err(format!("row {position}: expected a JSON object"));
        };

        let id = match map.get("id") {
            Some(serde_json::Value::String(s)) => RowId::new(s.clone()),
            Some(serde_json::Value::Number(n)) => RowId::new(n.to_string()),
            _ => RowId::new(format!("row-{position}")),
        };

        let mut record = Record::new(id);
        for (key, value) in map {
            record.set(ColId::new(key), coerce_json(value));
        }
        records.push(record);
    }
    Ok(records)
}

fn coerce_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => {
            Value::Text(if b { "true" } else { "false" }.to_string())
        }
        serde_json::Value::String(s) => Value::Text(s),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) => Value::Number(f),
            // Out-of-range numerics (arbitrary precision) keep their text
            None => Value::Text(n.to_string()),
        },
        other => Value::Text(other.to_string()),
    }
}
