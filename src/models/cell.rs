//! Export cell values.
//!
//! Slice rows have an open set of fields, so every exported value is first
//! classified into a [`CellValue`] and then formatted by one rule per kind.

use serde_json::{Map, Number, Value};

/// One exported cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or null value; exported as an empty cell.
    Null,
    /// A plain string.
    Text(String),
    /// A JSON number, kept as delivered.
    Number(Number),
    /// A boolean.
    Bool(bool),
    /// A list, exported joined with `", "`.
    List(Vec<Value>),
    /// A nested object, exported as compact JSON.
    Object(Map<String, Value>),
}

impl CellValue {
    /// Formats the cell for text-based outputs.
    ///
    /// # Example
    ///
    /// ```
    /// use ggd_compliance::models::CellValue;
    /// use serde_json::json;
    ///
    /// assert_eq!(CellValue::from(json!(["a", "b"])).display(), "a, b");
    /// assert_eq!(CellValue::from(json!(null)).display(), "");
    /// assert_eq!(CellValue::from(json!({"k": 1})).display(), r#"{"k":1}"#);
    /// ```
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(number) => number.to_string(),
            CellValue::Bool(flag) => flag.to_string(),
            CellValue::List(items) => items
                .iter()
                .map(list_item)
                .collect::<Vec<_>>()
                .join(", "),
            CellValue::Object(map) => Value::Object(map.clone()).to_string(),
        }
    }

    /// The numeric value, for outputs with a native number cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(number) => number.as_f64(),
            _ => None,
        }
    }
}

// List elements: strings verbatim, nulls blank, anything else as JSON.
fn list_item(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::String(text) => CellValue::Text(text),
            Value::Number(number) => CellValue::Number(number),
            Value::Bool(flag) => CellValue::Bool(flag),
            Value::Array(items) => CellValue::List(items),
            Value::Object(map) => CellValue::Object(map),
        }
    }
}
