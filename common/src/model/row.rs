use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single cell as returned by the data backend.
///
/// The backend answers with plain JSON, so a cell is whatever JSON scalar sits
/// under a column key. Arrays and objects (json/jsonb columns) are kept verbatim
/// in `Other` and rendered through their JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

static MISSING: CellValue = CellValue::Null;

/// One record fetched from the backend table, keyed by field name.
///
/// Keys keep the order in which the backend sent them. Looking up a field the
/// backend did not return yields `CellValue::Null`, the same as an explicit null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, CellValue>);

impl Row {
    /// Returns the value stored under `field`, or `Null` when it is absent.
    pub fn get(&self, field: &str) -> &CellValue {
        self.0.get(field).unwrap_or(&MISSING)
    }

    #[cfg(test)]
    fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
