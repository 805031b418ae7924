//! Field projection

use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::core::record::{Record, RecordField};

/// Whitelist of record fields to return
///
/// An empty whitelist returns every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    fields: BTreeSet<RecordField>,
}

impl Projection {
    /// Projection returning every field
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(fields: impl IntoIterator<Item = RecordField>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Parse a comma-separated field list such as `name,price`
    ///
    /// Unknown names are dropped silently.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::all();
        };
        Self::new(
            raw.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .filter_map(RecordField::from_name),
        )
    }

    /// Whether the projection keeps every field
    pub fn is_all(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render a record, keeping only whitelisted fields present on it
    pub fn apply(&self, record: &Record) -> Value {
        let selected: Box<dyn Iterator<Item = RecordField>> = if self.is_all() {
            Box::new(RecordField::ALL.into_iter())
        } else {
            Box::new(self.fields.iter().copied())
        };

        let map: Map<String, Value> = selected
            .filter_map(|f| f.value_of(record).map(|v| (f.as_str().to_string(), v)))
            .collect();
        Value::Object(map)
    }

    /// Render a sequence of records
    pub fn apply_all(&self, records: &[Record]) -> Vec<Value> {
        records.iter().map(|r| self.apply(r)).collect()
    }
}
