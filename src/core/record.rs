//! Catalog record type and creation rules

use chrono::Utc;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

use crate::core::error::ValidationError;

/// Vendors assigned when a payload does not name one
pub const VENDORS: [&str; 8] = [
    "Acme Inc.",
    "Globex",
    "Initech",
    "Umbrella",
    "WayneTech",
    "Stark Industries",
    "Tyrell",
    "Aperture",
];

/// Tag added to every record that meets the luxury rule
pub const LUXURY_TAG: &str = "luxury";

/// Price above which a record is considered luxury
const LUXURY_PRICE: f64 = 1000.0;

/// Minimum rating of a luxury record
const LUXURY_MIN_RATING: f64 = 4.0;

/// One catalog entry
///
/// Only `id` is mandatory. Every other known field is optional so that
/// snapshots written by older versions restore cleanly, and so that
/// projection can tell "absent" from "present".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Vendor-specific data, opaque to the query pipeline
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Record {
    /// Create a bare record carrying only an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            category: None,
            price: None,
            rating: None,
            tags: Vec::new(),
            created_at: None,
            stock: None,
            vendor: None,
            attributes: Map::new(),
        }
    }

    /// Build a new record from a create payload
    ///
    /// `name`, `category` and a numeric `price` are required. The id is taken
    /// from the payload when present, otherwise a v4 UUID is generated.
    /// `created_at` is always set to the current time.
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let body = payload
            .as_object()
            .filter(|o| !o.is_empty())
            .ok_or(ValidationError::InvalidBody)?;

        let name = non_empty_str(body.get("name")).ok_or(ValidationError::MissingRequired)?;
        let category =
            non_empty_str(body.get("category")).ok_or(ValidationError::MissingRequired)?;
        let price = body
            .get("price")
            .and_then(coerce_number)
            .ok_or(ValidationError::MissingRequired)?;
        if price < 0.0 {
            return Err(ValidationError::field("price", "must be non-negative"));
        }

        let id = match body.get("id") {
            None | Some(Value::Null) => Uuid::new_v4().to_string(),
            Some(Value::String(s)) if s.is_empty() => Uuid::new_v4().to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => return Err(ValidationError::field("id", "must be a string")),
        };

        let rating = body.get("rating").and_then(coerce_number).unwrap_or(0.0);

        let tags = match body.get("tags") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|t| t.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        let stock = match body.get("stock") {
            None | Some(Value::Null) => 0,
            Some(v) => match coerce_number(v) {
                Some(n) if n >= 0.0 => n.trunc() as u64,
                _ => return Err(ValidationError::field("stock", "must be a non-negative integer")),
            },
        };

        let vendor = non_empty_str(body.get("vendor")).unwrap_or_else(random_vendor);

        let attributes = match body.get("attributes") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        let mut record = Self {
            id,
            name: Some(name),
            category: Some(category),
            price: Some(round2(price)),
            rating: Some(round2(rating)),
            tags,
            created_at: Some(now_timestamp()),
            stock: Some(stock),
            vendor: Some(vendor),
            attributes,
        };
        record.apply_luxury_rule();
        Ok(record)
    }

    /// Whether the record falls in the luxury segment
    pub fn is_luxury(&self) -> bool {
        let luxury_category = self
            .category
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case(LUXURY_TAG));
        let luxury_price = self.price.is_some_and(|p| p > LUXURY_PRICE);
        luxury_category || luxury_price
    }

    /// Tag luxury records and raise their rating to the floor
    fn apply_luxury_rule(&mut self) {
        if !self.is_luxury() {
            return;
        }
        if !self.tags.iter().any(|t| t == LUXURY_TAG) {
            self.tags.push(LUXURY_TAG.to_string());
        }
        let rating = self.rating.unwrap_or(0.0);
        self.rating = Some(rating.max(LUXURY_MIN_RATING));
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.name.as_deref().unwrap_or("<unnamed>"),
            self.id
        )
    }
}

/// Known record fields
///
/// Used both as the projection selector and as the sort field selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordField {
    Id,
    Name,
    Category,
    Price,
    Rating,
    Tags,
    CreatedAt,
    Stock,
    Vendor,
    Attributes,
}

impl RecordField {
    /// Every known field, in serialization order
    pub const ALL: [RecordField; 10] = [
        RecordField::Id,
        RecordField::Name,
        RecordField::Category,
        RecordField::Price,
        RecordField::Rating,
        RecordField::Tags,
        RecordField::CreatedAt,
        RecordField::Stock,
        RecordField::Vendor,
        RecordField::Attributes,
    ];

    /// Resolve a wire name to a field
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// The wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Id => "id",
            RecordField::Name => "name",
            RecordField::Category => "category",
            RecordField::Price => "price",
            RecordField::Rating => "rating",
            RecordField::Tags => "tags",
            RecordField::CreatedAt => "created_at",
            RecordField::Stock => "stock",
            RecordField::Vendor => "vendor",
            RecordField::Attributes => "attributes",
        }
    }

    /// Value of this field on a record, `None` when absent
    pub fn value_of(&self, record: &Record) -> Option<Value> {
        match self {
            RecordField::Id => Some(Value::String(record.id.clone())),
            RecordField::Name => record.name.clone().map(Value::String),
            RecordField::Category => record.category.clone().map(Value::String),
            RecordField::Price => record.price.map(Value::from),
            RecordField::Rating => record.rating.map(Value::from),
            RecordField::Tags => Some(Value::from(record.tags.clone())),
            RecordField::CreatedAt => record.created_at.clone().map(Value::String),
            RecordField::Stock => record.stock.map(Value::from),
            RecordField::Vendor => record.vendor.clone().map(Value::String),
            RecordField::Attributes => Some(Value::Object(record.attributes.clone())),
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SSZ`
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Round to two decimal places
///
/// Magnitudes too large to scale are returned unchanged.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.is_finite() { rounded } else { value }
}

/// Parse a textual number, rejecting `NaN`
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Coerce a JSON number or numeric string into a finite `f64`
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn random_vendor() -> String {
    VENDORS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(VENDORS[0])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload_requires_name_category_price() {
        let err = Record::from_payload(&json!({"name": "A", "category": "toys"})).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequired);

        let err = Record::from_payload(&json!({"name": "", "category": "toys", "price": 1}))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingRequired);

        let err = Record::from_payload(&json!({"name": "A", "category": "toys", "price": "abc"}))
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingRequired);
    }

    #[test]
    fn test_from_payload_rejects_empty_body() {
        assert_eq!(
            Record::from_payload(&json!({})).unwrap_err(),
            ValidationError::InvalidBody
        );
        assert_eq!(
            Record::from_payload(&json!([1, 2])).unwrap_err(),
            ValidationError::InvalidBody
        );
    }

    #[test]
    fn test_from_payload_defaults() {
        let record =
            Record::from_payload(&json!({"name": "Kit", "category": "toys", "price": "12.346"}))
                .unwrap();
        assert!(Uuid::parse_str(&record.id).is_ok());
        assert_eq!(record.price, Some(12.35));
        assert_eq!(record.rating, Some(0.0));
        assert_eq!(record.stock, Some(0));
        assert!(record.tags.is_empty());
        assert!(VENDORS.contains(&record.vendor.as_deref().unwrap()));
        assert!(record.created_at.as_deref().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_from_payload_keeps_huge_finite_price() {
        let record =
            Record::from_payload(&json!({"name": "A", "category": "toys", "price": 1e307}))
                .unwrap();
        assert_eq!(record.price, Some(1e307));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["price"].as_f64(), Some(1e307));
    }

    #[test]
    fn test_round2_keeps_values_that_cannot_be_scaled() {
        assert_eq!(round2(f64::MAX), f64::MAX);
        assert_eq!(round2(-1.7e308), -1.7e308);
        assert_eq!(round2(2.005e3), 2005.0);
    }

    #[test]
    fn test_from_payload_keeps_supplied_values() {
        let record = Record::from_payload(&json!({
            "id": "sku-1",
            "name": "Kit",
            "category": "toys",
            "price": 20,
            "rating": 3.456,
            "tags": ["new", 7, "eco"],
            "stock": 12.9,
            "vendor": "Globex",
            "attributes": {"color": "red"}
        }))
        .unwrap();
        assert_eq!(record.id, "sku-1");
        assert_eq!(record.rating, Some(3.46));
        assert_eq!(record.tags, vec!["new", "eco"]);
        assert_eq!(record.stock, Some(12));
        assert_eq!(record.vendor.as_deref(), Some("Globex"));
        assert_eq!(record.attributes["color"], "red");
    }

    #[test]
    fn test_from_payload_rejects_negative_values() {
        let err = Record::from_payload(&json!({"name": "A", "category": "b", "price": -1}))
            .unwrap_err();
        assert!(matches!(err, ValidationError::FieldError { ref field, .. } if field == "price"));

        let err = Record::from_payload(&json!({
            "name": "A", "category": "b", "price": 1, "stock": -5
        }))
        .unwrap_err();
        assert!(matches!(err, ValidationError::FieldError { ref field, .. } if field == "stock"));
    }

    #[test]
    fn test_luxury_category_rule() {
        let record =
            Record::from_payload(&json!({"name": "A", "category": "luxury", "price": 1200}))
                .unwrap();
        assert_eq!(record.price, Some(1200.0));
        assert!(record.rating.unwrap() >= 4.0);
        assert!(record.tags.contains(&"luxury".to_string()));
    }

    #[test]
    fn test_luxury_price_rule_keeps_higher_rating() {
        let record = Record::from_payload(&json!({
            "name": "A", "category": "home", "price": 1000.01, "rating": 4.8, "tags": ["luxury"]
        }))
        .unwrap();
        assert_eq!(record.rating, Some(4.8));
        assert_eq!(record.tags, vec!["luxury"]);
    }

    #[test]
    fn test_price_at_threshold_is_not_luxury() {
        let record =
            Record::from_payload(&json!({"name": "A", "category": "home", "price": 1000}))
                .unwrap();
        assert!(!record.is_luxury());
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in RecordField::ALL {
            assert_eq!(RecordField::from_name(field.as_str()), Some(field));
        }
        assert_eq!(RecordField::from_name("password"), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 15 "), Some(15.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
    }
}
