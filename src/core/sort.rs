//! Multi-field record ordering
//!
//! A [`SortSpec`] is an ordered list of `(field, direction)` pairs parsed
//! from expressions such as `price,-rating,name`. Sorting builds one
//! [`CompositeKey`] per record and runs a single stable ascending sort:
//!
//! - text is lower-cased
//! - descending numbers are negated
//! - descending text is wrapped so that it compares in reverse
//! - a missing value sorts last when ascending and first when descending
//! - `created_at` then `id` are appended as final ascending tie-breakers

use std::cmp::Ordering;
use std::fmt;

use crate::core::record::{Record, RecordField};

/// Direction of one sort field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One `(field, direction)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: RecordField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: RecordField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: RecordField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Parse one token: `-field` is descending, `field` ascending
    ///
    /// Returns `None` for empty tokens and fields that cannot be ordered.
    fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let (name, direction) = match token.strip_prefix('-') {
            Some(rest) => (rest, SortDirection::Descending),
            None => (token, SortDirection::Ascending),
        };
        let field = RecordField::from_name(name).filter(is_sortable)?;
        Some(Self { field, direction })
    }

    fn part_for(&self, record: &Record) -> KeyPart {
        let descending = self.direction == SortDirection::Descending;
        let missing = if descending {
            KeyPart::Lowest
        } else {
            KeyPart::Highest
        };
        match sort_value(self.field, record) {
            None => missing,
            Some(SortValue::Number(n)) => {
                let n = if descending { -n } else { n };
                // -0.0 and 0.0 must tie
                KeyPart::Number(if n == 0.0 { 0.0 } else { n })
            }
            Some(SortValue::Text(s)) if descending => KeyPart::ReversedText(s.to_lowercase()),
            Some(SortValue::Text(s)) => KeyPart::Text(s.to_lowercase()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.direction == SortDirection::Descending {
            f.write_str("-")?;
        }
        write!(f, "{}", self.field)
    }
}

/// Ordered list of sort keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl Default for SortSpec {
    /// Newest first, then by name
    fn default() -> Self {
        Self::new(vec![
            SortKey::desc(RecordField::CreatedAt),
            SortKey::asc(RecordField::Name),
        ])
    }
}

impl SortSpec {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    /// Default order of related items: best rated first, then cheapest
    pub fn related() -> Self {
        Self::new(vec![
            SortKey::desc(RecordField::Rating),
            SortKey::asc(RecordField::Price),
        ])
    }

    /// Parse a comma-separated expression
    ///
    /// Returns `None` when no token names a sortable field.
    pub fn parse(raw: &str) -> Option<Self> {
        let keys: Vec<SortKey> = raw.split(',').filter_map(SortKey::parse).collect();
        if keys.is_empty() { None } else { Some(Self::new(keys)) }
    }

    /// Parse an optional expression, falling back when absent or unusable
    ///
    /// An expression with no usable key (`sort_by=bogus`) is treated exactly
    /// like an absent one: it orders by `fallback`, never by the bare
    /// `created_at`/`id` tie-breakers alone.
    pub fn parse_or(raw: Option<&str>, fallback: SortSpec) -> Self {
        raw.and_then(Self::parse).unwrap_or(fallback)
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Build the composite key of a record
    pub fn key_for(&self, record: &Record) -> CompositeKey {
        let mut parts: Vec<KeyPart> = self.keys.iter().map(|k| k.part_for(record)).collect();
        parts.push(KeyPart::Text(record.created_at.clone().unwrap_or_default()));
        parts.push(KeyPart::Text(record.id.clone()));
        CompositeKey(parts)
    }

    /// Sort records in place
    ///
    /// Stable, so re-sorting a sorted slice leaves it unchanged.
    pub fn sort(&self, records: &mut [Record]) {
        records.sort_by_cached_key(|r| self.key_for(r));
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

fn is_sortable(field: &RecordField) -> bool {
    !matches!(field, RecordField::Tags | RecordField::Attributes)
}

enum SortValue {
    Number(f64),
    Text(String),
}

fn sort_value(field: RecordField, record: &Record) -> Option<SortValue> {
    match field {
        RecordField::Id => Some(SortValue::Text(record.id.clone())),
        RecordField::Name => record.name.clone().map(SortValue::Text),
        RecordField::Category => record.category.clone().map(SortValue::Text),
        RecordField::Vendor => record.vendor.clone().map(SortValue::Text),
        RecordField::CreatedAt => record.created_at.clone().map(SortValue::Text),
        RecordField::Price => record.price.map(SortValue::Number),
        RecordField::Rating => record.rating.map(SortValue::Number),
        RecordField::Stock => record.stock.map(|s| SortValue::Number(s as f64)),
        RecordField::Tags | RecordField::Attributes => None,
    }
}

/// One normalized component of a composite key
#[derive(Debug, Clone)]
pub enum KeyPart {
    /// Sorts before everything
    Lowest,
    Number(f64),
    Text(String),
    /// Text compared in reverse lexicographic order
    ReversedText(String),
    /// Sorts after everything
    Highest,
}

impl KeyPart {
    fn rank(&self) -> u8 {
        match self {
            KeyPart::Lowest => 0,
            KeyPart::Number(_) => 1,
            KeyPart::Text(_) => 2,
            KeyPart::ReversedText(_) => 3,
            KeyPart::Highest => 4,
        }
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (KeyPart::Number(a), KeyPart::Number(b)) => a.total_cmp(b),
            (KeyPart::Text(a), KeyPart::Text(b)) => a.cmp(b),
            (KeyPart::ReversedText(a), KeyPart::ReversedText(b)) => b.cmp(a),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for KeyPart {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyPart {}

/// Composite sort key, compared lexicographically part by part
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompositeKey(pub Vec<KeyPart>);
