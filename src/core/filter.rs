//! Record filtering
//!
//! A [`Filter`] is a conjunction of independent predicates. Every predicate
//! is optional; an absent one imposes no constraint.

use crate::core::record::{Record, parse_number};

/// Conjunction of record predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Exact category match
    pub category: Option<String>,

    /// Exact vendor match
    pub vendor: Option<String>,

    /// Inclusive lower price bound
    pub min_price: Option<f64>,

    /// Inclusive upper price bound
    pub max_price: Option<f64>,

    /// Inclusive lower rating bound
    pub min_rating: Option<f64>,

    /// Inclusive upper rating bound
    pub max_rating: Option<f64>,

    /// Tags the record must all carry
    pub tags: Vec<String>,

    /// Case-insensitive substring over name, vendor, category and tags
    pub q: Option<String>,
}

impl Filter {
    /// Build a filter from raw textual values
    ///
    /// Empty strings count as absent. Bounds that do not parse as numbers
    /// are dropped rather than rejected.
    pub fn from_raw(
        text: impl Fn(&str) -> Option<String>,
        tags: Vec<String>,
    ) -> Self {
        let non_empty = |key: &str| text(key).filter(|v| !v.is_empty());
        let number = |key: &str| text(key).as_deref().and_then(parse_number);

        Self {
            category: non_empty("category"),
            vendor: non_empty("vendor"),
            min_price: number("min_price"),
            max_price: number("max_price"),
            min_rating: number("min_rating"),
            max_rating: number("max_rating"),
            tags,
            q: non_empty("q"),
        }
    }

    /// Keep only the records that satisfy every active predicate
    pub fn apply(&self, records: Vec<Record>) -> Vec<Record> {
        if self.is_empty() {
            return records;
        }
        let needle = self.q.as_deref().map(str::to_lowercase);
        records
            .into_iter()
            .filter(|r| self.matches_with(r, needle.as_deref()))
            .collect()
    }

    /// Whether a single record satisfies every active predicate
    pub fn matches(&self, record: &Record) -> bool {
        let needle = self.q.as_deref().map(str::to_lowercase);
        self.matches_with(record, needle.as_deref())
    }

    /// Whether no predicate is active
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.vendor.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.min_rating.is_none()
            && self.max_rating.is_none()
            && self.tags.is_empty()
            && self.q.is_none()
    }

    fn matches_with(&self, record: &Record, needle: Option<&str>) -> bool {
        equals(self.category.as_deref(), record.category.as_deref())
            && equals(self.vendor.as_deref(), record.vendor.as_deref())
            && within(record.price, self.min_price, self.max_price)
            && within(record.rating, self.min_rating, self.max_rating)
            && self.tags.iter().all(|t| record.tags.contains(t))
            && needle.is_none_or(|n| contains_text(record, n))
    }
}

fn equals(wanted: Option<&str>, actual: Option<&str>) -> bool {
    wanted.is_none_or(|w| actual == Some(w))
}

/// Inclusive range check; a missing value fails any active bound
fn within(value: Option<f64>, min: Option<f64>, max: Option<f64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(v) = value else {
        return false;
    };
    min.is_none_or(|m| v >= m) && max.is_none_or(|m| v <= m)
}

/// `needle` must already be lower-cased
fn contains_text(record: &Record, needle: &str) -> bool {
    let hit = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(needle))
    };
    hit(&record.name)
        || hit(&record.vendor)
        || hit(&record.category)
        || record
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(needle))
}
