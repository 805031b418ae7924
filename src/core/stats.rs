//! Aggregate statistics over a record sequence

use serde::Serialize;

use crate::core::record::{Record, round2};

/// Averages over the records carrying each field
///
/// `count` is the length of the input, whether or not its records carry a
/// price or a rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub avg_price: Option<f64>,
    pub avg_rating: Option<f64>,
    pub count: usize,
}

impl Stats {
    pub fn compute(records: &[Record]) -> Self {
        Self {
            avg_price: average(records.iter().filter_map(|r| r.price)),
            avg_rating: average(records.iter().filter_map(|r| r.rating)),
            count: records.len(),
        }
    }
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| round2(sum / n as f64))
}
