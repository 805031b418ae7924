//! Deterministic sample dataset
//!
//! Seeds a fresh store when no snapshot exists. The same seed always yields
//! the same records, identifiers included, which keeps load-test runs
//! comparable.

use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};
use uuid::Builder;

use crate::core::record::{Record, VENDORS, round2};

const ADJECTIVES: [&str; 10] = [
    "Swift", "Solid", "Bright", "Prime", "Aero", "Hyper", "Quantum", "Omega", "Nimbus", "Vector",
];

const NOUNS: [&str; 10] = [
    "Widget", "Gadget", "Module", "Device", "Kit", "Bundle", "Unit", "Pack", "Core", "Engine",
];

const CATEGORIES: [&str; 7] = [
    "electronics",
    "home",
    "outdoors",
    "toys",
    "apparel",
    "office",
    "beauty",
];

const TAG_POOL: [&str; 10] = [
    "new",
    "sale",
    "clearance",
    "eco",
    "luxury",
    "budget",
    "refurb",
    "popular",
    "pro",
    "lite",
];

const COLORS: [&str; 7] = ["red", "blue", "green", "black", "white", "silver", "gold"];

const SIZES: [&str; 5] = ["XS", "S", "M", "L", "XL"];

const SKU_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 2023-01-01T00:00:00Z
const FIRST_CREATED_AT: i64 = 1_672_531_200;

/// Minutes between consecutive sample records
const CREATED_STEP_MINUTES: i64 = 17;

/// Seeded generator of catalog records
pub struct SampleGenerator {
    rng: StdRng,
}

impl SampleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `count` records with increasing `created_at`
    pub fn generate(&mut self, count: usize) -> Vec<Record> {
        (0..count).map(|i| self.record(i)).collect()
    }

    fn record(&mut self, index: usize) -> Record {
        let id = Builder::from_random_bytes(self.rng.r#gen()).into_uuid();
        let created = DateTime::<Utc>::UNIX_EPOCH
            + TimeDelta::seconds(FIRST_CREATED_AT + index as i64 * CREATED_STEP_MINUTES * 60);

        Record {
            id: id.to_string(),
            name: Some(self.name()),
            category: Some(self.pick(&CATEGORIES)),
            price: Some(round2(self.rng.gen_range(5.0..=1500.0))),
            rating: Some(round2(self.rng.gen_range(1.0..=5.0))),
            tags: self.tags(),
            created_at: Some(created.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            stock: Some(self.rng.gen_range(0..=1000)),
            vendor: Some(self.pick(&VENDORS)),
            attributes: self.attributes(),
        }
    }

    fn pick(&mut self, options: &[&str]) -> String {
        options
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default()
            .to_string()
    }

    fn name(&mut self) -> String {
        let adjective = self.pick(&ADJECTIVES);
        let noun = self.pick(&NOUNS);
        let number: u16 = self.rng.gen_range(100..=999);
        format!("{adjective} {noun} {number}")
    }

    /// One to four distinct tags
    fn tags(&mut self) -> Vec<String> {
        let n = self.rng.gen_range(1..=4);
        TAG_POOL
            .choose_multiple(&mut self.rng, n)
            .map(|t| t.to_string())
            .collect()
    }

    fn attributes(&mut self) -> Map<String, Value> {
        let color = self.pick(&COLORS);
        let size = self.pick(&SIZES);
        let sku: String = (0..8)
            .map(|_| SKU_ALPHABET[self.rng.gen_range(0..SKU_ALPHABET.len())] as char)
            .collect();

        let mut map = Map::new();
        map.insert("color".to_string(), Value::String(color));
        map.insert("size".to_string(), Value::String(size));
        map.insert("sku".to_string(), Value::String(sku));
        map
    }
}

/// Generate `count` sample records from `seed`
pub fn generate(count: usize, seed: u64) -> Vec<Record> {
    SampleGenerator::new(seed).generate(count)
}
