//! # Catalog
//!
//! An HTTP catalog of product records with a query pipeline supporting
//! filtering, multi-field sorting, two pagination modes, field projection
//! and aggregate statistics.
//!
//! ## Features
//!
//! - **Filtering**: category, vendor, price and rating ranges, required tags, free text
//! - **Sorting**: `price,-rating,name` style expressions with deterministic tie-breaks
//! - **Pagination**: `offset`/`limit` or `page`/`page_size`, clamped, never failing
//! - **Projection**: `fields=name,price` narrows returned records
//! - **Statistics**: average price and rating over the filtered set and the page
//! - **Persistence**: atomic JSON snapshot after every insert
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog::prelude::*;
//!
//! let store = RecordStore::new(Arc::new(InMemorySnapshotStore::new()));
//! let service = CatalogService::new(Arc::new(store));
//!
//! service.create_record(&serde_json::json!({
//!     "name": "Swift Widget 101",
//!     "category": "toys",
//!     "price": 19.99
//! }))?;
//!
//! let raw = RawParams::from_pairs([("category", "toys"), ("sort_by", "-price")]);
//! let page = service.query_records(&QueryParams::from_raw(&raw))?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{CatalogError, RecordError, StorageError, ValidationError},
        filter::Filter,
        pagination::{PageRequest, PaginationMeta},
        projection::Projection,
        query::{ListMeta, PaginatedResponse, QueryParams, RawParams, RelatedParams},
        record::{Record, RecordField},
        service::CatalogService,
        sort::{SortDirection, SortKey, SortSpec},
        stats::Stats,
        store::SnapshotStore,
    };

    // === Storage ===
    pub use crate::storage::{
        InMemorySnapshotStore, JsonFileSnapshotStore, RecordStore, SampleGenerator,
    };

    // === Config ===
    pub use crate::config::ServerConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_catalog_routes};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
