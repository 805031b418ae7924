//! Core module containing the record model and the query pipeline

pub mod error;
pub mod filter;
pub mod pagination;
pub mod projection;
pub mod query;
pub mod record;
pub mod service;
pub mod sort;
pub mod stats;
pub mod store;

pub use error::{CatalogError, RecordError, StorageError, ValidationError};
pub use filter::Filter;
pub use pagination::{PageRequest, PaginationMeta};
pub use projection::Projection;
pub use query::{QueryParams, RawParams, RelatedParams};
pub use record::{Record, RecordField};
pub use service::CatalogService;
pub use sort::{SortDirection, SortKey, SortSpec};
pub use stats::Stats;
pub use store::SnapshotStore;
