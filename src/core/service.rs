//! Catalog service: the query surfaces over the record store
//!
//! Every list surface runs the same pipeline on a snapshot of the store:
//!
//! 1. filter
//! 2. sort (always the filtered set, before pagination)
//! 3. paginate
//! 4. statistics over the filtered set and over the page, when requested
//! 5. projection of the page, after statistics so they see full records
//!
//! The surfaces differ only in which [`QueryParams`] fields they force.

use serde_json::Value;
use std::sync::Arc;

use crate::core::error::{CatalogError, RecordError, ValidationError};
use crate::core::projection::Projection;
use crate::core::query::{
    BaseItem, ListMeta, PaginatedResponse, QueryParams, RelatedParams, RelatedResponse,
};
use crate::core::record::{Record, parse_number};
use crate::core::stats::Stats;
use crate::storage::RecordStore;

/// Entry point for every catalog operation
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<RecordStore>,
}

impl CatalogService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// The underlying record store
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Validate a payload and insert the resulting record
    pub fn create_record(&self, payload: &Value) -> Result<Record, CatalogError> {
        let record = Record::from_payload(payload)?;
        let record = self.store.insert(record)?;
        tracing::info!(id = %record.id, category = ?record.category, "Created record");
        Ok(record)
    }

    /// Fetch one record, projected
    pub fn get_record(&self, id: &str, fields: &Projection) -> Result<Value, CatalogError> {
        let record = self
            .store
            .lookup(id)?
            .ok_or_else(|| RecordError::NotFound { id: id.to_string() })?;
        Ok(fields.apply(&record))
    }

    /// List query over the whole catalog
    pub fn query_records(&self, params: &QueryParams) -> Result<PaginatedResponse, CatalogError> {
        let snapshot = self.store.snapshot()?;
        Ok(run_query(snapshot, params))
    }

    /// List query restricted to one category
    pub fn query_by_category(
        &self,
        category: &str,
        mut params: QueryParams,
    ) -> Result<PaginatedResponse, CatalogError> {
        params.filter.category = Some(category.to_string());
        self.query_records(&params)
    }

    /// List query restricted to an inclusive price range
    ///
    /// Unlike query string bounds, path bounds must be numeric.
    pub fn query_by_price_range(
        &self,
        min_price: &str,
        max_price: &str,
        mut params: QueryParams,
    ) -> Result<PaginatedResponse, CatalogError> {
        let (Some(min), Some(max)) = (parse_number(min_price), parse_number(max_price)) else {
            return Err(ValidationError::field(
                "min_price/max_price",
                "min_price and max_price must be numeric",
            )
            .into());
        };
        params.filter.min_price = Some(min);
        params.filter.max_price = Some(max);
        self.query_records(&params)
    }

    /// Records of the same category as `id`, excluding it
    ///
    /// Ordered by `params.sort` and truncated to `params.limit`; the general
    /// pagination engine is not involved.
    pub fn related_records(
        &self,
        id: &str,
        params: &RelatedParams,
    ) -> Result<RelatedResponse, CatalogError> {
        let snapshot = self.store.snapshot()?;
        let base = snapshot
            .iter()
            .find(|r| r.id == id)
            .map(|r| BaseItem {
                id: r.id.clone(),
                category: r.category.clone(),
            })
            .ok_or_else(|| RecordError::NotFound { id: id.to_string() })?;

        let mut related: Vec<Record> = snapshot
            .into_iter()
            .filter(|r| r.category == base.category && r.id != base.id)
            .collect();
        params.sort.sort(&mut related);
        related.truncate(params.limit);

        Ok(RelatedResponse {
            related: params.fields.apply_all(&related),
            base_item: base,
        })
    }
}

/// Run the list pipeline over a snapshot
pub fn run_query(snapshot: Vec<Record>, params: &QueryParams) -> PaginatedResponse {
    let mut filtered = params.filter.apply(snapshot);
    params.sort.sort(&mut filtered);

    let (page, pagination) = params.page.paginate(&filtered);

    let (stats_over_page, stats_over_filtered) = if params.include_stats {
        (Some(Stats::compute(&page)), Some(Stats::compute(&filtered)))
    } else {
        (None, None)
    };

    tracing::debug!(
        total = pagination.total(),
        returned = pagination.returned(),
        sort = %params.sort,
        "Query executed"
    );

    PaginatedResponse {
        data: params.fields.apply_all(&page),
        meta: ListMeta {
            pagination,
            stats_over_page,
            stats_over_filtered,
        },
    }
}
