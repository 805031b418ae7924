//! Query parameters and paginated responses
//!
//! Query strings arrive as raw key/value pairs ([`RawParams`]) so that
//! repeated keys such as `tag=pro&tag=lite` survive extraction. They are
//! then parsed into one typed [`QueryParams`] whose fields the individual
//! query surfaces may overwrite before running the pipeline.
//!
//! # Example
//! ```rust,ignore
//! // GET /items?category=toys&tag=new&sort_by=-price&page=2&page_size=10
//! pub async fn list_items(
//!     State(state): State<AppState>,
//!     Query(raw): Query<RawParams>,
//! ) -> Response {
//!     let params = QueryParams::from_raw(&raw);
//!     // params.page == PageRequest::Page { page: 2, page_size: 10 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::filter::Filter;
use crate::core::pagination::{PageRequest, PaginationMeta};
use crate::core::projection::Projection;
use crate::core::sort::SortSpec;
use crate::core::stats::Stats;

/// Default number of related items
pub const DEFAULT_RELATED_LIMIT: usize = 5;

/// Upper clamp for the number of related items
pub const MAX_RELATED_LIMIT: usize = 50;

/// Query string pairs in request order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RawParams(Vec<(String, String)>);

impl RawParams {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// First value supplied for `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value supplied for `key`, in order
    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

/// Typed parameters of a list query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub filter: Filter,
    pub sort: SortSpec,
    pub page: PageRequest,
    pub fields: Projection,
    pub include_stats: bool,
}

impl QueryParams {
    /// Parse every recognised parameter
    ///
    /// Nothing here fails: unusable values fall back to their defaults.
    pub fn from_raw(raw: &RawParams) -> Self {
        Self {
            filter: Filter::from_raw(
                |key| raw.first(key).map(str::to_string),
                raw.all("tag"),
            ),
            sort: SortSpec::parse_or(raw.first("sort_by"), SortSpec::default()),
            page: PageRequest::from_raw(
                raw.first("offset"),
                raw.first("limit"),
                raw.first("page"),
                raw.first("page_size"),
            ),
            fields: Projection::parse(raw.first("fields")),
            include_stats: parse_bool(raw.first("include_stats")),
        }
    }
}

/// Parameters of a related-items query
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedParams {
    pub limit: usize,
    pub sort: SortSpec,
    pub fields: Projection,
}

impl Default for RelatedParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RELATED_LIMIT,
            sort: SortSpec::related(),
            fields: Projection::all(),
        }
    }
}

impl RelatedParams {
    pub fn from_raw(raw: &RawParams) -> Self {
        let limit = match raw.first("limit") {
            None => DEFAULT_RELATED_LIMIT as i64,
            Some(s) => s.trim().parse::<i64>().unwrap_or(DEFAULT_RELATED_LIMIT as i64),
        };
        Self {
            limit: limit.clamp(0, MAX_RELATED_LIMIT as i64) as usize,
            sort: SortSpec::parse_or(raw.first("sort_by"), SortSpec::related()),
            fields: Projection::parse(raw.first("fields")),
        }
    }
}

/// Truthy flag values: `1`, `true`, `yes`, `y`, `on` (any case)
pub fn parse_bool(raw: Option<&str>) -> bool {
    raw.is_some_and(|v| {
        matches!(
            v.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "y" | "on"
        )
    })
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct PaginatedResponse {
    /// The page, possibly projected
    pub data: Vec<Value>,

    /// Pagination and statistics metadata
    pub meta: ListMeta,
}

/// Metadata of a list query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListMeta {
    #[serde(flatten)]
    pub pagination: PaginationMeta,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_over_page: Option<Stats>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_over_filtered: Option<Stats>,
}

/// Identity of the record a related query started from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseItem {
    pub id: String,
    pub category: Option<String>,
}

/// Response of a related-items query
#[derive(Debug, Serialize)]
pub struct RelatedResponse {
    pub base_item: BaseItem,
    pub related: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::RecordField;
    use crate::core::sort::SortKey;

    #[test]
    fn test_query_params_defaults() {
        let params = QueryParams::from_raw(&RawParams::default());
        assert_eq!(params, QueryParams::default());
        assert_eq!(params.page, PageRequest::page(1, 50));
        assert!(params.filter.is_empty());
        assert!(!params.include_stats);
    }

    #[test]
    fn test_repeated_tags_and_first_scalar_wins() {
        let raw = RawParams::from_pairs([
            ("tag", "pro"),
            ("category", "toys"),
            ("tag", "lite"),
            ("category", "home"),
        ]);
        let params = QueryParams::from_raw(&raw);
        assert_eq!(params.filter.tags, vec!["pro", "lite"]);
        assert_eq!(params.filter.category.as_deref(), Some("toys"));
    }

    #[test]
    fn test_full_parse() {
        let raw = RawParams::from_pairs([
            ("min_price", "15"),
            ("sort_by", "-price"),
            ("offset", "5"),
            ("fields", "name,price"),
            ("include_stats", "Yes"),
        ]);
        let params = QueryParams::from_raw(&raw);
        assert_eq!(params.filter.min_price, Some(15.0));
        assert_eq!(params.sort.keys(), &[SortKey::desc(RecordField::Price)]);
        assert_eq!(params.page, PageRequest::offset(5, 50));
        assert_eq!(
            params.fields,
            Projection::new([RecordField::Name, RecordField::Price])
        );
        assert!(params.include_stats);
    }

    #[test]
    fn test_parse_bool() {
        for truthy in ["1", "true", "YES", "y", "On"] {
            assert!(parse_bool(Some(truthy)), "{truthy}");
        }
        assert!(!parse_bool(Some("no")));
        assert!(!parse_bool(None));
    }

    #[test]
    fn test_related_params_clamp_and_fallback() {
        let params = RelatedParams::from_raw(&RawParams::from_pairs([("limit", "500")]));
        assert_eq!(params.limit, 50);
        assert_eq!(params.sort, SortSpec::related());

        let params = RelatedParams::from_raw(&RawParams::from_pairs([("limit", "many")]));
        assert_eq!(params.limit, 5);

        let params = RelatedParams::from_raw(&RawParams::from_pairs([("limit", "-3")]));
        assert_eq!(params.limit, 0);
    }

    #[test]
    fn test_raw_params_deserialize_from_query_string() {
        let raw: RawParams = serde_urlencoded::from_str("tag=a&tag=b&q=x%20y").unwrap();
        assert_eq!(raw.all("tag"), vec!["a", "b"]);
        assert_eq!(raw.first("q"), Some("x y"));
    }

    #[test]
    fn test_list_meta_flattens_pagination() {
        let (_, pagination) = PageRequest::page(1, 10).paginate::<u8>(&[]);
        let meta = ListMeta {
            pagination,
            stats_over_page: None,
            stats_over_filtered: Some(Stats::compute(&[])),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["mode"], "page");
        assert_eq!(json["pages"], 0);
        assert!(json.get("stats_over_page").is_none());
        assert_eq!(json["stats_over_filtered"]["count"], 0);
    }
}
