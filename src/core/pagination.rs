//! Offset/limit and page/page_size pagination
//!
//! The two modes are mutually exclusive. Offset mode is selected whenever
//! `offset` or `limit` is supplied; otherwise page mode applies. Malformed
//! numbers never fail a request: they reset the mode to its defaults.

use serde::Serialize;

/// Default `limit` and `page_size`
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Upper clamp for `limit` and `page_size`
pub const MAX_PAGE_SIZE: usize = 500;

/// Requested slice of a sequence, after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// 0-based `offset` and `limit`
    Offset { offset: usize, limit: usize },

    /// 1-based `page` of `page_size` items
    Page { page: usize, page_size: usize },
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::Page {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Offset mode with clamped bounds
    pub fn offset(offset: i64, limit: i64) -> Self {
        PageRequest::Offset {
            offset: offset.max(0) as usize,
            limit: limit.clamp(0, MAX_PAGE_SIZE as i64) as usize,
        }
    }

    /// Page mode with clamped bounds
    pub fn page(page: i64, page_size: i64) -> Self {
        PageRequest::Page {
            page: page.max(1) as usize,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE as i64) as usize,
        }
    }

    /// Select the mode and parse its bounds from raw query values
    pub fn from_raw(
        offset: Option<&str>,
        limit: Option<&str>,
        page: Option<&str>,
        page_size: Option<&str>,
    ) -> Self {
        if offset.is_some() || limit.is_some() {
            let parsed = parse_or(offset, 0).zip(parse_or(limit, DEFAULT_PAGE_SIZE as i64));
            let (offset, limit) = parsed.unwrap_or((0, DEFAULT_PAGE_SIZE as i64));
            return Self::offset(offset, limit);
        }

        let parsed = parse_or(page, 1).zip(parse_or(page_size, DEFAULT_PAGE_SIZE as i64));
        let (page, page_size) = parsed.unwrap_or((1, DEFAULT_PAGE_SIZE as i64));
        Self::page(page, page_size)
    }

    /// Slice `records` and describe the result
    pub fn paginate<T: Clone>(&self, records: &[T]) -> (Vec<T>, PaginationMeta) {
        let total = records.len();
        match *self {
            PageRequest::Offset { offset, limit } => {
                let data = window(records, offset, limit);
                let meta = PaginationMeta::Offset {
                    offset,
                    limit,
                    total,
                    returned: data.len(),
                    has_more: offset.saturating_add(limit) < total,
                };
                (data, meta)
            }
            PageRequest::Page { page, page_size } => {
                let start = (page - 1).saturating_mul(page_size);
                let data = window(records, start, page_size);
                let pages = total.div_ceil(page_size);
                let meta = PaginationMeta::Page {
                    page,
                    page_size,
                    total,
                    pages,
                    returned: data.len(),
                    has_next: page < pages,
                    has_prev: page > 1,
                };
                (data, meta)
            }
        }
    }
}

/// Parse an optional integer; `Some(default)` when absent, `None` when malformed
///
/// Well-formed integers outside the `i64` range saturate.
fn parse_or(raw: Option<&str>, default: i64) -> Option<i64> {
    let Some(s) = raw.map(str::trim) else {
        return Some(default);
    };
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

fn window<T: Clone>(records: &[T], start: usize, len: usize) -> Vec<T> {
    let start = start.min(records.len());
    let end = start.saturating_add(len).min(records.len());
    records[start..end].to_vec()
}

/// Pagination metadata
///
/// Serialized with a `mode` tag of `"offset"` or `"page"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum PaginationMeta {
    Offset {
        offset: usize,
        limit: usize,
        /// Total number of items (after filters)
        total: usize,
        returned: usize,
        has_more: bool,
    },
    Page {
        page: usize,
        page_size: usize,
        /// Total number of items (after filters)
        total: usize,
        pages: usize,
        returned: usize,
        has_next: bool,
        has_prev: bool,
    },
}

impl PaginationMeta {
    /// Total number of items across all pages
    pub fn total(&self) -> usize {
        match self {
            PaginationMeta::Offset { total, .. } | PaginationMeta::Page { total, .. } => *total,
        }
    }

    /// Number of items in this page
    pub fn returned(&self) -> usize {
        match self {
            PaginationMeta::Offset { returned, .. } | PaginationMeta::Page { returned, .. } => {
                *returned
            }
        }
    }
}
