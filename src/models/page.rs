//! Listing queries and pagination links.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page size used when `maxResults` is missing or unusable.
pub const DEFAULT_MAX_RESULTS: u64 = 100;

/// Query string for paginated listings: `?q=&start=&maxResults=`.
///
/// Values are parsed leniently: a malformed `start` reads as 0 and a malformed
/// or non-positive `maxResults` falls back to [`DEFAULT_MAX_RESULTS`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawListQuery")]
pub struct ListQuery {
    /// Substring filter
    pub q: String,
    /// Offset of the first row
    pub start: u64,
    /// Page size
    pub max_results: u64,
}

#[derive(Deserialize)]
struct RawListQuery {
    q: Option<String>,
    start: Option<String>,
    #[serde(rename = "maxResults")]
    max_results: Option<String>,
}

impl From<RawListQuery> for ListQuery {
    fn from(raw: RawListQuery) -> Self {
        let start = raw
            .start
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let max_results = raw
            .max_results
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_RESULTS);

        ListQuery {
            q: raw.q.map(|q| q.trim().to_string()).unwrap_or_default(),
            start,
            max_results,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            q: String::new(),
            start: 0,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl ListQuery {
    /// Base URL for pagination links, ending in `?` or `&` so that
    /// `start=..&maxResults=..` can be appended.
    pub fn page_url(&self, path: &str) -> String {
        if self.q.is_empty() {
            format!("{}?", path)
        } else {
            format!("{}?q={}&", path, urlencoding::encode(&self.q))
        }
    }
}

/// Result count and page links for a listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_results: u64,
    pub max_results: u64,
    #[serde(skip)]
    pub paginations: Vec<Pagination>,
}

/// One page link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub start: u64,
    pub current_start: u64,
    pub page: u64,
    pub url: String,
}

impl Pagination {
    pub fn is_current(&self) -> bool {
        self.start == self.current_start
    }
}

impl PageInfo {
    pub fn new(total_results: u64, max_results: u64) -> Self {
        PageInfo {
            total_results,
            max_results,
            paginations: Vec::new(),
        }
    }

    /// Build one link per page, `ceil(total / max)` in all.
    pub fn config_paginations(&mut self, page_url: &str, current_start: u64) {
        if self.max_results == 0 {
            self.paginations.clear();
            return;
        }

        let page_total = self.total_results.div_ceil(self.max_results);
        self.paginations = (0..page_total)
            .map(|i| {
                let start = i * self.max_results;
                Pagination {
                    start,
                    current_start,
                    page: i + 1,
                    url: format!(
                        "{}start={}&maxResults={}",
                        page_url, start, self.max_results
                    ),
                }
            })
            .collect();
    }
}
