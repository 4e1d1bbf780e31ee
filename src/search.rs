//! Relevance scoring and the filter/sort/limit pipeline.
//!
//! Scoring is deliberately simple: a query term contributes one point per
//! occurrence in the query when it appears anywhere in the item's
//! title/name/description haystack. Repeated terms are not deduplicated,
//! so "mug mug" scores matching items higher than "mug" alone; this
//! mirrors the scorer's defined behavior rather than an assumption about
//! intent.

use std::cmp::Ordering;

use rmcp::schemars;
use serde::Deserialize;

use crate::catalog::CatalogItem;

/// Default number of items returned when the caller does not ask for a
/// specific limit.
pub const DEFAULT_LIMIT: usize = 20;
/// Upper bound enforced on the requested limit.
pub const MAX_LIMIT: usize = 100;

/// Sort key for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Relevance,
    Price,
    Title,
}

/// Sort direction. Applies to whichever key is selected, including
/// relevance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A validated search request. Construction applies the documented
/// defaults; range checks on `limit` happen at the tool boundary before
/// one of these exists.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub category: Option<String>,
    pub limit: usize,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: None,
            limit: DEFAULT_LIMIT,
            sort_by: SortKey::default(),
            order: SortOrder::default(),
        }
    }
}

/// Relevance of `item` against `query`.
///
/// Whitespace-only queries score 0 for every item; the pipeline treats
/// that as "no relevance signal" rather than filtering everything out.
pub fn score(item: &CatalogItem, query: &str) -> usize {
    if query.trim().is_empty() {
        return 0;
    }
    let haystack = format!(
        "{} {} {}",
        item.title.as_deref().unwrap_or(""),
        item.name.as_deref().unwrap_or(""),
        item.description.as_deref().unwrap_or(""),
    )
    .to_lowercase();

    query
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|term| haystack.contains(term.as_str()))
        .count()
}

/// Run the full pipeline: filter, sort, limit.
///
/// The sort is stable, so items the comparator considers equal keep
/// their catalog order.
pub fn run(items: Vec<CatalogItem>, params: &SearchParams) -> Vec<CatalogItem> {
    let query = params.query.trim();
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase);

    let mut scored: Vec<(CatalogItem, usize)> = items
        .into_iter()
        .filter_map(|item| {
            if let Some(ref wanted) = category {
                let matches = item
                    .category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase() == *wanted);
                if !matches {
                    return None;
                }
            }
            let relevance = score(&item, query);
            if !query.is_empty() && relevance == 0 {
                return None;
            }
            Some((item, relevance))
        })
        .collect();

    scored.sort_by(|a, b| {
        let natural = match params.sort_by {
            SortKey::Price => {
                let pa = a.0.numeric_price().unwrap_or(f64::INFINITY);
                let pb = b.0.numeric_price().unwrap_or(f64::INFINITY);
                pa.partial_cmp(&pb).unwrap_or(Ordering::Equal)
            }
            SortKey::Title => sort_title(&a.0).cmp(&sort_title(&b.0)),
            SortKey::Relevance => a.1.cmp(&b.1),
        };
        match params.order {
            SortOrder::Asc => natural,
            SortOrder::Desc => natural.reverse(),
        }
    });

    scored.truncate(params.limit);
    scored.into_iter().map(|(item, _)| item).collect()
}

/// Case-folded title used for lexicographic comparison, with the same
/// title-then-name fallback the scorer's haystack uses.
fn sort_title(item: &CatalogItem) -> String {
    item.display_title().unwrap_or("").to_lowercase()
}
