//! Multi-strategy component search.
//!
//! A query is answered by four tiers, each consulted only while the running
//! result count is below the limit:
//!
//! 1. **Exact tag**: the lower-cased query is a key of the tag index.
//! 2. **Partial tag**: a tag key contains the query, or the query contains
//!    the tag key. Buckets are visited in tag-index order.
//! 3. **Text**: the query is a substring of a record's name, description
//!    or id. Records are visited in snapshot order.
//! 4. **Category fallback**: only without an explicit category filter, the
//!    query itself is resolved to a category (exact, then substring either
//!    way, then a trailing-`s` singular/plural retry) and that category's
//!    records are appended.
//!
//! Results are de-duplicated by id across all tiers, so a record is always
//! reported by the first tier that found it. Because every tier appends in
//! a fixed order, the result for a limit `n` is always the first `n` entries
//! of the result for any larger limit.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CatalogError;
use crate::models::ComponentRecord;
use crate::store::{check_limit, CatalogStore};

/// The tier that produced a search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Tag,
    PartialTag,
    Text,
    Category,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::Tag => "tag",
            MatchStrategy::PartialTag => "partial_tag",
            MatchStrategy::Text => "text",
            MatchStrategy::Category => "category",
        }
    }
}

/// One search result.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub record: &'a ComponentRecord,
    pub strategy: MatchStrategy,
}

/// Accumulates record positions up to a limit, skipping repeats.
struct Collector {
    limit: usize,
    seen: HashSet<usize>,
    hits: Vec<(usize, MatchStrategy)>,
}

impl Collector {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: HashSet::new(),
            hits: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.hits.len() >= self.limit
    }

    fn offer(&mut self, pos: usize, strategy: MatchStrategy) {
        if !self.is_full() && self.seen.insert(pos) {
            self.hits.push((pos, strategy));
        }
    }
}

impl CatalogStore {
    /// Search the catalog. See the module docs for the tier order.
    ///
    /// `category`, when given, restricts every tier to records of that
    /// category (case-insensitive) and disables the category fallback.
    /// A blank query matches nothing. Otherwise the query is only
    /// lower-cased, so surrounding whitespace takes part in matching.
    pub fn search(
        &self,
        query: &str,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<SearchHit<'_>>, CatalogError> {
        let limit = check_limit(limit)?;
        if query.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        let query = query.to_lowercase();

        let wanted = category.map(str::to_lowercase);
        let in_category = |pos: usize| match &wanted {
            Some(cat) => self.folded[pos].category == *cat,
            None => true,
        };

        let mut out = Collector::new(limit);

        if let Some(bucket) = self.by_tag.get(&query) {
            for &pos in bucket.iter().filter(|&&p| in_category(p)) {
                out.offer(pos, MatchStrategy::Tag);
            }
        }

        if !out.is_full() {
            for (tag, bucket) in self.by_tag.iter() {
                if !(tag.contains(query.as_str()) || query.contains(tag)) {
                    continue;
                }
                for &pos in bucket.iter().filter(|&&p| in_category(p)) {
                    out.offer(pos, MatchStrategy::PartialTag);
                }
                if out.is_full() {
                    break;
                }
            }
        }

        if !out.is_full() {
            for (pos, text) in self.folded.iter().enumerate() {
                if out.is_full() {
                    break;
                }
                if !in_category(pos) {
                    continue;
                }
                if text.name.contains(query.as_str())
                    || text.description.contains(query.as_str())
                    || text.id.contains(query.as_str())
                {
                    out.offer(pos, MatchStrategy::Text);
                }
            }
        }

        if !out.is_full() && wanted.is_none() {
            if let Some(bucket) = self
                .resolve_category(&query)
                .and_then(|cat| self.by_category.get(cat))
            {
                for &pos in bucket {
                    out.offer(pos, MatchStrategy::Category);
                }
            }
        }

        Ok(out
            .hits
            .into_iter()
            .map(|(pos, strategy)| SearchHit {
                record: &self.records[pos],
                strategy,
            })
            .collect())
    }

    /// Interpret `query` as a category name.
    ///
    /// Tries an exact match, then the first category (in first-appearance
    /// order) that contains or is contained in the query, then the query
    /// with one trailing `s` removed, then with one `s` added.
    pub fn resolve_category(&self, query: &str) -> Option<&str> {
        if query.trim().is_empty() {
            return None;
        }
        let query = query.to_lowercase();

        if let Some(exact) = self.by_category.keys().find(|c| *c == query) {
            return Some(exact);
        }

        if let Some(partial) = self
            .by_category
            .keys()
            .find(|c| c.contains(query.as_str()) || query.contains(c))
        {
            return Some(partial);
        }

        if let Some(stem) = query.strip_suffix('s') {
            if let Some(singular) = self.by_category.keys().find(|c| *c == stem) {
                return Some(singular);
            }
        }

        let plural = format!("{}s", query);
        self.by_category.keys().find(|c| *c == plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::record;

    fn ids(hits: &[SearchHit<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.record.id.clone()).collect()
    }

    fn sample_store() -> CatalogStore {
        let mut described = record("comp-10", "card", &["surface"]);
        described.description = "Card with a toggle switch".to_string();
        let mut named = record("comp-11", "overlay", &[]);
        named.name = "Switch Dialog".to_string();

        CatalogStore::from_records(vec![
            record("comp-01", "button", &["button", "interactive"]),
            record("comp-02", "input", &["input", "text"]),
            record("comp-03", "switch", &["toggle"]),
            record("comp-04", "button", &["icon-button"]),
            record("comp-05", "input", &["switch"]),
            described,
            named,
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_tag_single_record() {
        let store =
            CatalogStore::from_records(vec![record("btn-1", "button", &["button", "interactive"])])
                .unwrap();
        let hits = store.search("button", None, 10).unwrap();
        assert_eq!(ids(&hits), vec!["btn-1"]);
        assert_eq!(hits[0].strategy, MatchStrategy::Tag);
    }

    #[test]
    fn test_reverse_substring_partial_tag() {
        let store = CatalogStore::from_records(vec![record("c-1", "input", &["checkbox"])]).unwrap();
        let hits = store.search("checkboxes", None, 10).unwrap();
        assert_eq!(ids(&hits), vec!["c-1"]);
        assert_eq!(hits[0].strategy, MatchStrategy::PartialTag);
    }

    #[test]
    fn test_category_fallback_through_plural() {
        let store = CatalogStore::from_records(vec![
            record("f-1", "forms", &["layout"]),
            record("f-2", "forms", &["grid"]),
        ])
        .unwrap();
        let hits = store.search("forms-x", None, 10).unwrap();
        assert_eq!(ids(&hits), vec!["f-1", "f-2"]);
        assert!(hits.iter().all(|h| h.strategy == MatchStrategy::Category));
    }

    #[test]
    fn test_singular_plural_resolution() {
        let store = CatalogStore::from_records(vec![record("t-1", "tabs", &[])]).unwrap();
        assert_eq!(store.resolve_category("tabs"), Some("tabs"));
        let store = CatalogStore::from_records(vec![record("b-1", "badge", &[])]).unwrap();
        assert_eq!(store.resolve_category("BADGES"), Some("badge"));
        assert_eq!(store.resolve_category("tooltip"), None);
    }

    #[test]
    fn test_substring_resolution_either_direction() {
        let store = CatalogStore::from_records(vec![
            record("s-1", "switch", &[]),
            record("s-2", "slider", &[]),
        ])
        .unwrap();
        assert_eq!(store.resolve_category("sliders"), Some("slider"));
        assert_eq!(store.resolve_category("swit"), Some("switch"));
    }

    #[test]
    fn test_limit_zero_is_empty() {
        let store = sample_store();
        assert!(store.search("anything", None, 0).unwrap().is_empty());
        assert!(store.search("button", None, 0).unwrap().is_empty());
    }

    #[test]
    fn test_negative_limit_rejected() {
        let store = sample_store();
        let err = store.search("button", None, -5).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument { .. }));
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let store = sample_store();
        assert!(store.search("   ", None, 10).unwrap().is_empty());
    }

    #[test]
    fn test_unloaded_store_searches_empty() {
        let store = CatalogStore::new();
        assert!(store.search("button", None, 10).unwrap().is_empty());
    }

    #[test]
    fn test_exact_tag_precedes_other_tiers() {
        let store = sample_store();
        let hits = store.search("switch", None, 10).unwrap();
        // comp-05 carries the tag exactly; the rest arrive later.
        assert_eq!(hits[0].record.id, "comp-05");
        assert_eq!(hits[0].strategy, MatchStrategy::Tag);
        let first_other = hits
            .iter()
            .position(|h| h.strategy != MatchStrategy::Tag)
            .unwrap();
        assert!(hits[..first_other]
            .iter()
            .all(|h| h.strategy == MatchStrategy::Tag));
    }

    #[test]
    fn test_tiers_in_order_without_repeats() {
        let store = sample_store();
        let hits = store.search("switch", None, 10).unwrap();
        assert_eq!(
            ids(&hits),
            vec!["comp-05", "comp-10", "comp-11", "comp-03"],
            "tag, then text (description, name), then category"
        );
        let strategies: Vec<MatchStrategy> = hits.iter().map(|h| h.strategy).collect();
        assert_eq!(
            strategies,
            vec![
                MatchStrategy::Tag,
                MatchStrategy::Text,
                MatchStrategy::Text,
                MatchStrategy::Category,
            ]
        );
    }

    #[test]
    fn test_dedup_across_tiers() {
        let mut rec = record("multi", "button", &["button", "buttons", "big-button"]);
        rec.name = "Button".to_string();
        let store = CatalogStore::from_records(vec![rec]).unwrap();
        let hits = store.search("button", None, 10).unwrap();
        assert_eq!(ids(&hits), vec!["multi"]);
    }

    #[test]
    fn test_category_filter_applies_to_all_tiers() {
        let store = sample_store();
        for query in ["button", "switch", "comp", "input"] {
            let hits = store.search(query, Some("INPUT"), 10).unwrap();
            assert!(
                hits.iter()
                    .all(|h| h.record.category.eq_ignore_ascii_case("input")),
                "query {:?} leaked another category",
                query
            );
        }
    }

    #[test]
    fn test_explicit_category_disables_fallback() {
        let store = CatalogStore::from_records(vec![
            record("f-1", "forms", &[]),
            record("f-2", "button", &[]),
        ])
        .unwrap();
        assert!(store.search("forms-x", Some("button"), 10).unwrap().is_empty());
    }

    #[test]
    fn test_limit_prefix_monotonic() {
        let store = sample_store();
        for query in ["switch", "comp", "button", "in"] {
            let full = ids(&store.search(query, None, 100).unwrap());
            for limit in 0..=full.len() as i64 {
                let partial = ids(&store.search(query, None, limit).unwrap());
                assert!(partial.len() <= limit as usize);
                assert_eq!(partial[..], full[..partial.len()], "query {:?}", query);
            }
        }
    }

    #[test]
    fn test_repeated_search_identical() {
        let store = sample_store();
        let first = ids(&store.search("comp", None, 5).unwrap());
        let second = ids(&store.search("comp", None, 5).unwrap());
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn test_partial_tags_follow_tag_index_order() {
        let store = CatalogStore::from_records(vec![
            record("x-1", "a", &["date-picker"]),
            record("x-2", "a", &["picker"]),
            record("x-3", "a", &["color-picker"]),
        ])
        .unwrap();
        let hits = store.search("picker", None, 10).unwrap();
        assert_eq!(ids(&hits), vec!["x-2", "x-1", "x-3"]);
        assert_eq!(hits[0].strategy, MatchStrategy::Tag);
        assert_eq!(hits[1].strategy, MatchStrategy::PartialTag);
    }

    #[test]
    fn test_plural_query_resolves_singular_category() {
        let store = CatalogStore::from_records(vec![record("a-1", "accordion", &[])]).unwrap();
        assert_eq!(store.resolve_category("accordions"), Some("accordion"));
        let store = CatalogStore::from_records(vec![record("n-1", "notes", &[])]).unwrap();
        assert_eq!(store.resolve_category("note"), Some("notes"));
    }

    #[test]
    fn test_surrounding_whitespace_is_not_trimmed() {
        let mut login = record("a-1", "forms", &[]);
        login.name = "Login form".to_string();
        let mut grid = record("b-1", "layout", &[]);
        grid.name = "Platforms grid".to_string();
        let store = CatalogStore::from_records(vec![login, grid]).unwrap();
        assert_eq!(ids(&store.search(" form", None, 10).unwrap()), vec!["a-1"]);

        let store =
            CatalogStore::from_records(vec![record("t-1", "misc", &["button "])]).unwrap();
        let hits = store.search("button ", None, 10).unwrap();
        assert_eq!(ids(&hits), vec!["t-1"]);
        assert_eq!(hits[0].strategy, MatchStrategy::Tag);
    }

    #[test]
    fn test_query_case_insensitive() {
        let store = sample_store();
        assert_eq!(
            ids(&store.search("BUTTON", None, 1).unwrap()),
            ids(&store.search("button", None, 1).unwrap())
        );
    }
}
