//! In-memory catalog store.
//!
//! A [`CatalogStore`] owns one immutable snapshot of the component catalog
//! and three derived indexes:
//!
//! | Index | Key | Value |
//! |-------|-----|-------|
//! | `by_id` | record id | position in the record list |
//! | `by_tag` | lower-cased tag | positions, snapshot order |
//! | `by_category` | lower-cased category | positions, snapshot order |
//!
//! Indexes are built into fresh structures and swapped in only once the
//! whole snapshot has been validated, so a failed [`load`](CatalogStore::load)
//! leaves the previous snapshot intact. Replacing a snapshot that readers
//! are already using is the job of the application's shared handle, not of
//! the store: once loaded, a store is only ever read.

mod index;

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::error::CatalogError;
use crate::models::{ComponentRecord, SnapshotInfo};

pub(crate) use index::OrderedIndex;

/// Lower-cased copies of the free-text match surfaces of one record.
#[derive(Debug, Clone)]
pub(crate) struct FoldedText {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) category: String,
}

/// Aggregate counts over a loaded snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub category_count: usize,
    pub tag_count: usize,
    /// `(category, record count)`, largest first; ties keep first appearance.
    pub top_categories: Vec<(String, usize)>,
}

/// The authoritative component snapshot plus its indexes.
#[derive(Debug, Default, Clone)]
pub struct CatalogStore {
    pub(crate) records: Vec<ComponentRecord>,
    pub(crate) folded: Vec<FoldedText>,
    pub(crate) by_id: HashMap<String, usize>,
    pub(crate) by_tag: OrderedIndex,
    pub(crate) by_category: OrderedIndex,
    categories: Vec<String>,
    tags: Vec<String>,
    info: SnapshotInfo,
    loaded: bool,
}

impl CatalogStore {
    /// Create an empty, unloaded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a loaded store in one step.
    pub fn from_records(records: Vec<ComponentRecord>) -> Result<Self, CatalogError> {
        let mut store = Self::new();
        store.load(records)?;
        Ok(store)
    }

    /// Replace the snapshot with `records` and rebuild every index.
    ///
    /// Fails with [`CatalogError::DuplicateId`] if two records share an id;
    /// nothing is changed in that case.
    pub fn load(&mut self, records: Vec<ComponentRecord>) -> Result<(), CatalogError> {
        self.load_with_info(records, SnapshotInfo::default())
    }

    /// Like [`load`](Self::load), also recording registry-level facts.
    pub fn load_with_info(
        &mut self,
        records: Vec<ComponentRecord>,
        info: SnapshotInfo,
    ) -> Result<(), CatalogError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (pos, rec) in records.iter().enumerate() {
            if by_id.insert(rec.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId { id: rec.id.clone() });
            }
        }

        let records: Vec<ComponentRecord> = records.into_iter().map(normalize_tags).collect();

        let mut by_tag = OrderedIndex::default();
        let mut by_category = OrderedIndex::default();
        let mut folded = Vec::with_capacity(records.len());
        let mut categories = BTreeSet::new();
        let mut tags = BTreeSet::new();

        for (pos, rec) in records.iter().enumerate() {
            for tag in &rec.tags {
                let key = tag.to_lowercase();
                tags.insert(key.clone());
                by_tag.push(key, pos);
            }

            let category = rec.category.to_lowercase();
            categories.insert(category.clone());
            by_category.push(category.clone(), pos);

            folded.push(FoldedText {
                id: rec.id.to_lowercase(),
                name: rec.name.to_lowercase(),
                description: rec.description.to_lowercase(),
                category,
            });
        }

        *self = CatalogStore {
            records,
            folded,
            by_id,
            by_tag,
            by_category,
            categories: categories.into_iter().collect(),
            tags: tags.into_iter().collect(),
            info,
            loaded: true,
        };
        Ok(())
    }

    /// Whether a snapshot has been loaded (possibly with zero records).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in snapshot order.
    pub fn records(&self) -> &[ComponentRecord] {
        &self.records
    }

    /// Sorted distinct categories (lower-cased).
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Sorted distinct tags (lower-cased).
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn info(&self) -> &SnapshotInfo {
        &self.info
    }

    /// Look up a record by its exact id.
    pub fn get_by_id(&self, id: &str) -> Option<&ComponentRecord> {
        self.by_id.get(id).map(|&pos| &self.records[pos])
    }

    /// Up to `limit` records, optionally restricted to one category.
    ///
    /// An unknown category yields an empty list, not an error.
    pub fn list_by_category(
        &self,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<&ComponentRecord>, CatalogError> {
        let limit = check_limit(limit)?;
        let listed = match category {
            None => self.records.iter().take(limit).collect(),
            Some(cat) => self
                .by_category
                .get(&cat.to_lowercase())
                .unwrap_or(&[])
                .iter()
                .take(limit)
                .map(|&pos| &self.records[pos])
                .collect(),
        };
        Ok(listed)
    }

    /// Record counts per category, the `top_n` largest first.
    pub fn stats(&self, top_n: usize) -> CatalogStats {
        let mut counts: Vec<(String, usize)> = self
            .by_category
            .iter()
            .map(|(cat, bucket)| (cat.to_string(), bucket.len()))
            .collect();
        // Stable sort: equal counts stay in first-appearance order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(top_n);

        CatalogStats {
            total: self.records.len(),
            category_count: self.by_category.len(),
            tag_count: self.by_tag.len(),
            top_categories: counts,
        }
    }
}

/// Validate a caller-supplied limit.
pub(crate) fn check_limit(limit: i64) -> Result<usize, CatalogError> {
    usize::try_from(limit).map_err(|_| CatalogError::negative_limit(limit))
}

/// Drop blank tags and case-insensitive repeats, keeping first spellings.
fn normalize_tags(mut rec: ComponentRecord) -> ComponentRecord {
    let mut seen = HashSet::new();
    rec.tags.retain(|t| !t.trim().is_empty() && seen.insert(t.to_lowercase()));
    rec
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Provenance, Styling};

    pub(crate) fn record(id: &str, category: &str, tags: &[&str]) -> ComponentRecord {
        ComponentRecord {
            id: id.to_string(),
            name: format!("Component {}", id),
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            description: String::new(),
            install_reference: format!("https://originui.com/r/{}.json", id),
            dependencies: Vec::new(),
            registry_dependencies: Vec::new(),
            kind: "registry:component".to_string(),
            styling: Styling::default(),
            metadata: Provenance::default(),
            preview_url: None,
        }
    }

    fn ids(records: &[&ComponentRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_new_store_is_unloaded_and_empty() {
        let store = CatalogStore::new();
        assert!(!store.is_loaded());
        assert!(store.is_empty());
        assert!(store.get_by_id("anything").is_none());
        assert!(store.list_by_category(None, 10).unwrap().is_empty());
    }

    #[test]
    fn test_empty_load_is_still_loaded() {
        let store = CatalogStore::from_records(Vec::new()).unwrap();
        assert!(store.is_loaded());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_get_by_id_one_record_per_id() {
        let store = CatalogStore::from_records(vec![
            record("a", "button", &["button"]),
            record("b", "input", &["input"]),
        ])
        .unwrap();

        for id in ["a", "b"] {
            let found = store.get_by_id(id).unwrap();
            assert_eq!(found.id, id);
        }
        assert!(store.get_by_id("A").is_none(), "id lookup is exact");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = CatalogStore::from_records(vec![
            record("dup", "button", &[]),
            record("other", "button", &[]),
            record("dup", "input", &[]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateId {
                id: "dup".to_string()
            }
        );
    }

    #[test]
    fn test_failed_load_keeps_previous_snapshot() {
        let mut store = CatalogStore::from_records(vec![record("keep", "card", &[])]).unwrap();
        let result = store.load(vec![record("x", "a", &[]), record("x", "b", &[])]);
        assert!(result.is_err());
        assert!(store.get_by_id("keep").is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reload_replaces_indexes() {
        let mut store = CatalogStore::from_records(vec![record("old", "card", &["old"])]).unwrap();
        store.load(vec![record("new", "badge", &["new"])]).unwrap();
        assert!(store.get_by_id("old").is_none());
        assert!(store.list_by_category(Some("card"), 10).unwrap().is_empty());
        assert_eq!(store.categories(), &["badge".to_string()]);
    }

    #[test]
    fn test_tags_deduplicated_within_record() {
        let store = CatalogStore::from_records(vec![record(
            "t",
            "button",
            &["Button", "button", " ", "ui", "UI"],
        )])
        .unwrap();
        let rec = store.get_by_id("t").unwrap();
        assert_eq!(rec.tags, vec!["Button", "ui"]);
        assert_eq!(store.by_tag.get("button"), Some(&[0][..]));
        assert_eq!(store.tags(), &["button".to_string(), "ui".to_string()]);
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        let store = CatalogStore::from_records(vec![
            record("1", "Select", &[]),
            record("2", "button", &[]),
            record("3", "select", &[]),
        ])
        .unwrap();
        assert_eq!(
            store.categories(),
            &["button".to_string(), "select".to_string()]
        );
    }

    #[test]
    fn test_list_without_category_uses_snapshot_order() {
        let store = CatalogStore::from_records(vec![
            record("1", "a", &[]),
            record("2", "b", &[]),
            record("3", "a", &[]),
        ])
        .unwrap();
        assert_eq!(ids(&store.list_by_category(None, 2).unwrap()), vec!["1", "2"]);
        assert_eq!(
            ids(&store.list_by_category(Some("A"), 50).unwrap()),
            vec!["1", "3"]
        );
    }

    #[test]
    fn test_list_unknown_category_is_empty() {
        let store = CatalogStore::from_records(vec![record("1", "button", &[])]).unwrap();
        let listed = store
            .list_by_category(Some("nonexistent-category"), 50)
            .unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_list_limit_zero_and_negative() {
        let store = CatalogStore::from_records(vec![record("1", "button", &[])]).unwrap();
        assert!(store.list_by_category(None, 0).unwrap().is_empty());
        let err = store.list_by_category(None, -1).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument { ref argument, .. } if argument == "limit"));
    }

    #[test]
    fn test_stats_orders_by_count_then_first_appearance() {
        let store = CatalogStore::from_records(vec![
            record("1", "input", &["a"]),
            record("2", "button", &["b"]),
            record("3", "button", &["a"]),
            record("4", "card", &[]),
            record("5", "input", &[]),
            record("6", "badge", &[]),
        ])
        .unwrap();

        let stats = store.stats(3);
        assert_eq!(stats.total, 6);
        assert_eq!(stats.category_count, 4);
        assert_eq!(stats.tag_count, 2);
        assert_eq!(
            stats.top_categories,
            vec![
                ("input".to_string(), 2),
                ("button".to_string(), 2),
                ("card".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_stats_counts_folded_keys() {
        let store = CatalogStore::from_records(vec![
            record("1", "Input", &["Focus"]),
            record("2", "input", &["focus", "ring"]),
        ])
        .unwrap();

        let stats = store.stats(5);
        assert_eq!(stats.category_count, 1);
        assert_eq!(stats.tag_count, 2);
        assert_eq!(stats.top_categories, vec![("input".to_string(), 2)]);
    }
}
