//! Insertion-ordered multimap from a folded key to record positions.

use std::collections::HashMap;

/// Buckets of record positions keyed by a lower-cased string.
///
/// Iteration follows first-insertion order of the keys, and each bucket
/// keeps its positions in insertion order, so lookups replay the snapshot
/// order of the records that were indexed.
#[derive(Debug, Default, Clone)]
pub(crate) struct OrderedIndex {
    keys: Vec<String>,
    buckets: Vec<Vec<usize>>,
    positions: HashMap<String, usize>,
}

impl OrderedIndex {
    pub(crate) fn push(&mut self, key: String, record: usize) {
        match self.positions.get(&key) {
            Some(&slot) => self.buckets[slot].push(record),
            None => {
                self.positions.insert(key.clone(), self.keys.len());
                self.keys.push(key);
                self.buckets.push(vec![record]);
            }
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<&[usize]> {
        self.positions
            .get(key)
            .map(|&slot| self.buckets[slot].as_slice())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.buckets.iter().map(Vec::as_slice))
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }
}
