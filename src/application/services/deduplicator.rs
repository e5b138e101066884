//! Merging of filtered batches into one deduplicated result set.

use indexmap::IndexMap;

use crate::domain::entities::{DedupKey, FilteredJobRecord};

/// Accumulates filtered postings keyed by [`DedupKey`].
///
/// On collision the later record replaces the earlier one (last-write-wins)
/// but keeps the slot of the first insertion, so output order is stable for
/// a given input sequence.
#[derive(Debug, Default)]
pub struct Deduplicator {
    entries: IndexMap<DedupKey, FilteredJobRecord>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one batch into the set.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = FilteredJobRecord>) {
        for record in batch {
            self.entries.insert(record.dedup_key(), record);
        }
    }

    /// Distinct records so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_records(self) -> Vec<FilteredJobRecord> {
        self.entries.into_values().collect()
    }
}
