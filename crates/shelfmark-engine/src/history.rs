use std::collections::VecDeque;

use shelfmark_types::FilterCriteria;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Bounded undo/redo stack of committed criteria snapshots.
///
/// Entries ahead of the cursor form the redo branch; a new commit after an
/// undo discards that branch. On overflow the oldest entry is evicted and
/// the cursor shifts with it, so it keeps pointing at the same snapshot.
///
/// Also tracks the snapshot last used for a successful fetch, which is what
/// `filters_changed` compares a live draft against.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: VecDeque<FilterCriteria>,
    cursor: Option<usize>,
    capacity: usize,
    applied: Option<FilterCriteria>,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryManager {
    /// A capacity of zero is raised to one: the current entry must fit.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: None,
            capacity: capacity.max(1),
            applied: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&FilterCriteria> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    /// Push a snapshot; returns `false` when it equals the current entry.
    pub fn commit(&mut self, criteria: FilterCriteria) -> bool {
        if self.current() == Some(&criteria) {
            return false;
        }

        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push_back(criteria);
        let mut cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            cursor -= 1;
            tracing::debug!(capacity = self.capacity, "history full, evicted oldest entry");
        }
        self.cursor = Some(cursor);
        true
    }

    pub fn undo(&mut self) -> Option<&FilterCriteria> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.current()
            }
            _ => None,
        }
    }

    pub fn redo(&mut self) -> Option<&FilterCriteria> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                self.current()
            }
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.entries.len())
    }

    /// Record the snapshot a successful fetch was made with
    pub fn mark_applied(&mut self, criteria: FilterCriteria) {
        self.applied = Some(criteria);
    }

    pub fn applied(&self) -> Option<&FilterCriteria> {
        self.applied.as_ref()
    }

    /// Whether `live` differs from what the visible list was fetched with.
    ///
    /// Before any successful fetch the baseline is the default criteria.
    pub fn filters_changed(&self, live: &FilterCriteria) -> bool {
        match &self.applied {
            Some(applied) => applied != live,
            None => *live != FilterCriteria::default(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
