//! Bounded undo/redo log.
//!
//! [`History`] stores already-applied entries and a cursor pointing at the
//! most recent applied one. It never applies entries itself; `undo` and
//! `redo` hand the entry to a caller-supplied executor and move the cursor
//! only when the executor reports success. Pushing while undone truncates
//! the redo branch, and the log evicts its oldest entry once the configured
//! depth is exceeded.

use serde::{Deserialize, Serialize};

/// Observable log state, published after every successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryStatus {
    /// Whether an undo step is available.
    pub can_undo: bool,
    /// Whether a redo step is available.
    pub can_redo: bool,
    /// Number of entries currently in the log.
    pub len: usize,
    /// Index of the most recent applied entry, `None` when fully undone.
    pub cursor: Option<usize>,
}

type ChangeCallback = Box<dyn FnMut(HistoryStatus) + Send>;

/// Undo/redo log over entries of type `C`.
pub struct History<C> {
    entries: Vec<C>,
    cursor: Option<usize>,
    max_steps: usize,
    on_change: Option<ChangeCallback>,
}

impl<C> History<C> {
    /// Create an empty log holding at most `max_steps` entries.
    ///
    /// A zero depth is clamped to one so the log can always hold the most
    /// recent edit.
    pub fn new(max_steps: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_steps: max_steps.max(1),
            on_change: None,
        }
    }

    /// Record an already-applied entry.
    ///
    /// Entries above the cursor (the redo branch) are discarded, the entry
    /// is appended, and the cursor advances onto it. If the log is over
    /// capacity afterwards the oldest entry is evicted and the cursor
    /// shifts down with it.
    pub fn push(&mut self, entry: C) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);

        while self.entries.len() > self.max_steps {
            self.entries.remove(0);
            self.cursor = self.cursor.and_then(|c| c.checked_sub(1));
        }

        self.notify();
    }

    /// Undo the entry under the cursor.
    ///
    /// The executor receives the entry and reports whether reverting it
    /// succeeded. On success the cursor steps back and listeners are
    /// notified; on failure the cursor stays where it is. Returns `false`
    /// when there is nothing to undo or the executor failed.
    pub fn undo<F>(&mut self, executor: F) -> bool
    where
        F: FnOnce(&C) -> bool,
    {
        let Some(current) = self.cursor else {
            return false;
        };
        if !executor(&self.entries[current]) {
            return false;
        }
        self.cursor = current.checked_sub(1);
        self.notify();
        true
    }

    /// Redo the entry after the cursor.
    ///
    /// The cursor advances onto the entry before the executor runs; if the
    /// executor fails the advance is rolled back and listeners are not
    /// notified. Returns `false` when the cursor is already at the tail or
    /// the executor failed.
    pub fn redo<F>(&mut self, executor: F) -> bool
    where
        F: FnOnce(&C) -> bool,
    {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.entries.len() {
            return false;
        }
        let previous = self.cursor;
        self.cursor = Some(next);
        if !executor(&self.entries[next]) {
            self.cursor = previous;
            return false;
        }
        self.notify();
        true
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |c| c + 1) < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the most recent applied entry, `None` when fully undone.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Configured maximum depth.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Current observable state of the log.
    pub fn status(&self) -> HistoryStatus {
        HistoryStatus {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            len: self.entries.len(),
            cursor: self.cursor,
        }
    }

    /// Drop all entries and reset the cursor. Listeners are notified.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.notify();
    }

    /// Install the callback invoked after every successful mutation.
    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: FnMut(HistoryStatus) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    fn notify(&mut self) {
        let status = self.status();
        if let Some(callback) = self.on_change.as_mut() {
            callback(status);
        }
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for History<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("entries", &self.entries)
            .field("cursor", &self.cursor)
            .field("max_steps", &self.max_steps)
            .finish()
    }
}
