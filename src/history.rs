//! Bounded, truncating undo/redo history.
//!
//! This module provides the history stack behind the picker's undo/redo.
//! Key properties:
//!
//! - **Never empty**: created with its first entry, so there is always a
//!   current entry and `index <= len - 1`
//! - **Truncating**: pushing after an undo discards the abandoned redo tail
//! - **Bounded capacity**: the oldest entry is evicted once the bound is
//!   exceeded, so long drag sessions cannot grow memory without limit
//!
//! # Example
//!
//! ```rust
//! use color_wrap::history::HistoryStack;
//!
//! let mut history = HistoryStack::new(0);
//! history.push(1);
//! history.push(2);
//! assert_eq!(history.undo(), Some(&1));
//! history.push(3); // drops 2
//! assert_eq!(history.redo(), None);
//! assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![0, 1, 3]);
//! ```

use std::collections::VecDeque;

use tracing::trace;

/// Default number of retained entries.
pub const DEFAULT_CAPACITY: usize = 50;

/// An undo/redo stack with a current position.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    /// Oldest entry first.
    entries: VecDeque<T>,
    /// Position of the current entry in `entries`.
    index: usize,
    /// Maximum number of entries (never exceeded).
    capacity: usize,
}

#[allow(clippy::len_without_is_empty)]
impl<T> HistoryStack<T> {
    /// Creates a history holding only `initial`, bounded at [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    /// Creates a history holding only `initial` with the given bound.
    ///
    /// # Panics
    ///
    /// Panics if capacity is 0.
    #[must_use]
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        assert!(capacity > 0, "History capacity must be greater than 0");
        let mut entries = VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY) + 1);
        entries.push_back(initial);
        Self { entries, index: 0, capacity }
    }

    /// Commits `entry` as the new current entry.
    ///
    /// Any entries after the current position are discarded first. If the
    /// bound is then exceeded, the oldest entry is evicted.
    pub fn push(&mut self, entry: T) {
        let discarded = self.entries.len() - (self.index + 1);
        if discarded > 0 {
            trace!(discarded, "truncating redo history");
            self.entries.truncate(self.index + 1);
        }

        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            trace!(capacity = self.capacity, "evicted oldest history entry");
        }
        self.index = self.entries.len() - 1;
    }

    /// Steps back one entry and returns it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Steps forward one entry and returns it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// True if [`undo`](Self::undo) would succeed.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// True if [`redo`](Self::redo) would succeed.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The entry at the current position.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    /// Position of the current entry, 0 being the oldest retained entry.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of retained entries (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Maximum number of retained entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from the oldest retained entry to the newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================


// ============================================================================
// Property-based tests with proptest
// ============================================================================
