//! Bounded linear undo/redo over whole snapshots.

use std::collections::VecDeque;

/// Default depth bound on the past stack.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Linear history: an ordered past, one present, and an ordered future.
///
/// Every entry is a full, independently-owned snapshot - no entry aliases
/// mutable state with another. The depth bound applies to the past only;
/// the future is naturally bounded by prior undo depth.
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    past: VecDeque<T>,
    present: T,
    future: VecDeque<T>,
    max_size: usize,
}

impl<T: Clone> History<T> {
    pub fn new(initial: T) -> Self {
        Self::with_max_size(initial, DEFAULT_MAX_HISTORY)
    }

    pub fn with_max_size(initial: T, max_size: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    pub fn present_mut(&mut self) -> &mut T {
        &mut self.present
    }

    /// Commit a new present snapshot.
    ///
    /// The old present moves onto the past (evicting the oldest entries
    /// beyond the bound) and all redo state is invalidated - linear
    /// history, not a branching tree.
    pub fn commit(&mut self, next: T) {
        self.past.push_back(std::mem::replace(&mut self.present, next));
        self.future.clear();
        while self.past.len() > self.max_size {
            self.past.pop_front();
        }
    }

    /// Step back one snapshot. No-op (false) when the past is empty.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        self.future
            .push_front(std::mem::replace(&mut self.present, previous));
        true
    }

    /// Step forward one snapshot. No-op (false) when the future is empty.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        self.past
            .push_back(std::mem::replace(&mut self.present, next));
        true
    }

    /// Reset to a single present snapshot with no past or future.
    pub fn clear(&mut self, initial: T) {
        self.past.clear();
        self.future.clear();
        self.present = initial;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undoable steps currently held.
    pub fn depth(&self) -> usize {
        self.past.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}
