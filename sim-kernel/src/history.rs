//! Linear undo/redo history over MCK systems

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::model::MckSystem;

/// Undo/redo state: everything before, the current system, everything after
///
/// All operations are pure and return a new state. `future` is ordered so its
/// front is the next system `redo` restores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemHistory {
    pub past: Vec<MckSystem>,
    pub present: MckSystem,
    pub future: VecDeque<MckSystem>,
}

impl SystemHistory {
    /// Start a history at `present` with nothing to undo or redo
    pub fn new(present: MckSystem) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: VecDeque::new(),
        }
    }

    /// Record an edit; discards any redo branch
    pub fn apply_change(&self, new_present: MckSystem) -> Self {
        let mut past = self.past.clone();
        past.push(self.present.clone());
        Self {
            past,
            present: new_present,
            future: VecDeque::new(),
        }
    }

    /// Step back one edit, or return an identical state when there is none
    pub fn undo(&self) -> Self {
        let mut next = self.clone();
        if let Some(previous) = next.past.pop() {
            let current = std::mem::replace(&mut next.present, previous);
            next.future.push_front(current);
        }
        next
    }

    /// Step forward one edit, or return an identical state when there is none
    pub fn redo(&self) -> Self {
        let mut next = self.clone();
        if let Some(following) = next.future.pop_front() {
            let current = std::mem::replace(&mut next.present, following);
            next.past.push(current);
        }
        next
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

/// Free-function form of [`SystemHistory::apply_change`]
pub fn apply_change(state: &SystemHistory, new_present: MckSystem) -> SystemHistory {
    state.apply_change(new_present)
}

/// Free-function form of [`SystemHistory::undo`]
pub fn undo(state: &SystemHistory) -> SystemHistory {
    state.undo()
}

/// Free-function form of [`SystemHistory::redo`]
pub fn redo(state: &SystemHistory) -> SystemHistory {
    state.redo()
}
