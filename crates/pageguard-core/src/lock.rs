//! Single-editor lock.
//!
//! One flag per page load. Acquired by an edit-link click while free,
//! released only by a cancel control. Submitting the edit form does not
//! release it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockDecision {
    /// The lock was free and is now held.
    Acquired,
    /// Another edit already holds the lock.
    AlreadyHeld,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorLock {
    held: bool,
}

impl EditorLock {
    pub fn try_acquire(&mut self) -> LockDecision {
        if self.held {
            LockDecision::AlreadyHeld
        } else {
            self.held = true;
            LockDecision::Acquired
        }
    }

    /// Free the lock. Returns whether it was held.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.held, false)
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Counters kept for the lifetime of a page load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub edits_opened: u32,
    pub edits_blocked: u32,
    pub releases: u32,
    pub submissions_suppressed: u32,
    pub destructive_declined: u32,
}

/// Page-load-scoped state owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct PageSession {
    edit_lock: EditorLock,
    stats: SessionStats,
}

impl PageSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire_edit_lock(&mut self) -> LockDecision {
        let decision = self.edit_lock.try_acquire();
        match decision {
            LockDecision::Acquired => bump(&mut self.stats.edits_opened),
            LockDecision::AlreadyHeld => bump(&mut self.stats.edits_blocked),
        }
        decision
    }

    pub fn release_edit_lock(&mut self) -> bool {
        bump(&mut self.stats.releases);
        self.edit_lock.release()
    }

    pub fn is_edit_lock_held(&self) -> bool {
        self.edit_lock.is_held()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub(crate) fn record_suppressed_submission(&mut self) {
        bump(&mut self.stats.submissions_suppressed);
    }

    pub(crate) fn record_declined_confirmation(&mut self) {
        bump(&mut self.stats.destructive_declined);
    }
}

/// Counters stick at `u32::MAX` on a long-lived page.
fn bump(counter: &mut u32) {
    *counter = counter.saturating_add(1);
}
