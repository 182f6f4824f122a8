//! Requests that are still outstanding.
//!
//! The set lives outside the page lock and each slot is released by
//! [`InFlightGuard`]'s `Drop`, so a handler future dropped mid-request (the
//! browser went away) still frees its action.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An action that may have a request outstanding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum InFlight {
    Login,
    Signup,
    TaskSubmit,
    TaskDelete(String),
    ReminderAdd,
    ReminderDelete(String),
}

#[derive(Debug, Clone, Default)]
pub struct InFlightSet {
    entries: Arc<Mutex<BTreeSet<InFlight>>>,
}

impl InFlightSet {
    /// Registers `action`, or returns `None` if it is already outstanding.
    pub fn try_begin(&self, action: InFlight) -> Option<InFlightGuard> {
        if !self.entries().insert(action.clone()) {
            return None;
        }
        Some(InFlightGuard {
            set: self.clone(),
            action,
        })
    }

    pub fn is_busy(&self, action: &InFlight) -> bool {
        self.entries().contains(action)
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeSet<InFlight>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    set: InFlightSet,
    action: InFlight,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set.entries().remove(&self.action);
    }
}
