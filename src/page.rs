//! In-memory UI state. Every change to what the user sees goes through
//! [`Page`]; the HTML is rendered from it by [`crate::ui::render_page`].

use crate::alerts::{AlertKind, Alerts};
use crate::models::{Reminder, TaskItem};
use crate::storage::Theme;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Login,
    Signup,
    Dashboard,
}

impl View {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "login" => Some(View::Login),
            "signup" => Some(View::Signup),
            "dashboard" => Some(View::Dashboard),
            _ => None,
        }
    }
}

/// Issue/apply bookkeeping for a list that is re-fetched as a whole.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FetchClock {
    issued: u64,
    applied: u64,
}

impl FetchClock {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Accepts a completion unless a later fetch has already been applied.
    pub fn accept(&mut self, generation: u64) -> bool {
        if generation <= self.applied {
            return false;
        }
        self.applied = generation;
        true
    }

    /// Rejects every generation issued so far. Used after a local edit that
    /// a fetch already on the wire would not reflect.
    pub fn supersede(&mut self) {
        self.applied = self.applied.max(self.issued);
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReminderPanel {
    /// `None` until the first fetch completes.
    pub items: Option<Vec<Reminder>>,
    pub form_visible: bool,
    pub pending_delete: Option<String>,
    #[serde(skip)]
    pub clock: FetchClock,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskList {
    pub items: BTreeMap<String, TaskItem>,
    /// Set after a task mutation; the next page load re-fetches the list.
    pub stale: bool,
    pub loaded: bool,
    /// Id of the task whose values fill the task form.
    pub editing: Option<String>,
    #[serde(skip)]
    pub clock: FetchClock,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    pub view: View,
    pub theme: Theme,
    pub tasks: TaskList,
    pub reminders: ReminderPanel,
    pub alerts: Alerts,
}

impl Page {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn alert(&mut self, kind: AlertKind, message: impl Into<String>) -> u64 {
        self.alerts.push(kind, message)
    }

    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    pub fn needs_task_load(&self) -> bool {
        !self.tasks.loaded || self.tasks.stale
    }

    pub fn mark_tasks_stale(&mut self) {
        self.tasks.stale = true;
    }

    pub fn apply_tasks(&mut self, generation: u64, items: Vec<TaskItem>) -> bool {
        if !self.tasks.clock.accept(generation) {
            return false;
        }
        self.tasks.items = items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        self.tasks.loaded = true;
        self.tasks.stale = false;
        if let Some(editing) = &self.tasks.editing {
            if !self.tasks.items.contains_key(editing) {
                self.tasks.editing = None;
            }
        }
        true
    }

    /// Drops the item with this id; every other item stays. A list fetch
    /// issued before the delete can no longer bring it back.
    pub fn remove_task(&mut self, id: &str) -> Option<TaskItem> {
        let removed = self.tasks.items.remove(id)?;
        self.tasks.clock.supersede();
        if self.tasks.editing.as_deref() == Some(id) {
            self.tasks.editing = None;
        }
        Some(removed)
    }

    /// Puts the task's values into the task form. Unknown ids are ignored.
    pub fn start_editing(&mut self, id: &str) -> bool {
        if !self.tasks.items.contains_key(id) {
            return false;
        }
        self.tasks.editing = Some(id.to_string());
        true
    }

    pub fn stop_editing(&mut self) {
        self.tasks.editing = None;
    }

    pub fn editing_task(&self) -> Option<&TaskItem> {
        self.tasks
            .editing
            .as_deref()
            .and_then(|id| self.tasks.items.get(id))
    }

    pub fn apply_reminders(&mut self, generation: u64, items: Vec<Reminder>) -> bool {
        if !self.reminders.clock.accept(generation) {
            return false;
        }
        if let Some(pending) = &self.reminders.pending_delete {
            if !items.iter().any(|reminder| &reminder.id == pending) {
                self.reminders.pending_delete = None;
            }
        }
        self.reminders.items = Some(items);
        true
    }

    pub fn show_reminder_form(&mut self) {
        self.reminders.form_visible = true;
    }

    pub fn hide_reminder_form(&mut self) {
        self.reminders.form_visible = false;
    }

    pub fn request_reminder_delete(&mut self, id: impl Into<String>) {
        self.reminders.pending_delete = Some(id.into());
    }

    pub fn cancel_reminder_delete(&mut self) {
        self.reminders.pending_delete = None;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
