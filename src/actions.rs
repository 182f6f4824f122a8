//! UI events. Each one validates, sends at most one mutating request and
//! applies the result to the [`Page`].
//!
//! The page lock is never held across a backend call: a handler locks to
//! validate, takes its in-flight guard, releases, awaits the backend, then
//! locks again to apply the outcome.

use crate::alerts::AlertKind;
use crate::errors::{AppError, GENERIC_FAILURE, GlueError};
use crate::models::{
    Envelope, LoginForm, ReminderDeleteForm, ReminderForm, SignupForm, TaskForm, TaskListClick,
};
use crate::inflight::InFlight;
use crate::page::{Page, View};
use crate::state::AppState;
use crate::storage::{Preferences, Theme, persist_preferences};
use crate::validation::{self, TaskTarget};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const DELETE_TASK_CONTROL: &str = "delete-task";
pub const EDIT_TASK_CONTROL: &str = "edit-task";
pub const CANCEL_EDIT_CONTROL: &str = "cancel-edit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was sent: a duplicate submission or an unrelated click.
    Ignored,
    /// A destructive action is waiting for the user to confirm it.
    AwaitingConfirmation,
    /// Only the page changed; nothing was sent.
    Applied,
    Succeeded,
    Failed(GlueError),
}

/// Adds an alert and schedules its removal after the configured delay.
pub fn show_alert(state: &AppState, page: &mut Page, kind: AlertKind, message: impl Into<String>) {
    let id = page.alert(kind, message);
    let handle = Arc::clone(&state.page);
    let ttl = state.alert_ttl;
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        handle.lock().await.alerts.dismiss(id);
    });
}

fn invalid(state: &AppState, page: &mut Page, err: GlueError) -> Outcome {
    show_alert(state, page, AlertKind::Error, err.to_string());
    Outcome::Failed(err)
}

fn rejected(state: &AppState, page: &mut Page, alert: String, envelope: &Envelope) -> Outcome {
    warn!(reason = envelope.message_or_default(), "backend rejected request");
    show_alert(state, page, AlertKind::Error, alert);
    Outcome::Failed(GlueError::Request(envelope.message_or_default().to_string()))
}

fn transport_failure(state: &AppState, page: &mut Page, operation: &str, err: GlueError) -> Outcome {
    error!("{operation} error: {err}");
    show_alert(state, page, AlertKind::Error, GENERIC_FAILURE);
    Outcome::Failed(err)
}

pub async fn submit_login(state: &AppState, form: &LoginForm) -> Outcome {
    let (request, guard) = {
        let mut page = state.page.lock().await;
        let request = match validation::login_request(form) {
            Ok(request) => request,
            Err(err) => return invalid(state, &mut page, err),
        };
        let Some(guard) = state.in_flight.try_begin(InFlight::Login) else {
            debug!("login already in flight");
            return Outcome::Ignored;
        };
        (request, guard)
    };

    let result = state.backend.login(&request).await;
    drop(guard);

    let mut page = state.page.lock().await;
    match result {
        Ok(envelope) if envelope.success => {
            info!("login succeeded, showing dashboard");
            show_alert(state, &mut page, AlertKind::Success, "Login successful!");
            page.navigate(View::Dashboard);
            page.mark_tasks_stale();
            Outcome::Succeeded
        }
        Ok(envelope) => {
            let alert = format!("Login failed: {}", envelope.message_or_default());
            rejected(state, &mut page, alert, &envelope)
        }
        Err(err) => transport_failure(state, &mut page, "Login", err),
    }
}

pub async fn submit_signup(state: &AppState, form: &SignupForm) -> Outcome {
    let (request, guard) = {
        let mut page = state.page.lock().await;
        let request = match validation::signup_request(form) {
            Ok(request) => request,
            Err(err) => return invalid(state, &mut page, err),
        };
        let Some(guard) = state.in_flight.try_begin(InFlight::Signup) else {
            debug!("signup already in flight");
            return Outcome::Ignored;
        };
        (request, guard)
    };

    let result = state.backend.signup(&request).await;
    drop(guard);

    let mut page = state.page.lock().await;
    match result {
        Ok(envelope) if envelope.success => {
            info!("signup succeeded, showing login");
            show_alert(
                state,
                &mut page,
                AlertKind::Success,
                "Signup successful! Redirecting to login...",
            );
            page.navigate(View::Login);
            Outcome::Succeeded
        }
        Ok(envelope) => {
            let alert = format!("Signup failed: {}", envelope.message_or_default());
            rejected(state, &mut page, alert, &envelope)
        }
        Err(err) => transport_failure(state, &mut page, "Signup", err),
    }
}

/// Creates or updates a task; the list is re-fetched on the next page load.
pub async fn submit_task(state: &AppState, form: &TaskForm) -> Outcome {
    let ((target, payload), guard) = {
        let mut page = state.page.lock().await;
        let request = match validation::task_request(form) {
            Ok(request) => request,
            Err(err) => return invalid(state, &mut page, err),
        };
        let Some(guard) = state.in_flight.try_begin(InFlight::TaskSubmit) else {
            debug!("task submit already in flight");
            return Outcome::Ignored;
        };
        (request, guard)
    };

    let result = state.backend.save_task(&target, &payload).await;
    drop(guard);

    let mut page = state.page.lock().await;
    match result {
        Ok(envelope) if envelope.success => {
            let message = match target {
                TaskTarget::Edit(_) => "Task updated successfully!",
                TaskTarget::Add => "Task added successfully!",
            };
            show_alert(state, &mut page, AlertKind::Success, message);
            page.stop_editing();
            page.mark_tasks_stale();
            Outcome::Succeeded
        }
        Ok(envelope) => {
            let alert = format!("Task operation failed: {}", envelope.message_or_default());
            rejected(state, &mut page, alert, &envelope)
        }
        Err(err) => transport_failure(state, &mut page, "Task operation", err),
    }
}

/// Handles any click inside the task list. Delete calls the backend; the
/// edit controls only choose which task fills the task form.
pub async fn click_task_list(state: &AppState, click: &TaskListClick) -> Outcome {
    let id = click
        .task_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    match (click.control.as_str(), id) {
        (DELETE_TASK_CONTROL, Some(id)) => delete_task(state, id).await,
        (EDIT_TASK_CONTROL, Some(id)) => {
            if state.page.lock().await.start_editing(id) {
                Outcome::Applied
            } else {
                debug!(task_id = id, "edit control clicked for an unknown task");
                Outcome::Ignored
            }
        }
        (CANCEL_EDIT_CONTROL, _) => {
            state.page.lock().await.stop_editing();
            Outcome::Applied
        }
        (DELETE_TASK_CONTROL | EDIT_TASK_CONTROL, None) => {
            debug!(control = %click.control, "task control clicked without a task id");
            Outcome::Ignored
        }
        _ => Outcome::Ignored,
    }
}

async fn delete_task(state: &AppState, id: &str) -> Outcome {
    let Some(guard) = state.in_flight.try_begin(InFlight::TaskDelete(id.to_string())) else {
        debug!(task_id = id, "task delete already in flight");
        return Outcome::Ignored;
    };

    let result = state.backend.delete_task(id).await;
    drop(guard);

    let mut page = state.page.lock().await;
    match result {
        Ok(envelope) if envelope.success => {
            show_alert(state, &mut page, AlertKind::Success, "Task deleted successfully!");
            page.remove_task(id);
            Outcome::Succeeded
        }
        Ok(envelope) => {
            let alert = format!("Task deletion failed: {}", envelope.message_or_default());
            rejected(state, &mut page, alert, &envelope)
        }
        Err(err) => transport_failure(state, &mut page, "Task deletion", err),
    }
}

pub async fn load_tasks(state: &AppState) -> Outcome {
    let generation = state.page.lock().await.tasks.clock.issue();
    match state.backend.list_tasks().await {
        Ok(items) => {
            if !state.page.lock().await.apply_tasks(generation, items) {
                debug!(generation, "discarding superseded task list");
            }
            Outcome::Succeeded
        }
        Err(err) => {
            error!("Error fetching tasks: {err}");
            Outcome::Failed(err)
        }
    }
}

/// Replaces the reminder list with the backend's current collection.
pub async fn fetch_reminders(state: &AppState) -> Outcome {
    let generation = state.page.lock().await.reminders.clock.issue();
    match state.backend.list_reminders().await {
        Ok(items) => {
            if !state.page.lock().await.apply_reminders(generation, items) {
                debug!(generation, "discarding superseded reminder list");
            }
            Outcome::Succeeded
        }
        Err(err) => {
            error!("Error fetching reminders: {err}");
            Outcome::Failed(err)
        }
    }
}

/// Fetches whatever the dashboard is missing before it is rendered.
pub async fn load_page(state: &AppState) {
    let (tasks, reminders) = {
        let page = state.page.lock().await;
        if page.view != View::Dashboard {
            return;
        }
        (page.needs_task_load(), page.reminders.items.is_none())
    };

    if tasks {
        load_tasks(state).await;
    }
    if reminders {
        fetch_reminders(state).await;
    }
}

pub async fn add_reminder(state: &AppState, form: &ReminderForm) -> Outcome {
    let (reminder, guard) = {
        let mut page = state.page.lock().await;
        let reminder = match validation::reminder_request(form) {
            Ok(reminder) => reminder,
            Err(err) => return invalid(state, &mut page, err),
        };
        let Some(guard) = state.in_flight.try_begin(InFlight::ReminderAdd) else {
            debug!("reminder add already in flight");
            return Outcome::Ignored;
        };
        (reminder, guard)
    };

    let result = state.backend.add_reminder(&reminder).await;
    drop(guard);

    {
        let mut page = state.page.lock().await;
        match result {
            Ok(envelope) if envelope.success => {
                show_alert(state, &mut page, AlertKind::Success, "Reminder added successfully!");
                page.hide_reminder_form();
            }
            Ok(envelope) => {
                return rejected(state, &mut page, "Failed to add reminder.".into(), &envelope);
            }
            Err(err) => return transport_failure(state, &mut page, "Adding reminder", err),
        }
    }

    fetch_reminders(state).await;
    Outcome::Succeeded
}

/// First call marks the reminder for deletion; the confirmed call sends it.
pub async fn delete_reminder(state: &AppState, form: &ReminderDeleteForm) -> Outcome {
    let id = form.reminder_id.trim();
    if id.is_empty() {
        return Outcome::Ignored;
    }

    if !form.is_confirmed() {
        state.page.lock().await.request_reminder_delete(id);
        return Outcome::AwaitingConfirmation;
    }
    let Some(guard) = state.in_flight.try_begin(InFlight::ReminderDelete(id.to_string())) else {
        debug!(reminder_id = id, "reminder delete already in flight");
        return Outcome::Ignored;
    };

    let result = state.backend.delete_reminder(id).await;
    drop(guard);

    {
        let mut page = state.page.lock().await;
        page.cancel_reminder_delete();
        match result {
            Ok(envelope) if envelope.success => {
                show_alert(
                    state,
                    &mut page,
                    AlertKind::Success,
                    "Reminder deleted successfully!",
                );
            }
            Ok(envelope) => {
                return rejected(state, &mut page, "Failed to delete reminder.".into(), &envelope);
            }
            Err(err) => return transport_failure(state, &mut page, "Deleting reminder", err),
        }
    }

    fetch_reminders(state).await;
    Outcome::Succeeded
}

pub async fn cancel_reminder_delete(state: &AppState) {
    state.page.lock().await.cancel_reminder_delete();
}

pub async fn show_add_reminder_form(state: &AppState) {
    state.page.lock().await.show_reminder_form();
}

pub async fn hide_add_reminder_form(state: &AppState) {
    state.page.lock().await.hide_reminder_form();
}

/// Flips the theme and persists it. The page lock is held while writing so
/// concurrent toggles are stored in the order they were applied.
pub async fn toggle_theme(state: &AppState) -> Result<Theme, AppError> {
    let mut page = state.page.lock().await;
    let theme = page.theme.toggled();
    page.set_theme(theme);
    persist_preferences(&state.prefs_path, &Preferences { theme }).await?;
    info!(?theme, "theme changed");
    Ok(theme)
}

pub async fn switch_view(state: &AppState, view: View) {
    state.page.lock().await.navigate(view);
}
