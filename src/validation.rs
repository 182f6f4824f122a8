use crate::errors::GlueError;
use crate::models::{
    LoginForm, LoginRequest, NewReminder, ReminderForm, SignupForm, SignupRequest, TaskForm,
    TaskPayload,
};
use regex::Regex;
use std::sync::OnceLock;

pub const MISSING_FIELDS: &str = "Please fill out all fields.";
pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const MISSING_REMINDER_FIELDS: &str = "Title and due date are required.";

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Where a task submit is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskTarget {
    Add,
    Edit(String),
}

impl TaskTarget {
    /// Upstream path segments. The id is one opaque segment, encoded by the
    /// client when the URL is built.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            TaskTarget::Add => vec!["tasks", "add"],
            TaskTarget::Edit(id) => vec!["tasks", "edit", id.as_str()],
        }
    }
}

pub fn login_request(form: &LoginForm) -> Result<LoginRequest, GlueError> {
    let email = form.email.trim();
    let password = form.password.trim();
    if email.is_empty() || password.is_empty() {
        return Err(GlueError::validation(MISSING_FIELDS));
    }

    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn signup_request(form: &SignupForm) -> Result<SignupRequest, GlueError> {
    let username = form.username.trim();
    let email = form.email.trim();
    let password = form.password.trim();
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(GlueError::validation(MISSING_FIELDS));
    }
    if !is_valid_email(email) {
        return Err(GlueError::validation(INVALID_EMAIL));
    }

    Ok(SignupRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn task_request(form: &TaskForm) -> Result<(TaskTarget, TaskPayload), GlueError> {
    let task_name = form.task_name.trim();
    let due_date = form.due_date.trim();
    if task_name.is_empty() || due_date.is_empty() {
        return Err(GlueError::validation(MISSING_FIELDS));
    }

    let target = match form.task_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => TaskTarget::Edit(id.to_string()),
        _ => TaskTarget::Add,
    };

    Ok((
        target,
        TaskPayload {
            task_name: task_name.to_string(),
            task_description: form.task_description.trim().to_string(),
            due_date: due_date.to_string(),
        },
    ))
}

pub fn reminder_request(form: &ReminderForm) -> Result<NewReminder, GlueError> {
    let title = form.title.trim();
    let due_date = form.due_date.trim();
    if title.is_empty() || due_date.is_empty() {
        return Err(GlueError::validation(MISSING_REMINDER_FIELDS));
    }

    Ok(NewReminder {
        title: title.to_string(),
        description: form.description.trim().to_string(),
        due_date: due_date.to_string(),
    })
}
