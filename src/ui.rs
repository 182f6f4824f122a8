use crate::actions::{CANCEL_EDIT_CONTROL, DELETE_TASK_CONTROL, EDIT_TASK_CONTROL};
use crate::alerts::Alert;
use crate::models::{Reminder, TaskItem};
use crate::page::{Page, View};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

pub const EMPTY_REMINDERS: &str = "No reminders. Add some to get started!";

pub fn render_page(page: &Page) -> String {
    let body = match page.view {
        View::Login => LOGIN_HTML.to_string(),
        View::Signup => SIGNUP_HTML.to_string(),
        View::Dashboard => render_dashboard(page),
    };

    PAGE_HTML
        .replace("{{THEME_CLASS}}", page.theme.root_class())
        .replace("{{ALERTS}}", &render_alerts(page.alerts.iter()))
        .replace("{{BODY}}", &body)
}

fn render_dashboard(page: &Page) -> String {
    let reminder_form_class = if page.reminders.form_visible {
        "reminder-form"
    } else {
        "reminder-form hidden"
    };

    DASHBOARD_HTML
        .replace("{{TASK_FORM}}", &render_task_form(page.editing_task()))
        .replace("{{TASK_ITEMS}}", &render_tasks(page.tasks.items.values()))
        .replace("{{REMINDER_FORM_CLASS}}", reminder_form_class)
        .replace(
            "{{REMINDER_ITEMS}}",
            &render_reminders(
                page.reminders.items.as_deref(),
                page.reminders.pending_delete.as_deref(),
            ),
        )
}

pub fn render_alerts<'a>(alerts: impl Iterator<Item = &'a Alert>) -> String {
    let mut out = String::new();
    for alert in alerts {
        let _ = writeln!(
            out,
            r#"<div class="alert {}" data-alert-id="{}">{}</div>"#,
            alert.kind.css_class(),
            alert.id,
            escape_html(&alert.message)
        );
    }
    out
}

/// The add form, or the edit form pre-filled from `editing`.
pub fn render_task_form(editing: Option<&TaskItem>) -> String {
    let Some(task) = editing else {
        return TASK_FORM_HTML
            .replace("{{TASK_ID}}", "")
            .replace("{{TASK_NAME}}", "")
            .replace("{{TASK_DESCRIPTION}}", "")
            .replace("{{DUE_DATE}}", "")
            .replace("{{SUBMIT_LABEL}}", "Add task")
            .replace("{{CANCEL_EDIT}}", "");
    };

    let cancel = format!(
        r#"      <form method="post" action="/ui/tasks/click">
        <input type="hidden" name="control" value="{CANCEL_EDIT_CONTROL}" />
        <button type="submit" class="{CANCEL_EDIT_CONTROL}">Cancel edit</button>
      </form>
"#
    );
    TASK_FORM_HTML
        .replace("{{TASK_ID}}", &escape_html(&task.id))
        .replace("{{TASK_NAME}}", &escape_html(&task.task_name))
        .replace("{{TASK_DESCRIPTION}}", &escape_html(&task.task_description))
        .replace("{{DUE_DATE}}", &escape_html(&input_due_date(&task.due_date)))
        .replace("{{SUBMIT_LABEL}}", "Update task")
        .replace("{{CANCEL_EDIT}}", &cancel)
}

pub fn render_tasks<'a>(tasks: impl Iterator<Item = &'a TaskItem>) -> String {
    let mut out = String::new();
    for task in tasks {
        let id = escape_html(&task.id);
        let _ = write!(
            out,
            r#"<li class="task-item" data-task-id="{id}">
  <div class="task-body">
    <h3>{name}</h3>
    <p>{description}</p>
    <p class="due">Due: {due}</p>
  </div>
  <form method="post" action="/ui/tasks/click">
    <input type="hidden" name="control" value="{edit}" />
    <input type="hidden" name="task_id" value="{id}" />
    <button type="submit" class="{edit}" data-task-id="{id}">Edit</button>
  </form>
  <form method="post" action="/ui/tasks/click">
    <input type="hidden" name="control" value="{delete}" />
    <input type="hidden" name="task_id" value="{id}" />
    <button type="submit" class="{delete}" data-task-id="{id}">Delete</button>
  </form>
</li>
"#,
            name = escape_html(&task.task_name),
            description = escape_html(&task.task_description),
            due = escape_html(&format_due_date(&task.due_date)),
            edit = EDIT_TASK_CONTROL,
            delete = DELETE_TASK_CONTROL,
        );
    }
    out
}

/// `None` means the first fetch has not completed yet.
pub fn render_reminders(reminders: Option<&[Reminder]>, pending_delete: Option<&str>) -> String {
    let Some(reminders) = reminders else {
        return r#"<li class="loading">Loading reminders…</li>"#.to_string();
    };
    if reminders.is_empty() {
        return format!(r#"<li class="placeholder">{EMPTY_REMINDERS}</li>"#);
    }

    let mut out = String::new();
    for reminder in reminders {
        let id = escape_html(&reminder.id);
        let control = if pending_delete == Some(reminder.id.as_str()) {
            format!(
                r#"<form method="post" action="/ui/reminders/delete" class="confirm">
    <span>Are you sure you want to delete this reminder?</span>
    <input type="hidden" name="reminder_id" value="{id}" />
    <input type="hidden" name="confirmed" value="true" />
    <button type="submit" class="delete-reminder">Delete</button>
  </form>
  <form method="post" action="/ui/reminders/cancel-delete">
    <button type="submit">Cancel</button>
  </form>"#
            )
        } else {
            format!(
                r#"<form method="post" action="/ui/reminders/delete">
    <input type="hidden" name="reminder_id" value="{id}" />
    <button type="submit" class="delete-reminder">Delete</button>
  </form>"#
            )
        };

        let _ = write!(
            out,
            r#"<li class="reminder-item" data-reminder-id="{id}">
  <div class="reminder-body">
    <h3>{title}</h3>
    <p>{description}</p>
    <p class="due">Due: {due}</p>
  </div>
  {control}
</li>
"#,
            title = escape_html(&reminder.title),
            description = escape_html(&reminder.description),
            due = escape_html(&format_due_date(&reminder.due_date)),
        );
    }
    out
}

/// Formats the timestamps the backend hands out; anything unrecognised is
/// shown as-is.
pub fn format_due_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return parsed.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Value for a `datetime-local` input; unrecognised dates are passed through.
fn input_due_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%dT%H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, pattern) {
            return parsed.format("%Y-%m-%dT%H:%M").to_string();
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.format("%Y-%m-%dT00:00").to_string();
    }
    raw.to_string()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            // Keeps user text from forming template placeholders.
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" class="{{THEME_CLASS}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Task Manager</title>
  <style>
    :root {
      --bg: #f7f7f5;
      --ink: #1f2328;
      --muted: #6b7280;
      --card: #ffffff;
      --accent: #2563eb;
      --danger: #dc2626;
    }

    html.dark {
      --bg: #111827;
      --ink: #f3f4f6;
      --muted: #9ca3af;
      --card: #1f2937;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, sans-serif;
      padding: 24px;
    }

    main {
      width: min(860px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    section {
      background: var(--card);
      border-radius: 12px;
      padding: 20px;
    }

    ul {
      list-style: none;
      padding: 0;
      margin: 0;
      display: grid;
      gap: 8px;
    }

    .task-item,
    .reminder-item {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      border: 1px solid rgba(0, 0, 0, 0.08);
      border-radius: 8px;
      padding: 12px;
    }

    .due,
    .placeholder,
    .loading {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .placeholder,
    .loading {
      text-align: center;
      padding: 16px;
    }

    .delete-task,
    .delete-reminder {
      color: var(--danger);
      background: none;
      border: none;
      cursor: pointer;
    }

    .hidden {
      display: none;
    }

    .alerts {
      position: fixed;
      top: 16px;
      right: 16px;
      display: grid;
      gap: 8px;
    }

    .alert {
      padding: 12px 16px;
      border-radius: 8px;
      color: white;
    }

    .alert-success {
      background: #16a34a;
    }

    .alert-error {
      background: var(--danger);
    }
  </style>
</head>
<body>
  <div class="alerts">
{{ALERTS}}  </div>
  <main>
    <header>
      <form method="post" action="/ui/theme/toggle">
        <button type="submit" id="theme-toggle">Toggle theme</button>
      </form>
    </header>
{{BODY}}
  </main>
</body>
</html>
"#;

const LOGIN_HTML: &str = r#"    <section>
      <h1>Login</h1>
      <form id="login-form" method="post" action="/ui/login">
        <input type="email" name="email" placeholder="Email" />
        <input type="password" name="password" placeholder="Password" />
        <button type="submit">Login</button>
      </form>
      <p><a href="/?view=signup">Create an account</a></p>
    </section>
"#;

const SIGNUP_HTML: &str = r#"    <section>
      <h1>Sign Up</h1>
      <form id="signup-form" method="post" action="/ui/signup">
        <input type="text" name="username" placeholder="Username" />
        <input type="email" name="email" placeholder="Email" />
        <input type="password" name="password" placeholder="Password" />
        <button type="submit">Sign Up</button>
      </form>
      <p><a href="/?view=login">Already registered? Log in</a></p>
    </section>
"#;

const TASK_FORM_HTML: &str = r#"      <form id="task-form" method="post" action="/ui/tasks">
        <input type="hidden" name="task_id" value="{{TASK_ID}}" />
        <input type="text" name="task_name" placeholder="Task name" value="{{TASK_NAME}}" />
        <textarea name="task_description" placeholder="Description">{{TASK_DESCRIPTION}}</textarea>
        <input type="datetime-local" name="due_date" value="{{DUE_DATE}}" />
        <button type="submit">{{SUBMIT_LABEL}}</button>
      </form>
{{CANCEL_EDIT}}"#;

const DASHBOARD_HTML: &str = r#"    <section>
      <h2>Tasks</h2>
{{TASK_FORM}}      <ul id="task-list">
{{TASK_ITEMS}}      </ul>
    </section>
    <section>
      <h2>Reminders</h2>
      <form method="post" action="/ui/reminders/form/show">
        <button type="submit">Add reminder</button>
      </form>
      <div id="add-reminder-form" class="{{REMINDER_FORM_CLASS}}">
        <form method="post" action="/ui/reminders/add">
          <input type="text" id="reminder-title" name="title" placeholder="Title" />
          <textarea id="reminder-description" name="description" placeholder="Description"></textarea>
          <input type="datetime-local" id="reminder-due-date" name="due_date" />
          <button type="submit">Save reminder</button>
        </form>
        <form method="post" action="/ui/reminders/form/hide">
          <button type="submit">Cancel</button>
        </form>
      </div>
      <form method="post" action="/ui/reminders/refresh">
        <button type="submit">Refresh</button>
      </form>
      <ul id="reminder-list">
{{REMINDER_ITEMS}}      </ul>
    </section>
"#;
