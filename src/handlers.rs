use crate::actions;
use crate::errors::AppError;
use crate::models::{
    LoginForm, ReminderDeleteForm, ReminderForm, SignupForm, TaskForm, TaskListClick,
};
use crate::page::{Page, View};
use crate::state::AppState;
use crate::ui::render_page;
use axum::{
    Form, Json,
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub view: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AppError> {
    if let Some(raw) = query.view.as_deref() {
        let view = View::parse(raw)
            .ok_or_else(|| AppError::bad_request("view must be 'login', 'signup' or 'dashboard'"))?;
        actions::switch_view(&state, view).await;
    }

    actions::load_page(&state).await;
    let page = state.page.lock().await;
    Ok(Html(render_page(&page)))
}

pub async fn page_snapshot(State(state): State<AppState>) -> Json<Page> {
    let page = state.page.lock().await;
    Json(page.clone())
}

pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Redirect {
    actions::submit_login(&state, &form).await;
    back_to_page()
}

pub async fn signup(State(state): State<AppState>, Form(form): Form<SignupForm>) -> Redirect {
    actions::submit_signup(&state, &form).await;
    back_to_page()
}

pub async fn save_task(State(state): State<AppState>, Form(form): Form<TaskForm>) -> Redirect {
    actions::submit_task(&state, &form).await;
    back_to_page()
}

pub async fn task_list_click(
    State(state): State<AppState>,
    Form(click): Form<TaskListClick>,
) -> Redirect {
    actions::click_task_list(&state, &click).await;
    back_to_page()
}

pub async fn add_reminder(
    State(state): State<AppState>,
    Form(form): Form<ReminderForm>,
) -> Redirect {
    actions::add_reminder(&state, &form).await;
    back_to_page()
}

pub async fn delete_reminder(
    State(state): State<AppState>,
    Form(form): Form<ReminderDeleteForm>,
) -> Redirect {
    actions::delete_reminder(&state, &form).await;
    back_to_page()
}

pub async fn cancel_reminder_delete(State(state): State<AppState>) -> Redirect {
    actions::cancel_reminder_delete(&state).await;
    back_to_page()
}

pub async fn refresh_reminders(State(state): State<AppState>) -> Redirect {
    actions::fetch_reminders(&state).await;
    back_to_page()
}

pub async fn show_reminder_form(State(state): State<AppState>) -> Redirect {
    actions::show_add_reminder_form(&state).await;
    back_to_page()
}

pub async fn hide_reminder_form(State(state): State<AppState>) -> Redirect {
    actions::hide_add_reminder_form(&state).await;
    back_to_page()
}

pub async fn toggle_theme(State(state): State<AppState>) -> Result<Redirect, AppError> {
    actions::toggle_theme(&state).await?;
    Ok(back_to_page())
}

fn back_to_page() -> Redirect {
    Redirect::to("/")
}
