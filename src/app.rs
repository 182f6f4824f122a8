use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/page", get(handlers::page_snapshot))
        .route("/ui/login", post(handlers::login))
        .route("/ui/signup", post(handlers::signup))
        .route("/ui/tasks", post(handlers::save_task))
        .route("/ui/tasks/click", post(handlers::task_list_click))
        .route("/ui/reminders/add", post(handlers::add_reminder))
        .route("/ui/reminders/delete", post(handlers::delete_reminder))
        .route("/ui/reminders/cancel-delete", post(handlers::cancel_reminder_delete))
        .route("/ui/reminders/refresh", post(handlers::refresh_reminders))
        .route("/ui/reminders/form/show", post(handlers::show_reminder_form))
        .route("/ui/reminders/form/hide", post(handlers::hide_reminder_form))
        .route("/ui/theme/toggle", post(handlers::toggle_theme))
        .with_state(state)
}
