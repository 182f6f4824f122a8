#![allow(dead_code)]

//! In-process stand-in for the upstream task/reminder server.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use taskdesk_web::models::{Reminder, TaskItem};
use tokio::sync::Mutex;

pub const KNOWN_EMAIL: &str = "user@example.com";
pub const KNOWN_PASSWORD: &str = "secret";

#[derive(Debug, Default)]
pub struct Upstream {
    pub tasks: Vec<TaskItem>,
    pub reminders: Vec<Reminder>,
    pub requests: Vec<String>,
    pub bodies: Vec<Value>,
    next_id: u64,
}

impl Upstream {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

pub type SharedUpstream = Arc<Mutex<Upstream>>;

pub async fn spawn_upstream() -> (String, SharedUpstream) {
    let shared = SharedUpstream::default();
    let app = Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/tasks/add", post(add_task))
        .route("/tasks/edit/:id", post(edit_task))
        .route("/tasks/delete/:id", post(delete_task))
        .route("/api/tasks", get(list_tasks))
        .route("/reminders", get(list_reminders))
        .route("/reminders/add", post(add_reminder))
        .route("/reminders/delete/:id", post(delete_reminder))
        .with_state(Arc::clone(&shared));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind upstream");
    let addr = listener.local_addr().expect("upstream addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("upstream server");
    });

    (format!("http://{addr}"), shared)
}

async fn remember(state: &SharedUpstream, request: String, body: Option<Value>) {
    let mut upstream = state.lock().await;
    upstream.requests.push(request);
    if let Some(body) = body {
        upstream.bodies.push(body);
    }
}

async fn login(State(state): State<SharedUpstream>, Json(body): Json<Value>) -> Json<Value> {
    remember(&state, "POST /login".into(), Some(body.clone())).await;
    if body["email"] == KNOWN_EMAIL && body["password"] == KNOWN_PASSWORD {
        Json(json!({ "success": true }))
    } else {
        Json(json!({ "success": false, "message": "Invalid credentials" }))
    }
}

async fn signup(State(state): State<SharedUpstream>, Json(body): Json<Value>) -> Json<Value> {
    remember(&state, "POST /signup".into(), Some(body.clone())).await;
    if body["email"] == KNOWN_EMAIL {
        Json(json!({ "success": false, "message": "Email is already registered." }))
    } else {
        Json(json!({ "success": true }))
    }
}

async fn add_task(State(state): State<SharedUpstream>, Json(body): Json<Value>) -> Json<Value> {
    remember(&state, "POST /tasks/add".into(), Some(body.clone())).await;
    let mut upstream = state.lock().await;
    let id = upstream.next_id("t");
    upstream.tasks.push(TaskItem {
        id,
        task_name: body["task_name"].as_str().unwrap_or_default().to_string(),
        task_description: body["task_description"].as_str().unwrap_or_default().to_string(),
        due_date: body["due_date"].as_str().unwrap_or_default().to_string(),
    });
    Json(json!({ "success": true, "message": "Task added successfully" }))
}

async fn edit_task(
    State(state): State<SharedUpstream>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    remember(&state, format!("POST /tasks/edit/{id}"), Some(body.clone())).await;
    let mut upstream = state.lock().await;
    match upstream.tasks.iter_mut().find(|task| task.id == id) {
        Some(task) => {
            task.task_name = body["task_name"].as_str().unwrap_or_default().to_string();
            task.task_description = body["task_description"].as_str().unwrap_or_default().to_string();
            task.due_date = body["due_date"].as_str().unwrap_or_default().to_string();
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Task not found" })),
        ),
    }
}

async fn delete_task(
    State(state): State<SharedUpstream>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    remember(&state, format!("POST /tasks/delete/{id}"), None).await;
    let mut upstream = state.lock().await;
    let before = upstream.tasks.len();
    upstream.tasks.retain(|task| task.id != id);
    if upstream.tasks.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Task not found" })),
        );
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn list_tasks(State(state): State<SharedUpstream>) -> Json<Vec<TaskItem>> {
    remember(&state, "GET /api/tasks".into(), None).await;
    Json(state.lock().await.tasks.clone())
}

async fn list_reminders(State(state): State<SharedUpstream>) -> Json<Vec<Reminder>> {
    remember(&state, "GET /reminders".into(), None).await;
    Json(state.lock().await.reminders.clone())
}

async fn add_reminder(State(state): State<SharedUpstream>, Json(body): Json<Value>) -> Json<Value> {
    remember(&state, "POST /reminders/add".into(), Some(body.clone())).await;
    let mut upstream = state.lock().await;
    let id = upstream.next_id("r");
    upstream.reminders.push(Reminder {
        id: id.clone(),
        title: body["title"].as_str().unwrap_or_default().to_string(),
        description: body["description"].as_str().unwrap_or_default().to_string(),
        due_date: body["due_date"].as_str().unwrap_or_default().to_string(),
    });
    Json(json!({ "success": true, "reminder_id": id }))
}

async fn delete_reminder(
    State(state): State<SharedUpstream>,
    Path(id): Path<String>,
) -> Json<Value> {
    remember(&state, format!("POST /reminders/delete/{id}"), None).await;
    state.lock().await.reminders.retain(|reminder| reminder.id != id);
    Json(json!({ "success": true }))
}
