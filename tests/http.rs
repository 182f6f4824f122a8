mod common;

use common::{KNOWN_EMAIL, KNOWN_PASSWORD, SharedUpstream, spawn_upstream};
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode, redirect::Policy};
use serde_json::Value;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

struct TestServer {
    base_url: String,
    prefs_path: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_file(&self.prefs_path);
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[cfg(unix)]
mod cleanup {
    use once_cell::sync::Lazy;
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Lazy<Mutex<Vec<u32>>> = Lazy::new(|| Mutex::new(Vec::new()));

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter() {
                unsafe {
                    libc::kill(*pid as i32, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_prefs_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("taskdesk_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("client")
}

async fn wait_until_ready(base_url: &str) {
    let client = client();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/page")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(backend_url: &str) -> TestServer {
    let port = pick_free_port();
    let prefs_path = unique_prefs_path();
    let child = Command::new(env!("CARGO_BIN_EXE_taskdesk_web"))
        .env("PORT", port.to_string())
        .env("BACKEND_URL", backend_url)
        .env("APP_PREFS_PATH", &prefs_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        prefs_path,
        child,
    }
}

async fn start() -> (TestServer, SharedUpstream) {
    let (upstream_url, upstream) = spawn_upstream().await;
    let server = spawn_server(&upstream_url).await;
    (server, upstream)
}

async fn post_form(server: &TestServer, path: &str, form: &[(&str, &str)]) {
    let response = client()
        .post(format!("{}{path}", server.base_url))
        .form(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some("/")
    );
}

async fn snapshot(server: &TestServer) -> Value {
    client()
        .get(format!("{}/api/page", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn index(server: &TestServer) -> String {
    client()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap()
}

async fn login(server: &TestServer) {
    post_form(
        server,
        "/ui/login",
        &[("email", KNOWN_EMAIL), ("password", KNOWN_PASSWORD)],
    )
    .await;
}

#[tokio::test]
async fn http_blank_login_shows_alert_without_upstream_call() {
    let _guard = TEST_LOCK.lock().await;
    let (server, upstream) = start().await;

    post_form(&server, "/ui/login", &[("email", ""), ("password", "pw")]).await;

    let html = index(&server).await;
    assert!(html.contains(r#"class="alert alert-error""#));
    assert!(html.contains("Please fill out all fields."));
    assert!(upstream.lock().await.requests.is_empty());
}

#[tokio::test]
async fn http_login_then_dashboard_loads_lists() {
    let _guard = TEST_LOCK.lock().await;
    let (server, upstream) = start().await;

    login(&server).await;
    assert_eq!(snapshot(&server).await["view"], "dashboard");

    let html = index(&server).await;
    assert!(html.contains(r#"id="task-list""#));
    assert!(html.contains("No reminders. Add some to get started!"));
    assert_eq!(
        upstream.lock().await.requests,
        vec![
            "POST /login".to_string(),
            "GET /api/tasks".to_string(),
            "GET /reminders".to_string(),
        ]
    );
}

#[tokio::test]
async fn http_task_add_then_delete_updates_list() {
    let _guard = TEST_LOCK.lock().await;
    let (server, upstream) = start().await;
    login(&server).await;

    for name in ["First", "Second"] {
        post_form(
            &server,
            "/ui/tasks",
            &[
                ("task_id", ""),
                ("task_name", name),
                ("task_description", ""),
                ("due_date", "2026-04-01T10:00"),
            ],
        )
        .await;
    }

    let html = index(&server).await;
    assert_eq!(html.matches(r#"class="task-item""#).count(), 2);

    let first_id = upstream.lock().await.tasks[0].id.clone();
    post_form(
        &server,
        "/ui/tasks/click",
        &[("control", "delete-task"), ("task_id", &first_id)],
    )
    .await;

    let page = snapshot(&server).await;
    let items = page["tasks"]["items"].as_object().unwrap();
    assert_eq!(items.len(), 1);
    assert!(!items.contains_key(&first_id));
}

#[tokio::test]
async fn http_edit_control_fills_form_and_saves_changes() {
    let _guard = TEST_LOCK.lock().await;
    let (server, upstream) = start().await;
    login(&server).await;

    post_form(
        &server,
        "/ui/tasks",
        &[
            ("task_id", ""),
            ("task_name", "Draft"),
            ("task_description", "first pass"),
            ("due_date", "2026-04-01T10:00"),
        ],
    )
    .await;
    index(&server).await;
    let id = upstream.lock().await.tasks[0].id.clone();

    post_form(
        &server,
        "/ui/tasks/click",
        &[("control", "edit-task"), ("task_id", &id)],
    )
    .await;
    let html = index(&server).await;
    assert!(html.contains(&format!(r#"<input type="hidden" name="task_id" value="{id}" />"#)));
    assert!(html.contains(r#"placeholder="Task name" value="Draft""#));
    assert!(html.contains(">first pass</textarea>"));
    assert!(html.contains(r#"name="due_date" value="2026-04-01T10:00""#));

    post_form(
        &server,
        "/ui/tasks",
        &[
            ("task_id", &id),
            ("task_name", "Final"),
            ("task_description", "second pass"),
            ("due_date", "2026-04-02T10:00"),
        ],
    )
    .await;

    let html = index(&server).await;
    assert!(html.contains("<h3>Final</h3>"));
    assert!(html.contains("Add task"));
    let upstream = upstream.lock().await;
    assert!(upstream.requests.contains(&format!("POST /tasks/edit/{id}")));
    assert_eq!(upstream.tasks.len(), 1);
}

#[tokio::test]
async fn http_reminder_add_and_confirmed_delete() {
    let _guard = TEST_LOCK.lock().await;
    let (server, upstream) = start().await;
    login(&server).await;
    index(&server).await;

    post_form(&server, "/ui/reminders/form/show", &[]).await;
    assert_eq!(snapshot(&server).await["reminders"]["form_visible"], true);

    post_form(
        &server,
        "/ui/reminders/add",
        &[
            ("title", "<b>Dentist</b>"),
            ("description", "checkup"),
            ("due_date", "2026-05-02T09:00"),
        ],
    )
    .await;

    let html = index(&server).await;
    assert!(html.contains("&lt;b&gt;Dentist&lt;/b&gt;"));
    assert!(html.contains("Reminder added successfully!"));
    assert_eq!(snapshot(&server).await["reminders"]["form_visible"], false);

    let id = upstream.lock().await.reminders[0].id.clone();
    post_form(&server, "/ui/reminders/delete", &[("reminder_id", &id)]).await;
    assert!(index(&server).await.contains("Are you sure you want to delete this reminder?"));
    assert_eq!(upstream.lock().await.reminders.len(), 1);

    post_form(
        &server,
        "/ui/reminders/delete",
        &[("reminder_id", &id), ("confirmed", "true")],
    )
    .await;
    assert!(upstream.lock().await.reminders.is_empty());
    assert!(index(&server).await.contains("No reminders. Add some to get started!"));
}

#[tokio::test]
async fn http_theme_toggle_persists() {
    let _guard = TEST_LOCK.lock().await;
    let (server, _upstream) = start().await;

    post_form(&server, "/ui/theme/toggle", &[]).await;
    assert!(index(&server).await.contains(r#"<html lang="en" class="dark">"#));
    let stored = std::fs::read_to_string(&server.prefs_path).unwrap();
    assert!(stored.contains("dark"));

    post_form(&server, "/ui/theme/toggle", &[]).await;
    let stored = std::fs::read_to_string(&server.prefs_path).unwrap();
    assert!(stored.contains("light"));
}

#[tokio::test]
async fn http_unknown_view_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let (server, _upstream) = start().await;

    let response = client()
        .get(format!("{}/?view=admin", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
