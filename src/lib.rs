pub mod actions;
pub mod alerts;
pub mod app;
pub mod backend;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod inflight;
pub mod models;
pub mod page;
pub mod state;
pub mod storage;
pub mod ui;
pub mod validation;

pub use app::router;
pub use backend::{Backend, HttpBackend};
pub use config::Config;
pub use state::AppState;
pub use storage::{load_preferences, persist_preferences};
