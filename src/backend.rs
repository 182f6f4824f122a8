//! Client for the upstream task/reminder server.

use crate::errors::GlueError;
use crate::models::{
    Envelope, LoginRequest, NewReminder, Reminder, SignupRequest, TaskItem, TaskPayload,
};
use crate::validation::TaskTarget;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<Envelope, GlueError>;
    async fn signup(&self, request: &SignupRequest) -> Result<Envelope, GlueError>;
    async fn save_task(
        &self,
        target: &TaskTarget,
        payload: &TaskPayload,
    ) -> Result<Envelope, GlueError>;
    async fn delete_task(&self, id: &str) -> Result<Envelope, GlueError>;
    async fn list_tasks(&self) -> Result<Vec<TaskItem>, GlueError>;
    async fn list_reminders(&self) -> Result<Vec<Reminder>, GlueError>;
    async fn add_reminder(&self, reminder: &NewReminder) -> Result<Envelope, GlueError>;
    async fn delete_reminder(&self, id: &str) -> Result<Envelope, GlueError>;
}

pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, GlueError> {
        let client = Client::builder().cookie_store(true).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: impl AsRef<str>) -> Result<Self, GlueError> {
        let base_url = base_url.as_ref();
        let base = Url::parse(base_url).map_err(GlueError::request)?;
        if base.cannot_be_a_base() {
            return Err(GlueError::request(format!("{base_url} cannot be a base URL")));
        }
        Ok(Self { client, base })
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded,
    /// so ids containing `/`, `?` or `#` stay inside their own segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GlueError> {
        if let Some(dots) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(GlueError::request(format!("invalid path segment {dots:?}")));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| GlueError::request("base URL cannot take a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_json<B>(&self, segments: &[&str], body: &B) -> Result<Envelope, GlueError>
    where
        B: Serialize + Sync,
    {
        let url = self.endpoint(segments)?;
        debug!(path = url.path(), "POST");
        let response = self.client.post(url).json(body).send().await?;
        Ok(response.json().await?)
    }

    async fn post_empty(&self, segments: &[&str]) -> Result<Envelope, GlueError> {
        let url = self.endpoint(segments)?;
        debug!(path = url.path(), "POST");
        let response = self.client.post(url).send().await?;
        Ok(response.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, GlueError> {
        let url = self.endpoint(segments)?;
        debug!(path = url.path(), "GET");
        let response = self.client.get(url).send().await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<Envelope, GlueError> {
        self.post_json(&["login"], request).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<Envelope, GlueError> {
        self.post_json(&["signup"], request).await
    }

    async fn save_task(
        &self,
        target: &TaskTarget,
        payload: &TaskPayload,
    ) -> Result<Envelope, GlueError> {
        self.post_json(&target.segments(), payload).await
    }

    async fn delete_task(&self, id: &str) -> Result<Envelope, GlueError> {
        self.post_empty(&["tasks", "delete", id]).await
    }

    async fn list_tasks(&self) -> Result<Vec<TaskItem>, GlueError> {
        self.get_json(&["api", "tasks"]).await
    }

    async fn list_reminders(&self) -> Result<Vec<Reminder>, GlueError> {
        self.get_json(&["reminders"]).await
    }

    async fn add_reminder(&self, reminder: &NewReminder) -> Result<Envelope, GlueError> {
        self.post_json(&["reminders", "add"], reminder).await
    }

    async fn delete_reminder(&self, id: &str) -> Result<Envelope, GlueError> {
        self.post_empty(&["reminders", "delete", id]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_encoded_as_one_segment() {
        let backend = HttpBackend::new("http://127.0.0.1:5000/app/").unwrap();
        let url = backend.endpoint(&["tasks", "delete", "../../signup"]).unwrap();
        assert_eq!(url.path(), "/app/tasks/delete/..%2F..%2Fsignup");

        let url = backend.endpoint(&["reminders", "delete", "x?y=1#z"]).unwrap();
        assert_eq!(url.path(), "/app/reminders/delete/x%3Fy=1%23z");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn dot_segments_are_refused() {
        let backend = HttpBackend::new("http://127.0.0.1:5000").unwrap();
        assert!(matches!(
            backend.endpoint(&["tasks", "delete", ".."]),
            Err(GlueError::Request(_))
        ));
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        assert!(HttpBackend::new("not a url").is_err());
        assert!(HttpBackend::new("mailto:someone@example.com").is_err());
    }
}
