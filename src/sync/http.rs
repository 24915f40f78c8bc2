//! HTTP store implementation
//!
//! Talks to the timetable persistence service and the faculty directory
//! service over REST. Every call carries the bearer credential supplied by
//! the host's session store; an absent credential fails fast with
//! [`SyncError::MissingCredential`] before any I/O.

use async_trait::async_trait;
use serde_json::Value;

use super::documents::TimetableDocument;
use super::error::{SyncError, SyncResult};
use super::store::TimetableStore;

/// Reqwest-backed [`TimetableStore`]
pub struct HttpTimetableStore {
    base_url: String,
    credential: Option<String>,
    client: reqwest::Client,
}

impl HttpTimetableStore {
    /// Build a store against a service base URL. The credential comes from
    /// the host's session store and may be absent; calls will then fail with
    /// `MissingCredential` until [`set_credential`](Self::set_credential)
    /// provides one.
    pub fn new(base_url: impl Into<String>, credential: Option<String>) -> SyncResult<Self> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(std::time::Duration::from_secs(20));
        let client = builder
            .build()
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
            client,
        })
    }

    /// Replace the bearer credential (e.g. after the host re-authenticates)
    pub fn set_credential(&mut self, credential: Option<String>) {
        self.credential = credential;
    }

    fn token(&self) -> SyncResult<&str> {
        self.credential
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(SyncError::MissingCredential)
    }

    fn timetables_url(&self) -> String {
        format!("{}/timetables", self.base_url)
    }
}

#[async_trait]
impl TimetableStore for HttpTimetableStore {
    async fn fetch(
        &self,
        owner: &str,
        department: &str,
    ) -> SyncResult<Option<TimetableDocument>> {
        let token = self.token()?;
        let response = self
            .client
            .get(self.timetables_url())
            .query(&[("owner", owner), ("department", department)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(unexpected(status, body));
        }
        // Some deployments answer 200 with an empty body instead of 404
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        let document = serde_json::from_str(&body).map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(Some(document))
    }

    async fn create(&self, document: &TimetableDocument) -> SyncResult<TimetableDocument> {
        let token = self.token()?;
        log::debug!("creating timetable for {}", document.department);
        let response = self
            .client
            .post(self.timetables_url())
            .bearer_auth(token)
            .json(document)
            .send()
            .await
            .map_err(transport)?;
        read_document(response).await
    }

    async fn update(
        &self,
        id: &str,
        document: &TimetableDocument,
    ) -> SyncResult<TimetableDocument> {
        let token = self.token()?;
        log::debug!("updating timetable {}", id);
        let response = self
            .client
            .put(format!("{}/{}", self.timetables_url(), id))
            .bearer_auth(token)
            .json(document)
            .send()
            .await
            .map_err(transport)?;
        read_document(response).await
    }

    async fn faculty_directory(&self, department: &str) -> SyncResult<Vec<String>> {
        let token = self.token()?;
        let response = self
            .client
            .get(format!("{}/faculty", self.base_url))
            .query(&[("department", department)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(unexpected(status, body));
        }
        Ok(parse_faculty_names(&body))
    }
}

async fn read_document(response: reqwest::Response) -> SyncResult<TimetableDocument> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    if !status.is_success() {
        return Err(unexpected(status, body));
    }
    serde_json::from_str(&body).map_err(|e| SyncError::Decode(e.to_string()))
}

fn transport(err: reqwest::Error) -> SyncError {
    SyncError::Transport(err.to_string())
}

fn unexpected(status: reqwest::StatusCode, body: String) -> SyncError {
    SyncError::UnexpectedStatus {
        status: status.as_u16(),
        detail: body.trim().to_string(),
    }
}

/// Pull faculty names out of whatever shape the directory service answers
/// with: a bare name array, or objects carrying a `name` field. Anything
/// else degrades to an empty roster rather than an error.
fn parse_faculty_names(body: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        log::warn!("faculty directory answered with non-JSON body");
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        log::warn!("faculty directory answered with a non-array body");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(name.clone()),
            Value::Object(fields) => fields
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .collect()
}
