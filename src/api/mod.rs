//! REST client for the remote `users` resource.
//!
//! Every call reports failure as a [`RemoteError`]; transport errors,
//! non-success statuses and undecodable bodies are not distinguished.
use anyhow::{Context, anyhow};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Operation, RemoteError};
use crate::model::UserRecord;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Build a client for `base_url` (scheme and host, optionally a path prefix).
    ///
    /// # Errors
    /// Returns an error if the URL does not parse, is not http(s), or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid API URL: {base_url}"))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(anyhow!("unsupported scheme {other} in API URL {base_url}")),
        }
        if url.host().is_none() {
            return Err(anyhow!("no host specified in API URL {base_url}"));
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: u64) -> String {
        format!("{}/users/{id}", self.base_url)
    }

    /// `GET /users`
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, RemoteError> {
        let op = Operation::ListUsers;
        let url = self.users_url();
        debug!(%url, "fetching users");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::from_reqwest(op, e))?;
        let response = ensure_success(op, response)?;
        response
            .json::<Vec<UserRecord>>()
            .await
            .map_err(|e| RemoteError::from_reqwest(op, e))
    }

    /// `GET /users/{id}`. A 404 or a body without a usable record is `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: u64) -> Result<Option<UserRecord>, RemoteError> {
        let op = Operation::GetUser;
        let url = self.user_url(id);
        debug!(%url, "fetching user");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::from_reqwest(op, e))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(op, response)?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| RemoteError::from_reqwest(op, e))?;
        usable_record(body).map_err(|e| RemoteError::new(op, e.to_string()))
    }

    /// `POST /users` with the record (no id) as body; returns the created record.
    #[instrument(skip(self, record), fields(name = %record.name))]
    pub async fn create_user(&self, record: &UserRecord) -> Result<UserRecord, RemoteError> {
        let op = Operation::CreateUser;
        let url = self.users_url();
        let mut body = record.clone();
        body.id = None;
        debug!(%url, "creating user");
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::from_reqwest(op, e))?;
        let response = ensure_success(op, response)?;
        response
            .json::<UserRecord>()
            .await
            .map_err(|e| RemoteError::from_reqwest(op, e))
    }

    /// `PUT /users/{id}` with the complete record. The response body is ignored.
    #[instrument(skip(self, record), fields(id = ?record.id))]
    pub async fn update_user(&self, record: &UserRecord) -> Result<(), RemoteError> {
        let op = Operation::UpdateUser;
        let id = record
            .id
            .ok_or_else(|| RemoteError::new(op, "record has no id"))?;
        let url = self.user_url(id);
        debug!(%url, "updating user");
        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| RemoteError::from_reqwest(op, e))?;
        ensure_success(op, response).map(|_| ())
    }

    /// `DELETE /users/{id}`. The response body is ignored.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: u64) -> Result<(), RemoteError> {
        let op = Operation::DeleteUser;
        let url = self.user_url(id);
        debug!(%url, "deleting user");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| RemoteError::from_reqwest(op, e))?;
        ensure_success(op, response).map(|_| ())
    }
}

fn ensure_success(op: Operation, response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(RemoteError::new(op, format!("{} - {status}", response.url())))
    }
}

/// A record is usable when the body is an object carrying a non-null `id`.
fn usable_record(body: Value) -> Result<Option<UserRecord>, serde_json::Error> {
    match &body {
        Value::Object(map) if map.get("id").is_some_and(|v| !v.is_null()) => {
            serde_json::from_value(body).map(Some)
        }
        _ => Ok(None),
    }
}
