//! Gist-backed state store.
//!
//! All durable state lives in one JSON object stored as a file of a GitHub Gist. The
//! monitor record and the ticket counter share the document; each merge rewrites only
//! its own keys and keeps everything else that is already stored.

use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serenity::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::{
    data::{MonitorStateStore, TicketCounterStore},
    error::{storage::StorageError, AppError},
    model::monitor::{MonitorConfig, MonitorConfigPatch},
};

const GIST_API_URL: &str = "https://api.github.com/gists/";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const TICKET_COUNT_KEY: &str = "ticket_count";

/// JSON object stored in the Gist file.
pub type Document = Map<String, Value>;

#[derive(Debug, Deserialize)]
struct GistResponse {
    #[serde(default)]
    files: HashMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct GistPatch<'a> {
    files: HashMap<&'a str, GistFileContent>,
}

#[derive(Debug, Serialize)]
struct GistFileContent {
    content: String,
}

/// State store keeping a single JSON document inside a GitHub Gist.
pub struct GistStateStore {
    http: reqwest::Client,
    url: String,
    token: String,
    filename: String,
    write_lock: Mutex<()>,
}

impl GistStateStore {
    /// Creates a store for file `filename` of Gist `gist_id`.
    ///
    /// # Arguments
    /// - `http` - Shared HTTP client, expected to carry a timeout and user agent
    /// - `gist_id` - Static Gist identifier
    /// - `token` - Bearer token with Gist scope
    /// - `filename` - Name of the JSON file inside the Gist
    pub fn new(http: reqwest::Client, gist_id: &str, token: String, filename: String) -> Self {
        Self::with_api_url(http, GIST_API_URL, gist_id, token, filename)
    }

    /// Like `new`, but against the Gist API rooted at `api_url` (ending in `/`).
    pub fn with_api_url(
        http: reqwest::Client,
        api_url: &str,
        gist_id: &str,
        token: String,
        filename: String,
    ) -> Self {
        Self {
            http,
            url: format!("{}{}", api_url, gist_id),
            token,
            filename,
            write_lock: Mutex::new(()),
        }
    }

    /// Fetches the stored document.
    ///
    /// A Gist without the file, or with an empty file, yields an empty document.
    ///
    /// # Returns
    /// - `Ok(Document)` - Current stored document
    /// - `Err(AppError::StorageErr(UnexpectedStatus))` - API answered with a non-success status
    /// - `Err(AppError::ReqwestErr)` - Network failure or timeout
    /// - `Err(AppError::JsonErr)` - File content is not valid JSON
    pub async fn fetch_document(&self) -> Result<Document, AppError> {
        let response = self
            .http
            .get(&self.url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::UnexpectedStatus {
                url: self.url.clone(),
                status: response.status().as_u16(),
            }
            .into());
        }

        let gist: GistResponse = response.json().await?;
        let content = gist
            .files
            .get(&self.filename)
            .and_then(|file| file.content.as_deref());

        match content {
            Some(content) => parse_document(content),
            None => Ok(Document::new()),
        }
    }

    /// Replaces the Gist file with `document`.
    pub async fn write_document(&self, document: &Document) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(document)?;
        let body = GistPatch {
            files: HashMap::from([(self.filename.as_str(), GistFileContent { content })]),
        };

        let response = self
            .http
            .patch(&self.url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::UnexpectedStatus {
                url: self.url.clone(),
                status: response.status().as_u16(),
            }
            .into());
        }

        Ok(())
    }

    async fn merge(&self, patch: &MonitorConfigPatch) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.fetch_document().await?;
        merge_monitor_patch(&mut document, patch, Utc::now())?;
        self.write_document(&document).await
    }

    async fn increment_ticket_count(&self) -> (u32, Result<(), AppError>) {
        let _guard = self.write_lock.lock().await;

        let mut document = match self.fetch_document().await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Failed to fetch ticket counter, restarting at 0: {}", e);
                return (1, Err(e));
            }
        };

        let next = bump_ticket_count(&mut document);
        let result = self.write_document(&document).await;
        (next, result)
    }
}

#[async_trait]
impl MonitorStateStore for GistStateStore {
    async fn load(&self) -> MonitorConfig {
        let document = match self.fetch_document().await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Failed to load monitor state from Gist, using defaults: {}", e);
                return MonitorConfig::default();
            }
        };

        match config_from_document(&document) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Stored monitor state is malformed, using defaults: {}", e);
                MonitorConfig::default()
            }
        }
    }

    async fn save(&self, patch: MonitorConfigPatch) -> bool {
        match self.merge(&patch).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to save monitor state to Gist: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl TicketCounterStore for GistStateStore {
    async fn next_ticket_number(&self) -> u32 {
        let (next, result) = self.increment_ticket_count().await;
        if let Err(e) = result {
            tracing::error!("Failed to persist ticket counter {}: {}", next, e);
        }
        next
    }
}

/// Parses Gist file content into a document; blank content is an empty document.
pub fn parse_document(content: &str) -> Result<Document, AppError> {
    if content.trim().is_empty() {
        return Ok(Document::new());
    }

    match serde_json::from_str::<Value>(content)? {
        Value::Object(document) => Ok(document),
        _ => Err(StorageError::NotAnObject.into()),
    }
}

/// Reads the monitor record out of a shared document, ignoring unrelated keys.
pub fn config_from_document(document: &Document) -> Result<MonitorConfig, AppError> {
    Ok(serde_json::from_value(Value::Object(document.clone()))?)
}

/// Merges `patch` into the monitor keys of `document`, leaving other keys untouched.
///
/// # Returns
/// - `Ok(MonitorConfig)` - The merged monitor record now held by `document`
/// - `Err(AppError::JsonErr)` - The existing monitor keys could not be decoded
pub fn merge_monitor_patch(
    document: &mut Document,
    patch: &MonitorConfigPatch,
    now: DateTime<Utc>,
) -> Result<MonitorConfig, AppError> {
    let mut config = config_from_document(document)?;
    patch.apply_to(&mut config, now);

    if let Value::Object(fields) = serde_json::to_value(&config)? {
        document.extend(fields);
    }

    Ok(config)
}

/// Increments `ticket_count` in `document` and returns the new value.
///
/// A missing or non-numeric count restarts from zero.
pub fn bump_ticket_count(document: &mut Document) -> u32 {
    let current = document
        .get(TICKET_COUNT_KEY)
        .and_then(Value::as_u64)
        .and_then(|count| u32::try_from(count).ok())
        .unwrap_or(0);
    let next = current.saturating_add(1);

    document.insert(TICKET_COUNT_KEY.to_string(), Value::from(next));
    next
}
