//! Append-log stores for signup records
//!
//! The recorder only ever appends to a list and bumps a counter, so a store
//! needs exactly those two Redis-shaped operations.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};

use crate::config::{SignupConfig, StoreKind};

/// Failures talking to a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store replied with an error: {0}")]
    Protocol(String),

    #[error("store misconfigured: {0}")]
    Config(String),
}

/// External append-only list + counter service
#[async_trait]
pub trait SignupStore: Send + Sync {
    /// Append a value to the list at `key`
    async fn rpush(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Increment the counter at `key`, returning the new value
    async fn incr(&self, key: &str) -> Result<i64, StoreError>;
}

/// Build the store selected by configuration. Relative paths resolve against `base_dir`.
pub fn from_config(config: &SignupConfig, base_dir: &Path) -> Result<Arc<dyn SignupStore>, StoreError> {
    match config.store {
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreKind::File => Ok(Arc::new(FileStore::new(base_dir.join(&config.file_dir)))),
        StoreKind::Upstash => {
            let url = config
                .upstash_url
                .clone()
                .ok_or_else(|| StoreError::Config("upstash_url is not set".to_string()))?;
            let token = config
                .upstash_token
                .clone()
                .ok_or_else(|| StoreError::Config("upstash_token is not set".to_string()))?;
            Ok(Arc::new(UpstashStore::new(url, token)?))
        }
    }
}

// ============================================================================
// In-memory store (tests, local development)
// ============================================================================

/// Lists and counters held in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    lists: RwLock<HashMap<String, Vec<String>>>,
    counters: RwLock<HashMap<String, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of a list
    pub async fn list(&self, key: &str) -> Vec<String> {
        self.lists.read().await.get(key).cloned().unwrap_or_default()
    }

    /// Current value of a counter
    pub async fn counter(&self, key: &str) -> i64 {
        self.counters.read().await.get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl SignupStore for MemoryStore {
    async fn rpush(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lists
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let mut counters = self.counters.write().await;
        let value = counters.entry(key.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}

// ============================================================================
// File store (single-host deployments)
// ============================================================================

/// One JSON-lines file per list and one text file per counter
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    // Serializes writers within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn list_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.jsonl", file_safe(key)))
    }

    pub fn counter_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.count", file_safe(key)))
    }
}

#[async_trait]
impl SignupStore for FileStore {
    async fn rpush(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if value.contains('\n') {
            return Err(StoreError::Protocol("list values must be single-line".to_string()));
        }

        let _guard = self.lock.lock().await;
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.list_path(key))
            .await?;
        file.write_all(format!("{}\n", value).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let _guard = self.lock.lock().await;
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.counter_path(key);
        let current = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text.trim().parse::<i64>().map_err(|e| {
                StoreError::Protocol(format!("corrupt counter {:?}: {}", path, e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };

        let next = current + 1;
        // Write-then-rename so a crash never leaves a half-written counter
        let tmp = path.with_extension("count.tmp");
        tokio::fs::write(&tmp, next.to_string()).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(next)
    }
}

/// Keys like `email_signups:site` become `email_signups_site`
fn file_safe(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

// ============================================================================
// Upstash Redis REST store (hosted deployments)
// ============================================================================

/// Redis over Upstash's REST API: each command is a JSON array POSTed to the base URL
pub struct UpstashStore {
    client: reqwest::Client,
    url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct UpstashReply {
    result: Option<serde_json::Value>,
    error: Option<String>,
}

impl UpstashStore {
    pub fn new(url: String, token: String) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn command(&self, args: &[&str]) -> Result<serde_json::Value, StoreError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;

        let status = response.status();
        let reply: UpstashReply = response.json().await?;

        if let Some(error) = reply.error {
            return Err(StoreError::Protocol(error));
        }
        if !status.is_success() {
            return Err(StoreError::Protocol(format!("HTTP {}", status)));
        }
        reply
            .result
            .ok_or_else(|| StoreError::Protocol("reply has no result".to_string()))
    }
}

#[async_trait]
impl SignupStore for UpstashStore {
    async fn rpush(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.command(&["RPUSH", key, value]).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        self.command(&["INCR", key])
            .await?
            .as_i64()
            .ok_or_else(|| StoreError::Protocol("INCR returned a non-integer".to_string()))
    }
}
