//! Email signup recording
//!
//! A signup is validated, stamped with request details, appended to the
//! site's signup list and counted.

mod store;

pub use store::{from_config, FileStore, MemoryStore, SignupStore, StoreError, UpstashStore};

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::content::item::now_iso8601;

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex");
}

/// Why a signup was not recorded
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("Valid email address is required")]
    MissingEmail,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("failed to save signup: {0}")]
    Storage(#[from] StoreError),

    #[error("failed to encode signup: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SignupError {
    pub fn status(&self) -> StatusCode {
        match self {
            SignupError::MissingEmail | SignupError::InvalidEmail => StatusCode::BAD_REQUEST,
            SignupError::Storage(_) | SignupError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show the visitor
    pub fn public_message(&self) -> String {
        match self {
            SignupError::Storage(_) | SignupError::Encode(_) => {
                "Failed to save signup. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// One stored signup, serialized as the list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRecord {
    pub email: String,
    pub timestamp: String,
    #[serde(rename = "sourceIP")]
    pub source_ip: String,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
}

/// Where a signup request came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSource {
    pub ip: String,
    pub user_agent: String,
}

impl RequestSource {
    /// First `x-forwarded-for` hop, falling back to `x-real-ip`, then "unknown"
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let ip = header("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .or_else(|| header("x-real-ip"))
            .unwrap_or("unknown")
            .to_string();

        let user_agent = header("user-agent").unwrap_or("unknown").to_string();

        Self { ip, user_agent }
    }
}

/// Pull the `email` field out of a JSON request body
pub fn email_from_body(body: &[u8]) -> Result<String, SignupError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| SignupError::MissingEmail)?;
    match value.get("email").and_then(|v| v.as_str()) {
        Some(email) if !email.is_empty() => Ok(email.to_string()),
        _ => Err(SignupError::MissingEmail),
    }
}

/// Trim, check the shape and lowercase an address
pub fn normalize_email(raw: &str) -> Result<String, SignupError> {
    let trimmed = raw.trim();
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Err(SignupError::InvalidEmail);
    }
    Ok(trimmed.to_lowercase())
}

/// Appends signups to `email_signups:{site}` and counts them in `email_signups_count:{site}`
#[derive(Clone)]
pub struct SignupRecorder {
    store: Arc<dyn SignupStore>,
    site_id: String,
}

impl SignupRecorder {
    pub fn new(store: Arc<dyn SignupStore>, site_id: impl Into<String>) -> Self {
        Self {
            store,
            site_id: site_id.into(),
        }
    }

    pub fn list_key(&self) -> String {
        format!("email_signups:{}", self.site_id)
    }

    pub fn count_key(&self) -> String {
        format!("email_signups_count:{}", self.site_id)
    }

    /// Validate and store one signup. Nothing is written when validation fails.
    pub async fn record(&self, email: &str, source: &RequestSource) -> Result<SignupRecord, SignupError> {
        let email = normalize_email(email)?;

        let record = SignupRecord {
            email,
            timestamp: now_iso8601(),
            source_ip: source.ip.clone(),
            user_agent: source.user_agent.clone(),
        };
        let entry = serde_json::to_string(&record)?;

        self.store.rpush(&self.list_key(), &entry).await?;
        let total = self.store.incr(&self.count_key()).await?;

        tracing::info!(site = %self.site_id, total, "Recorded signup");
        Ok(record)
    }
}
