//! Best-effort audit records for generation calls.
//!
//! One JSON record per call, written under a logs directory keyed by
//! session id and timestamp. Auditing is not a correctness contract:
//! every IO failure is logged and swallowed so it can never affect the
//! generation result.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use cutline_models::{GenerationRequest, GenerationResult};

/// Environment variable naming the audit directory.
pub const AUDIT_DIR_ENV: &str = "CUTLINE_AUDIT_DIR";

/// One audit record, serialized as the file body.
#[derive(Debug, Serialize)]
pub struct AuditRecord<'a> {
    /// Record id.
    pub id: String,

    /// UTC time the record was written.
    pub created_at: chrono::DateTime<Utc>,

    /// The inbound request.
    pub request: &'a GenerationRequest,

    /// Raw collaborator output before normalization, when a call was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_composition: Option<&'a serde_json::Value>,

    /// The result handed to the caller (normalized composition, duration,
    /// model, error detail).
    pub result: &'a GenerationResult,
}

impl<'a> AuditRecord<'a> {
    pub fn new(
        request: &'a GenerationRequest,
        raw_composition: Option<&'a serde_json::Value>,
        result: &'a GenerationResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            request,
            raw_composition,
            result,
        }
    }
}

/// Best-effort audit log writer.
#[derive(Debug, Clone)]
pub struct AuditLog {
    dir: Option<PathBuf>,
}

impl AuditLog {
    /// Audit into the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// No-op audit log.
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    /// Audit into `CUTLINE_AUDIT_DIR` when set, otherwise disabled.
    pub fn from_env() -> Self {
        match std::env::var(AUDIT_DIR_ENV) {
            Ok(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::disabled(),
        }
    }

    /// Write one record. Failures are logged at warn and otherwise ignored.
    pub async fn record(&self, session_id: &str, record: &AuditRecord<'_>) {
        let Some(dir) = &self.dir else {
            return;
        };

        let session_dir = dir.join(sanitize_session_id(session_id));
        let filename = format!(
            "{}_{}.json",
            Utc::now().format("%Y%m%dT%H%M%S%3fZ"),
            record.id
        );
        let path = session_dir.join(filename);

        let body = match serde_json::to_vec_pretty(record) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to serialize audit record");
                return;
            }
        };

        if let Err(e) = tokio::fs::create_dir_all(&session_dir).await {
            warn!(error = %e, path = %session_dir.display(), "failed to create audit directory");
            return;
        }

        match tokio::fs::write(&path, body).await {
            Ok(()) => debug!(path = %path.display(), "wrote audit record"),
            Err(e) => warn!(error = %e, path = %path.display(), "failed to write audit record"),
        }
    }
}

/// Session ids come from clients; keep them filesystem-safe.
fn sanitize_session_id(session_id: &str) -> String {
    let cleaned: String = session_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "anonymous".to_string()
    } else {
        cleaned
    }
}
