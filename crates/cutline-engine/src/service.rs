//! The generation orchestrator.
//!
//! One call in, one collaborator call out: build prompt and schema, call
//! the structured generator, unwrap its output, normalize it, serialize.
//! Every failure path terminates here in a structurally valid
//! [`GenerationResult`] with `success: false`; no error ever escapes to
//! the caller.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info};

use cutline_models::{GenerationRequest, GenerationResult, ResultMetadata, Track};

use crate::audit::{AuditLog, AuditRecord};
use crate::collaborator::{ChatMessage, StructuredGenerator};
use crate::error::{EngineError, EngineResult};
use crate::normalize::{fix_aspect_ratios, resolve_overlaps, total_duration, FALLBACK_DURATION};
use crate::prompt::{build_prompts, PromptInputs};
use crate::schema::composition_response_schema;

const DEFAULT_TEMPERATURE: f64 = 0.7;

/// `composition_code` returned on failure: an empty, still-renderable
/// timeline. The exact text is a wire contract (clients diff it).
const EMPTY_COMPOSITION_CODE: &str = "[\n]";

const FAILURE_EXPLANATION: &str = "Failed to generate composition";

/// Orchestrates composition generation around one injected collaborator.
#[derive(Clone)]
pub struct CompositionService {
    generator: Arc<dyn StructuredGenerator>,
    audit: AuditLog,
}

impl CompositionService {
    /// Create a service with an explicit audit log.
    pub fn new(generator: Arc<dyn StructuredGenerator>, audit: AuditLog) -> Self {
        Self { generator, audit }
    }

    /// Create a service with auditing disabled.
    pub fn without_audit(generator: Arc<dyn StructuredGenerator>) -> Self {
        Self::new(generator, AuditLog::disabled())
    }

    /// Generate (or incrementally edit) a composition.
    ///
    /// Never returns an error and never panics; failures come back as a
    /// result with `success: false` and an empty timeline.
    pub async fn generate_composition(&self, request: GenerationRequest) -> GenerationResult {
        let (result, raw) = match self.try_generate(&request).await {
            Ok((result, raw)) => (result, Some(raw)),
            Err((e, raw)) => {
                error!(error = %e, "composition generation failed");
                (self.failure_result(&request, &e), raw)
            }
        };

        let session_id = request.session_id.as_deref().unwrap_or("anonymous");
        self.audit
            .record(session_id, &AuditRecord::new(&request, raw.as_ref(), &result))
            .await;

        result
    }

    /// Errors carry the raw collaborator output when the failure happened
    /// after a successful call, so audit records stay complete.
    async fn try_generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<(GenerationResult, Value), (EngineError, Option<Value>)> {
        if request.user_request.trim().is_empty() {
            return Err((EngineError::validation("user request is empty"), None));
        }

        // Building: prompt and schema are independent of each other.
        let (system_instruction, user_prompt) = build_prompts(&PromptInputs {
            user_request: &request.user_request,
            preview_settings: &request.preview_settings,
            media_library: request.media_library.as_deref(),
            current_composition: request.current_composition.as_deref(),
        });
        let schema = composition_response_schema();
        let messages = [
            ChatMessage::system(system_instruction),
            ChatMessage::user(user_prompt),
        ];

        // Calling: the sole suspension point of the pipeline.
        let response = self
            .generator
            .generate_structured(
                &messages,
                &schema,
                request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
                request.model_name.as_deref(),
            )
            .await
            .map_err(|e| (EngineError::from(e), None))?;
        let raw = response.value.clone();

        // Unwrapping: accept a bare track array or {"tracks": [...]}.
        let tracks_value =
            unwrap_tracks(response.value).map_err(|e| (e, Some(raw.clone())))?;
        let mut tracks: Vec<Track> = serde_json::from_value(tracks_value).map_err(|e| {
            (
                EngineError::shape(format!("track array does not match schema: {e}")),
                Some(raw.clone()),
            )
        })?;

        // Normalizing: fixed order for reproducibility.
        let shifts = resolve_overlaps(&mut tracks);
        let fixes = fix_aspect_ratios(&mut tracks);

        // Succeeded: always re-serialize, even when nothing changed, so
        // callers diff a consistently formatted string.
        let composition_code = serde_json::to_string_pretty(&tracks)
            .map_err(|e| (EngineError::Serialization(e), Some(raw.clone())))?;
        let duration = total_duration(&tracks);
        let clip_count: usize = tracks.iter().map(|t| t.clips.len()).sum();

        info!(
            model = %response.model,
            tracks = tracks.len(),
            clips = clip_count,
            shifts,
            fixes,
            duration,
            "generated composition"
        );

        let result = GenerationResult {
            success: true,
            composition_code,
            explanation: format!(
                "Generated a composition with {} track(s) and {} clip(s)",
                tracks.len(),
                clip_count
            ),
            duration,
            model_used: response.model,
            error_message: None,
            metadata: ResultMetadata {
                tracks_count: tracks.len(),
            },
        };
        Ok((result, raw))
    }

    fn failure_result(&self, request: &GenerationRequest, error: &EngineError) -> GenerationResult {
        GenerationResult {
            success: false,
            composition_code: EMPTY_COMPOSITION_CODE.to_string(),
            explanation: FAILURE_EXPLANATION.to_string(),
            duration: FALLBACK_DURATION,
            model_used: request
                .model_name
                .clone()
                .unwrap_or_else(|| "auto".to_string()),
            error_message: Some(error.to_string()),
            metadata: ResultMetadata { tracks_count: 0 },
        }
    }
}

/// The collaborator may return the track array bare or wrapped one level
/// inside `{"tracks": [...]}`. Anything else is a collaborator error.
fn unwrap_tracks(value: Value) -> EngineResult<Value> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => match map.remove("tracks") {
            Some(tracks @ Value::Array(_)) => Ok(tracks),
            Some(other) => Err(EngineError::shape(format!(
                "\"tracks\" is not an array (got {})",
                json_type_name(&other)
            ))),
            None => Err(EngineError::shape(
                "object response has no \"tracks\" key".to_string(),
            )),
        },
        other => Err(EngineError::shape(format!(
            "expected array or object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_bare_array() {
        let value = json!([{"clips": []}]);
        assert_eq!(unwrap_tracks(value.clone()).unwrap(), value);
    }

    #[test]
    fn test_unwrap_wrapped_object() {
        let tracks = json!([{"clips": []}]);
        let value = json!({"tracks": tracks});
        assert_eq!(unwrap_tracks(value).unwrap(), tracks);
    }

    #[test]
    fn test_unwrap_rejects_other_shapes() {
        assert!(unwrap_tracks(json!("nope")).is_err());
        assert!(unwrap_tracks(json!({"clips": []})).is_err());
        assert!(unwrap_tracks(json!({"tracks": 42})).is_err());
        assert!(unwrap_tracks(json!(null)).is_err());
    }
}
