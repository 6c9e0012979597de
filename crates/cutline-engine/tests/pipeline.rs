//! End-to-end pipeline tests with scripted stub collaborators.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use cutline_engine::{
    AuditLog, ChatMessage, CompositionService, LlmError, LlmResult, StructuredGenerator,
    StructuredResponse,
};
use cutline_models::GenerationRequest;

/// Returns a canned value on every call.
struct ScriptedGenerator {
    value: Value,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    fn new(value: Value) -> Self {
        Self {
            value,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StructuredGenerator for ScriptedGenerator {
    async fn generate_structured(
        &self,
        _messages: &[ChatMessage],
        _schema: &Value,
        _temperature: f64,
        _model: Option<&str>,
    ) -> LlmResult<StructuredResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(StructuredResponse {
            value: self.value.clone(),
            model: "stub-model".to_string(),
        })
    }
}

/// Fails every call, flagging that it was reached.
struct FailingGenerator {
    called: AtomicBool,
}

impl FailingGenerator {
    fn new() -> Self {
        Self {
            called: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl StructuredGenerator for FailingGenerator {
    async fn generate_structured(
        &self,
        _messages: &[ChatMessage],
        _schema: &Value,
        _temperature: f64,
        _model: Option<&str>,
    ) -> LlmResult<StructuredResponse> {
        self.called.store(true, Ordering::SeqCst);
        Err(LlmError::Exhausted("stub always fails".to_string()))
    }
}

fn service(generator: Arc<dyn StructuredGenerator>) -> CompositionService {
    CompositionService::without_audit(generator)
}

fn overlapping_tracks() -> Value {
    json!([{
        "clips": [
            {
                "id": "a",
                "startTimeInSeconds": 0.0,
                "endTimeInSeconds": 5.0,
                "element": {"elements": ["Img;id:i1;parent:root;width:50%"]}
            },
            {
                "id": "b",
                "startTimeInSeconds": 3.0,
                "endTimeInSeconds": 8.0,
                "element": {"elements": ["div;id:d1;parent:root;width:50%"]}
            }
        ]
    }])
}

#[tokio::test]
async fn generation_normalizes_overlaps_and_aspect_ratios() {
    let generator = Arc::new(ScriptedGenerator::new(overlapping_tracks()));
    let svc = service(generator.clone());
    let result = svc
        .generate_composition(GenerationRequest::new("make an intro"))
        .await;

    // Exactly one outbound call per generation.
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert!(result.success);
    assert_eq!(result.model_used, "stub-model");
    assert_eq!(result.metadata.tracks_count, 1);
    assert_eq!(result.duration, 10.0);

    let tracks: Value = serde_json::from_str(&result.composition_code).unwrap();
    let clips = &tracks[0]["clips"];
    assert_eq!(clips[0]["startTimeInSeconds"], 0.0);
    assert_eq!(clips[0]["endTimeInSeconds"], 5.0);
    assert_eq!(clips[1]["startTimeInSeconds"], 5.0);
    assert_eq!(clips[1]["endTimeInSeconds"], 10.0);

    // Media element gained height:auto; the div stayed untouched.
    assert_eq!(
        clips[0]["element"]["elements"][0],
        "Img;id:i1;parent:root;width:50%;height:auto"
    );
    assert_eq!(
        clips[1]["element"]["elements"][0],
        "div;id:d1;parent:root;width:50%"
    );
}

#[tokio::test]
async fn wrapped_and_bare_responses_yield_identical_output() {
    let bare = service(Arc::new(ScriptedGenerator::new(overlapping_tracks())));
    let wrapped = service(Arc::new(ScriptedGenerator::new(
        json!({"tracks": overlapping_tracks()}),
    )));

    let a = bare
        .generate_composition(GenerationRequest::new("make an intro"))
        .await;
    let b = wrapped
        .generate_composition(GenerationRequest::new("make an intro"))
        .await;

    assert!(a.success && b.success);
    assert_eq!(a.composition_code, b.composition_code);
    assert_eq!(a.duration, b.duration);
}

#[tokio::test]
async fn failing_collaborator_yields_failure_result() {
    let svc = service(Arc::new(FailingGenerator::new()));
    let result = svc
        .generate_composition(GenerationRequest::new("make an intro"))
        .await;

    assert!(!result.success);
    assert_eq!(result.composition_code, "[\n]");
    assert_eq!(result.explanation, "Failed to generate composition");
    assert_eq!(result.duration, 5.0);
    assert!(result.error_message.is_some());
}

#[tokio::test]
async fn empty_request_fails_before_any_call() {
    let generator = Arc::new(FailingGenerator::new());
    let svc = service(generator.clone());
    let result = svc
        .generate_composition(GenerationRequest::new("   "))
        .await;

    assert!(!result.success);
    assert!(!generator.called.load(Ordering::SeqCst));
    assert!(result
        .error_message
        .as_deref()
        .unwrap()
        .contains("user request is empty"));
}

#[tokio::test]
async fn malformed_collaborator_shape_is_caught() {
    for value in [json!("text"), json!({"clips": []}), json!(7)] {
        let svc = service(Arc::new(ScriptedGenerator::new(value)));
        let result = svc
            .generate_composition(GenerationRequest::new("make an intro"))
            .await;
        assert!(!result.success);
        assert_eq!(result.composition_code, "[\n]");
    }
}

#[tokio::test]
async fn empty_track_array_succeeds_with_fallback_duration() {
    let svc = service(Arc::new(ScriptedGenerator::new(json!([]))));
    let result = svc
        .generate_composition(GenerationRequest::new("blank timeline"))
        .await;

    assert!(result.success);
    assert_eq!(result.duration, 5.0);
    assert_eq!(result.metadata.tracks_count, 0);
}

#[tokio::test]
async fn model_override_is_reported_on_failure() {
    let svc = service(Arc::new(FailingGenerator::new()));
    let mut request = GenerationRequest::new("make an intro");
    request.model_name = Some("gemini-2.5-pro".to_string());

    let result = svc.generate_composition(request).await;
    assert_eq!(result.model_used, "gemini-2.5-pro");
}

#[tokio::test]
async fn audit_failure_does_not_fail_generation() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let svc = CompositionService::new(
        Arc::new(ScriptedGenerator::new(overlapping_tracks())),
        AuditLog::new(file.path()),
    );

    let mut request = GenerationRequest::new("make an intro");
    request.session_id = Some("s1".to_string());
    let result = svc.generate_composition(request).await;
    assert!(result.success);
}

#[tokio::test]
async fn post_call_failure_audits_raw_output() {
    let dir = tempfile::tempdir().unwrap();
    // Wrong shape: an object without a "tracks" key fails after the call.
    let raw = json!({"clips": []});
    let svc = CompositionService::new(
        Arc::new(ScriptedGenerator::new(raw.clone())),
        AuditLog::new(dir.path()),
    );

    let mut request = GenerationRequest::new("make an intro");
    request.session_id = Some("shape-fail".to_string());
    let result = svc.generate_composition(request).await;
    assert!(!result.success);

    let session_dir = dir.path().join("shape-fail");
    let entry = std::fs::read_dir(&session_dir)
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    let body: Value =
        serde_json::from_str(&std::fs::read_to_string(entry.path()).unwrap()).unwrap();
    assert_eq!(body["raw_composition"], raw);
    assert_eq!(body["result"]["success"], false);
}

#[tokio::test]
async fn pre_call_failure_audits_without_raw_output() {
    let dir = tempfile::tempdir().unwrap();
    let svc = CompositionService::new(
        Arc::new(FailingGenerator::new()),
        AuditLog::new(dir.path()),
    );

    let mut request = GenerationRequest::new("make an intro");
    request.session_id = Some("call-fail".to_string());
    svc.generate_composition(request).await;

    let session_dir = dir.path().join("call-fail");
    let entry = std::fs::read_dir(&session_dir)
        .unwrap()
        .next()
        .unwrap()
        .unwrap();
    let body: Value =
        serde_json::from_str(&std::fs::read_to_string(entry.path()).unwrap()).unwrap();
    assert!(body.get("raw_composition").is_none());
}

#[tokio::test]
async fn audit_record_is_written_per_call() {
    let dir = tempfile::tempdir().unwrap();
    let svc = CompositionService::new(
        Arc::new(ScriptedGenerator::new(overlapping_tracks())),
        AuditLog::new(dir.path()),
    );

    let mut request = GenerationRequest::new("make an intro");
    request.session_id = Some("session-xyz".to_string());
    svc.generate_composition(request).await;

    let session_dir = dir.path().join("session-xyz");
    let entries: Vec<_> = std::fs::read_dir(&session_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
}
