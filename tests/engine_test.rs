//! Engine-level tests over a scripted backend: the response resolver must be
//! total, fallbacks deterministic, and valid backend output untouched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use aptx_engine::engine::{
    Engine, EngineError, GenerationBackend, GenerationError, GenerationSettings, Origin,
};
use aptx_engine::store::MemoryStore;
use aptx_engine::types::{
    ChatMessageRequest, ContentRequest, ContentType, GeneratedContent, LearningPath, PathRequest,
    PerformanceSample, ProgressRequest, RemediationRequest, StudentProfile,
};

#[derive(Clone)]
enum Script {
    Reply(String),
    Unavailable,
}

struct ScriptedBackend {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(
        &self,
        _prompt: &str,
        _settings: &GenerationSettings,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Unavailable => {
                Err(GenerationError::Unavailable("connection refused".to_string()))
            }
        }
    }
}

fn engine_with(script: Script) -> Engine {
    Engine::new(Arc::new(ScriptedBackend::new(script)))
}

fn counting_request() -> ContentRequest {
    ContentRequest {
        topic: "Counting to 5".to_string(),
        age_group: "6-8 years".to_string(),
        content_type: ContentType::Lesson,
        learning_objective: "Count objects 1-5".to_string(),
        duration: "10 minutes".to_string(),
        special_needs: StudentProfile::default(),
    }
}

fn valid_content_json() -> serde_json::Value {
    json!({
        "content": {
            "title": "Counting Safari",
            "description": "Count animals on a safari adventure",
            "learningObjectives": ["Count objects 1-5"],
            "materials": ["Animal cards"],
            "steps": [{
                "stepNumber": 1,
                "title": "Meet the animals",
                "instructions": "Point to each animal and count out loud.",
                "visualAids": ["Animal pictures"]
            }],
            "assessment": {
                "type": "Interactive",
                "questions": [{
                    "question": "How many lions do you see?",
                    "type": "multiple-choice",
                    "options": ["2", "3"],
                    "correctAnswer": "3"
                }],
                "successCriteria": "Counts to 5 with support"
            },
            "adaptations": {
                "visual": ["Large pictures"],
                "auditory": ["Counting song"],
                "physical": ["Touch targets"],
                "cognitive": ["One animal at a time"]
            }
        },
        "accessibilityFeatures": [{
            "feature": "Audio narration",
            "implementation": "Every step is read aloud"
        }],
        "extensionActivities": [{
            "title": "Count at home",
            "description": "Count five toys with a grown-up",
            "difficulty": "Easy"
        }]
    })
}

#[tokio::test]
async fn failing_backend_yields_fallback_lesson() {
    let engine = engine_with(Script::Unavailable);
    let resolved = engine.generate_content(&counting_request()).await.unwrap();

    assert_eq!(resolved.origin, Origin::Fallback);
    assert_eq!(resolved.value.content.title, "Counting to 5 - 6-8 years");
    assert_eq!(resolved.value.content.steps.len(), 1);
    assert!(!resolved.value.content.assessment.questions.is_empty());
}

#[tokio::test]
async fn identical_requests_produce_identical_fallbacks() {
    let engine = engine_with(Script::Unavailable);
    let request = counting_request();
    let first = engine.generate_content(&request).await.unwrap();
    let second = engine.generate_content(&request).await.unwrap();
    assert_eq!(first.value, second.value);
}

#[tokio::test]
async fn valid_backend_output_passes_through_unchanged() {
    let payload = valid_content_json();
    let expected: GeneratedContent = serde_json::from_value(payload.clone()).unwrap();

    let engine = engine_with(Script::Reply(payload.to_string()));
    let resolved = engine.generate_content(&counting_request()).await.unwrap();

    assert_eq!(resolved.origin, Origin::Backend);
    assert_eq!(resolved.value, expected);
}

#[tokio::test]
async fn fenced_backend_output_passes_through() {
    let raw = format!("```json\n{}\n```", valid_content_json());
    let engine = engine_with(Script::Reply(raw));
    let resolved = engine.generate_content(&counting_request()).await.unwrap();
    assert_eq!(resolved.origin, Origin::Backend);
    assert_eq!(resolved.value.content.title, "Counting Safari");
}

#[tokio::test]
async fn garbage_backend_output_still_yields_valid_content() {
    for garbage in ["", "Sorry, I can't help with that.", "{\"content\": {}}"] {
        let engine = engine_with(Script::Reply(garbage.to_string()));
        let resolved = engine.generate_content(&counting_request()).await.unwrap();
        assert_eq!(resolved.origin, Origin::Fallback, "input: {:?}", garbage);
        assert!(!resolved.value.content.steps.is_empty());
        assert!(!resolved.value.content.assessment.questions.is_empty());
    }
}

#[tokio::test]
async fn invalid_content_request_is_rejected() {
    let engine = engine_with(Script::Unavailable);
    let mut request = counting_request();
    request.topic = String::new();
    let err = engine.generate_content(&request).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidRequest(_)));
}

fn low_performance() -> RemediationRequest {
    RemediationRequest {
        student_id: "student-1".to_string(),
        current_lesson_id: "lesson-7".to_string(),
        performance_data: PerformanceSample {
            score: 30.0,
            time_spent: 45.0,
            engagement_level: "low".to_string(),
        },
    }
}

#[tokio::test]
async fn remediation_decision_is_well_formed_when_backend_unavailable() {
    let engine = engine_with(Script::Unavailable);
    let resolved = engine.remediate(&low_performance()).await.unwrap();

    assert_eq!(resolved.origin, Origin::Fallback);
    assert!(resolved.value.remediation_required);
    assert!(resolved.value.remediation_lesson_id.is_some());
    assert!(resolved.value.reason.is_some());
}

#[tokio::test]
async fn remediation_passes_through_backend_decision() {
    let reply = json!({
        "remediationRequired": false,
        "reason": "Strong recall across all questions"
    });
    let engine = engine_with(Script::Reply(reply.to_string()));
    let resolved = engine.remediate(&low_performance()).await.unwrap();

    assert_eq!(resolved.origin, Origin::Backend);
    assert!(!resolved.value.remediation_required);
    assert_eq!(
        resolved.value.reason.as_deref(),
        Some("Strong recall across all questions")
    );
}

#[tokio::test]
async fn progress_analysis_requires_modules() {
    let engine = engine_with(Script::Unavailable);
    let request = ProgressRequest {
        student_id: "student-1".to_string(),
        learning_path: vec![],
        current_goals: vec![],
        special_needs: StudentProfile::default(),
    };
    let err = engine.analyze_progress(&request).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidRequest(_)));
}

#[tokio::test]
async fn chat_falls_back_to_deterministic_navigation() {
    let engine = engine_with(Script::Unavailable);
    let resolved = engine
        .chat(&ChatMessageRequest {
            message: "please open the Teacher Dashboard".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(resolved.origin, Origin::Fallback);
    assert_eq!(resolved.value.navigation.as_deref(), Some("/teacher"));
}

fn path_request() -> PathRequest {
    PathRequest {
        student_id: "student-1".to_string(),
        age_group: "6-8 years".to_string(),
        current_level: "beginner".to_string(),
        learning_goals: vec!["Count to 10".to_string()],
        special_needs: StudentProfile::default(),
        subject_area: "Mathematics".to_string(),
    }
}

fn valid_path_json() -> serde_json::Value {
    json!({
        "personalizedPath": {
            "level": "beginner",
            "modules": [{
                "title": "Numbers 1-5",
                "description": "First steps with numbers",
                "activities": [{
                    "type": "interactive",
                    "instructions": "Tap each number as you say it.",
                    "adaptations": ["extra time"],
                    "estimatedTime": "10 minutes",
                    "interactions": ["touch"]
                }],
                "assessments": [{
                    "type": "formative",
                    "questions": ["Show me three fingers"],
                    "adaptiveHints": ["Watch the video again"],
                    "successCriteria": "Counts to 5"
                }]
            }],
            "progressionCriteria": {
                "completionThreshold": 80,
                "masteryIndicators": ["Accuracy"],
                "nextSteps": ["Numbers 6-10"]
            }
        },
        "accommodations": {
            "visual": ["Large text"],
            "auditory": ["Audio cues"],
            "interactive": ["Touch"],
            "timing": ["Extended time"]
        },
        "recommendations": [{
            "category": "Pacing",
            "suggestion": "Short sessions",
            "rationale": "Matches attention span"
        }]
    })
}

#[tokio::test]
async fn backend_paths_are_cached() {
    let backend = Arc::new(ScriptedBackend::new(Script::Reply(
        valid_path_json().to_string(),
    )));
    let engine = Engine::new(backend.clone())
        .with_cache(Arc::new(MemoryStore::new()), Duration::from_secs(60));

    let first = engine.adaptive_path(&path_request()).await.unwrap();
    assert_eq!(first.origin, Origin::Backend);

    let second = engine.adaptive_path(&path_request()).await.unwrap();
    assert_eq!(second.origin, Origin::Cache);
    assert_eq!(second.value, first.value);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fallback_paths_are_not_cached() {
    let backend = Arc::new(ScriptedBackend::new(Script::Unavailable));
    let engine = Engine::new(backend.clone())
        .with_cache(Arc::new(MemoryStore::new()), Duration::from_secs(60));

    let first = engine.adaptive_path(&path_request()).await.unwrap();
    let second = engine.adaptive_path(&path_request()).await.unwrap();

    assert_eq!(first.origin, Origin::Fallback);
    assert_eq!(second.origin, Origin::Fallback);
    assert_eq!(first.value, second.value);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);

    let path: LearningPath = first.value;
    assert_eq!(path.personalized_path.level, "beginner");
    assert_eq!(path.personalized_path.modules[0].title, "Mathematics Basics");
}
