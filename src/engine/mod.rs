//! Adaptive content decision engine
//!
//! The engine decides what learning content or remediation to produce for a
//! student and guarantees a well-formed response even when the generative
//! backend fails. Every flow is the same pipeline with different templates:
//! normalize the profile, compose a prompt, invoke the backend once, then
//! resolve the raw text into a typed output or a deterministic fallback.
//!
//! The engine holds no per-request state; concurrent calls are independent
//! and commutative. Abandoning a call just drops the in-flight request.

pub mod backend;
pub mod fallback;
pub mod profile;
pub mod prompt;
pub mod resolver;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::store::KeyValueStore;
use crate::types::{
    AssessmentRequest, AssessmentSet, ChatMessageRequest, ChatReply, ContentRequest,
    GeneratedContent, LearningPath, PathRequest, ProgressReport, ProgressRequest,
    RemediationDecision, RemediationRequest, SimplifiedCurriculum, SimplifyRequest,
};

pub use backend::{GenerationBackend, GenerationError, GenerationSettings, HttpBackend};
pub use profile::NormalizedProfile;
pub use resolver::{Origin, Resolved};

/// The only error callers of the engine can see. Backend failures and
/// malformed output are absorbed by the resolver, never surfaced.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Engine facade owning the backend handle and the optional path cache
#[derive(Clone)]
pub struct Engine {
    backend: Arc<dyn GenerationBackend>,
    cache: Option<Arc<dyn KeyValueStore>>,
    path_ttl: Duration,
}

impl Engine {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            cache: None,
            path_ttl: Duration::from_secs(3600),
        }
    }

    /// Cache generated learning paths in the given store. Only
    /// backend-produced paths are cached; fallbacks are cheap to resynthesize
    /// and would mask backend recovery.
    pub fn with_cache(mut self, cache: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.path_ttl = ttl;
        self
    }

    /// Build the production engine from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(HttpBackend::from_config(&config.generation)))
    }

    /// Generate learning content for a student
    pub async fn generate_content(
        &self,
        request: &ContentRequest,
    ) -> Result<Resolved<GeneratedContent>, EngineError> {
        request.validate()?;
        let profile = NormalizedProfile::from_profile(&request.special_needs);
        let prompt = prompt::content_prompt(request, &profile);
        let raw = self
            .backend
            .generate(&prompt, &GenerationSettings::CONTENT)
            .await;
        Ok(resolver::resolve(raw, || fallback::content(request)))
    }

    /// Decide whether a remediation lesson is needed
    pub async fn remediate(
        &self,
        request: &RemediationRequest,
    ) -> Result<Resolved<RemediationDecision>, EngineError> {
        request.validate()?;
        let prompt = prompt::remediation_prompt(request);
        let raw = self
            .backend
            .generate(&prompt, &GenerationSettings::REMEDIATION)
            .await;
        Ok(resolver::resolve(raw, || fallback::remediation(request)))
    }

    /// Generate a personalized learning path, consulting the cache first
    pub async fn adaptive_path(
        &self,
        request: &PathRequest,
    ) -> Result<Resolved<LearningPath>, EngineError> {
        request.validate()?;
        let cache_key = format!("path:{}:{}", request.student_id, request.subject_area);

        if let Some(cache) = &self.cache {
            if let Ok(Some(value)) = cache.get(&cache_key).await {
                if let Ok(path) = serde_json::from_value::<LearningPath>(value) {
                    debug!(key = %cache_key, "serving learning path from cache");
                    return Ok(Resolved::cached(path));
                }
            }
        }

        let profile = NormalizedProfile::from_profile(&request.special_needs);
        let prompt = prompt::path_prompt(request, &profile);
        let raw = self
            .backend
            .generate(&prompt, &GenerationSettings::LEARNING_PATH)
            .await;
        let resolved = resolver::resolve(raw, || fallback::path(request));

        if resolved.origin == Origin::Backend {
            if let Some(cache) = &self.cache {
                if let Ok(value) = serde_json::to_value(&resolved.value) {
                    let _ = cache.put(&cache_key, value, self.path_ttl).await;
                }
            }
        }
        Ok(resolved)
    }

    /// Analyze progress across a student's learning path
    pub async fn analyze_progress(
        &self,
        request: &ProgressRequest,
    ) -> Result<Resolved<ProgressReport>, EngineError> {
        request.validate()?;
        let profile = NormalizedProfile::from_profile(&request.special_needs);
        let prompt = prompt::progress_prompt(request, &profile);
        let raw = self
            .backend
            .generate(&prompt, &GenerationSettings::PROGRESS)
            .await;
        Ok(resolver::resolve(raw, || fallback::progress(request)))
    }

    /// Generate adaptive assessments from curriculum content
    pub async fn generate_assessments(
        &self,
        request: &AssessmentRequest,
    ) -> Result<Resolved<AssessmentSet>, EngineError> {
        request.validate()?;
        let prompt = prompt::assessments_prompt(request);
        let raw = self
            .backend
            .generate(&prompt, &GenerationSettings::ASSESSMENT)
            .await;
        Ok(resolver::resolve(raw, || fallback::assessments(request)))
    }

    /// Simplify curriculum content into child-friendly chunks
    pub async fn simplify_curriculum(
        &self,
        request: &SimplifyRequest,
    ) -> Result<Resolved<SimplifiedCurriculum>, EngineError> {
        request.validate()?;
        let prompt = prompt::curriculum_prompt(request);
        let raw = self
            .backend
            .generate(&prompt, &GenerationSettings::CURRICULUM)
            .await;
        Ok(resolver::resolve(raw, || fallback::curriculum(request)))
    }

    /// Answer an assistant chat message, optionally with a navigation path
    pub async fn chat(
        &self,
        request: &ChatMessageRequest,
    ) -> Result<Resolved<ChatReply>, EngineError> {
        request.validate()?;
        let prompt = prompt::chat_prompt(request);
        let raw = self
            .backend
            .generate(&prompt, &GenerationSettings::CHAT)
            .await;
        Ok(resolver::resolve(raw, || fallback::chat(request)))
    }
}
