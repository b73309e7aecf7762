//! AptX Engine - Adaptive Content Decision Engine
//!
//! Decides what learning content or remediation to produce for a student
//! with Down syndrome, and guarantees a well-formed response even when the
//! generative backend fails:
//! - Profile normalization and deterministic prompt composition
//! - A single-call generation invoker over an OpenAI-compatible provider
//! - Parse-validate-or-fallback response resolution (total; never errors)
//! - Remediation decisions, adaptive learning paths, progress analysis,
//!   adaptive assessments, curriculum simplification, and assistant chat
//!
//! # Example
//!
//! ```ignore
//! use aptx_engine::config::Config;
//! use aptx_engine::engine::Engine;
//! use aptx_engine::types::{ContentRequest, ContentType, StudentProfile};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let engine = Engine::from_config(&config);
//!     let request = ContentRequest {
//!         topic: "Counting to 5".into(),
//!         age_group: "6-8 years".into(),
//!         content_type: ContentType::Lesson,
//!         learning_objective: "Count objects 1-5".into(),
//!         duration: "10 minutes".into(),
//!         special_needs: StudentProfile::default(),
//!     };
//!     let resolved = engine.generate_content(&request).await?;
//!     println!("{}", serde_json::to_string_pretty(&resolved.value)?);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod server;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use config::Config;
pub use engine::{Engine, EngineError, GenerationBackend, GenerationError, Origin, Resolved};
pub use store::{KeyValueStore, MemoryStore};
