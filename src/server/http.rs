//! HTTP handlers for the engine flows

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::engine::EngineError;
use crate::server::ServerState;
use crate::types::{
    AssessmentRequest, ChatMessageRequest, ContentRequest, PathRequest, ProgressRequest,
    RemediationRequest, SafetyRequest, SimplifyRequest,
};

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

fn bad_request(err: EngineError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

/// Content generation. Keeps the platform's `{success, data, error}`
/// envelope: a fallback payload is still a 200, flagged via `success`.
pub async fn generate_content_handler(
    State(state): State<ServerState>,
    Json(request): Json<ContentRequest>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    match state.engine.generate_content(&request).await {
        Ok(resolved) => {
            if resolved.is_fallback() {
                warn!(%request_id, topic = %request.topic, "serving fallback content");
                (
                    StatusCode::OK,
                    Json(json!({
                        "success": false,
                        "data": resolved.value,
                        "error": "Content generation failed, using fallback content",
                    })),
                )
                    .into_response()
            } else {
                (
                    StatusCode::OK,
                    Json(json!({ "success": true, "data": resolved.value })),
                )
                    .into_response()
            }
        }
        Err(err) => bad_request(err),
    }
}

pub async fn adaptive_path_handler(
    State(state): State<ServerState>,
    Json(request): Json<PathRequest>,
) -> impl IntoResponse {
    match state.engine.adaptive_path(&request).await {
        Ok(resolved) => Json(resolved.value).into_response(),
        Err(err) => bad_request(err),
    }
}

pub async fn progress_analysis_handler(
    State(state): State<ServerState>,
    Json(request): Json<ProgressRequest>,
) -> impl IntoResponse {
    match state.engine.analyze_progress(&request).await {
        Ok(resolved) => Json(resolved.value).into_response(),
        Err(err) => bad_request(err),
    }
}

pub async fn remediation_handler(
    State(state): State<ServerState>,
    Json(request): Json<RemediationRequest>,
) -> impl IntoResponse {
    match state.engine.remediate(&request).await {
        Ok(resolved) => Json(resolved.value).into_response(),
        Err(err) => bad_request(err),
    }
}

pub async fn assessments_handler(
    State(state): State<ServerState>,
    Json(request): Json<AssessmentRequest>,
) -> impl IntoResponse {
    match state.engine.generate_assessments(&request).await {
        Ok(resolved) => Json(resolved.value).into_response(),
        Err(err) => bad_request(err),
    }
}

pub async fn simplify_handler(
    State(state): State<ServerState>,
    Json(request): Json<SimplifyRequest>,
) -> impl IntoResponse {
    match state.engine.simplify_curriculum(&request).await {
        Ok(resolved) => Json(resolved.value).into_response(),
        Err(err) => bad_request(err),
    }
}

pub async fn chatbot_handler(
    State(state): State<ServerState>,
    Json(request): Json<ChatMessageRequest>,
) -> impl IntoResponse {
    match state.engine.chat(&request).await {
        Ok(resolved) => Json(resolved.value).into_response(),
        Err(err) => bad_request(err),
    }
}

/// Safety check-up: a fixed assessment-type content request built from the
/// topic, then the ordinary content pipeline.
pub async fn safety_assessment_handler(
    State(state): State<ServerState>,
    Json(request): Json<SafetyRequest>,
) -> impl IntoResponse {
    if let Err(err) = request.validate() {
        return bad_request(err);
    }
    let content_request = request.into_content_request();
    match state.engine.generate_content(&content_request).await {
        Ok(resolved) => Json(resolved.value).into_response(),
        Err(err) => bad_request(err),
    }
}

pub async fn status_handler(State(state): State<ServerState>) -> impl IntoResponse {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.config.generation.model.clone(),
        timestamp: Utc::now(),
    })
}
