//! Shared domain types used across the engine, server, and CLI
//!
//! Every type here is constructed per request and discarded after the
//! response is returned; nothing owns cross-request state. Wire format is
//! camelCase JSON, matching the platform's existing API surface.

use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// Special-needs profile attached to a student. All fields are optional on
/// the wire; the profile normalizer supplies explicit defaults downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognitive_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention_span: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_learning_style: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensory_needs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodations: Option<Vec<String>>,
}

/// Kind of learning material to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Lesson,
    Activity,
    Game,
    Assessment,
    Video,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContentType::Lesson => "lesson",
            ContentType::Activity => "activity",
            ContentType::Game => "game",
            ContentType::Assessment => "assessment",
            ContentType::Video => "video",
        };
        write!(f, "{}", s)
    }
}

/// Request for generated learning material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRequest {
    pub topic: String,
    pub age_group: String,
    pub content_type: ContentType,
    pub learning_objective: String,
    pub duration: String,
    #[serde(default)]
    pub special_needs: StudentProfile,
}

impl ContentRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        require("topic", &self.topic)?;
        require("ageGroup", &self.age_group)?;
        require("learningObjective", &self.learning_objective)?;
        require("duration", &self.duration)?;
        Ok(())
    }
}

// ============ Generated content ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub content: LessonContent,
    pub accessibility_features: Vec<AccessibilityFeature>,
    pub extension_activities: Vec<ExtensionActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonContent {
    pub title: String,
    pub description: String,
    pub learning_objectives: Vec<String>,
    pub materials: Vec<String>,
    pub steps: Vec<LessonStep>,
    pub assessment: Assessment,
    pub adaptations: AdaptationSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonStep {
    pub step_number: u32,
    pub title: String,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_aids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_cues: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(rename = "type")]
    pub kind: String,
    pub questions: Vec<AssessmentQuestion>,
    pub success_criteria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_support: Option<String>,
}

/// Accommodation lists keyed by sensory/cognitive category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationSet {
    pub visual: Vec<String>,
    pub auditory: Vec<String>,
    pub physical: Vec<String>,
    pub cognitive: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityFeature {
    pub feature: String,
    pub implementation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionActivity {
    pub title: String,
    pub description: String,
    pub difficulty: String,
}

// ============ Remediation ============

/// Performance signals from a single lesson attempt. Input only; ephemeral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSample {
    pub score: f64,
    /// Seconds spent on the lesson
    pub time_spent: f64,
    /// Categorical: "high", "medium", "low"
    pub engagement_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationRequest {
    pub student_id: String,
    pub current_lesson_id: String,
    pub performance_data: PerformanceSample,
}

impl RemediationRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        require("studentId", &self.student_id)?;
        require("currentLessonId", &self.current_lesson_id)?;
        require("engagementLevel", &self.performance_data.engagement_level)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationDecision {
    pub remediation_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediation_lesson_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ============ Adaptive learning path ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
    pub student_id: String,
    pub age_group: String,
    pub current_level: String,
    #[serde(default)]
    pub learning_goals: Vec<String>,
    #[serde(default)]
    pub special_needs: StudentProfile,
    pub subject_area: String,
}

impl PathRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        require("studentId", &self.student_id)?;
        require("currentLevel", &self.current_level)?;
        require("subjectArea", &self.subject_area)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub personalized_path: PersonalizedPath,
    pub accommodations: PathAccommodations,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedPath {
    pub level: String,
    pub modules: Vec<PathModule>,
    pub progression_criteria: ProgressionCriteria,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathModule {
    pub title: String,
    pub description: String,
    pub activities: Vec<PathActivity>,
    pub assessments: Vec<PathAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub instructions: String,
    pub adaptations: Vec<String>,
    pub estimated_time: String,
    pub interactions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAssessment {
    #[serde(rename = "type")]
    pub kind: String,
    pub questions: Vec<String>,
    pub adaptive_hints: Vec<String>,
    pub success_criteria: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionCriteria {
    pub completion_threshold: f64,
    pub mastery_indicators: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathAccommodations {
    pub visual: Vec<String>,
    pub auditory: Vec<String>,
    pub interactive: Vec<String>,
    pub timing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: String,
    pub suggestion: String,
    pub rationale: String,
}

// ============ Progress analysis ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    #[serde(rename = "not-started")]
    NotStarted,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "mastered")]
    Mastered,
}

impl CompletionStatus {
    pub fn is_done(self) -> bool {
        matches!(self, CompletionStatus::Completed | CompletionStatus::Mastered)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    pub module_id: String,
    pub module_name: String,
    pub completion_status: CompletionStatus,
    /// Minutes spent in the module
    pub time_spent: f64,
    #[serde(default)]
    pub assessment_scores: Vec<f64>,
    /// Percentage, 0-100
    pub engagement_level: f64,
    #[serde(default)]
    pub accommodations_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    pub student_id: String,
    pub learning_path: Vec<ModuleProgress>,
    #[serde(default)]
    pub current_goals: Vec<String>,
    #[serde(default)]
    pub special_needs: StudentProfile,
}

impl ProgressRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        require("studentId", &self.student_id)?;
        if self.learning_path.is_empty() {
            return Err(EngineError::InvalidRequest(
                "learningPath must contain at least one module".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub analysis: ProgressAnalysis,
    pub recommendations: Vec<ProgressRecommendation>,
    pub adjustments: Adjustments,
    pub next_steps: Vec<NextStep>,
    pub celebration_milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAnalysis {
    pub overall_progress: f64,
    pub strength_areas: Vec<String>,
    pub challenge_areas: Vec<String>,
    pub learning_trends: Vec<LearningTrend>,
    pub engagement_patterns: Vec<EngagementPattern>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningTrend {
    pub area: String,
    /// "improving", "stable", or "declining"
    pub trend: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementPattern {
    pub pattern: String,
    pub frequency: f64,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecommendation {
    pub category: String,
    /// "high", "medium", or "low"
    pub priority: String,
    pub recommendation: String,
    pub rationale: String,
    pub implementation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustments {
    pub accommodations: Vec<AccommodationAdjustment>,
    pub pacing: PacingAdjustment,
    pub content: Vec<ContentAdjustment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationAdjustment {
    pub accommodation: String,
    pub reason: String,
    pub implementation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PacingAdjustment {
    pub current: String,
    pub recommended: String,
    pub adjustment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAdjustment {
    pub module_id: String,
    pub adjustment: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    pub action: String,
    pub timeline: String,
    pub responsible: String,
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub milestone: String,
    pub achieved: bool,
    pub celebration: String,
}

// ============ Adaptive assessments ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub curriculum_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_performance: Option<String>,
}

impl AssessmentRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        require("curriculumContent", &self.curriculum_content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "multiple-choice")]
    MultipleChoice,
    #[serde(rename = "image-based")]
    ImageBased,
    #[serde(rename = "audio")]
    Audio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveQuestion {
    pub question_type: QuestionType,
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSet {
    pub assessments: Vec<AdaptiveQuestion>,
}

// ============ Curriculum simplification ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyRequest {
    pub curriculum_content: String,
}

impl SimplifyRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        require("curriculumContent", &self.curriculum_content)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedCurriculum {
    pub simplified_content: String,
    pub child_friendly_description: String,
}

// ============ Assistant chat ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    pub message: String,
}

impl ChatMessageRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        require("message", &self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation: Option<String>,
}

// ============ Safety assessment ============

/// Thin request shape for safety check-ups; expanded into a full
/// [`ContentRequest`] before generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRequest {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
}

impl SafetyRequest {
    pub fn validate(&self) -> Result<(), EngineError> {
        require("topic", &self.topic)
    }

    /// Expand into the fixed assessment-type content request the safety
    /// check-up uses.
    pub fn into_content_request(self) -> ContentRequest {
        let age_group = self
            .age_group
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "All ages".to_string());
        ContentRequest {
            learning_objective: format!("Assess understanding of {} safety rules", self.topic),
            topic: self.topic,
            age_group,
            content_type: ContentType::Assessment,
            duration: "10 minutes".to_string(),
            special_needs: StudentProfile {
                cognitive_level: Some("moderate".to_string()),
                attention_span: Some("10-15 minutes".to_string()),
                preferred_learning_style: Some(vec![
                    "visual".to_string(),
                    "auditory".to_string(),
                ]),
                sensory_needs: Some(vec![
                    "visual_support".to_string(),
                    "simple_language".to_string(),
                    "clear_instructions".to_string(),
                ]),
                accommodations: None,
            },
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), EngineError> {
    if value.trim().is_empty() {
        Err(EngineError::InvalidRequest(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_request_rejects_blank_topic() {
        let req = ContentRequest {
            topic: "   ".to_string(),
            age_group: "6-8 years".to_string(),
            content_type: ContentType::Lesson,
            learning_objective: "Count objects 1-5".to_string(),
            duration: "10 minutes".to_string(),
            special_needs: StudentProfile::default(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn content_type_round_trips_lowercase() {
        let json = serde_json::to_string(&ContentType::Lesson).unwrap();
        assert_eq!(json, "\"lesson\"");
        let back: ContentType = serde_json::from_str("\"game\"").unwrap();
        assert_eq!(back, ContentType::Game);
    }

    #[test]
    fn safety_request_expands_to_assessment() {
        let req = SafetyRequest {
            topic: "Fire".to_string(),
            age_group: None,
        };
        let content = req.into_content_request();
        assert_eq!(content.content_type, ContentType::Assessment);
        assert_eq!(content.age_group, "All ages");
        assert_eq!(
            content.learning_objective,
            "Assess understanding of Fire safety rules"
        );
    }

    #[test]
    fn completion_status_uses_kebab_case() {
        let s: CompletionStatus = serde_json::from_str("\"not-started\"").unwrap();
        assert_eq!(s, CompletionStatus::NotStarted);
        assert!(CompletionStatus::Mastered.is_done());
        assert!(!CompletionStatus::InProgress.is_done());
    }
}
