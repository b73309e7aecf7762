//! Deterministic fallback synthesis
//!
//! One pure function per output kind, built only from the request fields.
//! These run whenever the backend fails or returns output that does not
//! parse, so the caller still gets a usable, fully-populated response.
//! No randomness and no clock reads: the same request always produces the
//! same fallback, byte for byte.

use crate::engine::profile::NormalizedProfile;
use crate::engine::prompt::APP_PAGES;
use crate::types::{
    AccessibilityFeature, AccommodationAdjustment, AdaptationSet, AdaptiveQuestion, Adjustments,
    Assessment, AssessmentQuestion, AssessmentRequest, AssessmentSet, ChatMessageRequest,
    ChatReply, ContentAdjustment, ContentRequest, EngagementPattern, ExtensionActivity,
    GeneratedContent, LearningPath, LearningTrend, LessonContent, LessonStep, Milestone,
    ModuleProgress, NextStep, PacingAdjustment, PathAccommodations, PathActivity, PathAssessment,
    PathModule, PathRequest, PersonalizedPath, ProgressAnalysis, ProgressRecommendation,
    ProgressReport, ProgressRequest, ProgressionCriteria, QuestionType, Recommendation,
    RemediationDecision, RemediationRequest, SimplifiedCurriculum, SimplifyRequest,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fallback learning content: one introductory step, one interactive
/// assessment question, accommodation lists keyed by category.
pub fn content(request: &ContentRequest) -> GeneratedContent {
    let profile = NormalizedProfile::from_profile(&request.special_needs);
    let step_adaptations = if profile.accommodations.is_empty() {
        strings(&["Extended time", "Simplified instructions", "Visual supports"])
    } else {
        profile.accommodations.clone()
    };

    GeneratedContent {
        content: LessonContent {
            title: format!("{} - {}", request.topic, request.age_group),
            description: format!(
                "Adaptive {} for {} with Down syndrome",
                request.content_type, request.age_group
            ),
            learning_objectives: vec![request.learning_objective.clone()],
            materials: strings(&["Digital device", "Interactive elements"]),
            steps: vec![LessonStep {
                step_number: 1,
                title: "Introduction".to_string(),
                instructions: format!(
                    "Welcome to learning about {}. This is designed for {} with special needs adaptations.",
                    request.topic, request.age_group
                ),
                visual_aids: Some(strings(&["Icons", "Images", "Visual schedules"])),
                audio_cues: Some(strings(&["Gentle sounds", "Voice prompts"])),
                interactions: Some(strings(&["Touch", "Voice", "Simple gestures"])),
                adaptations: Some(step_adaptations),
            }],
            assessment: Assessment {
                kind: "Interactive".to_string(),
                questions: vec![AssessmentQuestion {
                    question: format!(
                        "Can you show me what you learned about {}?",
                        request.topic
                    ),
                    kind: "interactive".to_string(),
                    options: None,
                    correct_answer: None,
                    hints: Some(strings(&["Use visual supports", "Take your time"])),
                    visual_support: Some("Clear visual aids available".to_string()),
                }],
                success_criteria: "Student demonstrates understanding through preferred method"
                    .to_string(),
            },
            adaptations: AdaptationSet {
                visual: strings(&[
                    "Large text",
                    "High contrast",
                    "Visual schedules",
                    "Picture symbols",
                ]),
                auditory: strings(&["Audio instructions", "Sound cues", "Repetition"]),
                physical: strings(&["Touch interface", "Simple gestures", "Large touch targets"]),
                cognitive: strings(&["Step-by-step", "Clear structure", "Consistent routines"]),
            },
        },
        accessibility_features: vec![
            AccessibilityFeature {
                feature: "Screen reader support".to_string(),
                implementation: "ARIA labels and comprehensive alt text".to_string(),
            },
            AccessibilityFeature {
                feature: "Keyboard navigation".to_string(),
                implementation: "Full keyboard accessibility with tab stops".to_string(),
            },
            AccessibilityFeature {
                feature: "High contrast mode".to_string(),
                implementation: "WCAG AAA compliant color schemes".to_string(),
            },
        ],
        extension_activities: vec![
            ExtensionActivity {
                title: "Practice Activity".to_string(),
                description: "Reinforce learning through hands-on practice".to_string(),
                difficulty: "Easy".to_string(),
            },
            ExtensionActivity {
                title: "Review Session".to_string(),
                description: "Go over key concepts with visual supports".to_string(),
                difficulty: "Easy".to_string(),
            },
        ],
    }
}

/// Fallback remediation decision.
///
/// When the backend cannot weigh in, explicit thresholds decide: a score
/// under 60, a sub-minute attempt scoring under 80, or low engagement all
/// trigger remediation.
pub fn remediation(request: &RemediationRequest) -> RemediationDecision {
    let perf = &request.performance_data;
    let low_score = perf.score < 60.0;
    let rushed = perf.score < 80.0 && perf.time_spent < 60.0;
    let low_engagement = perf.engagement_level.eq_ignore_ascii_case("low");

    if low_score || rushed || low_engagement {
        let reason = if low_score {
            format!(
                "Score of {} is below the mastery threshold of 60",
                perf.score
            )
        } else if rushed {
            format!(
                "Finished in {} seconds with a score of {}, which suggests rushing through the material",
                perf.time_spent, perf.score
            )
        } else {
            "Low engagement suggests the material needs a different approach".to_string()
        };
        RemediationDecision {
            remediation_required: true,
            remediation_lesson_id: Some(format!("{}-review", request.current_lesson_id)),
            reason: Some(reason),
        }
    } else {
        RemediationDecision {
            remediation_required: false,
            remediation_lesson_id: None,
            reason: Some(format!(
                "Score of {} with steady engagement shows the student is on track",
                perf.score
            )),
        }
    }
}

/// Fallback learning path: a single introductory module for the subject
pub fn path(request: &PathRequest) -> LearningPath {
    let profile = NormalizedProfile::from_profile(&request.special_needs);
    let adaptations = if profile.accommodations.is_empty() {
        strings(&["visual cues", "audio support", "extra time"])
    } else {
        profile.accommodations.clone()
    };

    LearningPath {
        personalized_path: PersonalizedPath {
            level: request.current_level.clone(),
            modules: vec![PathModule {
                title: format!("{} Basics", request.subject_area),
                description: format!("Introduction to {} concepts", request.subject_area),
                activities: vec![PathActivity {
                    kind: "interactive".to_string(),
                    instructions: format!(
                        "Welcome to your learning journey! Let's explore {} together.",
                        request.subject_area
                    ),
                    adaptations,
                    estimated_time: "15-20 minutes".to_string(),
                    interactions: strings(&["touch", "voice", "drag-drop"]),
                }],
                assessments: vec![PathAssessment {
                    kind: "formative".to_string(),
                    questions: strings(&["Basic comprehension check"]),
                    adaptive_hints: strings(&[
                        "Visual hints available",
                        "Step-by-step guidance",
                    ]),
                    success_criteria: "Student can complete with minimal assistance".to_string(),
                }],
            }],
            progression_criteria: ProgressionCriteria {
                completion_threshold: 80.0,
                mastery_indicators: strings(&["Independence", "Accuracy", "Engagement"]),
                next_steps: strings(&["Advance to next module", "Introduce new concepts"]),
            },
        },
        accommodations: PathAccommodations {
            visual: strings(&["Large text", "High contrast", "Visual schedules"]),
            auditory: strings(&["Audio instructions", "Sound cues", "Repetition"]),
            interactive: strings(&["Touch interface", "Simple gestures", "Voice commands"]),
            timing: strings(&["Extended time", "Pause options", "Break reminders"]),
        },
        recommendations: vec![Recommendation {
            category: "Learning Style".to_string(),
            suggestion: "Use multisensory approach".to_string(),
            rationale: "Enhances engagement and retention".to_string(),
        }],
    }
}

/// Fallback progress report with metrics computed from the submitted
/// history: completion ratio, mean assessment score, mean engagement.
///
/// The caller validates that the module list is non-empty.
pub fn progress(request: &ProgressRequest) -> ProgressReport {
    let modules = &request.learning_path;
    let total = modules.len() as f64;
    let completed = modules
        .iter()
        .filter(|m| m.completion_status.is_done())
        .count();
    let overall_progress = completed as f64 / total * 100.0;
    let mean_score = modules.iter().map(module_mean_score).sum::<f64>() / total;
    let mean_engagement = modules.iter().map(|m| m.engagement_level).sum::<f64>() / total;

    let mut strength_areas = strings(&["Engagement", "Participation"]);
    if mean_score >= 70.0 {
        strength_areas.insert(0, "Assessment performance".to_string());
    }

    ProgressReport {
        analysis: ProgressAnalysis {
            overall_progress,
            strength_areas,
            challenge_areas: strings(&["Some concepts need reinforcement"]),
            learning_trends: vec![LearningTrend {
                area: "Overall Progress".to_string(),
                trend: if overall_progress >= 50.0 {
                    "improving".to_string()
                } else {
                    "stable".to_string()
                },
                confidence: 0.8,
            }],
            engagement_patterns: vec![EngagementPattern {
                pattern: "Interactive activities".to_string(),
                frequency: mean_engagement / 100.0,
                impact: "positive".to_string(),
            }],
        },
        recommendations: vec![ProgressRecommendation {
            category: "Learning Support".to_string(),
            priority: "medium".to_string(),
            recommendation: "Increase visual supports".to_string(),
            rationale: "Enhances understanding".to_string(),
            implementation: "Add more visual cues to activities".to_string(),
        }],
        adjustments: Adjustments {
            accommodations: vec![AccommodationAdjustment {
                accommodation: "Extended time".to_string(),
                reason: "Processing needs".to_string(),
                implementation: "Add 50% more time for assessments".to_string(),
            }],
            pacing: PacingAdjustment {
                current: "Standard".to_string(),
                recommended: "Flexible".to_string(),
                adjustment: "Allow self-paced progression".to_string(),
            },
            content: Vec::<ContentAdjustment>::new(),
        },
        next_steps: vec![NextStep {
            action: "Continue with next module".to_string(),
            timeline: "Next week".to_string(),
            responsible: "Teacher".to_string(),
            resources: strings(&["Adaptive materials", "Assistive technology"]),
        }],
        celebration_milestones: vec![Milestone {
            milestone: "Completed first module".to_string(),
            achieved: completed >= 1,
            celebration: "Digital badge and praise".to_string(),
        }],
    }
}

fn module_mean_score(module: &ModuleProgress) -> f64 {
    if module.assessment_scores.is_empty() {
        0.0
    } else {
        module.assessment_scores.iter().sum::<f64>() / module.assessment_scores.len() as f64
    }
}

/// Fallback assessment set built around the curriculum's opening line
pub fn assessments(request: &AssessmentRequest) -> AssessmentSet {
    let topic = excerpt(&request.curriculum_content, 60);
    AssessmentSet {
        assessments: vec![
            AdaptiveQuestion {
                question_type: QuestionType::MultipleChoice,
                question_text: "Which of these did we just learn about?".to_string(),
                options: Some(vec![topic.clone(), "Something else".to_string()]),
                correct_answer: topic.clone(),
                explanation: format!("We practiced {} in this lesson.", topic),
            },
            AdaptiveQuestion {
                question_type: QuestionType::Audio,
                question_text: format!(
                    "Listen and say one thing you remember about {}.",
                    topic
                ),
                options: None,
                correct_answer: "Any remembered detail".to_string(),
                explanation: "Saying it out loud helps the memory stick.".to_string(),
            },
        ],
    }
}

/// Fallback simplification: a short plain-language framing of the input
pub fn curriculum(request: &SimplifyRequest) -> SimplifiedCurriculum {
    SimplifiedCurriculum {
        simplified_content: format!(
            "Let's learn together! Today we will explore: {}",
            excerpt(&request.curriculum_content, 160)
        ),
        child_friendly_description: "A simple version of this lesson, made just for you."
            .to_string(),
    }
}

/// Fallback chat reply: deterministic navigation match over the page table
pub fn chat(request: &ChatMessageRequest) -> ChatReply {
    match match_page(&request.message) {
        Some((path, name)) => ChatReply {
            response: format!("Sure, I can take you to the {} page.", name),
            navigation: Some(path.to_string()),
        },
        None => ChatReply {
            response: "I'm not sure how to help with that. Can you try asking in a different way?"
                .to_string(),
            navigation: None,
        },
    }
}

fn match_page(message: &str) -> Option<(&'static str, &'static str)> {
    let lowered = message.to_lowercase();
    APP_PAGES
        .iter()
        .find(|(path, name)| lowered.contains(&name.to_lowercase()) || lowered.contains(path))
        .copied()
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let first_line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .trim();
    first_line.chars().take(max_chars).collect()
}
