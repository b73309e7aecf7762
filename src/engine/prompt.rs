//! Prompt composition
//!
//! Every flow renders its instruction text here by plain string
//! interpolation over the request and the normalized profile. Composition
//! is deterministic: the same request always yields byte-identical prompt
//! text, which lets tests assert exact content. The generation backend has
//! no output-schema layer, so the expected JSON shape is spelled out inside
//! each template.

use crate::engine::profile::NormalizedProfile;
use crate::types::{
    AssessmentRequest, ChatMessageRequest, ContentRequest, PathRequest, ProgressRequest,
    RemediationRequest, SimplifyRequest,
};

/// Pages the assistant is allowed to suggest as navigation targets
pub const APP_PAGES: &[(&str, &str)] = &[
    ("/student", "Student Dashboard"),
    ("/student/lessons", "My Lessons"),
    ("/student/checkin", "Daily Check-in"),
    ("/student/community", "Student Community"),
    ("/teacher", "Teacher Dashboard"),
    ("/teacher/upload", "Upload Curriculum"),
    ("/teacher/community", "Teacher Community"),
    ("/guardian", "Guardian Dashboard"),
    ("/guardian/community", "Guardian Community"),
];

pub fn content_prompt(request: &ContentRequest, profile: &NormalizedProfile) -> String {
    format!(
        r#"Create {content_type} content for children with Down syndrome:

Content Details:
- Topic: {topic}
- Age Group: {age_group}
- Learning Objective: {objective}
- Duration: {duration}
- Special Needs: {profile}

Content Requirements:
1. Simple, clear language with short sentences
2. Concrete examples and real-world connections
3. Visual supports and scaffolding
4. Step-by-step instructions
5. Hands-on, interactive elements
6. Positive reinforcement throughout
7. Multiple ways to demonstrate understanding
8. Breaks and movement opportunities
9. Consistent structure and routines
10. Celebrate small successes

Generate comprehensive content with steps, assessments, adaptations, and accessibility features.
Respond with a single JSON object shaped as:
{{"content": {{"title": string, "description": string, "learningObjectives": [string], "materials": [string], "steps": [{{"stepNumber": number, "title": string, "instructions": string, "visualAids": [string], "audioCues": [string], "interactions": [string], "adaptations": [string]}}], "assessment": {{"type": string, "questions": [{{"question": string, "type": string, "options": [string], "correctAnswer": string, "hints": [string], "visualSupport": string}}], "successCriteria": string}}, "adaptations": {{"visual": [string], "auditory": [string], "physical": [string], "cognitive": [string]}}}}, "accessibilityFeatures": [{{"feature": string, "implementation": string}}], "extensionActivities": [{{"title": string, "description": string, "difficulty": string}}]}}"#,
        content_type = request.content_type,
        topic = request.topic,
        age_group = request.age_group,
        objective = request.learning_objective,
        duration = request.duration,
        profile = profile.to_prompt_json(),
    )
}

pub fn path_prompt(request: &PathRequest, profile: &NormalizedProfile) -> String {
    format!(
        r#"Create an adaptive learning path for a student with Down syndrome using the following profile:

Student Profile:
- Age Group: {age_group}
- Current Level: {level}
- Learning Goals: {goals}
- Special Needs: {profile}
- Subject Area: {subject}

Guidelines:
1. Create content appropriate for the cognitive level
2. Include multisensory approaches (visual, auditory, kinesthetic)
3. Provide clear, simple instructions
4. Break down complex concepts into smaller steps
5. Include repetition and reinforcement
6. Allow for different pacing
7. Include positive reinforcement and encouragement
8. Use concrete examples and real-world connections
9. Provide immediate feedback
10. Include assistive technology recommendations

Generate a comprehensive learning path with modules, activities, assessments, accommodations, and recommendations.
Respond with a single JSON object shaped as:
{{"personalizedPath": {{"level": string, "modules": [{{"title": string, "description": string, "activities": [{{"type": string, "instructions": string, "adaptations": [string], "estimatedTime": string, "interactions": [string]}}], "assessments": [{{"type": string, "questions": [string], "adaptiveHints": [string], "successCriteria": string}}]}}], "progressionCriteria": {{"completionThreshold": number, "masteryIndicators": [string], "nextSteps": [string]}}}}, "accommodations": {{"visual": [string], "auditory": [string], "interactive": [string], "timing": [string]}}, "recommendations": [{{"category": string, "suggestion": string, "rationale": string}}]}}"#,
        age_group = request.age_group,
        level = request.current_level,
        goals = request.learning_goals.join(", "),
        profile = profile.to_prompt_json(),
        subject = request.subject_area,
    )
}

pub fn progress_prompt(request: &ProgressRequest, profile: &NormalizedProfile) -> String {
    let modules = request
        .learning_path
        .iter()
        .map(|module| {
            format!(
                r#"  Module: {name}
  Status: {status}
  Time Spent: {time} minutes
  Scores: {scores}
  Engagement: {engagement}%
  Accommodations: {accommodations}
  Challenges: {challenges}
  Strengths: {strengths}"#,
                name = module.module_name,
                status = serde_json::to_string(&module.completion_status)
                    .unwrap_or_default()
                    .trim_matches('"'),
                time = module.time_spent,
                scores = join_scores(&module.assessment_scores),
                engagement = module.engagement_level,
                accommodations = module.accommodations_used.join(", "),
                challenges = join_optional(&module.challenges),
                strengths = join_optional(&module.strengths),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Analyze progress for a student with Down syndrome using the following data:

Student Profile:
- ID: {student}
- Special Needs: {profile}
- Current Goals: {goals}

Learning Progress:
{modules}

Analysis Requirements:
1. Identify patterns in learning and engagement
2. Recognize strengths and celebrate progress
3. Identify areas needing additional support
4. Recommend specific accommodations and adjustments
5. Suggest next steps for continued growth
6. Include celebration opportunities for milestones
7. Consider attention span and cognitive level
8. Account for preferred learning styles
9. Provide actionable recommendations
10. Include timeline and implementation guidance

Generate comprehensive progress analysis with recommendations and next steps.
Respond with a single JSON object shaped as:
{{"analysis": {{"overallProgress": number, "strengthAreas": [string], "challengeAreas": [string], "learningTrends": [{{"area": string, "trend": string, "confidence": number}}], "engagementPatterns": [{{"pattern": string, "frequency": number, "impact": string}}]}}, "recommendations": [{{"category": string, "priority": string, "recommendation": string, "rationale": string, "implementation": string}}], "adjustments": {{"accommodations": [{{"accommodation": string, "reason": string, "implementation": string}}], "pacing": {{"current": string, "recommended": string, "adjustment": string}}, "content": [{{"moduleId": string, "adjustment": string, "reason": string}}]}}, "nextSteps": [{{"action": string, "timeline": string, "responsible": string, "resources": [string]}}], "celebrationMilestones": [{{"milestone": string, "achieved": boolean, "celebration": string}}]}}"#,
        student = request.student_id,
        profile = profile.to_prompt_json(),
        goals = request.current_goals.join(", "),
        modules = modules,
    )
}

pub fn remediation_prompt(request: &RemediationRequest) -> String {
    format!(
        r#"Based on the student's performance data, determine if remediation is required.

Student ID: {student}
Current Lesson ID: {lesson}
Performance Data:
  Score: {score}
  Time Spent: {time}
  Engagement Level: {engagement}

Consider these factors when determining if remediation is needed:
- A low score indicates a lack of understanding.
- A short time spent with a low score suggests the student is rushing or disengaged.
- A low engagement level suggests the student is not interested or finding the material difficult.

If remediation is required, identify a suitable remediation lesson ID. Provide a clear reason for suggesting the remediation lesson.

Respond with a single JSON object shaped as:
{{"remediationRequired": boolean, "remediationLessonId": string, "reason": string}}"#,
        student = request.student_id,
        lesson = request.current_lesson_id,
        score = request.performance_data.score,
        time = request.performance_data.time_spent,
        engagement = request.performance_data.engagement_level,
    )
}

pub fn assessments_prompt(request: &AssessmentRequest) -> String {
    format!(
        r#"You are an expert in generating adaptive assessments for students with Down syndrome. Based on the curriculum content and the student's past performance, create a set of assessments that includes multiple-choice, image-based, and audio questions. Adapt the difficulty based on the student performance data provided.

Curriculum Content: {curriculum}
Student Performance: {performance}

Ensure the assessments are:
- Cognitively accessible (2-3 options for multiple-choice).
- Visually clear and simple.
- Auditory clear and simple.

Respond with a single JSON object shaped as:
{{"assessments": [{{"questionType": "multiple-choice" | "image-based" | "audio", "questionText": string, "options": [string], "correctAnswer": string, "explanation": string}}]}}"#,
        curriculum = request.curriculum_content,
        performance = request
            .student_performance
            .as_deref()
            .unwrap_or("not available"),
    )
}

pub fn curriculum_prompt(request: &SimplifyRequest) -> String {
    format!(
        r#"You are an expert educator specializing in simplifying complex curriculum content for students with Down syndrome.

You will receive curriculum content and simplify it into smaller, child-friendly chunks with appropriate descriptions.

Curriculum Content: {curriculum}

Respond with a single JSON object shaped as:
{{"simplifiedContent": string, "childFriendlyDescription": string}}"#,
        curriculum = request.curriculum_content,
    )
}

pub fn chat_prompt(request: &ChatMessageRequest) -> String {
    let pages = APP_PAGES
        .iter()
        .map(|(path, name)| format!("- {}: {}", path, name))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are AptX Ai, a friendly and empathetic AI assistant for AptX, an inclusive learning platform for students with Down syndrome.
Your primary role is to be helpful and encouraging. You understand the unique needs of your users and communicate with simple, clear, and positive language.

You can also help users navigate the application. If a user asks to go to a page, include its path in the "navigation" field.

Available pages:
{pages}

User message: {message}

Based on the user's message, provide a helpful text response. If they ask to navigate, also provide the navigation path. Your response should always include text, even if you suggest a navigation path.
Respond with a single JSON object shaped as:
{{"response": string, "navigation": string}}
Omit "navigation" when no page applies."#,
        pages = pages,
        message = request.message,
    )
}

fn join_scores(scores: &[f64]) -> String {
    scores
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_optional(values: &Option<Vec<String>>) -> String {
    match values {
        Some(v) if !v.is_empty() => v.join(", "),
        _ => "None identified".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentType, PerformanceSample, StudentProfile};

    fn sample_request() -> ContentRequest {
        ContentRequest {
            topic: "Counting to 5".to_string(),
            age_group: "6-8 years".to_string(),
            content_type: ContentType::Lesson,
            learning_objective: "Count objects 1-5".to_string(),
            duration: "10 minutes".to_string(),
            special_needs: StudentProfile::default(),
        }
    }

    #[test]
    fn content_prompt_is_byte_identical_across_calls() {
        let request = sample_request();
        let profile = NormalizedProfile::from_profile(&request.special_needs);
        let a = content_prompt(&request, &profile);
        let b = content_prompt(&request, &profile);
        assert_eq!(a, b);
    }

    #[test]
    fn content_prompt_embeds_request_fields() {
        let request = sample_request();
        let profile = NormalizedProfile::from_profile(&request.special_needs);
        let prompt = content_prompt(&request, &profile);
        assert!(prompt.contains("Create lesson content"));
        assert!(prompt.contains("- Topic: Counting to 5"));
        assert!(prompt.contains("- Age Group: 6-8 years"));
        assert!(prompt.contains("- Duration: 10 minutes"));
    }

    #[test]
    fn remediation_prompt_carries_performance_fields() {
        let request = RemediationRequest {
            student_id: "s-1".to_string(),
            current_lesson_id: "lesson-3".to_string(),
            performance_data: PerformanceSample {
                score: 30.0,
                time_spent: 45.0,
                engagement_level: "low".to_string(),
            },
        };
        let prompt = remediation_prompt(&request);
        assert!(prompt.contains("Score: 30"));
        assert!(prompt.contains("Time Spent: 45"));
        assert!(prompt.contains("Engagement Level: low"));
    }

    #[test]
    fn chat_prompt_lists_every_page() {
        let prompt = chat_prompt(&ChatMessageRequest {
            message: "take me to my lessons".to_string(),
        });
        for (path, _) in APP_PAGES {
            assert!(prompt.contains(path));
        }
    }
}
