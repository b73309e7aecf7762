//! Student profile normalization
//!
//! Prompts and fallback templates downstream assume every profile field has
//! a defined value. The normalizer turns a possibly-partial wire profile
//! into that shape; it never fails.

use serde::Serialize;

use crate::types::StudentProfile;

/// Marker used for scalar fields the caller left out
pub const UNSPECIFIED: &str = "unspecified";

/// A [`StudentProfile`] with every field resolved to a concrete value.
///
/// Serialization order is the declaration order, so the pretty-JSON block
/// embedded in prompts is stable across calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProfile {
    pub cognitive_level: String,
    pub attention_span: String,
    pub preferred_learning_style: Vec<String>,
    pub sensory_needs: Vec<String>,
    pub accommodations: Vec<String>,
}

impl NormalizedProfile {
    pub fn from_profile(profile: &StudentProfile) -> Self {
        Self {
            cognitive_level: scalar(&profile.cognitive_level),
            attention_span: scalar(&profile.attention_span),
            preferred_learning_style: list(&profile.preferred_learning_style),
            sensory_needs: list(&profile.sensory_needs),
            accommodations: list(&profile.accommodations),
        }
    }

    /// Pretty-printed JSON block for prompt embedding
    pub fn to_prompt_json(&self) -> String {
        // Serialization of a plain struct with string/vec fields cannot fail
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl From<&StudentProfile> for NormalizedProfile {
    fn from(profile: &StudentProfile) -> Self {
        Self::from_profile(profile)
    }
}

fn scalar(field: &Option<String>) -> String {
    match field {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => UNSPECIFIED.to_string(),
    }
}

fn list(field: &Option<Vec<String>>) -> Vec<String> {
    field
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_normalizes_without_error() {
        let normalized = NormalizedProfile::from_profile(&StudentProfile::default());
        assert_eq!(normalized.cognitive_level, UNSPECIFIED);
        assert_eq!(normalized.attention_span, UNSPECIFIED);
        assert!(normalized.preferred_learning_style.is_empty());
        assert!(normalized.sensory_needs.is_empty());
        assert!(normalized.accommodations.is_empty());
    }

    #[test]
    fn blank_entries_are_dropped() {
        let profile = StudentProfile {
            cognitive_level: Some("  ".to_string()),
            preferred_learning_style: Some(vec![
                "visual".to_string(),
                "".to_string(),
                "  auditory ".to_string(),
            ]),
            ..StudentProfile::default()
        };
        let normalized = NormalizedProfile::from_profile(&profile);
        assert_eq!(normalized.cognitive_level, UNSPECIFIED);
        assert_eq!(normalized.preferred_learning_style, vec!["visual", "auditory"]);
    }

    #[test]
    fn prompt_json_is_stable() {
        let profile = StudentProfile {
            cognitive_level: Some("moderate".to_string()),
            attention_span: Some("10-15 minutes".to_string()),
            ..StudentProfile::default()
        };
        let a = NormalizedProfile::from_profile(&profile).to_prompt_json();
        let b = NormalizedProfile::from_profile(&profile).to_prompt_json();
        assert_eq!(a, b);
        assert!(a.contains("\"cognitiveLevel\": \"moderate\""));
    }
}
