//! Response resolution: parse-or-fallback
//!
//! The resolver is total. Whatever the backend did — returned well-formed
//! JSON, returned prose, returned an empty body, or failed outright — the
//! caller receives a fully-populated output value. Backend output is only
//! accepted when it deserializes into the typed output struct; anything
//! short of that is absorbed into deterministic fallback synthesis.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::engine::backend::GenerationError;

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Parsed from backend output
    Backend,
    /// Served from the key/value cache
    Cache,
    /// Synthesized from the request alone
    Fallback,
}

/// A resolved flow output plus its provenance
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub origin: Origin,
}

impl<T> Resolved<T> {
    pub fn backend(value: T) -> Self {
        Self { value, origin: Origin::Backend }
    }

    pub fn cached(value: T) -> Self {
        Self { value, origin: Origin::Cache }
    }

    pub fn fallback(value: T) -> Self {
        Self { value, origin: Origin::Fallback }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == Origin::Fallback
    }
}

/// Resolve a raw backend result into a typed output, synthesizing the
/// fallback on any failure. Never errors.
pub fn resolve<T, F>(raw: Result<String, GenerationError>, synthesize: F) -> Resolved<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match raw {
        Ok(text) => match parse_structured::<T>(&text) {
            Ok(value) => Resolved::backend(value),
            Err(err) => {
                debug!(error = %err, "backend output failed structured parse, synthesizing fallback");
                Resolved::fallback(synthesize())
            }
        },
        Err(err) => {
            warn!(error = %err, "generation backend failed, synthesizing fallback");
            Resolved::fallback(synthesize())
        }
    }
}

fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(extract_json(text))
}

/// Trim markdown code fences and slice down to the outermost JSON object.
/// Models routinely wrap JSON in ```json fences or lead with prose.
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .map(|rest| rest.strip_suffix("```").unwrap_or(rest))
        .unwrap_or(trimmed);
    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Shape {
        name: String,
        sides: u32,
    }

    fn fallback_shape() -> Shape {
        Shape { name: "circle".to_string(), sides: 0 }
    }

    #[test]
    fn valid_json_passes_through() {
        let resolved = resolve(
            Ok(r#"{"name": "square", "sides": 4}"#.to_string()),
            fallback_shape,
        );
        assert_eq!(resolved.origin, Origin::Backend);
        assert_eq!(resolved.value, Shape { name: "square".to_string(), sides: 4 });
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let raw = "```json\n{\"name\": \"triangle\", \"sides\": 3}\n```";
        let resolved = resolve(Ok(raw.to_string()), fallback_shape);
        assert_eq!(resolved.origin, Origin::Backend);
        assert_eq!(resolved.value.sides, 3);
    }

    #[test]
    fn prose_around_json_is_ignored() {
        let raw = "Here you go:\n{\"name\": \"pentagon\", \"sides\": 5}\nEnjoy!";
        let resolved = resolve(Ok(raw.to_string()), fallback_shape);
        assert_eq!(resolved.origin, Origin::Backend);
        assert_eq!(resolved.value.sides, 5);
    }

    #[test]
    fn wrong_shape_falls_back_even_when_json_parses() {
        // Parses as JSON but misses required fields; duck-typing is not enough
        let resolved = resolve(Ok(r#"{"name": "square"}"#.to_string()), fallback_shape);
        assert!(resolved.is_fallback());
        assert_eq!(resolved.value, fallback_shape());
    }

    #[test]
    fn garbage_falls_back() {
        for raw in ["", "not json at all", "{broken", "[1, 2, 3]"] {
            let resolved = resolve(Ok(raw.to_string()), fallback_shape);
            assert!(resolved.is_fallback(), "expected fallback for {:?}", raw);
        }
    }

    #[test]
    fn backend_error_falls_back() {
        let resolved = resolve(
            Err(GenerationError::Unavailable("connect timeout".to_string())),
            fallback_shape,
        );
        assert!(resolved.is_fallback());
        assert_eq!(resolved.value, fallback_shape());
    }
}
