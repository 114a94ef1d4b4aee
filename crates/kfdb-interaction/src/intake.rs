//! AI response intake: sanitization and shape validation.
//!
//! Model responses are free-form text expected to contain a JSON object,
//! optionally wrapped in a markdown code fence. Models also routinely emit
//! trailing commas, so those are repaired before parsing. Anything that
//! still fails to parse, or parses into the wrong shape, is a
//! `KfdbError::Format` — a non-conforming payload is never partially
//! trusted.

use kfdb_core::assist::GeneratedPlan;
use kfdb_core::error::{KfdbError, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").expect("valid regex"));
static TRAILING_ARRAY_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\]").expect("valid regex"));
static TRAILING_OBJECT_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*\}").expect("valid regex"));

/// Number of ideas a category-ideas response must carry.
pub const IDEAS_PER_REQUEST: usize = 3;

#[derive(Debug, Deserialize)]
struct InitialPlanPayload {
    title: String,
    know: Vec<String>,
    feel: Vec<String>,
    #[serde(rename = "do")]
    do_: Vec<String>,
    be: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryIdeasPayload {
    ideas: Vec<String>,
}

/// Strips an optional code fence and repairs trailing commas, then parses
/// the remainder as JSON.
fn parse_json_payload(text: &str) -> Result<serde_json::Value> {
    let mut json_str = text.trim().to_string();
    if let Some(captures) = FENCE_RE.captures(&json_str) {
        if let Some(inner) = captures.get(2) {
            json_str = inner.as_str().trim().to_string();
        }
    }

    let sanitized = TRAILING_ARRAY_COMMA_RE.replace_all(&json_str, "]");
    let sanitized = TRAILING_OBJECT_COMMA_RE.replace_all(&sanitized, "}");

    serde_json::from_str(&sanitized).map_err(|e| {
        tracing::debug!("unparseable AI payload: {}", json_str);
        KfdbError::format(format!("response was not valid JSON: {}", e))
    })
}

/// Parses an initial-generation response into a validated plan.
pub fn parse_initial_plan(text: &str) -> Result<GeneratedPlan> {
    let value = parse_json_payload(text)?;
    let payload: InitialPlanPayload = serde_json::from_value(value)
        .map_err(|e| KfdbError::format(format!("initial plan did not match expected shape: {}", e)))?;

    Ok(GeneratedPlan {
        title: payload.title,
        know: payload.know,
        feel: payload.feel,
        do_: payload.do_,
        be: payload.be,
    })
}

/// Parses a category-ideas response into exactly [`IDEAS_PER_REQUEST`] ideas.
pub fn parse_category_ideas(text: &str) -> Result<Vec<String>> {
    let value = parse_json_payload(text)?;
    let payload: CategoryIdeasPayload = serde_json::from_value(value)
        .map_err(|e| KfdbError::format(format!("ideas did not match expected shape: {}", e)))?;

    if payload.ideas.len() != IDEAS_PER_REQUEST {
        return Err(KfdbError::format(format!(
            "expected {} ideas, got {}",
            IDEAS_PER_REQUEST,
            payload.ideas.len()
        )));
    }

    Ok(payload.ideas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_json() {
        let plan = parse_initial_plan(
            r#"{"title":"Leadership Reset","know":["Budgeting basics"],"feel":[],"do":["Run a retro"],"be":[]}"#,
        )
        .unwrap();
        assert_eq!(plan.title, "Leadership Reset");
        assert_eq!(plan.know, vec!["Budgeting basics"]);
        assert!(plan.feel.is_empty());
    }

    #[test]
    fn test_parses_fenced_json() {
        let text = "```json\n{\"ideas\": [\"a\", \"b\", \"c\"]}\n```";
        assert_eq!(parse_category_ideas(text).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_repairs_trailing_commas() {
        let text = r#"{"ideas": ["a", "b", "c",], }"#;
        assert_eq!(parse_category_ideas(text).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rejects_non_json() {
        let err = parse_category_ideas("I'm sorry, I can't help with that.").unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_rejects_wrong_shape() {
        let err = parse_initial_plan(r#"{"title": 42, "know": [], "feel": [], "do": [], "be": []}"#)
            .unwrap_err();
        assert!(err.is_format());

        let err = parse_category_ideas(r#"{"suggestions": ["a"]}"#).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_rejects_wrong_idea_count() {
        let err = parse_category_ideas(r#"{"ideas": ["only", "two"]}"#).unwrap_err();
        assert!(err.is_format());
    }
}
