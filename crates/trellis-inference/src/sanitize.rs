//! Sanitizers for untrusted model output.
//!
//! The external model is treated as an adversarial data source: responses
//! are untyped JSON that may carry missing, wrongly-typed, or out-of-range
//! fields, and are sometimes wrapped in markdown code fences. Every field
//! is extracted defensively, size-bounded, and range-clamped here before it
//! can reach a caller or the persistence layer. Out-of-range and missing
//! values are substituted, never rejected: sanitization cannot fail.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value as JsonValue;

use trellis_core::{defaults, ExtractedTaskCandidate, ExtractionResult, SuggestionResult};

/// Strip a leading/trailing markdown code fence from a model response.
///
/// Models occasionally wrap JSON in ```` ```json … ``` ```` blocks even
/// when told not to.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Truncate a string to at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Clamp a JSON score field to [0, 100], substituting `default` when the
/// field is absent or not a number.
pub fn clamp_score(value: Option<&JsonValue>, default: i32) -> i32 {
    match value.and_then(JsonValue::as_f64) {
        Some(n) => (n.round() as i32).clamp(defaults::SCORE_MIN, defaults::SCORE_MAX),
        None => default,
    }
}

/// Extract a non-empty string field.
fn string_field<'a>(value: &'a JsonValue, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// The fallback deadline: one week out.
pub fn default_deadline(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(defaults::DEFAULT_DEADLINE_DAYS)
}

/// Leniently parse a model-supplied deadline.
///
/// Accepts RFC 3339, naive datetimes (assumed UTC), and bare dates
/// (midnight UTC). Anything else is `None`, routing to the default.
pub fn parse_deadline(value: Option<&JsonValue>) -> Option<DateTime<Utc>> {
    let text = value?.as_str()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Sanitize a parsed suggestion response into a well-formed
/// [`SuggestionResult`].
///
/// `title` supplies the fallback description when the model omits one.
pub fn sanitize_suggestion(value: &JsonValue, title: &str) -> SuggestionResult {
    let improved_description = truncate_chars(
        string_field(value, "improved_description").unwrap_or(title),
        defaults::SUGGESTION_DESCRIPTION_MAX_CHARS,
    );

    SuggestionResult {
        improved_description,
        priority_score: clamp_score(value.get("priority_score"), defaults::DEFAULT_PRIORITY),
        suggested_deadline: parse_deadline(value.get("suggested_deadline"))
            .unwrap_or_else(|| default_deadline(Utc::now())),
        suggested_category: string_field(value, "suggested_category")
            .unwrap_or(defaults::DEFAULT_CATEGORY)
            .to_string(),
        confidence: clamp_score(value.get("confidence"), defaults::DEFAULT_CONFIDENCE),
    }
}

/// Sanitize one extracted task object. Returns `None` when the title is
/// missing or empty; such entries are dropped entirely.
fn sanitize_candidate(task: &JsonValue) -> Option<ExtractedTaskCandidate> {
    let title = string_field(task, "title")?;

    Some(ExtractedTaskCandidate {
        title: truncate_chars(title, defaults::TITLE_MAX_CHARS),
        description: truncate_chars(
            task.get("description").and_then(JsonValue::as_str).unwrap_or(""),
            defaults::DESCRIPTION_MAX_CHARS,
        ),
        priority_score: clamp_score(task.get("priority_score"), defaults::DEFAULT_PRIORITY),
        suggested_category: string_field(task, "suggested_category")
            .unwrap_or(defaults::DEFAULT_CATEGORY)
            .to_string(),
    })
}

/// Sanitize a parsed extraction response into a well-formed
/// [`ExtractionResult`].
///
/// Keeps at most [`defaults::MAX_EXTRACTED_TASKS`] candidates with
/// non-empty titles. A response with zero usable candidates is legitimate
/// output, not a failure.
pub fn sanitize_extraction(value: &JsonValue) -> ExtractionResult {
    let candidates = value
        .get("extracted_tasks")
        .and_then(JsonValue::as_array)
        .map(|tasks| {
            tasks
                .iter()
                .filter_map(sanitize_candidate)
                .take(defaults::MAX_EXTRACTED_TASKS)
                .collect()
        })
        .unwrap_or_default();

    ExtractionResult {
        candidates,
        summary: truncate_chars(
            string_field(value, "summary").unwrap_or("Content processed"),
            defaults::SUMMARY_MAX_CHARS,
        ),
        confidence: clamp_score(value.get("confidence"), defaults::DEFAULT_CONFIDENCE),
    }
}
