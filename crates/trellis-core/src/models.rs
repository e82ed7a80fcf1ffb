//! Core data models for trellis.
//!
//! These types are shared across all trellis crates and represent
//! the core domain entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::defaults;
use crate::error::Error;

// =============================================================================
// USER TYPES
// =============================================================================

/// An account owning tasks, categories, and context entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at_utc: DateTime<Utc>,
}

// =============================================================================
// CATEGORY TYPES
// =============================================================================

/// A user-scoped task category with display color and icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub created_at_utc: DateTime<Utc>,
}

/// Normalize a category name for `(user, name)` lookup.
///
/// Title-cases each whitespace-separated word so that "work", "WORK" and
/// "Work" all resolve to the same category row. ASCII-oriented; full
/// Unicode locale rules are out of scope.
pub fn normalize_category_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// TASK TYPES
// =============================================================================

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Returns the database/wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(Error::InvalidInput(format!(
                "Unknown task status: {}",
                other
            ))),
        }
    }
}

/// Coarse priority band derived from the numeric 0-100 priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityBand::High => "high",
            PriorityBand::Medium => "medium",
            PriorityBand::Low => "low",
        }
    }

    /// Band for a numeric priority score.
    pub fn from_priority(priority: i32) -> Self {
        if priority >= defaults::PRIORITY_HIGH_THRESHOLD {
            PriorityBand::High
        } else if priority >= defaults::PRIORITY_MEDIUM_THRESHOLD {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }
}

impl fmt::Display for PriorityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriorityBand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(PriorityBand::High),
            "medium" => Ok(PriorityBand::Medium),
            "low" => Ok(PriorityBand::Low),
            other => Err(Error::InvalidInput(format!(
                "Unknown priority band: {}",
                other
            ))),
        }
    }
}

/// A stored task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    /// True when the task was created from a model suggestion rather than
    /// typed in by the user.
    pub ai_suggested: bool,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

impl Task {
    /// Coarse priority band for display and filtering.
    pub fn priority_band(&self) -> PriorityBand {
        PriorityBand::from_priority(self.priority)
    }

    /// True when the task is past due and not yet completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        matches!(self.status, TaskStatus::Pending | TaskStatus::InProgress)
            && self.due_date.is_some_and(|due| due < now)
    }
}

/// Aggregate task counts for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub overdue: i64,
}

// =============================================================================
// CONTEXT ENTRY TYPES
// =============================================================================

/// Kind of unstructured content submitted for task extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Email,
    #[default]
    Note,
    Message,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Email => "email",
            ContentType::Note => "note",
            ContentType::Message => "message",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(ContentType::Email),
            "note" => Ok(ContentType::Note),
            "message" => Ok(ContentType::Message),
            other => Err(Error::InvalidInput(format!(
                "Unknown content type: {}",
                other
            ))),
        }
    }
}

/// A unit of unstructured input text (email, note, message) a user submits
/// for task extraction. `processed` flips to true exactly once, after the
/// extraction pipeline has attempted to materialize every candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub processed: bool,
    pub created_at_utc: DateTime<Utc>,
}

// =============================================================================
// AI RESULT TYPES
// =============================================================================

/// Structured improvement suggestion for a task, produced by the suggestion
/// engine. Never stored by the engine itself; callers decide whether to
/// persist any of it. Every numeric field is clamped to [0, 100] and every
/// string field is length-bounded before this type is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub improved_description: String,
    pub priority_score: i32,
    pub suggested_deadline: DateTime<Utc>,
    pub suggested_category: String,
    pub confidence: i32,
}

/// A task proposed by the extraction pipeline, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTaskCandidate {
    pub title: String,
    pub description: String,
    pub priority_score: i32,
    pub suggested_category: String,
}

/// Result of extracting actionable tasks from a context entry's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub candidates: Vec<ExtractedTaskCandidate>,
    pub summary: String,
    pub confidence: i32,
}

/// Output of materializing an extraction result: the tasks that were
/// durably created, plus the summary and confidence carried over from
/// the extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedContext {
    pub tasks: Vec<Task>,
    pub summary: String,
    pub confidence: i32,
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request for creating a new task.
#[derive(Debug, Clone)]
pub struct CreateTaskRequest {
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub ai_suggested: bool,
}

/// Request for updating a task. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
    pub category_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Request for listing tasks with filtering and pagination.
#[derive(Debug, Clone, Default)]
pub struct ListTasksRequest {
    pub status: Option<TaskStatus>,
    pub category_id: Option<Uuid>,
    pub priority: Option<PriorityBand>,
    /// Case-insensitive substring match over title and description.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request for creating a category. Color and icon fall back to the
/// pipeline defaults when omitted.
#[derive(Debug, Clone)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Request for updating a category. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Request for creating a context entry.
#[derive(Debug, Clone)]
pub struct CreateContextEntryRequest {
    pub content: String,
    pub content_type: ContentType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_task(priority: i32, status: TaskStatus, due: Option<DateTime<Utc>>) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            category_id: Uuid::new_v4(),
            title: "Sample".to_string(),
            description: String::new(),
            priority,
            status,
            due_date: due,
            ai_suggested: false,
            created_at_utc: now,
            updated_at_utc: now,
        }
    }

    #[test]
    fn test_task_status_roundtrip() {
        for status in [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_task_status_unknown() {
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_task_status_serde_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, TaskStatus::Completed);
    }

    #[test]
    fn test_priority_band_thresholds() {
        assert_eq!(PriorityBand::from_priority(100), PriorityBand::High);
        assert_eq!(PriorityBand::from_priority(80), PriorityBand::High);
        assert_eq!(PriorityBand::from_priority(79), PriorityBand::Medium);
        assert_eq!(PriorityBand::from_priority(60), PriorityBand::Medium);
        assert_eq!(PriorityBand::from_priority(59), PriorityBand::Low);
        assert_eq!(PriorityBand::from_priority(0), PriorityBand::Low);
    }

    #[test]
    fn test_priority_band_parse() {
        assert_eq!("high".parse::<PriorityBand>().unwrap(), PriorityBand::High);
        assert_eq!(
            "medium".parse::<PriorityBand>().unwrap(),
            PriorityBand::Medium
        );
        assert_eq!("low".parse::<PriorityBand>().unwrap(), PriorityBand::Low);
        assert!("urgent".parse::<PriorityBand>().is_err());
    }

    #[test]
    fn test_task_priority_band() {
        assert_eq!(
            sample_task(85, TaskStatus::Pending, None).priority_band(),
            PriorityBand::High
        );
        assert_eq!(
            sample_task(65, TaskStatus::Pending, None).priority_band(),
            PriorityBand::Medium
        );
        assert_eq!(
            sample_task(10, TaskStatus::Pending, None).priority_band(),
            PriorityBand::Low
        );
    }

    #[test]
    fn test_task_is_overdue() {
        let now = Utc::now();
        let past = Some(now - Duration::hours(1));
        let future = Some(now + Duration::hours(1));

        assert!(sample_task(50, TaskStatus::Pending, past).is_overdue(now));
        assert!(sample_task(50, TaskStatus::InProgress, past).is_overdue(now));
        assert!(!sample_task(50, TaskStatus::Completed, past).is_overdue(now));
        assert!(!sample_task(50, TaskStatus::Pending, future).is_overdue(now));
        assert!(!sample_task(50, TaskStatus::Pending, None).is_overdue(now));
    }

    #[test]
    fn test_content_type_roundtrip() {
        for ct in [ContentType::Email, ContentType::Note, ContentType::Message] {
            assert_eq!(ct.as_str().parse::<ContentType>().unwrap(), ct);
        }
        assert!("tweet".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_context_entry_serde_type_field() {
        let entry = ContextEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            content: "call the dentist".to_string(),
            content_type: ContentType::Email,
            processed: false,
            created_at_utc: Utc::now(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "email");

        let parsed: ContextEntry = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.content_type, ContentType::Email);
    }

    #[test]
    fn test_normalize_category_name() {
        assert_eq!(normalize_category_name("work"), "Work");
        assert_eq!(normalize_category_name("WORK"), "Work");
        assert_eq!(normalize_category_name("side projects"), "Side Projects");
        assert_eq!(normalize_category_name("  personal  "), "Personal");
        assert_eq!(normalize_category_name(""), "");
    }

    #[test]
    fn test_normalize_category_name_collapses_case_variants() {
        let variants = ["home repairs", "Home Repairs", "HOME REPAIRS", "hOmE rEpAiRs"];
        let normalized: Vec<String> = variants
            .iter()
            .map(|v| normalize_category_name(v))
            .collect();
        assert!(normalized.iter().all(|n| n == "Home Repairs"));
    }

    #[test]
    fn test_suggestion_result_serialization() {
        let result = SuggestionResult {
            improved_description: "Buy milk on the way home".to_string(),
            priority_score: 40,
            suggested_deadline: Utc::now(),
            suggested_category: "shopping".to_string(),
            confidence: 75,
        };

        let json = serde_json::to_string(&result).unwrap();
        let parsed: SuggestionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_extraction_result_serialization() {
        let result = ExtractionResult {
            candidates: vec![ExtractedTaskCandidate {
                title: "Reply to Sam".to_string(),
                description: "About the quarterly review".to_string(),
                priority_score: 70,
                suggested_category: "work".to_string(),
            }],
            summary: "Email about review scheduling".to_string(),
            confidence: 80,
        };

        let json = serde_json::to_string(&result).unwrap();
        let parsed: ExtractionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_list_tasks_request_default() {
        let req = ListTasksRequest::default();
        assert!(req.status.is_none());
        assert!(req.category_id.is_none());
        assert!(req.priority.is_none());
        assert!(req.search.is_none());
        assert!(req.limit.is_none());
        assert!(req.offset.is_none());
    }

    #[test]
    fn test_update_task_request_default() {
        let req = UpdateTaskRequest::default();
        assert!(req.title.is_none());
        assert!(req.status.is_none());
        assert!(req.due_date.is_none());
    }
}
