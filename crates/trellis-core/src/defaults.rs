//! Centralized default constants for the trellis system.
//!
//! **This module is the single source of truth** for all shared default values.
//! All crates reference these constants instead of defining their own magic
//! numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// SCORES
// =============================================================================

/// Lower bound for priority and confidence scores.
pub const SCORE_MIN: i32 = 0;

/// Upper bound for priority and confidence scores.
pub const SCORE_MAX: i32 = 100;

/// Default priority assigned when the model omits or mangles the field.
pub const DEFAULT_PRIORITY: i32 = 50;

/// Default confidence assigned when the model omits or mangles the field.
pub const DEFAULT_CONFIDENCE: i32 = 50;

/// Priority at or above which a task is labeled "High".
pub const PRIORITY_HIGH_THRESHOLD: i32 = 80;

/// Priority at or above which a task is labeled "Medium".
pub const PRIORITY_MEDIUM_THRESHOLD: i32 = 60;

// =============================================================================
// FIELD LENGTH BOUNDS
// =============================================================================

/// Maximum characters for a task title.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum characters for an extracted task description.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Maximum characters for a suggested (improved) description.
pub const SUGGESTION_DESCRIPTION_MAX_CHARS: usize = 200;

/// Maximum characters for a context summary.
pub const SUMMARY_MAX_CHARS: usize = 300;

/// Maximum number of task candidates kept from one extraction.
pub const MAX_EXTRACTED_TASKS: usize = 5;

// =============================================================================
// CATEGORIES
// =============================================================================

/// Category name substituted when the model omits one.
pub const DEFAULT_CATEGORY: &str = "personal";

/// Hex color assigned to categories created on demand by the pipeline.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6B7280";

/// Icon assigned to categories created on demand by the pipeline.
pub const DEFAULT_CATEGORY_ICON: &str = "folder";

/// Seed categories offered to new users: (name, color, icon).
pub const SEED_CATEGORIES: &[(&str, &str, &str)] = &[
    ("Work", "#3B82F6", "briefcase"),
    ("Personal", "#10B981", "home"),
    ("Health", "#EF4444", "heart"),
    ("Learning", "#8B5CF6", "graduation-cap"),
    ("Finance", "#F59E0B", "dollar-sign"),
    ("Shopping", "#EC4899", "shopping-cart"),
    ("Travel", "#06B6D4", "plane"),
];

// =============================================================================
// DEADLINES
// =============================================================================

/// Days from now for the fallback suggested deadline.
pub const DEFAULT_DEADLINE_DAYS: i64 = 7;

// =============================================================================
// INFERENCE
// =============================================================================

/// Default Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini generation model.
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// USERS
// =============================================================================

/// Username of the implicit single user resolved by the API layer.
pub const DEFAULT_USERNAME: &str = "default_user";

/// Email of the implicit single user resolved by the API layer.
pub const DEFAULT_USER_EMAIL: &str = "user@example.com";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for list endpoints.
pub const PAGE_LIMIT: i64 = 50;

/// Default page offset.
pub const PAGE_OFFSET: i64 = 0;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert_eq!(SCORE_MIN, 0);
        assert_eq!(SCORE_MAX, 100);
        assert!(DEFAULT_PRIORITY >= SCORE_MIN && DEFAULT_PRIORITY <= SCORE_MAX);
        assert!(DEFAULT_CONFIDENCE >= SCORE_MIN && DEFAULT_CONFIDENCE <= SCORE_MAX);
    }

    #[test]
    fn test_priority_thresholds_ordered() {
        assert!(PRIORITY_HIGH_THRESHOLD > PRIORITY_MEDIUM_THRESHOLD);
        assert!(PRIORITY_MEDIUM_THRESHOLD > SCORE_MIN);
        assert!(PRIORITY_HIGH_THRESHOLD <= SCORE_MAX);
    }

    #[test]
    fn test_seed_categories_complete() {
        assert_eq!(SEED_CATEGORIES.len(), 7);
        for (name, color, icon) in SEED_CATEGORIES {
            assert!(!name.is_empty());
            assert!(color.starts_with('#'));
            assert_eq!(color.len(), 7);
            assert!(!icon.is_empty());
        }
    }

    #[test]
    fn test_default_category_color_is_hex() {
        assert!(DEFAULT_CATEGORY_COLOR.starts_with('#'));
        assert_eq!(DEFAULT_CATEGORY_COLOR.len(), 7);
    }

    #[test]
    fn test_extraction_cap() {
        assert_eq!(MAX_EXTRACTED_TASKS, 5);
    }
}
