//! Centralized default constants for the want-survey service.
//!
//! **This module is the single source of truth** for field limits, form
//! choices, and server defaults. The API server, the normalization routine and
//! the form client all reference these constants instead of defining their own
//! magic numbers.

// =============================================================================
// FIELD LIMITS
// =============================================================================

/// Maximum characters kept for the submitter's name.
pub const NAME_MAX: usize = 120;

/// Maximum characters kept for the submitter's email.
pub const EMAIL_MAX: usize = 160;

/// Maximum characters kept for the category.
pub const CATEGORY_MAX: usize = 60;

/// Maximum characters kept for the "want" statement.
pub const WANT_MAX: usize = 3000;

/// Minimum trimmed characters required in the "want" statement.
pub const WANT_MIN: usize = 8;

/// Maximum characters kept for the "why" explanation.
pub const WHY_MAX: usize = 3000;

/// Maximum characters kept for the urgency.
pub const URGENCY_MAX: usize = 40;

/// Maximum characters kept for the budget.
pub const BUDGET_MAX: usize = 20;

/// Maximum characters kept per tag.
pub const TAG_MAX: usize = 40;

/// Maximum number of tags kept per submission.
pub const TAGS_MAX_COUNT: usize = 20;

/// Display cap shown next to the live "want" character counter.
///
/// Matches [`WANT_MAX`] so the hint and the server limit agree. The counter
/// never blocks input past this value.
pub const WANT_COUNTER_CAP: usize = WANT_MAX;

// =============================================================================
// FORM CHOICES
// =============================================================================

/// Category used when the submission carries none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Categories offered by the form, in display order.
pub const CATEGORIES: &[&str] = &[
    "Work / Productivity",
    "Health & Wellness",
    "Finance",
    "Learning",
    "Home & Personal",
    "Creative",
    "Developer Tools",
    "Other",
];

/// Urgency levels offered by the form, in display order.
pub const URGENCIES: &[&str] = &["ASAP", "Soon", "Sometime", "Just exploring"];

/// Budget ranges offered by the form, in display order.
pub const BUDGETS: &[&str] = &["Free", "$", "$$", "$$$", "Not sure"];

/// Urgency preselected on a blank form.
pub const FORM_URGENCY: &str = "Sometime";

/// Budget preselected on a blank form.
pub const FORM_BUDGET: &str = "Free";

// =============================================================================
// WEBHOOK
// =============================================================================

/// Event type carried in every forwarded webhook envelope.
pub const WEBHOOK_EVENT_TYPE: &str = "survey.submission";

/// Upper bound on a single webhook delivery, in seconds.
pub const WEBHOOK_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default transport ceiling on a request body, in bytes.
///
/// Well above any body the form produces; oversized fields are truncated by
/// normalization, not rejected here.
pub const REQUEST_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Default CORS origin whitelist.
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Path of the submission endpoint.
pub const SUBMIT_PATH: &str = "/api/submit";
