//! # System Constants
//!
//! Fixed business limits, rule messages and service identity strings for the
//! chained form service. Rule messages are part of the public HTTP contract
//! (clients match on substrings), so they live here rather than inline.

/// Budget limits enforced whenever a budget is supplied
pub mod budget {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 5000;
    /// Budgets are accepted in whole hundreds only
    pub const STEP: i64 = 100;
}

/// Substring of `topic` (case-insensitive) that places a Basic submission on the date path
pub const DATE_TOPIC_MARKER: &str = "date";

/// Human-readable rule violations surfaced in the semantic 422 `detail`
pub mod messages {
    pub const TOPIC_REQUIRED: &str = "Topic is required for Basic mode";
    pub const CATEGORY_REQUIRED: &str = "Category is required for Advanced mode";

    pub const DATE_REQUIRED_FOR_TOPIC: &str = "Date is required when topic contains \"date\"";
    pub const TIME_REQUIRED_FOR_TOPIC: &str =
        "Time is required when topic does not contain \"date\"";
    pub const DATE_REQUIRED_FOR_SCHEDULE: &str = "Date is required for Schedule category";
    pub const TIME_REQUIRED_FOR_CATEGORY: &str =
        "Time is required for Realtime and Analytics categories";

    pub const BUDGET_REQUIRED: &str = "Budget is required when on date path";
    pub const URGENCY_REQUIRED: &str = "Urgency is required when on time path";

    pub const BUDGET_OUT_OF_RANGE: &str = "Budget must be between 0 and 5000";
    pub const BUDGET_NOT_MULTIPLE: &str = "Budget must be a multiple of 100";

    /// Separator used when several rule violations are joined into one `detail` string
    pub const JOIN_SEPARATOR: &str = "; ";
}

/// Service identity and fixed HTTP payloads
pub mod system {
    pub const SERVICE_NAME: &str = "Chained Form API";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const HEALTH_MESSAGE: &str = "Chained Form API is running";
    pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";
    pub const NOT_FOUND_DETAIL: &str = "Not Found";
    pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8001";
    pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
    pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];
}
