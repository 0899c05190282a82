use thiserror::Error;

/// Errors returned at the planner's API boundary.
///
/// Problems inside a plan are never errors of this type; they are reported
/// as [`crate::evaluation::PlanIssue`]s in the validation result.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;
