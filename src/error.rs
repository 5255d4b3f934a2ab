// ============================================================================
// PORTAL ERROR - Typed errors for sessions and scoped API calls
// ============================================================================

use thiserror::Error;

use crate::utils::bilingual;

/// Every failure that can leave a session service or an API helper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// Input rejected before any request was issued.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Carries the rejected input.
    #[error("{msg} ({0})", msg = bilingual("invalid_medium"))]
    InvalidMedium(String),

    #[error("{msg} ({0})", msg = bilingual("invalid_year"))]
    InvalidYear(String),

    #[error("{msg}", msg = bilingual("admin_login_required"))]
    NotAuthenticated,

    /// Scoped call attempted while the owning session is not ready.
    /// Carries the message key.
    #[error("{msg}", msg = bilingual(.0))]
    NotReady(&'static str),

    #[error("{msg} ({0})", msg = bilingual("student_not_linked"))]
    StudentNotLinked(String),

    #[error("Action already in flight: {0}")]
    AlreadyInFlight(&'static str),

    /// Login rejected or failed; the message is already user-facing.
    #[error("{0}")]
    LoginFailed(String),

    /// 401 on an authenticated call. The session has already been cleared.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Response arrived after logout/expiry/dispose and was dropped.
    #[error("Stale response discarded")]
    Stale,
}

impl PortalError {
    /// Transport and server-side failures the user can retry as-is.
    pub fn is_retryable(&self) -> bool {
        match self {
            PortalError::Network(_) => true,
            PortalError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
