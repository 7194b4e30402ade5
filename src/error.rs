use thiserror::Error;

/// Errors surfaced by the portal core
///
/// None of these are fatal. Callers either show a notification or fall back
/// to an empty/zero result.
#[derive(Debug, Error)]
pub enum PortalError {
    /// One or both login fields were empty, or the verifier rejected them
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A grade symbol outside the fixed scale
    #[error("unknown grade symbol {0:?}")]
    UnknownGrade(String),

    /// A recorded course with zero credits
    #[error("course {code} must carry at least one credit")]
    InvalidCredits { code: String },

    /// Calculator row index out of range
    #[error("no calculator entry at index {0}")]
    NoSuchEntry(usize),

    /// Trigger fired from a view that has no such transition
    #[error("cannot {trigger} while in {state}")]
    InvalidTransition {
        state: &'static str,
        trigger: &'static str,
    },

    #[error("failed to read profile: {0}")]
    ProfileIo(#[from] std::io::Error),

    #[error("failed to parse profile: {0}")]
    ProfileFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PortalError>;
