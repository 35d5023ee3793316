use thiserror::Error;

/// Failure taxonomy for the messaging core.
///
/// Validation failures (`EmptyDraft`, `NotPermitted`, `ConversationClosed`)
/// are raised locally before any network call is made. Transport and
/// backend failures wrap the underlying cause so presentation layers can
/// decide between an error banner and retaining stale data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },

    /// A 401 from any endpoint. The runtime reports this to the
    /// identity resolver before propagating it.
    #[error("session is no longer authorized")]
    Unauthorized,

    #[error("conversation {0} is closed")]
    ConversationClosed(String),

    #[error("conversation {0} is not in the directory")]
    UnknownConversation(String),

    #[error("message draft is empty")]
    EmptyDraft,

    #[error("viewer is not permitted to send messages")]
    NotPermitted,
}

pub type Result<T> = std::result::Result<T, CoreError>;
