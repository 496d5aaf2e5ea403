//! Error types shared by the manager and its collaborators

/// Result type for collaborator calls
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Failure reported by a session provider, profile store or their transport.
///
/// These never reach views: the manager folds them into [`crate::AuthState`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Session provider error: {message}")]
    Session { message: String },

    #[error("Profile store error: {message}")]
    Profile { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl ProviderError {
    /// Create a session provider error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Create a profile store error
    pub fn profile(message: impl Into<String>) -> Self {
        Self::Profile {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Standard result type for handle operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors surfaced to consumers of the shared state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The handle outlived the manager that issued it
    #[error("auth state accessed outside of its manager's scope")]
    OutOfScope,
}
