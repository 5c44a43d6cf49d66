use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in darfind-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors surfaced by a chat turn.
///
/// None of these are retried; the HTTP layer maps each to a status code.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A turn was appended to a session the store does not know.
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    /// The language model failed or produced no usable reply.
    #[error("upstream model error: {0}")]
    Upstream(#[from] LlmError),

    /// A store lookup, insert, or append failed.
    #[error("persistence error: {0}")]
    Persistence(RepositoryError),
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        ChatError::Persistence(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_chat_error_from_llm_error() {
        let err: ChatError = LlmError::AuthenticationFailed.into();
        assert!(matches!(err, ChatError::Upstream(LlmError::AuthenticationFailed)));
        assert_eq!(err.to_string(), "upstream model error: authentication failed");
    }

    #[test]
    fn test_chat_error_from_repository_error() {
        let err: ChatError = RepositoryError::Connection.into();
        assert!(matches!(err, ChatError::Persistence(RepositoryError::Connection)));
    }

    #[test]
    fn test_session_not_found_display() {
        let err = ChatError::SessionNotFound("abc".to_string());
        assert_eq!(err.to_string(), "session 'abc' not found");
    }
}
