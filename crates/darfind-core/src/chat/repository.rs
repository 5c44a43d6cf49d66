//! SessionRepository trait definition.
//!
//! Durable per-session storage of chat turns, addressed by the opaque
//! session token. Follows the RPITIT pattern used by every port in this crate.

use darfind_types::chat::{Session, SessionSummary, Turn};
use darfind_types::error::RepositoryError;

/// Repository trait for chat session and turn persistence.
///
/// Implementations live in darfind-infra (e.g., `SqliteSessionRepository`).
/// The repository is the only owner of session state; callers never cache
/// history across requests.
pub trait SessionRepository: Send + Sync {
    /// Create the session with an empty history if it does not exist yet.
    ///
    /// Calling this for an existing session is a no-op and must leave its
    /// `created_at` untouched, including when two first requests race.
    fn ensure_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Append a turn stamped with the current time.
    ///
    /// Returns `RepositoryError::NotFound` if the session is unknown.
    fn append_turn(
        &self,
        session_id: &str,
        user_input: &str,
        response: &str,
    ) -> impl std::future::Future<Output = Result<Turn, RepositoryError>> + Send;

    /// All turns of a session in persistence order.
    ///
    /// An unknown session yields an empty vector, not an error.
    fn load_history(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RepositoryError>> + Send;

    /// The full session document (metadata plus history).
    fn get_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// List sessions, most recently created first.
    fn list_sessions(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<SessionSummary>, RepositoryError>> + Send;
}
