//! SQLite session repository implementation.
//!
//! Implements `SessionRepository` from `darfind-core` using sqlx with split
//! read/write pools: raw queries, private Row structs, reader pool for
//! SELECTs and the single-connection writer pool for INSERTs.

use chrono::{DateTime, SecondsFormat, Utc};
use darfind_core::chat::repository::SessionRepository;
use darfind_types::chat::{Session, SessionSummary, Turn};
use darfind_types::error::RepositoryError;
use sqlx::Row;
use tracing::debug;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionRepository`.
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct TurnRow {
    timestamp: String,
    user_input: String,
    response: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            timestamp: row.try_get("timestamp")?,
            user_input: row.try_get("user_input")?,
            response: row.try_get("response")?,
        })
    }

    fn into_turn(self) -> Result<Turn, RepositoryError> {
        Ok(Turn {
            timestamp: parse_datetime(&self.timestamp)?,
            user_input: self.user_input,
            response: self.response,
        })
    }
}

struct SessionSummaryRow {
    session_id: String,
    created_at: String,
    turn_count: i64,
    last_activity: Option<String>,
}

impl SessionSummaryRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            created_at: row.try_get("created_at")?,
            turn_count: row.try_get("turn_count")?,
            last_activity: row.try_get("last_activity")?,
        })
    }

    fn into_summary(self) -> Result<SessionSummary, RepositoryError> {
        Ok(SessionSummary {
            session_id: self.session_id,
            created_at: parse_datetime(&self.created_at)?,
            turn_count: self.turn_count as u32,
            last_activity: self
                .last_activity
                .as_deref()
                .map(parse_datetime)
                .transpose()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

/// Fixed-width RFC 3339 so lexicographic order matches chronological order.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ---------------------------------------------------------------------------
// SessionRepository implementation
// ---------------------------------------------------------------------------

impl SessionRepository for SqliteSessionRepository {
    async fn ensure_session(&self, session_id: &str) -> Result<(), RepositoryError> {
        // Single-statement create-if-absent: concurrent first requests cannot
        // produce two rows or overwrite created_at.
        let result = sqlx::query(
            r#"INSERT INTO chat_sessions (session_id, created_at)
               VALUES (?, ?)
               ON CONFLICT(session_id) DO NOTHING"#,
        )
        .bind(session_id)
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 1 {
            debug!(session_id = %session_id, "Session created");
        }
        Ok(())
    }

    async fn append_turn(
        &self,
        session_id: &str,
        user_input: &str,
        response: &str,
    ) -> Result<Turn, RepositoryError> {
        let turn = Turn {
            timestamp: Utc::now(),
            user_input: user_input.to_string(),
            response: response.to_string(),
        };

        // The existence check rides in the same statement as the insert.
        let result = sqlx::query(
            r#"INSERT INTO chat_turns (session_id, timestamp, user_input, response)
               SELECT ?, ?, ?, ?
               WHERE EXISTS (SELECT 1 FROM chat_sessions WHERE session_id = ?)"#,
        )
        .bind(session_id)
        .bind(format_datetime(&turn.timestamp))
        .bind(&turn.user_input)
        .bind(&turn.response)
        .bind(session_id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(turn)
    }

    async fn load_history(&self, session_id: &str) -> Result<Vec<Turn>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT timestamp, user_input, response FROM chat_turns WHERE session_id = ? ORDER BY id ASC",
        )
        .bind(session_id)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut turns = Vec::with_capacity(rows.len());
        for row in &rows {
            let turn_row =
                TurnRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            turns.push(turn_row.into_turn()?);
        }

        Ok(turns)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query("SELECT session_id, created_at FROM chat_sessions WHERE session_id = ?")
            .bind(session_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let created_at: String = row
            .try_get("created_at")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(Some(Session {
            session_id: session_id.to_string(),
            created_at: parse_datetime(&created_at)?,
            history: self.load_history(session_id).await?,
        }))
    }

    async fn list_sessions(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<SessionSummary>, RepositoryError> {
        let mut sql = String::from(
            r#"SELECT s.session_id, s.created_at,
                      COUNT(t.id) AS turn_count,
                      MAX(t.timestamp) AS last_activity
               FROM chat_sessions s
               LEFT JOIN chat_turns t ON t.session_id = s.session_id
               GROUP BY s.session_id, s.created_at
               ORDER BY s.created_at DESC"#,
        );

        // SQLite needs a LIMIT clause before OFFSET; -1 means unbounded.
        match (limit, offset) {
            (Some(limit), _) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(_)) => sql.push_str(" LIMIT -1"),
            (None, None) => {}
        }
        if let Some(offset) = offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let summary_row = SessionSummaryRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(summary_row.into_summary()?);
        }

        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::{DatabasePool, database_url_for};

    async fn test_repo() -> SqliteSessionRepository {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url_for(dir.path());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        SqliteSessionRepository::new(DatabasePool::new(&url).await.unwrap())
    }

    #[tokio::test]
    async fn test_ensure_session_creates_empty_session() {
        let repo = test_repo().await;
        repo.ensure_session("s1").await.unwrap();

        let session = repo.get_session("s1").await.unwrap().unwrap();
        assert_eq!(session.session_id, "s1");
        assert!(session.history.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_session_is_idempotent() {
        let repo = test_repo().await;
        repo.ensure_session("s1").await.unwrap();
        let first = repo.get_session("s1").await.unwrap().unwrap();

        repo.ensure_session("s1").await.unwrap();
        let second = repo.get_session("s1").await.unwrap().unwrap();

        assert_eq!(first.created_at, second.created_at);
        let sessions = repo.list_sessions(None, None).await.unwrap();
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_ensure_session_yields_one_row() {
        let repo = test_repo().await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.ensure_session("race").await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let sessions = repo.list_sessions(None, None).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].session_id, "race");
    }

    #[tokio::test]
    async fn test_append_and_load_history_in_order() {
        let repo = test_repo().await;
        repo.ensure_session("s1").await.unwrap();

        repo.append_turn("s1", "Hi", "Rent or buy?").await.unwrap();
        repo.append_turn("s1", "Buy", "What type of property?").await.unwrap();
        repo.append_turn("s1", "Villa", "Which location?").await.unwrap();

        let history = repo.load_history("s1").await.unwrap();
        let inputs: Vec<&str> = history.iter().map(|t| t.user_input.as_str()).collect();
        assert_eq!(inputs, vec!["Hi", "Buy", "Villa"]);
        assert_eq!(history[1].response, "What type of property?");
        assert!(history[0].timestamp <= history[2].timestamp);
    }

    #[tokio::test]
    async fn test_append_turn_unknown_session_is_not_found() {
        let repo = test_repo().await;
        let err = repo.append_turn("ghost", "Hi", "Hello").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert!(repo.get_session("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_history_unknown_session_is_empty() {
        let repo = test_repo().await;
        assert!(repo.load_history("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_turn_returns_stored_turn() {
        let repo = test_repo().await;
        repo.ensure_session("s1").await.unwrap();

        let turn = repo.append_turn("s1", "Hi", "Hello").await.unwrap();
        let history = repo.load_history("s1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_input, turn.user_input);
        assert_eq!(history[0].response, turn.response);
    }

    #[tokio::test]
    async fn test_list_sessions_counts_and_pagination() {
        let repo = test_repo().await;
        repo.ensure_session("old").await.unwrap();
        repo.append_turn("old", "Hi", "Hello").await.unwrap();
        repo.append_turn("old", "Rent", "Type?").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.ensure_session("new").await.unwrap();

        let all = repo.list_sessions(None, None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].session_id, "new");
        assert_eq!(all[0].turn_count, 0);
        assert!(all[0].last_activity.is_none());
        assert_eq!(all[1].session_id, "old");
        assert_eq!(all[1].turn_count, 2);
        assert!(all[1].last_activity.is_some());

        let page = repo.list_sessions(Some(1), Some(1)).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].session_id, "old");

        let skipped = repo.list_sessions(None, Some(1)).await.unwrap();
        assert_eq!(skipped.len(), 1);
    }

    #[test]
    fn test_format_datetime_roundtrip() {
        let now = Utc::now();
        let parsed = parse_datetime(&format_datetime(&now)).unwrap();
        assert_eq!(parsed.timestamp_micros(), now.timestamp_micros());
    }
}
