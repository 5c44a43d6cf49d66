//! Chat session and turn types for DarFind.
//!
//! A session is one conversation with a visitor, addressed by an opaque
//! token that travels in the `session_id` cookie. Its history is an
//! append-only list of turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted conversation scoped by an opaque identifier.
///
/// `created_at` is set once when the session is first stored and never
/// changes afterwards. `history` is in persistence order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub history: Vec<Turn>,
}

impl Session {
    /// A fresh session with an empty history, stamped with the current time.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            created_at: Utc::now(),
            history: Vec::new(),
        }
    }
}

/// One user-input / model-reply pair within a session.
///
/// Turns are immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub timestamp: DateTime<Utc>,
    pub user_input: String,
    pub response: String,
}

/// Lightweight listing row for a stored session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub turn_count: u32,
    /// Timestamp of the most recent turn, if any.
    pub last_activity: Option<DateTime<Utc>>,
}
