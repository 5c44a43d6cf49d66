//! Operator commands for browsing stored sessions.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use darfind_core::chat::history::HistoryFormatter;
use darfind_core::chat::repository::SessionRepository;

/// List stored sessions with creation time, turn count and last activity.
///
/// # Examples
///
/// ```bash
/// darfind sessions --limit 20
/// darfind sessions --json
/// ```
pub async fn list_sessions<R: SessionRepository>(
    repo: &R,
    limit: Option<i64>,
    offset: Option<i64>,
    json: bool,
) -> Result<()> {
    let sessions = repo.list_sessions(limit, offset).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions yet. Start one by chatting at {}",
            style("i").blue().bold(),
            style("/chatbot").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Session").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Turns").fg(Color::White),
        Cell::new("Last activity").fg(Color::White),
    ]);

    for session in &sessions {
        let last_activity = session
            .last_activity
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&session.session_id).fg(Color::Cyan),
            Cell::new(session.created_at.format("%Y-%m-%d %H:%M").to_string()),
            Cell::new(session.turn_count.to_string()),
            Cell::new(last_activity).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print a session's transcript in the same shape the model sees it.
pub async fn show_history<R: SessionRepository>(repo: &R, session_id: &str, json: bool) -> Result<()> {
    let session = repo
        .get_session(session_id)
        .await?
        .with_context(|| format!("Session '{session_id}' not found"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    println!();
    println!(
        "  Session {} (started {})",
        style(&session.session_id).cyan().bold(),
        session.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    if session.history.is_empty() {
        println!("  {}", style("(no turns recorded)").dim());
    } else {
        println!("{}", HistoryFormatter::format(&session.history));
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use darfind_infra::sqlite::pool::{DatabasePool, database_url_for};
    use darfind_infra::sqlite::session::SqliteSessionRepository;

    async fn repo_with_turn() -> (SqliteSessionRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::new(&database_url_for(dir.path())).await.unwrap();
        let repo = SqliteSessionRepository::new(pool);
        repo.ensure_session("s1").await.unwrap();
        repo.append_turn("s1", "Hi", "Rent or buy?").await.unwrap();
        (repo, dir)
    }

    #[tokio::test]
    async fn test_list_sessions_renders() {
        let (repo, _dir) = repo_with_turn().await;
        list_sessions(&repo, None, None, false).await.unwrap();
        list_sessions(&repo, Some(1), Some(0), true).await.unwrap();
    }

    #[tokio::test]
    async fn test_show_history_unknown_session_errors() {
        let (repo, _dir) = repo_with_turn().await;
        show_history(&repo, "s1", false).await.unwrap();
        let err = show_history(&repo, "missing", false).await.unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
