//! Renders stored turns as plain-text prompt context.

use darfind_types::chat::Turn;

/// Formats a session's turns into the transcript block spliced into the prompt.
///
/// Layout, one pair of lines per turn:
/// ```text
/// User: {user_input}
/// Bot: {response}
/// ```
pub struct HistoryFormatter;

impl HistoryFormatter {
    /// Render `turns` in the given order. An empty slice yields `""`.
    pub fn format(turns: &[Turn]) -> String {
        turns
            .iter()
            .map(|t| format!("User: {}\nBot: {}", t.user_input, t.response))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn turn(user_input: &str, response: &str) -> Turn {
        Turn {
            timestamp: Utc::now(),
            user_input: user_input.to_string(),
            response: response.to_string(),
        }
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(HistoryFormatter::format(&[]), "");
    }

    #[test]
    fn test_format_single_turn() {
        assert_eq!(HistoryFormatter::format(&[turn("a", "b")]), "User: a\nBot: b");
    }

    #[test]
    fn test_format_preserves_order() {
        let turns = vec![
            turn("Hi", "Rent or buy?"),
            turn("Rent", "What type of property?"),
        ];
        assert_eq!(
            HistoryFormatter::format(&turns),
            "User: Hi\nBot: Rent or buy?\nUser: Rent\nBot: What type of property?"
        );
    }

    #[test]
    fn test_format_keeps_multiline_text_verbatim() {
        let formatted = HistoryFormatter::format(&[turn("line1\nline2", "ok")]);
        assert_eq!(formatted, "User: line1\nline2\nBot: ok");
    }
}
