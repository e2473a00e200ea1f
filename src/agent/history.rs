//! Conversation history formatting

use super::models::ConversationEntry;

/// Format the last `max_turns` entries as `Q:`/`A:` pairs, most recent last.
///
/// Returns an empty string when there is no history.
pub fn format_history(history: &[ConversationEntry], max_turns: usize) -> String {
    let start = history.len().saturating_sub(max_turns);
    let recent = &history[start..];
    if recent.is_empty() {
        return String::new();
    }

    let mut out = String::from("Previous conversation:\n");
    for entry in recent {
        out.push_str(&format!("Q: {}\nA: {}\n\n", entry.query, entry.results.answer));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        assert_eq!(format_history(&[], 3), "");
    }

    #[test]
    fn test_keeps_last_three_in_order() {
        let history: Vec<_> = (1..=5)
            .map(|i| ConversationEntry::new(format!("q{}", i), format!("a{}", i)))
            .collect();

        let block = format_history(&history, 3);
        assert!(!block.contains("q2"));
        let q3 = block.find("Q: q3").unwrap();
        let q5 = block.find("Q: q5").unwrap();
        assert!(q3 < q5);
        assert!(block.contains("A: a4"));
        assert_eq!(block.matches("Q: ").count(), 3);
    }
}
