//! Post-processing of the agent's final text.
//!
//! Separates the model's `<think>` reasoning from the answer and picks the
//! first paragraph as the direct answer. Pure string slicing.

use serde::{Deserialize, Serialize};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Returned when the answer has no non-blank paragraph.
pub const NO_DIRECT_ANSWER: &str = "No direct answer available.";

/// Agent output split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// First paragraph of the answer.
    pub direct_answer: String,
    /// Whole answer with the reasoning block removed.
    pub full_response: String,
    /// Reasoning found between the think markers, or empty.
    pub thinking: String,
}

/// Split raw agent output into reasoning, direct answer and full response.
pub fn summarize(raw_output: &str) -> Summary {
    let normalized = raw_output.replace("\r\n", "\n");
    let (thinking, answer) = split_thinking(&normalized);

    let direct_answer = answer
        .split("\n\n")
        .map(str::trim)
        .find(|p| !p.is_empty())
        .unwrap_or(NO_DIRECT_ANSWER)
        .to_string();

    Summary {
        direct_answer,
        full_response: answer,
        thinking,
    }
}

/// Returns `(thinking, remaining_text)`.
fn split_thinking(text: &str) -> (String, String) {
    let bounds = text.find(THINK_OPEN).and_then(|start| {
        text[start..]
            .find(THINK_CLOSE)
            .map(|offset| (start, start + offset))
    });

    match bounds {
        Some((start, end)) => {
            let thinking = text[start + THINK_OPEN.len()..end].trim().to_string();
            let before = &text[..start];
            let after = text[end + THINK_CLOSE.len()..].trim();
            let remaining = format!("{}{}", before, after).trim().to_string();
            (thinking, remaining)
        }
        None => (String::new(), text.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_think_block_is_split_out() {
        let summary = summarize("<think>A</think>B\n\nC");
        assert_eq!(summary.thinking, "A");
        assert_eq!(summary.direct_answer, "B");
        assert_eq!(summary.full_response, "B\n\nC");
    }

    #[test]
    fn test_think_block_with_surrounding_whitespace() {
        let raw = "<think>\n  The user wants a laptop.\n</think>\n\nThe HP Pavilion 15 fits.\n\nIt costs ₹49,990.";
        let summary = summarize(raw);
        assert_eq!(summary.thinking, "The user wants a laptop.");
        assert_eq!(summary.direct_answer, "The HP Pavilion 15 fits.");
        assert_eq!(summary.full_response, "The HP Pavilion 15 fits.\n\nIt costs ₹49,990.");
    }

    #[test]
    fn test_single_paragraph_without_markers() {
        let summary = summarize("  Rust is a systems language.\nIt is memory safe.  ");
        assert_eq!(summary.direct_answer, "Rust is a systems language.\nIt is memory safe.");
        assert_eq!(summary.thinking, "");
    }

    #[test]
    fn test_empty_input() {
        let summary = summarize("");
        assert_eq!(summary.direct_answer, NO_DIRECT_ANSWER);
        assert_eq!(summary.full_response, "");
        assert_eq!(summary.thinking, "");
    }

    #[test]
    fn test_only_thinking() {
        let summary = summarize("<think>nothing useful</think>");
        assert_eq!(summary.thinking, "nothing useful");
        assert_eq!(summary.direct_answer, NO_DIRECT_ANSWER);
    }

    #[test]
    fn test_unclosed_think_is_left_alone() {
        let summary = summarize("<think>still reasoning\n\nanswer");
        assert_eq!(summary.thinking, "");
        assert_eq!(summary.direct_answer, "<think>still reasoning");
    }

    #[test]
    fn test_close_before_open_is_not_a_block() {
        let summary = summarize("</think>stray\n\n<think>open");
        assert_eq!(summary.thinking, "");
        assert_eq!(summary.direct_answer, "</think>stray");
    }

    #[test]
    fn test_blank_leading_paragraphs_are_skipped() {
        let summary = summarize("\n\n   \n\nFirst real paragraph\n\nSecond");
        assert_eq!(summary.direct_answer, "First real paragraph");
    }

    #[test]
    fn test_crlf_paragraphs() {
        let summary = summarize("Answer line\r\n\r\nDetails");
        assert_eq!(summary.direct_answer, "Answer line");
        assert_eq!(summary.full_response, "Answer line\n\nDetails");
    }
}
