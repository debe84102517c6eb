//! Thinking-token stripping.
//!
//! When `show_thinking` is off, every `<seed:think> … </seed:think>` span is
//! removed from the model's output and the leftover blank lines are tidied
//! up. When it is on, the raw output passes through with zero transformation
//! — no trim, no collapse. That asymmetry is intentional: the switch decides
//! whether the user sees the model's reasoning verbatim.

use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::warn;

/// Begin marker for a thinking segment, as emitted by the chat template.
pub const THINK_BEGIN_TOKEN: &str = "<seed:think>";
/// End marker for a thinking segment.
pub const THINK_END_TOKEN: &str = "</seed:think>";

/// Process raw model output according to the `show_thinking` flag.
///
/// Stripping must never abort a run: if the strip pass fails for any reason
/// the raw text is returned unmodified after logging a warning.
pub fn process_response(raw_output: &str, show_thinking: bool) -> String {
    if show_thinking {
        return raw_output.to_string();
    }

    // A bug in the scanner must not kill the run; fall back to the raw text.
    match catch_unwind(AssertUnwindSafe(|| strip_thinking(raw_output))) {
        Ok(processed) => processed,
        Err(_) => {
            warn!("Failed to process thinking tokens, returning raw output");
            raw_output.to_string()
        }
    }
}

/// Remove every non-overlapping `<seed:think> … </seed:think>` span.
///
/// Spans are matched lazily: each begin marker pairs with the first end
/// marker after it, and the enclosed content may contain newlines. A begin
/// marker with no end marker is left in place. After removal, blank-line
/// runs are collapsed and the whole result is trimmed.
fn strip_thinking(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(begin) = rest.find(THINK_BEGIN_TOKEN) {
        let after_begin = begin + THINK_BEGIN_TOKEN.len();
        match rest[after_begin..].find(THINK_END_TOKEN) {
            Some(end) => {
                out.push_str(&rest[..begin]);
                rest = &rest[after_begin + end + THINK_END_TOKEN.len()..];
            }
            None => break,
        }
    }
    out.push_str(rest);

    collapse_blank_lines(&out).trim().to_string()
}

/// Collapse every "newline, optional whitespace, newline" run into exactly
/// one blank line, leaving single line breaks untouched.
fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let c = rest.chars().next().expect("index is on a char boundary");

        if c == '\n' {
            // Scan the whitespace run after this newline for a later newline.
            let mut last_newline_end = None;
            for (off, wc) in rest.char_indices().skip(1) {
                if !wc.is_whitespace() {
                    break;
                }
                if wc == '\n' {
                    last_newline_end = Some(i + off + 1);
                }
            }
            if let Some(end) = last_newline_end {
                out.push_str("\n\n");
                i = end;
                continue;
            }
        }

        out.push(c);
        i += c.len_utf8();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_thinking_passes_raw_through() {
        let raw = "  <seed:think>reasoning</seed:think>\n\n\nanswer  ";
        assert_eq!(process_response(raw, true), raw);
    }

    #[test]
    fn strips_single_span() {
        let raw = "<seed:think>let me think about this</seed:think>The answer is 4.";
        assert_eq!(process_response(raw, false), "The answer is 4.");
    }

    #[test]
    fn strips_multiline_span() {
        let raw = "<seed:think>step one\nstep two\nstep three</seed:think>\nDone.";
        assert_eq!(process_response(raw, false), "Done.");
    }

    #[test]
    fn strips_every_span_and_keeps_order() {
        let raw = "a<seed:think>x</seed:think>b<seed:think>y</seed:think>c";
        assert_eq!(process_response(raw, false), "abc");
    }

    #[test]
    fn spans_pair_lazily() {
        // The first end marker closes the span; the second survives as text.
        let raw = "<seed:think>a</seed:think>keep</seed:think>";
        assert_eq!(process_response(raw, false), "keep</seed:think>");
    }

    #[test]
    fn unterminated_begin_marker_is_left_in_place() {
        let raw = "before <seed:think>never closed";
        assert_eq!(process_response(raw, false), "before <seed:think>never closed");
    }

    #[test]
    fn marker_free_output_is_trimmed_only() {
        let raw = "  plain answer  ";
        assert_eq!(process_response(raw, false), "plain answer");
    }

    #[test]
    fn processing_is_idempotent() {
        let raw = "<seed:think>x</seed:think>\n\n\n\nanswer";
        let once = process_response(raw, false);
        let twice = process_response(&once, false);
        assert_eq!(once, twice);
        assert_eq!(once, "answer");
    }

    #[test]
    fn blank_line_runs_collapse_to_one() {
        let raw = "first<seed:think>x</seed:think>\n\n\n\nsecond";
        assert_eq!(process_response(raw, false), "first\n\nsecond");
    }

    #[test]
    fn whitespace_only_lines_collapse_too() {
        assert_eq!(collapse_blank_lines("a\n  \t\nb"), "a\n\nb");
    }

    #[test]
    fn single_line_breaks_survive() {
        assert_eq!(collapse_blank_lines("a\nb\nc"), "a\nb\nc");
    }

    #[test]
    fn markers_are_case_sensitive() {
        let raw = "<SEED:THINK>x</SEED:THINK>answer";
        assert_eq!(process_response(raw, false), raw.trim());
    }

    #[test]
    fn surrounding_text_order_intact() {
        let raw = "one <seed:think>a</seed:think>two <seed:think>b</seed:think>three";
        assert_eq!(process_response(raw, false), "one two three");
    }
}
