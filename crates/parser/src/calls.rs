//! Tool-call extraction from free-text model output.
//!
//! Grammar (tag names case-insensitive, values may span newlines):
//!
//! ```text
//! function_block := "<function=" NAME ">" PARAM_BLOCK* "</function>"
//! PARAM_BLOCK    := "<parameter=" NAME ">" VALUE "</parameter>"
//! ```
//!
//! The scanner walks the output left to right. A function block ends at the
//! first `</function>` after its start; parameter blocks inside the body are
//! scanned the same way. Duplicate parameter names follow map-assignment
//! semantics: the last occurrence wins. Parameter values are tentatively
//! decoded as JSON and fall back to the raw trimmed string — this is
//! best-effort typed-value recovery, never validation against the tool's
//! declared schema.

use seedcall_core::tool::ToolCall;
use serde_json::Value;

const FUNCTION_OPEN: &str = "<function=";
const FUNCTION_CLOSE: &str = "</function>";
const PARAMETER_OPEN: &str = "<parameter=";
const PARAMETER_CLOSE: &str = "</parameter>";

/// Extract every tool call from model output, in order of appearance.
///
/// Output with no function blocks yields an empty vector, never an error.
pub fn parse_tool_calls(llm_output: &str) -> Vec<ToolCall> {
    let mut calls = Vec::new();
    let mut cursor = 0;

    while let Some(open) = find_ignore_ascii_case(llm_output, FUNCTION_OPEN, cursor) {
        let name_start = open + FUNCTION_OPEN.len();
        let Some(gt) = llm_output[name_start..].find('>') else {
            break;
        };
        // The name is the raw text between '=' and '>'; it needs at least
        // one character, otherwise this is not a function block.
        if gt == 0 {
            cursor = open + 1;
            continue;
        }
        let body_start = name_start + gt + 1;

        let Some(close) = find_ignore_ascii_case(llm_output, FUNCTION_CLOSE, body_start) else {
            // No closing tag ahead means no block can start here or later.
            break;
        };

        let name = llm_output[name_start..name_start + gt].trim();
        let body = &llm_output[body_start..close];
        calls.push(ToolCall {
            name: name.to_string(),
            arguments: parse_parameters(body),
        });

        cursor = close + FUNCTION_CLOSE.len();
    }

    calls
}

/// Scan a function block body for parameter blocks.
fn parse_parameters(body: &str) -> serde_json::Map<String, Value> {
    let mut params = serde_json::Map::new();
    let mut cursor = 0;

    while let Some(open) = find_ignore_ascii_case(body, PARAMETER_OPEN, cursor) {
        let name_start = open + PARAMETER_OPEN.len();
        let Some(gt) = body[name_start..].find('>') else {
            break;
        };
        if gt == 0 {
            cursor = open + 1;
            continue;
        }
        let value_start = name_start + gt + 1;

        let Some(close) = find_ignore_ascii_case(body, PARAMETER_CLOSE, value_start) else {
            break;
        };

        let name = body[name_start..name_start + gt].trim();
        let value = coerce_value(&body[value_start..close]);
        // Map insertion: a duplicate name overwrites the earlier value.
        params.insert(name.to_string(), value);

        cursor = close + PARAMETER_CLOSE.len();
    }

    params
}

/// Best-effort typed-value recovery: JSON if it decodes, raw string if not.
fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}

/// Case-insensitive literal search starting at `from` (byte offset).
///
/// The needles are ASCII tag fragments, so ASCII case folding matches the
/// grammar's case-insensitive tag names.
fn find_ignore_ascii_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if from + n.len() > h.len() {
        return None;
    }
    h[from..]
        .windows(n.len())
        .position(|window| window.eq_ignore_ascii_case(n))
        .map(|pos| pos + from)
}
