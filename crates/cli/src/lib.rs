//! Seedcall — a two-round tool-calling demo.
//!
//! One run renders the conversation into a prompt, sends it to a completion
//! endpoint, extracts any tool calls from the response, executes them,
//! appends the results, and asks the model once more for the final answer.

pub mod workflow;

pub use workflow::{ToolCallWorkflow, run};
