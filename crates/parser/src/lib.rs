//! Response post-processing and tool-call extraction.
//!
//! Seed-OSS-style templates make the model emit two kinds of delimited
//! regions in otherwise free text: reasoning wrapped in
//! `<seed:think> … </seed:think>`, and tool invocations written as
//! `<function=name><parameter=key>value</parameter></function>` blocks.
//!
//! Both delimiter grammars are handled by small hand-written scanners rather
//! than regexes, so the lazy shortest-span matching and last-write-wins
//! duplicate handling are explicit, testable behavior.

pub mod calls;
pub mod thinking;

pub use calls::parse_tool_calls;
pub use thinking::{THINK_BEGIN_TOKEN, THINK_END_TOKEN, process_response};
