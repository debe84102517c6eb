//! The tool-calling workflow: exactly two model round-trips.
//!
//! Sequence: render → call → post-process → parse. If the first response
//! carries no tool calls it is the final answer. Otherwise every call is
//! dispatched in parse order, each result is appended to the conversation as
//! a `tool` message, and one more render/call cycle produces the answer.
//! The second response is never re-parsed for further calls.

use seedcall_client::{CompletionBackend, HttpCompletionBackend, PromptRenderer};
use seedcall_config::RunConfig;
use seedcall_core::message::{Conversation, Message};
use seedcall_core::tool::ToolRegistry;
use seedcall_core::Result;
use seedcall_parser::{parse_tool_calls, process_response};
use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Longest payload echoed into a step log before truncation.
const LOG_PREVIEW_LIMIT: usize = 5000;

/// Drives one demo run against a completion backend.
pub struct ToolCallWorkflow {
    config: Arc<RunConfig>,
    renderer: PromptRenderer,
    backend: Arc<dyn CompletionBackend>,
    tools: Arc<ToolRegistry>,
}

impl ToolCallWorkflow {
    pub fn new(
        config: Arc<RunConfig>,
        renderer: PromptRenderer,
        backend: Arc<dyn CompletionBackend>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            config,
            renderer,
            backend,
            tools,
        }
    }

    /// Run the conversation to its final answer.
    ///
    /// The conversation is owned by this call for the duration of the run:
    /// tool results are appended to it, the model's own messages are not.
    pub async fn run(&self, conversation: &mut Conversation) -> Result<String> {
        // ── Round 1 ──
        let prompt = self.renderer.render(conversation)?;
        info!(prompt = %preview(&prompt), "Rendered initial prompt");

        let raw = self.backend.complete(&prompt).await?;
        let response = process_response(&raw, self.config.show_thinking_tokens);
        info!(response = %preview(&response), "Model response received");

        // Tool calls are extracted from the post-processed text: a thinking
        // segment may contain delimiter-like text that must not dispatch.
        let calls = parse_tool_calls(&response);
        if calls.is_empty() {
            info!("No tool calls, model answered directly");
            return Ok(response);
        }

        // ── Dispatch, one result per call, success or failure ──
        info!(count = calls.len(), "Executing tool calls");
        for (idx, call) in calls.iter().enumerate() {
            let content = match self.tools.execute(call).await {
                Ok(output) => {
                    info!(tool = %call.name, result = %preview(&output), "Tool result");
                    output
                }
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "Tool execution failed");
                    format!("ERROR in tool '{}': {e}", call.name)
                }
            };
            conversation.push(Message::tool_result(format!("call_{idx}"), content));
        }

        // ── Round 2 — the final response is not re-parsed ──
        let final_prompt = self.renderer.render(conversation)?;
        info!(prompt = %preview(&final_prompt), "Rendered final prompt with tool results");

        let final_raw = self.backend.complete(&final_prompt).await?;
        let answer = process_response(&final_raw, self.config.show_thinking_tokens);
        info!(answer = %preview(&answer), "Final response");

        Ok(answer)
    }
}

/// Run the complete demo: load config, wire the components, ask for the
/// current time, print the answer.
pub async fn run(config_path: Option<&Path>) -> Result<()> {
    info!("Starting LLM tool calling demo");

    let tools = Arc::new(seedcall_tools::default_registry());
    let config = Arc::new(RunConfig::load(config_path).with_tools(tools.descriptors()));
    info!(
        template = %config.template_path,
        model = %config.model_name,
        "Loaded configuration"
    );

    let renderer = PromptRenderer::new(Arc::clone(&config))?;
    let backend = Arc::new(HttpCompletionBackend::new(Arc::clone(&config)));
    let workflow = ToolCallWorkflow::new(config, renderer, backend, tools);

    let mut conversation = Conversation::new();
    let user_query = "What's the current local time right now?";
    conversation.push(Message::user(user_query));
    info!(query = user_query, "User input");

    let answer = workflow.run(&mut conversation).await?;
    if answer.is_empty() {
        info!("No answer generated");
    } else {
        println!("{answer}");
    }

    Ok(())
}

/// Truncate a payload for step logging.
fn preview(text: &str) -> Cow<'_, str> {
    if text.len() <= LOG_PREVIEW_LIMIT {
        return Cow::Borrowed(text);
    }
    let mut end = LOG_PREVIEW_LIMIT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}...", &text[..end]))
}
