//! Jinja chat-template rendering.
//!
//! The template file is loaded and compiled once at construction; a missing
//! file and a template that fails to compile are distinct fatal errors.
//! Rendering expands the conversation plus the tool descriptor list into the
//! prompt string the completion endpoint expects.

use minijinja::{Environment, context};
use seedcall_config::RunConfig;
use seedcall_core::error::TemplateError;
use seedcall_core::message::Conversation;
use std::path::Path;
use std::sync::Arc;

const TEMPLATE_NAME: &str = "chat";

/// Renders prompts from a compiled Jinja chat template.
#[derive(Debug)]
pub struct PromptRenderer {
    config: Arc<RunConfig>,
    env: Environment<'static>,
}

impl PromptRenderer {
    /// Load and compile the template named in the config.
    pub fn new(config: Arc<RunConfig>) -> Result<Self, TemplateError> {
        let path = Path::new(&config.template_path);
        let source = std::fs::read_to_string(path).map_err(|_| TemplateError::NotFound {
            path: path.to_path_buf(),
        })?;

        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, source)
            .map_err(|e| TemplateError::Compile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(Self { config, env })
    }

    /// Render the conversation into a prompt string.
    ///
    /// The template sees the same context keys the Seed-OSS chat template
    /// defines: `messages`, `tools`, `use_json_tooldef`, `thinking_budget`,
    /// `add_generation_prompt`, `show_thinking_tokens`.
    pub fn render(&self, conversation: &Conversation) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| TemplateError::Render(e.to_string()))?;

        template
            .render(context! {
                messages => minijinja::Value::from_serialize(&conversation.messages),
                tools => minijinja::Value::from_serialize(&self.config.tools),
                use_json_tooldef => self.config.use_json_tooldef,
                thinking_budget => self.config.thinking_budget,
                add_generation_prompt => self.config.add_generation_prompt,
                show_thinking_tokens => self.config.show_thinking_tokens,
            })
            .map_err(|e| TemplateError::Render(e.to_string()))
    }
}
