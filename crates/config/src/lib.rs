//! Configuration loading for Seedcall.
//!
//! A [`RunConfig`] is built exactly once at startup and never mutated after
//! construction: defaults first, then environment variable overrides, then
//! config-file overrides (the file wins ties), then the tool descriptor list
//! is attached. Components receive it behind an `Arc` — there is no global
//! configuration lookup anywhere.
//!
//! A malformed or unreadable config file is never fatal: the loader logs a
//! warning and the run continues on defaults/environment values.

use seedcall_core::tool::ToolDescriptor;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Immutable snapshot of everything a demo run needs.
#[derive(Clone)]
pub struct RunConfig {
    /// API key sent as a bearer token
    pub api_key: String,

    /// Base URL of the completion endpoint (e.g. "http://localhost:8080/v1")
    pub base_url: String,

    /// Model identifier sent with each request
    pub model_name: String,

    /// Path to the Jinja chat template file
    pub template_path: String,

    /// Render tool definitions as JSON instead of the template's native form
    pub use_json_tooldef: bool,

    /// Ask the template to append the generation prompt
    pub add_generation_prompt: bool,

    /// Whether to show thinking tokens in model responses (not just prompts)
    pub show_thinking_tokens: bool,

    /// Maximum tokens the model may generate per call
    pub max_tokens: u32,

    /// Thinking-token budget; -1 means no limit
    pub thinking_budget: i64,

    /// Descriptors of the tools the model may call
    pub tools: Vec<ToolDescriptor>,
}

fn default_api_key() -> String {
    "your-api-key-here".into()
}
fn default_base_url() -> String {
    "http://localhost:8080/v1".into()
}
fn default_model_name() -> String {
    "Seed-OSS".into()
}
fn default_template_path() -> String {
    "seed_oss_chat_template.jinja".into()
}
fn default_max_tokens() -> u32 {
    65536
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            model_name: default_model_name(),
            template_path: default_template_path(),
            use_json_tooldef: false,
            add_generation_prompt: true,
            show_thinking_tokens: false,
            max_tokens: default_max_tokens(),
            thinking_budget: -1,
            tools: Vec::new(),
        }
    }
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .field("template_path", &self.template_path)
            .field("use_json_tooldef", &self.use_json_tooldef)
            .field("add_generation_prompt", &self.add_generation_prompt)
            .field("show_thinking_tokens", &self.show_thinking_tokens)
            .field("max_tokens", &self.max_tokens)
            .field("thinking_budget", &self.thinking_budget)
            .field("tools", &self.tools.len())
            .finish()
    }
}

/// Optional per-field overrides read from a JSON config file.
///
/// Unknown fields in the file are ignored; known fields are applied by
/// direct assignment over the env-resolved config.
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    api_key: Option<String>,
    base_url: Option<String>,
    model_name: Option<String>,
    template_path: Option<String>,
    use_json_tooldef: Option<bool>,
    add_generation_prompt: Option<bool>,
    show_thinking_tokens: Option<bool>,
    max_tokens: Option<u32>,
    thinking_budget: Option<i64>,
}

impl RunConfig {
    /// Load configuration: defaults < environment < config file.
    ///
    /// Never fails — configuration problems are logged and the run
    /// continues with whatever was resolved so far.
    pub fn load(config_path: Option<&Path>) -> Self {
        let mut config = Self::default();
        config.apply_env_from(|key| std::env::var(key).ok());

        if let Some(path) = config_path {
            match load_file_overrides(path) {
                Ok(overrides) => {
                    config.apply_file_overrides(overrides);
                    info!(path = %path.display(), "Applied config file overrides");
                }
                Err(ConfigError::NotFound { .. }) => {
                    info!(path = %path.display(), "No config file found, using defaults");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not load config file");
                }
            }
        }

        config
    }

    /// Attach the tool descriptor list. Called once, after which the config
    /// is shared read-only.
    pub fn with_tools(mut self, tools: Vec<ToolDescriptor>) -> Self {
        self.tools = tools;
        self
    }

    /// Apply environment overrides from the given lookup function.
    ///
    /// Recognized keys: `LLM_API_KEY`, `LLM_BASE_URL`, `LLM_MODEL_NAME`,
    /// `TEMPLATE_PATH`, `MAX_TOKENS`, `SHOW_THINKING_TOKENS`.
    fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(key) = get("LLM_API_KEY") {
            self.api_key = key;
        }
        if let Some(url) = get("LLM_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = get("LLM_MODEL_NAME") {
            self.model_name = model;
        }
        if let Some(path) = get("TEMPLATE_PATH") {
            self.template_path = path;
        }
        if let Some(raw) = get("MAX_TOKENS") {
            match raw.trim().parse::<u32>() {
                Ok(n) => self.max_tokens = n,
                Err(_) => warn!(value = %raw, "Ignoring non-numeric MAX_TOKENS"),
            }
        }
        if let Some(raw) = get("SHOW_THINKING_TOKENS") {
            self.show_thinking_tokens = is_truthy(&raw);
        }
    }

    fn apply_file_overrides(&mut self, overrides: FileOverrides) {
        if let Some(v) = overrides.api_key {
            self.api_key = v;
        }
        if let Some(v) = overrides.base_url {
            self.base_url = v;
        }
        if let Some(v) = overrides.model_name {
            self.model_name = v;
        }
        if let Some(v) = overrides.template_path {
            self.template_path = v;
        }
        if let Some(v) = overrides.use_json_tooldef {
            self.use_json_tooldef = v;
        }
        if let Some(v) = overrides.add_generation_prompt {
            self.add_generation_prompt = v;
        }
        if let Some(v) = overrides.show_thinking_tokens {
            self.show_thinking_tokens = v;
        }
        if let Some(v) = overrides.max_tokens {
            self.max_tokens = v;
        }
        if let Some(v) = overrides.thinking_budget {
            self.thinking_budget = v;
        }
    }
}

/// Accepted truthy spellings for boolean environment flags.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

fn load_file_overrides(path: &Path) -> Result<FileOverrides, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Configuration errors. All of them are recoverable: the loader logs and
/// keeps the defaults/environment values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found at {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },
}
