//! Current-local-time tool.

use async_trait::async_trait;
use chrono::Local;
use seedcall_core::error::ToolError;
use seedcall_core::tool::Tool;

/// Fixed output format: date, time, numeric UTC offset.
/// chrono has no zone abbreviations for `Local`, so the offset stands alone.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

pub struct LocalTimeTool;

#[async_trait]
impl Tool for LocalTimeTool {
    fn name(&self) -> &str {
        "get_current_local_time"
    }

    fn description(&self) -> &str {
        "Retrieves the current local date and time. Use when the user asks for the current time."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        _arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<String, ToolError> {
        Ok(Local::now().format(TIME_FORMAT).to_string())
    }
}
