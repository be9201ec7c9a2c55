//! Call one tool

use anyhow::Context;
use serde_json::Value;

use super::Session;
use cmmc_query::output::{CallResult, OutputMode};

/// Call a tool with JSON parameters and print the response
pub fn call(session: &Session, tool: &str, params: &str, mode: OutputMode) -> anyhow::Result<()> {
    let params: Value =
        serde_json::from_str(params).context("--params must be a JSON object")?;

    let result = CallResult {
        tool: tool.to_string(),
        envelope: session.router.call(tool, &params),
    };
    result.render(mode);

    if !result.succeeded() {
        std::process::exit(1);
    }

    Ok(())
}
