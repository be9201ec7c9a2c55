//! List tools

use cmmc_query::api::QueryRouter;
use cmmc_query::output::{OutputMode, ToolListResult};

/// List every tool with its description and schema
pub fn tools(mode: OutputMode) -> anyhow::Result<()> {
    let result = ToolListResult {
        tools: QueryRouter::tools(),
    };
    result.render(mode);
    Ok(())
}
