//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

use crate::adapters::toml::RejectedSource;
use crate::api::ToolInfo;
use crate::core::models::Revision;
use crate::core::services::IndexStats;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Result of listing tools
#[derive(Debug, Serialize)]
pub struct ToolListResult {
    /// Every tool
    pub tools: Vec<ToolInfo>,
}

/// Result of one tool call
#[derive(Debug)]
pub struct CallResult {
    /// Tool name as requested
    pub tool: String,
    /// Response envelope text
    pub envelope: String,
}

/// Counts for one revision
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RevisionStats {
    /// Revision
    pub revision: Revision,
    /// Counts
    #[serde(flatten)]
    pub stats: IndexStats,
}

/// Result of the stats command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResult {
    /// Crate version
    pub version: &'static str,
    /// Source files that contributed
    pub sources_loaded: usize,
    /// Source files that were skipped
    pub sources_rejected: Vec<RejectedSource>,
    /// Counts per revision
    pub revisions: Vec<RevisionStats>,
    /// Crosswalk mappings
    pub mappings: usize,
    /// Controls with ODP values
    pub odp_sets: usize,
    /// Guidance entries
    pub guidance_entries: usize,
    /// Snapshot handoff file
    pub bridge_path: String,
}

impl ToolListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("Tools:\n");
        for tool in &self.tools {
            println!("  {}", tool.name.bold());
            println!("      {}", tool.description);
        }
        println!("\nRun: cmmc-query call <tool> --params '{{...}}'");
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

impl CallResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => println!("{}", self.envelope),
        }
    }

    /// Whether the envelope reports success
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.parsed().and_then(|v| v.get("success").and_then(Value::as_bool)).unwrap_or(false)
    }

    fn parsed(&self) -> Option<Value> {
        serde_json::from_str(&self.envelope).ok()
    }

    fn render_human(&self) {
        let Some(response) = self.parsed() else {
            println!("{}", self.envelope);
            return;
        };

        if let Some(error) = response.get("error") {
            let message = error.get("message").and_then(Value::as_str).unwrap_or("unknown error");
            eprintln!("{} {}: {message}", "error".red().bold(), self.tool);
            return;
        }

        let data = response.get("data").cloned().unwrap_or(Value::Null);
        if data.get("found").and_then(Value::as_bool) == Some(false) {
            let message = data.get("message").and_then(Value::as_str).unwrap_or("not found");
            println!("{} {message}", "not found:".yellow());
            return;
        }

        println!("{}", self.tool.green().bold());
        println!("{}", serde_json::to_string_pretty(&data).unwrap_or_default());
    }
}

impl StatsResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        println!("cmmc-query v{}\n", self.version);
        println!("Sources loaded: {}", self.sources_loaded);
        for rejected in &self.sources_rejected {
            println!(
                "  {} {}: {}",
                "skipped".yellow(),
                rejected.path.display(),
                rejected.reason
            );
        }

        println!();
        for r in &self.revisions {
            println!(
                "  {}  {} families, {} controls, {} objectives",
                r.revision.to_string().bold(),
                r.stats.families,
                r.stats.controls,
                r.stats.objectives
            );
        }

        println!("\nCrosswalk mappings: {}", self.mappings);
        println!("ODP sets:           {}", self.odp_sets);
        println!("Guidance entries:   {}", self.guidance_entries);
        println!("Snapshot bridge:    {}", self.bridge_path);
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}
