//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{self, Session};
use cmmc_query::output::OutputMode;

/// cmmc-query - CMMC Level 2 reference-data query engine
#[derive(Parser, Debug)]
#[command(
    name = "cmmc-query",
    version,
    about = "Query NIST SP 800-171 controls, crosswalks and SPRS scoring",
    long_about = "Answer structured questions about CMMC Level 2 controls.\n\n\
                  Reference data is loaded from TOML sources in the data directory.\n\
                  Assessment snapshots are exchanged through a JSON bridge file."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory of catalog sources (overrides config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Snapshot bridge file (overrides config)
    #[arg(long, global = true)]
    pub bridge: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every tool with its parameter schema
    Tools,

    /// Call one tool
    Call {
        /// Tool name (see `tools`)
        tool: String,

        /// Parameters as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,
    },

    /// Answer line-delimited JSON tool calls on stdin
    Serve,

    /// Show what the catalog loaded
    Stats,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let session = || Session::open(cli.data_dir.clone(), cli.bridge.clone());

    match cli.command {
        Some(Command::Tools) => commands::tools(output_mode),
        Some(Command::Call { ref tool, ref params }) => {
            commands::call(&session(), tool, params, output_mode)
        },
        Some(Command::Serve) => commands::serve(&session()),
        Some(Command::Stats) => commands::stats(&session(), output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": cmmc_query::VERSION
                    })
                );
            } else {
                println!("cmmc-query v{}", cmmc_query::VERSION);
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": cmmc_query::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("cmmc-query v{}", cmmc_query::VERSION);
                println!("\nRun 'cmmc-query --help' for usage");
                println!("Run 'cmmc-query tools' to list available tools");
            }
            Ok(())
        },
    }
}
