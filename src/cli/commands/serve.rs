//! Serve tool calls over stdio
//!
//! One JSON request per input line, one response envelope per output line.
//! Logs go to stderr so stdout carries only responses.

use std::io::{self, BufRead, Write};

use super::Session;
use cmmc_query::api::Tool;

/// Answer requests until stdin closes
pub fn serve(session: &Session) -> anyhow::Result<()> {
    log::info!("Serving {} tools on stdio", Tool::ALL.len());

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut answered = 0_usize;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(stdout, "{}", session.router.handle_line(&line))?;
        stdout.flush()?;
        answered += 1;
    }

    log::info!("Input closed after {answered} request(s)");
    Ok(())
}
