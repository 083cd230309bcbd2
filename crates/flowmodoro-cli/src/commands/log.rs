use clap::Subcommand;
use flowmodoro_core::timer::format_clock;
use flowmodoro_core::{KvStore, SessionKind, SessionLog};
use serde::Serialize;

use crate::common::{open_store, CliResult};

#[derive(Subcommand)]
pub enum LogAction {
    /// Show completed sessions, newest first
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Delete the whole session history
    Clear,
}

#[derive(Serialize)]
struct LogRow {
    #[serde(rename = "type")]
    kind: SessionKind,
    time: String,
    duration_ms: u64,
}

pub fn print_log(log: &SessionLog) {
    let counts = log.counts();
    println!("Session Log ({} Work, {} Break)", counts.work, counts.breaks);
    for entry in log.newest_first() {
        println!("  {:<14} {}", entry.label(), format_clock(entry.duration_ms));
    }
}

pub fn run(action: LogAction) -> CliResult {
    let store = open_store(false)?;
    run_with(action, &store)
}

fn run_with(action: LogAction, store: &impl KvStore) -> CliResult {
    let mut log = SessionLog::load(store);
    match action {
        LogAction::Show { json } => {
            if json {
                let rows: Vec<LogRow> = log
                    .newest_first()
                    .map(|e| LogRow {
                        kind: e.kind,
                        time: format_clock(e.duration_ms),
                        duration_ms: e.duration_ms,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print_log(&log);
            }
        }
        LogAction::Clear => {
            log.clear(store)?;
            println!("session log cleared");
        }
    }
    Ok(())
}
