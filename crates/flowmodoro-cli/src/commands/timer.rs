//! Interactive timer.
//!
//! One `select!` loop owns the controller. Keyboard input arrives over a
//! channel from a reader thread, ticks arrive from the armed interval, and
//! both are applied one at a time.

use std::io::{BufRead, Write};
use std::time::Duration;

use clap::Args;
use flowmodoro_core::timer::{format_clock, tick_period};
use flowmodoro_core::{
    sink_from_config, Command, Config, Flowmodoro, KvStore, Mode, Panel, SystemClock, TickSource,
    TimerSnapshot,
};
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::common::{open_store, CliResult};

const BAR_WIDTH: usize = 20;

const HELP: &str = "\
keys: <enter>/s start|pause   p pause   x stop work   r reset/skip break
      R full reset   a <text> add task   t tasks   l log   T/L toggle panels
      h help   q quit";

#[derive(Args)]
pub struct RunArgs {
    /// Keep tasks and sessions in memory only
    #[arg(long)]
    ephemeral: bool,
    /// Print each snapshot as a JSON line instead of a status line
    #[arg(long)]
    json: bool,
}

/// Repeating tick backed by a tokio interval. Re-arming drops the old
/// interval, so there is never more than one.
#[derive(Default)]
pub struct IntervalTicker {
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next tick. Pends forever while disarmed.
    pub async fn next(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickSource for IntervalTicker {
    fn arm(&mut self, period: Duration) {
        self.disarm();
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    fn disarm(&mut self) {
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Timer(Command),
    FullReset,
    AddTask(String),
    ShowTasks,
    ShowLog,
    TogglePanel(Panel),
    Help,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(text) = line.strip_prefix("a ") {
        return Some(Input::AddTask(text.to_string()));
    }
    let input = match line.trim() {
        "" | "s" => Input::Timer(Command::Toggle),
        "p" => Input::Timer(Command::Pause),
        "x" => Input::Timer(Command::StopWork),
        "r" => Input::Timer(Command::Reset),
        "R" => Input::FullReset,
        "t" => Input::ShowTasks,
        "l" => Input::ShowLog,
        "T" => Input::TogglePanel(Panel::Tasks),
        "L" => Input::TogglePanel(Panel::Log),
        "h" | "?" => Input::Help,
        "q" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One status line for a snapshot.
fn render_line(snapshot: &TimerSnapshot) -> String {
    let mut line = format!("{:<18} {}", snapshot.header, snapshot.display);
    if snapshot.mode == Mode::Break {
        if let Some(ratio) = snapshot.progress {
            line.push(' ');
            line.push_str(&progress_bar(ratio, BAR_WIDTH));
        }
    }
    line.push_str(&format!(
        "  total work {}",
        format_clock(snapshot.total_work_ms)
    ));
    line
}

fn print_status(snapshot: &TimerSnapshot, json: bool) {
    let mut out = std::io::stdout().lock();
    let written = if json {
        match serde_json::to_string(snapshot) {
            Ok(text) => writeln!(out, "{text}"),
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode snapshot");
                return;
            }
        }
    } else {
        write!(out, "\r\x1b[2K{}", render_line(snapshot))
    };
    if let Err(e) = written.and_then(|()| out.flush()) {
        tracing::debug!(error = %e, "stdout unavailable");
    }
}

fn spawn_input_reader(tx: mpsc::UnboundedSender<String>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
}

pub fn run(args: RunArgs) -> CliResult {
    let config = Config::load_or_default();
    let store = open_store(args.ephemeral)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(drive(store, config, args.json))
}

async fn drive(store: Box<dyn KvStore>, config: Config, json: bool) -> CliResult {
    let mut app = Flowmodoro::load(
        store,
        IntervalTicker::new(),
        SystemClock::new(),
        sink_from_config(&config.notifications),
        tick_period(config.timer.tick_interval_ms),
    );
    app.subscribe(move |snapshot| print_status(snapshot, json));

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx);

    if !json {
        println!("{HELP}");
    }
    print_status(&app.snapshot(), json);

    loop {
        tokio::select! {
            line = rx.recv() => {
                let Some(line) = line else { break };
                match parse_input(&line) {
                    Some(Input::Quit) => break,
                    Some(Input::Timer(command)) => {
                        app.dispatch(command);
                    }
                    Some(Input::FullReset) => {
                        app.reset_session();
                    }
                    Some(Input::AddTask(text)) => {
                        if app.add_task(&text) {
                            println!("\nadded task {}", app.tasks().len());
                        }
                    }
                    Some(Input::ShowTasks) => {
                        println!();
                        if app.panels().tasks_visible {
                            super::task::print_tasks(app.tasks());
                        } else {
                            println!("(tasks hidden)");
                        }
                    }
                    Some(Input::ShowLog) => {
                        println!();
                        if app.panels().log_visible {
                            super::log::print_log(app.session_log());
                        } else {
                            println!("(log hidden)");
                        }
                    }
                    Some(Input::TogglePanel(panel)) => {
                        let visible = app.toggle_panel(panel);
                        println!("\n{panel:?} panel {}", if visible { "shown" } else { "hidden" });
                    }
                    Some(Input::Help) => println!("\n{HELP}"),
                    None => println!("\nunknown input: {line:?} (h for help)"),
                }
                if !json {
                    print_status(&app.snapshot(), json);
                }
            }
            _ = app.ticker_mut().next() => {
                app.tick();
            }
        }
    }

    if !json {
        println!();
    }
    Ok(())
}
