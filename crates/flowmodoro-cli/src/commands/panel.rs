use clap::{Subcommand, ValueEnum};
use flowmodoro_core::{KvStore, Panel, PanelState};

use crate::common::{open_store, CliResult};

#[derive(Clone, Copy, ValueEnum)]
pub enum PanelArg {
    Tasks,
    Log,
}

impl From<PanelArg> for Panel {
    fn from(arg: PanelArg) -> Self {
        match arg {
            PanelArg::Tasks => Panel::Tasks,
            PanelArg::Log => Panel::Log,
        }
    }
}

#[derive(Subcommand)]
pub enum PanelAction {
    /// Print panel visibility as JSON
    Show,
    /// Show a hidden panel or hide a shown one
    Toggle { panel: PanelArg },
}

pub fn run(action: PanelAction) -> CliResult {
    let store = open_store(false)?;
    run_with(action, &store)
}

fn run_with(action: PanelAction, store: &impl KvStore) -> CliResult {
    let mut panels = PanelState::load(store);
    match action {
        PanelAction::Show => {
            println!("{}", serde_json::to_string_pretty(&panels)?);
        }
        PanelAction::Toggle { panel } => {
            let panel = Panel::from(panel);
            let visible = panels.toggle(panel, store)?;
            println!("{panel:?}: {}", if visible { "visible" } else { "hidden" });
        }
    }
    Ok(())
}
