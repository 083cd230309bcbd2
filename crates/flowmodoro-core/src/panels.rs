//! Visibility of the task and session-log panels.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{load_json, save_json, KvStore, LOG_VISIBLE_KEY, TASKS_VISIBLE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Tasks,
    Log,
}

impl Panel {
    fn key(self) -> &'static str {
        match self {
            Panel::Tasks => TASKS_VISIBLE_KEY,
            Panel::Log => LOG_VISIBLE_KEY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub tasks_visible: bool,
    pub log_visible: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            tasks_visible: true,
            log_visible: true,
        }
    }
}

impl PanelState {
    /// Both panels default to visible when nothing usable is stored.
    pub fn load(store: &impl KvStore) -> Self {
        Self {
            tasks_visible: load_json(store, TASKS_VISIBLE_KEY).unwrap_or(true),
            log_visible: load_json(store, LOG_VISIBLE_KEY).unwrap_or(true),
        }
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Tasks => self.tasks_visible,
            Panel::Log => self.log_visible,
        }
    }

    /// Flip one panel and persist its flag. Returns the new visibility.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write; the flag is still
    /// flipped in memory.
    pub fn toggle(&mut self, panel: Panel, store: &impl KvStore) -> Result<bool> {
        let flag = match panel {
            Panel::Tasks => &mut self.tasks_visible,
            Panel::Log => &mut self.log_visible,
        };
        *flag = !*flag;
        let visible = *flag;
        save_json(store, panel.key(), &visible)?;
        Ok(visible)
    }
}
