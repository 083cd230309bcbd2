//! Append-only history of completed work and break sessions.
//!
//! Entries are kept in insertion order (oldest first), which is also the
//! persisted order. Front ends show them newest first via [`SessionLog::newest_first`].
//!
//! On disk each entry is `{"type": "work"|"break", "time": "MM:SS"}`, so a
//! reload keeps whole seconds only.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::storage::{load_json, KvStore, SESSIONS_KEY};
use crate::timer::{format_clock, parse_clock, SessionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub kind: SessionKind,
    pub duration_ms: u64,
}

impl SessionLogEntry {
    pub fn work(duration_ms: u64) -> Self {
        Self {
            kind: SessionKind::Work,
            duration_ms,
        }
    }

    pub fn break_(duration_ms: u64) -> Self {
        Self {
            kind: SessionKind::Break,
            duration_ms,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            SessionKind::Work => "Work Session",
            SessionKind::Break => "Break Session",
        }
    }
}

/// Persisted shape of one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    #[serde(rename = "type")]
    kind: SessionKind,
    time: String,
}

/// Work and break counts, as shown in the log header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounts {
    pub work: usize,
    pub breaks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLog {
    entries: Vec<SessionLogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted log. Missing or malformed data gives an empty log;
    /// entries whose time string does not parse are dropped.
    pub fn load(store: &impl KvStore) -> Self {
        let stored: Vec<StoredEntry> = load_json(store, SESSIONS_KEY).unwrap_or_default();
        let entries = stored
            .into_iter()
            .filter_map(|s| match parse_clock(&s.time) {
                Some(duration_ms) => Some(SessionLogEntry {
                    kind: s.kind,
                    duration_ms,
                }),
                None => {
                    warn!(time = %s.time, "dropping session entry with unreadable time");
                    None
                }
            })
            .collect();
        Self { entries }
    }

    /// Write the whole log, oldest first.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn save(&self, store: &impl KvStore) -> Result<()> {
        let stored: Vec<StoredEntry> = self
            .entries
            .iter()
            .map(|e| StoredEntry {
                kind: e.kind,
                time: format_clock(e.duration_ms),
            })
            .collect();
        crate::storage::save_json(store, SESSIONS_KEY, &stored)
    }

    pub fn record(&mut self, entry: SessionLogEntry) {
        self.entries.push(entry);
    }

    /// Empty the log and drop its persisted form.
    ///
    /// # Errors
    /// Returns an error if the store rejects the removal. The in-memory log
    /// is cleared either way.
    pub fn clear(&mut self, store: &impl KvStore) -> Result<()> {
        self.entries.clear();
        store.remove(SESSIONS_KEY)?;
        Ok(())
    }

    /// Entries in insertion order, oldest first.
    pub fn entries(&self) -> &[SessionLogEntry] {
        &self.entries
    }

    /// Entries in display order.
    pub fn newest_first(&self) -> impl Iterator<Item = &SessionLogEntry> {
        self.entries.iter().rev()
    }

    pub fn counts(&self) -> SessionCounts {
        self.entries
            .iter()
            .fold(SessionCounts::default(), |mut counts, e| {
                match e.kind {
                    SessionKind::Work => counts.work += 1,
                    SessionKind::Break => counts.breaks += 1,
                }
                counts
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
