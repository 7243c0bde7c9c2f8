//! Per-recipient outcome ledger
//!
//! Append-only, newest first. The dispatcher is the single writer; readers
//! take snapshots. Cleared only by an explicit reset (e.g. when a mapping
//! is discarded) and never persisted across restarts.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Outcome of a dispatch attempt for one recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Success,
    Failed,
}

impl DeliveryStatus {
    /// Display text shown in the log table.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Success => "Success",
            DeliveryStatus::Failed => "Failed",
        }
    }
}

/// One per-recipient outcome row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub phone: String,
    pub status: DeliveryStatus,
    pub detail: String,
}

/// Append-only ledger of per-recipient outcomes, newest first.
#[derive(Debug, Default)]
pub struct ResultLog {
    entries: Mutex<VecDeque<LogEntry>>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry at the head of the ledger.
    pub fn push(&self, entry: LogEntry) {
        self.entries.lock().push_front(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Snapshot of the ledger, newest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Empties the ledger. Explicit reset only; nothing evicts entries
    /// automatically.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
