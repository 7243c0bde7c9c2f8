//! Append-only diagnostic trail of upstream round trips
//!
//! One record per proxy request, written before the verdict is computed so
//! the trail exists even when the verdict is failure. Appends are
//! serialized; readers take snapshots.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;

/// Payload preview length recorded per request.
pub(crate) const PAYLOAD_PREVIEW_LIMIT: usize = 15_000;
/// Upstream body preview length recorded per response.
pub(crate) const BODY_PREVIEW_LIMIT: usize = 2_000;

/// One recorded request/response pair.
#[derive(Debug, Clone, Serialize)]
pub struct TrailRecord {
    pub at: DateTime<Utc>,
    pub payload_preview: String,
    /// Upstream HTTP status; `None` when the request never completed
    pub upstream_status: Option<u16>,
    pub transport_error: Option<String>,
    pub body_preview: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub job_id: Option<String>,
}

/// Append-only record of every proxy round trip.
#[derive(Debug, Default)]
pub struct DiagnosticTrail {
    records: Mutex<Vec<TrailRecord>>,
}

impl DiagnosticTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record. Records are never mutated or evicted.
    pub fn record(&self, record: TrailRecord) {
        self.records.lock().push(record);
    }

    /// Number of recorded round trips.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Snapshot in insertion order.
    pub fn records(&self) -> Vec<TrailRecord> {
        self.records.lock().clone()
    }
}

/// Truncates a preview without splitting a UTF-8 character.
pub(crate) fn preview(s: &str, limit: usize) -> String {
    if s.len() <= limit {
        return s.to_string();
    }
    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}
