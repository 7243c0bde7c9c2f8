//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::config::Config;
use crate::upstream::forwarder::UpstreamForwarder;
use crate::upstream::trail::DiagnosticTrail;
use crate::utils::error::Result;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for sharing across worker threads.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Upstream forwarder
    pub forwarder: Arc<UpstreamForwarder>,
    /// Diagnostic trail of every proxy round trip
    pub trail: Arc<DiagnosticTrail>,
}

impl AppState {
    /// Create the shared state, wiring the forwarder to the trail.
    pub fn new(config: Config) -> Result<Self> {
        let trail = Arc::new(DiagnosticTrail::new());
        let forwarder = Arc::new(UpstreamForwarder::new(config.upstream(), Arc::clone(&trail))?);

        Ok(Self {
            config: Arc::new(config),
            forwarder,
            trail,
        })
    }
}
