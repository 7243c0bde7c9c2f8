//! Upstream gateway integration
//!
//! Forwarding of validated batch payloads to the upstream SMS provider and
//! the append-only diagnostic trail of every round trip.

pub mod forwarder;
pub mod trail;

pub use forwarder::UpstreamForwarder;
pub use trail::{DiagnosticTrail, TrailRecord};
