//! Core pipeline
//!
//! Template analysis, mapping validation, row extraction, batching,
//! dispatch, and the result ledger. Everything here is independent of the
//! HTTP layer; the dispatcher reaches the gateway proxy through the
//! [`BatchTransport`](dispatch::BatchTransport) seam.

pub mod batch;
pub mod dispatch;
pub mod extract;
pub mod mapping;
pub mod payload;
pub mod result_log;
pub mod template;
