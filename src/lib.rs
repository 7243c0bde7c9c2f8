//! # bulksms-rs
//!
//! A bulk SMS campaign gateway written in Rust. Turns spreadsheet
//! selections into batched, deduplicated dispatches through an upstream SMS
//! provider, with per-batch result classification.
//!
//! ## Features
//!
//! - **Mapping validation**: normalizes the operator's column/row selection
//!   into a descriptor, or the first applicable rejection in a fixed order
//! - **Row extraction**: phone normalization with first-seen deduplication
//! - **Batching**: contiguous chunks under a hard 10000-entry payload ceiling
//! - **Sequential dispatch**: one batch in flight at a time, one verdict per
//!   batch, fail-open across batches
//! - **Gateway proxy**: HTTP endpoint that forwards batch payloads to the
//!   upstream provider and normalizes its reply
//! - **Result ledger**: append-only, newest-first per-recipient outcomes
//!
//! ## Quick Start - Pipeline
//!
//! ```rust
//! use bulksms_rs::{ColumnSelection, HeaderMeta, RowBounds, validate};
//!
//! let header = HeaderMeta {
//!     row_count: 2,
//!     column_count: 3,
//!     start_row_index: 1,
//!     column_index: 0,
//! };
//! let selection = ColumnSelection {
//!     phone: Some(1),
//!     vars: vec![2],
//! };
//!
//! let mapping = validate(&header, &selection, &RowBounds::default(), 100, 1)?;
//! assert_eq!(mapping.phone_index, 1);
//! # Ok::<(), bulksms_rs::MappingRejection>(())
//! ```
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use bulksms_rs::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// Public module exports
pub mod config;
pub mod core;
pub mod server;
pub mod upstream;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

// Export the core pipeline
pub use core::dispatch::{
    BatchTransport, DispatchError, DispatchSummary, Dispatcher, DispatcherState, HttpProxyClient,
    TransportFailure,
};
pub use core::extract::{CellValue, Recipient, extract, normalize_phone};
pub use core::mapping::{
    ColumnSelection, HeaderMeta, MappingDescriptor, MappingRejection, RowBounds, validate,
};
pub use core::payload::{GatewayPayload, MAX_ENTRIES_PER_PAYLOAD, MessageEntry, ProxyResult};
pub use core::result_log::{DeliveryStatus, LogEntry, ResultLog};
pub use core::template::{PLACEHOLDER, count_placeholders, render};

use tracing::info;

/// A gateway proxy instance: configuration plus the HTTP server.
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!(
            host = %self.config.server().host,
            port = self.config.server().port,
            "Starting Bulk SMS Gateway"
        );

        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
