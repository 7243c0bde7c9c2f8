//! Batch dispatch over the gateway proxy
//!
//! Drives one send operation: re-validates the inputs against the campaign
//! snapshot, extracts and batches the recipients, submits each batch through
//! the transport seam, classifies the proxy verdict, and records one log
//! entry per recipient. Batches are strictly sequential; a failed batch
//! never stops the remaining ones.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::config::models::CampaignSettings;
use crate::core::batch;
use crate::core::extract::{self, CellValue};
use crate::core::mapping::MappingDescriptor;
use crate::core::payload::{GatewayPayload, ProxyResult};
use crate::core::result_log::{DeliveryStatus, LogEntry, ResultLog};
use crate::core::template;

/// Rejections that stop a send operation before any batch is submitted.
///
/// These re-validate at send time, independently of the mapping pass,
/// because configuration may have changed in between. No network call is
/// made when any of them fires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("no rows loaded")]
    NoRowsLoaded,

    #[error("an API key is required")]
    MissingApiKey,

    #[error("a sender id is required")]
    MissingSenderId,

    #[error("the template requires {required} variable column(s), the mapping carries {selected}")]
    VariableCountMismatch { required: usize, selected: usize },

    #[error("no valid phone numbers found after deduplication")]
    NoValidRecipients,

    #[error("batch size {size} exceeds the maximum of 10000 per request")]
    BatchSizeExceeded { size: usize },
}

/// Failure to complete the proxy round trip for one batch.
///
/// Covers connection errors, unreadable responses, and proxy-level
/// rejections. The batch is logged `Failed` and the operation continues.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TransportFailure(pub String);

/// Transport seam between the dispatcher and the gateway proxy.
///
/// Production uses [`HttpProxyClient`]; tests substitute scripted doubles.
#[async_trait]
pub trait BatchTransport: Send + Sync {
    /// Submits one batch payload and returns the proxy's classified result.
    async fn submit(&self, payload: &GatewayPayload) -> Result<ProxyResult, TransportFailure>;
}

/// HTTP client that submits batches to the gateway proxy endpoint.
pub struct HttpProxyClient {
    client: reqwest::Client,
    proxy_url: String,
}

impl HttpProxyClient {
    pub fn new(proxy_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            proxy_url: proxy_url.into(),
        }
    }
}

#[async_trait]
impl BatchTransport for HttpProxyClient {
    async fn submit(&self, payload: &GatewayPayload) -> Result<ProxyResult, TransportFailure> {
        let response = self
            .client
            .post(&self.proxy_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportFailure(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportFailure(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportFailure(format!(
                "proxy rejected the batch ({}): {}",
                status, body
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| TransportFailure(format!("unreadable proxy response: {}", e)))
    }
}

/// Observable state of a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Idle,
    Sending { batch_index: usize },
}

/// Summary of one completed send operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub batches: usize,
    pub recipients: usize,
    pub failed_batches: usize,
}

/// Drives send operations against the gateway proxy.
///
/// Holds the campaign settings snapshot taken at construction; a settings
/// change during a long send cannot affect an operation in flight.
pub struct Dispatcher<T: BatchTransport> {
    transport: T,
    settings: CampaignSettings,
    local_template: Option<String>,
    pause: Duration,
    state: DispatcherState,
    log: Arc<ResultLog>,
}

impl Dispatcher<HttpProxyClient> {
    /// Builds a dispatcher wired to the configured proxy endpoint.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            HttpProxyClient::new(config.dispatch().proxy_url.clone()),
            config.campaign().clone(),
            Duration::from_millis(config.dispatch().inter_batch_pause_ms),
        )
    }
}

impl<T: BatchTransport> Dispatcher<T> {
    pub fn new(transport: T, settings: CampaignSettings, pause: Duration) -> Self {
        Self {
            transport,
            settings,
            local_template: None,
            pause,
            state: DispatcherState::Idle,
            log: Arc::new(ResultLog::new()),
        }
    }

    /// Template used only when the settings snapshot carries none.
    pub fn with_local_template(mut self, template: impl Into<String>) -> Self {
        self.local_template = Some(template.into());
        self
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    /// Shared handle to the result ledger.
    pub fn log(&self) -> Arc<ResultLog> {
        Arc::clone(&self.log)
    }

    fn effective_template(&self) -> String {
        if !self.settings.template.is_empty() {
            self.settings.template.clone()
        } else {
            self.local_template.clone().unwrap_or_default()
        }
    }

    /// Runs one send operation over every batch.
    ///
    /// All batches are always attempted; a failed batch marks its recipients
    /// `Failed` and the operation moves on. Every recipient of every batch
    /// produces exactly one log entry.
    pub async fn dispatch(
        &mut self,
        rows: &[Vec<CellValue>],
        mapping: &MappingDescriptor,
    ) -> Result<DispatchSummary, DispatchError> {
        if rows.is_empty() {
            return Err(DispatchError::NoRowsLoaded);
        }
        if self.settings.api_key.is_empty() {
            return Err(DispatchError::MissingApiKey);
        }
        if self.settings.sender_id.is_empty() {
            return Err(DispatchError::MissingSenderId);
        }

        let template = self.effective_template();
        let required = template::count_placeholders(&template);
        if required != mapping.var_indices.len() {
            return Err(DispatchError::VariableCountMismatch {
                required,
                selected: mapping.var_indices.len(),
            });
        }

        let recipients = extract::extract(rows, mapping);
        if recipients.is_empty() {
            return Err(DispatchError::NoValidRecipients);
        }

        let batches = batch::split(&recipients, mapping.batch_size)?;
        let total = batches.len();

        info!(
            recipients = recipients.len(),
            batches = total,
            "starting send operation"
        );

        let mut failed_batches = 0;
        for (index, chunk) in batches.iter().enumerate() {
            self.state = DispatcherState::Sending { batch_index: index };

            let payload = GatewayPayload::for_batch(chunk, &template, &self.settings);
            let (status, detail) = match self.transport.submit(&payload).await {
                Ok(result) => {
                    let status = if result.success {
                        DeliveryStatus::Success
                    } else {
                        DeliveryStatus::Failed
                    };
                    (status, result.detail())
                }
                Err(failure) => (DeliveryStatus::Failed, failure.to_string()),
            };

            if status == DeliveryStatus::Failed {
                failed_batches += 1;
                warn!(batch = index, detail = %detail, "batch failed");
            }

            // One verdict per batch: every recipient gets the same status.
            for recipient in *chunk {
                self.log.push(LogEntry {
                    phone: recipient.phone.clone(),
                    status,
                    detail: detail.clone(),
                });
            }

            // Quarantine interval before the next batch, to avoid
            // overwhelming the upstream gateway.
            if index + 1 < total {
                tokio::time::sleep(self.pause).await;
            }
        }

        self.state = DispatcherState::Idle;

        info!(
            batches = total,
            failed_batches, "send operation finished"
        );

        Ok(DispatchSummary {
            batches: total,
            recipients: recipients.len(),
            failed_batches,
        })
    }
}
