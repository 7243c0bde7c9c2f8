//! Upstream forwarding and verdict classification
//!
//! Sends one validated batch payload to the upstream SMS gateway, captures
//! the transport outcome and the raw reply, and normalizes everything into
//! a [`ProxyResult`]. The result tuple is returned whole regardless of the
//! verdict so callers always have diagnostic detail.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::models::UpstreamConfig;
use crate::core::payload::{ProxyResult, field_as_string};
use crate::upstream::trail::{
    BODY_PREVIEW_LIMIT, DiagnosticTrail, PAYLOAD_PREVIEW_LIMIT, TrailRecord, preview,
};
use crate::utils::error::Result;

/// Upstream success discriminator; any other code is a failure.
const SUCCESS_CODE: &str = "000";

/// Forwards batch payloads to the upstream SMS gateway.
///
/// Stateless per request aside from the diagnostic trail. One `reqwest`
/// client is shared across requests for connection reuse; its timeout is
/// fixed at construction from configuration.
pub struct UpstreamForwarder {
    client: reqwest::Client,
    endpoint: String,
    trail: Arc<DiagnosticTrail>,
}

impl UpstreamForwarder {
    pub fn new(config: &UpstreamConfig, trail: Arc<DiagnosticTrail>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            trail,
        })
    }

    /// Forwards the validated payload unchanged and classifies the reply.
    ///
    /// The verdict is `success = (code == "000") && no transport error`.
    /// The trail record is written before the verdict is computed.
    pub async fn forward(&self, payload: &Value) -> ProxyResult {
        let payload_preview = preview(&payload.to_string(), PAYLOAD_PREVIEW_LIMIT);
        info!("forwarding batch to upstream");

        let (http_status, transport_error, upstream_raw) =
            match self.client.post(&self.endpoint).json(payload).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    match response.text().await {
                        Ok(body) => (status, None, Some(body)),
                        Err(e) => (status, Some(e.to_string()), None),
                    }
                }
                Err(e) => (0, Some(e.to_string()), None),
            };

        let upstream_parsed = upstream_raw
            .as_deref()
            .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
            .filter(Value::is_object);

        let upstream_code = upstream_parsed
            .as_ref()
            .and_then(|parsed| parsed.get("code"))
            .map(field_as_string);
        let message = upstream_parsed
            .as_ref()
            .and_then(|parsed| parsed.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let job_id = upstream_parsed
            .as_ref()
            .and_then(|parsed| parsed.get("jobId"))
            .map(field_as_string);

        self.trail.record(TrailRecord {
            at: Utc::now(),
            payload_preview,
            upstream_status: (http_status != 0).then_some(http_status),
            transport_error: transport_error.clone(),
            body_preview: upstream_raw
                .as_deref()
                .map(|body| preview(body, BODY_PREVIEW_LIMIT)),
            code: upstream_code.clone(),
            message: message.clone(),
            job_id: job_id.clone(),
        });

        if let Some(err) = &transport_error {
            warn!(error = %err, "upstream transport error");
        }
        match (&upstream_parsed, &upstream_code) {
            (Some(_), code) => info!(
                status = http_status,
                code = code.as_deref().unwrap_or(""),
                message = message.as_deref().unwrap_or(""),
                job_id = job_id.as_deref().unwrap_or(""),
                "upstream replied"
            ),
            (None, _) => warn!(status = http_status, "upstream response not JSON or empty"),
        }

        let success = upstream_code.as_deref() == Some(SUCCESS_CODE) && transport_error.is_none();

        ProxyResult {
            success,
            http_status,
            transport_error,
            upstream_raw,
            upstream_parsed,
            upstream_code,
        }
    }
}
