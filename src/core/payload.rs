//! Wire types exchanged with the gateway proxy
//!
//! `GatewayPayload` is the request the dispatcher submits for one batch;
//! `ProxyResult` is the normalized verdict the proxy returns. Field names
//! are the wire contract and must not change.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::models::CampaignSettings;
use crate::core::extract::Recipient;
use crate::core::template;

/// Hard ceiling on `data` entries in a single gateway request.
pub const MAX_ENTRIES_PER_PAYLOAD: usize = 10_000;

/// Upstream flag value for disabled options (international, shorturl, dlr).
const DISABLED: &str = "NO";
/// Default character set code.
const DEFAULT_DCS: &str = "0";
/// Channel every campaign payload is submitted on.
const CHANNEL: &str = "otp";

/// One message entry within a gateway payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub international: String,
    pub countrycode: String,
    pub number: String,
    pub message: String,
    pub url: String,
}

/// The batch payload submitted to the gateway proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayPayload {
    pub api: String,
    pub senderid: String,
    pub campaignid: String,
    pub channel: String,
    pub templateid: String,
    pub dcs: String,
    pub shorturl: String,
    pub dlr: String,
    pub data: Vec<MessageEntry>,
}

impl GatewayPayload {
    /// Builds the payload for one batch, rendering each recipient's message
    /// from the given template.
    pub fn for_batch(batch: &[Recipient], template: &str, settings: &CampaignSettings) -> Self {
        let data = batch
            .iter()
            .map(|recipient| MessageEntry {
                international: DISABLED.to_string(),
                countrycode: settings.country_code.clone(),
                number: recipient.phone.clone(),
                message: template::render(template, &recipient.vars),
                url: String::new(),
            })
            .collect();

        Self {
            api: settings.api_key.clone(),
            senderid: settings.sender_id.clone(),
            campaignid: settings.campaign_id.clone(),
            channel: CHANNEL.to_string(),
            templateid: settings.template_id.clone(),
            dcs: DEFAULT_DCS.to_string(),
            shorturl: DISABLED.to_string(),
            dlr: DISABLED.to_string(),
            data,
        }
    }
}

/// Normalized verdict the proxy returns for one batch.
///
/// Produced once per dispatched batch and never mutated; `success` is true
/// iff the upstream code equals `"000"` and no transport error occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyResult {
    pub success: bool,
    pub http_status: u16,
    #[serde(rename = "curl_error")]
    pub transport_error: Option<String>,
    pub upstream_raw: Option<String>,
    pub upstream_parsed: Option<Value>,
    pub upstream_code: Option<String>,
}

impl ProxyResult {
    /// Human-readable detail for the result log.
    ///
    /// Prefers `jobId` and `message` from the parsed upstream body, then the
    /// transport error, then the raw body, then a dump of the whole result.
    pub fn detail(&self) -> String {
        if let Some(parsed) = &self.upstream_parsed {
            let tail = match parsed.get("message").and_then(Value::as_str) {
                Some(message) if !message.is_empty() => message.to_string(),
                _ => parsed.to_string(),
            };
            return match parsed.get("jobId") {
                Some(job_id) => format!("jobId:{} - {}", field_as_string(job_id), tail),
                None => tail,
            };
        }
        if let Some(err) = &self.transport_error {
            return err.clone();
        }
        if let Some(raw) = &self.upstream_raw {
            return raw.clone();
        }
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Renders a JSON field as the string the wire contract compares against;
/// upstream bodies sometimes carry numeric codes and job ids.
pub(crate) fn field_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
