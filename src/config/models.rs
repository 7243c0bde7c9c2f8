//! Configuration model definitions
//!
//! Section structs deserialized from `config/gateway.yaml`. Every section
//! has a complete default so a missing file or section still yields a
//! runnable configuration.

use serde::{Deserialize, Serialize};

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream SMS provider settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Campaign settings consumed by the dispatcher
    #[serde(default)]
    pub campaign: CampaignSettings,
    /// Dispatch behavior settings
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Validate server settings
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("server host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("server port must not be 0".to_string());
        }
        Ok(())
    }
}

/// Upstream SMS provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Endpoint batch payloads are forwarded to
    pub endpoint: String,
    /// Round-trip timeout for one batch, in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://sms.versatilesmshub.com/api/smsservices.php".to_string(),
            timeout_secs: 60,
        }
    }
}

impl UpstreamConfig {
    /// Validate upstream settings
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("upstream endpoint must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("upstream timeout must not be 0".to_string());
        }
        Ok(())
    }
}

/// Read-only campaign settings snapshot
///
/// The dispatcher takes one snapshot at operation start and never re-reads
/// configuration mid-operation, so a settings change during a long send
/// cannot split the operation across two configurations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignSettings {
    /// Upstream API key
    pub api_key: String,
    /// Registered sender id
    pub sender_id: String,
    /// Campaign identifier (optional upstream-side grouping)
    pub campaign_id: String,
    /// Registered message template id
    pub template_id: String,
    /// Country code applied to every recipient
    pub country_code: String,
    /// Message template with `{#var#}` placeholders
    pub template: String,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            sender_id: String::new(),
            campaign_id: String::new(),
            template_id: String::new(),
            country_code: "91".to_string(),
            template: String::new(),
        }
    }
}

/// Dispatch behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// URL of the gateway proxy the dispatcher posts batches to
    pub proxy_url: String,
    /// Pause between consecutive batches, in milliseconds
    pub inter_batch_pause_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            proxy_url: "http://127.0.0.1:8080/send_sms".to_string(),
            inter_batch_pause_ms: 250,
        }
    }
}
