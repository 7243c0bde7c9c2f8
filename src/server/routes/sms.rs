//! Batch submission endpoint of the gateway proxy
//!
//! Validates the raw payload, forwards it unchanged to the upstream
//! gateway, and replies with the normalized verdict. Validation rejections
//! answer `400` with the wire-contract error body; everything else answers
//! `200` with the full [`ProxyResult`](crate::core::payload::ProxyResult)
//! so the caller always has diagnostic detail.

use actix_web::{HttpResponse, Result as ActixResult, web};
use serde_json::{Value, json};
use tracing::warn;

use crate::core::payload::MAX_ENTRIES_PER_PAYLOAD;
use crate::server::state::AppState;

/// Configure SMS proxy routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/send_sms", web::post().to(send_sms));
}

fn rejection(error: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "success": false, "error": error }))
}

/// Accepts one batch payload and forwards it upstream.
///
/// The body is taken as raw bytes so unparseable JSON gets the contract's
/// `invalid_json` rejection instead of the framework's default.
pub async fn send_sms(state: web::Data<AppState>, body: web::Bytes) -> ActixResult<HttpResponse> {
    let payload: Value = match serde_json::from_slice::<Value>(&body) {
        Ok(value) if value.is_object() || value.is_array() => value,
        _ => {
            warn!("rejected batch payload: invalid JSON");
            return Ok(rejection("invalid_json"));
        }
    };

    let Some(data) = payload.get("data").and_then(Value::as_array) else {
        warn!("rejected batch payload: missing data array");
        return Ok(rejection("missing_data_array"));
    };

    if data.is_empty() {
        warn!("rejected batch payload: empty data array");
        return Ok(rejection("empty_data"));
    }

    if data.len() > MAX_ENTRIES_PER_PAYLOAD {
        warn!(
            count = data.len(),
            max = MAX_ENTRIES_PER_PAYLOAD,
            "rejected batch payload over the per-request ceiling"
        );
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": "exceeds_max_per_request",
            "max": MAX_ENTRIES_PER_PAYLOAD,
        })));
    }

    let result = state.forwarder.forward(&payload).await;
    Ok(HttpResponse::Ok().json(result))
}
