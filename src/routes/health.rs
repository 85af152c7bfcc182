//! Health check endpoints
//!
//! - `/api/health` - Minimal heartbeat used by the web front-end
//! - `/health` - Full health check with component status
//! - `/health/ready` - Readiness probe (fails while the gateway is misconfigured)
//! - `/health/live` - Liveness probe

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{gateway::GatewayStatus, AppState};

/// Health status enum
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Gateway component status
#[derive(Debug, Serialize)]
pub struct GatewayCheck {
    pub status: HealthStatus,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Search component status
#[derive(Debug, Serialize)]
pub struct SearchCheck {
    pub status: HealthStatus,
    pub configured: bool,
}

/// Component checks collection
#[derive(Debug, Serialize)]
pub struct ComponentChecks {
    pub gateway: GatewayCheck,
    pub search: SearchCheck,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub checks: ComponentChecks,
}

/// Simple health response for liveness/readiness
#[derive(Debug, Serialize, Deserialize)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

/// Heartbeat response
#[derive(Debug, Serialize, Deserialize)]
pub struct Heartbeat {
    pub ok: bool,
    /// Unix time in milliseconds
    pub time: i64,
}

fn check_gateway(state: &AppState) -> GatewayCheck {
    let provider = state.gateway.default_provider().to_string();

    match state.gateway.status() {
        GatewayStatus::Ready => GatewayCheck {
            status: HealthStatus::Healthy,
            provider,
            error: None,
        },
        GatewayStatus::Misconfigured { reason } => GatewayCheck {
            status: HealthStatus::Unhealthy,
            provider,
            error: Some(reason.clone()),
        },
        GatewayStatus::Uninitialized => GatewayCheck {
            status: HealthStatus::Unhealthy,
            provider,
            error: Some("gateway not initialized".to_string()),
        },
    }
}

/// Heartbeat endpoint
pub async fn heartbeat() -> Json<Heartbeat> {
    Json(Heartbeat {
        ok: true,
        time: chrono::Utc::now().timestamp_millis(),
    })
}

/// Full health check endpoint
///
/// The service is unhealthy without a working gateway and degraded when only
/// video search is unavailable.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let gateway_check = check_gateway(&state);
    let search_configured = state.youtube.is_configured();
    let search_check = SearchCheck {
        status: if search_configured {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        configured: search_configured,
    };

    let overall_status = if gateway_check.status == HealthStatus::Unhealthy {
        HealthStatus::Unhealthy
    } else if search_check.status == HealthStatus::Degraded {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    let response = HealthResponse {
        status: overall_status.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks: ComponentChecks {
            gateway: gateway_check,
            search: search_check,
        },
    };

    let status_code = match overall_status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Readiness probe endpoint
///
/// Returns 200 OK only when the gateway can accept chat requests.
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SimpleHealthResponse>) {
    if !state.gateway.is_ready() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(SimpleHealthResponse {
                status: HealthStatus::Unhealthy,
            }),
        );
    }

    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}

/// Liveness probe endpoint
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
