//! Health check endpoints
//!
//! Kubernetes-compatible probes:
//! - /health - Basic health check
//! - /health/ready - Readiness probe (formula registries loaded)
//! - /health/live - Liveness probe (always returns OK if server is running)

use axum::{http::StatusCode, Json};
use health_calculators_shared::catalog::CALCULATORS;
use health_calculators_shared::registry::{
    ACTIVITY_LEVELS, HEART_RATE_ZONES, IDEAL_WEIGHT_FORMULAS, LINEAR_BMR_FORMULAS, MET_ACTIVITIES,
};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub registries: CheckStatus,
    pub calculators: usize,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    })
}

/// Names of the formula registries that came up empty
fn empty_registries() -> Vec<&'static str> {
    [
        (IDEAL_WEIGHT_FORMULAS.name(), IDEAL_WEIGHT_FORMULAS.is_empty()),
        (HEART_RATE_ZONES.name(), HEART_RATE_ZONES.is_empty()),
        (ACTIVITY_LEVELS.name(), ACTIVITY_LEVELS.is_empty()),
        (LINEAR_BMR_FORMULAS.name(), LINEAR_BMR_FORMULAS.is_empty()),
        (MET_ACTIVITIES.name(), MET_ACTIVITIES.is_empty()),
    ]
    .into_iter()
    .filter_map(|(name, empty)| empty.then_some(name))
    .collect()
}

/// Readiness probe
///
/// Forces every formula registry to load, so the first real request does
/// not pay for it. Returns 503 if a registry is empty.
pub async fn readiness_check() -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)>
{
    let empty = empty_registries();
    let registries = if empty.is_empty() {
        CheckStatus {
            status: "healthy".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "unhealthy".to_string(),
            message: Some(format!("empty registries: {}", empty.join(", "))),
        }
    };

    let is_healthy = empty.is_empty();

    let response = HealthResponse {
        status: if is_healthy { "ready" } else { "not_ready" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(HealthChecks {
            registries,
            calculators: CALCULATORS.len(),
        }),
    };

    if is_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness probe - checks if the service is alive
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
    }

    #[tokio::test]
    async fn test_readiness_loads_registries() {
        let response = readiness_check().await.ok().unwrap();
        assert_eq!(response.status, "ready");
        let checks = response.checks.as_ref().unwrap();
        assert_eq!(checks.registries.status, "healthy");
        assert_eq!(checks.calculators, CALCULATORS.len());
    }
}
