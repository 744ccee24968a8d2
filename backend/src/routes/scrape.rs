//! Prometheus scrape endpoint

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::State;

/// GET /metrics - Prometheus text exposition
pub async fn render_metrics(State(state): State<AppState>) -> ApiResult<String> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| ApiError::NotFound("Metrics are disabled".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[tokio::test]
    async fn test_metrics_disabled_is_not_found() {
        let state = AppState::new(AppConfig::default(), None);
        let response = render_metrics(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_render_from_handle() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let state = AppState::new(AppConfig::default(), Some(recorder.handle()));
        assert!(render_metrics(State(state)).await.is_ok());
    }
}
