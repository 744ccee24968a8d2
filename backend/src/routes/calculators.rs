//! Calculator catalog API routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path},
    routing::get,
    Json, Router,
};
use health_calculators_shared::catalog::{self, CalculatorInfo, CALCULATORS};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Create calculator routes
pub fn calculator_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_calculators))
        .route("/:slug", get(get_calculator).post(evaluate_calculator))
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub calculators: &'static [CalculatorInfo],
    pub total: usize,
}

#[derive(Serialize)]
pub struct EvaluationResponse {
    pub calculator: &'static str,
    pub result: Value,
}

fn find_calculator(slug: &str) -> ApiResult<&'static CalculatorInfo> {
    catalog::find(slug)
        .ok_or_else(|| ApiError::NotFound(format!("Calculator '{}' does not exist", slug)))
}

fn record_evaluation(calculator: &'static str, outcome: &'static str) {
    metrics::counter!(
        "calculator_evaluations_total",
        "calculator" => calculator,
        "outcome" => outcome
    )
    .increment(1);
}

/// GET /api/v1/calculators - List every calculator
async fn list_calculators() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        calculators: CALCULATORS,
        total: CALCULATORS.len(),
    })
}

/// GET /api/v1/calculators/:slug - Describe one calculator
async fn get_calculator(Path(slug): Path<String>) -> ApiResult<Json<&'static CalculatorInfo>> {
    find_calculator(&slug).map(Json)
}

/// POST /api/v1/calculators/:slug - Run a calculator on a JSON body
///
/// Unknown slugs give 404, unparseable or mistyped bodies 400 BAD_REQUEST,
/// and inputs that fail a precondition 400 VALIDATION_ERROR with the field.
async fn evaluate_calculator(
    Path(slug): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<EvaluationResponse>> {
    let info = match find_calculator(&slug) {
        Ok(info) => info,
        Err(err) => {
            record_evaluation("unknown", err.outcome());
            return Err(err);
        }
    };

    let outcome = body
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
        .and_then(|Json(input)| info.evaluate(input).map_err(ApiError::from));

    match outcome {
        Ok(result) => {
            record_evaluation(info.slug, "ok");
            debug!(calculator = info.slug, "Calculator evaluated");
            Ok(Json(EvaluationResponse {
                calculator: info.slug,
                result,
            }))
        }
        Err(err) => {
            record_evaluation(info.slug, err.outcome());
            info!(calculator = info.slug, error = %err, "Calculator rejected input");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::routes::create_router;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use rstest::rstest;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(AppConfig::default(), None))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn post_json(path: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(request).await
    }

    async fn get(path: &str) -> (StatusCode, Value) {
        send(Request::builder().uri(path).body(Body::empty()).unwrap()).await
    }

    #[tokio::test]
    async fn test_list_calculators() {
        let (status, body) = get("/api/v1/calculators").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 16);
        assert_eq!(body["calculators"][0]["slug"], "bmi");
        assert!(body["calculators"][0].get("evaluate").is_none());
    }

    #[tokio::test]
    async fn test_get_calculator() {
        let (status, body) = get("/api/v1/calculators/ideal-weight").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "body_composition");
        assert_eq!(body["formulas"], json!(["devine", "robinson", "miller", "hamwi"]));
    }

    #[tokio::test]
    async fn test_get_unknown_calculator() {
        let (status, body) = get("/api/v1/calculators/astrology").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_evaluate_heart_rate_zones_karvonen() {
        let (status, body) = post_json(
            "/api/v1/calculators/heart-rate-zones",
            r#"{"max_heart_rate": 180, "resting_heart_rate": 60, "method": "karvonen"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["calculator"], "heart-rate-zones");
        let zone2 = &body["result"]["zones"][1];
        assert_eq!(zone2["min_bpm"], 132);
        assert_eq!(zone2["max_bpm"], 144);
    }

    #[rstest]
    #[case("carb-intake", r#"{"total_calories": 2000, "percent": 0}"#, "percent")]
    #[case("carb-intake", r#"{"total_calories": 2000, "percent": 101}"#, "percent")]
    #[case("body-surface-area", r#"{"height_cm": 0, "weight_kg": 80}"#, "height_cm")]
    #[tokio::test]
    async fn test_evaluate_validation_error(
        #[case] slug: &str,
        #[case] body: &str,
        #[case] field: &str,
    ) {
        let (status, response) = post_json(&format!("/api/v1/calculators/{slug}"), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(response["error"]["field"], field);
    }

    #[tokio::test]
    async fn test_evaluate_malformed_json() {
        let (status, body) = post_json("/api/v1/calculators/bmi", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_evaluate_wrong_shape() {
        let (status, body) =
            post_json("/api/v1/calculators/bmi", r#"{"height_cm": "tall"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_evaluate_unknown_calculator() {
        let (status, body) = post_json("/api/v1/calculators/astrology", "{}").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
