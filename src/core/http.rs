//! HTTP endpoint server using Axum

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::ServiceConfig;
use crate::core::orchestrator::AggregationOrchestrator;
use crate::errors::EngineError;
use crate::metrics::Metrics;
use crate::models::features::ApplicantFeatures;

pub const SERVICE_NAME: &str = "riskgate-decision-engine";
const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub started_at: DateTime<Utc>,
    pub orchestrator: Arc<AggregationOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<AggregationOrchestrator>, metrics: Arc<Metrics>) -> Self {
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            started_at: Utc::now(),
            orchestrator,
        }
    }
}

pub async fn root_status() -> Json<Value> {
    Json(json!({
        "status": "API is operational",
        "message": "Welcome to the lending risk decision API!",
        "endpoint": "POST applicant JSON (one record or a list) to /api/evaluate for a decision."
    }))
}

/// Liveness only; scorer reachability is reported per request as `scorer_unavailable`.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": "healthy",
        "uptime_seconds": uptime_seconds,
        "started_at": state.started_at.to_rfc3339(),
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let in_flight = state.metrics.track_in_flight();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    drop(in_flight);

    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Evaluate one applicant object or a list of them.
///
/// A single object answers with the decision payload or an error status.
/// A list always answers 200 with one entry per applicant, in input order,
/// each carrying either `result` or `error`/`details`.
async fn evaluate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return EngineError::InvalidFeatureInput(rejection.body_text()).into_response();
        }
    };

    let base_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match body {
        Value::Array(items) => evaluate_many(&state, base_id, items).await,
        single => {
            let features = match parse_features(single) {
                Ok(features) => features,
                Err(e) => return e.into_response(),
            };
            let request_id = base_id.unwrap_or_else(|| applicant_request_id(&features));
            match state
                .orchestrator
                .evaluate_response(&request_id, &features)
                .await
            {
                Ok(payload) => Json(payload).into_response(),
                Err(e) => e.into_response(),
            }
        }
    }
}

async fn evaluate_many(state: &AppState, base_id: Option<String>, items: Vec<Value>) -> Response {
    if items.is_empty() {
        return EngineError::InvalidFeatureInput("applicant list is empty".to_string())
            .into_response();
    }

    let parsed: Vec<(String, Result<ApplicantFeatures, EngineError>)> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let features = parse_features(item);
            let request_id = match (&base_id, &features) {
                (Some(base), _) => format!("{}-{}", base, index),
                (None, Ok(features)) => applicant_request_id(features),
                (None, Err(_)) => format!("item-{}", index),
            };
            (request_id, features)
        })
        .collect();

    let entries: Vec<Value> = state
        .orchestrator
        .evaluate_batch(parsed)
        .await
        .into_iter()
        .map(|(request_id, result)| match result {
            Ok(payload) => json!({ "requestId": request_id, "result": payload }),
            Err(e) => json!({
                "requestId": request_id,
                "error": e.kind(),
                "details": e.to_string(),
            }),
        })
        .collect();

    Json(Value::Array(entries)).into_response()
}

fn parse_features(value: Value) -> Result<ApplicantFeatures, EngineError> {
    serde_json::from_value(value).map_err(|e| EngineError::InvalidFeatureInput(e.to_string()))
}

fn applicant_request_id(features: &ApplicantFeatures) -> String {
    format!("applicant-{}", features.sk_id_curr)
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_status))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/evaluate", post(evaluate))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Build the engine from validated configuration and serve until the listener fails.
pub async fn start_server(config: ServiceConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let metrics = Arc::new(Metrics::new()?);
    let orchestrator = AggregationOrchestrator::from_endpoints(&config.endpoints, config.engine.clone())?
        .with_metrics(metrics.clone());

    let state = AppState::new(Arc::new(orchestrator), metrics);
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app).await?;

    Ok(())
}
