use super::{AppState, handlers};
use crate::error::TriageError;
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::{any::Any, time::Duration};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build the API router with its middleware stack
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config.http.cors_origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let timeout = Duration::from_millis(state.config.http.request_timeout_ms);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/symptoms/common", get(handlers::common_symptoms))
        .route("/api/conditions/search", get(handlers::search_conditions))
        .route("/api/emergency/check", post(handlers::emergency_check))
        .route("/api/tips", get(handlers::tips))
        .route("/api/analytics/summary", get(handlers::analytics_summary))
        .fallback(handlers::not_found)
        .layer(middleware::map_response(method_not_allowed))
        .layer(middleware::from_fn_with_state(state.clone(), track_latency))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn allowed_origins(configured: &[String]) -> AllowOrigin {
    if configured.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }
    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Skipping unparsable CORS origin '{}'", o);
                None
            }
        })
        .collect();
    AllowOrigin::list(origins)
}

/// Record wall time of every `/api/analyze` request into the analytics window
async fn track_latency(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    if req.uri().path() != "/api/analyze" {
        return next.run(req).await;
    }
    let start = std::time::Instant::now();
    let resp = next.run(req).await;
    let elapsed = start.elapsed().as_secs_f64();
    state.analytics.lock().await.record_latency(elapsed);
    resp
}

/// axum answers a wrong method with an empty 405; give it a JSON body
async fn method_not_allowed(resp: Response) -> Response {
    if resp.status() != StatusCode::METHOD_NOT_ALLOWED {
        return resp;
    }
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": "Method not allowed",
            "message": "The HTTP method is not supported for this endpoint"
        })),
    )
        .into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    TriageError::Internal {
        message: format!("handler panicked: {detail}"),
    }
    .into_response()
}
