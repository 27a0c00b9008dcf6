//! Route handlers. Each one validates, calls the engine and shapes the JSON.

use super::AppState;
use crate::deserializers::text_of;
use crate::engine::types::{AnalysisResult, ConditionHit, EmergencyAssessment};
use crate::error::{Result, TriageError};
use crate::validation::{self, REQUIRED_FIELDS};
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

pub const AVAILABLE_ENDPOINTS: [&str; 7] = [
    "/api/health",
    "/api/analyze",
    "/api/symptoms/common",
    "/api/conditions/search",
    "/api/emergency/check",
    "/api/tips",
    "/api/analytics/summary",
];

/// Analysis response: request metadata followed by the engine result
#[derive(Debug, Serialize)]
pub struct AnalysisEnvelope {
    pub analysis_id: String,
    pub timestamp: String,
    pub input_data: Map<String, Value>,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TipsParams {
    pub condition: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ConditionHit>,
    pub count: usize,
}

/// `analysis_<YYYYmmdd_HHMMSS>_<8 hex>`
pub fn analysis_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("analysis_{}_{}", now.format("%Y%m%d_%H%M%S"), &suffix[..8])
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "service": state.config.service.name,
        "version": state.config.service.version,
    }))
}

pub async fn analyze(State(state): State<AppState>, body: Bytes) -> Result<Json<AnalysisEnvelope>> {
    let data = validation::parse_body(&body)?;
    let request = validation::validate_analysis(&data)?;

    let result = state.checker.analyze(&request)?;

    let now = Utc::now();
    state
        .analytics
        .lock()
        .await
        .record_analysis(&result.symptom_profile.phrases, now.date_naive());

    let input_data = REQUIRED_FIELDS
        .iter()
        .filter_map(|f| data.get(*f).map(|v| (f.to_string(), v.clone())))
        .collect();

    let envelope = AnalysisEnvelope {
        analysis_id: analysis_id(now),
        timestamp: now.to_rfc3339(),
        input_data,
        result,
    };
    tracing::info!(analysis_id = %envelope.analysis_id, "Analysis completed successfully");
    Ok(Json(envelope))
}

pub async fn common_symptoms(State(state): State<AppState>) -> impl IntoResponse {
    let symptoms = state.checker.list_common_symptoms();
    Json(json!({
        "count": symptoms.len(),
        "common_symptoms": symptoms,
    }))
}

pub async fn search_conditions(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let query = validation::validate_query(params.q.as_deref())?;
    let results = state.checker.search_conditions(&query);
    Ok(Json(SearchResponse {
        count: results.len(),
        query,
        results,
    }))
}

pub async fn emergency_check(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EmergencyAssessment>> {
    let symptoms = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) => map.get("symptoms").map(text_of),
        _ => None,
    }
    .ok_or(TriageError::MissingSymptoms)?;

    Ok(Json(state.checker.check_emergency(&symptoms)))
}

pub async fn tips(
    State(state): State<AppState>,
    Query(params): Query<TipsParams>,
) -> impl IntoResponse {
    let tips = state.checker.health_tips(params.condition.as_deref());
    Json(json!({
        "condition": params.condition,
        "count": tips.len(),
        "tips": tips,
    }))
}

pub async fn analytics_summary(State(state): State<AppState>) -> impl IntoResponse {
    let summary = state.analytics.lock().await.summary(Utc::now().date_naive());
    Json(summary)
}

pub async fn not_found() -> impl IntoResponse {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "message": "The requested endpoint does not exist",
            "available_endpoints": AVAILABLE_ENDPOINTS,
        })),
    )
}
