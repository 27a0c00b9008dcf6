use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use symptom_triage::{
    SymptomChecker,
    config::Config,
    server::{AppState, build_router},
};
use tower::ServiceExt;

fn app() -> Router {
    build_router(AppState::new(SymptomChecker::new(), Config::default()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn valid_payload() -> Value {
    json!({
        "age": 30,
        "gender": "male",
        "symptoms": "runny nose congestion sore throat sneezing for 3 days",
        "duration": "1_3_days",
        "severity": "mild"
    })
}

#[tokio::test]
async fn health_reports_service_identity() {
    let (status, body) = send(app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "1.0.0");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn analyze_returns_envelope_and_result() {
    let (status, body) = send(app(), post_json("/api/analyze", &valid_payload())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["analysis_id"].as_str().unwrap().starts_with("analysis_"));
    assert_eq!(body["input_data"]["severity"], "mild");
    assert_eq!(body["risk_assessment"], "Low");
    assert!(
        body["possible_conditions"]
            .as_array()
            .unwrap()
            .contains(&json!("Common Cold"))
    );
    assert_eq!(body["emergency_check"]["is_emergency"], false);
}

#[tokio::test]
async fn analyze_rejects_empty_body() {
    let req = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");
}

#[tokio::test]
async fn analyze_lists_missing_fields() {
    let (status, body) = send(
        app(),
        post_json("/api/analyze", &json!({"age": 30, "symptoms": "a long enough text"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(body["missing_fields"], json!(["gender", "duration", "severity"]));
    assert_eq!(body["message"], "Please provide: gender, duration, severity");
}

#[tokio::test]
async fn analyze_collects_validation_errors() {
    let mut payload = valid_payload();
    payload["age"] = json!(150);
    payload["severity"] = json!("unbearable");
    let (status, body) = send(app(), post_json("/api/analyze", &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(
        body["validation_errors"],
        json!([
            "Age must be between 1 and 120",
            "Severity must be one of: mild, moderate, severe"
        ])
    );
}

#[tokio::test]
async fn search_requires_two_characters() {
    let (status, body) = send(app(), get("/api/conditions/search?q=%20c%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid search query");

    let (status, body) = send(app(), get("/api/conditions/search")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Search query must be at least 2 characters long");
}

#[tokio::test]
async fn search_returns_matches() {
    let (status, body) = send(app(), get("/api/conditions/search?q=cold")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "cold");
    assert_eq!(body["count"], 2);
    assert_eq!(body["results"][0]["name"], "Common Cold");
    assert_eq!(body["results"][0]["severity"], "mild");
    assert_eq!(body["results"][1]["category"], "respiratory");
}

#[tokio::test]
async fn common_symptoms_with_count() {
    let (status, body) = send(app(), get("/api/symptoms/common")).await;
    assert_eq!(status, StatusCode::OK);
    let list = body["common_symptoms"].as_array().unwrap();
    assert_eq!(body["count"], list.len());
}

#[tokio::test]
async fn emergency_check_endpoint() {
    let (status, body) = send(
        app(),
        post_json("/api/emergency/check", &json!({"symptoms": "sudden weakness on one side"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_emergency"], true);
    assert_eq!(body["urgency_level"], "urgent");
    assert_eq!(body["warning_signs"], json!(["Urgent: sudden weakness"]));

    let (status, body) = send(app(), post_json("/api/emergency/check", &json!({"text": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No symptoms provided");
}

#[tokio::test]
async fn tips_for_known_condition() {
    let (status, body) = send(app(), get("/api/tips?condition=Influenza")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["condition"], "Influenza");
    assert_eq!(body["tips"][0], "rest");

    let (_, body) = send(app(), get("/api/tips")).await;
    assert!(body["condition"].is_null());
    assert_eq!(body["count"], 7);
}

#[tokio::test]
async fn analytics_counts_successful_analyses() {
    let app = app();
    let (status, _) = send(app.clone(), post_json("/api/analyze", &valid_payload())).await;
    assert_eq!(status, StatusCode::OK);

    let mut bad = valid_payload();
    bad["gender"] = json!("unknown");
    let (status, _) = send(app.clone(), post_json("/api/analyze", &bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(app, get("/api/analytics/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_analyses"], 1);
    assert_eq!(body["analyses_today"], 1);
    assert_eq!(body["system_status"], "operational");
    assert!(body["average_response_time"].as_str().unwrap().ends_with('s'));
    assert!(!body["most_common_symptoms"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_path_lists_endpoints() {
    let (status, body) = send(app(), get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Endpoint not found");
    assert!(
        body["available_endpoints"]
            .as_array()
            .unwrap()
            .contains(&json!("/api/analyze"))
    );
}

#[tokio::test]
async fn wrong_method_is_json_405() {
    let (status, body) = send(app(), get("/api/analyze")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["error"], "Method not allowed");
}
