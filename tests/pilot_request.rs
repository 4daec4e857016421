use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;
use trial_bias::{
    api::{self, routes::webhook_payload, types::PilotRequest, AppState},
    config::Settings,
};

type Captured = Arc<Mutex<Vec<Value>>>;

async fn spawn_webhook(status: StatusCode) -> (String, Captured) {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(
            "/hook",
            post(move |State(store): State<Captured>, Json(body): Json<Value>| async move {
                store.lock().unwrap().push(body);
                status
            }),
        )
        .with_state(captured.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/hook"), captured)
}

fn app(webhook: Option<String>) -> Router {
    let settings = Settings::new("http://localhost:8001", webhook);
    api::router(AppState::new(settings).unwrap())
}

async fn submit(router: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::post("/api/pilot-request")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let (status, body) = submit(app(None), r#"{"name":"Ada"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, _) = submit(app(None), r#"{"name":"  ","email":"ada@example.com"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_an_internal_error() {
    let (status, body) = submit(app(None), "not json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn accepted_without_webhook() {
    let (status, body) = submit(app(None), r#"{"name":"Ada","email":"ada@example.com"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn forwards_to_webhook() {
    let (url, captured) = spawn_webhook(StatusCode::OK).await;
    let (status, _) = submit(
        app(Some(url)),
        r#"{"name":"Ada","email":"ada@example.com","company":"Analytical Engines"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let payloads = captured.lock().unwrap();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["text"], "New Pilot Request from Ada");
    assert_eq!(
        payloads[0]["blocks"][1]["fields"][2]["text"],
        "*Company:*\nAnalytical Engines"
    );
}

#[tokio::test]
async fn webhook_failure_is_not_surfaced() {
    let (url, captured) = spawn_webhook(StatusCode::BAD_GATEWAY).await;
    let (status, body) = submit(app(Some(url)), r#"{"name":"Ada","email":"ada@example.com"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(captured.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unreachable_webhook_is_not_surfaced() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, _) = submit(
        app(Some(format!("http://{addr}/hook"))),
        r#"{"name":"Ada","email":"ada@example.com"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[test]
fn payload_marks_missing_company() {
    let request = PilotRequest {
        name: Some("Ada".into()),
        email: Some("ada@example.com".into()),
        company: None,
    };
    let payload = webhook_payload(&request, "2026-01-01T00:00:00+00:00");
    assert_eq!(payload["blocks"][1]["fields"][2]["text"], "*Company:*\nNot provided");
    assert_eq!(
        payload["blocks"][2]["elements"][0]["text"],
        "Submitted at 2026-01-01T00:00:00+00:00"
    );
}

#[tokio::test]
async fn demo_reports_are_served() {
    let router = app(None);
    let response = router
        .clone()
        .oneshot(Request::get("/api/demo/attrition").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["differentialAttrition"], true);
    assert_eq!(report["groups"][2]["group"], "Low Income");
    assert_eq!(report["hiddenPopulation"]["mostAffectedGroup"], "Low Income");

    let response = router
        .oneshot(Request::get("/api/demo/metadata").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["summary"]["concerns"], 2);
    assert_eq!(report["summary"]["notes"], 1);
}

#[tokio::test]
async fn demographic_report_places_bias_on_pipeline() {
    let response = app(None)
        .oneshot(Request::get("/api/demo/demographic").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let report: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(report["profile"]["activeBiases"][0]["stageId"], "enrollment");
    assert_eq!(report["profile"]["activeBiases"][0]["severity"], "high");
    assert_eq!(report["profile"]["radarAxes"][0]["key"], "female_enrollment");
    assert_eq!(report["outcomes"][1]["group"], "Female");
    assert_eq!(report["ageDistribution"]["min"], 28);
    assert_eq!(report["patientSample"][1]["trialCount"], 11);
}
