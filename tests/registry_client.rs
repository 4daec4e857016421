use std::{collections::HashMap, sync::Mutex, time::Duration};

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use trial_bias::{
    datasets::metadata_example::EXAMPLE_ANALYSIS,
    registry::{
        session::track, FetchState, MetadataAnalysisResult, RegistryClient, RegistryError,
        RequestSession, SearchResponse, TrialSummary,
    },
};

const STUB_TRIALS: u32 = 23;
const SLOW_ID: &str = "NCT00000001";

async fn search(Query(params): Query<HashMap<String, String>>) -> Response {
    let query = params.get("query").cloned().unwrap_or_default();
    if query == "fail" {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let page_size: u32 = params
        .get("page_size")
        .and_then(|p| p.parse().ok())
        .unwrap_or(10);
    let start = (page - 1) * page_size + 1;
    let end = (start + page_size - 1).min(STUB_TRIALS);
    let trials = (start..=end)
        .map(|i| TrialSummary {
            nct_id: format!("NCT{i:08}"),
            title: format!("{query} trial {i}"),
            status: Some("COMPLETED".into()),
            phase: None,
            conditions: vec![query.clone()],
            interventions: Vec::new(),
            enrollment: Some(100 + i),
            start_date: None,
            completion_date: None,
        })
        .collect();
    Json(SearchResponse {
        total_count: STUB_TRIALS,
        page,
        page_size,
        trials,
    })
    .into_response()
}

async fn bias(Path(nct_id): Path<String>) -> Response {
    match nct_id.as_str() {
        "NCT00000404" => StatusCode::NOT_FOUND.into_response(),
        "NCTBROKEN" => "<html>upstream</html>".into_response(),
        id => {
            if id == SLOW_ID {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            let mut analysis = EXAMPLE_ANALYSIS.clone();
            analysis.trial.identification.nct_id = id.to_string();
            Json(analysis).into_response()
        }
    }
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/api/trials/search", get(search))
        .route("/api/trials/:nct_id/bias", get(bias));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{addr}/")
}

#[tokio::test]
async fn consecutive_pages_do_not_overlap() {
    let client = RegistryClient::new(spawn_stub().await).unwrap();

    let first = client.search_trials("asthma", 1, 10).await.unwrap();
    assert_eq!(first.trials.len(), 10);
    assert_eq!(first.total_count, STUB_TRIALS);
    assert!(first.has_next_page());

    let second = client.search_trials("asthma", 2, 10).await.unwrap();
    assert!(second
        .trials
        .iter()
        .all(|t| first.trials.iter().all(|f| f.nct_id != t.nct_id)));

    let last = client.search_trials("asthma", 3, 10).await.unwrap();
    assert_eq!(last.trials.len(), 3);
    assert!(!last.has_next_page());
    assert_eq!(last.total_pages(), 3);
    assert!(last.trials.len() as u32 <= last.page_size);
}

#[tokio::test]
async fn query_survives_url_encoding() {
    let client = RegistryClient::new(spawn_stub().await).unwrap();
    let response = client
        .search_trials("heart failure & stroke", 1, 2)
        .await
        .unwrap();
    assert_eq!(response.trials[0].title, "heart failure & stroke trial 1");
    assert_eq!(response.trials[0].phase, None);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let client = RegistryClient::new(spawn_stub().await).unwrap();

    let err = client.search_trials("fail", 1, 10).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "Search failed: 503 Service Unavailable");

    let err = client.get_trial_bias("NCT00000404").await.unwrap_err();
    assert!(matches!(err, RegistryError::Http { status: 404, .. }));
    assert_eq!(err.to_string(), "Bias analysis failed: 404 Not Found");
}

#[tokio::test]
async fn unreadable_body_is_a_decode_error() {
    let client = RegistryClient::new(spawn_stub().await).unwrap();
    let err = client.get_trial_bias("NCTBROKEN").await.unwrap_err();
    assert!(matches!(err, RegistryError::Decode { .. }));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RegistryClient::new(format!("http://{addr}")).unwrap();
    let err = client.search_trials("asthma", 1, 10).await.unwrap_err();
    assert!(matches!(err, RegistryError::Network(_)));
}

#[tokio::test]
async fn bias_analysis_round_trips_the_contract() {
    let client = RegistryClient::new(spawn_stub().await).unwrap();
    let analysis = client.get_trial_bias("NCT04280705").await.unwrap();
    assert_eq!(analysis.trial.identification.nct_id, "NCT04280705");
    assert_eq!(analysis.summary(), EXAMPLE_ANALYSIS.summary());
    assert_eq!(analysis.trial.eligibility.criteria, None);
}

#[tokio::test]
async fn later_lookup_wins_over_slow_earlier_one() {
    let client = RegistryClient::new(spawn_stub().await).unwrap();
    let session: Mutex<RequestSession<MetadataAnalysisResult>> = Mutex::new(RequestSession::new());

    let (slow_applied, fast_applied) = tokio::join!(
        track(&session, client.get_trial_bias(SLOW_ID)),
        track(&session, client.get_trial_bias("NCT00000002")),
    );
    assert!(!slow_applied);
    assert!(fast_applied);

    let guard = session.lock().unwrap();
    match guard.state() {
        FetchState::Success(analysis) => {
            assert_eq!(analysis.trial.identification.nct_id, "NCT00000002")
        }
        other => panic!("unexpected state {other:?}"),
    }
}
