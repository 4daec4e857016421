//! HTTP route handlers for Axum.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::{
    api::types::{
        AttritionReport, DemographicReport, ErrorBody, MetadataReport, PilotRequest, PilotResponse,
    },
    datasets::{
        stages::{TrialStage, TRIAL_STAGES},
        DatasetInfo, DATASETS,
    },
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

const COMPANY_FALLBACK: &str = "Not provided";

fn api_error(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

/// Accept a pilot request and forward it to the configured webhook.
///
/// The body is parsed by hand: a malformed payload is an internal error
/// (500), while a well-formed payload lacking name or email is a 400.
pub async fn pilot_request(State(state): State<AppState>, body: Bytes) -> ApiResult<PilotResponse> {
    let request: PilotRequest = serde_json::from_slice(&body).map_err(|err| {
        error!(%err, "pilot request error");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })?;

    if !request.has_required_fields() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing required fields"));
    }

    let submitted_at = Utc::now().to_rfc3339();
    info!(
        requester = request.name.as_deref().unwrap_or_default(),
        email = request.email.as_deref().unwrap_or_default(),
        company = request.company.as_deref().unwrap_or(COMPANY_FALLBACK),
        timestamp = %submitted_at,
        "pilot request received"
    );

    if let Some(url) = state.settings.pilot_webhook_url.as_deref() {
        notify_webhook(&state.http, url, &request, &submitted_at).await;
    }

    Ok(Json(PilotResponse { success: true }))
}

/// Best effort: failures are logged and never reach the submitter.
async fn notify_webhook(http: &Client, url: &str, request: &PilotRequest, submitted_at: &str) {
    let payload = webhook_payload(request, submitted_at);
    match http.post(url).json(&payload).send().await {
        Ok(resp) if resp.status().is_success() => info!("pilot request forwarded to webhook"),
        Ok(resp) => warn!(status = %resp.status(), "webhook delivery failed"),
        Err(err) => error!(%err, "webhook error"),
    }
}

/// Slack-compatible message; plain `text` keeps other webhooks usable.
pub fn webhook_payload(request: &PilotRequest, submitted_at: &str) -> Value {
    let name = request.name.as_deref().unwrap_or_default();
    let email = request.email.as_deref().unwrap_or_default();
    let company = request
        .company
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(COMPANY_FALLBACK);

    json!({
        "text": format!("New Pilot Request from {name}"),
        "blocks": [
            {
                "type": "header",
                "text": { "type": "plain_text", "text": "New Pilot Request" }
            },
            {
                "type": "section",
                "fields": [
                    { "type": "mrkdwn", "text": format!("*Name:*\n{name}") },
                    { "type": "mrkdwn", "text": format!("*Email:*\n{email}") },
                    { "type": "mrkdwn", "text": format!("*Company:*\n{company}") }
                ]
            },
            {
                "type": "context",
                "elements": [
                    { "type": "mrkdwn", "text": format!("Submitted at {submitted_at}") }
                ]
            }
        ]
    })
}

pub async fn list_datasets() -> Json<Vec<DatasetInfo>> {
    Json(DATASETS.to_vec())
}

pub async fn list_stages() -> Json<Vec<TrialStage>> {
    Json(TRIAL_STAGES.to_vec())
}

pub async fn demographic_report() -> Json<DemographicReport> {
    Json(DemographicReport::sample())
}

pub async fn attrition_report() -> Json<AttritionReport> {
    Json(AttritionReport::sample())
}

pub async fn metadata_report() -> Json<MetadataReport> {
    Json(MetadataReport::sample())
}
