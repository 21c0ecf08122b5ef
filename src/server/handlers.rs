use super::AppState;
use crate::error::{ReadinessError, Result};
use crate::service::EvaluationReport;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

/// Header set by App Service authentication with the caller's object ID
pub const CLIENT_PRINCIPAL_ID_HEADER: &str = "x-ms-client-principal-id";

/// Progress snapshot posted by the dashboard after each evaluation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub has_authenticator: bool,
    #[serde(default)]
    pub has_phone: bool,
    #[serde(default, rename = "hasMFA")]
    pub has_mfa: bool,
    #[serde(default, rename = "hasWHfB")]
    pub has_whfb: bool,
}

fn caller_id(headers: &HeaderMap) -> Result<String> {
    headers
        .get(CLIENT_PRINCIPAL_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            ReadinessError::MissingIdentity(format!("{} header absent", CLIENT_PRINCIPAL_ID_HEADER))
        })
}

/// GET /api/methods
pub async fn get_methods(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<EvaluationReport>> {
    let user_id = caller_id(&headers)?;
    let report = state.service.evaluate(&user_id).await?;
    Ok(Json(report))
}

/// POST /api/logUserProgress
pub async fn log_user_progress(Json(progress): Json<UserProgress>) -> StatusCode {
    info!(
        user = progress.user.as_deref().unwrap_or("-"),
        score = progress.score,
        has_authenticator = progress.has_authenticator,
        has_phone = progress.has_phone,
        has_mfa = progress.has_mfa,
        has_whfb = progress.has_whfb,
        "User progress"
    );
    StatusCode::NO_CONTENT
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
