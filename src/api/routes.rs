use crate::api::get_embedded_asset;
use crate::config::Config;
use crate::db::{ActivityRow, Database, NewActivity};
use crate::predictor::PredictorClient;
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<Config>,
    pub predictor: PredictorClient,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/activities",
            get(list_activities).post(create_activity),
        )
        .route("/api/predict", post(predict))
        .route("/api/status", get(status))
        .fallback(get(static_assets))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct StatusPayload {
    status: &'static str,
    activity_count: i64,
    last_logged_at: Option<DateTime<Utc>>,
    api_port: u16,
}

async fn list_activities(State(state): State<ApiState>) -> ApiResult<Json<Vec<ActivityRow>>> {
    let database = Database::open(&state.config.db_path)?;
    let activities = database.list_activities()?;

    Ok(Json(activities))
}

async fn create_activity(
    State(state): State<ApiState>,
    Json(payload): Json<NewActivity>,
) -> ApiResult<Json<ActivityRow>> {
    let date = resolve_activity_date(payload.date.as_deref())
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let database = Database::open(&state.config.db_path)?;
    let stored = database.insert_activity(date, &payload)?;

    Ok(Json(stored))
}

async fn predict(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<Value>> {
    let response = state.predictor.predict(&payload).await.map_err(|err| {
        // The cause stays in the log; the caller only ever sees the
        // generic error body.
        error!(error = %format!("{err:#}"), "prediction request failed");
        ApiError::PredictionService
    })?;

    Ok(Json(response))
}

async fn status(State(state): State<ApiState>) -> ApiResult<Json<StatusPayload>> {
    let database = Database::open(&state.config.db_path)?;

    let payload = StatusPayload {
        status: "ok",
        activity_count: database.activity_count()?,
        last_logged_at: database.latest_activity_date()?,
        api_port: state.config.api_port,
    };

    Ok(Json(payload))
}

async fn static_assets(uri: Uri) -> ApiResult<Response> {
    match get_embedded_asset(uri.path()) {
        Some((bytes, mime)) => {
            let mut response = Response::new(bytes.into_response().into_body());
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_str(&mime)?);
            Ok(response)
        }
        None => Err(ApiError::NotFound("Static asset not found".to_string())),
    }
}

/// Lenient date policy: absent or empty defaults to now, RFC 3339 is taken
/// as-is, and a bare calendar date means midnight UTC.
fn resolve_activity_date(raw: Option<&str>) -> Result<DateTime<Utc>> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(Utc::now());
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {raw}. Expected RFC 3339 or YYYY-MM-DD"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("Failed to build midnight timestamp for: {raw}"))?;

    Ok(midnight.and_utc())
}

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
    PredictionService,
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::Internal(value)
    }
}

impl From<axum::http::header::InvalidHeaderValue> for ApiError {
    fn from(value: axum::http::header::InvalidHeaderValue) -> Self {
        Self::Internal(value.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::PredictionService => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Prediction service error" })),
            )
                .into_response(),
            ApiError::Internal(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error.to_string() })),
            )
                .into_response(),
        }
    }
}
