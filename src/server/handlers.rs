use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

use crate::geo::Coordinate;
use crate::poi::{PoiError, PoiRecord, SearchPoints};

use super::state::AppState;
use super::static_files;

// ─── Error response ──────────────────────────────────────────────

#[derive(serde::Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── Static file handlers ────────────────────────────────────────

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(static_files::INDEX_HTML.replace("{{API_KEY}}", state.discover.api_key()))
}

pub async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        static_files::APP_JS,
    )
        .into_response()
}

// ─── POST /api/search_hospitals ──────────────────────────────────

#[derive(Deserialize)]
pub struct SearchBody {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub(super) fn body_to_coordinate(body: &SearchBody) -> Result<Coordinate, String> {
    let (Some(lat), Some(lng)) = (body.latitude, body.longitude) else {
        return Err("Latitude and Longitude are required".into());
    };
    Coordinate::new(lat, lng).map_err(|e| e.to_string())
}

pub async fn search_hospitals(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchBody>,
) -> Result<Json<Vec<PoiRecord>>, Response> {
    let start = Instant::now();

    let center = body_to_coordinate(&body)
        .map_err(|msg| api_error(StatusCode::BAD_REQUEST, msg).into_response())?;

    let points = state.discover.search(center).await.map_err(|e| {
        log::error!("Upstream hospital search failed: {}", e);
        match e {
            PoiError::Network(_) | PoiError::MalformedResponse(_) => {
                api_error(StatusCode::BAD_GATEWAY, format!("{}", e)).into_response()
            }
        }
    })?;

    log::info!(
        "POST /api/search_hospitals at {} -> {} point(s) ({:.1}ms)",
        center,
        points.len(),
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(points.iter().map(PoiRecord::from).collect()))
}
