use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, HOST};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use leafy_core::{CreateParams, LinkCode};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::model::{CreateLinkRequest, CreateLinkResponse};
use crate::preview::render_preview;
use crate::state::AppState;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// The body is decoded as JSON whatever `Content-Type` the client sent.
pub async fn create_link_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateLinkResponse>> {
    let request: CreateLinkRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "rejected create request body");
        AppError::InvalidRequest
    })?;

    let code = state
        .store()
        .create(CreateParams {
            destination: request.url,
            requested_code: request.shortcode,
        })
        .await?;

    Ok(Json(CreateLinkResponse {
        shortcode: code.to_string(),
    }))
}

pub async fn preview_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response> {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());

    let Some(code) = LinkCode::from_request_path(path) else {
        return Ok(not_found());
    };

    let Some(destination) = state.store().resolve(&code).await? else {
        return Ok(not_found());
    };

    let base_url = match state.public_base_url() {
        Some(base) => base.to_string(),
        None => request_base_url(&headers),
    };
    let html = render_preview(&code.to_url(&base_url), &destination);

    Ok(Html(html).into_response())
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        "Short link not found",
    )
        .into_response()
}

/// Scheme and host the client used, as seen through a reverse proxy.
fn request_base_url(headers: &HeaderMap) -> String {
    let proto = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("https");
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");

    format!("{proto}://{host}")
}
