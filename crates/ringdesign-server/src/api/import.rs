use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use ringdesign_scraper::{ImportError, ImportedRing};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct ImportRequest {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImportSuccess {
    success: bool,
    #[serde(flatten)]
    ring: ImportedRing,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportFailure {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    supported_vendors: Option<Vec<String>>,
}

pub(super) async fn import_ring(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ImportRequest>, JsonRejection>,
) -> Response {
    let raw_url = match body {
        Ok(Json(ImportRequest { url: Some(url) })) => url,
        Ok(_) => String::new(),
        Err(rejection) => {
            tracing::debug!(request_id = %req_id.0, error = %rejection, "unreadable import body");
            String::new()
        }
    };

    match state.importer.import(&raw_url).await {
        Ok(ring) => {
            tracing::info!(
                request_id = %req_id.0,
                vendor = %ring.vendor,
                images = ring.images.len(),
                "ring imported"
            );
            (
                StatusCode::OK,
                Json(ImportSuccess {
                    success: true,
                    ring,
                }),
            )
                .into_response()
        }
        Err(error) => failure_response(&state, &req_id, &error),
    }
}

fn failure_response(state: &AppState, req_id: &RequestId, error: &ImportError) -> Response {
    if matches!(error, ImportError::Internal { .. }) {
        tracing::error!(request_id = %req_id.0, error = %error, "ring import failed");
    } else {
        tracing::warn!(request_id = %req_id.0, code = error.code(), error = %error, "ring import rejected");
    }

    let supported_vendors = matches!(error, ImportError::UnsupportedVendor { .. })
        .then(|| state.importer.registry().names());
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (
        status,
        Json(ImportFailure {
            error: error.code(),
            message: error.user_message(),
            supported_vendors,
        }),
    )
        .into_response()
}
