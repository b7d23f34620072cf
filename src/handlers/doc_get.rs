use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::error;

use crate::models::{ErrorResponse, FetchDocumentResponse};
use crate::AppState;

/// Fetch a document by uid
///
/// Absent uids answer 200 with a null document rather than 404.
pub async fn get_document(
    State(app_state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<(StatusCode, Json<FetchDocumentResponse>), (StatusCode, Json<ErrorResponse>)> {
    let document = app_state.store.find_by_id(&uid).await.map_err(|e| {
        error!("Failed to fetch document {}: {}", uid, e);
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (
            status,
            Json(ErrorResponse {
                message: e.to_string(),
            }),
        )
    })?;

    Ok((StatusCode::OK, Json(FetchDocumentResponse { document })))
}
