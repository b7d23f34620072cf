use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::error;

use crate::models::{ErrorResponse, RenameDocumentRequest};
use crate::AppState;

/// Rename a document
///
/// Renaming an absent uid succeeds vacuously.
pub async fn rename_document(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<RenameDocumentRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let (uid, name) = match (
        req.uid.filter(|uid| !uid.is_empty()),
        req.name.filter(|name| !name.is_empty()),
    ) {
        (Some(uid), Some(name)) => (uid, name),
        _ => {
            let status = StatusCode::BAD_REQUEST;
            return Err((
                status,
                Json(ErrorResponse {
                    message: "Must provide document name and uid".to_string(),
                }),
            ));
        }
    };

    app_state.store.rename(&uid, &name).await.map_err(|e| {
        error!("Failed to rename document {}: {}", uid, e);
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (
            status,
            Json(ErrorResponse {
                message: e.to_string(),
            }),
        )
    })?;

    Ok(StatusCode::NO_CONTENT)
}
