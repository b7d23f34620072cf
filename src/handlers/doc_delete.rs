use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::error;

use crate::db::LifecycleMode;
use crate::models::ErrorResponse;
use crate::AppState;

/// Delete a document according to the configured lifecycle mode
///
/// Soft mode flips the active flag; hard mode removes the record. Deleting
/// an absent uid succeeds vacuously either way.
pub async fn delete_document(
    State(app_state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let result = match app_state.store.lifecycle() {
        LifecycleMode::Soft => app_state.store.soft_delete(&uid).await,
        LifecycleMode::Hard => app_state.store.hard_delete(&uid).await,
    };

    result.map_err(|e| {
        error!("Failed to delete document {}: {}", uid, e);
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

/// Remove a document record entirely, regardless of lifecycle mode
pub async fn hard_delete_document(
    State(app_state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    app_state.store.hard_delete(&uid).await.map_err(|e| {
        error!("Failed to hard delete document {}: {}", uid, e);
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
