use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use crate::models::{DocumentsResponse, ErrorResponse};
use crate::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    pub owner_id: Option<String>,
}

/// List an owner's documents
pub async fn list_documents(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ListDocumentsQuery>,
) -> Result<(StatusCode, Json<DocumentsResponse>), (StatusCode, Json<ErrorResponse>)> {
    let owner_id = match query.owner_id.filter(|owner_id| !owner_id.is_empty()) {
        Some(owner_id) => owner_id,
        None => {
            let status = StatusCode::BAD_REQUEST;
            return Err((
                status,
                Json(ErrorResponse {
                    message: "Must provide ownerId to get documents".to_string(),
                }),
            ));
        }
    };

    let documents = app_state.store.find_by_owner(&owner_id).await.map_err(|e| {
        error!("Failed to list documents for owner {}: {}", owner_id, e);
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (
            status,
            Json(ErrorResponse {
                message: e.to_string(),
            }),
        )
    })?;

    Ok((StatusCode::OK, Json(DocumentsResponse { documents })))
}
