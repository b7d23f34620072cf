use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::db::LifecycleMode;
use crate::models::{
    CreateDocumentRequest, DocumentData, DocumentResponse, ErrorResponse, NewDocument,
};
use crate::AppState;

/// Create a new document
pub async fn create_document(
    State(app_state): State<Arc<AppState>>,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), (StatusCode, Json<ErrorResponse>)> {
    let (owner_id, name) = match (
        req.owner_id.filter(|owner_id| !owner_id.is_empty()),
        req.name.filter(|name| !name.is_empty()),
    ) {
        (Some(owner_id), Some(name)) => (owner_id, name),
        _ => {
            let status = StatusCode::BAD_REQUEST;
            return Err((
                status,
                Json(ErrorResponse {
                    message: "Must provide document name and ownerId".to_string(),
                }),
            ));
        }
    };

    // Duplicate active names are only meaningful when deletes are soft
    if app_state.store.lifecycle() == LifecycleMode::Soft {
        let existing = app_state
            .store
            .find_active_by_name(&name)
            .await
            .map_err(|e| {
                error!("Failed to check name collision for '{}': {}", name, e);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (
                    status,
                    Json(ErrorResponse {
                        message: e.to_string(),
                    }),
                )
            })?;
        if existing.is_some() {
            let status = StatusCode::BAD_REQUEST;
            return Err((
                status,
                Json(ErrorResponse {
                    message: format!("Document: \"{}\" already exists", name),
                }),
            ));
        }
    }

    let mut new = NewDocument::new(Uuid::new_v4().to_string(), owner_id, name);
    if let Some(payload) = req.payload {
        new.payload = payload;
    }

    let document = app_state.store.create(new).await.map_err(|e| {
        error!("Failed to create document: {}", e);
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (
            status,
            Json(ErrorResponse {
                message: e.to_string(),
            }),
        )
    })?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse {
            message: "Document created successfully.".to_string(),
            data: DocumentData { document },
        }),
    ))
}
