use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::models::{
    CreateDocumentRequest, DocumentData, DocumentResponse, ErrorResponse, NewDocument,
};
use crate::AppState;

/// Clone a document
///
/// The copy gets a fresh uid and a name derived with a unique suffix. The
/// payload comes from the request body, not from the source record; callers
/// ship the state they want cloned.
pub async fn clone_document(
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

    let derived_name = format!("{} - {}", name, Uuid::new_v4());
    let mut new = NewDocument::new(Uuid::new_v4().to_string(), owner_id, derived_name);
    new.cloned = true;
    if let Some(payload) = req.payload {
        new.payload = payload;
    }

    let document = app_state.store.create(new).await.map_err(|e| {
        error!("Failed to clone document: {}", e);
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
            message: "Document cloned successfully.".to_string(),
            data: DocumentData { document },
        }),
    ))
}
