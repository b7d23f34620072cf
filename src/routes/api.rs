use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    clone_document, create_document, delete_document, get_document, hard_delete_document,
    health_check, list_documents, rename_document,
};
use crate::ws::handler::websocket_handler;
use crate::AppState;

/// Create API routes
pub fn create_routes(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/documents", get(list_documents))
        .route("/document", post(create_document).patch(rename_document))
        .route("/document/:uid", get(get_document).delete(delete_document))
        .route("/document/h/:uid", delete(hard_delete_document))
        .route("/clone-document", post(clone_document))
        .route("/ws", get(websocket_handler))
        .with_state(app_state)
}
