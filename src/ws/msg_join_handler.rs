use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::SinkExt;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};

use crate::db::{DocStore, StoreError};
use crate::models::{BroadcastMessage, Document, JoinMessage, LoadMessage, NewDocument, ServerMessage};
use crate::AppState;

/// Room handles a connection holds after a successful join
pub struct JoinedSession {
    pub document_id: String,
    pub tx: broadcast::Sender<BroadcastMessage>,
    pub rx: broadcast::Receiver<BroadcastMessage>,
}

/// Handle JoinMessage
///
/// Resolves the document (creating it on first join), admits the connection
/// to the room and pushes the persisted payload back to the joiner only.
/// Returns None when the join is ignored or the store is unreachable; in
/// either case nothing is echoed to the client.
pub async fn handle_join_message(
    join_msg: &JoinMessage,
    connection_id: &str,
    app_state: &Arc<AppState>,
    sender: &Arc<Mutex<SplitSink<WebSocket, Message>>>,
) -> Option<JoinedSession> {
    // A join without a document id is dropped, not answered
    if join_msg.document_id.is_empty() {
        debug!("Ignoring join with empty document id from connection {}", connection_id);
        return None;
    }

    let document = match resolve_document(&app_state.store, join_msg).await {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to resolve document {} for join: {}", join_msg.document_id, e);
            return None;
        }
    };

    let (tx, rx) = app_state
        .registry
        .admit(&join_msg.document_id, connection_id)
        .await;
    info!("Connection {} joined document {}", connection_id, join_msg.document_id);

    // Send the current persisted state to the joining connection only
    let load_msg = ServerMessage::Load(LoadMessage {
        payload: document.payload,
    });
    let load_msg_text = serde_json::to_string(&load_msg).unwrap();
    if sender
        .lock()
        .await
        .send(Message::Text(load_msg_text))
        .await
        .is_err()
    {
        error!("Failed to send load message for document {}", join_msg.document_id);
    }

    Some(JoinedSession {
        document_id: join_msg.document_id.clone(),
        tx,
        rx,
    })
}

/// Fetch the document for (id, owner), creating it with an empty payload on
/// first join. The insert is if-absent, so two racing first-joiners on the
/// same unseen id still end up sharing one record.
async fn resolve_document(
    store: &DocStore,
    join_msg: &JoinMessage,
) -> Result<Document, StoreError> {
    if let Some(document) = store
        .find_by_id_and_owner(&join_msg.document_id, &join_msg.owner_id)
        .await?
    {
        return Ok(document);
    }

    let new = NewDocument::new(
        join_msg.document_id.clone(),
        join_msg.owner_id.clone(),
        join_msg.name.clone(),
    );
    store.create_if_absent(new).await
}
