use tracing::{error, info};

use crate::db::DocStore;
use crate::models::CommitMessage;

/// Handle CommitMessage
///
/// Writes the full snapshot through the store, independent of the broadcast
/// path. Peers are not notified; they already have the state via the edit
/// stream. A store failure drops the event and keeps the connection alive.
pub async fn handle_commit_message(commit_msg: CommitMessage, document_id: &str, store: &DocStore) {
    match store.update_payload(document_id, commit_msg.payload).await {
        Ok(()) => info!("Committed snapshot for document {}", document_id),
        Err(e) => error!("Failed to commit snapshot for document {}: {}", document_id, e),
    }
}
