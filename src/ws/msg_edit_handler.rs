use tokio::sync::broadcast::Sender;
use tracing::debug;

use crate::models::{BroadcastMessage, EditMessage, ServerMessage};

/// Handle EditMessage
///
/// Fans the delta out to the rest of the room, verbatim. The delta is never
/// inspected and never persisted; peers that join later never see it.
pub fn handle_edit_message(
    edit_msg: &EditMessage,
    connection_id: &str,
    tx: &Sender<BroadcastMessage>,
) {
    let broadcast_msg = BroadcastMessage {
        sender_id: connection_id.to_string(),
        content: serde_json::to_string(&ServerMessage::Edit(edit_msg.clone())).unwrap(),
    };

    // Err only means nobody else is subscribed right now
    if let Err(e) = tx.send(broadcast_msg) {
        debug!("No peers to receive edit from connection {}: {}", connection_id, e);
    }
}
