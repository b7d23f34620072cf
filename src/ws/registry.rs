use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use crate::models::BroadcastMessage;

const ROOM_CHANNEL_CAPACITY: usize = 100;

struct Room {
    tx: broadcast::Sender<BroadcastMessage>,
    members: HashSet<String>,
}

/// In-memory map from document id to the set of connections viewing it.
///
/// Owned by the transport layer and rebuilt purely from connection events,
/// never persisted. Injected through `AppState` so handlers and tests get it
/// as an explicit dependency.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    rooms: Arc<RwLock<HashMap<String, Room>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to the room for `document_id`, creating the room on
    /// first join. A connection belongs to at most one room, so a second join
    /// replaces the previous membership.
    ///
    /// Returns the room's broadcast sender (for the connection's own edits)
    /// and a fresh receiver (for everyone else's).
    pub async fn admit(
        &self,
        document_id: &str,
        connection_id: &str,
    ) -> (
        broadcast::Sender<BroadcastMessage>,
        broadcast::Receiver<BroadcastMessage>,
    ) {
        let mut rooms = self.rooms.write().await;
        remove_member(&mut rooms, connection_id);

        let room = rooms.entry(document_id.to_string()).or_insert_with(|| {
            debug!("Opening room for document {}", document_id);
            let (tx, _rx) = broadcast::channel(ROOM_CHANNEL_CAPACITY);
            Room {
                tx,
                members: HashSet::new(),
            }
        });
        room.members.insert(connection_id.to_string());
        (room.tx.clone(), room.tx.subscribe())
    }

    /// Remove a connection from whatever room it is in. Tolerates connections
    /// that never joined. Rooms left empty are dropped with the registry entry.
    pub async fn dismiss(&self, connection_id: &str) {
        let mut rooms = self.rooms.write().await;
        remove_member(&mut rooms, connection_id);
    }

    /// Connection ids of everyone in the room except `connection_id`
    pub async fn members_except(&self, document_id: &str, connection_id: &str) -> Vec<String> {
        let rooms = self.rooms.read().await;
        match rooms.get(document_id) {
            Some(room) => room
                .members
                .iter()
                .filter(|member| member.as_str() != connection_id)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}

fn remove_member(rooms: &mut HashMap<String, Room>, connection_id: &str) {
    rooms.retain(|document_id, room| {
        if room.members.remove(connection_id) {
            debug!("Connection {} left room {}", connection_id, document_id);
        }
        !room.members.is_empty()
    });
}
