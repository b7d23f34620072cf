use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JoinMessage {
    pub document_id: String,
    pub owner_id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EditMessage {
    pub delta: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CommitMessage {
    pub payload: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoadMessage {
    pub payload: serde_json::Value,
}

/// Messages a client may send over the realtime channel
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "join")]
    Join(JoinMessage),
    #[serde(rename = "edit")]
    Edit(EditMessage),
    #[serde(rename = "commit")]
    Commit(CommitMessage),
}

/// Messages the server sends back over the realtime channel
#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "load")]
    Load(LoadMessage),
    #[serde(rename = "edit")]
    Edit(EditMessage),
}

/// Envelope put on a room's broadcast channel. The sender id lets every
/// connection's pump drop the messages it originated instead of echoing them.
#[derive(Debug, Clone)]
pub struct BroadcastMessage {
    pub sender_id: String,
    pub content: String,
}
