use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{BroadcastMessage, ClientMessage};
use crate::ws::msg_commit_handler::handle_commit_message;
use crate::ws::msg_edit_handler::handle_edit_message;
use crate::ws::msg_join_handler::handle_join_message;
use crate::AppState;

/// WebSocket handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    info!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

/// Handle WebSocket connection
///
/// One receive loop per connection. The connection starts with no session,
/// enters one on its first successful join, and a later join replaces the
/// current session. Edits and commits that arrive before any join are
/// dropped silently.
async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    // Unique id for this client, used to suppress broadcast echo
    let connection_id = Uuid::new_v4().to_string();
    info!("WebSocket connection established with connection_id: {}", connection_id);

    let (sender, mut receiver) = socket.split();
    let sender = Arc::new(Mutex::new(sender));

    // Session state for this connection
    let mut room_tx: Option<broadcast::Sender<BroadcastMessage>> = None;
    let mut document_id: Option<String> = None;
    let mut recv_task: Option<JoinHandle<()>> = None;

    while let Some(Ok(Message::Text(msg))) = receiver.next().await {
        // Unparseable frames are dropped; nothing is echoed back
        let client_msg: ClientMessage = match serde_json::from_str(&msg) {
            Ok(client_msg) => client_msg,
            Err(e) => {
                debug!("Ignoring malformed message from connection {}: {}", connection_id, e);
                continue;
            }
        };

        match client_msg {
            ClientMessage::Join(join_msg) => {
                let Some(joined) =
                    handle_join_message(&join_msg, &connection_id, &app_state, &sender).await
                else {
                    continue;
                };

                // A second join supersedes the current session
                if let Some(task) = recv_task.take() {
                    task.abort();
                }
                room_tx = Some(joined.tx);
                document_id = Some(joined.document_id);
                recv_task = Some(spawn_room_pump(
                    joined.rx,
                    connection_id.clone(),
                    sender.clone(),
                ));
            }
            ClientMessage::Edit(edit_msg) => {
                if let Some(tx) = &room_tx {
                    handle_edit_message(&edit_msg, &connection_id, tx);
                }
            }
            ClientMessage::Commit(commit_msg) => {
                if let Some(document_id) = &document_id {
                    handle_commit_message(commit_msg, document_id, &app_state.store).await;
                }
            }
        }
    }

    // Teardown: stop forwarding and leave the room. Remaining peers are not
    // notified and no final commit is forced.
    if let Some(task) = recv_task.take() {
        task.abort();
    }
    app_state.registry.dismiss(&connection_id).await;
    info!("WebSocket connection {} terminated", connection_id);
}

/// Forward room broadcasts to this connection, skipping its own messages
fn spawn_room_pump(
    mut rx: broadcast::Receiver<BroadcastMessage>,
    connection_id: String,
    sender: Arc<Mutex<SplitSink<WebSocket, Message>>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Ok(broadcast_msg) = rx.recv().await {
            if broadcast_msg.sender_id == connection_id {
                continue;
            }
            if sender
                .lock()
                .await
                .send(Message::Text(broadcast_msg.content))
                .await
                .is_err()
            {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DocStore, LifecycleMode};
    use crate::routes::create_routes;
    use crate::ws::registry::SessionRegistry;
    use futures_util::{SinkExt, StreamExt};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::net::TcpStream;
    use tokio_tungstenite::{
        connect_async, tungstenite::Message as WsMessage, MaybeTlsStream, WebSocketStream,
    };

    type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

    async fn spawn_server() -> (String, Arc<AppState>) {
        let app_state = Arc::new(AppState {
            store: DocStore::memory(LifecycleMode::Soft),
            registry: SessionRegistry::new(),
        });
        let app = create_routes(app_state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("ws://{}/ws", addr), app_state)
    }

    async fn connect(url: &str) -> WsClient {
        let (client, _) = connect_async(url).await.unwrap();
        client
    }

    async fn send_json(client: &mut WsClient, value: Value) {
        client
            .send(WsMessage::text(value.to_string()))
            .await
            .unwrap();
    }

    async fn next_json(client: &mut WsClient) -> Option<Value> {
        let msg = tokio::time::timeout(Duration::from_secs(2), client.next())
            .await
            .ok()??
            .ok()?;
        let text = msg.into_text().ok()?;
        serde_json::from_str(&text).ok()
    }

    async fn expect_silence(client: &mut WsClient) {
        let res = tokio::time::timeout(Duration::from_millis(200), client.next()).await;
        assert!(res.is_err(), "expected no message, got {:?}", res);
    }

    async fn join(client: &mut WsClient, document_id: &str) -> Value {
        send_json(
            client,
            json!({
                "type": "join",
                "documentId": document_id,
                "ownerId": "o1",
                "name": "Notes",
            }),
        )
        .await;
        next_json(client).await.expect("expected load after join")
    }

    #[tokio::test]
    async fn join_creates_document_and_loads_empty_payload() {
        let (url, app_state) = spawn_server().await;
        let mut client = connect(&url).await;

        let load = join(&mut client, "doc-1").await;
        assert_eq!(load["type"], "load");
        assert_eq!(load["payload"], json!(""));

        let document = app_state.store.find_by_id("doc-1").await.unwrap().unwrap();
        assert_eq!(document.owner_id, "o1");
        assert_eq!(document.name, "Notes");
    }

    #[tokio::test]
    async fn edit_reaches_the_room_but_not_the_origin_or_other_rooms() {
        let (url, _) = spawn_server().await;
        let mut a = connect(&url).await;
        let mut b = connect(&url).await;
        let mut c = connect(&url).await;
        let mut d = connect(&url).await;

        join(&mut a, "doc-1").await;
        join(&mut b, "doc-1").await;
        join(&mut c, "doc-1").await;
        join(&mut d, "doc-2").await;

        let delta = json!({"ops": [{"insert": "hi"}]});
        send_json(&mut a, json!({"type": "edit", "delta": delta})).await;

        for client in [&mut b, &mut c] {
            let received = next_json(client).await.expect("room member missed edit");
            assert_eq!(received["type"], "edit");
            assert_eq!(received["delta"], delta);
        }
        expect_silence(&mut a).await;
        expect_silence(&mut d).await;
    }

    #[tokio::test]
    async fn commit_then_fresh_join_returns_the_snapshot() {
        let (url, app_state) = spawn_server().await;
        let mut a = connect(&url).await;
        join(&mut a, "doc-1").await;

        let snapshot = json!({"text": "full state"});
        send_json(&mut a, json!({"type": "commit", "payload": snapshot})).await;

        // The commit is fire-and-forget; wait for it to land in the store
        wait_for(|| {
            let store = &app_state.store;
            let snapshot = snapshot.clone();
            async move {
                store
                    .find_by_id("doc-1")
                    .await
                    .unwrap()
                    .map(|d| d.payload == snapshot)
                    .unwrap_or(false)
            }
        })
        .await;

        let mut b = connect(&url).await;
        let load = join(&mut b, "doc-1").await;
        assert_eq!(load["payload"], snapshot);
    }

    #[tokio::test]
    async fn disconnected_peer_no_longer_receives_and_breaks_nothing() {
        let (url, app_state) = spawn_server().await;
        let mut a = connect(&url).await;
        let mut b = connect(&url).await;
        let mut c = connect(&url).await;

        join(&mut a, "doc-1").await;
        join(&mut b, "doc-1").await;
        join(&mut c, "doc-1").await;

        drop(b);
        wait_for(|| {
            let registry = app_state.registry.clone();
            async move { registry.members_except("doc-1", "").await.len() == 2 }
        })
        .await;

        send_json(&mut a, json!({"type": "edit", "delta": "after-leave"})).await;
        let received = next_json(&mut c).await.expect("remaining peer missed edit");
        assert_eq!(received["delta"], "after-leave");
        expect_silence(&mut a).await;
    }

    #[tokio::test]
    async fn second_join_replaces_the_session() {
        let (url, _) = spawn_server().await;
        let mut a = connect(&url).await;
        let mut b = connect(&url).await;
        let mut c = connect(&url).await;

        join(&mut a, "doc-1").await;
        join(&mut b, "doc-1").await;
        join(&mut c, "doc-2").await;

        // A moves to doc-2; its doc-1 membership is superseded
        join(&mut a, "doc-2").await;

        send_json(&mut b, json!({"type": "edit", "delta": "doc-1 traffic"})).await;
        expect_silence(&mut a).await;

        send_json(&mut c, json!({"type": "edit", "delta": "doc-2 traffic"})).await;
        let received = next_json(&mut a).await.expect("missed edit in new room");
        assert_eq!(received["delta"], "doc-2 traffic");
    }

    #[tokio::test]
    async fn events_before_join_and_malformed_frames_are_ignored() {
        let (url, app_state) = spawn_server().await;
        let mut client = connect(&url).await;

        send_json(&mut client, json!({"type": "edit", "delta": "too early"})).await;
        send_json(&mut client, json!({"type": "commit", "payload": "too early"})).await;
        client
            .send(WsMessage::text("definitely not json"))
            .await
            .unwrap();
        expect_silence(&mut client).await;

        // Joining with an empty document id loads nothing and creates nothing
        send_json(
            &mut client,
            json!({"type": "join", "documentId": "", "ownerId": "o1", "name": "Notes"}),
        )
        .await;
        expect_silence(&mut client).await;
        assert!(app_state.store.find_by_id("").await.unwrap().is_none());

        // The connection is still usable afterwards
        let load = join(&mut client, "doc-1").await;
        assert_eq!(load["type"], "load");
    }

    #[tokio::test]
    async fn concurrent_first_joins_leave_one_record() {
        let (url, app_state) = spawn_server().await;
        let mut a = connect(&url).await;
        let mut b = connect(&url).await;

        let (load_a, load_b) = tokio::join!(join(&mut a, "doc-race"), join(&mut b, "doc-race"));
        assert_eq!(load_a["payload"], load_b["payload"]);

        assert!(app_state
            .store
            .find_by_id("doc-race")
            .await
            .unwrap()
            .is_some());
        assert_eq!(app_state.registry.members_except("doc-race", "").await.len(), 2);
    }

    async fn wait_for<F, Fut>(mut probe: F)
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = bool>,
    {
        for _ in 0..50 {
            if probe().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("condition not reached in time");
    }
}
