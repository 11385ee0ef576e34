//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::Connection,
    ui::{session::ChatSession, state::AppState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Every event addressed to this socket (replies, direct messages, room
/// broadcasts, read receipts) goes through this channel, so outbound frames
/// on one socket keep their enqueue order.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Wait until one task ends, then abort the other and wait for it to stop.
///
/// A cancelled task may still be inside a poll on another worker; cleanup
/// must not start before that poll has returned.
async fn wait_for_either(mut recv_task: JoinHandle<()>, mut send_task: JoinHandle<()>) {
    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    };
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let connection = Connection::new(tx);
    let connection_id = connection.id;
    tracing::info!(connection_id = %connection_id, "WebSocket connection opened");

    let mut session = ChatSession::new(state.clone(), connection);

    // Frames of one socket are handled one at a time, in arrival order
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, "WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        len = text.len(),
                        "Received text frame"
                    );
                    session.handle_text(text.as_str()).await;
                }
                Message::Binary(_) => {
                    tracing::debug!(connection_id = %connection_id, "Ignoring binary frame");
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!(connection_id = %connection_id, "Client requested close");
                    break;
                }
                _ => {}
            }
        }
        session.close().await;
    });

    let send_task = pusher_loop(rx, sender);
    wait_for_either(recv_task, send_task).await;

    // Runs even when the session task was aborted or panicked
    state.disconnect_usecase.execute(connection_id).await;
    tracing::info!(connection_id = %connection_id, "WebSocket connection closed");
}
