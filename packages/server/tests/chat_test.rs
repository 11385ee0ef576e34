//! Integration tests for the chat socket and the HTTP endpoints.
//!
//! Each test starts the server in-process on a random port, seeded from
//! `data/seed.example.json`:
//! - Wanjiku (7): member of Umoja (3) and Harambee (5)
//! - Otieno (9): member of Umoja (3)
//! - Akinyi (11): member of Maendeleo (8)

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};
use tujifund_chat::{
    infrastructure::{
        message_pusher::ConnectionManager,
        repository::{InMemoryChatRepository, SeedData},
    },
    ui::{AppState, build_router},
};
use tujifund_shared::time::FixedClock;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const NOW: i64 = 1672520400000;
const SEED: &str = include_str!("../../../data/seed.example.json");

struct TestServer {
    addr: SocketAddr,
    repository: Arc<InMemoryChatRepository>,
}

impl TestServer {
    async fn start() -> Self {
        let seed = SeedData::from_json(SEED).unwrap();
        let repository = Arc::new(
            InMemoryChatRepository::from_seed(seed, Arc::new(FixedClock::new(NOW)))
                .await
                .unwrap(),
        );
        let state = Arc::new(AppState::new(
            repository.clone(),
            Arc::new(ConnectionManager::new()),
        ));

        let app = build_router(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, repository }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn connect(&self) -> Socket {
        let (socket, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws", self.addr))
            .await
            .expect("Failed to connect to WebSocket");
        socket
    }

    /// Connect and authenticate as `user_id`.
    async fn login(&self, user_id: i64) -> Socket {
        let mut socket = self.connect().await;
        send(&mut socket, json!({"type": "auth", "userId": user_id})).await;
        assert_eq!(
            recv(&mut socket).await,
            json!({"type": "auth_success", "userId": user_id})
        );
        socket
    }

    async fn get_json(&self, path: &str) -> Value {
        let resp = reqwest::get(self.url(path)).await.unwrap();
        assert_eq!(resp.status(), 200, "GET {}", path);
        resp.json().await.unwrap()
    }

    async fn online(&self, chama_id: i64) -> Value {
        self.get_json(&format!("/api/chamas/{}/online", chama_id))
            .await["onlineUserIds"]
            .clone()
    }

    /// Poll the debug endpoint until `done` holds; cleanup runs after the socket task ends.
    async fn wait_for_connections(&self, done: impl Fn(&Value) -> bool) -> Value {
        for _ in 0..50 {
            let snapshot = self.get_json("/debug/connections").await;
            if done(&snapshot) {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("connection state did not settle");
    }
}

async fn send(socket: &mut Socket, frame: Value) {
    send_text(socket, &frame.to_string()).await;
}

async fn send_text(socket: &mut Socket, text: &str) {
    socket.send(Message::Text(text.into())).await.unwrap();
}

async fn recv(socket: &mut Socket) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(2), socket.next())
            .await
            .expect("Expected a frame within timeout")
            .expect("Socket closed")
            .unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn assert_silent(socket: &mut Socket) {
    let result = tokio::time::timeout(Duration::from_millis(200), socket.next()).await;
    assert!(result.is_err(), "Expected no frame, got {:?}", result);
}

async fn join(socket: &mut Socket, chama_id: i64) {
    send(socket, json!({"type": "join_chama", "chamaId": chama_id})).await;
    assert_eq!(
        recv(socket).await,
        json!({"type": "join_chama_success", "chamaId": chama_id})
    );
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックが ok を返す
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let body = server.get_json("/api/health").await;

    // then (期待する結果):
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_online_endpoint_rejects_non_numeric_id() {
    // テスト項目: 数値でないチャマ ID は 400 になる
    // given (前提条件):
    let server = TestServer::start().await;

    // when (操作):
    let resp = reqwest::get(server.url("/api/chamas/umoja/online")).await.unwrap();

    // then (期待する結果):
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_direct_message_to_offline_user_is_persisted() {
    // テスト項目: オフラインの受信者へのメッセージは未読で保存され、送信者に message_sent が返る
    // given (前提条件):
    let server = TestServer::start().await;
    let mut wanjiku = server.login(7).await;

    // when (操作):
    send(
        &mut wanjiku,
        json!({"type": "direct_message", "receiverId": 9, "content": "Habari Otieno"}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(
        recv(&mut wanjiku).await,
        json!({"type": "message_sent", "messageId": 1})
    );
    let messages = server.repository.messages().await;
    assert_eq!(messages.len(), 1);
    assert!(!messages[0].is_read);
    assert_eq!(messages[0].content.as_str(), "Habari Otieno");
}

#[tokio::test]
async fn test_direct_message_live_delivery() {
    // テスト項目: オンラインの受信者にはメッセージ全体と送信者情報が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut wanjiku = server.login(7).await;
    let mut otieno = server.login(9).await;

    // when (操作):
    send(
        &mut wanjiku,
        json!({
            "type": "direct_message",
            "receiverId": 9,
            "content": "Mchango wa wiki",
            "itemId": 42
        }),
    )
    .await;

    // then (期待する結果):
    assert_eq!(
        recv(&mut otieno).await,
        json!({
            "type": "direct_message",
            "message": {
                "id": 1,
                "senderId": 7,
                "receiverId": 9,
                "chamaId": null,
                "itemId": 42,
                "content": "Mchango wa wiki",
                "isRead": false,
                "sentAt": "2023-01-01T00:00:00+03:00",
                "sender": {
                    "id": 7,
                    "username": "wanjiku",
                    "fullName": "Wanjiku Kamau",
                    "profilePic": "/avatars/7.png"
                }
            }
        })
    );
    assert_eq!(
        recv(&mut wanjiku).await,
        json!({"type": "message_sent", "messageId": 1})
    );
}

#[tokio::test]
async fn test_chama_message_room_broadcast_and_switch() {
    // テスト項目: チャマメッセージは現在のルームの購読者だけに届き、切り替え後は旧ルームに届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut wanjiku = server.login(7).await;
    let mut otieno = server.login(9).await;
    join(&mut wanjiku, 3).await;
    join(&mut otieno, 3).await;
    assert_eq!(server.online(3).await, json!([7, 9]));

    // when (操作):
    send(
        &mut otieno,
        json!({"type": "chama_message", "chamaId": 3, "content": "Mkutano ni Jumamosi"}),
    )
    .await;

    // then (期待する結果):
    let delivered = recv(&mut wanjiku).await;
    assert_eq!(delivered["type"], "chama_message");
    assert_eq!(delivered["message"]["chamaId"], 3);
    assert_eq!(delivered["message"]["receiverId"], Value::Null);
    let echoed = recv(&mut otieno).await;
    assert_eq!(echoed, delivered);
    assert_eq!(
        recv(&mut otieno).await,
        json!({"type": "message_sent", "messageId": 1})
    );

    // when (操作): Wanjiku がハランベーに切り替える
    join(&mut wanjiku, 5).await;
    send(
        &mut otieno,
        json!({"type": "chama_message", "chamaId": 3, "content": "Karibu"}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(recv(&mut otieno).await["type"], "chama_message");
    assert_eq!(recv(&mut otieno).await["type"], "message_sent");
    assert_silent(&mut wanjiku).await;
    assert_eq!(server.online(3).await, json!([9]));
    assert_eq!(server.online(5).await, json!([7]));
}

#[tokio::test]
async fn test_join_chama_errors() {
    // テスト項目: 存在しないチャマ、メンバーでないチャマへの参加はエラーになる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut otieno = server.login(9).await;

    // when (操作):
    send(&mut otieno, json!({"type": "join_chama", "chamaId": 5})).await;
    let not_member = recv(&mut otieno).await;
    send(&mut otieno, json!({"type": "join_chama", "chamaId": 999})).await;
    let not_found = recv(&mut otieno).await;

    // then (期待する結果):
    assert_eq!(
        not_member,
        json!({"type": "error", "message": "You are not a member of this chama"})
    );
    assert_eq!(not_found, json!({"type": "error", "message": "Chama not found"}));
    assert_eq!(server.online(5).await, json!([]));
}

#[tokio::test]
async fn test_mark_read_notifies_sender_once() {
    // テスト項目: 受信者の既読で送信者に message_read が届き、二回目は通知されない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut wanjiku = server.login(7).await;
    let mut otieno = server.login(9).await;
    send(
        &mut wanjiku,
        json!({"type": "direct_message", "receiverId": 9, "content": "Umelipa?"}),
    )
    .await;
    recv(&mut otieno).await;
    recv(&mut wanjiku).await;

    // when (操作):
    send(&mut otieno, json!({"type": "mark_read", "messageId": 1})).await;

    // then (期待する結果):
    assert_eq!(
        recv(&mut wanjiku).await,
        json!({"type": "message_read", "messageId": 1, "readBy": 9})
    );
    assert!(server.repository.messages().await[0].is_read);

    // when (操作): もう一度既読にする
    send(&mut otieno, json!({"type": "mark_read", "messageId": 1})).await;

    // then (期待する結果):
    assert_silent(&mut wanjiku).await;
    assert_silent(&mut otieno).await;
}

#[tokio::test]
async fn test_mark_read_by_stranger_is_rejected() {
    // テスト項目: 受信者でもチャマメンバーでもないユーザーは既読にできない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut wanjiku = server.login(7).await;
    let mut akinyi = server.login(11).await;
    send(
        &mut wanjiku,
        json!({"type": "direct_message", "receiverId": 9, "content": "Siri"}),
    )
    .await;
    recv(&mut wanjiku).await;

    // when (操作):
    send(&mut akinyi, json!({"type": "mark_read", "messageId": 1})).await;
    let rejected = recv(&mut akinyi).await;
    send(&mut akinyi, json!({"type": "mark_read", "messageId": 77})).await;
    let missing = recv(&mut akinyi).await;

    // then (期待する結果):
    assert_eq!(
        rejected,
        json!({"type": "error", "message": "Not authorized to mark this message as read"})
    );
    assert_eq!(missing, json!({"type": "error", "message": "Message not found"}));
    assert!(!server.repository.messages().await[0].is_read);
}

#[tokio::test]
async fn test_frames_before_auth_are_rejected() {
    // テスト項目: 認証前のフレームは Not authenticated になり、何も保存されない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut socket = server.connect().await;

    // when (操作):
    send(
        &mut socket,
        json!({"type": "chama_message", "chamaId": 3, "content": "hi"}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(
        recv(&mut socket).await,
        json!({"type": "error", "message": "Not authenticated"})
    );
    assert!(server.repository.messages().await.is_empty());
}

#[tokio::test]
async fn test_invalid_frames_keep_socket_open() {
    // テスト項目: 不正なフレームは error を返し、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut socket = server.login(7).await;

    for text in [
        "not json at all",
        r#"{"type":"teleport"}"#,
        r#"{"type":"direct_message","receiverId":9}"#,
        r#"{"type":"direct_message","receiverId":9,"content":"   "}"#,
    ] {
        // when (操作):
        send_text(&mut socket, text).await;

        // then (期待する結果):
        let reply = recv(&mut socket).await;
        assert_eq!(reply["type"], "error", "frame {}", text);
        assert!(
            reply["message"]
                .as_str()
                .unwrap()
                .starts_with("Invalid message format"),
            "frame {}",
            text
        );
    }
    send(&mut socket, json!({"type": "join_chama", "chamaId": 3})).await;
    assert_eq!(recv(&mut socket).await["type"], "join_chama_success");
}

#[tokio::test]
async fn test_disconnect_cleans_up_registry_and_rooms() {
    // テスト項目: 切断後はレジストリとルームから消え、オンライン一覧にも出ない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut wanjiku = server.login(7).await;
    let mut otieno = server.login(9).await;
    join(&mut wanjiku, 3).await;
    join(&mut otieno, 3).await;

    // when (操作):
    wanjiku.close(None).await.unwrap();

    // then (期待する結果):
    let snapshot = server
        .wait_for_connections(|s| s["registry"].as_array().map(Vec::len) == Some(1))
        .await;
    assert_eq!(snapshot["registry"][0]["userId"], 9);
    assert_eq!(snapshot["rooms"][0]["connectionIds"].as_array().unwrap().len(), 1);
    assert_eq!(server.online(3).await, json!([9]));

    // a message to the departed user is still stored
    send(
        &mut otieno,
        json!({"type": "direct_message", "receiverId": 7, "content": "Uko wapi?"}),
    )
    .await;
    assert_eq!(recv(&mut otieno).await["type"], "message_sent");
}

#[tokio::test]
async fn test_newer_connection_replaces_older_for_same_user() {
    // テスト項目: 同じユーザーの新しい接続がレジストリを置き換え、古い接続の切断で消えない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut first = server.login(9).await;
    let mut second = server.login(9).await;
    let mut wanjiku = server.login(7).await;

    // when (操作):
    send(
        &mut wanjiku,
        json!({"type": "direct_message", "receiverId": 9, "content": "Salamu"}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(recv(&mut second).await["type"], "direct_message");
    assert_silent(&mut first).await;
    recv(&mut wanjiku).await;

    // when (操作): 古い接続を閉じる
    first.close(None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    send(
        &mut wanjiku,
        json!({"type": "direct_message", "receiverId": 9, "content": "Bado uko?"}),
    )
    .await;

    // then (期待する結果):
    assert_eq!(recv(&mut second).await["message"]["content"], "Bado uko?");
    let snapshot = server.get_json("/debug/connections").await;
    assert_eq!(snapshot["registry"].as_array().unwrap().len(), 2);
}
