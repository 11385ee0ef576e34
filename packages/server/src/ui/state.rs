//! Server state shared by the HTTP and WebSocket handlers.

use std::sync::Arc;

use crate::{
    domain::{ChatRepository, MessagePusher},
    infrastructure::message_pusher::ConnectionManager,
    usecase::{
        AuthenticateUseCase, DisconnectUseCase, GetOnlineMembersUseCase, JoinChamaUseCase,
        MarkReadUseCase, SendChamaMessageUseCase, SendDirectMessageUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// AuthenticateUseCase（認証のユースケース）
    pub authenticate_usecase: Arc<AuthenticateUseCase>,
    /// JoinChamaUseCase（チャマ参加のユースケース）
    pub join_chama_usecase: Arc<JoinChamaUseCase>,
    /// SendDirectMessageUseCase（ダイレクトメッセージ送信のユースケース）
    pub send_direct_message_usecase: Arc<SendDirectMessageUseCase>,
    /// SendChamaMessageUseCase（チャマメッセージ送信のユースケース）
    pub send_chama_message_usecase: Arc<SendChamaMessageUseCase>,
    /// MarkReadUseCase（既読のユースケース）
    pub mark_read_usecase: Arc<MarkReadUseCase>,
    /// DisconnectUseCase（切断のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// GetOnlineMembersUseCase（オンラインメンバー取得のユースケース）
    pub get_online_members_usecase: Arc<GetOnlineMembersUseCase>,
    /// ConnectionManager（デバッグ用スナップショットの取得元）
    pub connection_manager: Arc<ConnectionManager>,
}

impl AppState {
    /// Wire every use case to one repository and one connection manager.
    pub fn new(
        repository: Arc<dyn ChatRepository>,
        connection_manager: Arc<ConnectionManager>,
    ) -> Self {
        let message_pusher: Arc<dyn MessagePusher> = connection_manager.clone();
        Self {
            authenticate_usecase: Arc::new(AuthenticateUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            join_chama_usecase: Arc::new(JoinChamaUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            send_direct_message_usecase: Arc::new(SendDirectMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            send_chama_message_usecase: Arc::new(SendChamaMessageUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            mark_read_usecase: Arc::new(MarkReadUseCase::new(repository, message_pusher.clone())),
            disconnect_usecase: Arc::new(DisconnectUseCase::new(message_pusher.clone())),
            get_online_members_usecase: Arc::new(GetOnlineMembersUseCase::new(message_pusher)),
            connection_manager,
        }
    }
}
