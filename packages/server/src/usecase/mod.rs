//! UseCase 層
//!
//! クライアントフレームの種類ごとにひとつのユースケースを持つ。
//! 各ユースケースは Repository と MessagePusher の trait にのみ依存する。

mod authenticate;
mod disconnect;
mod error;
mod get_online_members;
mod join_chama;
mod mark_read;
mod send_chama_message;
mod send_direct_message;
#[cfg(test)]
pub(crate) mod test_support;

pub use authenticate::AuthenticateUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::ChatError;
pub use get_online_members::GetOnlineMembersUseCase;
pub use join_chama::JoinChamaUseCase;
pub use mark_read::MarkReadUseCase;
pub use send_chama_message::SendChamaMessageUseCase;
pub use send_direct_message::SendDirectMessageUseCase;
