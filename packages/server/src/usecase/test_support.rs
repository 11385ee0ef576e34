//! Fixtures shared by the use case and session tests.

use std::sync::Arc;

use tokio::sync::mpsc;
use tujifund_shared::time::FixedClock;

use crate::{
    domain::{
        AuthenticatedSession, Chama, ChamaId, ChamaMember, Connection, MemberRole, SessionState,
        User, UserId,
    },
    infrastructure::repository::InMemoryChatRepository,
};

pub const NOW: i64 = 1672520400000;

pub const WANJIKU: i64 = 7;
pub const OTIENO: i64 = 9;
pub const AKINYI: i64 = 11;

pub const UMOJA: i64 = 3;
pub const HARAMBEE: i64 = 5;
pub const MAENDELEO: i64 = 8;

fn user(id: i64, username: &str, full_name: &str) -> User {
    User {
        id: UserId::new(id),
        username: username.to_string(),
        full_name: full_name.to_string(),
        profile_pic: Some(format!("/avatars/{}.png", id)),
    }
}

/// Users 7, 9, 11; chamas 3, 5, 8.
/// Wanjiku (7) belongs to 3 and 5, Otieno (9) to 3, Akinyi (11) to 8.
pub async fn seeded_repository() -> Arc<InMemoryChatRepository> {
    let repository = InMemoryChatRepository::new(Arc::new(FixedClock::new(NOW)));
    repository.insert_user(user(WANJIKU, "wanjiku", "Wanjiku Kamau")).await;
    repository.insert_user(user(OTIENO, "otieno", "Brian Otieno")).await;
    repository.insert_user(user(AKINYI, "akinyi", "Akinyi Odhiambo")).await;
    for (id, name) in [(UMOJA, "Umoja"), (HARAMBEE, "Harambee"), (MAENDELEO, "Maendeleo")] {
        repository
            .insert_chama(Chama {
                id: ChamaId::new(id),
                name: name.to_string(),
            })
            .await;
    }
    for (chama_id, user_id) in [
        (UMOJA, WANJIKU),
        (HARAMBEE, WANJIKU),
        (UMOJA, OTIENO),
        (MAENDELEO, AKINYI),
    ] {
        repository
            .insert_member(ChamaMember {
                chama_id: ChamaId::new(chama_id),
                user_id: UserId::new(user_id),
                role: MemberRole::Member,
            })
            .await
            .unwrap();
    }
    Arc::new(repository)
}

pub fn connection() -> (Connection, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Connection::new(tx), rx)
}

pub fn principal(user_id: i64) -> AuthenticatedSession {
    let mut state = SessionState::default();
    state.authenticate(UserId::new(user_id)).unwrap()
}

/// Next queued frame on a socket, decoded as JSON.
pub fn next_frame(rx: &mut mpsc::UnboundedReceiver<String>) -> Option<serde_json::Value> {
    rx.try_recv()
        .ok()
        .map(|text| serde_json::from_str(&text).unwrap())
}
