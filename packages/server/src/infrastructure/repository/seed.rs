//! JSON seed data for the in-memory repository.
//!
//! ```json
//! {
//!   "users": [{"id": 7, "username": "wanjiku", "full_name": "Wanjiku Kamau", "profile_pic": null}],
//!   "chamas": [{"id": 3, "name": "Umoja Savings"}],
//!   "members": [{"chama_id": 3, "user_id": 7, "role": "admin"}]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Chama, ChamaMember, User};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("member references unknown user {0}")]
    UnknownUser(i64),

    #[error("member references unknown chama {0}")]
    UnknownChama(i64),
}

/// Users, chamas and memberships to preload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub chamas: Vec<Chama>,
    #[serde(default)]
    pub members: Vec<ChamaMember>,
}

impl SeedData {
    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChamaId, MemberRole, UserId};

    #[test]
    fn test_parse_seed_with_default_role() {
        // テスト項目: role 省略時は member として読み込まれる
        // given (前提条件):
        let text = r#"{
            "users": [{"id": 7, "username": "wanjiku", "full_name": "Wanjiku Kamau", "profile_pic": null}],
            "chamas": [{"id": 3, "name": "Umoja Savings"}],
            "members": [{"chama_id": 3, "user_id": 7}]
        }"#;

        // when (操作):
        let seed = SeedData::from_json(text).unwrap();

        // then (期待する結果):
        assert_eq!(seed.users[0].id, UserId::new(7));
        assert_eq!(seed.chamas[0].id, ChamaId::new(3));
        assert_eq!(seed.members[0].role, MemberRole::Member);
    }

    #[test]
    fn test_parse_seed_rejects_invalid_json() {
        // テスト項目: 不正な JSON は Parse エラーになる
        // given (前提条件):
        let text = r#"{"users": [{"id": "seven"}]}"#;

        // when (操作):
        let result = SeedData::from_json(text);

        // then (期待する結果):
        assert!(matches!(result, Err(SeedError::Parse(_))));
    }

    #[tokio::test]
    async fn test_from_missing_file_is_io_error() {
        // テスト項目: 存在しないファイルは Io エラーになる
        // given (前提条件):
        let path = "/nonexistent/tujifund-seed.json";

        // when (操作):
        let result = SeedData::from_file(path).await;

        // then (期待する結果):
        assert!(matches!(result, Err(SeedError::Io(_))));
    }
}
