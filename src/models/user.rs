use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Capability flags granted to a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub can_search: bool,
    pub can_download: bool,
    pub can_upload: bool,
}

impl Permissions {
    pub fn all() -> Self {
        Self {
            can_search: true,
            can_download: true,
            can_upload: true,
        }
    }
}

/// Database user model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub hashed_password: Option<String>,
    pub can_search: Option<bool>,
    pub can_download: Option<bool>,
    pub can_upload: Option<bool>,
    pub user_group: Option<String>,
    pub token_start_time: Option<i64>,
    pub token_api_interactions: Option<i64>,
    pub password_salt: Option<String>,
    pub password_rounds: Option<i64>,
}

impl User {
    /// Missing flags count as not granted.
    pub fn permissions(&self) -> Permissions {
        Permissions {
            can_search: self.can_search.unwrap_or(false),
            can_download: self.can_download.unwrap_or(false),
            can_upload: self.can_upload.unwrap_or(false),
        }
    }

    /// Issuance time of the current token, if one was ever recorded.
    pub fn token_issued_at(&self) -> Option<DateTime<Utc>> {
        self.token_start_time
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// A user row about to be inserted. The password fields are expected to be
/// produced by the registry's hashing routine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub hashed_password: String,
    pub password_salt: String,
    pub password_rounds: i64,
    pub permissions: Permissions,
    pub user_group: String,
    pub token_start_time: i64,
    pub token_api_interactions: i64,
}

impl NewUser {
    /// Starts a fresh token window at the current time with no interactions.
    pub fn new(
        username: impl Into<String>,
        hashed_password: impl Into<String>,
        password_salt: impl Into<String>,
        password_rounds: i64,
    ) -> Self {
        Self {
            username: username.into(),
            hashed_password: hashed_password.into(),
            password_salt: password_salt.into(),
            password_rounds,
            permissions: Permissions::default(),
            user_group: String::new(),
            token_start_time: Utc::now().timestamp(),
            token_api_interactions: 0,
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.user_group = group.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_token_window_now() {
        let before = Utc::now().timestamp();
        let user = NewUser::new("alice", "hash", "salt", 4500);
        assert!(user.token_start_time >= before);
        assert_eq!(user.token_api_interactions, 0);
        assert_eq!(user.permissions, Permissions::default());
    }

    #[test]
    fn token_issued_at_converts_epoch_seconds() {
        let user = User {
            id: 1,
            username: "bob".into(),
            hashed_password: None,
            can_search: Some(true),
            can_download: None,
            can_upload: Some(false),
            user_group: None,
            token_start_time: Some(1_700_000_000),
            token_api_interactions: Some(3),
            password_salt: None,
            password_rounds: None,
        };

        let issued = user.token_issued_at().unwrap();
        assert_eq!(issued.timestamp(), 1_700_000_000);
        assert_eq!(
            user.permissions(),
            Permissions {
                can_search: true,
                can_download: false,
                can_upload: false,
            }
        );
    }
}
