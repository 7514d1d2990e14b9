use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compact user reference embedded in other payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated user as returned by `/jwt-user/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
}

/// Relationship between the caller and a user found by search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipStatus {
    Friends,
    PendingSent,
    PendingReceived,
    #[default]
    #[serde(other)]
    None,
}

/// A user search result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub friendship_status: FriendshipStatus,
}

impl User {
    /// Friend requests make no sense towards friends or users already asked.
    pub fn can_send_request(&self) -> bool {
        !matches!(
            self.friendship_status,
            FriendshipStatus::Friends | FriendshipStatus::PendingSent
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Friendship {
    pub id: i64,
    pub friend: UserRef,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: i64,
    pub from_user: UserRef,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A user a list is shared with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friendship_status_tolerates_unknown_values() {
        let user: User =
            serde_json::from_str(r#"{"id": 1, "username": "bo", "friendship_status": "blocked"}"#).unwrap();
        assert_eq!(user.friendship_status, FriendshipStatus::None);
        assert!(user.can_send_request());
    }

    #[test]
    fn friendship_status_round_trips_known_values() {
        let user: User =
            serde_json::from_str(r#"{"id": 2, "username": "cy", "friendship_status": "pending_received"}"#).unwrap();
        assert_eq!(user.friendship_status, FriendshipStatus::PendingReceived);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["friendship_status"], "pending_received");

        let missing: User = serde_json::from_str(r#"{"id": 3, "username": "di"}"#).unwrap();
        assert_eq!(missing.friendship_status, FriendshipStatus::None);
    }

    #[test]
    fn pending_and_friends_block_new_requests() {
        let mut user: User =
            serde_json::from_str(r#"{"id": 1, "username": "bo", "friendship_status": "pending_sent"}"#).unwrap();
        assert!(!user.can_send_request());
        user.friendship_status = FriendshipStatus::Friends;
        assert!(!user.can_send_request());
        user.friendship_status = FriendshipStatus::PendingReceived;
        assert!(user.can_send_request());
    }
}
