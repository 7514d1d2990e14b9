use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    UpdateNormal,
    UpdateImportant,
    FriendRequest,
    ListModified,
    #[default]
    #[serde(other)]
    General,
}

impl NotificationKind {
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::UpdateNormal => "🔄",
            NotificationKind::UpdateImportant => "⚠️",
            NotificationKind::FriendRequest => "👋",
            NotificationKind::ListModified => "📝",
            NotificationKind::General => "🔔",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationSender {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub from_user: Option<NotificationSender>,
    #[serde(default)]
    pub list_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_field() {
        let json = r#"{"id": 3, "type": "friend_request", "title": "Hi", "message": "m", "read": false,
                       "created_at": "2025-01-01T00:00:00Z", "from_user": {"name": "Ada", "surname": "L"}}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationKind::FriendRequest);
        assert_eq!(n.from_user.unwrap().name, "Ada");

        let n: Notification = serde_json::from_str(r#"{"id": 4, "type": "promo"}"#).unwrap();
        assert_eq!(n.kind, NotificationKind::General);
    }
}
