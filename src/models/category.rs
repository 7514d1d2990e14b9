use serde::{Deserialize, Serialize};

use super::user::UserRef;

fn default_true() -> bool {
    true
}

/// Ownership and sharing flags attached to lists and categories.
///
/// The server omits these for items the caller owns outright, so an absent
/// `is_owner` or `can_edit` means `true`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sharing {
    #[serde(default = "default_true")]
    pub is_owner: bool,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default = "default_true")]
    pub can_edit: bool,
    #[serde(default)]
    pub shared_by: Option<UserRef>,
}

impl Default for Sharing {
    fn default() -> Self {
        Self {
            is_owner: true,
            is_shared: false,
            can_edit: true,
            shared_by: None,
        }
    }
}

/// Optional grouping label applied to lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub sharing: Sharing,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sharing: Sharing::default(),
        }
    }
}
