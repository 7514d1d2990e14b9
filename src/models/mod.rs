//! Wire models shared by the REST backend, the services and the front-end.
//!
//! Every type here mirrors a JSON payload of the remote API. Optional flags
//! the server may omit carry serde defaults so partial payloads still parse.

pub mod category;
pub mod list;
pub mod notification;
pub mod preferences;
pub mod todo;
pub mod user;

pub use category::{Category, Sharing};
pub use list::{ListColor, TodoList};
pub use notification::{Notification, NotificationKind, NotificationSender};
pub use preferences::{SortOption, TodoSortOrder};
pub use todo::TodoItem;
pub use user::{CurrentUser, FriendRequest, Friendship, FriendshipStatus, Share, Theme, User, UserRef};
