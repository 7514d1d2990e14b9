//! Constants used throughout the application
//!
//! This module centralizes magic strings, user-facing text, and default values
//! to keep them consistent between the library and the command-line front-end.

// Remote API
pub const DEFAULT_API_URL: &str = "https://bale231.pythonanywhere.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 300;
/// Environment variable overriding `api.base_url`
pub const ENV_API_URL: &str = "TODOLIST_API_URL";

// Files and directories
pub const APP_DIR_NAME: &str = "todolist";
pub const LOCAL_CONFIG_FILE: &str = "todolist.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SESSION_FILE_NAME: &str = "session.json";
pub const LOG_FILE_NAME: &str = "todolist.log";

// Home view
/// Name of the group holding lists without a category
pub const UNCATEGORIZED_LABEL: &str = "Senza categoria";

// Success Messages
pub const SUCCESS_LOGGED_IN: &str = "✅ Logged in";
pub const SUCCESS_LOGGED_OUT: &str = "✅ Logged out";
pub const SUCCESS_REGISTERED: &str = "✅ Account created";
pub const SUCCESS_LIST_CREATED: &str = "✅ List created";
pub const SUCCESS_LIST_UPDATED: &str = "✅ List updated";
pub const SUCCESS_LIST_DELETED: &str = "✅ List deleted";
pub const SUCCESS_CATEGORY_CREATED: &str = "✅ Category created";
pub const SUCCESS_CATEGORY_UPDATED: &str = "✅ Category updated";
pub const SUCCESS_CATEGORY_DELETED: &str = "✅ Category deleted";
pub const SUCCESS_CATEGORY_SELECTED: &str = "✅ Category filter saved";
pub const SUCCESS_TODO_CREATED: &str = "✅ Todo added";
pub const SUCCESS_TODO_UPDATED: &str = "✅ Todo updated";
pub const SUCCESS_TODO_TOGGLED: &str = "✅ Todo toggled";
pub const SUCCESS_TODO_DELETED: &str = "✅ Todo deleted";
pub const SUCCESS_TODO_MOVED: &str = "✅ Todo moved";
pub const SUCCESS_FRIEND_REMOVED: &str = "✅ Friend removed";
pub const SUCCESS_REQUEST_SENT: &str = "✅ Friend request sent";
pub const SUCCESS_REQUEST_ACCEPTED: &str = "✅ Friend request accepted";
pub const SUCCESS_REQUEST_REJECTED: &str = "✅ Friend request rejected";
pub const SUCCESS_NOTIFICATION_READ: &str = "✅ Notification marked as read";
pub const SUCCESS_NOTIFICATIONS_READ: &str = "✅ All notifications marked as read";
pub const SUCCESS_NOTIFICATION_DELETED: &str = "✅ Notification deleted";
pub const SUCCESS_THEME_UPDATED: &str = "✅ Theme updated";
pub const SUCCESS_ACCOUNT_DEACTIVATED: &str = "✅ Account deactivated";
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";

// Validation Error Messages
pub const ERROR_EMPTY_LIST_NAME: &str = "List name cannot be empty";
pub const ERROR_EMPTY_CATEGORY_NAME: &str = "Category name cannot be empty";
pub const ERROR_EMPTY_TODO_TITLE: &str = "Todo title cannot be empty";
pub const ERROR_MISSING_QUANTITY: &str = "Quantity and unit are both required";
pub const ERROR_INVALID_QUANTITY: &str = "Quantity must be a whole number greater than zero, e.g. 3";
pub const ERROR_TODO_NOT_IN_LIST: &str = "That todo is not in this list";
pub const ERROR_SAME_LIST_MOVE: &str = "Todo is already in that list";
pub const ERROR_UNKNOWN_CATEGORY: &str = "Unknown category";
pub const ERROR_NOT_LOGGED_IN: &str = "❌ Not logged in. Run `todolist login <username>` first";
