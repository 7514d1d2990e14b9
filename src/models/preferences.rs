//! Ordering preferences persisted server-side and mirrored locally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How lists are ordered inside each group of the home view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOption {
    /// Newest list first.
    #[default]
    Creation,
    Alphabetical,
    /// Highest share of completed todos first.
    Completion,
}

impl SortOption {
    /// Value understood by the `/lists/sort_order/` endpoint.
    pub fn wire_value(&self) -> &'static str {
        match self {
            SortOption::Creation => "created",
            SortOption::Alphabetical => "alphabetical",
            SortOption::Completion => "complete",
        }
    }

    /// Next option in the created -> alphabetical -> completion cycle.
    pub fn next(&self) -> Self {
        match self {
            SortOption::Creation => SortOption::Alphabetical,
            SortOption::Alphabetical => SortOption::Completion,
            SortOption::Completion => SortOption::Creation,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Creation => "Most recent",
            SortOption::Alphabetical => "Alphabetical",
            SortOption::Completion => "By completion",
        }
    }

    /// Lenient mapping used for server payloads: unknown values mean creation order.
    pub fn from_wire(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" | "creation" | "recent" => Ok(SortOption::Creation),
            "alphabetical" | "name" | "alpha" => Ok(SortOption::Alphabetical),
            "complete" | "completion" | "completed" => Ok(SortOption::Completion),
            other => Err(format!("unknown sort option '{other}'")),
        }
    }
}

impl From<String> for SortOption {
    fn from(value: String) -> Self {
        Self::from_wire(&value)
    }
}

impl From<SortOption> for String {
    fn from(value: SortOption) -> Self {
        value.wire_value().to_string()
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

/// Server-side ordering of the todos inside a single list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TodoSortOrder {
    #[default]
    Created,
    Alphabetical,
    Completed,
}

impl TodoSortOrder {
    pub fn wire_value(&self) -> &'static str {
        match self {
            TodoSortOrder::Created => "created",
            TodoSortOrder::Alphabetical => "alphabetical",
            TodoSortOrder::Completed => "completed",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            TodoSortOrder::Created => TodoSortOrder::Alphabetical,
            TodoSortOrder::Alphabetical => TodoSortOrder::Completed,
            TodoSortOrder::Completed => TodoSortOrder::Created,
        }
    }
}

impl FromStr for TodoSortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" | "creation" => Ok(TodoSortOrder::Created),
            "alphabetical" | "name" => Ok(TodoSortOrder::Alphabetical),
            "completed" | "complete" | "completion" => Ok(TodoSortOrder::Completed),
            other => Err(format!("unknown todo sort order '{other}'")),
        }
    }
}

impl From<String> for TodoSortOrder {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<TodoSortOrder> for String {
    fn from(value: TodoSortOrder) -> Self {
        value.wire_value().to_string()
    }
}

impl fmt::Display for TodoSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}
