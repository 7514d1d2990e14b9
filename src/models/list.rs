use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::category::{Category, Sharing};
use super::preferences::TodoSortOrder;
use super::todo::TodoItem;

/// The five colors a list can be painted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListColor {
    #[default]
    Blue,
    Green,
    Yellow,
    Red,
    Purple,
}

impl ListColor {
    pub const ALL: [ListColor; 5] = [
        ListColor::Blue,
        ListColor::Green,
        ListColor::Yellow,
        ListColor::Red,
        ListColor::Purple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListColor::Blue => "blue",
            ListColor::Green => "green",
            ListColor::Yellow => "yellow",
            ListColor::Red => "red",
            ListColor::Purple => "purple",
        }
    }

    /// Border color used when painting the list card.
    pub fn hex(&self) -> &'static str {
        match self {
            ListColor::Blue => "#3b82f6",
            ListColor::Green => "#22c55e",
            ListColor::Yellow => "#eab308",
            ListColor::Red => "#ef4444",
            ListColor::Purple => "#a855f7",
        }
    }

    /// Parse a color name; unknown names fall back to blue.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for ListColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ListColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name: Option<String> = Option::deserialize(deserializer)?;
        Ok(name.map(|n| Self::from_name(&n)).unwrap_or_default())
    }
}

/// A named, colored container of todo items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub color: ListColor,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub todos: Vec<TodoItem>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(flatten)]
    pub sharing: Sharing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<TodoSortOrder>,
}

impl TodoList {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: ListColor::default(),
            created_at: None,
            todos: Vec::new(),
            category: None,
            sharing: Sharing::default(),
            sort_order: None,
        }
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category.as_ref().map(|c| c.id)
    }

    /// Number of completed todos and total number of todos.
    pub fn completion_counts(&self) -> (usize, usize) {
        let done = self.todos.iter().filter(|t| t.completed).count();
        (done, self.todos.len())
    }

    /// Share of completed todos; an empty list counts as 0.
    pub fn completion_ratio(&self) -> f64 {
        let (done, total) = self.completion_counts();
        done as f64 / total.max(1) as f64
    }
}
