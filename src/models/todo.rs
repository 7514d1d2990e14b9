use serde::{Deserialize, Serialize};

use super::user::UserRef;

/// A single entry of a list.
///
/// Older payloads name the text field `text`, newer ones `title`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    #[serde(alias = "text")]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<UserRef>,
}

impl TodoItem {
    pub fn new(id: i64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
            quantity: None,
            unit: None,
            created_by: None,
            modified_by: None,
        }
    }

    /// Quantity and unit rendered as "2 kg", if the todo carries a quantity.
    pub fn quantity_label(&self) -> Option<String> {
        let quantity = self.quantity?;
        let amount = if quantity.fract() == 0.0 {
            format!("{}", quantity as i64)
        } else {
            format!("{quantity}")
        };
        match self.unit.as_deref().map(str::trim) {
            Some(unit) if !unit.is_empty() => Some(format!("{amount} {unit}")),
            _ => Some(amount),
        }
    }
}
