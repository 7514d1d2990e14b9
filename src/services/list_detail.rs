use std::sync::Arc;

use futures::future::join_all;
use log::{debug, error, info, warn};

use super::{ServiceError, ServiceResult};
use crate::backend::{Backend, BackendError, TodoDraft};
use crate::constants::{ERROR_EMPTY_TODO_TITLE, ERROR_INVALID_QUANTITY, ERROR_MISSING_QUANTITY, ERROR_SAME_LIST_MOVE};
use crate::models::{Share, TodoItem, TodoList, TodoSortOrder};

/// Outcome of deleting several todos at once.
#[derive(Debug)]
pub struct BulkDeleteReport {
    pub deleted: usize,
    pub failed: usize,
    pub first_error: Option<BackendError>,
}

impl BulkDeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Parse a quantity typed by the user: a whole number greater than zero.
pub fn parse_quantity(text: &str) -> ServiceResult<f64> {
    match text.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(f64::from(n)),
        _ => Err(ServiceError::validation(ERROR_INVALID_QUANTITY)),
    }
}

/// State behind a single list page: the list, its todos and who it is shared with.
pub struct ListService {
    backend: Arc<dyn Backend>,
    list: Option<TodoList>,
    shares: Vec<Share>,
}

impl ListService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            list: None,
            shares: Vec::new(),
        }
    }

    /// Fetch a list and the users it is shared with.
    pub async fn load(&mut self, list_id: i64) -> ServiceResult<&TodoList> {
        let list = self.backend.fetch_list(list_id).await.map_err(|e| {
            error!("❌ Failed to fetch list {list_id}: {e}");
            e
        })?;
        self.shares = match self.backend.list_shares(list_id).await {
            Ok(shares) => shares,
            Err(e) => {
                warn!("⚠️  Could not load shares for list {list_id}: {e}");
                Vec::new()
            }
        };
        debug!("Loaded list {} with {} todos", list.id, list.todos.len());
        Ok(&*self.list.insert(list))
    }

    pub fn list(&self) -> Option<&TodoList> {
        self.list.as_ref()
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn todos(&self) -> &[TodoItem] {
        self.list.as_ref().map(|l| l.todos.as_slice()).unwrap_or_default()
    }

    fn list_id(&self) -> ServiceResult<i64> {
        self.list
            .as_ref()
            .map(|l| l.id)
            .ok_or_else(|| ServiceError::validation("No list loaded"))
    }

    async fn reload(&mut self) -> ServiceResult<()> {
        let id = self.list_id()?;
        self.list = Some(self.backend.fetch_list(id).await?);
        Ok(())
    }

    /// Add a plain todo. A blank title is ignored and returns `false`.
    pub async fn add_todo(&mut self, title: &str) -> ServiceResult<bool> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(false);
        }
        let list_id = self.list_id()?;
        let draft = TodoDraft {
            title: title.to_string(),
            ..Default::default()
        };
        self.backend.create_todo(list_id, &draft).await?;
        info!("✅ Added todo '{title}' to list {list_id}");
        self.reload().await?;
        Ok(true)
    }

    /// Add a todo carrying a quantity such as "3 kg".
    pub async fn add_todo_with_quantity(&mut self, title: &str, quantity: &str, unit: &str) -> ServiceResult<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::validation(ERROR_EMPTY_TODO_TITLE));
        }
        if quantity.trim().is_empty() || unit.trim().is_empty() {
            return Err(ServiceError::validation(ERROR_MISSING_QUANTITY));
        }
        let draft = TodoDraft {
            title: title.to_string(),
            quantity: Some(parse_quantity(quantity)?),
            unit: Some(unit.trim().to_string()),
        };
        let list_id = self.list_id()?;
        self.backend.create_todo(list_id, &draft).await?;
        info!("✅ Added todo '{title}' ({} {}) to list {list_id}", quantity.trim(), unit.trim());
        self.reload().await
    }

    pub async fn toggle(&mut self, todo_id: i64) -> ServiceResult<()> {
        self.backend.toggle_todo(todo_id).await?;
        self.reload().await
    }

    pub async fn delete(&mut self, todo_id: i64) -> ServiceResult<()> {
        self.backend.delete_todo(todo_id).await?;
        self.reload().await
    }

    /// Replace title and quantity of a todo. `None` quantity clears it.
    pub async fn edit(
        &mut self,
        todo_id: i64,
        title: &str,
        quantity: Option<f64>,
        unit: Option<String>,
    ) -> ServiceResult<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::validation(ERROR_EMPTY_TODO_TITLE));
        }
        let draft = TodoDraft {
            title: title.to_string(),
            quantity,
            unit: unit.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()),
        };
        self.backend.update_todo(todo_id, &draft).await?;
        self.reload().await
    }

    /// Move a todo to another list.
    pub async fn move_todo(&mut self, todo_id: i64, target_list_id: i64) -> ServiceResult<()> {
        if self.list_id()? == target_list_id {
            return Err(ServiceError::validation(ERROR_SAME_LIST_MOVE));
        }
        self.backend.move_todo(todo_id, target_list_id).await?;
        info!("✅ Moved todo {todo_id} to list {target_list_id}");
        self.reload().await
    }

    /// Delete every todo in `todo_ids` concurrently.
    pub async fn bulk_delete(&mut self, todo_ids: &[i64]) -> ServiceResult<BulkDeleteReport> {
        let backend = &self.backend;
        let results = join_all(todo_ids.iter().map(|&id| backend.delete_todo(id))).await;

        let mut report = BulkDeleteReport {
            deleted: 0,
            failed: 0,
            first_error: None,
        };
        for (id, result) in todo_ids.iter().zip(results) {
            match result {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    error!("❌ Failed to delete todo {id}: {e}");
                    report.failed += 1;
                    report.first_error.get_or_insert(e);
                }
            }
        }
        info!("🗑️  Deleted {}/{} todos", report.deleted, todo_ids.len());
        self.reload().await?;
        Ok(report)
    }

    pub async fn set_sort_order(&mut self, order: TodoSortOrder) -> ServiceResult<()> {
        let list_id = self.list_id()?;
        self.backend.set_todo_sort_order(list_id, order).await?;
        self.reload().await
    }

    /// Lists a todo of the current list can be moved to.
    pub fn move_targets<'a>(&self, all_lists: &'a [TodoList]) -> Vec<&'a TodoList> {
        let current = self.list.as_ref().map(|l| l.id);
        all_lists.iter().filter(|l| Some(l.id) != current).collect()
    }
}
