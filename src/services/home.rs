use std::sync::Arc;

use log::{error, info, warn};

use super::{ServiceError, ServiceResult};
use crate::backend::{Backend, ListDraft};
use crate::config::DisplayConfig;
use crate::constants::{ERROR_EMPTY_CATEGORY_NAME, ERROR_EMPTY_LIST_NAME, ERROR_UNKNOWN_CATEGORY};
use crate::models::{Category, CurrentUser, SortOption, TodoList};
use crate::presentation::{filter_lists, group_list_refs, ListGroup, ViewOptions};

/// State behind the home screen: lists, categories and view preferences.
pub struct HomeService {
    backend: Arc<dyn Backend>,
    display: DisplayConfig,
    user: Option<CurrentUser>,
    lists: Vec<TodoList>,
    categories: Vec<Category>,
    sort_option: SortOption,
    category_sort_alpha: bool,
    selected_category: Option<i64>,
}

impl HomeService {
    pub fn new(backend: Arc<dyn Backend>, display: DisplayConfig) -> Self {
        let sort_option = display.default_sort;
        Self {
            backend,
            display,
            user: None,
            lists: Vec::new(),
            categories: Vec::new(),
            sort_option,
            category_sort_alpha: false,
            selected_category: None,
        }
    }

    /// Fetch everything the home screen shows.
    ///
    /// Preference lookups are best effort: a failure keeps the current value.
    /// The user, lists and categories are required.
    pub async fn load(&mut self) -> ServiceResult<()> {
        let user = match self.backend.current_user().await {
            Ok(user) => user,
            Err(e) if e.is_auth() => return Err(ServiceError::NotAuthenticated),
            Err(e) => return Err(e.into()),
        };
        self.user = Some(user);

        match self.backend.list_sort_preference().await {
            Ok(option) => self.sort_option = option,
            Err(e) => warn!("⚠️  Could not load list sort preference: {e}"),
        }
        match self.backend.category_sort_preference().await {
            Ok(alpha) => self.category_sort_alpha = alpha,
            Err(e) => warn!("⚠️  Could not load category sort preference: {e}"),
        }

        self.refresh_lists().await?;
        self.refresh_categories().await?;

        match self.backend.selected_category().await {
            Ok(Some(id)) if self.category(id).is_some() => self.selected_category = Some(id),
            Ok(Some(id)) => {
                warn!("⚠️  Saved category {id} no longer exists, showing all lists");
                self.selected_category = None;
            }
            Ok(None) => self.selected_category = None,
            Err(e) => warn!("⚠️  Could not load selected category: {e}"),
        }

        info!(
            "✅ Loaded {} lists and {} categories",
            self.lists.len(),
            self.categories.len()
        );
        Ok(())
    }

    pub async fn refresh_lists(&mut self) -> ServiceResult<()> {
        self.lists = self.backend.fetch_lists().await.map_err(|e| {
            error!("❌ Failed to fetch lists: {e}");
            e
        })?;
        Ok(())
    }

    pub async fn refresh_categories(&mut self) -> ServiceResult<()> {
        self.categories = self.backend.fetch_categories().await.map_err(|e| {
            error!("❌ Failed to fetch categories: {e}");
            e
        })?;
        Ok(())
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    pub fn category_sort_alpha(&self) -> bool {
        self.category_sort_alpha
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.selected_category.and_then(|id| self.category(id))
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// View options reflecting the current preferences.
    pub fn view_options(&self) -> ViewOptions<'_> {
        ViewOptions {
            selected_category: self.selected_category(),
            sort_option: self.sort_option,
            category_sort_alpha: self.category_sort_alpha,
            uncategorized_label: &self.display.uncategorized_label,
        }
    }

    /// Grouped home view over the current state.
    pub fn grouped_lists(&self) -> Vec<ListGroup<'_>> {
        group_list_refs(self.lists.iter().collect(), &self.categories, &self.view_options())
    }

    /// Grouped home view limited to lists whose name contains `query`.
    pub fn search(&self, query: &str) -> Vec<ListGroup<'_>> {
        self.view(filter_lists(&self.lists, query), &self.view_options())
    }

    /// Group an arbitrary subset of the held lists with explicit options.
    pub fn view<'a>(&'a self, lists: Vec<&'a TodoList>, options: &ViewOptions<'_>) -> Vec<ListGroup<'a>> {
        group_list_refs(lists, &self.categories, options)
    }

    /// Change the list order locally, then try to persist it.
    pub async fn set_sort_option(&mut self, option: SortOption) {
        self.sort_option = option;
        if let Err(e) = self.backend.set_list_sort_preference(option).await {
            error!("❌ Failed to save sort preference: {e}");
        }
    }

    /// Step to the next sort option and return it.
    pub async fn cycle_sort_option(&mut self) -> SortOption {
        let next = self.sort_option.next();
        self.set_sort_option(next).await;
        next
    }

    pub async fn set_category_sort_alpha(&mut self, alphabetical: bool) {
        self.category_sort_alpha = alphabetical;
        if let Err(e) = self.backend.set_category_sort_preference(alphabetical).await {
            error!("❌ Failed to save category sort preference: {e}");
        }
    }

    /// Narrow the view to one category, or show all lists with `None`.
    pub async fn select_category(&mut self, category_id: Option<i64>) -> ServiceResult<()> {
        if let Some(id) = category_id {
            if self.category(id).is_none() {
                return Err(ServiceError::validation(ERROR_UNKNOWN_CATEGORY));
            }
        }
        self.selected_category = category_id;
        if let Err(e) = self.backend.save_selected_category(category_id).await {
            error!("❌ Failed to save selected category: {e}");
        }
        Ok(())
    }

    /// Create a list, or edit `list_id` when given.
    pub async fn save_list(&mut self, list_id: Option<i64>, draft: ListDraft) -> ServiceResult<()> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::validation(ERROR_EMPTY_LIST_NAME));
        }
        let draft = ListDraft { name, ..draft };

        match list_id {
            Some(id) => self.backend.update_list(id, &draft).await?,
            None => self.backend.create_list(&draft).await?,
        }
        info!("✅ Saved list '{}'", draft.name);
        self.refresh_lists().await
    }

    pub async fn delete_list(&mut self, list_id: i64) -> ServiceResult<()> {
        self.backend.delete_list(list_id).await?;
        self.lists.retain(|l| l.id != list_id);
        self.refresh_lists().await
    }

    /// Create a category, or rename `category_id` when given.
    pub async fn save_category(&mut self, category_id: Option<i64>, name: &str) -> ServiceResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::validation(ERROR_EMPTY_CATEGORY_NAME));
        }
        match category_id {
            Some(id) => self.backend.update_category(id, name).await?,
            None => self.backend.create_category(name).await?,
        }
        info!("✅ Saved category '{name}'");
        self.refresh_categories().await
    }

    pub async fn delete_category(&mut self, category_id: i64) -> ServiceResult<()> {
        self.backend.delete_category(category_id).await?;
        if self.selected_category == Some(category_id) {
            self.selected_category = None;
        }
        self.refresh_categories().await?;
        // Lists of a deleted category come back uncategorized.
        self.refresh_lists().await
    }
}
