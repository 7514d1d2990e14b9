//! In-process fake of the remote service shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use todolist::backend::{
    ApiMessage, Backend, BackendError, ListDraft, LoginResponse, ProfileUpdate, RegisterArgs, TodoDraft,
};
use todolist::models::{
    Category, CurrentUser, FriendRequest, Friendship, Notification, NotificationKind, Share, SortOption, Theme,
    TodoItem, TodoList, TodoSortOrder, User, UserRef,
};

#[derive(Default)]
pub struct FakeState {
    pub user: Option<CurrentUser>,
    pub lists: Vec<TodoList>,
    pub categories: Vec<Category>,
    pub shares: Vec<Share>,
    pub sort_option: SortOption,
    pub category_sort_alpha: bool,
    pub selected_category: Option<i64>,
    pub friends: Vec<Friendship>,
    pub requests: Vec<FriendRequest>,
    pub users: Vec<User>,
    pub notifications: Vec<Notification>,
    pub theme: Option<Theme>,
    pub next_id: i64,
    /// Operation names that fail with a server error.
    pub failing: HashSet<&'static str>,
    /// Operation names called, in order.
    pub calls: Vec<String>,
}

#[derive(Default)]
pub struct FakeBackend {
    pub state: Mutex<FakeState>,
}

pub fn user(id: i64, username: &str) -> CurrentUser {
    CurrentUser {
        id,
        username: username.to_string(),
        email: Some(format!("{username}@example.test")),
        full_name: None,
        theme: None,
        profile_picture: None,
        email_verified: Some(true),
    }
}

pub fn user_ref(id: i64, username: &str) -> UserRef {
    UserRef {
        id,
        username: username.to_string(),
        full_name: String::new(),
    }
}

pub fn notification(id: i64, read: bool) -> Notification {
    Notification {
        id,
        kind: NotificationKind::General,
        title: format!("Notice {id}"),
        message: "Something happened".to_string(),
        read,
        created_at: None,
        from_user: None,
        list_name: None,
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.user = Some(user(1, "alice"));
            state.next_id = 100;
        }
        backend
    }

    pub fn with_state(f: impl FnOnce(&mut FakeState)) -> Self {
        let backend = Self::new();
        f(&mut backend.state.lock().unwrap());
        backend
    }

    pub fn fail(&self, operation: &'static str) {
        self.state.lock().unwrap().failing.insert(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn called(&self, operation: &str) -> bool {
        self.calls().iter().any(|c| c == operation)
    }

    fn enter(&self, operation: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation.to_string());
        if state.failing.contains(operation) {
            return Err(BackendError::Api {
                status: 500,
                message: format!("{operation} failed"),
            });
        }
        Ok(state)
    }

    fn find_todo(state: &mut FakeState, todo_id: i64) -> Result<(usize, usize), BackendError> {
        for (li, list) in state.lists.iter().enumerate() {
            if let Some(ti) = list.todos.iter().position(|t| t.id == todo_id) {
                return Ok((li, ti));
            }
        }
        Err(BackendError::NotFound(format!("todo {todo_id}")))
    }
}

fn ok_message() -> ApiMessage {
    ApiMessage {
        message: Some("ok".to_string()),
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn backend_type(&self) -> &str {
        "fake"
    }

    async fn login(&self, username: &str, password: &str, remember_me: bool) -> Result<LoginResponse, BackendError> {
        let state = self.enter("login")?;
        if password != "secret" {
            return Err(BackendError::Auth("Invalid credentials".to_string()));
        }
        let mut account = state.user.clone().unwrap_or_else(|| user(1, username));
        account.username = username.to_string();
        Ok(LoginResponse {
            access: "access-token".to_string(),
            refresh: "refresh-token".to_string(),
            user: Some(account),
            remember_me,
        })
    }

    async fn current_user(&self) -> Result<CurrentUser, BackendError> {
        let state = self.enter("current_user")?;
        state
            .user
            .clone()
            .ok_or_else(|| BackendError::Auth("Session expired".to_string()))
    }

    async fn register(&self, _args: &RegisterArgs) -> Result<ApiMessage, BackendError> {
        self.enter("register")?;
        Ok(ok_message())
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ApiMessage, BackendError> {
        let mut state = self.enter("update_profile")?;
        if let (Some(user), Some(name)) = (state.user.as_mut(), &update.username) {
            user.username = name.clone();
        }
        Ok(ok_message())
    }

    async fn request_password_reset(&self) -> Result<ApiMessage, BackendError> {
        self.enter("request_password_reset")?;
        Ok(ok_message())
    }

    async fn set_new_password(&self, _uid: &str, _token: &str, _password: &str) -> Result<ApiMessage, BackendError> {
        self.enter("set_new_password")?;
        Ok(ok_message())
    }

    async fn send_verification_email(&self) -> Result<ApiMessage, BackendError> {
        self.enter("send_verification_email")?;
        Ok(ok_message())
    }

    async fn deactivate_account(&self) -> Result<ApiMessage, BackendError> {
        let mut state = self.enter("deactivate_account")?;
        state.user = None;
        Ok(ok_message())
    }

    async fn update_theme(&self, theme: Theme) -> Result<ApiMessage, BackendError> {
        let mut state = self.enter("update_theme")?;
        state.theme = Some(theme);
        Ok(ok_message())
    }

    async fn set_push_notifications(&self, _enabled: bool) -> Result<ApiMessage, BackendError> {
        self.enter("set_push_notifications")?;
        Ok(ok_message())
    }

    async fn fetch_lists(&self) -> Result<Vec<TodoList>, BackendError> {
        Ok(self.enter("fetch_lists")?.lists.clone())
    }

    async fn fetch_list(&self, list_id: i64) -> Result<TodoList, BackendError> {
        let state = self.enter("fetch_list")?;
        state
            .lists
            .iter()
            .find(|l| l.id == list_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("list {list_id}")))
    }

    async fn create_list(&self, draft: &ListDraft) -> Result<(), BackendError> {
        let mut state = self.enter("create_list")?;
        state.next_id += 1;
        let mut list = TodoList::new(state.next_id, draft.name.clone());
        list.color = draft.color;
        list.category = draft
            .category
            .and_then(|id| state.categories.iter().find(|c| c.id == id).cloned());
        state.lists.push(list);
        Ok(())
    }

    async fn update_list(&self, list_id: i64, draft: &ListDraft) -> Result<(), BackendError> {
        let mut state = self.enter("update_list")?;
        let category = draft
            .category
            .and_then(|id| state.categories.iter().find(|c| c.id == id).cloned());
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| BackendError::NotFound(format!("list {list_id}")))?;
        list.name = draft.name.clone();
        list.color = draft.color;
        list.category = category;
        Ok(())
    }

    async fn delete_list(&self, list_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("delete_list")?;
        state.lists.retain(|l| l.id != list_id);
        Ok(())
    }

    async fn list_shares(&self, _list_id: i64) -> Result<Vec<Share>, BackendError> {
        Ok(self.enter("list_shares")?.shares.clone())
    }

    async fn set_todo_sort_order(&self, list_id: i64, order: TodoSortOrder) -> Result<(), BackendError> {
        let mut state = self.enter("set_todo_sort_order")?;
        if let Some(list) = state.lists.iter_mut().find(|l| l.id == list_id) {
            list.sort_order = Some(order);
        }
        Ok(())
    }

    async fn list_sort_preference(&self) -> Result<SortOption, BackendError> {
        Ok(self.enter("list_sort_preference")?.sort_option)
    }

    async fn set_list_sort_preference(&self, option: SortOption) -> Result<(), BackendError> {
        self.enter("set_list_sort_preference")?.sort_option = option;
        Ok(())
    }

    async fn category_sort_preference(&self) -> Result<bool, BackendError> {
        Ok(self.enter("category_sort_preference")?.category_sort_alpha)
    }

    async fn set_category_sort_preference(&self, alphabetical: bool) -> Result<(), BackendError> {
        self.enter("set_category_sort_preference")?.category_sort_alpha = alphabetical;
        Ok(())
    }

    async fn selected_category(&self) -> Result<Option<i64>, BackendError> {
        Ok(self.enter("selected_category")?.selected_category)
    }

    async fn save_selected_category(&self, category_id: Option<i64>) -> Result<(), BackendError> {
        self.enter("save_selected_category")?.selected_category = category_id;
        Ok(())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError> {
        Ok(self.enter("fetch_categories")?.categories.clone())
    }

    async fn create_category(&self, name: &str) -> Result<(), BackendError> {
        let mut state = self.enter("create_category")?;
        state.next_id += 1;
        let id = state.next_id;
        state.categories.push(Category::new(id, name));
        Ok(())
    }

    async fn update_category(&self, category_id: i64, name: &str) -> Result<(), BackendError> {
        let mut state = self.enter("update_category")?;
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| BackendError::NotFound(format!("category {category_id}")))?;
        category.name = name.to_string();
        Ok(())
    }

    async fn delete_category(&self, category_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("delete_category")?;
        state.categories.retain(|c| c.id != category_id);
        for list in &mut state.lists {
            if list.category_id() == Some(category_id) {
                list.category = None;
            }
        }
        Ok(())
    }

    async fn create_todo(&self, list_id: i64, draft: &TodoDraft) -> Result<(), BackendError> {
        let mut state = self.enter("create_todo")?;
        state.next_id += 1;
        let mut todo = TodoItem::new(state.next_id, draft.title.clone(), false);
        todo.quantity = draft.quantity;
        todo.unit = draft.unit.clone();
        let list = state
            .lists
            .iter_mut()
            .find(|l| l.id == list_id)
            .ok_or_else(|| BackendError::NotFound(format!("list {list_id}")))?;
        list.todos.push(todo);
        Ok(())
    }

    async fn update_todo(&self, todo_id: i64, draft: &TodoDraft) -> Result<(), BackendError> {
        let mut state = self.enter("update_todo")?;
        let (li, ti) = Self::find_todo(&mut state, todo_id)?;
        let todo = &mut state.lists[li].todos[ti];
        todo.title = draft.title.clone();
        todo.quantity = draft.quantity;
        todo.unit = draft.unit.clone();
        Ok(())
    }

    async fn toggle_todo(&self, todo_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("toggle_todo")?;
        let (li, ti) = Self::find_todo(&mut state, todo_id)?;
        let todo = &mut state.lists[li].todos[ti];
        todo.completed = !todo.completed;
        Ok(())
    }

    async fn delete_todo(&self, todo_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("delete_todo")?;
        let (li, ti) = Self::find_todo(&mut state, todo_id)?;
        state.lists[li].todos.remove(ti);
        Ok(())
    }

    async fn move_todo(&self, todo_id: i64, target_list_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("move_todo")?;
        let target = state
            .lists
            .iter()
            .position(|l| l.id == target_list_id)
            .ok_or_else(|| BackendError::NotFound(format!("list {target_list_id}")))?;
        let (li, ti) = Self::find_todo(&mut state, todo_id)?;
        let todo = state.lists[li].todos.remove(ti);
        state.lists[target].todos.push(todo);
        Ok(())
    }

    async fn fetch_friends(&self) -> Result<Vec<Friendship>, BackendError> {
        Ok(self.enter("fetch_friends")?.friends.clone())
    }

    async fn remove_friend(&self, user_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("remove_friend")?;
        state.friends.retain(|f| f.friend.id != user_id);
        Ok(())
    }

    async fn fetch_friend_requests(&self) -> Result<Vec<FriendRequest>, BackendError> {
        Ok(self.enter("fetch_friend_requests")?.requests.clone())
    }

    async fn send_friend_request(&self, _user_id: i64) -> Result<(), BackendError> {
        self.enter("send_friend_request")?;
        Ok(())
    }

    async fn accept_friend_request(&self, request_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("accept_friend_request")?;
        let position = state
            .requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or_else(|| BackendError::NotFound(format!("request {request_id}")))?;
        let request = state.requests.remove(position);
        state.friends.push(Friendship {
            id: request.id,
            friend: request.from_user,
            created_at: None,
        });
        Ok(())
    }

    async fn reject_friend_request(&self, request_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("reject_friend_request")?;
        state.requests.retain(|r| r.id != request_id);
        Ok(())
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, BackendError> {
        let state = self.enter("search_users")?;
        let query = query.to_lowercase();
        Ok(state
            .users
            .iter()
            .filter(|u| u.username.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn fetch_notifications(&self) -> Result<Vec<Notification>, BackendError> {
        Ok(self.enter("fetch_notifications")?.notifications.clone())
    }

    async fn mark_notification_read(&self, notification_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("mark_notification_read")?;
        if let Some(n) = state.notifications.iter_mut().find(|n| n.id == notification_id) {
            n.read = true;
        }
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> Result<(), BackendError> {
        let mut state = self.enter("mark_all_notifications_read")?;
        for n in &mut state.notifications {
            n.read = true;
        }
        Ok(())
    }

    async fn delete_notification(&self, notification_id: i64) -> Result<(), BackendError> {
        let mut state = self.enter("delete_notification")?;
        state.notifications.retain(|n| n.id != notification_id);
        Ok(())
    }
}
