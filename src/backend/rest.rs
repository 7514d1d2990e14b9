//! REST backend implementation.
//!
//! Talks JSON over HTTPS to the remote API. Authenticated calls carry the
//! stored access token as a bearer token; a 401 triggers one refresh through
//! `/token/refresh/` followed by a single retry. Requests that hit a 401 at
//! the same time share that refresh.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use super::{ApiMessage, Backend, BackendError, ListDraft, LoginResponse, ProfileUpdate, RegisterArgs, TodoDraft};
use crate::models::{
    Category, CurrentUser, FriendRequest, Friendship, Notification, Share, SortOption, Theme, TodoList, TodoSortOrder,
    User,
};
use crate::session::SessionStore;

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

#[derive(Deserialize)]
struct SortOrderPayload {
    #[serde(default)]
    sort_order: SortOption,
}

#[derive(Deserialize)]
struct CategorySortPayload {
    #[serde(default)]
    category_sort_alpha: bool,
}

#[derive(Deserialize)]
struct SelectedCategoryPayload {
    #[serde(default)]
    selected_category: Option<i64>,
}

/// One request, kept around so it can be replayed after a token refresh.
struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }
}

/// Join the base URL and an endpoint path with exactly one slash between them.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Pull a human-readable message out of an error body, if it is JSON.
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Map a non-success status and its body to a backend error.
pub fn error_from_status(status: u16, body: &str) -> BackendError {
    let message = extract_message(body).unwrap_or_else(|| match status {
        401 | 403 => "Invalid credentials".to_string(),
        404 => "Not found".to_string(),
        _ => "Unexpected server response".to_string(),
    });

    match status {
        401 | 403 => BackendError::Auth(message),
        404 => BackendError::NotFound(message),
        _ => BackendError::Api { status, message },
    }
}

fn network_error(e: reqwest::Error) -> BackendError {
    BackendError::Network(e.to_string())
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!("Request failed with status {}", status.as_u16());
    Err(error_from_status(status.as_u16(), &body))
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let response = ensure_success(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| BackendError::InvalidData(e.to_string()))
}

async fn parse_message(response: Response) -> Result<ApiMessage, BackendError> {
    let response = ensure_success(response).await?;
    let text = response.text().await.map_err(network_error)?;
    Ok(serde_json::from_str(&text).unwrap_or_default())
}

/// Backend speaking to the JSON REST API.
pub struct RestBackend {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl RestBackend {
    /// Create a backend for `base_url`, reading tokens from `session`.
    pub fn new(base_url: &str, timeout: Duration, session: Arc<dyn SessionStore>) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("todolist/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            refresh_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path such as `lists/3/`.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn build(&self, request: &ApiRequest) -> RequestBuilder {
        let mut builder = self.client.request(request.method.clone(), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }

    async fn send_anonymous(&self, request: &ApiRequest) -> Result<Response, BackendError> {
        debug!("{} {}", request.method, request.path);
        self.build(request).send().await.map_err(network_error)
    }

    async fn send_authorized(&self, request: &ApiRequest) -> Result<Response, BackendError> {
        let token = self
            .session
            .access_token()?
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BackendError::Auth("Not logged in".to_string()))?;

        debug!("{} {}", request.method, request.path);
        let response = self
            .build(request)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(network_error)?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let token = self.replace_token(&token).await?;
        self.build(request)
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)
    }

    /// A usable access token after `rejected` got a 401.
    async fn replace_token(&self, rejected: &str) -> Result<String, BackendError> {
        let _guard = self.refresh_lock.lock().await;
        if let Some(current) = self
            .session
            .access_token()?
            .filter(|t| !t.is_empty() && t.as_str() != rejected)
        {
            debug!("Access token was already refreshed");
            return Ok(current);
        }
        warn!("🔁 Access token expired, trying to refresh it");
        self.refresh_access_token().await
    }

    /// Exchange the stored refresh token for a new access token.
    pub async fn refresh_access_token(&self) -> Result<String, BackendError> {
        let refresh = self
            .session
            .refresh_token()?
            .ok_or_else(|| BackendError::Auth("No refresh token stored".to_string()))?;

        let request = ApiRequest::new(Method::POST, "token/refresh/").json(json!({ "refresh": refresh }));
        let response = self.send_anonymous(&request).await?;
        if !response.status().is_success() {
            error!("❌ Token refresh rejected with status {}", response.status().as_u16());
            return Err(BackendError::Auth("Session expired, please log in again".to_string()));
        }

        let body: RefreshResponse = parse_json(response).await?;
        self.session.set_access_token(&body.access)?;
        info!("✅ Access token refreshed");
        Ok(body.access)
    }

    async fn get<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, BackendError> {
        let response = self.send_authorized(&request).await?;
        parse_json(response).await
    }

    async fn call(&self, request: ApiRequest) -> Result<(), BackendError> {
        let response = self.send_authorized(&request).await?;
        ensure_success(response).await.map(|_| ())
    }

    async fn call_for_message(&self, request: ApiRequest) -> Result<ApiMessage, BackendError> {
        let response = self.send_authorized(&request).await?;
        parse_message(response).await
    }
}

#[async_trait]
impl Backend for RestBackend {
    fn backend_type(&self) -> &str {
        "rest"
    }

    async fn login(&self, username: &str, password: &str, remember_me: bool) -> Result<LoginResponse, BackendError> {
        let request = ApiRequest::new(Method::POST, "login/").json(json!({
            "username": username,
            "password": password,
            "remember_me": remember_me,
        }));
        let response = self.send_anonymous(&request).await?;
        if !response.status().is_success() {
            warn!("Login failed with status {}", response.status().as_u16());
        }
        parse_json(response).await
    }

    async fn current_user(&self) -> Result<CurrentUser, BackendError> {
        self.get(ApiRequest::get("jwt-user/")).await
    }

    async fn register(&self, args: &RegisterArgs) -> Result<ApiMessage, BackendError> {
        let body = serde_json::to_value(args).map_err(|e| BackendError::InvalidData(e.to_string()))?;
        let response = self
            .send_anonymous(&ApiRequest::new(Method::POST, "register/").json(body))
            .await?;
        parse_message(response).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ApiMessage, BackendError> {
        let body = serde_json::to_value(update).map_err(|e| BackendError::InvalidData(e.to_string()))?;
        self.call_for_message(ApiRequest::new(Method::POST, "update-profile-jwt/").json(body))
            .await
    }

    async fn request_password_reset(&self) -> Result<ApiMessage, BackendError> {
        self.call_for_message(ApiRequest::new(Method::POST, "reset-password/")).await
    }

    async fn set_new_password(&self, uid: &str, token: &str, password: &str) -> Result<ApiMessage, BackendError> {
        let request = ApiRequest::new(Method::POST, format!("reset-password/{uid}/{token}/"))
            .json(json!({ "password": password }));
        let response = self.send_anonymous(&request).await?;
        parse_message(response).await
    }

    async fn send_verification_email(&self) -> Result<ApiMessage, BackendError> {
        self.call_for_message(ApiRequest::new(Method::POST, "send-verification-email/"))
            .await
    }

    async fn deactivate_account(&self) -> Result<ApiMessage, BackendError> {
        self.call_for_message(ApiRequest::new(Method::DELETE, "delete-account/")).await
    }

    async fn update_theme(&self, theme: Theme) -> Result<ApiMessage, BackendError> {
        self.call_for_message(ApiRequest::new(Method::POST, "update-theme/").json(json!({ "theme": theme })))
            .await
    }

    async fn set_push_notifications(&self, enabled: bool) -> Result<ApiMessage, BackendError> {
        let request = ApiRequest::new(Method::PATCH, "notifications/preferences/")
            .json(json!({ "push_notifications_enabled": enabled }));
        self.call_for_message(request).await
    }

    async fn fetch_lists(&self) -> Result<Vec<TodoList>, BackendError> {
        let lists: Vec<TodoList> = self.get(ApiRequest::get("lists/")).await?;
        info!("✅ Fetched {} lists from API", lists.len());
        Ok(lists)
    }

    async fn fetch_list(&self, list_id: i64) -> Result<TodoList, BackendError> {
        self.get(ApiRequest::get(format!("lists/{list_id}/"))).await
    }

    async fn create_list(&self, draft: &ListDraft) -> Result<(), BackendError> {
        let body = serde_json::to_value(draft).map_err(|e| BackendError::InvalidData(e.to_string()))?;
        self.call(ApiRequest::new(Method::POST, "lists/").json(body)).await
    }

    async fn update_list(&self, list_id: i64, draft: &ListDraft) -> Result<(), BackendError> {
        let body = serde_json::to_value(draft).map_err(|e| BackendError::InvalidData(e.to_string()))?;
        self.call(ApiRequest::new(Method::PATCH, format!("lists/{list_id}/")).json(body))
            .await
    }

    async fn delete_list(&self, list_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::DELETE, format!("lists/{list_id}/"))).await
    }

    async fn list_shares(&self, list_id: i64) -> Result<Vec<Share>, BackendError> {
        self.get(ApiRequest::get(format!("lists/{list_id}/shares/"))).await
    }

    async fn set_todo_sort_order(&self, list_id: i64, order: TodoSortOrder) -> Result<(), BackendError> {
        let request = ApiRequest::new(Method::PATCH, format!("lists/{list_id}/sort_order/"))
            .json(json!({ "sort_order": order }));
        self.call(request).await
    }

    async fn list_sort_preference(&self) -> Result<SortOption, BackendError> {
        let payload: SortOrderPayload = self.get(ApiRequest::get("lists/sort_order/")).await?;
        Ok(payload.sort_order)
    }

    async fn set_list_sort_preference(&self, option: SortOption) -> Result<(), BackendError> {
        let request = ApiRequest::new(Method::PATCH, "lists/sort_order/").json(json!({ "sort_order": option }));
        self.call(request).await
    }

    async fn category_sort_preference(&self) -> Result<bool, BackendError> {
        let payload: CategorySortPayload = self.get(ApiRequest::get("categories/sort_preference/")).await?;
        Ok(payload.category_sort_alpha)
    }

    async fn set_category_sort_preference(&self, alphabetical: bool) -> Result<(), BackendError> {
        let request = ApiRequest::new(Method::PATCH, "categories/sort_preference/")
            .json(json!({ "category_sort_alpha": alphabetical }));
        self.call(request).await
    }

    async fn selected_category(&self) -> Result<Option<i64>, BackendError> {
        let payload: SelectedCategoryPayload = self.get(ApiRequest::get("categories/selected/")).await?;
        Ok(payload.selected_category)
    }

    async fn save_selected_category(&self, category_id: Option<i64>) -> Result<(), BackendError> {
        let request = ApiRequest::new(Method::PATCH, "categories/selected/")
            .json(json!({ "selected_category": category_id }));
        self.call(request).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, BackendError> {
        let categories: Vec<Category> = self.get(ApiRequest::get("categories/")).await?;
        info!("✅ Fetched {} categories from API", categories.len());
        Ok(categories)
    }

    async fn create_category(&self, name: &str) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::POST, "categories/").json(json!({ "name": name })))
            .await
    }

    async fn update_category(&self, category_id: i64, name: &str) -> Result<(), BackendError> {
        let request =
            ApiRequest::new(Method::PATCH, format!("categories/{category_id}/")).json(json!({ "name": name }));
        self.call(request).await
    }

    async fn delete_category(&self, category_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::DELETE, format!("categories/{category_id}/")))
            .await
    }

    async fn create_todo(&self, list_id: i64, draft: &TodoDraft) -> Result<(), BackendError> {
        let body = serde_json::to_value(draft).map_err(|e| BackendError::InvalidData(e.to_string()))?;
        self.call(ApiRequest::new(Method::POST, format!("lists/{list_id}/todos/")).json(body))
            .await
    }

    async fn update_todo(&self, todo_id: i64, draft: &TodoDraft) -> Result<(), BackendError> {
        // Clearing a quantity has to be sent explicitly as null.
        let body = json!({
            "title": draft.title,
            "quantity": draft.quantity,
            "unit": draft.unit,
        });
        self.call(ApiRequest::new(Method::PATCH, format!("todos/{todo_id}/")).json(body))
            .await
    }

    async fn toggle_todo(&self, todo_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::PATCH, format!("todos/{todo_id}/toggle/")))
            .await
    }

    async fn delete_todo(&self, todo_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::DELETE, format!("todos/{todo_id}/"))).await
    }

    async fn move_todo(&self, todo_id: i64, target_list_id: i64) -> Result<(), BackendError> {
        let request = ApiRequest::new(Method::PATCH, format!("todos/{todo_id}/move/"))
            .json(json!({ "new_list_id": target_list_id }));
        self.call(request).await
    }

    async fn fetch_friends(&self) -> Result<Vec<Friendship>, BackendError> {
        self.get(ApiRequest::get("friends/")).await
    }

    async fn remove_friend(&self, user_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::DELETE, format!("friends/{user_id}/"))).await
    }

    async fn fetch_friend_requests(&self) -> Result<Vec<FriendRequest>, BackendError> {
        self.get(ApiRequest::get("friends/requests/")).await
    }

    async fn send_friend_request(&self, user_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::POST, "friends/requests/").json(json!({ "to_user": user_id })))
            .await
    }

    async fn accept_friend_request(&self, request_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::POST, format!("friends/requests/{request_id}/accept/")))
            .await
    }

    async fn reject_friend_request(&self, request_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::POST, format!("friends/requests/{request_id}/reject/")))
            .await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, BackendError> {
        self.get(ApiRequest::get("users/").query("search", query.trim())).await
    }

    async fn fetch_notifications(&self) -> Result<Vec<Notification>, BackendError> {
        self.get(ApiRequest::get("notifications/")).await
    }

    async fn mark_notification_read(&self, notification_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(
            Method::PATCH,
            format!("notifications/{notification_id}/read/"),
        ))
        .await
    }

    async fn mark_all_notifications_read(&self) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::PATCH, "notifications/read-all/")).await
    }

    async fn delete_notification(&self, notification_id: i64) -> Result<(), BackendError> {
        self.call(ApiRequest::new(Method::DELETE, format!("notifications/{notification_id}/")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, Session};
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    #[derive(Debug, Clone)]
    struct Seen {
        method: String,
        path: String,
        auth: Option<String>,
        body: String,
    }

    async fn read_request(stream: &mut TcpStream) -> std::io::Result<Seen> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let head_end = loop {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                return Err(std::io::ErrorKind::UnexpectedEof.into());
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let mut lines = head.lines();
        let mut request_line = lines.next().unwrap_or_default().split_whitespace();
        let method = request_line.next().unwrap_or_default().to_string();
        let path = request_line.next().unwrap_or_default().to_string();
        let mut auth = None;
        let mut length = 0;
        for line in lines {
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("authorization") {
                    auth = Some(value.trim().to_string());
                } else if name.eq_ignore_ascii_case("content-length") {
                    length = value.trim().parse().unwrap_or(0);
                }
            }
        }

        while buf.len() < head_end + length {
            let n = stream.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[head_end..]).to_string();
        Ok(Seen {
            method,
            path,
            auth,
            body,
        })
    }

    /// Local API that only accepts the access token "fresh". Refreshes hand out
    /// that token when `refresh_ok`, and are rejected otherwise.
    async fn stub_api(refresh_ok: bool) -> (String, Arc<Mutex<Vec<Seen>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/api", listener.local_addr().unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let log = log.clone();
                tokio::spawn(async move {
                    let Ok(request) = read_request(&mut stream).await else {
                        return;
                    };
                    let (status, body) = match request.path.as_str() {
                        "/api/token/refresh/" if refresh_ok => ("200 OK", r#"{"access": "fresh"}"#),
                        "/api/token/refresh/" => ("401 Unauthorized", r#"{"detail": "Token is invalid"}"#),
                        _ if request.auth.as_deref() == Some("Bearer fresh") => ("200 OK", "[]"),
                        _ => ("401 Unauthorized", r#"{"detail": "Token expired"}"#),
                    };
                    log.lock().unwrap().push(request);
                    let response = format!(
                        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });
        (base, seen)
    }

    fn stale_session() -> Arc<MemorySessionStore> {
        Arc::new(MemorySessionStore::with_session(Session {
            access_token: Some("stale".into()),
            refresh_token: Some("r1".into()),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_and_request_retried_once() {
        let (base, seen) = stub_api(true).await;
        let session = stale_session();
        let backend = RestBackend::new(&base, Duration::from_secs(5), session.clone()).unwrap();

        let lists = backend.fetch_lists().await.unwrap();
        assert!(lists.is_empty());
        assert_eq!(session.access_token().unwrap().as_deref(), Some("fresh"));
        assert_eq!(session.refresh_token().unwrap().as_deref(), Some("r1"));

        let seen = seen.lock().unwrap().clone();
        let calls: Vec<(&str, &str, Option<&str>)> = seen
            .iter()
            .map(|s| (s.method.as_str(), s.path.as_str(), s.auth.as_deref()))
            .collect();
        assert_eq!(
            calls,
            vec![
                ("GET", "/api/lists/", Some("Bearer stale")),
                ("POST", "/api/token/refresh/", None),
                ("GET", "/api/lists/", Some("Bearer fresh")),
            ]
        );
        assert!(seen[1].body.contains("\"r1\""));
    }

    #[tokio::test]
    async fn rejected_refresh_is_an_auth_error_without_retry() {
        let (base, seen) = stub_api(false).await;
        let session = stale_session();
        let backend = RestBackend::new(&base, Duration::from_secs(5), session.clone()).unwrap();

        let err = backend.fetch_lists().await.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(session.access_token().unwrap().as_deref(), Some("stale"));
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn concurrent_expired_requests_share_one_refresh() {
        let (base, seen) = stub_api(true).await;
        let backend = RestBackend::new(&base, Duration::from_secs(5), stale_session()).unwrap();

        let (a, b, c) = tokio::join!(backend.delete_todo(1), backend.delete_todo(2), backend.delete_todo(3));
        assert!(a.is_ok() && b.is_ok() && c.is_ok());

        let refreshes = seen
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.path == "/api/token/refresh/")
            .count();
        assert_eq!(refreshes, 1);
    }

    #[test]
    fn join_url_uses_single_slash() {
        assert_eq!(join_url("https://x.test/api/", "/lists/"), "https://x.test/api/lists/");
        assert_eq!(join_url("https://x.test/api", "lists/3/"), "https://x.test/api/lists/3/");
    }

    #[test]
    fn error_mapping_prefers_server_message() {
        match error_from_status(400, r#"{"message": "Name taken"}"#) {
            BackendError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Name taken");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            error_from_status(401, r#"{"detail": "Token expired"}"#),
            BackendError::Auth(m) if m == "Token expired"
        ));
        assert!(matches!(error_from_status(404, "<html>"), BackendError::NotFound(_)));
        assert!(matches!(error_from_status(403, ""), BackendError::Auth(m) if m == "Invalid credentials"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = RestBackend::new(
            "https://example.test/api/",
            Duration::from_secs(5),
            Arc::new(MemorySessionStore::new()),
        )
        .unwrap();
        assert_eq!(backend.base_url(), "https://example.test/api");
        assert_eq!(backend.url("jwt-user/"), "https://example.test/api/jwt-user/");
    }

    #[tokio::test]
    async fn authorized_call_without_token_fails_before_sending() {
        let backend = RestBackend::new(
            "http://127.0.0.1:9/api",
            Duration::from_secs(1),
            Arc::new(MemorySessionStore::new()),
        )
        .unwrap();
        let err = backend.fetch_lists().await.unwrap_err();
        assert!(err.is_auth());
    }
}
