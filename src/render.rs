//! Plain-text rendering of the data shown by the CLI.
//!
//! Functions return `String`s so output can be tested without a terminal.

use std::fmt::Write;

use crate::models::{Category, FriendRequest, Friendship, Notification, Share, TodoItem, TodoList, User};
use crate::presentation::ListGroup;

fn list_line(list: &TodoList, show_completion: bool) -> String {
    let mut line = format!("  [{}] {}", list.id, list.name);
    if show_completion {
        let (done, total) = list.completion_counts();
        let _ = write!(line, " ({done}/{total})");
    }
    if list.sharing.is_shared {
        match &list.sharing.shared_by {
            Some(owner) if !list.sharing.is_owner => {
                let _ = write!(line, " 👥 shared by {}", owner.username);
            }
            _ => line.push_str(" 👥"),
        }
    }
    line
}

/// The grouped home view.
pub fn groups(groups: &[ListGroup<'_>], show_completion: bool) -> String {
    if groups.is_empty() {
        return "No lists to show.\n".to_string();
    }
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(out, "📁 {}", group.name);
        for list in &group.lists {
            let _ = writeln!(out, "{}", list_line(list, show_completion));
        }
    }
    out
}

pub fn todo_line(todo: &TodoItem) -> String {
    let mark = if todo.completed { "x" } else { " " };
    let mut line = format!("  [{mark}] {} {}", todo.id, todo.title);
    if let Some(quantity) = todo.quantity_label() {
        let _ = write!(line, " ({quantity})");
    }
    line
}

/// A single list with its todos and shares.
pub fn list_detail(list: &TodoList, shares: &[Share]) -> String {
    let (done, total) = list.completion_counts();
    let mut out = format!("{} [{}] {done}/{total} done\n", list.name, list.color);
    if let Some(category) = &list.category {
        let _ = writeln!(out, "Category: {}", category.name);
    }
    if list.todos.is_empty() {
        out.push_str("  (no todos)\n");
    }
    for todo in &list.todos {
        let _ = writeln!(out, "{}", todo_line(todo));
    }
    if !shares.is_empty() {
        let names: Vec<&str> = shares.iter().map(|s| s.username.as_str()).collect();
        let _ = writeln!(out, "Shared with: {}", names.join(", "));
    }
    out
}

pub fn categories(categories: &[Category], selected: Option<i64>) -> String {
    if categories.is_empty() {
        return "No categories.\n".to_string();
    }
    categories
        .iter()
        .map(|c| {
            let marker = if Some(c.id) == selected { "*" } else { " " };
            format!("{marker} [{}] {}\n", c.id, c.name)
        })
        .collect()
}

pub fn friends(friends: &[Friendship]) -> String {
    if friends.is_empty() {
        return "No friends yet.\n".to_string();
    }
    friends
        .iter()
        .map(|f| {
            let full_name = f.friend.full_name.trim();
            if full_name.is_empty() {
                format!("  [{}] {}\n", f.friend.id, f.friend.username)
            } else {
                format!("  [{}] {} ({full_name})\n", f.friend.id, f.friend.username)
            }
        })
        .collect()
}

pub fn friend_requests(requests: &[FriendRequest]) -> String {
    if requests.is_empty() {
        return "No pending requests.\n".to_string();
    }
    requests
        .iter()
        .map(|r| format!("  [{}] from {}\n", r.id, r.from_user.username))
        .collect()
}

pub fn users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }
    users
        .iter()
        .map(|u| {
            let action = if u.can_send_request() { "" } else { " (request not available)" };
            format!("  [{}] {}{action}\n", u.id, u.username)
        })
        .collect()
}

pub fn notifications(notifications: &[Notification], unread: usize) -> String {
    let mut out = format!("🔔 {unread} unread\n");
    for n in notifications {
        let dot = if n.read { " " } else { "•" };
        let _ = writeln!(out, "{dot} [{}] {} {}: {}", n.id, n.kind.icon(), n.title, n.message);
    }
    out
}
