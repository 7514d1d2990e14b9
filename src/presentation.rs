//! List presentation engine.
//!
//! Turns the raw lists and categories fetched from the server into the
//! grouped, ordered view shown on the home screen:
//!
//! 1. keep only the lists of the selected category, if any;
//! 2. sort them by the chosen [`SortOption`];
//! 3. split them into groups, uncategorized lists first.
//!
//! Everything here is pure: same inputs, same output, no I/O.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::constants::UNCATEGORIZED_LABEL;
use crate::models::{Category, SortOption, TodoList};

/// One titled block of the home view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListGroup<'a> {
    pub name: String,
    /// `None` for the uncategorized group.
    pub category_id: Option<i64>,
    pub lists: Vec<&'a TodoList>,
}

/// User choices that shape the view.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions<'a> {
    pub selected_category: Option<&'a Category>,
    pub sort_option: SortOption,
    /// Order category groups by name instead of server order.
    pub category_sort_alpha: bool,
    pub uncategorized_label: &'a str,
}

impl Default for ViewOptions<'_> {
    fn default() -> Self {
        Self {
            selected_category: None,
            sort_option: SortOption::default(),
            category_sort_alpha: false,
            uncategorized_label: UNCATEGORIZED_LABEL,
        }
    }
}

/// Base letters only: decomposed, accents dropped, lowercased.
fn collation_key(name: &str) -> String {
    name.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect()
}

/// Locale-style name comparison. Accents and case are ignored first, so
/// "Èlite" sorts with the E's; accented and then exact text break ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn compare_lists(a: &TodoList, b: &TodoList, sort_option: SortOption) -> Ordering {
    match sort_option {
        SortOption::Alphabetical => compare_names(&a.name, &b.name),
        SortOption::Completion => b
            .completion_ratio()
            .partial_cmp(&a.completion_ratio())
            .unwrap_or(Ordering::Equal),
        // Lists without a timestamp sort as the oldest.
        SortOption::Creation => b.created_at.cmp(&a.created_at),
    }
}

/// Stable sort of `lists` by `sort_option`.
pub fn sort_lists<'a>(lists: &mut [&'a TodoList], sort_option: SortOption) {
    lists.sort_by(|a, b| compare_lists(a, b, sort_option));
}

/// Lists whose name contains `query`, ignoring case. A blank query keeps everything.
pub fn filter_lists<'a>(lists: &'a [TodoList], query: &str) -> Vec<&'a TodoList> {
    let needle = query.trim().to_lowercase();
    lists
        .iter()
        .filter(|list| needle.is_empty() || list.name.to_lowercase().contains(&needle))
        .collect()
}

/// Build the grouped view of `lists`.
pub fn group_lists<'a>(lists: &'a [TodoList], categories: &[Category], options: &ViewOptions<'_>) -> Vec<ListGroup<'a>> {
    group_list_refs(lists.iter().collect(), categories, options)
}

/// Same as [`group_lists`] over an already narrowed set of lists.
pub fn group_list_refs<'a>(
    lists: Vec<&'a TodoList>,
    categories: &[Category],
    options: &ViewOptions<'_>,
) -> Vec<ListGroup<'a>> {
    let mut visible: Vec<&TodoList> = match options.selected_category {
        Some(selected) => lists
            .into_iter()
            .filter(|list| list.category_id() == Some(selected.id))
            .collect(),
        None => lists,
    };
    sort_lists(&mut visible, options.sort_option);

    if let Some(selected) = options.selected_category {
        if visible.is_empty() {
            return Vec::new();
        }
        return vec![ListGroup {
            name: selected.name.clone(),
            category_id: Some(selected.id),
            lists: visible,
        }];
    }

    let mut groups = Vec::new();

    let uncategorized: Vec<&TodoList> = visible.iter().copied().filter(|l| l.category.is_none()).collect();
    if !uncategorized.is_empty() {
        groups.push(ListGroup {
            name: options.uncategorized_label.to_string(),
            category_id: None,
            lists: uncategorized,
        });
    }

    let mut category_groups: Vec<ListGroup> = categories
        .iter()
        .map(|category| ListGroup {
            name: category.name.clone(),
            category_id: Some(category.id),
            lists: visible
                .iter()
                .copied()
                .filter(|l| l.category_id() == Some(category.id))
                .collect(),
        })
        .filter(|group| !group.lists.is_empty())
        .collect();

    // Lists pointing at a category missing from `categories` still need a home.
    for list in visible.iter().copied() {
        let Some(category) = &list.category else {
            continue;
        };
        if categories.iter().any(|c| c.id == category.id) {
            continue;
        }
        match category_groups.iter_mut().find(|g| g.category_id == Some(category.id)) {
            Some(group) => group.lists.push(list),
            None => category_groups.push(ListGroup {
                name: category.name.clone(),
                category_id: Some(category.id),
                lists: vec![list],
            }),
        }
    }

    if options.category_sort_alpha {
        category_groups.sort_by(|a, b| compare_names(&a.name, &b.name));
    }

    groups.extend(category_groups);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoItem;
    use chrono::{TimeZone, Utc};

    fn list(id: i64, name: &str, category: Option<&Category>) -> TodoList {
        let mut list = TodoList::new(id, name);
        list.category = category.cloned();
        list
    }

    #[test]
    fn compare_names_ignores_case_but_is_total() {
        assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_names("Zed", "alpha"), Ordering::Greater);
        assert_ne!(compare_names("a", "A"), Ordering::Equal);
    }

    #[test]
    fn compare_names_folds_accents() {
        assert_eq!(compare_names("Èlite", "Zucchine"), Ordering::Less);
        assert_eq!(compare_names("àncora", "Bosco"), Ordering::Less);
        assert_eq!(compare_names("perche", "perché"), Ordering::Less);
        assert_ne!(compare_names("É", "é"), Ordering::Equal);
    }

    #[test]
    fn creation_sort_puts_newest_first_and_undated_last() {
        let mut old = TodoList::new(1, "old");
        old.created_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let mut new = TodoList::new(2, "new");
        new.created_at = Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        let undated = TodoList::new(3, "undated");

        let lists = [old, undated, new];
        let mut refs: Vec<&TodoList> = lists.iter().collect();
        sort_lists(&mut refs, SortOption::Creation);
        let ids: Vec<i64> = refs.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn completion_sort_is_stable_for_ties() {
        let mut a = TodoList::new(1, "a");
        a.todos = vec![TodoItem::new(1, "x", true), TodoItem::new(2, "y", false)];
        let mut b = TodoList::new(2, "b");
        b.todos = vec![TodoItem::new(3, "x", false), TodoItem::new(4, "y", true)];
        let lists = [a, b];
        let mut refs: Vec<&TodoList> = lists.iter().collect();
        sort_lists(&mut refs, SortOption::Completion);
        assert_eq!(refs[0].id, 1);
        assert_eq!(refs[1].id, 2);
    }

    #[test]
    fn orphan_category_gets_its_own_group() {
        let known = Category::new(1, "Work");
        let orphan = Category::new(99, "Archived");
        let lists = vec![list(1, "a", Some(&orphan)), list(2, "b", Some(&known))];
        let groups = group_lists(&lists, &[known], &ViewOptions::default());
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Work", "Archived"]);
    }

    #[test]
    fn filter_lists_matches_substring_case_insensitively() {
        let lists = vec![list(1, "Groceries", None), list(2, "Work stuff", None)];
        let found = filter_lists(&lists, "  GROC ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
        assert_eq!(filter_lists(&lists, "").len(), 2);
    }
}
