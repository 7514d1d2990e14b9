//! Command-line front-end.
//!
//! One subcommand per user action; each runs against freshly loaded state and
//! prints the outcome.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};

use crate::backend::{create_backend, Backend, ListDraft, ProfileUpdate, RegisterArgs};
use crate::config::Config;
use crate::constants::*;
use crate::models::{ListColor, SortOption, Theme, TodoSortOrder};
use crate::presentation::filter_lists;
use crate::render;
use crate::services::{
    AuthService, FriendsService, HomeService, ListService, NotificationCenter, ServiceError, UserSearch,
};
use crate::session::{FileSessionStore, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "todolist", version, about = "Shared to-do lists from the terminal")]
pub struct Cli {
    /// Use this configuration file instead of the default lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in; the password is read from stdin when not given
    Login {
        username: String,
        #[arg(long)]
        password: Option<String>,
        /// Keep the session across restarts
        #[arg(long)]
        remember: bool,
    },
    Logout,
    /// Show the logged-in user
    Whoami,
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Edit profile fields
    Profile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Ask for a password reset email
    PasswordReset,
    /// Set a new password from a reset link
    SetPassword {
        uid: String,
        token: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// Send the email verification link again
    VerifyEmail,
    /// Deactivate the account
    Deactivate {
        #[arg(long)]
        yes: bool,
    },

    /// Show lists grouped by category
    Lists {
        #[arg(long)]
        category: Option<i64>,
        #[arg(long, value_parser = SortOption::from_str)]
        sort: Option<SortOption>,
        #[arg(long)]
        alpha_categories: bool,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one list with its todos
    List { id: i64 },
    ListCreate {
        name: String,
        #[arg(long, default_value = "blue")]
        color: String,
        #[arg(long)]
        category: Option<i64>,
    },
    ListEdit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long, conflicts_with = "no_category")]
        category: Option<i64>,
        /// Remove the list from its category
        #[arg(long)]
        no_category: bool,
    },
    ListDelete { id: i64 },

    Categories,
    CategoryCreate { name: String },
    CategoryEdit { id: i64, name: String },
    CategoryDelete { id: i64 },
    /// Show only one category on the home view; no id shows all
    CategorySelect { id: Option<i64> },
    /// Order category groups alphabetically (true) or in server order (false)
    CategorySort {
        #[arg(action = ArgAction::Set)]
        alphabetical: bool,
    },
    /// Save the list order: created, alphabetical or complete
    Sort {
        #[arg(value_parser = SortOption::from_str)]
        option: SortOption,
    },

    TodoAdd {
        list: i64,
        title: String,
        #[arg(long, requires = "unit")]
        quantity: Option<String>,
        #[arg(long, requires = "quantity")]
        unit: Option<String>,
    },
    TodoToggle { list: i64, todo: i64 },
    /// Rename a todo; quantity and unit stay unless replaced or cleared
    TodoEdit {
        list: i64,
        todo: i64,
        title: String,
        #[arg(long, conflicts_with = "no_quantity")]
        quantity: Option<String>,
        #[arg(long, conflicts_with = "no_quantity")]
        unit: Option<String>,
        /// Drop the quantity and unit of the todo
        #[arg(long)]
        no_quantity: bool,
    },
    /// Delete one or more todos of a list
    TodoDelete {
        list: i64,
        #[arg(required = true, num_args = 1..)]
        todos: Vec<i64>,
    },
    TodoMove { list: i64, todo: i64, target: i64 },
    /// Change how the todos of a list are ordered
    TodoSort {
        list: i64,
        #[arg(value_parser = TodoSortOrder::from_str)]
        order: TodoSortOrder,
    },

    Friends,
    FriendRemove { user_id: i64 },
    Requests,
    RequestAccept { id: i64 },
    RequestReject { id: i64 },
    /// Search users by name
    Users { query: String },
    FriendRequest { user_id: i64 },

    Notifications,
    NotificationRead {
        #[arg(required_unless_present = "all")]
        id: Option<i64>,
        #[arg(long)]
        all: bool,
    },
    NotificationDelete { id: i64 },
    /// Enable or disable push notifications
    Push {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },

    Theme { theme: Theme },

    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Write a default configuration file
    Init {
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
}

/// Load the configuration from `path` or the default lookup, with env overrides.
pub fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            let mut config = Config::load_from_file(path)?;
            config.apply_env_overrides(std::env::var(ENV_API_URL).ok());
            config.validate()?;
            Ok(config)
        }
        None => Config::load(),
    }
}

fn read_secret(prompt: &str) -> Result<String> {
    eprint!("{prompt}: ");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn secret_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => read_secret(prompt),
    }
}

/// Turn a service failure into a user-facing error.
pub fn describe_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ServiceError>() {
        Some(ServiceError::NotAuthenticated) => ERROR_NOT_LOGGED_IN.to_string(),
        Some(ServiceError::Backend(e)) if e.is_auth() => format!("❌ {e}\n{ERROR_NOT_LOGGED_IN}"),
        _ => format!("❌ {error:#}"),
    }
}

/// Everything a command needs.
pub struct App {
    pub config: Config,
    pub session: Arc<dyn SessionStore>,
    pub backend: Arc<dyn Backend>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.session_path()?));
        let backend = create_backend(&config.api, session.clone())?;
        Ok(Self {
            config,
            session,
            backend,
        })
    }

    pub fn with_backend(config: Config, session: Arc<dyn SessionStore>, backend: Arc<dyn Backend>) -> Self {
        Self {
            config,
            session,
            backend,
        }
    }

    fn auth(&self) -> AuthService {
        AuthService::new(self.backend.clone(), self.session.clone())
    }

    async fn home(&self) -> Result<HomeService> {
        let mut home = HomeService::new(self.backend.clone(), self.config.display.clone());
        home.load().await?;
        Ok(home)
    }

    async fn list(&self, id: i64) -> Result<ListService> {
        let mut service = ListService::new(self.backend.clone());
        service.load(id).await?;
        Ok(service)
    }

    /// Run one command and return what should be printed.
    pub async fn execute(&self, command: Command) -> Result<String> {
        let show_completion = self.config.display.show_completion;

        let output = match command {
            Command::Login {
                username,
                password,
                remember,
            } => {
                let password = secret_or_prompt(password, "Password")?;
                let user = self.auth().login(&username, &password, remember).await?;
                match user {
                    Some(user) => format!("{SUCCESS_LOGGED_IN} as {}", user.username),
                    None => SUCCESS_LOGGED_IN.to_string(),
                }
            }
            Command::Logout => {
                self.auth().logout()?;
                SUCCESS_LOGGED_OUT.to_string()
            }
            Command::Whoami => {
                let user = self.auth().require_user().await?;
                let mut out = format!("{} (id {})", user.username, user.id);
                if let Some(email) = &user.email {
                    out.push_str(&format!("\n{email}"));
                }
                if user.email_verified == Some(false) {
                    out.push_str("\n⚠️  Email not verified");
                }
                out
            }
            Command::Register {
                username,
                email,
                password,
            } => {
                let password = secret_or_prompt(password, "Password")?;
                let message = self
                    .auth()
                    .register(&RegisterArgs {
                        username,
                        email,
                        password,
                    })
                    .await?;
                message.message.unwrap_or_else(|| SUCCESS_REGISTERED.to_string())
            }
            Command::Profile {
                username,
                email,
                full_name,
            } => {
                let update = ProfileUpdate {
                    username,
                    email,
                    full_name,
                };
                let message = self.auth().update_profile(&update).await?;
                message.message.unwrap_or_else(|| "✅ Profile updated".to_string())
            }
            Command::PasswordReset => {
                let message = self.auth().request_password_reset().await?;
                message.message.unwrap_or_else(|| "✅ Reset email sent".to_string())
            }
            Command::SetPassword { uid, token, password } => {
                let password = secret_or_prompt(password, "New password")?;
                let message = self.auth().set_new_password(&uid, &token, &password).await?;
                message.message.unwrap_or_else(|| "✅ Password changed".to_string())
            }
            Command::VerifyEmail => {
                let message = self.auth().send_verification_email().await?;
                message.message.unwrap_or_else(|| "✅ Verification email sent".to_string())
            }
            Command::Deactivate { yes } => {
                if !yes {
                    anyhow::bail!("Refusing to deactivate the account without --yes");
                }
                self.auth().deactivate_account().await?;
                SUCCESS_ACCOUNT_DEACTIVATED.to_string()
            }

            Command::Lists {
                category,
                sort,
                alpha_categories,
                search,
            } => {
                let home = self.home().await?;
                let mut options = home.view_options();
                if let Some(id) = category {
                    options.selected_category = Some(
                        home.category(id)
                            .ok_or_else(|| ServiceError::validation(ERROR_UNKNOWN_CATEGORY))?,
                    );
                }
                if let Some(sort) = sort {
                    options.sort_option = sort;
                }
                if alpha_categories {
                    options.category_sort_alpha = true;
                }
                let lists = match &search {
                    Some(query) => filter_lists(home.lists(), query),
                    None => home.lists().iter().collect(),
                };
                let mut out = format!("Sorted: {}\n", options.sort_option.label());
                out.push_str(&render::groups(&home.view(lists, &options), show_completion));
                out
            }
            Command::List { id } => {
                let service = self.list(id).await?;
                match service.list() {
                    Some(list) => render::list_detail(list, service.shares()),
                    None => String::new(),
                }
            }
            Command::ListCreate { name, color, category } => {
                let mut home = HomeService::new(self.backend.clone(), self.config.display.clone());
                let draft = ListDraft {
                    name,
                    color: ListColor::from_name(&color),
                    category,
                };
                home.save_list(None, draft).await?;
                SUCCESS_LIST_CREATED.to_string()
            }
            Command::ListEdit {
                id,
                name,
                color,
                category,
                no_category,
            } => {
                let current = self.backend.fetch_list(id).await.map_err(ServiceError::from)?;
                let draft = ListDraft {
                    name: name.unwrap_or_else(|| current.name.clone()),
                    color: color.map(|c| ListColor::from_name(&c)).unwrap_or(current.color),
                    category: if no_category {
                        None
                    } else {
                        category.or(current.category_id())
                    },
                };
                let mut home = HomeService::new(self.backend.clone(), self.config.display.clone());
                home.save_list(Some(id), draft).await?;
                SUCCESS_LIST_UPDATED.to_string()
            }
            Command::ListDelete { id } => {
                let mut home = HomeService::new(self.backend.clone(), self.config.display.clone());
                home.delete_list(id).await?;
                SUCCESS_LIST_DELETED.to_string()
            }

            Command::Categories => {
                let home = self.home().await?;
                render::categories(home.categories(), home.selected_category().map(|c| c.id))
            }
            Command::CategoryCreate { name } => {
                let mut home = HomeService::new(self.backend.clone(), self.config.display.clone());
                home.save_category(None, &name).await?;
                SUCCESS_CATEGORY_CREATED.to_string()
            }
            Command::CategoryEdit { id, name } => {
                let mut home = HomeService::new(self.backend.clone(), self.config.display.clone());
                home.save_category(Some(id), &name).await?;
                SUCCESS_CATEGORY_UPDATED.to_string()
            }
            Command::CategoryDelete { id } => {
                let mut home = HomeService::new(self.backend.clone(), self.config.display.clone());
                home.delete_category(id).await?;
                SUCCESS_CATEGORY_DELETED.to_string()
            }
            Command::CategorySelect { id } => {
                let mut home = self.home().await?;
                home.select_category(id).await?;
                SUCCESS_CATEGORY_SELECTED.to_string()
            }
            Command::CategorySort { alphabetical } => {
                let mut home = HomeService::new(self.backend.clone(), self.config.display.clone());
                home.set_category_sort_alpha(alphabetical).await;
                format!("✅ Category order: {}", if alphabetical { "alphabetical" } else { "default" })
            }
            Command::Sort { option } => {
                let mut home = HomeService::new(self.backend.clone(), self.config.display.clone());
                home.set_sort_option(option).await;
                format!("✅ Lists sorted: {}", option.label())
            }

            Command::TodoAdd {
                list,
                title,
                quantity,
                unit,
            } => {
                let mut service = self.list(list).await?;
                match (quantity, unit) {
                    (Some(quantity), Some(unit)) => {
                        service.add_todo_with_quantity(&title, &quantity, &unit).await?;
                    }
                    _ => {
                        if !service.add_todo(&title).await? {
                            return Err(ServiceError::validation(ERROR_EMPTY_TODO_TITLE).into());
                        }
                    }
                }
                SUCCESS_TODO_CREATED.to_string()
            }
            Command::TodoToggle { list, todo } => {
                let mut service = self.list(list).await?;
                service.toggle(todo).await?;
                SUCCESS_TODO_TOGGLED.to_string()
            }
            Command::TodoEdit {
                list,
                todo,
                title,
                quantity,
                unit,
                no_quantity,
            } => {
                let quantity = quantity
                    .as_deref()
                    .map(crate::services::list_detail::parse_quantity)
                    .transpose()?;
                let mut service = self.list(list).await?;
                let current = service
                    .todos()
                    .iter()
                    .find(|t| t.id == todo)
                    .cloned()
                    .ok_or_else(|| ServiceError::validation(ERROR_TODO_NOT_IN_LIST))?;
                let (quantity, unit) = if no_quantity {
                    (None, None)
                } else {
                    (quantity.or(current.quantity), unit.or(current.unit))
                };
                if quantity.is_some() != unit.is_some() {
                    return Err(ServiceError::validation(ERROR_MISSING_QUANTITY).into());
                }
                service.edit(todo, &title, quantity, unit).await?;
                SUCCESS_TODO_UPDATED.to_string()
            }
            Command::TodoDelete { list, todos } => {
                let mut service = self.list(list).await?;
                if let [todo] = todos.as_slice() {
                    service.delete(*todo).await?;
                    SUCCESS_TODO_DELETED.to_string()
                } else {
                    let report = service.bulk_delete(&todos).await?;
                    if let Some(e) = report.first_error {
                        return Err(anyhow::Error::new(ServiceError::Backend(e))
                            .context(format!("Deleted {} of {} todos", report.deleted, todos.len())));
                    }
                    format!("{SUCCESS_TODO_DELETED} ({})", report.deleted)
                }
            }
            Command::TodoMove { list, todo, target } => {
                let mut service = self.list(list).await?;
                service.move_todo(todo, target).await?;
                SUCCESS_TODO_MOVED.to_string()
            }
            Command::TodoSort { list, order } => {
                let mut service = self.list(list).await?;
                service.set_sort_order(order).await?;
                format!("✅ Todos sorted: {}", order.wire_value())
            }

            Command::Friends => {
                let mut service = FriendsService::new(self.backend.clone());
                render::friends(service.load_friends().await?)
            }
            Command::FriendRemove { user_id } => {
                let mut service = FriendsService::new(self.backend.clone());
                service.remove_friend(user_id).await?;
                SUCCESS_FRIEND_REMOVED.to_string()
            }
            Command::Requests => {
                let mut service = FriendsService::new(self.backend.clone());
                render::friend_requests(service.load_requests().await?)
            }
            Command::RequestAccept { id } => {
                let mut service = FriendsService::new(self.backend.clone());
                service.accept(id).await?;
                SUCCESS_REQUEST_ACCEPTED.to_string()
            }
            Command::RequestReject { id } => {
                let mut service = FriendsService::new(self.backend.clone());
                service.reject(id).await?;
                SUCCESS_REQUEST_REJECTED.to_string()
            }
            Command::Users { query } => {
                let mut search = UserSearch::new(self.backend.clone());
                render::users(search.search(&query).await?)
            }
            Command::FriendRequest { user_id } => {
                let mut search = UserSearch::new(self.backend.clone());
                search.send_request(user_id).await?;
                SUCCESS_REQUEST_SENT.to_string()
            }

            Command::Notifications => {
                let mut center = NotificationCenter::new(self.backend.clone());
                center.refresh().await?;
                render::notifications(center.notifications(), center.unread_count())
            }
            Command::NotificationRead { id, all } => {
                let mut center = NotificationCenter::new(self.backend.clone());
                match id {
                    Some(id) if !all => {
                        center.mark_read(id).await?;
                        SUCCESS_NOTIFICATION_READ.to_string()
                    }
                    _ => {
                        center.mark_all_read().await?;
                        SUCCESS_NOTIFICATIONS_READ.to_string()
                    }
                }
            }
            Command::NotificationDelete { id } => {
                let mut center = NotificationCenter::new(self.backend.clone());
                center.delete(id).await?;
                SUCCESS_NOTIFICATION_DELETED.to_string()
            }
            Command::Push { enabled } => {
                self.auth().set_push_notifications(enabled).await?;
                format!("✅ Push notifications {}", if enabled { "enabled" } else { "disabled" })
            }

            Command::Theme { theme } => {
                self.auth().set_theme(theme).await?;
                format!("{SUCCESS_THEME_UPDATED}: {theme}")
            }

            Command::Config(ConfigCommand::Init { path, force }) => init_config(path, force)?,
        };
        Ok(output)
    }
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<String> {
    let path = match path {
        Some(path) => path,
        None => Config::get_default_config_path()?,
    };
    if path.exists() && !force {
        anyhow::bail!("{} already exists, use --force to overwrite it", path.display());
    }
    Config::generate_default_config(&path)?;
    Ok(format!("Edit {} to point at your server", path.display()))
}

/// Entry point used by `main`.
pub async fn run(cli: Cli) -> Result<()> {
    // Config generation must work even when the current config is broken.
    if let Command::Config(ConfigCommand::Init { path, force }) = &cli.command {
        println!("{}", init_config(path.clone(), *force)?);
        return Ok(());
    }

    let config = load_config(cli.config.as_ref())?;
    match crate::logger::init(&config.logging) {
        Ok(Some(path)) => log::info!("🚀 todolist {} logging to {}", env!("CARGO_PKG_VERSION"), path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("⚠️  Logging disabled: {e:#}"),
    }

    let app = App::new(config)?;
    let output = app.execute(cli.command).await?;
    println!("{output}");
    Ok(())
}
