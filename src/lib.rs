//! todolist - a command-line client for a shared to-do list service
//!
//! This library provides everything behind the `todolist` binary: a REST
//! client for the to-do service, local session storage, screen-level
//! services and the presentation engine that groups and orders lists for
//! the home view.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`backend`] - Remote service interface and its REST implementation
//! * [`config`] - Application configuration management
//! * [`presentation`] - Filtering, sorting and grouping of lists
//! * [`services`] - Per-screen state and operations
//! * [`session`] - Access/refresh token storage
//! * [`cli`] - Command-line front-end

/// Backend abstraction layer and REST client
pub mod backend;

/// Command-line parsing and dispatch
pub mod cli;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// File logging setup
pub mod logger;

/// Data types exchanged with the server
pub mod models;

/// Grouping and ordering of lists for the home view
pub mod presentation;

/// Plain-text rendering for the CLI
pub mod render;

/// Services backing each screen of the app
pub mod services;

/// Token storage between runs
pub mod session;

pub use models::{Category, SortOption, TodoItem, TodoList};
pub use presentation::{group_lists, ListGroup, ViewOptions};
