//! Worktree Core - Headless State and Git Plumbing for worktree-tui
//!
//! This crate holds everything about worktree-tui that is not drawing: the
//! interaction state machine, the command dispatcher and the git backend.
//! It never touches a terminal, so every transition is testable by feeding
//! events and asserting on the returned effects.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     worktree-tui (surface)                    │
//! │   crossterm EventStream ──► Key ──┐        ┌── render(&App)   │
//! └───────────────────────────────────┼────────┼──────────────────┘
//!                                     │ Event  │ &App
//! ┌───────────────────────────────────┼────────┼──────────────────┐
//! │                      WORKTREE CORE ▼        │                  │
//! │  ┌─────────────────────────────────────────┴───────────────┐  │
//! │  │  App::handle(Event) ──► Option<Effect>                   │  │
//! │  └──────────────┬──────────────────────────▲───────────────┘  │
//! │        Command  │                          │ Message          │
//! │  ┌──────────────▼──────────────────────────┴───────────────┐  │
//! │  │  Dispatcher (tokio tasks)  ──►  Repository (git, gh)     │  │
//! │  └──────────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`App`]: all UI state; the only mutator
//! - [`Event`]: keys, resizes and completions fed into the app
//! - [`Effect`]: what the surface must do next
//! - [`Command`] / [`Message`]: requests to and answers from the backend
//! - [`Repository`]: the collaborator trait; [`GitRepository`] implements it
//!
//! # Module Overview
//!
//! - [`app`]: interaction modes and transitions
//! - [`backend`]: repository trait, git implementation, metadata, shell hooks
//! - [`config`]: defaults, TOML file and environment overrides
//! - [`dispatcher`]: runs commands on background tasks
//! - [`error`]: failure taxonomy of external operations
//! - [`events`]: input to the state machine
//! - [`messages`]: completions of dispatched commands
//! - [`pager`]: commit overlay geometry and line buffer
//! - [`text`]: width-aware truncation, padding, wrapping and slugs
//! - [`types`]: worktrees, commits, patches and PR state
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![warn(missing_docs)]
#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod messages;
pub mod pager;
pub mod text;
pub mod types;

// Re-exports for convenience
pub use app::{App, CommitView, CreateField, CreateForm, Effect, Mode, RenameForm};
pub use backend::{GitRepository, Repository};
pub use config::{Config, ConfigError};
pub use dispatcher::{Command, Dispatcher};
pub use error::RepoError;
pub use events::{Event, Key};
pub use messages::Message;
pub use pager::{OverlayGeometry, PagerLine};
pub use types::{
    CommitDetail, CommitSummary, DiffKind, DiffLine, FileChange, FileStatus, NewWorktree,
    PrLookup, PrState, PullRequest, RepoSnapshot, RepoSummary, WorktreeEntry,
};
