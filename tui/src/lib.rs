//! worktree-tui - Terminal interface for git worktrees
//!
//! This crate is the ratatui/crossterm surface over `worktree-core`. It owns
//! nothing but the terminal: key translation, drawing and the event loop.
//!
//! # Architecture
//!
//! - **Input**: crossterm key events to core keys
//! - **Render**: pure functions from core state to a frame
//! - **Theme**: one immutable palette handed to the renderer
//! - **App**: the select loop between terminal input and command completions

pub mod app;
pub mod input;
pub mod render;
pub mod theme;

pub use app::TerminalApp;
pub use theme::Theme;
