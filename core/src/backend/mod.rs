//! Repository Backends
//!
//! The [`Repository`] trait is the only way the core touches the outside
//! world. [`GitRepository`] is the production implementation; tests supply
//! their own.

pub mod git;
pub mod meta;
pub mod parse;
pub mod shell;
pub mod traits;

pub use git::GitRepository;
pub use meta::{MetaStore, WorktreeMeta};
pub use shell::ShellIntegration;
pub use traits::Repository;
