//! Repository Trait
//!
//! Abstraction over everything slow the UI needs: version-control queries
//! and mutations, PR lookups, metadata persistence and shell integration.
//! The state machine never calls this directly; the
//! [`Dispatcher`](crate::dispatcher::Dispatcher) does, on its own tasks.
//!
//! # Design Philosophy
//!
//! Each method is a single request/response. Implementations may block on
//! child processes for as long as they like; only the one pending result
//! waits, never the UI.

use std::path::Path;

use async_trait::async_trait;

use crate::error::RepoError;
use crate::types::{CommitDetail, NewWorktree, PrLookup, RepoSummary, WorktreeEntry};

/// Collaborator contract consumed by the dispatcher
#[async_trait]
pub trait Repository: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    /// Whether the working directory is inside a repository
    async fn repository_detected(&self) -> bool;

    /// Whether HEAD resolves to a commit
    async fn has_any_commit(&self) -> bool;

    /// All worktrees, primary first
    async fn list_worktrees(&self) -> Result<Vec<WorktreeEntry>, RepoError>;

    /// Header facts for the repository
    async fn repository_summary(&self) -> Result<RepoSummary, RepoError>;

    /// Subject, body, files and patch of one commit
    async fn fetch_commit_detail(
        &self,
        worktree: &Path,
        hash: &str,
    ) -> Result<CommitDetail, RepoError>;

    /// PR state for a branch. Never fails: problems map to
    /// [`PrLookup::Unavailable`].
    async fn fetch_pr_status(&self, branch: &str) -> PrLookup;

    /// Create a worktree on a new branch and record its metadata
    async fn create_worktree(&self, request: &NewWorktree) -> Result<(), RepoError>;

    /// Remove a worktree and forget its metadata
    async fn delete_worktree(&self, branch: &str, path: &Path) -> Result<(), RepoError>;

    /// Rename a branch, carrying its metadata along
    async fn rename_branch(&self, from: &str, to: &str) -> Result<(), RepoError>;

    /// Create a repository in the working directory
    async fn initialize_repository(&self) -> Result<(), RepoError>;

    /// Leave `path` where the wrapping shell function will `cd` to it
    async fn record_change_directory_target(&self, path: &Path) -> Result<(), RepoError>;

    /// Whether the first-run prompt has been answered before
    async fn is_first_run_marker_set(&self) -> bool;

    /// Remember that the first-run prompt has been answered
    async fn set_first_run_marker(&self) -> Result<(), RepoError>;

    /// Add the cd-on-exit wrapper to the user's shell profile
    async fn install_shell_integration(&self) -> Result<(), RepoError>;
}
