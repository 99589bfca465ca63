//! Completion Messages
//!
//! Exactly one message is produced per dispatched command. Success and
//! failure both travel inside the message, and every message that can go
//! stale carries the identifier (branch, hash) it was requested for so the
//! state machine never has to guess from the current cursor.

use crate::error::RepoError;
use crate::types::{CommitDetail, PrLookup, RepoSnapshot};

/// Result of one external operation
#[derive(Debug)]
pub enum Message {
    /// `CheckRepository` finished
    RepositoryChecked {
        /// A repository was found in the working directory
        detected: bool,
        /// The first-run prompt has already been answered
        integrated: bool,
    },

    /// `LoadWorktrees` finished
    WorktreesLoaded(Result<RepoSnapshot, RepoError>),

    /// `FetchCommitDetail` finished
    CommitDetailLoaded {
        /// Hash the fetch was requested for
        hash: String,
        /// Full detail, or why it could not be read
        result: Result<CommitDetail, RepoError>,
    },

    /// `FetchPrStatus` finished (never an error)
    PrFetched {
        /// Branch the lookup was requested for
        branch: String,
        /// What the lookup found
        lookup: PrLookup,
    },

    /// `InitializeRepository` finished
    RepositoryInitialized(Result<(), RepoError>),

    /// `FinishFirstRun` finished
    FirstRunFinished(Result<(), RepoError>),

    /// `CreateWorktree` finished
    WorktreeCreated(Result<(), RepoError>),

    /// `DeleteWorktree` finished
    WorktreeDeleted(Result<(), RepoError>),

    /// `RenameBranch` finished
    BranchRenamed(Result<(), RepoError>),
}

impl Message {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RepositoryChecked { .. } => "repository_checked",
            Self::WorktreesLoaded(_) => "worktrees_loaded",
            Self::CommitDetailLoaded { .. } => "commit_detail_loaded",
            Self::PrFetched { .. } => "pr_fetched",
            Self::RepositoryInitialized(_) => "repository_initialized",
            Self::FirstRunFinished(_) => "first_run_finished",
            Self::WorktreeCreated(_) => "worktree_created",
            Self::WorktreeDeleted(_) => "worktree_deleted",
            Self::BranchRenamed(_) => "branch_renamed",
        }
    }
}
