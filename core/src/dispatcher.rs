//! Command Dispatcher
//!
//! Runs [`Command`]s against a [`Repository`] on background tasks and sends
//! exactly one [`Message`] back per command. Commands are independent: two
//! in flight may complete in either order, and the state machine relies on
//! the identifiers inside each message rather than on arrival order.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::backend::Repository;
use crate::error::RepoError;
use crate::messages::Message;
use crate::types::{NewWorktree, RepoSnapshot};

/// Requested external operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Detect the repository and the first-run marker
    CheckRepository,
    /// Refresh worktrees, header facts and the has-commits flag
    LoadWorktrees,
    /// Full detail of one commit
    FetchCommitDetail {
        /// Worktree the commit was listed in
        path: PathBuf,
        /// Abbreviated hash
        hash: String,
    },
    /// PR state of one branch
    FetchPrStatus {
        /// Branch to look up
        branch: String,
    },
    /// `git init` in the working directory
    InitializeRepository,
    /// Record the first-run answer
    FinishFirstRun {
        /// Whether the user accepted shell integration
        install_shell: bool,
    },
    /// Create a worktree
    CreateWorktree(NewWorktree),
    /// Remove a worktree
    DeleteWorktree {
        /// Branch checked out there
        branch: String,
        /// Working copy path
        path: PathBuf,
    },
    /// Rename a branch
    RenameBranch {
        /// Current name
        from: String,
        /// New name
        to: String,
    },
}

impl Command {
    /// Short name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CheckRepository => "check_repository",
            Self::LoadWorktrees => "load_worktrees",
            Self::FetchCommitDetail { .. } => "fetch_commit_detail",
            Self::FetchPrStatus { .. } => "fetch_pr_status",
            Self::InitializeRepository => "initialize_repository",
            Self::FinishFirstRun { .. } => "finish_first_run",
            Self::CreateWorktree(_) => "create_worktree",
            Self::DeleteWorktree { .. } => "delete_worktree",
            Self::RenameBranch { .. } => "rename_branch",
        }
    }
}

/// Run one command to completion
pub async fn execute(repo: &dyn Repository, command: Command) -> Message {
    match command {
        Command::CheckRepository => {
            let detected = repo.repository_detected().await;
            let integrated = !detected || repo.is_first_run_marker_set().await;
            Message::RepositoryChecked {
                detected,
                integrated,
            }
        }

        Command::LoadWorktrees => Message::WorktreesLoaded(load_snapshot(repo).await),

        Command::FetchCommitDetail { path, hash } => {
            let result = repo.fetch_commit_detail(&path, &hash).await;
            Message::CommitDetailLoaded { hash, result }
        }

        Command::FetchPrStatus { branch } => {
            let lookup = repo.fetch_pr_status(&branch).await;
            Message::PrFetched { branch, lookup }
        }

        Command::InitializeRepository => {
            Message::RepositoryInitialized(repo.initialize_repository().await)
        }

        Command::FinishFirstRun { install_shell } => {
            let installed = if install_shell {
                repo.install_shell_integration().await
            } else {
                Ok(())
            };
            let marked = repo.set_first_run_marker().await;
            Message::FirstRunFinished(installed.and(marked))
        }

        Command::CreateWorktree(request) => {
            let result = if repo.has_any_commit().await {
                repo.create_worktree(&request).await
            } else {
                Err(RepoError::NoCommits)
            };
            Message::WorktreeCreated(result)
        }

        Command::DeleteWorktree { branch, path } => {
            Message::WorktreeDeleted(repo.delete_worktree(&branch, &path).await)
        }

        Command::RenameBranch { from, to } => {
            Message::BranchRenamed(repo.rename_branch(&from, &to).await)
        }
    }
}

async fn load_snapshot(repo: &dyn Repository) -> Result<RepoSnapshot, RepoError> {
    let (worktrees, summary, has_commits) = tokio::join!(
        repo.list_worktrees(),
        repo.repository_summary(),
        repo.has_any_commit(),
    );
    Ok(RepoSnapshot {
        worktrees: worktrees?,
        summary: summary?,
        has_commits,
    })
}

/// Spawns commands and forwards their completions
#[derive(Clone)]
pub struct Dispatcher {
    repo: Arc<dyn Repository>,
    tx: mpsc::Sender<Message>,
}

impl Dispatcher {
    /// Dispatcher sending completions on `tx`
    pub fn new(repo: Arc<dyn Repository>, tx: mpsc::Sender<Message>) -> Self {
        Self { repo, tx }
    }

    /// Dispatcher plus the receiving end of its completion channel
    pub fn channel(repo: Arc<dyn Repository>, capacity: usize) -> (Self, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(repo, tx), rx)
    }

    /// Start `command` on its own task
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        let repo = Arc::clone(&self.repo);
        let tx = self.tx.clone();
        let kind = command.kind();
        debug!(command = kind, backend = repo.name(), "Dispatching");

        tokio::spawn(async move {
            let message = execute(repo.as_ref(), command).await;
            debug!(command = kind, message = message.kind(), "Completed");
            if tx.send(message).await.is_err() {
                debug!(command = kind, "Receiver gone, dropping completion");
            }
        })
    }
}
