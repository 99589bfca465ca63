//! Error Types
//!
//! Failures of external operations. They never cross into the state machine
//! as raised errors; the dispatcher folds them into completion messages.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by a [`Repository`](crate::backend::Repository)
#[derive(Debug, Error)]
pub enum RepoError {
    /// A git invocation exited non-zero
    #[error("{stderr}")]
    Git {
        /// Arguments passed to git
        command: String,
        /// Trimmed stderr (or a fallback when git printed nothing)
        stderr: String,
    },

    /// A worktree cannot be created before the first commit exists
    #[error("repo has no commits yet; make an initial commit on the default branch before creating worktrees")]
    NoCommits,

    /// The user's shell has no known rc file
    #[error("unsupported shell: {0}")]
    UnsupportedShell(String),

    /// A well-known directory could not be determined
    #[error("could not determine the {0} directory")]
    MissingDirectory(&'static str),

    /// Reading or writing a file failed
    #[error("{path}: {source}")]
    File {
        /// File that was accessed
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Spawning a process or another IO operation failed
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Worktree metadata could not be (de)serialized
    #[error("worktree metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl RepoError {
    /// Convenience constructor for git failures
    pub fn git(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::Git {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_error_displays_stderr() {
        let err = RepoError::git("worktree add", "fatal: 'x' already exists");
        assert_eq!(err.to_string(), "fatal: 'x' already exists");
    }

    #[test]
    fn test_no_commits_message_is_descriptive() {
        let msg = RepoError::NoCommits.to_string();
        assert!(msg.contains("no commits"));
        assert!(msg.contains("initial commit"));
    }
}
