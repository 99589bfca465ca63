//! Domain Model
//!
//! Plain data describing worktrees, commits, patches and PR state. These are
//! produced by a [`Repository`](crate::backend::Repository) and replaced
//! wholesale on every refresh; nothing here is mutated field by field.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One working copy attached to the repository
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorktreeEntry {
    /// Display name (user metadata, or derived from the branch)
    pub name: String,
    /// Absolute filesystem path
    pub path: PathBuf,
    /// Checked-out branch, e.g. `feat/auth-refresh`
    pub branch: String,
    /// True for the repository's primary working copy
    pub is_primary: bool,
    /// Human relative time of the last commit, e.g. `2 hours ago`
    pub updated: String,
    /// Free-text description from metadata
    pub description: Option<String>,
    /// Short SHA of HEAD when the worktree was created
    pub created_from: Option<String>,
    /// Commits ahead of the default branch
    pub ahead: u32,
    /// Commits behind the default branch
    pub behind: u32,
    /// Whether the branch is merged into the default branch
    pub merged: bool,
    /// Most recent commits, newest first
    pub commits: Vec<CommitSummary>,
    /// Short SHA of the current HEAD
    pub head: Option<String>,
    /// Modified, deleted or renamed files
    pub modified: usize,
    /// Untracked files
    pub untracked: usize,
}

impl WorktreeEntry {
    /// True when the working copy has no pending changes
    pub fn is_clean(&self) -> bool {
        self.modified == 0 && self.untracked == 0
    }
}

/// A commit as listed in the detail pane
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// Abbreviated hash
    pub hash: String,
    /// Subject line
    pub subject: String,
    /// Relative commit time, e.g. `3 hours ago`
    pub relative_time: String,
}

impl CommitSummary {
    /// Create a summary
    pub fn new(
        hash: impl Into<String>,
        subject: impl Into<String>,
        relative_time: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            subject: subject.into(),
            relative_time: relative_time.into(),
        }
    }
}

/// Everything shown in the commit overlay
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Abbreviated hash
    pub hash: String,
    /// Subject line
    pub subject: String,
    /// Body text (may be empty)
    pub body: String,
    /// Relative commit time
    pub relative_time: String,
    /// Files touched by the commit
    pub files: Vec<FileChange>,
    /// Patch, one entry per line
    pub diff: Vec<DiffLine>,
    /// False until the full fetch has completed
    pub loaded: bool,
}

impl CommitDetail {
    /// Placeholder built from what the commit list already knows
    pub fn placeholder(summary: &CommitSummary) -> Self {
        Self {
            hash: summary.hash.clone(),
            subject: summary.subject.clone(),
            relative_time: summary.relative_time.clone(),
            ..Default::default()
        }
    }
}

/// Status letter of a changed file
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    /// `A`
    Added,
    /// `M`
    Modified,
    /// `D`
    Deleted,
    /// `R`
    Renamed,
    /// `C`
    Copied,
    /// `T`
    TypeChanged,
    /// `U`
    Unmerged,
}

impl FileStatus {
    /// Parse a `--name-status` code. Scores such as `R090` keep only the
    /// leading letter; unknown letters read as modified.
    pub fn from_code(code: &str) -> Self {
        match code.chars().next() {
            Some('A') => Self::Added,
            Some('D') => Self::Deleted,
            Some('R') => Self::Renamed,
            Some('C') => Self::Copied,
            Some('T') => Self::TypeChanged,
            Some('U') => Self::Unmerged,
            _ => Self::Modified,
        }
    }

    /// Single-letter code
    pub fn code(self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
            Self::Copied => 'C',
            Self::TypeChanged => 'T',
            Self::Unmerged => 'U',
        }
    }
}

/// One entry of the "files changed" list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Change kind
    pub status: FileStatus,
    /// Path (destination path for renames and copies)
    pub path: String,
}

/// Category of a patch line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffKind {
    /// `diff --git ...`
    FileHeader,
    /// `index`, `---`, `+++`, `new file`, `deleted file`, ...
    Meta,
    /// `@@ ... @@`
    Hunk,
    /// `+...`
    Added,
    /// `-...`
    Removed,
    /// Unchanged context (and anything unrecognised)
    Context,
}

impl DiffKind {
    /// Classify a raw patch line
    pub fn classify(line: &str) -> Self {
        const META_PREFIXES: &[&str] = &[
            "index ",
            "new file",
            "deleted file",
            "old mode",
            "new mode",
            "similarity index",
            "rename from",
            "rename to",
            "copy from",
            "copy to",
            "Binary files",
            "--- ",
            "+++ ",
        ];

        if line.starts_with("diff --git") {
            Self::FileHeader
        } else if META_PREFIXES.iter().any(|p| line.starts_with(p)) {
            Self::Meta
        } else if line.starts_with("@@") {
            Self::Hunk
        } else if line.starts_with('+') {
            Self::Added
        } else if line.starts_with('-') {
            Self::Removed
        } else {
            Self::Context
        }
    }
}

/// One line of a patch, kept verbatim
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Category
    pub kind: DiffKind,
    /// Raw text
    pub content: String,
}

impl DiffLine {
    /// Classify and wrap a raw patch line
    pub fn parse(line: &str) -> Self {
        Self {
            kind: DiffKind::classify(line),
            content: line.to_string(),
        }
    }
}

/// State of a pull request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrState {
    /// Open
    Open,
    /// Merged
    Merged,
    /// Closed without merging
    Closed,
}

/// A pull request found for a branch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Open, merged or closed
    pub state: PrState,
    /// PR number
    pub number: u64,
    /// Web URL
    pub url: String,
}

/// Result of a PR lookup for one branch.
///
/// A branch missing from the cache has not been requested yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrLookup {
    /// A PR exists
    Found(PullRequest),
    /// The lookup ran and found no PR
    NotFound,
    /// The lookup tool failed or is missing; nothing is known
    Unavailable,
}

/// Repository-wide facts shown in the header
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepoSummary {
    /// Top-level directory of the repository
    pub root: PathBuf,
    /// `origin` shortened to `host/org/repo`
    pub remote: Option<String>,
    /// Number of stash entries
    pub stash_count: usize,
    /// Relative time since the last fetch
    pub last_fetch: Option<String>,
    /// Mainline branch used for ahead/behind
    pub default_branch: String,
    /// Whether PR lookups can run at all
    pub pr_lookup_available: bool,
}

/// Everything one successful load produces
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepoSnapshot {
    /// All worktrees, primary first
    pub worktrees: Vec<WorktreeEntry>,
    /// Header facts
    pub summary: RepoSummary,
    /// False for a freshly initialised repository
    pub has_commits: bool,
}

/// Parameters of a worktree creation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewWorktree {
    /// Display name stored in metadata
    pub display_name: String,
    /// New branch to create
    pub branch: String,
    /// Where the working copy goes
    pub path: PathBuf,
    /// Optional description stored in metadata
    pub description: String,
}
