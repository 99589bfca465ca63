//! Git Output Parsing
//!
//! Pure functions over the text git prints. Kept apart from process
//! execution so every format quirk is unit tested.

use std::path::PathBuf;

use chrono::Duration;

use crate::types::{CommitSummary, DiffLine, FileChange, FileStatus, PrLookup, PullRequest};

/// One block of `git worktree list --porcelain`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawWorktree {
    /// `worktree <path>`
    pub path: PathBuf,
    /// `branch refs/heads/<name>`, absent for detached or bare entries
    pub branch: Option<String>,
    /// Branch name, `(detached)`, `(bare)` or the directory name
    pub label: String,
    /// First block is the primary working copy
    pub is_primary: bool,
}

/// Split porcelain output into worktree blocks
pub fn parse_worktree_list(output: &str) -> Vec<RawWorktree> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
        .into_iter()
        .enumerate()
        .map(|(index, lines)| {
            let mut path = PathBuf::new();
            let mut branch = None;
            let mut label = None;

            for line in lines {
                if let Some(p) = line.strip_prefix("worktree ") {
                    path = PathBuf::from(p);
                } else if let Some(b) = line.strip_prefix("branch ") {
                    let name = b.strip_prefix("refs/heads/").unwrap_or(b).to_string();
                    label = Some(name.clone());
                    branch = Some(name);
                } else if line == "detached" {
                    label = Some("(detached)".to_string());
                } else if line == "bare" {
                    label = Some("(bare)".to_string());
                }
            }

            let label = label.unwrap_or_else(|| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });

            RawWorktree {
                path,
                branch,
                label,
                is_primary: index == 0,
            }
        })
        .collect()
}

/// Count `(changed, untracked)` entries of `git status --porcelain`
pub fn parse_status_counts(output: &str) -> (usize, usize) {
    output
        .lines()
        .filter(|line| line.len() >= 2)
        .fold((0, 0), |(changed, untracked), line| {
            if line.starts_with("??") {
                (changed, untracked + 1)
            } else {
                (changed + 1, untracked)
            }
        })
}

/// Parse `git log --format=%h|%s|%cr`
pub fn parse_commit_log(output: &str) -> Vec<CommitSummary> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '|');
            let hash = parts.next()?;
            let subject = parts.next()?;
            let time = parts.next()?;
            Some(CommitSummary::new(hash, subject, time))
        })
        .collect()
}

/// Parse `git show --name-status --format=`
pub fn parse_name_status(output: &str) -> Vec<FileChange> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 2 {
                return None;
            }
            Some(FileChange {
                status: FileStatus::from_code(parts[0]),
                path: parts[parts.len() - 1].to_string(),
            })
        })
        .collect()
}

/// Split a patch into classified lines
pub fn parse_diff(output: &str) -> Vec<DiffLine> {
    let trimmed = output.trim_matches('\n');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(DiffLine::parse).collect()
}

/// Fields of `git show -s --format=%h%x00%s%x00%cr%x00%b`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitHeader {
    /// Abbreviated hash
    pub hash: String,
    /// Subject line
    pub subject: String,
    /// Relative time
    pub relative_time: String,
    /// Body with trailing newlines removed
    pub body: String,
}

/// Parse the NUL-separated commit header
pub fn parse_commit_header(output: &str) -> Option<CommitHeader> {
    let mut parts = output.splitn(4, '\0');
    let hash = parts.next()?.trim();
    if hash.is_empty() {
        return None;
    }
    Some(CommitHeader {
        hash: hash.to_string(),
        subject: parts.next().unwrap_or_default().to_string(),
        relative_time: parts.next().unwrap_or_default().to_string(),
        body: parts
            .next()
            .unwrap_or_default()
            .trim_end_matches(['\r', '\n'])
            .to_string(),
    })
}

/// Whether `branch` appears in `git branch --merged` output
pub fn parse_merged(output: &str, branch: &str) -> bool {
    output.lines().any(|line| {
        let name = line
            .trim()
            .trim_start_matches("* ")
            .trim_start_matches("+ ")
            .trim();
        name == branch
    })
}

/// `origin/main` -> `main`
pub fn parse_default_branch(symbolic_ref: &str) -> Option<String> {
    symbolic_ref
        .trim()
        .split_once('/')
        .map(|(_, name)| name.to_string())
        .filter(|name| !name.is_empty())
}

/// Shorten a remote URL to `host/org/repo`
pub fn shorten_remote(url: &str) -> String {
    let mut url = url.trim();
    for prefix in ["https://", "http://", "ssh://", "git@"] {
        url = url.strip_prefix(prefix).unwrap_or(url);
    }
    let url = url.replacen(':', "/", 1);
    url.strip_suffix(".git").unwrap_or(&url).to_string()
}

/// Non-empty line count (stash list, etc.)
pub fn count_lines(output: &str) -> usize {
    output.lines().filter(|l| !l.trim().is_empty()).count()
}

/// Coarse relative time: `just now`, `5m ago`, `3h ago`, `2d ago`
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::minutes(1) {
        "just now".to_string()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

/// Outcome of `gh pr view <branch> --json state,number,url`.
///
/// Only gh's "no pull requests found" message confirms absence. Any other
/// failure (not authenticated, offline, remote not on GitHub) or unreadable
/// JSON means the lookup could not answer.
pub fn parse_pr_view(success: bool, stdout: &[u8], stderr: &str) -> PrLookup {
    if !success {
        return if stderr.to_lowercase().contains("no pull requests found") {
            PrLookup::NotFound
        } else {
            PrLookup::Unavailable
        };
    }
    match serde_json::from_slice::<PullRequest>(stdout) {
        Ok(pr) => PrLookup::Found(pr),
        Err(_) => PrLookup::Unavailable,
    }
}
