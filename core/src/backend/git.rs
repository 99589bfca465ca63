//! Git Repository
//!
//! [`Repository`] implementation that shells out to `git` (and optionally
//! `gh`) with `tokio::process`. Every invocation runs with stdin closed and
//! its working directory set explicitly; parsing lives in
//! [`parse`](super::parse).

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::process::Command;
use tracing::{debug, warn};

use super::meta::{MetaMap, MetaStore, WorktreeMeta};
use super::parse::{self, RawWorktree};
use super::shell::ShellIntegration;
use super::traits::Repository;
use crate::config::Config;
use crate::error::RepoError;
use crate::types::{CommitDetail, NewWorktree, PrLookup, RepoSummary, WorktreeEntry};

/// Run git in `dir`, returning raw stdout
async fn git_raw(dir: &Path, args: &[&str]) -> Result<String, RepoError> {
    debug!(dir = %dir.display(), args = ?args, "git");
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .await?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let command = args.join(" ");
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stderr = if stderr.is_empty() {
            format!("git {command} failed ({})", output.status)
        } else {
            stderr
        };
        Err(RepoError::git(command, stderr))
    }
}

/// Run git in `dir`, returning trimmed stdout
async fn git(dir: &Path, args: &[&str]) -> Result<String, RepoError> {
    Ok(git_raw(dir, args).await?.trim().to_string())
}

/// Git-backed repository rooted at a working directory
#[derive(Clone, Debug)]
pub struct GitRepository {
    dir: PathBuf,
    commit_limit: usize,
    pr_lookup: bool,
    shell: ShellIntegration,
}

impl GitRepository {
    /// Repository for `dir` using the user's shell environment
    pub fn new(dir: impl Into<PathBuf>, config: &Config) -> Self {
        Self::with_shell(dir, config, ShellIntegration::from_env(config.cd_file.clone()))
    }

    /// Repository with an explicit shell integration
    pub fn with_shell(dir: impl Into<PathBuf>, config: &Config, shell: ShellIntegration) -> Self {
        Self {
            dir: dir.into(),
            commit_limit: config.commit_limit,
            pr_lookup: config.pr_lookup,
            shell,
        }
    }

    /// Working directory commands run in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn root(&self) -> Result<PathBuf, RepoError> {
        Ok(PathBuf::from(
            git(&self.dir, &["rev-parse", "--show-toplevel"]).await?,
        ))
    }

    async fn common_dir(&self) -> Result<PathBuf, RepoError> {
        let out = git(&self.dir, &["rev-parse", "--git-common-dir"]).await?;
        let path = PathBuf::from(out);
        Ok(if path.is_absolute() {
            path
        } else {
            self.dir.join(path)
        })
    }

    async fn meta_store(&self) -> Option<MetaStore> {
        match self.common_dir().await {
            Ok(dir) => Some(MetaStore::new(&dir)),
            Err(e) => {
                warn!(error = %e, "No git common dir; worktree metadata disabled");
                None
            }
        }
    }

    /// origin/HEAD, else `main`, else `master`
    async fn default_branch(&self) -> String {
        if let Ok(out) = git(
            &self.dir,
            &["symbolic-ref", "--short", "refs/remotes/origin/HEAD"],
        )
        .await
        {
            if let Some(name) = parse::parse_default_branch(&out) {
                return name;
            }
        }
        if git(&self.dir, &["rev-parse", "--verify", "--quiet", "refs/heads/main"])
            .await
            .is_ok()
        {
            return "main".to_string();
        }
        "master".to_string()
    }

    async fn branch_status(&self, branch: &str, default_branch: &str) -> (u32, u32, bool) {
        if branch == default_branch {
            return (0, 0, false);
        }
        let ahead_range = format!("{default_branch}..{branch}");
        let behind_range = format!("{branch}..{default_branch}");
        let ahead_args = ["rev-list", "--count", ahead_range.as_str()];
        let behind_args = ["rev-list", "--count", behind_range.as_str()];
        let merged_args = ["branch", "--merged", default_branch];
        let (ahead, behind, merged) = tokio::join!(
            git(&self.dir, &ahead_args),
            git(&self.dir, &behind_args),
            git(&self.dir, &merged_args),
        );
        (
            ahead.ok().and_then(|s| s.parse().ok()).unwrap_or(0),
            behind.ok().and_then(|s| s.parse().ok()).unwrap_or(0),
            merged
                .map(|out| parse::parse_merged(&out, branch))
                .unwrap_or(false),
        )
    }

    async fn enrich(&self, raw: RawWorktree, meta: &MetaMap, default_branch: &str) -> WorktreeEntry {
        let mut entry = WorktreeEntry {
            name: raw.label.clone(),
            path: raw.path.clone(),
            branch: raw.branch.clone().unwrap_or_else(|| raw.label.clone()),
            is_primary: raw.is_primary,
            ..Default::default()
        };

        if let Some(m) = raw.branch.as_ref().and_then(|b| meta.get(b)) {
            if !m.name.is_empty() {
                entry.name = m.name.clone();
            }
            entry.description = Some(m.description.clone()).filter(|s| !s.is_empty());
            entry.created_from = Some(m.created_from.clone()).filter(|s| !s.is_empty());
        }

        if let (Some(branch), false) = (raw.branch.as_deref(), raw.is_primary) {
            let (ahead, behind, merged) = self.branch_status(branch, default_branch).await;
            entry.ahead = ahead;
            entry.behind = behind;
            entry.merged = merged;
        }

        let limit = format!("-{}", self.commit_limit);
        let path = raw.path.as_path();
        let log_args = ["log", limit.as_str(), "--format=%h|%s|%cr"];
        let (head, status, updated, log) = tokio::join!(
            git(path, &["rev-parse", "--short", "HEAD"]),
            git_raw(path, &["status", "--porcelain"]),
            git(path, &["log", "-1", "--format=%cr"]),
            git(path, &log_args),
        );

        entry.head = head.ok().filter(|h| !h.is_empty());
        if let Ok(status) = status {
            let (modified, untracked) = parse::parse_status_counts(&status);
            entry.modified = modified;
            entry.untracked = untracked;
        }
        entry.updated = updated
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "never".to_string());
        entry.commits = log
            .map(|out| parse::parse_commit_log(&out))
            .unwrap_or_default();
        entry
    }

    async fn last_fetch(&self) -> Option<String> {
        let fetch_head = self.common_dir().await.ok()?.join("FETCH_HEAD");
        let modified = tokio::fs::metadata(&fetch_head).await.ok()?.modified().ok()?;
        let modified: DateTime<Utc> = modified.into();
        Some(parse::format_elapsed(Utc::now() - modified))
    }

    async fn gh_available(&self) -> bool {
        Command::new("gh")
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl Repository for GitRepository {
    fn name(&self) -> &str {
        "git"
    }

    async fn repository_detected(&self) -> bool {
        git(&self.dir, &["rev-parse", "--git-dir"]).await.is_ok()
    }

    async fn has_any_commit(&self) -> bool {
        git(&self.dir, &["rev-parse", "--verify", "--quiet", "HEAD"])
            .await
            .is_ok()
    }

    async fn list_worktrees(&self) -> Result<Vec<WorktreeEntry>, RepoError> {
        let out = git(&self.dir, &["worktree", "list", "--porcelain"]).await?;
        let meta = match self.meta_store().await {
            Some(store) => store.load().await,
            None => MetaMap::new(),
        };
        let default_branch = self.default_branch().await;

        let raws = parse::parse_worktree_list(&out);
        debug!(count = raws.len(), "Enriching worktrees");
        let entries = join_all(
            raws.into_iter()
                .map(|raw| self.enrich(raw, &meta, &default_branch)),
        )
        .await;
        Ok(entries)
    }

    async fn repository_summary(&self) -> Result<RepoSummary, RepoError> {
        let root = self.root().await?;
        let (remote, stash, last_fetch, default_branch, gh) = tokio::join!(
            git(&self.dir, &["remote", "get-url", "origin"]),
            git(&self.dir, &["stash", "list"]),
            self.last_fetch(),
            self.default_branch(),
            async { self.pr_lookup && self.gh_available().await },
        );
        Ok(RepoSummary {
            root,
            remote: remote
                .ok()
                .filter(|u| !u.is_empty())
                .map(|u| parse::shorten_remote(&u)),
            stash_count: stash.map(|s| parse::count_lines(&s)).unwrap_or(0),
            last_fetch,
            default_branch,
            pr_lookup_available: gh,
        })
    }

    async fn fetch_commit_detail(
        &self,
        worktree: &Path,
        hash: &str,
    ) -> Result<CommitDetail, RepoError> {
        let header_args = ["show", "-s", "--format=%h%x00%s%x00%cr%x00%b", hash];
        let files_args = ["show", "--name-status", "--format=", hash];
        let diff_args = ["show", "--patch", "--no-color", "--format=", hash];
        let (header, files, diff) = tokio::join!(
            git_raw(worktree, &header_args),
            git(worktree, &files_args),
            git_raw(worktree, &diff_args),
        );

        let header = parse::parse_commit_header(&header?)
            .ok_or_else(|| RepoError::git(format!("show {hash}"), "unexpected commit format"))?;

        Ok(CommitDetail {
            hash: header.hash,
            subject: header.subject,
            body: header.body,
            relative_time: header.relative_time,
            files: parse::parse_name_status(&files?),
            diff: parse::parse_diff(&diff?),
            loaded: true,
        })
    }

    async fn fetch_pr_status(&self, branch: &str) -> PrLookup {
        if !self.pr_lookup {
            return PrLookup::Unavailable;
        }
        let output = Command::new("gh")
            .args(["pr", "view", branch, "--json", "state,number,url"])
            .current_dir(&self.dir)
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Err(e) => {
                debug!(branch, error = %e, "gh could not be started");
                PrLookup::Unavailable
            }
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                let lookup = parse::parse_pr_view(out.status.success(), &out.stdout, &stderr);
                if lookup == PrLookup::Unavailable {
                    warn!(branch, stderr = %stderr.trim(), "PR lookup failed");
                }
                lookup
            }
        }
    }

    async fn create_worktree(&self, request: &NewWorktree) -> Result<(), RepoError> {
        let path = request.path.to_string_lossy();
        git(
            &self.dir,
            &["worktree", "add", "-b", &request.branch, &path, "HEAD"],
        )
        .await?;

        let created_from = git(&self.dir, &["rev-parse", "--short", "HEAD"])
            .await
            .unwrap_or_default();
        if let Some(store) = self.meta_store().await {
            let meta = WorktreeMeta {
                name: request.display_name.clone(),
                description: request.description.clone(),
                created_from,
            };
            if let Err(e) = store.upsert(&request.branch, meta).await {
                warn!(branch = %request.branch, error = %e, "Failed to save worktree metadata");
            }
        }
        Ok(())
    }

    async fn delete_worktree(&self, branch: &str, path: &Path) -> Result<(), RepoError> {
        let path = path.to_string_lossy();
        git(&self.dir, &["worktree", "remove", "--force", &path]).await?;

        if let Some(store) = self.meta_store().await {
            if let Err(e) = store.remove(branch).await {
                warn!(branch, error = %e, "Failed to drop worktree metadata");
            }
        }
        Ok(())
    }

    async fn rename_branch(&self, from: &str, to: &str) -> Result<(), RepoError> {
        git(&self.dir, &["branch", "-m", from, to]).await?;

        if let Some(store) = self.meta_store().await {
            if let Err(e) = store.rename(from, to).await {
                warn!(from, to, error = %e, "Failed to move worktree metadata");
            }
        }
        Ok(())
    }

    async fn initialize_repository(&self) -> Result<(), RepoError> {
        git(&self.dir, &["init"]).await.map(|_| ())
    }

    async fn record_change_directory_target(&self, path: &Path) -> Result<(), RepoError> {
        self.shell.record_target(path).await
    }

    async fn is_first_run_marker_set(&self) -> bool {
        self.shell.is_marker_set().await
    }

    async fn set_first_run_marker(&self) -> Result<(), RepoError> {
        self.shell.set_marker().await
    }

    async fn install_shell_integration(&self) -> Result<(), RepoError> {
        let rc = self.shell.install().await?;
        debug!(rc = %rc.display(), "Shell integration installed");
        Ok(())
    }
}
