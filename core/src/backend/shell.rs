//! Shell Integration
//!
//! A child process cannot change its parent shell's directory. Instead the
//! `wt` shell function runs the binary, then `cd`s to whatever path the
//! binary left in the cd file. This module owns that file, the wrapper
//! snippet and the "prompt already answered" marker.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::config::APP_DIR;
use crate::error::RepoError;

/// Line that marks the wrapper inside an rc file
const SNIPPET_MARKER: &str = "# worktree-tui shell integration";

/// Files and environment the integration touches
#[derive(Clone, Debug)]
pub struct ShellIntegration {
    /// `<config dir>/worktree-tui/integrated`
    marker: Option<PathBuf>,
    /// Where the cd target is written
    cd_file: PathBuf,
    /// `$SHELL`
    shell: Option<String>,
    /// `$HOME`
    home: Option<PathBuf>,
}

impl ShellIntegration {
    /// Integration for the current user
    pub fn from_env(cd_file: PathBuf) -> Self {
        Self {
            marker: dirs::config_dir().map(|dir| dir.join(APP_DIR).join("integrated")),
            cd_file,
            shell: std::env::var("SHELL").ok(),
            home: dirs::home_dir(),
        }
    }

    /// Integration with every location spelled out
    pub fn new(
        marker: Option<PathBuf>,
        cd_file: PathBuf,
        shell: Option<String>,
        home: Option<PathBuf>,
    ) -> Self {
        Self {
            marker,
            cd_file,
            shell,
            home,
        }
    }

    /// Whether the marker file exists
    pub async fn is_marker_set(&self) -> bool {
        match &self.marker {
            Some(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            None => false,
        }
    }

    /// Create the marker file
    pub async fn set_marker(&self) -> Result<(), RepoError> {
        let path = self
            .marker
            .as_ref()
            .ok_or(RepoError::MissingDirectory("config"))?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| RepoError::File {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(path, "1")
            .await
            .map_err(|source| RepoError::File {
                path: path.clone(),
                source,
            })
    }

    /// Append the `wt` wrapper to the shell's rc file, once
    pub async fn install(&self) -> Result<PathBuf, RepoError> {
        let home = self.home.as_ref().ok_or(RepoError::MissingDirectory("home"))?;
        let rc = rc_file_for(self.shell.as_deref().unwrap_or_default(), home)?;

        let existing = tokio::fs::read_to_string(&rc).await.unwrap_or_default();
        if existing.contains(SNIPPET_MARKER) {
            return Ok(rc);
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&rc)
            .await
            .map_err(|source| RepoError::File {
                path: rc.clone(),
                source,
            })?;
        file.write_all(shell_snippet(&self.cd_file).as_bytes())
            .await
            .map_err(|source| RepoError::File {
                path: rc.clone(),
                source,
            })?;
        file.flush().await?;
        Ok(rc)
    }

    /// Write `target` to the cd file
    pub async fn record_target(&self, target: &Path) -> Result<(), RepoError> {
        tokio::fs::write(&self.cd_file, target.to_string_lossy().as_bytes())
            .await
            .map_err(|source| RepoError::File {
                path: self.cd_file.clone(),
                source,
            })
    }
}

/// rc file for a `$SHELL` value
pub fn rc_file_for(shell: &str, home: &Path) -> Result<PathBuf, RepoError> {
    let name = Path::new(shell)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.as_str() {
        "zsh" => Ok(home.join(".zshrc")),
        "bash" => Ok(home.join(".bashrc")),
        _ => Err(RepoError::UnsupportedShell(shell.to_string())),
    }
}

/// The `wt` function appended to rc files
pub fn shell_snippet(cd_file: &Path) -> String {
    let cd_file = cd_file.display();
    format!(
        "\n{SNIPPET_MARKER}\n\
         wt() {{\n\
         \x20 worktree-tui \"$@\"\n\
         \x20 if [ -f '{cd_file}' ]; then\n\
         \x20   cd \"$(cat '{cd_file}')\"\n\
         \x20   rm -f '{cd_file}'\n\
         \x20 fi\n\
         }}\n"
    )
}
