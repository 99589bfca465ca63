//! Worktree Metadata
//!
//! Display names and descriptions are not something git knows about, so
//! they live in a small JSON file inside the repository's common git
//! directory, keyed by branch:
//!
//! ```json
//! {
//!   "feat/auth-refresh": {
//!     "name": "Auth Refresh",
//!     "description": "token rotation",
//!     "createdFrom": "a1b2c3d"
//!   }
//! }
//! ```
//!
//! A missing or unreadable file is an empty store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::APP_DIR;
use crate::error::RepoError;

/// Metadata recorded for one branch
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorktreeMeta {
    /// Display name typed in the create modal
    pub name: String,
    /// Optional free text
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Short SHA of HEAD at creation time
    #[serde(skip_serializing_if = "String::is_empty")]
    pub created_from: String,
}

/// Branch name -> metadata
pub type MetaMap = BTreeMap<String, WorktreeMeta>;

/// JSON-backed metadata file
#[derive(Clone, Debug)]
pub struct MetaStore {
    path: PathBuf,
}

impl MetaStore {
    /// Store under `<git common dir>/worktree-tui/meta.json`
    pub fn new(git_common_dir: &Path) -> Self {
        Self {
            path: git_common_dir.join(APP_DIR).join("meta.json"),
        }
    }

    /// Location of the JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries
    pub async fn load(&self) -> MetaMap {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(_) => return MetaMap::new(),
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable worktree metadata");
                MetaMap::new()
            }
        }
    }

    /// Replace the file contents
    pub async fn save(&self, map: &MetaMap) -> Result<(), RepoError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| RepoError::File {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        let json = serde_json::to_string_pretty(map)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| RepoError::File {
                path: self.path.clone(),
                source,
            })
    }

    /// Insert or replace the entry for `branch`
    pub async fn upsert(&self, branch: &str, meta: WorktreeMeta) -> Result<(), RepoError> {
        let mut map = self.load().await;
        map.insert(branch.to_string(), meta);
        self.save(&map).await
    }

    /// Forget `branch`
    pub async fn remove(&self, branch: &str) -> Result<(), RepoError> {
        let mut map = self.load().await;
        if map.remove(branch).is_some() {
            self.save(&map).await?;
        }
        Ok(())
    }

    /// Move the entry for `from` to `to`
    pub async fn rename(&self, from: &str, to: &str) -> Result<(), RepoError> {
        let mut map = self.load().await;
        if let Some(meta) = map.remove(from) {
            map.insert(to.to_string(), meta);
            self.save(&map).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta(name: &str) -> WorktreeMeta {
        WorktreeMeta {
            name: name.to_string(),
            description: "desc".to_string(),
            created_from: "abc1234".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetaStore::new(dir.path());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetaStore::new(dir.path());

        store.upsert("feat/a", meta("A")).await.unwrap();
        store.upsert("feat/b", meta("B")).await.unwrap();

        let map = store.load().await;
        assert_eq!(map.len(), 2);
        assert_eq!(map["feat/a"].name, "A");
        assert!(store.path().ends_with("worktree-tui/meta.json"));
    }

    #[tokio::test]
    async fn test_rename_moves_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetaStore::new(dir.path());
        store.upsert("feat/old", meta("Thing")).await.unwrap();

        store.rename("feat/old", "feat/new").await.unwrap();

        let map = store.load().await;
        assert!(!map.contains_key("feat/old"));
        assert_eq!(map["feat/new"], meta("Thing"));
    }

    #[tokio::test]
    async fn test_remove_unknown_branch_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetaStore::new(dir.path());
        store.remove("nope").await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MetaStore::new(dir.path());
        tokio::fs::create_dir_all(store.path().parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(store.path(), "{not json").await.unwrap();

        assert!(store.load().await.is_empty());
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let json = serde_json::to_string(&meta("A")).unwrap();
        assert!(json.contains("\"createdFrom\":\"abc1234\""));

        let parsed: WorktreeMeta = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!(parsed.name, "X");
        assert!(parsed.description.is_empty());
    }
}
