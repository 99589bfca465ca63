//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The core crate stays headless (no terminal crates)
//! - No sleeps or blocking process spawns in production code
//! - Backend file access goes through `tokio::fs`
//!
//! These tests are designed to catch violations early in the development cycle.
//! The helpers below walk a crate's `src/` and yield production lines only:
//! comments are dropped and scanning stops at the first `#[cfg(test)]`.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Workspace root, resolved from this package's manifest directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// Every `.rs` file below `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect()
}

/// `(line number, code)` for the production part of `path`
pub fn production_lines(path: &Path) -> Vec<(usize, String)> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        let code = line.split("//").next().unwrap_or(line).trim();
        if !code.is_empty() {
            lines.push((idx + 1, code.to_string()));
        }
    }
    lines
}

/// Production lines under `dir` containing any of `patterns`, formatted for a report
pub fn find_violations(dir: &str, patterns: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in rust_files(dir) {
        for (line_number, code) in production_lines(&file) {
            if let Some(pattern) = patterns.iter().find(|p| code.contains(*p)) {
                violations.push(format!(
                    "{}:{} - `{}`: {}",
                    file.display(),
                    line_number,
                    pattern,
                    code
                ));
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_core() {
        assert!(workspace_root().join("core").join("Cargo.toml").exists());
    }

    #[test]
    fn test_production_lines_stop_at_test_module() {
        let dir = std::env::temp_dir().join("arch-enforcement-selftest");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("sample.rs");
        fs::write(
            &file,
            "use a; // trailing\n// only a comment\nfn f() {}\n#[cfg(test)]\nmod tests { use b; }\n",
        )
        .unwrap();

        let lines = production_lines(&file);
        assert_eq!(
            lines,
            vec![(1, "use a;".to_string()), (3, "fn f() {}".to_string())]
        );
    }
}
