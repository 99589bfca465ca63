//! Integration Test: Headless Core
//!
//! **Policy**: `worktree-core` holds the state machine and git plumbing and
//! must build and test without a terminal. Terminal crates belong to
//! `worktree-tui` only.

use std::fs;

use architectural_enforcement::{find_violations, workspace_root};

const TERMINAL_CRATES: &[&str] = &["ratatui", "crossterm"];

#[test]
fn test_core_manifest_has_no_terminal_crates() {
    let manifest = fs::read_to_string(workspace_root().join("core").join("Cargo.toml"))
        .expect("core/Cargo.toml should exist");

    let offending: Vec<&str> = manifest
        .lines()
        .map(|l| l.split('#').next().unwrap_or(l).trim())
        .filter(|l| TERMINAL_CRATES.iter().any(|c| l.starts_with(c)))
        .collect();

    assert!(
        offending.is_empty(),
        "core depends on terminal crates: {offending:?}"
    );
}

#[test]
fn test_core_sources_do_not_import_terminal_crates() {
    let violations = find_violations("core/src", &["use ratatui", "use crossterm", "ratatui::", "crossterm::"]);

    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!(
            "\nFound {} terminal import(s) in worktree-core.",
            violations.len()
        );
    }
}
