//! Integration Test: Blocking I/O and Sleep Prohibition
//!
//! **Policy**: Production code never sleeps and never blocks the runtime on
//! a child process. External commands run through `tokio::process`; the
//! UI waits on events, not timers.
//!
//! **Backend policy**: repository code reads and writes files with
//! `tokio::fs`. Config loading runs before the event loop and is exempt.

use architectural_enforcement::find_violations;

const PRODUCTION_DIRS: &[&str] = &["core/src", "tui/src"];

const FORBIDDEN_EVERYWHERE: &[&str] = &[
    "std::process::Command",
    "std::thread::sleep",
    "thread::sleep(",
    "tokio::time::sleep",
    "reqwest::blocking",
];

fn report(violations: &[String], what: &str) {
    if violations.is_empty() {
        return;
    }
    eprintln!("\n❌ {what}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }
    panic!("\nFound {} violation(s). Fix these before merging!", violations.len());
}

#[test]
fn test_no_sleeps_or_blocking_spawns() {
    let violations: Vec<String> = PRODUCTION_DIRS
        .iter()
        .flat_map(|dir| find_violations(dir, FORBIDDEN_EVERYWHERE))
        .collect();
    report(&violations, "Blocking calls found in production code");
}

#[test]
fn test_backend_uses_async_fs() {
    let violations = find_violations("core/src/backend", &["std::fs", "File::open", "File::create"]);
    report(&violations, "Blocking file I/O found in the repository backend");
}
