//! State Machine Scenarios
//!
//! Drives [`App`] purely through events and checks the resulting modes and
//! effects. No terminal and no repository are involved.

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use worktree_core::dispatcher::Command;
use worktree_core::{
    App, CommitDetail, CommitSummary, Config, CreateField, DiffLine, Effect, Event, Key, Message,
    Mode, NewWorktree, PrLookup, PrState, PullRequest, RepoError, RepoSnapshot, RepoSummary,
    WorktreeEntry,
};

// =============================================================================
// Fixtures
// =============================================================================

fn entry(branch: &str, is_primary: bool, commits: usize) -> WorktreeEntry {
    WorktreeEntry {
        name: branch.to_string(),
        path: PathBuf::from(format!("/repo/.wt/{}", branch.replace('/', "-"))),
        branch: branch.to_string(),
        is_primary,
        updated: "1 hour ago".to_string(),
        commits: (0..commits)
            .map(|i| CommitSummary::new(format!("{branch}-{i}"), format!("commit {i}"), "now"))
            .collect(),
        ..Default::default()
    }
}

fn standard_entries() -> Vec<WorktreeEntry> {
    vec![
        entry("main", true, 3),
        entry("feat/a", false, 2),
        entry("feat/b", false, 1),
    ]
}

fn snapshot(worktrees: Vec<WorktreeEntry>, pr_lookup_available: bool) -> RepoSnapshot {
    RepoSnapshot {
        worktrees,
        summary: RepoSummary {
            root: PathBuf::from("/repo"),
            default_branch: "main".to_string(),
            pr_lookup_available,
            ..Default::default()
        },
        has_commits: true,
    }
}

fn loaded_app(worktrees: Vec<WorktreeEntry>, pr_lookup_available: bool) -> App {
    let mut app = App::new(Config::default());
    let effect = app.handle(
        Message::RepositoryChecked {
            detected: true,
            integrated: true,
        }
        .into(),
    );
    assert_eq!(effect, Some(Effect::Dispatch(Command::LoadWorktrees)));
    app.handle(Message::WorktreesLoaded(Ok(snapshot(worktrees, pr_lookup_available))).into());
    app
}

fn press(app: &mut App, key: Key) -> Option<Effect> {
    app.handle(Event::Key(key))
}

fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, Key::Char(ch));
    }
}

fn create_form(app: &App) -> &worktree_core::CreateForm {
    match app.mode() {
        Mode::Create(form) => form,
        other => panic!("expected create modal, got {other:?}"),
    }
}

fn overlay_scroll(app: &App) -> usize {
    match app.mode() {
        Mode::DetailOverlay(view) => view.scroll,
        other => panic!("expected overlay, got {other:?}"),
    }
}

fn found(number: u64) -> PrLookup {
    PrLookup::Found(PullRequest {
        state: PrState::Open,
        number,
        url: format!("https://example.com/pr/{number}"),
    })
}

// =============================================================================
// Startup
// =============================================================================

#[test]
fn test_startup_probes_repository() {
    let app = App::new(Config::default());
    assert_eq!(app.start(), Effect::Dispatch(Command::CheckRepository));
    assert!(!app.repo_checked());
}

#[test]
fn test_no_repository_then_init() {
    let mut app = App::new(Config::default());
    app.handle(
        Message::RepositoryChecked {
            detected: false,
            integrated: true,
        }
        .into(),
    );
    assert_eq!(app.mode(), &Mode::NoRepository);

    assert_eq!(press(&mut app, Key::Char('x')), None);
    assert_eq!(
        press(&mut app, Key::Char('i')),
        Some(Effect::Dispatch(Command::InitializeRepository))
    );

    let effect = app.handle(Message::RepositoryInitialized(Ok(())).into());
    assert_eq!(app.mode(), &Mode::List);
    assert_eq!(effect, Some(Effect::Dispatch(Command::LoadWorktrees)));
}

#[test]
fn test_no_repository_init_failure_shows_banner() {
    let mut app = App::new(Config::default());
    app.handle(
        Message::RepositoryChecked {
            detected: false,
            integrated: true,
        }
        .into(),
    );
    let effect = app.handle(
        Message::RepositoryInitialized(Err(RepoError::git("init", "permission denied"))).into(),
    );

    assert_eq!(effect, None);
    assert_eq!(app.mode(), &Mode::NoRepository);
    assert_eq!(app.error(), Some("permission denied"));
    assert_eq!(press(&mut app, Key::Char('q')), None);
    assert_eq!(press(&mut app, Key::Char('q')), Some(Effect::Quit));
}

#[test]
fn test_first_run_prompt_installs_and_loads() {
    let mut app = App::new(Config::default());
    app.handle(
        Message::RepositoryChecked {
            detected: true,
            integrated: false,
        }
        .into(),
    );
    assert_eq!(app.mode(), &Mode::FirstRunPrompt);

    assert_eq!(
        press(&mut app, Key::Char('y')),
        Some(Effect::Dispatch(Command::FinishFirstRun {
            install_shell: true
        }))
    );
    assert_eq!(app.mode(), &Mode::List);

    let effect = app.handle(
        Message::FirstRunFinished(Err(RepoError::UnsupportedShell("/bin/fish".into()))).into(),
    );
    assert_eq!(effect, Some(Effect::Dispatch(Command::LoadWorktrees)));
    assert_eq!(app.error(), Some("unsupported shell: /bin/fish"));
}

#[test]
fn test_first_run_prompt_declined() {
    let mut app = App::new(Config::default());
    app.handle(
        Message::RepositoryChecked {
            detected: true,
            integrated: false,
        }
        .into(),
    );
    assert_eq!(
        press(&mut app, Key::Esc),
        Some(Effect::Dispatch(Command::FinishFirstRun {
            install_shell: false
        }))
    );
}

#[test]
fn test_list_keys_wait_for_first_load() {
    let mut app = App::new(Config::default());
    app.handle(
        Message::RepositoryChecked {
            detected: true,
            integrated: false,
        }
        .into(),
    );
    press(&mut app, Key::Char('n'));
    assert_eq!(app.mode(), &Mode::List);
    assert!(!app.loaded());

    // Creating now would resolve the worktree path against an unknown root
    assert_eq!(press(&mut app, Key::Char('n')), None);
    press(&mut app, Key::Tab);
    type_text(&mut app, "X");
    assert_eq!(press(&mut app, Key::Enter), None);
    assert_eq!(app.mode(), &Mode::List);

    assert_eq!(
        press(&mut app, Key::Char('r')),
        Some(Effect::Dispatch(Command::LoadWorktrees))
    );

    app.handle(Message::WorktreesLoaded(Ok(snapshot(standard_entries(), false))).into());
    assert!(app.loaded());
    press(&mut app, Key::Char('n'));
    press(&mut app, Key::Tab);
    type_text(&mut app, "X");
    match press(&mut app, Key::Enter) {
        Some(Effect::Dispatch(Command::CreateWorktree(request))) => {
            assert!(request.path.is_absolute());
            assert_eq!(request.path, PathBuf::from("/repo/.wt/feat-x"));
        }
        other => panic!("expected a create command, got {other:?}"),
    }
}

// =============================================================================
// List navigation
// =============================================================================

#[test]
fn test_cursor_stays_in_bounds() {
    let mut app = loaded_app(standard_entries(), false);
    let keys = [
        Key::Up,
        Key::Char('k'),
        Key::Down,
        Key::Down,
        Key::Char('j'),
        Key::Down,
        Key::Down,
        Key::Down,
        Key::End,
        Key::Down,
        Key::Home,
        Key::Up,
        Key::End,
        Key::Char('k'),
    ];
    for key in keys {
        press(&mut app, key);
        assert!(app.cursor() <= app.worktrees().len());
    }
    assert_eq!(app.cursor(), 2);
}

#[test]
fn test_unrecognised_key_is_ignored() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::Down);
    assert_eq!(press(&mut app, Key::Char('z')), None);
    assert_eq!(press(&mut app, Key::Left), None);
    assert_eq!(app.mode(), &Mode::List);
    assert_eq!(app.cursor(), 1);
}

#[test]
fn test_change_directory_only_on_entry() {
    let mut app = loaded_app(standard_entries(), false);
    assert_eq!(press(&mut app, Key::Char('c')), None);

    press(&mut app, Key::Down);
    press(&mut app, Key::Down);
    assert_eq!(
        press(&mut app, Key::Char('c')),
        Some(Effect::ChangeDirectory(PathBuf::from("/repo/.wt/feat-a")))
    );
}

#[test]
fn test_reload_and_quit_keys() {
    let mut app = loaded_app(standard_entries(), false);
    assert_eq!(
        press(&mut app, Key::Char('r')),
        Some(Effect::Dispatch(Command::LoadWorktrees))
    );
    assert_eq!(press(&mut app, Key::Char('q')), Some(Effect::Quit));
    assert_eq!(press(&mut app, Key::Interrupt), Some(Effect::Quit));
}

// =============================================================================
// PR lookups
// =============================================================================

#[test]
fn test_stale_pr_result_only_fills_its_branch() {
    let mut app = loaded_app(standard_entries(), true);

    // main is primary: no lookup
    assert_eq!(press(&mut app, Key::Down), None);
    assert_eq!(
        press(&mut app, Key::Down),
        Some(Effect::Dispatch(Command::FetchPrStatus {
            branch: "feat/a".to_string()
        }))
    );
    assert_eq!(
        press(&mut app, Key::Down),
        Some(Effect::Dispatch(Command::FetchPrStatus {
            branch: "feat/b".to_string()
        }))
    );

    app.handle(
        Message::PrFetched {
            branch: "feat/a".to_string(),
            lookup: found(7),
        }
        .into(),
    );

    assert_eq!(app.selected().map(|wt| wt.branch.as_str()), Some("feat/b"));
    assert_eq!(app.pr_lookup("feat/a"), Some(&found(7)));
    assert_eq!(app.pr_lookup("feat/b"), None);
    assert!(app.pr_pending("feat/b"));

    // cached: moving back does not refetch
    assert_eq!(press(&mut app, Key::Up), None);
}

#[test]
fn test_pr_lookup_not_repeated_while_in_flight() {
    let mut app = loaded_app(standard_entries(), true);
    press(&mut app, Key::Down);
    assert!(press(&mut app, Key::Down).is_some());
    press(&mut app, Key::Up);
    assert_eq!(press(&mut app, Key::Down), None);

    app.handle(
        Message::PrFetched {
            branch: "feat/a".to_string(),
            lookup: PrLookup::Unavailable,
        }
        .into(),
    );
    assert!(!app.pr_pending("feat/a"));
    assert_eq!(app.pr_lookup("feat/a"), Some(&PrLookup::Unavailable));
}

#[test]
fn test_no_pr_lookup_without_tool() {
    let mut app = loaded_app(standard_entries(), false);
    for _ in 0..3 {
        assert_eq!(press(&mut app, Key::Down), None);
    }
}

#[test]
fn test_load_requests_pr_for_selected_entry() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::Down);
    press(&mut app, Key::Down);

    let effect =
        app.handle(Message::WorktreesLoaded(Ok(snapshot(standard_entries(), true))).into());
    assert_eq!(
        effect,
        Some(Effect::Dispatch(Command::FetchPrStatus {
            branch: "feat/a".to_string()
        }))
    );
}

// =============================================================================
// Create
// =============================================================================

#[test]
fn test_create_scenario() {
    let mut app = loaded_app(vec![entry("main", true, 1)], false);

    assert_eq!(app.cursor(), 0);
    assert_eq!(press(&mut app, Key::Enter), None);
    assert_eq!(create_form(&app).branch_type(app.branch_types()), "feat");

    press(&mut app, Key::Tab);
    assert_eq!(create_form(&app).field, CreateField::Name);
    type_text(&mut app, "Auth Refresh");
    assert_eq!(create_form(&app).branch, "feat/auth-refresh");

    let effect = press(&mut app, Key::Enter);
    assert_eq!(
        effect,
        Some(Effect::Dispatch(Command::CreateWorktree(NewWorktree {
            display_name: "Auth Refresh".to_string(),
            branch: "feat/auth-refresh".to_string(),
            path: PathBuf::from("/repo/.wt/feat-auth-refresh"),
            description: String::new(),
        })))
    );

    // in flight: further submissions ignored
    assert_eq!(press(&mut app, Key::Enter), None);
    assert!(create_form(&app).submitting);

    let effect = app.handle(Message::WorktreeCreated(Ok(())).into());
    assert_eq!(app.mode(), &Mode::List);
    assert_eq!(effect, Some(Effect::Dispatch(Command::LoadWorktrees)));
    assert_eq!(app.error(), None);
}

#[test]
fn test_create_requires_display_name() {
    let mut app = loaded_app(vec![entry("main", true, 1)], false);
    press(&mut app, Key::Char('n'));
    press(&mut app, Key::Tab);
    type_text(&mut app, "   ");

    assert_eq!(press(&mut app, Key::Enter), None);
    assert!(!create_form(&app).submitting);
}

#[test]
fn test_create_fields_wrap() {
    let mut app = loaded_app(vec![entry("main", true, 1)], false);
    press(&mut app, Key::Char('n'));

    press(&mut app, Key::BackTab);
    assert_eq!(create_form(&app).field, CreateField::Description);
    press(&mut app, Key::Down);
    assert_eq!(create_form(&app).field, CreateField::Type);
    press(&mut app, Key::Up);
    assert_eq!(create_form(&app).field, CreateField::Description);

    type_text(&mut app, "jk q");
    assert_eq!(create_form(&app).description, "jk q");
}

#[test]
fn test_type_picker_commit_and_cancel() {
    let mut app = loaded_app(vec![entry("main", true, 1)], false);
    press(&mut app, Key::Char('n'));

    press(&mut app, Key::Enter);
    assert_eq!(create_form(&app).picker, Some(0));
    press(&mut app, Key::Char('j'));
    press(&mut app, Key::Down);
    press(&mut app, Key::Char('k'));
    assert_eq!(create_form(&app).picker, Some(1));
    press(&mut app, Key::Enter);
    assert_eq!(create_form(&app).picker, None);
    assert_eq!(create_form(&app).branch, "fix");

    press(&mut app, Key::Enter);
    press(&mut app, Key::Down);
    press(&mut app, Key::Esc);
    assert_eq!(create_form(&app).picker, None);
    assert_eq!(create_form(&app).branch_type(app.branch_types()), "fix");
    assert!(matches!(app.mode(), Mode::Create(_)));
}

#[test]
fn test_edited_branch_survives_type_change() {
    let mut app = loaded_app(vec![entry("main", true, 1)], false);
    press(&mut app, Key::Char('n'));
    press(&mut app, Key::Tab);
    type_text(&mut app, "Login");
    press(&mut app, Key::Tab);
    type_text(&mut app, " x");
    assert_eq!(create_form(&app).branch, "feat/login-x");

    press(&mut app, Key::BackTab);
    press(&mut app, Key::BackTab);
    press(&mut app, Key::Enter);
    press(&mut app, Key::Down);
    press(&mut app, Key::Enter);
    assert_eq!(create_form(&app).branch, "feat/login-x");
}

#[test]
fn test_create_without_commits_reports_banner() {
    let mut app = loaded_app(vec![entry("main", true, 0)], false);
    press(&mut app, Key::Char('n'));

    let effect = app.handle(Message::WorktreeCreated(Err(RepoError::NoCommits)).into());
    assert_eq!(effect, Some(Effect::Dispatch(Command::LoadWorktrees)));
    assert_eq!(app.mode(), &Mode::List);
    assert!(app.error().is_some_and(|e| e.contains("no commits")));

    // banner swallows even ctrl-c
    assert_eq!(press(&mut app, Key::Interrupt), None);
    assert_eq!(app.error(), None);
    assert_eq!(press(&mut app, Key::Interrupt), Some(Effect::Quit));
}

#[test]
fn test_esc_discards_create_draft() {
    let mut app = loaded_app(vec![entry("main", true, 1)], false);
    press(&mut app, Key::Char('n'));
    press(&mut app, Key::Tab);
    type_text(&mut app, "Draft");
    press(&mut app, Key::Esc);
    assert_eq!(app.mode(), &Mode::List);

    press(&mut app, Key::Char('n'));
    assert!(create_form(&app).display_name.is_empty());
}

// =============================================================================
// Rename / Delete
// =============================================================================

#[test]
fn test_rename_unchanged_or_empty_is_noop() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::Down);
    press(&mut app, Key::Down);

    press(&mut app, Key::Char('e'));
    assert!(matches!(app.mode(), Mode::Rename(form) if form.value == "feat/a"));
    assert_eq!(press(&mut app, Key::Enter), None);
    assert_eq!(app.mode(), &Mode::List);

    press(&mut app, Key::Char('e'));
    for _ in 0.."feat/a".len() {
        press(&mut app, Key::Backspace);
    }
    assert_eq!(press(&mut app, Key::Enter), None);
    assert_eq!(app.mode(), &Mode::List);
}

#[test]
fn test_rename_issues_command() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::Down);
    press(&mut app, Key::Down);
    press(&mut app, Key::Char('e'));
    type_text(&mut app, "2");

    assert_eq!(
        press(&mut app, Key::Enter),
        Some(Effect::Dispatch(Command::RenameBranch {
            from: "feat/a".to_string(),
            to: "feat/a2".to_string(),
        }))
    );

    let effect = app.handle(Message::BranchRenamed(Ok(())).into());
    assert_eq!(app.mode(), &Mode::List);
    assert_eq!(effect, Some(Effect::Dispatch(Command::LoadWorktrees)));
}

#[test]
fn test_delete_never_offered_on_primary() {
    let mut app = loaded_app(standard_entries(), false);
    assert_eq!(press(&mut app, Key::Char('d')), None);
    assert_eq!(app.mode(), &Mode::List);

    press(&mut app, Key::Down);
    assert_eq!(press(&mut app, Key::Char('d')), None);
    assert_eq!(app.mode(), &Mode::List);
}

#[test]
fn test_delete_confirm_and_cursor_clamp() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::End);
    assert_eq!(app.cursor(), 3);

    press(&mut app, Key::Char('d'));
    assert_eq!(app.mode(), &Mode::DeleteConfirm { submitting: false });
    assert_eq!(
        press(&mut app, Key::Char('y')),
        Some(Effect::Dispatch(Command::DeleteWorktree {
            branch: "feat/b".to_string(),
            path: PathBuf::from("/repo/.wt/feat-b"),
        }))
    );
    assert_eq!(press(&mut app, Key::Char('y')), None);

    let effect = app.handle(Message::WorktreeDeleted(Ok(())).into());
    assert_eq!(effect, Some(Effect::Dispatch(Command::LoadWorktrees)));
    assert_eq!(app.mode(), &Mode::List);
    assert_eq!(app.cursor(), 2);
}

#[test]
fn test_delete_cancel_and_failure() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::End);
    press(&mut app, Key::Char('d'));
    press(&mut app, Key::Char('n'));
    assert_eq!(app.mode(), &Mode::List);

    press(&mut app, Key::Char('d'));
    press(&mut app, Key::Char('y'));
    app.handle(
        Message::WorktreeDeleted(Err(RepoError::git("worktree remove", "is dirty"))).into(),
    );
    assert_eq!(app.cursor(), 3);
    assert_eq!(app.error(), Some("is dirty"));
}

// =============================================================================
// Detail and overlay
// =============================================================================

fn big_detail(hash: &str, diff_lines: usize) -> CommitDetail {
    CommitDetail {
        hash: hash.to_string(),
        subject: "big change".to_string(),
        relative_time: "now".to_string(),
        diff: (0..diff_lines)
            .map(|i| DiffLine::parse(&format!("+line {i}")))
            .collect(),
        loaded: true,
        ..Default::default()
    }
}

/// Viewport whose overlay shows exactly 20 buffer lines
fn open_overlay(app: &mut App) -> String {
    app.handle(Event::Resize {
        width: 100,
        height: 33,
    });
    assert_eq!(app.overlay_geometry().visible_lines, 20);

    press(app, Key::Down);
    press(app, Key::Down);
    assert_eq!(press(app, Key::Enter), None);
    assert_eq!(app.mode(), &Mode::DetailFocused { commit: 0 });

    press(app, Key::Down);
    let effect = press(app, Key::Enter);
    let Some(Effect::Dispatch(Command::FetchCommitDetail { path, hash })) = effect else {
        panic!("expected commit fetch, got {effect:?}");
    };
    assert_eq!(path, PathBuf::from("/repo/.wt/feat-a"));
    hash
}

#[test]
fn test_detail_focus_moves_within_commits() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::Down);
    press(&mut app, Key::Down);
    press(&mut app, Key::Enter);

    for _ in 0..5 {
        press(&mut app, Key::Down);
    }
    assert_eq!(app.mode(), &Mode::DetailFocused { commit: 1 });
    press(&mut app, Key::Esc);
    assert_eq!(app.mode(), &Mode::List);
}

#[test]
fn test_overlay_scroll_clamped() {
    let mut app = loaded_app(standard_entries(), false);
    let hash = open_overlay(&mut app);
    assert_eq!(hash, "feat/a-1");

    // header, blank, subject, blank, rule, blank + 44 diff lines = 50
    app.handle(
        Message::CommitDetailLoaded {
            hash: hash.clone(),
            result: Ok(big_detail(&hash, 44)),
        }
        .into(),
    );

    press(&mut app, Key::End);
    assert_eq!(overlay_scroll(&app), 30);
    for _ in 0..100 {
        press(&mut app, Key::Down);
    }
    assert_eq!(overlay_scroll(&app), 30);
    press(&mut app, Key::PageDown);
    assert_eq!(overlay_scroll(&app), 30);

    press(&mut app, Key::PageUp);
    assert_eq!(overlay_scroll(&app), 10);
    for _ in 0..20 {
        press(&mut app, Key::Up);
    }
    assert_eq!(overlay_scroll(&app), 0);

    press(&mut app, Key::End);
    app.handle(Event::Resize {
        width: 100,
        height: 60,
    });
    // 48 tall overlay shows 42 lines
    assert_eq!(overlay_scroll(&app), 8);

    press(&mut app, Key::Esc);
    assert_eq!(app.mode(), &Mode::DetailFocused { commit: 1 });
}

#[test]
fn test_stale_commit_detail_ignored() {
    let mut app = loaded_app(standard_entries(), false);
    let hash = open_overlay(&mut app);

    app.handle(
        Message::CommitDetailLoaded {
            hash: "somethingelse".to_string(),
            result: Ok(big_detail("somethingelse", 3)),
        }
        .into(),
    );
    match app.mode() {
        Mode::DetailOverlay(view) => {
            assert_eq!(view.hash, hash);
            assert!(!view.detail.loaded);
        }
        other => panic!("unexpected mode {other:?}"),
    }

    app.handle(
        Message::CommitDetailLoaded {
            hash: hash.clone(),
            result: Ok(big_detail(&hash, 3)),
        }
        .into(),
    );
    assert!(matches!(app.mode(), Mode::DetailOverlay(view) if view.detail.loaded));
}

#[test]
fn test_commit_detail_failure_keeps_overlay() {
    let mut app = loaded_app(standard_entries(), false);
    let hash = open_overlay(&mut app);

    app.handle(
        Message::CommitDetailLoaded {
            hash,
            result: Err(RepoError::git("show", "bad object")),
        }
        .into(),
    );
    assert_eq!(app.error(), Some("bad object"));
    assert!(matches!(app.mode(), Mode::DetailOverlay(_)));
}

// =============================================================================
// Loads
// =============================================================================

#[test]
fn test_load_keeps_open_modal() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::Char('n'));
    press(&mut app, Key::Tab);
    type_text(&mut app, "Keep me");

    app.handle(Message::WorktreesLoaded(Ok(snapshot(standard_entries(), false))).into());
    assert_eq!(create_form(&app).display_name, "Keep me");
}

#[test]
fn test_load_failure_changes_nothing_else() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::End);

    let effect = app.handle(
        Message::WorktreesLoaded(Err(RepoError::git("worktree list", "corrupt"))).into(),
    );
    assert_eq!(effect, None);
    assert_eq!(app.worktrees().len(), 3);
    assert_eq!(app.cursor(), 3);
    assert_eq!(app.error(), Some("corrupt"));
}

#[test]
fn test_load_clamps_cursor_and_commit() {
    let mut app = loaded_app(standard_entries(), false);
    press(&mut app, Key::Down);
    press(&mut app, Key::Enter);
    press(&mut app, Key::Down);
    press(&mut app, Key::Down);
    assert_eq!(app.mode(), &Mode::DetailFocused { commit: 2 });

    app.handle(Message::WorktreesLoaded(Ok(snapshot(vec![entry("main", true, 1)], false))).into());
    assert_eq!(app.mode(), &Mode::DetailFocused { commit: 0 });

    press(&mut app, Key::Esc);
    press(&mut app, Key::End);
    app.handle(Message::WorktreesLoaded(Ok(snapshot(Vec::new(), false))).into());
    assert_eq!(app.cursor(), 0);
    assert!(app.selected().is_none());
}

#[test]
fn test_create_modal_inert_without_commits() {
    let mut app = App::new(Config::default());
    app.handle(
        Message::RepositoryChecked {
            detected: true,
            integrated: true,
        }
        .into(),
    );
    let mut empty = snapshot(vec![entry("main", true, 0)], false);
    empty.has_commits = false;
    app.handle(Message::WorktreesLoaded(Ok(empty)).into());
    assert!(!app.has_commits());

    press(&mut app, Key::Enter);
    press(&mut app, Key::Tab);
    type_text(&mut app, "Name");
    assert_eq!(press(&mut app, Key::Enter), None);
    assert!(create_form(&app).display_name.is_empty());

    press(&mut app, Key::Esc);
    assert_eq!(app.mode(), &Mode::List);
}
