//! Application State Machine
//!
//! [`App`] owns every piece of UI state and is the only thing that mutates
//! it. Keys, resizes and command completions all arrive as [`Event`]s;
//! [`App::handle`] applies one event and returns at most one [`Effect`] for
//! the surface to carry out.
//!
//! # Design Philosophy
//!
//! - **Modes are data**: each modal owns its form state inside [`Mode`], so
//!   leaving a mode discards its draft.
//! - **No hidden I/O**: anything slow is requested as a
//!   [`Command`] and answered later by a [`Message`].
//! - **Cursor is the source of truth**: mutations target the entry under the
//!   cursor at the moment of submission.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::dispatcher::Command;
use crate::error::RepoError;
use crate::events::{Event, Key};
use crate::messages::Message;
use crate::pager::{self, OverlayGeometry};
use crate::text::slugify;
use crate::types::{
    CommitDetail, NewWorktree, PrLookup, RepoSnapshot, RepoSummary, WorktreeEntry,
};

/// Terminal size assumed until the first resize event
pub const DEFAULT_VIEWPORT: (u16, u16) = (80, 24);

// =============================================================================
// Effects
// =============================================================================

/// What the surface must do after an event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Run a command through the dispatcher
    Dispatch(Command),
    /// Restore the terminal and exit
    Quit,
    /// Record `path` for the shell wrapper, then exit
    ChangeDirectory(PathBuf),
}

// =============================================================================
// Forms
// =============================================================================

/// Focusable fields of the create modal, in tab order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CreateField {
    /// Branch type (opens the picker)
    #[default]
    Type,
    /// Display name
    Name,
    /// Branch name
    Branch,
    /// Description
    Description,
}

impl CreateField {
    /// Next field, wrapping
    pub fn next(self) -> Self {
        match self {
            Self::Type => Self::Name,
            Self::Name => Self::Branch,
            Self::Branch => Self::Description,
            Self::Description => Self::Type,
        }
    }

    /// Previous field, wrapping
    pub fn prev(self) -> Self {
        match self {
            Self::Type => Self::Description,
            Self::Name => Self::Type,
            Self::Branch => Self::Name,
            Self::Description => Self::Branch,
        }
    }
}

/// Draft of a new worktree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateForm {
    /// Index into the configured branch types
    pub type_index: usize,
    /// Highlighted type while the picker is open
    pub picker: Option<usize>,
    /// Display name
    pub display_name: String,
    /// Branch name (derived until edited)
    pub branch: String,
    /// Description
    pub description: String,
    /// Focused field
    pub field: CreateField,
    /// Set once the user types in the branch field
    pub branch_edited: bool,
    /// Creation dispatched, waiting for the result
    pub submitting: bool,
}

impl CreateForm {
    /// Empty form with the first type selected
    pub fn new(branch_types: &[String]) -> Self {
        let mut form = Self {
            type_index: 0,
            picker: None,
            display_name: String::new(),
            branch: String::new(),
            description: String::new(),
            field: CreateField::Type,
            branch_edited: false,
            submitting: false,
        };
        form.recompute_branch(branch_types);
        form
    }

    /// Selected branch type
    pub fn branch_type<'a>(&self, branch_types: &'a [String]) -> &'a str {
        branch_types
            .get(self.type_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// `type/slug(name)` unless the user has taken over the branch field
    fn recompute_branch(&mut self, branch_types: &[String]) {
        if self.branch_edited {
            return;
        }
        let prefix = self.branch_type(branch_types);
        let slug = slugify(&self.display_name);
        self.branch = match (prefix.is_empty(), slug.is_empty()) {
            (_, true) => prefix.to_string(),
            (true, false) => slug,
            (false, false) => format!("{prefix}/{slug}"),
        };
    }

    fn insert(&mut self, ch: char, branch_types: &[String]) {
        match self.field {
            CreateField::Type => {}
            CreateField::Name => {
                self.display_name.push(ch);
                self.recompute_branch(branch_types);
            }
            CreateField::Branch => {
                self.branch.push(if ch.is_whitespace() { '-' } else { ch });
                self.branch_edited = true;
            }
            CreateField::Description => self.description.push(ch),
        }
    }

    fn backspace(&mut self, branch_types: &[String]) {
        match self.field {
            CreateField::Type => {}
            CreateField::Name => {
                self.display_name.pop();
                self.recompute_branch(branch_types);
            }
            CreateField::Branch => {
                self.branch.pop();
                self.branch_edited = true;
            }
            CreateField::Description => {
                self.description.pop();
            }
        }
    }
}

/// Draft of a branch rename
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameForm {
    /// New branch name being typed
    pub value: String,
    /// Rename dispatched, waiting for the result
    pub submitting: bool,
}

/// Commit shown in the overlay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitView {
    /// Index in the selected worktree's commit list
    pub commit: usize,
    /// Hash the detail was requested for
    pub hash: String,
    /// Placeholder until the fetch lands
    pub detail: CommitDetail,
    /// First visible buffer line
    pub scroll: usize,
}

// =============================================================================
// Modes
// =============================================================================

/// Interaction mode; exactly one is active
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Working directory is not a repository
    NoRepository,
    /// Asking whether to install shell integration
    FirstRunPrompt,
    /// Browsing the worktree list
    List,
    /// Create modal (and its type picker)
    Create(CreateForm),
    /// Rename modal
    Rename(RenameForm),
    /// Delete confirmation
    DeleteConfirm {
        /// Deletion dispatched, waiting for the result
        submitting: bool,
    },
    /// Focus in the right pane's commit list
    DetailFocused {
        /// Highlighted commit
        commit: usize,
    },
    /// Full-screen commit pager
    DetailOverlay(CommitView),
}

// =============================================================================
// App
// =============================================================================

/// All UI state
#[derive(Debug)]
pub struct App {
    config: Config,
    mode: Mode,
    repo_checked: bool,
    /// Set by the first successful load; list keys wait for it
    loaded: bool,
    worktrees: Vec<WorktreeEntry>,
    summary: RepoSummary,
    has_commits: bool,
    /// 0 is the "create new" row, `i` is `worktrees[i - 1]`
    cursor: usize,
    pr_cache: HashMap<String, PrLookup>,
    pr_in_flight: HashSet<String>,
    error: Option<String>,
    viewport: (u16, u16),
}

impl App {
    /// Fresh state; call [`App::start`] for the first command
    pub fn new(config: Config) -> Self {
        Self {
            config,
            mode: Mode::List,
            repo_checked: false,
            loaded: false,
            worktrees: Vec::new(),
            summary: RepoSummary::default(),
            has_commits: true,
            cursor: 0,
            pr_cache: HashMap::new(),
            pr_in_flight: HashSet::new(),
            error: None,
            viewport: DEFAULT_VIEWPORT,
        }
    }

    /// Initial effect: probe the working directory
    pub fn start(&self) -> Effect {
        Effect::Dispatch(Command::CheckRepository)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Active mode
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Whether the startup probe has answered
    pub fn repo_checked(&self) -> bool {
        self.repo_checked
    }

    /// Whether a worktree list has arrived
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// Loaded worktrees, primary first
    pub fn worktrees(&self) -> &[WorktreeEntry] {
        &self.worktrees
    }

    /// Header facts
    pub fn summary(&self) -> &RepoSummary {
        &self.summary
    }

    /// False for a repository without commits
    pub fn has_commits(&self) -> bool {
        self.has_commits
    }

    /// Cursor row (0 is "create new")
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entry under the cursor
    pub fn selected(&self) -> Option<&WorktreeEntry> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.worktrees.get(i))
    }

    /// Cached PR lookup for `branch`; `None` means not requested yet
    pub fn pr_lookup(&self, branch: &str) -> Option<&PrLookup> {
        self.pr_cache.get(branch)
    }

    /// Whether a PR lookup for `branch` is running
    pub fn pr_pending(&self, branch: &str) -> bool {
        self.pr_in_flight.contains(branch)
    }

    /// Banner text, if an error is showing
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last known terminal size
    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// Configured branch types
    pub fn branch_types(&self) -> &[String] {
        &self.config.branch_types
    }

    /// Overlay geometry for the current viewport
    pub fn overlay_geometry(&self) -> OverlayGeometry {
        OverlayGeometry::new(self.viewport.0, self.viewport.1)
    }

    // -------------------------------------------------------------------------
    // Event handling
    // -------------------------------------------------------------------------

    /// Apply one event
    pub fn handle(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize { width, height } => {
                self.viewport = (width, height);
                self.reclamp_overlay();
                None
            }
            Event::Completed(message) => self.apply_message(message),
        }
    }

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        if let Some(error) = self.error.take() {
            debug!(%error, "Banner dismissed");
            return None;
        }
        if key == Key::Interrupt {
            return Some(Effect::Quit);
        }

        match self.mode {
            Mode::NoRepository => self.handle_no_repository(key),
            Mode::FirstRunPrompt => self.handle_first_run(key),
            Mode::List => self.handle_list(key),
            Mode::Create(_) => self.handle_create(key),
            Mode::Rename(_) => self.handle_rename(key),
            Mode::DeleteConfirm { .. } => self.handle_delete(key),
            Mode::DetailFocused { .. } => self.handle_detail(key),
            Mode::DetailOverlay(_) => self.handle_overlay(key),
        }
    }

    fn handle_no_repository(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('i') => Some(Effect::Dispatch(Command::InitializeRepository)),
            Key::Char('q') => Some(Effect::Quit),
            _ => None,
        }
    }

    fn handle_first_run(&mut self, key: Key) -> Option<Effect> {
        let install_shell = match key {
            Key::Char('y') => true,
            Key::Char('n') | Key::Char('q') | Key::Esc => false,
            _ => return None,
        };
        self.mode = Mode::List;
        Some(Effect::Dispatch(Command::FinishFirstRun { install_shell }))
    }

    fn handle_list(&mut self, key: Key) -> Option<Effect> {
        // Until the first snapshot the repository root and commit state are unknown
        if !self.loaded {
            return match key {
                Key::Char('r') => Some(Effect::Dispatch(Command::LoadWorktrees)),
                Key::Char('q') => Some(Effect::Quit),
                _ => None,
            };
        }

        match key {
            k if k.is_up() => {
                self.cursor = self.cursor.saturating_sub(1);
                self.request_pr_status()
            }
            k if k.is_down() => {
                if self.cursor < self.worktrees.len() {
                    self.cursor += 1;
                }
                self.request_pr_status()
            }
            Key::Home => {
                self.cursor = 0;
                None
            }
            Key::End => {
                self.cursor = self.worktrees.len();
                self.request_pr_status()
            }
            Key::Enter => {
                if self.cursor == 0 {
                    self.open_create();
                } else if self.selected().is_some() {
                    self.mode = Mode::DetailFocused { commit: 0 };
                }
                None
            }
            Key::Char('n') => {
                self.open_create();
                None
            }
            Key::Char('d') => {
                if self.selected().is_some_and(|wt| !wt.is_primary) {
                    self.mode = Mode::DeleteConfirm { submitting: false };
                }
                None
            }
            Key::Char('e') => {
                if let Some(wt) = self.selected() {
                    self.mode = Mode::Rename(RenameForm {
                        value: wt.branch.clone(),
                        submitting: false,
                    });
                }
                None
            }
            Key::Char('c') => self
                .selected()
                .map(|wt| Effect::ChangeDirectory(wt.path.clone())),
            Key::Char('r') => Some(Effect::Dispatch(Command::LoadWorktrees)),
            Key::Char('q') => Some(Effect::Quit),
            _ => None,
        }
    }

    fn open_create(&mut self) {
        if self.summary.root.as_os_str().is_empty() {
            return;
        }
        self.mode = Mode::Create(CreateForm::new(&self.config.branch_types));
    }

    fn handle_create(&mut self, key: Key) -> Option<Effect> {
        // Without commits the modal only explains itself
        if !self.has_commits {
            if key == Key::Esc {
                self.mode = Mode::List;
            }
            return None;
        }

        let types = &self.config.branch_types;
        let Mode::Create(form) = &mut self.mode else {
            return None;
        };
        if form.submitting {
            return None;
        }

        if let Some(highlight) = form.picker {
            form.picker = match key {
                k if k.is_up() => Some(highlight.saturating_sub(1)),
                k if k.is_down() => Some((highlight + 1).min(types.len().saturating_sub(1))),
                Key::Enter => {
                    form.type_index = highlight;
                    form.recompute_branch(types);
                    None
                }
                Key::Esc => None,
                _ => Some(highlight),
            };
            return None;
        }

        match key {
            Key::Esc => self.mode = Mode::List,
            Key::Tab | Key::Down => form.field = form.field.next(),
            Key::BackTab | Key::Up => form.field = form.field.prev(),
            Key::Enter if form.field == CreateField::Type => form.picker = Some(form.type_index),
            Key::Enter => {
                if form.display_name.trim().is_empty() || form.branch.is_empty() {
                    return None;
                }
                form.submitting = true;
                let request = NewWorktree {
                    display_name: form.display_name.trim().to_string(),
                    branch: form.branch.clone(),
                    path: worktree_path(&self.summary.root, &self.config.worktree_dir, &form.branch),
                    description: form.description.trim().to_string(),
                };
                return Some(Effect::Dispatch(Command::CreateWorktree(request)));
            }
            Key::Backspace => form.backspace(types),
            Key::Char(ch) => form.insert(ch, types),
            _ => {}
        }
        None
    }

    fn handle_rename(&mut self, key: Key) -> Option<Effect> {
        let current = self.selected().map(|wt| wt.branch.clone());
        let Mode::Rename(form) = &mut self.mode else {
            return None;
        };
        if form.submitting {
            return None;
        }

        match key {
            Key::Esc => self.mode = Mode::List,
            Key::Enter => {
                let to = form.value.trim().to_string();
                match current {
                    Some(from) if !to.is_empty() && to != from => {
                        form.submitting = true;
                        return Some(Effect::Dispatch(Command::RenameBranch { from, to }));
                    }
                    _ => self.mode = Mode::List,
                }
            }
            Key::Backspace => {
                form.value.pop();
            }
            Key::Char(ch) => form.value.push(ch),
            _ => {}
        }
        None
    }

    fn handle_delete(&mut self, key: Key) -> Option<Effect> {
        let target = self
            .selected()
            .filter(|wt| !wt.is_primary)
            .map(|wt| (wt.branch.clone(), wt.path.clone()));
        let Mode::DeleteConfirm { submitting } = &mut self.mode else {
            return None;
        };
        if *submitting {
            return None;
        }

        match key {
            Key::Char('y') => match target {
                Some((branch, path)) => {
                    *submitting = true;
                    return Some(Effect::Dispatch(Command::DeleteWorktree { branch, path }));
                }
                None => self.mode = Mode::List,
            },
            Key::Char('n') | Key::Esc => self.mode = Mode::List,
            _ => {}
        }
        None
    }

    fn handle_detail(&mut self, key: Key) -> Option<Effect> {
        let count = self.selected().map_or(0, |wt| wt.commits.len());
        let Mode::DetailFocused { commit } = &mut self.mode else {
            return None;
        };

        match key {
            Key::Esc => self.mode = Mode::List,
            Key::Char('q') => return Some(Effect::Quit),
            k if k.is_up() => *commit = commit.saturating_sub(1),
            k if k.is_down() => {
                if *commit + 1 < count {
                    *commit += 1;
                }
            }
            Key::Enter => {
                let index = *commit;
                return self.open_overlay(index);
            }
            _ => {}
        }
        None
    }

    fn open_overlay(&mut self, index: usize) -> Option<Effect> {
        let wt = self.selected()?;
        let summary = wt.commits.get(index)?;
        let hash = summary.hash.clone();
        let path = wt.path.clone();
        let detail = CommitDetail::placeholder(summary);

        self.mode = Mode::DetailOverlay(CommitView {
            commit: index,
            hash: hash.clone(),
            detail,
            scroll: 0,
        });
        Some(Effect::Dispatch(Command::FetchCommitDetail { path, hash }))
    }

    fn handle_overlay(&mut self, key: Key) -> Option<Effect> {
        let geometry = self.overlay_geometry();
        let Mode::DetailOverlay(view) = &mut self.mode else {
            return None;
        };

        let page = geometry.visible_lines as i64;
        let delta = match key {
            Key::Esc => {
                let commit = view.commit;
                self.mode = Mode::DetailFocused { commit };
                return None;
            }
            k if k.is_up() => -1,
            k if k.is_down() => 1,
            Key::PageUp => -page,
            Key::PageDown | Key::Char(' ') => page,
            Key::Home => i64::MIN / 2,
            Key::End => i64::MAX / 2,
            _ => return None,
        };

        let total = pager::build_lines(&view.detail, geometry.content_width).len();
        view.scroll = pager::clamp_scroll(
            view.scroll as i64 + delta,
            total,
            geometry.visible_lines,
        );
        None
    }

    fn reclamp_overlay(&mut self) {
        let geometry = self.overlay_geometry();
        if let Mode::DetailOverlay(view) = &mut self.mode {
            let total = pager::build_lines(&view.detail, geometry.content_width).len();
            view.scroll = view
                .scroll
                .min(pager::max_scroll(total, geometry.visible_lines));
        }
    }

    /// Start a PR lookup for the selected branch if nothing is known yet
    fn request_pr_status(&mut self) -> Option<Effect> {
        if !self.summary.pr_lookup_available {
            return None;
        }
        let branch = match self.selected() {
            Some(wt) if !wt.is_primary && !wt.branch.starts_with('(') => wt.branch.clone(),
            _ => return None,
        };
        if self.pr_cache.contains_key(&branch) || self.pr_in_flight.contains(&branch) {
            return None;
        }
        self.pr_in_flight.insert(branch.clone());
        Some(Effect::Dispatch(Command::FetchPrStatus { branch }))
    }

    // -------------------------------------------------------------------------
    // Completions
    // -------------------------------------------------------------------------

    fn apply_message(&mut self, message: Message) -> Option<Effect> {
        debug!(message = message.kind(), "Applying completion");
        match message {
            Message::RepositoryChecked {
                detected,
                integrated,
            } => {
                self.repo_checked = true;
                if !detected {
                    self.mode = Mode::NoRepository;
                    None
                } else if !integrated {
                    self.mode = Mode::FirstRunPrompt;
                    None
                } else {
                    self.mode = Mode::List;
                    Some(Effect::Dispatch(Command::LoadWorktrees))
                }
            }

            Message::WorktreesLoaded(Ok(snapshot)) => {
                self.apply_snapshot(snapshot);
                if self.mode == Mode::List {
                    self.request_pr_status()
                } else {
                    None
                }
            }
            Message::WorktreesLoaded(Err(e)) => {
                self.show_error(&e);
                None
            }

            Message::CommitDetailLoaded { hash, result } => {
                let requested =
                    matches!(&self.mode, Mode::DetailOverlay(view) if view.hash == hash);
                if !requested {
                    debug!(%hash, "Discarding stale commit detail");
                    return None;
                }
                match result {
                    Ok(detail) => {
                        if let Mode::DetailOverlay(view) = &mut self.mode {
                            view.detail = detail;
                        }
                    }
                    Err(e) => self.show_error(&e),
                }
                None
            }

            Message::PrFetched { branch, lookup } => {
                self.pr_in_flight.remove(&branch);
                self.pr_cache.insert(branch, lookup);
                None
            }

            Message::RepositoryInitialized(result) => match result {
                Ok(()) => {
                    self.mode = Mode::List;
                    Some(Effect::Dispatch(Command::LoadWorktrees))
                }
                Err(e) => {
                    self.show_error(&e);
                    None
                }
            },

            Message::FirstRunFinished(result) => {
                if let Err(e) = result {
                    self.show_error(&e);
                }
                Some(Effect::Dispatch(Command::LoadWorktrees))
            }

            Message::WorktreeCreated(result) | Message::BranchRenamed(result) => {
                self.mode = Mode::List;
                if let Err(e) = result {
                    self.show_error(&e);
                }
                Some(Effect::Dispatch(Command::LoadWorktrees))
            }

            Message::WorktreeDeleted(result) => {
                self.mode = Mode::List;
                match result {
                    Ok(()) => {
                        let last = self.worktrees.len().saturating_sub(1);
                        self.cursor = self.cursor.min(last);
                    }
                    Err(e) => self.show_error(&e),
                }
                Some(Effect::Dispatch(Command::LoadWorktrees))
            }
        }
    }

    /// Replace loaded data and re-validate everything that indexes into it
    fn apply_snapshot(&mut self, snapshot: RepoSnapshot) {
        self.worktrees = snapshot.worktrees;
        self.summary = snapshot.summary;
        self.has_commits = snapshot.has_commits;
        self.loaded = true;
        self.cursor = self.cursor.min(self.worktrees.len());

        let selected = self.selected();
        let commits = selected.map(|wt| wt.commits.len());
        let deletable = selected.is_some_and(|wt| !wt.is_primary);

        match &mut self.mode {
            Mode::DetailFocused { commit } => match commits {
                Some(n) => *commit = (*commit).min(n.saturating_sub(1)),
                None => self.mode = Mode::List,
            },
            Mode::DetailOverlay(view) => match commits {
                Some(n) => view.commit = view.commit.min(n.saturating_sub(1)),
                None => self.mode = Mode::List,
            },
            Mode::DeleteConfirm { submitting: false } if !deletable => self.mode = Mode::List,
            Mode::Rename(form) if !form.submitting && commits.is_none() => self.mode = Mode::List,
            _ => {}
        }
    }

    fn show_error(&mut self, error: &RepoError) {
        warn!(%error, "Operation failed");
        self.error = Some(error.to_string());
    }
}

/// `<root>/<worktree_dir>/<branch with '/' replaced by '-'>`
pub fn worktree_path(root: &Path, worktree_dir: &str, branch: &str) -> PathBuf {
    root.join(worktree_dir).join(branch.replace('/', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn types() -> Vec<String> {
        ["feat", "fix"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_field_cycle() {
        let mut field = CreateField::Type;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, CreateField::Type);
        assert_eq!(CreateField::Type.prev(), CreateField::Description);
    }

    #[test]
    fn test_new_form_branch_is_type() {
        let form = CreateForm::new(&types());
        assert_eq!(form.branch, "feat");
        assert_eq!(form.field, CreateField::Type);
    }

    #[test]
    fn test_branch_follows_name_until_edited() {
        let types = types();
        let mut form = CreateForm::new(&types);
        form.field = CreateField::Name;
        for ch in "Auth Refresh".chars() {
            form.insert(ch, &types);
        }
        assert_eq!(form.branch, "feat/auth-refresh");

        form.field = CreateField::Branch;
        form.backspace(&types);
        form.insert(' ', &types);
        assert_eq!(form.branch, "feat/auth-refres-");
        assert!(form.branch_edited);

        form.field = CreateField::Name;
        form.insert('!', &types);
        assert_eq!(form.branch, "feat/auth-refres-");
    }

    #[test]
    fn test_worktree_path_flattens_branch() {
        assert_eq!(
            worktree_path(Path::new("/repo"), ".wt", "feat/auth-refresh"),
            PathBuf::from("/repo/.wt/feat-auth-refresh")
        );
    }
}
