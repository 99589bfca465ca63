//! Modal Boxes
//!
//! Every modal is a list of lines inside a rounded accent box, centered on
//! an empty canvas. Form modals take a share of the screen width so typing
//! does not make them grow; prompts are sized to their content.

use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use worktree_core::{App, CreateField, CreateForm, RenameForm};

use crate::theme::Theme;

use super::{centered, content_width, header, hint_line, modal_block};

/// Share of the screen width taken by form modals
const FORM_WIDTH_PERCENT: u32 = 50;

/// Narrowest form modal, borders included
const FORM_MIN_WIDTH: u16 = 44;

/// Border plus padding on each axis
const CHROME_WIDTH: u16 = 6;
const CHROME_HEIGHT: u16 = 4;

fn show(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>, min_width: u16, theme: &Theme) {
    let width = (content_width(&lines) + CHROME_WIDTH).max(min_width);
    let height = lines.len() as u16 + CHROME_HEIGHT;
    let rect = centered(area, width, height);
    frame.render_widget(Paragraph::new(lines).block(modal_block(theme)), rect);
}

fn form_width(area: Rect) -> u16 {
    ((u32::from(area.width) * FORM_WIDTH_PERCENT / 100) as u16).max(FORM_MIN_WIDTH)
}

/// Text field; the focused one gets a block cursor
fn input(value: &str, active: bool, theme: &Theme) -> Line<'static> {
    if active {
        Line::from(vec![
            Span::raw(value.to_string()),
            Span::styled("█", theme.accent()),
        ])
    } else {
        Line::styled(format!("{value} "), theme.dim())
    }
}

fn label(text: &'static str, active: bool, theme: &Theme) -> Line<'static> {
    if active {
        Line::styled(text, theme.key())
    } else {
        Line::styled(text, theme.dim())
    }
}

// ============================================================================
// Startup Screens
// ============================================================================

pub(super) fn render_no_repository(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let header_height = header::render_header(frame, area, app, theme);
    let body = Rect {
        y: area.y + header_height,
        height: area.height.saturating_sub(header_height),
        ..area
    };

    let lines = vec![
        Line::styled("No git repository found.", theme.dim()),
        Line::default(),
        Line::styled("Would you like to initialise one?", theme.dim()),
        Line::default(),
        hint_line(&["i  init", "q  quit"], theme),
    ];
    let rect = centered(body, body.width, lines.len() as u16);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), rect);
}

pub(super) fn render_shell_setup(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let header_height = header::render_header(frame, area, app, theme);
    let body = Rect {
        y: area.y + header_height,
        height: area.height.saturating_sub(header_height),
        ..area
    };

    let lines = vec![
        Line::styled("⚡ Add shell integration for cd-on-exit?", theme.key()),
        Line::default(),
        Line::styled("This adds a wt() function to your shell rc file.", theme.dim()),
        Line::styled("Invoke wt instead of worktree-tui to use it.", theme.dim()),
        Line::default(),
        hint_line(&["y  add it", "n  skip"], theme),
    ];
    show(frame, body, lines, 0, theme);
}

// ============================================================================
// Create
// ============================================================================

pub(super) fn render_no_commits(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::styled("New Worktree", theme.bold()),
        Line::default(),
        Line::styled("✗  Cannot create worktree", theme.danger()),
        Line::default(),
        Line::styled("No commits on main yet.", theme.dim()),
        Line::styled("Make an initial commit first.", theme.dim()),
        Line::default(),
        hint_line(&["esc  close"], theme),
    ];
    show(frame, area, lines, 0, theme);
}

pub(super) fn render_type_picker(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    highlight: usize,
    theme: &Theme,
) {
    let mut lines = vec![Line::styled("Select Type", theme.bold()), Line::default()];
    lines.extend(app.branch_types().iter().enumerate().map(|(i, kind)| {
        if i == highlight {
            Line::from(vec![
                Span::styled("▌ ", theme.accent()),
                Span::styled(kind.clone(), theme.bold()),
            ])
        } else {
            Line::from(vec![Span::raw("  "), Span::styled(kind.clone(), theme.dim())])
        }
    }));
    lines.push(Line::default());
    lines.push(hint_line(
        &["↑↓  navigate", "enter  select", "esc  close"],
        theme,
    ));
    show(frame, area, lines, 0, theme);
}

pub(super) fn render_create(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    form: &CreateForm,
    theme: &Theme,
) {
    let on = |field: CreateField| form.field == field;
    let kind = form.branch_type(app.branch_types()).to_string();

    let type_line = if on(CreateField::Type) {
        Line::from(vec![
            Span::styled(kind, theme.bold()),
            Span::raw("  "),
            Span::styled("↵ change", theme.dim()),
        ])
    } else {
        Line::styled(kind, theme.dim())
    };

    let first_hint = if on(CreateField::Type) {
        "enter  change type"
    } else if form.submitting {
        "creating…"
    } else {
        "enter  create"
    };

    let lines = vec![
        Line::styled("New Worktree", theme.bold()),
        Line::default(),
        label("Type", on(CreateField::Type), theme),
        type_line,
        Line::default(),
        label("Name", on(CreateField::Name), theme),
        input(&form.display_name, on(CreateField::Name), theme),
        Line::default(),
        label("Branch", on(CreateField::Branch), theme),
        input(&form.branch, on(CreateField::Branch), theme),
        Line::default(),
        label("Description", on(CreateField::Description), theme),
        input(&form.description, on(CreateField::Description), theme),
        Line::default(),
        hint_line(&[first_hint, "tab/↑↓  navigate", "esc  cancel"], theme),
    ];
    show(frame, area, lines, form_width(area), theme);
}

// ============================================================================
// Rename / Delete
// ============================================================================

pub(super) fn render_rename(frame: &mut Frame, area: Rect, form: &RenameForm, theme: &Theme) {
    let lines = vec![
        Line::styled("Edit Worktree", theme.bold()),
        Line::default(),
        Line::styled("Branch name", theme.dim()),
        input(&form.value, !form.submitting, theme),
        Line::default(),
        hint_line(&["enter  save", "esc  cancel"], theme),
    ];
    show(frame, area, lines, form_width(area), theme);
}

pub(super) fn render_delete(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let name = app.selected().map(|wt| wt.name.as_str()).unwrap_or_default();
    let lines = vec![
        Line::styled(format!("Delete {name}?"), theme.danger()),
        Line::default(),
        Line::styled("This cannot be undone.", theme.dim()),
        Line::default(),
        hint_line(&["y  confirm", "n / esc  cancel"], theme),
    ];
    show(frame, area, lines, 0, theme);
}
