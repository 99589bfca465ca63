//! List and Detail Panes

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use worktree_core::text::{display_width, pad_right, truncate, wrap_words};
use worktree_core::{App, Mode, PrLookup, PrState, WorktreeEntry};

use crate::theme::Theme;

use super::rounded;

const NEW_ROW: &str = "+ new worktree";
const NO_COMMITS_NOTE: &str = "  no commits yet";
const VIEW_HINT: &str = "  enter to view";

/// First visible row so that `cursor` stays inside `visible` rows
pub fn list_offset(cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        return cursor;
    }
    cursor.saturating_sub(visible - 1)
}

// ============================================================================
// List Pane
// ============================================================================

pub(super) fn render_list(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let inner_width = (area.width as usize).saturating_sub(2);
    let inner_height = (area.height as usize).saturating_sub(2);
    let max_width = inner_width.saturating_sub(2);

    let mut rows = vec![new_row(app, max_width, theme)];
    rows.extend(
        app.worktrees()
            .iter()
            .enumerate()
            .map(|(i, wt)| worktree_row(&wt.name, app.cursor() == i + 1, max_width, theme)),
    );

    let offset = list_offset(app.cursor(), inner_height);
    let rows: Vec<Line<'static>> = rows.into_iter().skip(offset).collect();

    let border = match app.mode() {
        Mode::DetailFocused { .. } => theme.dim,
        _ => theme.accent,
    };
    frame.render_widget(Paragraph::new(rows).block(rounded(border)), area);
}

fn new_row(app: &App, max_width: usize, theme: &Theme) -> Line<'static> {
    let text = truncate(NEW_ROW, max_width);
    if !app.has_commits() {
        // The note is right-aligned and dropped when the pane is too narrow
        let note_width = display_width(NO_COMMITS_NOTE);
        let label = if display_width(&text) + note_width <= max_width {
            format!("{}{NO_COMMITS_NOTE}", pad_right(&text, max_width - note_width))
        } else {
            text
        };
        return Line::from(vec![Span::raw("  "), Span::styled(label, theme.dim())]);
    }
    if app.cursor() == 0 {
        Line::from(vec![
            Span::styled("▌ ", theme.accent()),
            Span::styled(pad_right(&text, max_width), theme.accent()),
        ])
    } else {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                pad_right(&text, max_width),
                theme.accent().add_modifier(Modifier::DIM),
            ),
        ])
    }
}

fn worktree_row(name: &str, selected: bool, max_width: usize, theme: &Theme) -> Line<'static> {
    let text = pad_right(&truncate(name, max_width), max_width);
    if selected {
        Line::from(vec![
            Span::styled("▌ ", theme.accent()),
            Span::styled(text, theme.bold()),
        ])
    } else {
        Line::from(vec![Span::raw("  "), Span::styled(text, theme.dim())])
    }
}

// ============================================================================
// Detail Pane
// ============================================================================

pub(super) fn render_detail(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let inner_width = (area.width as usize).saturating_sub(2);
    let inner_height = (area.height as usize).saturating_sub(2);

    let focused_commit = match app.mode() {
        Mode::DetailFocused { commit } => Some(*commit),
        _ => None,
    };

    let (lines, selected_line) = match app.selected() {
        None => (placeholder_lines(app, theme), None),
        Some(wt) => detail_lines(app, wt, focused_commit, inner_width, theme),
    };

    // Keep the highlighted commit on screen
    let scroll = selected_line.map_or(0, |line| list_offset(line, inner_height));

    let border = if focused_commit.is_some() {
        theme.focus
    } else {
        theme.dim
    };
    let paragraph = Paragraph::new(lines)
        .block(rounded(border))
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(paragraph, area);
}

fn placeholder_lines(app: &App, theme: &Theme) -> Vec<Line<'static>> {
    if !app.has_commits() {
        return vec![
            Line::styled("Worktrees require at least one commit.", theme.dim()),
            Line::default(),
            Line::styled("Run  git commit  on the main branch first,", theme.dim()),
            Line::styled("then worktrees can be created here.", theme.dim()),
        ];
    }
    vec![
        Line::styled(
            "Select \"+ new worktree\" and press enter to create",
            theme.dim(),
        ),
        Line::styled("or press  n  from anywhere.", theme.dim()),
    ]
}

/// Lines for `wt`, plus the index of the highlighted commit line
fn detail_lines(
    app: &App,
    wt: &WorktreeEntry,
    focused_commit: Option<usize>,
    inner_width: usize,
    theme: &Theme,
) -> (Vec<Line<'static>>, Option<usize>) {
    let mut lines = Vec::new();

    // Title and PR badge
    let title = Span::styled(wt.name.clone(), theme.bold());
    let badge = if wt.is_primary {
        None
    } else {
        pr_badge(app, &wt.branch, theme)
    };
    match badge {
        Some(badge) => {
            let gap = inner_width
                .saturating_sub(display_width(&title.content) + display_width(&badge.content))
                .max(1);
            lines.push(Line::from(vec![title, Span::raw(" ".repeat(gap)), badge]));
        }
        None => lines.push(Line::from(title)),
    }
    lines.push(Line::default());

    // Facts
    let row = |label: &str, value: Vec<Span<'static>>| {
        let mut spans = vec![
            Span::styled("◎", theme.success()),
            Span::raw("  "),
            Span::styled(format!("{label:<8}"), theme.dim()),
            Span::raw("  "),
        ];
        spans.extend(value);
        Line::from(spans)
    };

    lines.push(row("Branch", vec![Span::raw(wt.branch.clone())]));
    lines.push(row(
        "Path",
        vec![Span::raw(truncate(
            &wt.path.display().to_string(),
            inner_width.saturating_sub(22),
        ))],
    ));
    lines.push(row("Updated", vec![Span::raw(wt.updated.clone())]));
    if let Some(head) = &wt.head {
        lines.push(row("HEAD", vec![Span::styled(head.clone(), theme.fg(theme.hash))]));
    }
    lines.push(row("Status", status_spans(wt, theme)));

    if !wt.is_primary {
        lines.push(row("Sync", sync_spans(wt, &app.summary().default_branch, theme)));
        if let Some(from) = &wt.created_from {
            lines.push(row("Created", vec![Span::raw(format!("from {from}"))]));
        }
    }

    // Description
    if let Some(description) = wt.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::default());
        lines.push(Line::styled(
            format!("Description {}", "─".repeat(inner_width.saturating_sub(14).max(3))),
            theme.dim(),
        ));
        lines.push(Line::default());
        lines.extend(
            wrap_words(description, inner_width)
                .into_iter()
                .map(|line| Line::styled(line, theme.dim())),
        );
    }

    // Commits
    let mut selected_line = None;
    if !wt.commits.is_empty() {
        lines.push(Line::default());
        let hint = if focused_commit.is_some() { VIEW_HINT } else { "" };
        let rule_width = inner_width
            .saturating_sub(10 + display_width(hint))
            .max(3);
        let rule = vec![
            Span::styled(format!("Commits {}", "─".repeat(rule_width)), theme.dim()),
            Span::styled(hint, theme.dim()),
        ];
        lines.push(Line::from(rule));
        lines.push(Line::default());

        let subject_width = inner_width.saturating_sub(28).max(10);
        for (i, commit) in wt.commits.iter().enumerate() {
            let subject = truncate(&commit.subject, subject_width);
            let time = Span::styled(commit.relative_time.clone(), theme.dim());
            if focused_commit == Some(i) {
                selected_line = Some(lines.len());
                lines.push(Line::from(vec![
                    Span::styled("▌ ", theme.accent()),
                    Span::styled(commit.hash.clone(), theme.fg(theme.hash)),
                    Span::raw("  "),
                    Span::styled(subject, theme.bold()),
                    Span::raw("  "),
                    time,
                ]));
            } else {
                lines.push(Line::from(vec![
                    Span::styled("● ", theme.fg(theme.commit)),
                    Span::styled(commit.hash.clone(), theme.fg(theme.commit)),
                    Span::raw("  "),
                    Span::raw(subject),
                    Span::raw("  "),
                    time,
                ]));
            }
        }
    }

    (lines, selected_line)
}

fn status_spans(wt: &WorktreeEntry, theme: &Theme) -> Vec<Span<'static>> {
    if wt.is_clean() {
        return vec![Span::styled("✓ clean", theme.success())];
    }
    let mut spans = Vec::new();
    if wt.modified > 0 {
        spans.push(Span::styled("●", theme.fg(theme.danger)));
        spans.push(Span::raw(format!(" {} changed", wt.modified)));
    }
    if wt.untracked > 0 {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::raw(format!("{} untracked", wt.untracked)));
    }
    spans
}

fn sync_spans(wt: &WorktreeEntry, default_branch: &str, theme: &Theme) -> Vec<Span<'static>> {
    let base = if default_branch.is_empty() {
        "main"
    } else {
        default_branch
    };
    let span = match (wt.ahead, wt.behind) {
        (0, 0) => Span::styled(format!("✓ up to date with {base}"), theme.success()),
        (ahead, 0) => Span::raw(format!("↑{ahead} ahead of {base}")),
        (0, behind) => Span::styled(format!("↓{behind} behind {base}"), theme.warning()),
        (ahead, behind) => Span::styled(
            format!("↑{ahead} ↓{behind} diverged from {base}"),
            theme.warning(),
        ),
    };
    vec![span]
}

/// Badge for the cached lookup; nothing while unknown or unavailable
fn pr_badge(app: &App, branch: &str, theme: &Theme) -> Option<Span<'static>> {
    if !app.summary().pr_lookup_available {
        return None;
    }
    match app.pr_lookup(branch)? {
        PrLookup::Found(pr) => Some(match pr.state {
            PrState::Open => Span::styled(format!("● open  #{}", pr.number), theme.fg(theme.pr_open)),
            PrState::Merged => Span::styled(
                format!("✓ merged  #{}", pr.number),
                theme.fg(theme.pr_merged),
            ),
            PrState::Closed => Span::styled(
                format!("✗ closed  #{}", pr.number),
                theme.fg(theme.pr_closed),
            ),
        }),
        PrLookup::NotFound => Some(Span::styled("no PR", theme.fg(theme.pr_none))),
        PrLookup::Unavailable => None,
    }
}
