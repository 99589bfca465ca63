//! Commit Overlay
//!
//! Draws the pager buffer built by the core. The state machine clamps the
//! scroll offset against the same buffer and geometry, so this module only
//! slices, colours and pads.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use worktree_core::pager::{build_lines, visible_window};
use worktree_core::{App, CommitView, DiffKind, FileStatus, PagerLine};

use crate::theme::Theme;

use super::{centered, footer_line, hint_line, modal_block};

pub(super) fn render_overlay(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    view: &CommitView,
    theme: &Theme,
) {
    let geometry = app.overlay_geometry();
    let buffer = build_lines(&view.detail, geometry.content_width);
    let (scroll, window) = visible_window(&buffer, view.scroll, geometry.visible_lines);

    let mut lines: Vec<Line<'static>> = window.iter().map(|line| styled(line, theme)).collect();
    lines.resize(geometry.visible_lines, Line::default());
    lines.push(Line::default());

    // The box keeps the size the scroll clamp assumes; a banner takes the hint row
    let mut hints = if app.error().is_some() {
        footer_line(app, theme)
    } else {
        hint_line(&["↑↓  scroll", "esc  close"], theme)
    };
    if buffer.len() > geometry.visible_lines {
        hints.spans.push(Span::styled(
            format!("  {}/{}", scroll + 1, buffer.len()),
            theme.dim(),
        ));
    }
    lines.push(hints);

    let rect = centered(area, geometry.width, geometry.height);
    frame.render_widget(Paragraph::new(lines).block(modal_block(theme)), rect);
}

fn styled(line: &PagerLine, theme: &Theme) -> Line<'static> {
    match line {
        PagerLine::Blank => Line::default(),
        PagerLine::Header { hash, gap, time } => Line::from(vec![
            Span::styled(hash.clone(), theme.fg(theme.hash)),
            Span::raw(" ".repeat(*gap)),
            Span::styled(time.clone(), theme.fg(theme.muted)),
        ]),
        PagerLine::Subject(text) => {
            Line::styled(text.clone(), theme.fg(theme.title).add_modifier(Modifier::BOLD))
        }
        PagerLine::Body(text) => Line::styled(text.clone(), theme.fg(theme.body)),
        PagerLine::Loading => Line::styled("Loading…", theme.dim()),
        PagerLine::Rule(text) => Line::styled(text.clone(), theme.dim()),
        PagerLine::File { status, path } => {
            let color = match status {
                FileStatus::Added => theme.added,
                FileStatus::Deleted => theme.removed,
                FileStatus::Renamed => theme.renamed,
                _ => theme.modified,
            };
            Line::from(vec![
                Span::styled("●", theme.fg(theme.commit)),
                Span::raw("  "),
                Span::styled(status.code().to_string(), theme.fg(color)),
                Span::raw("  "),
                Span::styled(path.clone(), theme.fg(theme.title)),
            ])
        }
        PagerLine::Diff { kind, text } => {
            let style = match kind {
                DiffKind::Added => theme.fg(theme.added),
                DiffKind::Removed => theme.fg(theme.removed),
                DiffKind::Hunk => theme.accent(),
                DiffKind::FileHeader => theme.bold(),
                DiffKind::Meta => theme.dim(),
                DiffKind::Context => theme.fg(theme.muted),
            };
            Line::styled(text.clone(), style)
        }
    }
}
