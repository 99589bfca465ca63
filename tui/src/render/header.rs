//! Header Box
//!
//! App identity on the left of line one, repository facts packed to its
//! right. Facts that do not fit move to line two as whole units, where the
//! `fetched <time>` note is always right-aligned.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Padding, Paragraph};
use ratatui::Frame;

use worktree_core::text::display_width;
use worktree_core::App;

use crate::theme::Theme;

use super::rounded;

const APP_NAME: &str = "⎇  worktree";
const SEPARATOR: &str = " · ";

/// Where the header's units end up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Units placed on line one, counted from the front
    pub first_line: usize,
    /// Whether a second line is needed
    pub two_lines: bool,
}

/// Greedy packing: units go on line one, each preceded by a separator, until
/// the first one that does not fit; it and everything after overflow.
pub fn pack_header(
    name_width: usize,
    unit_widths: &[usize],
    has_fetch: bool,
    inner_width: usize,
) -> HeaderLayout {
    let separator = display_width(SEPARATOR);
    let mut used = name_width;
    let mut first_line = 0;
    for width in unit_widths {
        if used + separator + width > inner_width {
            break;
        }
        used += separator + width;
        first_line += 1;
    }
    HeaderLayout {
        first_line,
        two_lines: first_line < unit_widths.len() || has_fetch,
    }
}

/// Draw the header at the top of `area`; returns the rows it took
pub(super) fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) -> u16 {
    let inner_width = (area.width as usize).saturating_sub(4).max(4);
    let lines = header_lines(app, theme, inner_width);
    let height = (lines.len() as u16 + 2).min(area.height);

    let block = rounded(theme.dim).padding(Padding::horizontal(1));
    let rect = Rect::new(area.x, area.y, area.width, height);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
    height
}

fn header_lines(app: &App, theme: &Theme, inner_width: usize) -> Vec<Line<'static>> {
    let summary = app.summary();

    let mut units: Vec<Span<'static>> = Vec::new();
    if let Some(remote) = &summary.remote {
        units.push(Span::styled(remote.clone(), theme.dim()));
    }
    let count = app.worktrees().len();
    if count > 0 {
        units.push(Span::styled(format!("{count} worktrees"), theme.dim()));
    }
    if summary.stash_count > 0 {
        units.push(Span::styled(
            format!("✦ {} stashed", summary.stash_count),
            theme.warning(),
        ));
    }
    let fetched = summary
        .last_fetch
        .as_ref()
        .map(|ago| Span::styled(format!("fetched {ago}"), theme.dim()));

    let widths: Vec<usize> = units.iter().map(|u| display_width(&u.content)).collect();
    let name_width = display_width(APP_NAME);
    let layout = pack_header(name_width, &widths, fetched.is_some(), inner_width);
    let overflow = units.split_off(layout.first_line);

    // Line one: name, gap, fitted units
    let right_width = joined_width(&units);
    let mut first = vec![Span::raw(APP_NAME)];
    first.push(Span::raw(
        " ".repeat(inner_width.saturating_sub(name_width + right_width)),
    ));
    first.extend(join(units, theme));

    let mut lines = vec![Line::from(first)];
    if !layout.two_lines {
        return lines;
    }

    // Line two: overflow on the left, fetch time on the right
    let left_width = joined_width(&overflow);
    let mut second = join(overflow, theme);
    if let Some(fetched) = fetched {
        let fetch_width = display_width(&fetched.content);
        let gap = if left_width > 0 {
            inner_width.saturating_sub(left_width + fetch_width).max(1)
        } else {
            inner_width.saturating_sub(fetch_width)
        };
        second.push(Span::raw(" ".repeat(gap)));
        second.push(fetched);
    }
    lines.push(Line::from(second));
    lines
}

fn join(units: Vec<Span<'static>>, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(units.len() * 2);
    for (i, unit) in units.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, theme.dim()));
        }
        spans.push(unit);
    }
    spans
}

fn joined_width(units: &[Span<'_>]) -> usize {
    let separators = units.len().saturating_sub(1) * display_width(SEPARATOR);
    units.iter().map(|u| display_width(&u.content)).sum::<usize>() + separators
}
