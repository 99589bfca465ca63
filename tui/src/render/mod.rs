//! Render Engine
//!
//! Pure drawing: every function here reads the core [`App`] and a
//! [`Theme`] and writes into a ratatui [`Frame`]. Nothing in this module
//! mutates state, so the same state always draws the same screen.
//!
//! # Screens
//!
//! - **Main** (List, DetailFocused): header, blank, list + detail panes,
//!   blank, footer
//! - **Modals** (create, type picker, rename, delete, first run): one
//!   centered box on an otherwise empty canvas
//! - **Commit overlay**: one large centered box with the scrolled pager
//! - **No repository**: header plus a centered prompt
//!
//! While an error banner is showing it takes the bottom row of every screen.

mod header;
mod modals;
mod overlay;
mod panes;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};
use ratatui::Frame;

use worktree_core::text::display_width;
use worktree_core::{App, Mode};

use crate::theme::Theme;

pub use header::{pack_header, HeaderLayout};
pub use panes::list_offset;

/// Gap between the list and detail panes
const PANE_GUTTER: u16 = 2;

/// Narrowest list pane
const MIN_LIST_WIDTH: u16 = 22;

/// Smallest pane height, borders included
const MIN_PANE_HEIGHT: u16 = 3;

/// Draw the whole screen for `app`
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let mut area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    // The banner owns the last row unless the screen has a footer of its own
    let own_footer = matches!(
        app.mode(),
        Mode::List | Mode::DetailFocused { .. } | Mode::DetailOverlay(_)
    );
    if !own_footer && app.error().is_some() {
        let banner = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        frame.render_widget(Paragraph::new(footer_line(app, theme)), banner);
        area.height -= 1;
    }

    match app.mode() {
        Mode::NoRepository => modals::render_no_repository(frame, area, app, theme),
        Mode::FirstRunPrompt => modals::render_shell_setup(frame, area, app, theme),
        Mode::Create(_) if !app.has_commits() => modals::render_no_commits(frame, area, theme),
        Mode::Create(form) => match form.picker {
            Some(highlight) => modals::render_type_picker(frame, area, app, highlight, theme),
            None => modals::render_create(frame, area, app, form, theme),
        },
        Mode::Rename(form) => modals::render_rename(frame, area, form, theme),
        Mode::DeleteConfirm { .. } => modals::render_delete(frame, area, app, theme),
        Mode::DetailOverlay(view) => overlay::render_overlay(frame, area, app, view, theme),
        Mode::List | Mode::DetailFocused { .. } => render_main(frame, area, app, theme),
    }
}

// ============================================================================
// Main Screen
// ============================================================================

fn render_main(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let header_height = header::render_header(frame, area, app, theme);
    let footer_y = area.bottom() - 1;

    let panes_y = area.y + header_height + 1;
    let pane_height = area
        .height
        .saturating_sub(header_height + 1 + 2)
        .max(MIN_PANE_HEIGHT);
    let panes = clip(Rect::new(area.x, panes_y, area.width, pane_height), area);

    let list_width = (area.width / 4).max(MIN_LIST_WIDTH).min(area.width);
    let list = Rect { width: list_width, ..panes };
    let detail_x = list.right().saturating_add(PANE_GUTTER);
    let detail = clip(
        Rect::new(
            detail_x,
            panes.y,
            area.right().saturating_sub(detail_x),
            panes.height,
        ),
        area,
    );

    panes::render_list(frame, list, app, theme);
    if detail.width > 2 {
        panes::render_detail(frame, detail, app, theme);
    }

    let footer = Rect::new(area.x, footer_y, area.width, 1);
    frame.render_widget(Paragraph::new(footer_line(app, theme)), footer);
}

/// Banner when an error is showing, otherwise the hints for the mode
pub fn footer_line(app: &App, theme: &Theme) -> Line<'static> {
    if let Some(error) = app.error() {
        return Line::from(vec![
            Span::styled(format!("error: {error}"), theme.danger()),
            Span::styled("    (any key to dismiss)", theme.dim()),
        ]);
    }

    let hints: &[&str] = match app.mode() {
        Mode::List => match app.selected() {
            Some(wt) if !wt.is_primary => &[
                "n  new",
                "d  delete",
                "e  edit",
                "c  cd",
                "enter  focus",
                "↑↓  navigate",
                "r  refresh",
                "q  quit",
            ],
            Some(_) => &[
                "n  new",
                "e  edit",
                "c  cd",
                "enter  focus",
                "↑↓  navigate",
                "r  refresh",
                "q  quit",
            ],
            None => &["n  new", "↑↓  navigate", "r  refresh", "q  quit"],
        },
        Mode::DetailFocused { .. } => &[
            "↑↓  navigate commits",
            "enter  view",
            "esc  back",
            "q  quit",
        ],
        _ => &["q  quit"],
    };
    hint_line(hints, theme)
}

// ============================================================================
// Shared Pieces
// ============================================================================

/// `key  description` hints: key bold accent, description dim, four spaces apart
pub fn hint_line(hints: &[&str], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("    ", theme.dim()));
        }
        match hint.find("  ") {
            Some(split) => {
                spans.push(Span::styled(hint[..split].to_string(), theme.key()));
                spans.push(Span::styled(hint[split..].to_string(), theme.dim()));
            }
            None => spans.push(Span::styled(hint.to_string(), theme.dim())),
        }
    }
    Line::from(spans)
}

/// Rounded border in `color`
fn rounded(color: ratatui::style::Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

/// Rounded accent box with one row and two columns of padding
fn modal_block(theme: &Theme) -> Block<'static> {
    rounded(theme.accent).padding(Padding::new(2, 2, 1, 1))
}

/// Widest line in cells
fn content_width(lines: &[Line<'_>]) -> u16 {
    lines
        .iter()
        .map(|line| line.spans.iter().map(|s| display_width(&s.content)).sum::<usize>())
        .max()
        .unwrap_or(0)
        .min(u16::MAX as usize) as u16
}

/// `width` x `height` rectangle centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn clip(rect: Rect, bounds: Rect) -> Rect {
    rect.intersection(bounds)
}
