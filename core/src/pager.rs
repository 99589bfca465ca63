//! Commit Pager
//!
//! Layout of the commit overlay, independent of any terminal library. The
//! overlay is a scrollable buffer of [`PagerLine`]s; the state machine uses
//! it to bound scrolling and the renderer uses it to draw, so both always
//! agree on how many lines there are.

use crate::text::{display_width, truncate, wrap_words};
use crate::types::{CommitDetail, DiffKind, FileStatus};

/// Spaces a tab expands to inside the overlay
const TAB_WIDTH: usize = 4;

/// Cells taken by the `●  M  ` prefix of a file row
pub const FILE_PREFIX_WIDTH: usize = 6;

/// Size of the overlay box for a given viewport
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayGeometry {
    /// Outer width, border included
    pub width: u16,
    /// Outer height, border included
    pub height: u16,
    /// Columns available to text
    pub content_width: usize,
    /// Buffer lines shown at once
    pub visible_lines: usize,
}

impl OverlayGeometry {
    /// Smallest outer width
    pub const MIN_WIDTH: u16 = 40;
    /// Smallest outer height
    pub const MIN_HEIGHT: u16 = 10;

    /// 80% of the viewport, at least the minimum, never larger than the
    /// viewport itself
    pub fn new(viewport_width: u16, viewport_height: u16) -> Self {
        let width = scaled(viewport_width).max(Self::MIN_WIDTH).min(viewport_width);
        let height = scaled(viewport_height)
            .max(Self::MIN_HEIGHT)
            .min(viewport_height);

        // Border plus two columns of padding each side; border plus one row
        // of padding top and bottom.
        let content_width = usize::from(width.saturating_sub(6));
        let inner_height = usize::from(height.saturating_sub(4));
        // Last two inner rows hold a spacer and the key hints.
        let visible_lines = inner_height.saturating_sub(2).max(1);

        Self {
            width,
            height,
            content_width,
            visible_lines,
        }
    }
}

fn scaled(dimension: u16) -> u16 {
    (u32::from(dimension) * 80 / 100) as u16
}

/// One line of the overlay buffer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PagerLine {
    /// Empty spacer
    Blank,
    /// Hash on the left, time on the right
    Header {
        /// Abbreviated hash
        hash: String,
        /// Spaces between hash and time
        gap: usize,
        /// Relative time
        time: String,
    },
    /// Commit subject
    Subject(String),
    /// One wrapped line of the body
    Body(String),
    /// Shown until the full detail arrives
    Loading,
    /// Section title padded with a rule to full width
    Rule(String),
    /// Entry of the files-changed list
    File {
        /// Change kind
        status: FileStatus,
        /// Path, truncated to fit
        path: String,
    },
    /// Line of the patch
    Diff {
        /// Category for colouring
        kind: DiffKind,
        /// Text, tabs expanded and truncated to fit
        text: String,
    },
}

/// Build the buffer for `detail` at `width` columns
pub fn build_lines(detail: &CommitDetail, width: usize) -> Vec<PagerLine> {
    let width = width.max(1);
    let mut lines = vec![
        PagerLine::Header {
            hash: detail.hash.clone(),
            gap: width
                .saturating_sub(display_width(&detail.hash) + display_width(&detail.relative_time))
                .max(1),
            time: detail.relative_time.clone(),
        },
        PagerLine::Blank,
        PagerLine::Subject(truncate(&detail.subject, width)),
    ];

    if !detail.body.trim().is_empty() {
        lines.push(PagerLine::Blank);
        lines.extend(wrap_words(&detail.body, width).into_iter().map(PagerLine::Body));
    }

    if !detail.loaded {
        lines.push(PagerLine::Blank);
        lines.push(PagerLine::Loading);
        return lines;
    }

    if !detail.files.is_empty() {
        lines.push(PagerLine::Blank);
        lines.push(PagerLine::Rule(section_rule(
            &format!("Files changed ({}) ", detail.files.len()),
            width,
        )));
        lines.push(PagerLine::Blank);
        let path_width = width.saturating_sub(FILE_PREFIX_WIDTH);
        lines.extend(detail.files.iter().map(|file| PagerLine::File {
            status: file.status,
            path: truncate(&file.path, path_width),
        }));
    }

    if !detail.diff.is_empty() {
        lines.push(PagerLine::Blank);
        lines.push(PagerLine::Rule(section_rule("Diff ", width)));
        lines.push(PagerLine::Blank);
        lines.extend(detail.diff.iter().map(|line| PagerLine::Diff {
            kind: line.kind,
            text: truncate(&expand_tabs(&line.content), width),
        }));
    }

    lines
}

/// `label` followed by `─` up to `width` cells
pub fn section_rule(label: &str, width: usize) -> String {
    let label = truncate(label, width);
    let fill = width.saturating_sub(display_width(&label));
    format!("{label}{}", "─".repeat(fill))
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Largest valid scroll offset
pub fn max_scroll(total_lines: usize, visible_lines: usize) -> usize {
    total_lines.saturating_sub(visible_lines)
}

/// Clamp a requested offset into `[0, max_scroll]`
pub fn clamp_scroll(requested: i64, total_lines: usize, visible_lines: usize) -> usize {
    let max = max_scroll(total_lines, visible_lines) as i64;
    requested.clamp(0, max) as usize
}

/// Lines visible from `scroll` (re-clamped), plus the offset actually used
pub fn visible_window(lines: &[PagerLine], scroll: usize, visible_lines: usize) -> (usize, &[PagerLine]) {
    let scroll = scroll.min(max_scroll(lines.len(), visible_lines));
    let end = (scroll + visible_lines).min(lines.len());
    (scroll, &lines[scroll..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommitSummary, DiffLine, FileChange};
    use pretty_assertions::assert_eq;

    fn loaded_detail() -> CommitDetail {
        CommitDetail {
            hash: "abc1234".to_string(),
            subject: "Add parser".to_string(),
            body: "First paragraph here.\n\nSecond.".to_string(),
            relative_time: "2 hours ago".to_string(),
            files: vec![FileChange {
                status: FileStatus::Modified,
                path: "src/lib.rs".to_string(),
            }],
            diff: vec![DiffLine::parse("@@ -1 +1 @@"), DiffLine::parse("+\tnew")],
            loaded: true,
        }
    }

    #[test]
    fn test_geometry_standard_terminal() {
        let g = OverlayGeometry::new(100, 50);
        assert_eq!((g.width, g.height), (80, 40));
        assert_eq!(g.content_width, 74);
        assert_eq!(g.visible_lines, 34);
    }

    #[test]
    fn test_geometry_minimums_clamped_to_viewport() {
        let g = OverlayGeometry::new(30, 8);
        assert_eq!((g.width, g.height), (30, 8));
        assert_eq!(g.content_width, 24);
        assert_eq!(g.visible_lines, 2);

        let g = OverlayGeometry::new(45, 11);
        assert_eq!((g.width, g.height), (40, 10));
        assert_eq!(g.visible_lines, 4);
    }

    #[test]
    fn test_geometry_tiny_viewport_keeps_one_line() {
        let g = OverlayGeometry::new(4, 3);
        assert_eq!(g.content_width, 0);
        assert_eq!(g.visible_lines, 1);
    }

    #[test]
    fn test_scroll_clamps_both_ends() {
        assert_eq!(clamp_scroll(100, 50, 20), 30);
        assert_eq!(clamp_scroll(-5, 50, 20), 0);
        assert_eq!(clamp_scroll(12, 50, 20), 12);
        assert_eq!(clamp_scroll(3, 10, 20), 0);
    }

    #[test]
    fn test_placeholder_shows_loading() {
        let summary = CommitSummary::new("abc1234", "Add parser", "2 hours ago");
        let lines = build_lines(&CommitDetail::placeholder(&summary), 40);
        assert_eq!(lines.last(), Some(&PagerLine::Loading));
        assert!(!lines.iter().any(|l| matches!(l, PagerLine::Rule(_))));
    }

    #[test]
    fn test_loaded_detail_sections() {
        let lines = build_lines(&loaded_detail(), 30);

        assert_eq!(
            lines[0],
            PagerLine::Header {
                hash: "abc1234".to_string(),
                gap: 12,
                time: "2 hours ago".to_string(),
            }
        );
        assert_eq!(lines[2], PagerLine::Subject("Add parser".to_string()));
        assert!(lines.contains(&PagerLine::Body(String::new())));
        assert!(lines.contains(&PagerLine::Rule(format!(
            "Files changed (1) {}",
            "─".repeat(12)
        ))));
        assert_eq!(
            lines.last(),
            Some(&PagerLine::Diff {
                kind: DiffKind::Added,
                text: "+    new".to_string(),
            })
        );
        assert!(!lines.contains(&PagerLine::Loading));
    }

    #[test]
    fn test_long_diff_lines_truncated() {
        let mut detail = loaded_detail();
        detail.diff = vec![DiffLine::parse(&format!("+{}", "x".repeat(100)))];
        let lines = build_lines(&detail, 20);
        match lines.last() {
            Some(PagerLine::Diff { text, .. }) => assert_eq!(display_width(text), 20),
            other => panic!("unexpected last line: {other:?}"),
        }
    }

    #[test]
    fn test_visible_window_reclamps() {
        let lines = vec![PagerLine::Blank; 50];
        let (scroll, window) = visible_window(&lines, 45, 20);
        assert_eq!(scroll, 30);
        assert_eq!(window.len(), 20);

        let (scroll, window) = visible_window(&lines[..5], 3, 20);
        assert_eq!(scroll, 0);
        assert_eq!(window.len(), 5);
    }
}
