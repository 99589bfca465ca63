//! Theme and Colors
//!
//! General UI chrome uses the 16 ANSI colors so it follows the terminal's
//! palette. Indicators with a fixed meaning (HEAD sha, PR state, diff
//! lines) are pinned to Catppuccin Mocha hues.
//!
//! The renderer never reaches for a color constant directly; it receives a
//! [`Theme`] and asks it for styles.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Terminal Palette
// ============================================================================

/// Accent (borders, keys, selection marker)
pub const ACCENT: Color = Color::Magenta;

/// Secondary text and inactive borders
pub const DIM: Color = Color::DarkGray;

/// Success / clean
pub const GREEN: Color = Color::Green;

/// Warnings (stash count, behind, diverged)
pub const YELLOW: Color = Color::Yellow;

/// Errors and destructive prompts
pub const RED: Color = Color::Red;

/// Commit dots and hashes
pub const BLUE: Color = Color::Blue;

// ============================================================================
// Catppuccin Mocha
// ============================================================================

/// HEAD sha, selected commit hash
pub const FLAMINGO: Color = Color::Rgb(0xf2, 0xcd, 0xcd);

/// Open PR
pub const TEAL: Color = Color::Rgb(0x94, 0xe2, 0xd5);

/// Merged PR, focused detail pane, renamed files
pub const MAUVE: Color = Color::Rgb(0xcb, 0xa6, 0xf7);

/// Closed PR, removed lines, deleted files
pub const MOCHA_RED: Color = Color::Rgb(0xf3, 0x8b, 0xa8);

/// Added lines and files
pub const MOCHA_GREEN: Color = Color::Rgb(0xa6, 0xe3, 0xa1);

/// Modified files
pub const MOCHA_YELLOW: Color = Color::Rgb(0xf9, 0xe2, 0xaf);

/// Commit subject, file paths
pub const TEXT: Color = Color::Rgb(0xcd, 0xd6, 0xf4);

/// Commit body
pub const SUBTEXT1: Color = Color::Rgb(0xba, 0xc2, 0xde);

/// Context lines, relative times, "no PR"
pub const SUBTEXT0: Color = Color::Rgb(0xa6, 0xad, 0xc8);

// ============================================================================
// Theme
// ============================================================================

/// Immutable palette handed to every render function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub dim: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub commit: Color,
    pub focus: Color,
    pub hash: Color,
    pub pr_open: Color,
    pub pr_merged: Color,
    pub pr_closed: Color,
    pub pr_none: Color,
    pub title: Color,
    pub body: Color,
    pub muted: Color,
    pub added: Color,
    pub removed: Color,
    pub modified: Color,
    pub renamed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: ACCENT,
            dim: DIM,
            success: GREEN,
            warning: YELLOW,
            danger: RED,
            commit: BLUE,
            focus: MAUVE,
            hash: FLAMINGO,
            pr_open: TEAL,
            pr_merged: MAUVE,
            pr_closed: MOCHA_RED,
            pr_none: SUBTEXT0,
            title: TEXT,
            body: SUBTEXT1,
            muted: SUBTEXT0,
            added: MOCHA_GREEN,
            removed: MOCHA_RED,
            modified: MOCHA_YELLOW,
            renamed: MAUVE,
        }
    }
}

impl Theme {
    /// Plain foreground
    pub fn fg(&self, color: Color) -> Style {
        Style::default().fg(color)
    }

    pub fn dim(&self) -> Style {
        self.fg(self.dim)
    }

    pub fn accent(&self) -> Style {
        self.fg(self.accent)
    }

    /// Accent, bold (keys, shell prompt title)
    pub fn key(&self) -> Style {
        self.accent().add_modifier(Modifier::BOLD)
    }

    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn danger(&self) -> Style {
        self.fg(self.danger).add_modifier(Modifier::BOLD)
    }

    pub fn warning(&self) -> Style {
        self.fg(self.warning)
    }

    pub fn success(&self) -> Style {
        self.fg(self.success)
    }
}
