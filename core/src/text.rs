//! Text Layout
//!
//! Fixed-width helpers used by every layout computation. Terminal cells are
//! counted with `unicode-width` so wide glyphs take two columns and
//! multi-byte characters are never split.

use unicode_width::UnicodeWidthChar;

/// Glyph appended by [`truncate`] when text is shortened
pub const ELLIPSIS: char = '…';

/// Terminal display width of `text` in cells
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Longest char prefix of `text` no wider than `budget` cells
fn take_width(text: &str, budget: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = char_width(ch);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Shorten `text` to at most `max_width` cells.
///
/// Text that already fits is returned unchanged. Otherwise the result is the
/// longest prefix that still fits once a trailing [`ELLIPSIS`] is added. A
/// width of one gets a bare one-cell prefix, a width of zero gets nothing.
pub fn truncate(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return take_width(text, 1);
    }
    let mut out = take_width(text, max_width - 1);
    out.push(ELLIPSIS);
    out
}

/// Append spaces until `text` is at least `width` cells wide
pub fn pad_right(text: &str, width: usize) -> String {
    let current = display_width(text);
    if current >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + width - current);
    out.push_str(text);
    out.extend(std::iter::repeat(' ').take(width - current));
    out
}

/// Greedy word wrap.
///
/// Existing newlines are hard breaks (a blank paragraph becomes a blank
/// line). Within a paragraph, whitespace-separated words are packed onto
/// lines no wider than `width`; a word wider than `width` gets a line of its
/// own and is left whole. Empty input yields no lines.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0;

        for word in paragraph.split_whitespace() {
            let word_width = display_width(word);
            if line.is_empty() {
                line.push_str(word);
                line_width = word_width;
            } else if line_width + 1 + word_width <= width {
                line.push(' ');
                line.push_str(word);
                line_width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
                line_width = word_width;
            }
        }

        lines.push(line);
    }

    lines
}

/// Branch-safe form of free text.
///
/// Lower-cases, keeps ASCII letters, digits and `/`, collapses runs of
/// whitespace, `_` and `-` into one `-`, drops everything else and strips
/// separators from both ends.
pub fn slugify(text: &str) -> String {
    let mut out = String::new();
    let mut prev_sep = false;

    for ch in text.to_lowercase().chars() {
        match ch {
            'a'..='z' | '0'..='9' => {
                out.push(ch);
                prev_sep = false;
            }
            '/' => {
                out.push('/');
                prev_sep = false;
            }
            c if c.is_whitespace() || c == '_' || c == '-' => {
                if !prev_sep && !out.is_empty() {
                    out.push('-');
                    prev_sep = true;
                }
            }
            _ => {}
        }
    }

    let is_sep = |c: char| c == '-' || c == '/';
    out.trim_start_matches(is_sep)
        .trim_end_matches(is_sep)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLES: &[&str] = &[
        "",
        "a",
        "hello",
        "hello world",
        "naïve café",
        "日本語のテキスト",
        "mixed 日本 text",
        "emoji 🎉 party",
        "feat/auth-refresh-with-a-very-long-name",
    ];

    #[test]
    fn test_truncate_never_exceeds_width() {
        for sample in SAMPLES {
            for width in 0..50 {
                let out = truncate(sample, width);
                assert!(
                    display_width(&out) <= width,
                    "{sample:?} at {width} gave {out:?}"
                );
            }
        }
    }

    #[test]
    fn test_truncate_identity_when_fits() {
        for sample in SAMPLES {
            let w = display_width(sample);
            for extra in 0..3 {
                assert_eq!(truncate(sample, w + extra), *sample);
            }
        }
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hello", 2), "h…");
    }

    #[test]
    fn test_truncate_tiny_widths() {
        assert_eq!(truncate("hello", 1), "h");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_truncate_does_not_split_wide_glyphs() {
        // Each glyph is two cells; 5 cells leaves room for two glyphs + ellipsis.
        assert_eq!(truncate("日本語のテ", 5), "日本…");
        assert_eq!(truncate("日本語", 1), "");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad_right("ab", 5), "ab   ");
        assert_eq!(pad_right("abcdef", 3), "abcdef");
        assert_eq!(pad_right("日本", 5), "日本 ");
        assert_eq!(pad_right("", 0), "");
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        for width in 1..30 {
            for line in wrap_words(text, width) {
                let single_word = !line.contains(' ');
                assert!(
                    display_width(&line) <= width || single_word,
                    "line {line:?} too wide for {width}"
                );
            }
        }
    }

    #[test]
    fn test_wrap_preserves_word_order() {
        let text = "alpha  beta\tgamma delta   epsilon zeta eta theta";
        for width in 1..20 {
            let joined = wrap_words(text, width).join(" ");
            let words: Vec<&str> = joined.split_whitespace().collect();
            let expected: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(words, expected);
        }
    }

    #[test]
    fn test_wrap_long_word_kept_whole() {
        let lines = wrap_words("a supercalifragilistic b", 5);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_hard_breaks() {
        let lines = wrap_words("first line\n\nsecond paragraph here", 10);
        assert_eq!(lines, vec!["first line", "", "second", "paragraph", "here"]);
    }

    #[test]
    fn test_wrap_empty_input() {
        assert!(wrap_words("", 10).is_empty());
        assert!(wrap_words("   ", 10).is_empty());
    }

    #[test]
    fn test_wrap_is_deterministic() {
        let text = "some words that wrap around a few times";
        assert_eq!(wrap_words(text, 9), wrap_words(text, 9));
    }

    #[test]
    fn test_slugify_examples() {
        assert_eq!(slugify("Feat: Auth Refresh"), "feat-auth-refresh");
        assert_eq!(slugify("a/b  c"), "a/b-c");
        assert_eq!(slugify("Auth Refresh"), "auth-refresh");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("one__two--three   four"), "one-two-three-four");
        assert_eq!(slugify("snake_case_name"), "snake-case-name");
    }

    #[test]
    fn test_slugify_strips_edges() {
        assert_eq!(slugify("  leading and trailing  "), "leading-and-trailing");
        assert_eq!(slugify("--x--"), "x");
        assert_eq!(slugify("path/"), "path");
        assert_eq!(slugify("/path"), "path");
        assert_eq!(slugify("!!!"), "");
    }
}
