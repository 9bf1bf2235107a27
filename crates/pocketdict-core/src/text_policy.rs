//! Text measuring, truncation and wrapping for the 128-pixel rows.

use heapless::{String, Vec};

/// Width of one display row in pixels.
pub const ROW_WIDTH_PX: usize = 128;

/// Advance of one character: 8 px below U+0080, 16 px otherwise.
pub const fn char_width_px(ch: char) -> usize {
    if (ch as u32) < 0x80 { 8 } else { 16 }
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width_px).sum()
}

/// Longest suffix of `text` that fits in `max_px`.
pub fn tail_fitting(text: &str, max_px: usize) -> &str {
    let mut width = 0usize;
    let mut start = text.len();

    for (idx, ch) in text.char_indices().rev() {
        width += char_width_px(ch);
        if width > max_px {
            break;
        }
        start = idx;
    }

    &text[start..]
}

/// Appends as much of `text` as fits, stopping at a char boundary.
///
/// Returns `false` when `text` was cut short.
pub fn push_truncated<const N: usize>(out: &mut String<N>, text: &str) -> bool {
    for ch in text.chars() {
        if out.push(ch).is_err() {
            return false;
        }
    }
    true
}

/// Wraps `text` into rows no wider than `max_px`, appending them to `out`.
///
/// Source newlines always break. Long lines break after the last space when
/// there is one, otherwise between characters. Blank lines are dropped.
/// Returns `false` when `out` filled up before the text ended.
pub fn wrap_lines<const L: usize, const N: usize>(
    text: &str,
    max_px: usize,
    out: &mut Vec<String<L>, N>,
) -> bool {
    for source in text.split('\n') {
        let source = source.trim_end_matches('\r').trim();
        if source.is_empty() {
            continue;
        }
        if !wrap_one(source, max_px, out) {
            return false;
        }
    }
    true
}

fn wrap_one<const L: usize, const N: usize>(
    source: &str,
    max_px: usize,
    out: &mut Vec<String<L>, N>,
) -> bool {
    let mut line: String<L> = String::new();
    let mut width = 0usize;
    // Byte offset just past the last space in `line`.
    let mut break_after: Option<usize> = None;

    for ch in source.chars() {
        let ch_width = char_width_px(ch);

        while width + ch_width > max_px && !line.is_empty() {
            match break_after.take() {
                Some(split) if split < line.len() => {
                    let mut tail: String<L> = String::new();
                    let _ = tail.push_str(&line[split..]);
                    line.truncate(split);
                    if !emit(&mut line, out) {
                        return false;
                    }
                    width = display_width(&tail);
                    line = tail;
                }
                _ => {
                    if !emit(&mut line, out) {
                        return false;
                    }
                    width = 0;
                }
            }
        }

        if ch == ' ' && line.is_empty() {
            continue;
        }
        if line.push(ch).is_err() {
            if !emit(&mut line, out) {
                return false;
            }
            width = 0;
            break_after = None;
            let _ = line.push(ch);
        }
        width += ch_width;
        if ch == ' ' {
            break_after = Some(line.len());
        }
    }

    line.is_empty() || emit(&mut line, out)
}

/// Moves `line` (minus trailing spaces) into `out`, leaving it empty.
fn emit<const L: usize, const N: usize>(line: &mut String<L>, out: &mut Vec<String<L>, N>) -> bool {
    while line.ends_with(' ') {
        line.pop();
    }
    let done = core::mem::take(line);
    if done.is_empty() {
        return true;
    }
    out.push(done).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    type Lines = Vec<String<64>, 16>;

    fn lines(out: &Lines) -> std::vec::Vec<&str> {
        out.iter().map(|line| line.as_str()).collect()
    }

    #[test]
    fn widths_follow_glyph_classes() {
        assert_eq!(display_width("abc"), 24);
        assert_eq!(display_width("放弃"), 32);
        assert_eq!(display_width("a放"), 24);
    }

    #[test]
    fn tail_keeps_cursor_end_visible() {
        assert_eq!(tail_fitting("abc|", ROW_WIDTH_PX), "abc|");
        assert_eq!(tail_fitting("abcdefghijklmnopqr|", ROW_WIDTH_PX), "defghijklmnopqr|");
        assert_eq!(tail_fitting("放弃放弃放弃放弃放", ROW_WIDTH_PX), "弃放弃放弃放弃放");
        assert_eq!(tail_fitting("abc", 0), "");
    }

    #[test]
    fn push_truncated_stops_on_char_boundary() {
        let mut out: String<4> = String::new();
        assert!(!push_truncated(&mut out, "a放b"));
        assert_eq!(out.as_str(), "a放");
    }

    #[test]
    fn wraps_at_last_space() {
        let mut out = Lines::new();
        assert!(wrap_lines("to give up completely", ROW_WIDTH_PX, &mut out));
        assert_eq!(lines(&out), ["to give up", "completely"]);
    }

    #[test]
    fn wraps_wide_text_between_characters() {
        let mut out = Lines::new();
        assert!(wrap_lines("一二三四五六七八九十", ROW_WIDTH_PX, &mut out));
        assert_eq!(lines(&out), ["一二三四五六七八", "九十"]);
    }

    #[test]
    fn newlines_break_and_blank_lines_drop() {
        let mut out = Lines::new();
        assert!(wrap_lines("v. 放弃\r\n\nn. 放任", ROW_WIDTH_PX, &mut out));
        assert_eq!(lines(&out), ["v. 放弃", "n. 放任"]);
    }

    #[test]
    fn unbroken_ascii_runs_hard_wrap() {
        let mut out = Lines::new();
        assert!(wrap_lines("abcdefghijklmnopqrstu", ROW_WIDTH_PX, &mut out));
        assert_eq!(lines(&out), ["abcdefghijklmnop", "qrstu"]);
    }

    #[test]
    fn reports_overflowing_output() {
        let mut out: Vec<String<64>, 2> = Vec::new();
        assert!(!wrap_lines("a\nb\nc", ROW_WIDTH_PX, &mut out));
        assert_eq!(out.len(), 2);
    }
}
