//! Width-aware drawing helpers shared by the widgets.
//!
//! Everything here measures text in terminal columns (`unicode-width`), never in bytes or chars,
//! and never writes outside the `max_cols` budget it is given.

use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::viewport::RowViewport;

pub const ELLIPSIS: &str = "…";

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Draws a one-column vertical scrollbar for a row window.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, viewport: &RowViewport, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    buf.set_style(area, style);

    let total = viewport.len();
    let visible = viewport.height();
    if total <= visible || total == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((visible as f64 / total as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;
    let max_offset = total.saturating_sub(visible).max(1) as f64;
    let thumb_top = ((viewport.offset() as f64 / max_offset) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            "│"
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Writes `input` at `(x, y)`, skipping the first `start_col` columns and writing at most
/// `max_cols`. A wide char straddling either edge is dropped. Returns the columns written.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) -> u16 {
    if max_cols == 0 {
        return 0;
    }

    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if col < start_col {
            col += w;
            continue;
        }
        if out_cols + w > max_cols {
            break;
        }

        let dx = out_cols as u16;
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(ch.encode_utf8(&mut tmp));
        }
        if w == 2
            && let Some(cell) = buf.cell_mut((x + dx + 1, y))
        {
            cell.set_style(style);
            cell.set_symbol("");
        }
        out_cols += w;
        col += w;
    }

    out_cols as u16
}

/// Writes spans left to right, falling back to `fallback` for unstyled spans.
/// Returns the columns written.
pub fn render_spans(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'_>],
    fallback: Style,
) -> u16 {
    let mut used = 0u16;
    for span in spans {
        if used >= max_cols {
            break;
        }
        let style = if span.style == Style::default() {
            fallback
        } else {
            fallback.patch(span.style)
        };
        used += render_str_clipped(x + used, y, 0, max_cols - used, buf, &span.content, style);
    }
    used
}

/// Cuts `input` to `max_cols` columns, replacing the tail with `…` when it does not fit.
pub fn truncate_to_width(input: &str, max_cols: usize) -> String {
    if display_width(input) <= max_cols {
        return input.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }

    let budget = max_cols - 1;
    let mut out = String::new();
    let mut used = 0usize;
    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}

/// Truncates and pads `input` so it occupies exactly `width` columns.
pub fn align_in_width(input: &str, width: usize, alignment: Alignment) -> String {
    let text = truncate_to_width(input, width);
    let slack = width.saturating_sub(display_width(&text));
    let (left, right) = match alignment {
        Alignment::Left => (0, slack),
        Alignment::Right => (slack, 0),
        Alignment::Center => (slack / 2, slack - slack / 2),
    };
    let mut out = String::with_capacity(text.len() + slack);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(&text);
    out.extend(std::iter::repeat_n(' ', right));
    out
}

/// Plain text of one buffer row, trailing blanks trimmed. Handy in tests and golden dumps.
pub fn buffer_line(buf: &Buffer, y: u16) -> String {
    let area = buf.area;
    let mut out = String::new();
    for x in area.x..area.x + area.width {
        if let Some(cell) = buf.cell((x, y)) {
            out.push_str(cell.symbol());
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_adds_ellipsis_only_when_needed() {
        assert_eq!(truncate_to_width("abc", 3), "abc");
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("abc", 0), "");
        assert_eq!(truncate_to_width("你好世界", 5), "你好…");
    }

    #[test]
    fn align_pads_to_exact_width() {
        assert_eq!(align_in_width("ab", 5, Alignment::Left), "ab   ");
        assert_eq!(align_in_width("ab", 5, Alignment::Right), "   ab");
        assert_eq!(align_in_width("ab", 5, Alignment::Center), " ab  ");
        assert_eq!(display_width(&align_in_width("abcdefgh", 5, Alignment::Center)), 5);
    }

    #[test]
    fn clipped_write_respects_budget_and_offset() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        let n = render_str_clipped(0, 0, 2, 3, &mut buf, "abcdef", Style::default());
        assert_eq!(n, 3);
        assert_eq!(buffer_line(&buf, 0), "cde");
    }

    #[test]
    fn wide_char_that_does_not_fit_is_dropped() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        let n = render_str_clipped(0, 0, 0, 3, &mut buf, "a你好", Style::default());
        assert_eq!(n, 3);
        assert_eq!(buffer_line(&buf, 0), "a你");
    }

    #[test]
    fn render_scrollbar_does_not_panic() {
        let mut vp = RowViewport::default();
        vp.set_height(5);
        vp.set_len(50);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 5));
        render_scrollbar(Rect::new(0, 0, 1, 5), &mut buf, &vp, Style::default());
        render_scrollbar(Rect::new(0, 0, 0, 0), &mut buf, &vp, Style::default());
    }
}
