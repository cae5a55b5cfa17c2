//! Plain-text table layout measured in terminal columns.
//!
//! Hangul and other wide characters take two columns, so widths come from
//! `unicode-width` rather than `str::len`.

use console::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow before cells are cut with an ellipsis.
pub const MAX_COLUMN_WIDTH: usize = 32;

const GAP: &str = "  ";

/// Truncates `s` to at most `max_width` columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Pads `s` on the right to `width` columns. Longer strings are left as is.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}

/// A table of already-formatted cells.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    highlighted: Vec<bool>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Table::default()
        }
    }

    /// Adds a row. Highlighted rows are drawn emphasised when styled.
    pub fn push_row(&mut self, cells: Vec<String>, highlighted: bool) {
        self.rows.push(
            cells
                .iter()
                .map(|c| truncate_to_width(c, MAX_COLUMN_WIDTH))
                .collect(),
        );
        self.highlighted.push(highlighted);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(cell.width()),
                    None => widths.push(cell.width()),
                }
            }
        }
        widths
    }

    /// Lays the table out, one line per row after the header line.
    pub fn render(&self, styled: bool) -> String {
        let widths = self.column_widths();
        let header_style = Style::new().bold().force_styling(styled);
        let highlight_style = Style::new().green().force_styling(styled);

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        let header = layout_line(&self.headers, &widths);
        lines.push(header_style.apply_to(header).to_string());

        for (row, highlighted) in self.rows.iter().zip(&self.highlighted) {
            let line = layout_line(row, &widths);
            if *highlighted {
                lines.push(highlight_style.apply_to(line).to_string());
            } else {
                lines.push(line);
            }
        }
        lines.join("\n")
    }
}

// Pads every cell but the last, so lines carry no trailing spaces.
fn layout_line(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if i == last {
                cell.clone()
            } else {
                pad_right(cell, widths.get(i).copied().unwrap_or(0))
            }
        })
        .collect::<Vec<_>>()
        .join(GAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangul_is_two_columns_wide() {
        assert_eq!(pad_right("김철수", 8), "김철수  ");
        assert_eq!(pad_right("kim", 5), "kim  ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }

    #[test]
    fn truncation_respects_wide_characters() {
        assert_eq!(truncate_to_width("Hello", 10), "Hello");
        assert_eq!(truncate_to_width("Hello World", 6), "Hello…");
        // 4 columns of room for text: two syllables
        assert_eq!(truncate_to_width("가나다라", 5), "가나…");
    }

    #[test]
    fn columns_line_up() {
        let mut table = Table::new(["이름", "기수"]);
        table.push_row(vec!["김철수".into(), "23.5기".into()], false);
        table.push_row(vec!["Lee".into(), "22.0기".into()], false);

        let out = table.render(false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "이름    기수");
        assert_eq!(lines[1], "김철수  23.5기");
        assert_eq!(lines[2], "Lee     22.0기");
    }

    #[test]
    fn unstyled_render_has_no_escapes() {
        let mut table = Table::new(["a"]);
        table.push_row(vec!["x".into()], true);
        assert!(!table.render(false).contains('\x1b'));
        assert!(!table.is_empty());
    }
}
