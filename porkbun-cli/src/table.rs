//! Plain-text tables
//!
//! Columns are aligned on display width (`unicode-width`), so IDN labels and
//! wide characters in TXT content do not break the layout.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Space between columns.
const GAP: &str = "  ";

const ELLIPSIS: &str = "...";

/// A table with a header row and a dashed rule under it.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing cells render empty, extra cells are dropped.
    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table, one line per row, each terminated by `\n`.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        let cell = cells.get(i).map_or("", String::as_str);
        line.push_str(cell);
        let padding = width.saturating_sub(cell.width());
        line.extend(std::iter::repeat_n(' ', padding));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Shorten `text` to at most `max_width` display columns, ending in `...` when cut.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut used = 0;
    let mut cut = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        cut.push(c);
    }
    cut.push_str(ELLIPSIS);
    cut
}

/// `Yes` / `No` cell.
pub fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

/// Cell for an optional number; empty when absent.
pub fn opt_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_on_widest_cell() {
        let mut table = Table::new(&["ID", "Type"]);
        table.row(vec!["1".to_string(), "A".to_string()]);
        table.row(vec!["12345".to_string(), "CNAME".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "ID     Type");
        assert_eq!(lines[1], "-----  -----");
        assert_eq!(lines[2], "1      A");
        assert_eq!(lines[3], "12345  CNAME");
    }

    #[test]
    fn wide_characters_count_double() {
        let mut table = Table::new(&["Name", "X"]);
        table.row(vec!["日本".to_string(), "1".to_string()]);
        table.row(vec!["abcd".to_string(), "2".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "日本  1");
        assert_eq!(lines[3], "abcd  2");
    }

    #[test]
    fn missing_cells_render_empty() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.row(vec!["x".to_string()]);
        assert!(table.render().lines().nth(2).is_some_and(|l| l == "x"));
    }

    #[test]
    fn truncate_short_text_untouched() {
        assert_eq!(truncate("v=spf1 -all", 50), "v=spf1 -all");
    }

    #[test]
    fn truncate_long_text_to_exact_width() {
        let long = "a".repeat(80);
        let cut = truncate(&long, 50);
        assert_eq!(cut.width(), 50);
        assert!(cut.ends_with("..."));
        assert!(cut.starts_with(&"a".repeat(47)));
    }

    #[test]
    fn truncate_never_splits_wide_char() {
        let cut = truncate("日本語テキスト", 8);
        assert_eq!(cut, "日本...");
    }

    #[test]
    fn cells() {
        assert_eq!(yes_no(true), "Yes");
        assert_eq!(opt_cell(Some(10)), "10");
        assert_eq!(opt_cell::<u32>(None), "");
    }
}
