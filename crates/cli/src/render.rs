//! Plain-text table rendering for terminal output.

use crate::util::{display_width, pad_right};

const MIN_COL: usize = 3;
const MAX_COL: usize = 40;

/// Print an aligned table: header, dashed rule, rows. Columns size to
/// content, clamped so one long operator name can't blow up the layout.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(display_width(cell));
            }
        }
    }
    for w in &mut widths {
        *w = (*w).clamp(MIN_COL, MAX_COL);
    }

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| pad_right(h, w))
        .collect();
    println!("{}", header_line.join("  ").trim_end());

    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", rule.join("  "));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(c, &w)| pad_right(c, w))
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

/// Section banner for multi-table output.
pub(crate) fn print_section(kind: &str, name: &str) {
    if name.is_empty() {
        println!("== {kind} ==");
    } else {
        println!("== {kind}: {name} ==");
    }
}

/// Display form of a parsed value: integral values drop the fraction,
/// everything else prints shortest-form.
pub(crate) fn fmt_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_display_forms() {
        assert_eq!(fmt_value(90.0), "90");
        assert_eq!(fmt_value(98.5), "98.5");
        assert_eq!(fmt_value(0.0), "0");
        assert_eq!(fmt_value(2.5), "2.5");
        assert_eq!(fmt_value(-3.0), "-3");
    }
}
