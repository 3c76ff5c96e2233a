//! Plain-text tables for human output

/// Render rows under a header with space-padded columns.
///
/// The first `text_columns` columns are left-aligned; the rest hold marks and
/// are right-aligned.
pub fn render(header: &[String], rows: &[Vec<String>], text_columns: usize) -> String {
    let width = header.len();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().take(width).enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, header, &widths, text_columns);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths, text_columns);
    for row in rows {
        push_line(&mut out, row, &widths, text_columns);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize], text_columns: usize) {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, w)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            if i < text_columns {
                format!("{:<w$}", cell, w = *w)
            } else {
                format!("{:>w$}", cell, w = *w)
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Display form of an optional mark
pub fn mark_cell(mark: Option<u32>) -> String {
    mark.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string())
}
