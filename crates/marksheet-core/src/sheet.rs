//! Spreadsheet ingestion
//!
//! Workbooks (`.xlsx`, `.xlsm`, `.xls`, `.xlsb`, `.ods`) are read with calamine
//! from their first worksheet; anything else is treated as delimited text.
//! Either way the result is a header row plus string cells, trimmed and
//! aligned to a common width.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use calamine::{open_workbook_auto, DataType, Reader};

use crate::error::{MarksheetError, Result};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// A materialized sheet: row 0 as headers, the rest as cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut sheet = Self { headers, rows };
        sheet.align();
        sheet
    }

    /// Pad or cut every row (and the header) to the widest row
    fn align(&mut self) {
        let width = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        self.headers.resize(width, String::new());
        for row in &mut self.rows {
            row.resize(width, String::new());
        }
    }
}

/// Read a spreadsheet file from disk
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    let start = Instant::now();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let sheet = if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_workbook(path)?
    } else {
        read_delimited(path)?
    };
    crate::trace_time!(start, "read_sheet", kind = extension.as_str());

    tracing::debug!(
        columns = sheet.headers.len(),
        rows = sheet.rows.len(),
        "sheet loaded"
    );
    Ok(sheet)
}

fn read_workbook(path: &Path) -> Result<Sheet> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| MarksheetError::Spreadsheet("workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| {
            MarksheetError::Spreadsheet(format!("unable to read worksheet '{}'", sheet_name))
        })??;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| MarksheetError::Spreadsheet("worksheet is empty".to_string()))?
        .iter()
        .map(cell_to_string)
        .collect();

    let rows = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|values| values.iter().any(|v| !v.is_empty()))
        .collect();

    Ok(Sheet::new(headers, rows))
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        _ => cell.to_string().trim().to_string(),
    }
}

fn read_delimited(path: &Path) -> Result<Sheet> {
    let delimiter = detect_delimiter(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    parse_records(&mut reader)
}

/// Parse delimited text already in memory
pub fn parse_delimited(text: &str, delimiter: u8) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    parse_records(&mut reader)
}

fn parse_records<R: std::io::Read>(reader: &mut csv::Reader<R>) -> Result<Sheet> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|value| value.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let values: Vec<String> = record?
            .iter()
            .map(|value| value.trim().to_string())
            .collect();
        if values.iter().all(|value| value.is_empty()) {
            continue;
        }
        rows.push(values);
    }

    Ok(Sheet::new(headers, rows))
}

/// Pick comma, semicolon or tab by whichever is most frequent in the header line
fn detect_delimiter(path: &Path) -> Result<u8> {
    let file = File::open(path)?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line)?;
    Ok(delimiter_for(&first_line))
}

fn delimiter_for(line: &str) -> u8 {
    [b',', b';', b'\t']
        .into_iter()
        .max_by_key(|d| (line.bytes().filter(|b| b == d).count(), *d == b','))
        .unwrap_or(b',')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_delimited_trims_and_skips_blank_rows() {
        let text = "Name , Seat No,Total\n Asha ,1XX20CS001, 45 \n,,\nRavi,1XX20CS002,38\n";
        let sheet = parse_delimited(text, b',').unwrap();
        assert_eq!(sheet.headers, vec!["Name", "Seat No", "Total"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0], vec!["Asha", "1XX20CS001", "45"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let text = "Name,Seat No,Total\nAsha,1XX20CS001\n";
        let sheet = parse_delimited(text, b',').unwrap();
        assert_eq!(sheet.rows[0], vec!["Asha", "1XX20CS001", ""]);
    }

    #[test]
    fn test_delimiter_detection() {
        assert_eq!(delimiter_for("a,b,c"), b',');
        assert_eq!(delimiter_for("a;b;c"), b';');
        assert_eq!(delimiter_for("a\tb\tc"), b'\t');
        assert_eq!(delimiter_for("single"), b',');
    }

    #[test]
    fn test_read_semicolon_file_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("marks.csv");
        fs::write(&path, "Name;Seat No;Total\nAsha;1XX20CS001;45\n").unwrap();

        let sheet = read_sheet(&path).unwrap();
        assert_eq!(sheet.headers, vec!["Name", "Seat No", "Total"]);
        assert_eq!(sheet.rows, vec![vec!["Asha", "1XX20CS001", "45"]]);
    }

    #[test]
    fn test_read_workbook_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("marks.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        {
            let worksheet = workbook.add_worksheet();
            for (col, header) in ["Name", "Seat No", "Total"].iter().enumerate() {
                worksheet.write_string(0, col as u16, *header).unwrap();
            }
            worksheet.write_string(1, 0, " Asha ").unwrap();
            worksheet.write_number(1, 1, 12345).unwrap();
            worksheet.write_number(1, 2, 45.0).unwrap();
            // row 2 left empty
            worksheet.write_string(3, 0, "Ravi").unwrap();
            worksheet.write_string(3, 1, "1XX20CS002").unwrap();
        }
        workbook.save(&path).unwrap();

        let sheet = read_sheet(&path).unwrap();
        assert_eq!(sheet.headers, vec!["Name", "Seat No", "Total"]);
        assert_eq!(
            sheet.rows,
            vec![
                vec!["Asha", "12345", "45"],
                vec!["Ravi", "1XX20CS002", ""],
            ]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(read_sheet(&dir.path().join("absent.csv")).is_err());
    }
}
