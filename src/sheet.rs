// File: ./src/sheet.rs
// Spreadsheet boundary: a `Date` column in, a `Converted Date` column out.
use crate::model::DateTriple;
use anyhow::{Context, Result};
use calamine::{DataType, Reader, Xlsx, open_workbook};
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y-%m-%d %H:%M:%S",
];

/// One input row: the original cell text (carried through to the output
/// unchanged) and the date parsed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    pub text: String,
    pub date: DateTriple,
}

/// Read the ordered rows of the first sheet, locating the `Date` column by
/// header. Fully empty rows are skipped; a non-empty row whose date cell is
/// unreadable aborts with the row number.
pub fn read_rows(path: &Path) -> Result<Vec<InputRow>> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).with_context(|| format!("cannot open {}", path.display()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("workbook has no sheets")?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("sheet '{}' not readable", sheet_name))??;

    let mut rows = range.rows();
    let header = rows.next().context("sheet is empty")?;
    let date_col = header
        .iter()
        .position(|c| c.to_string().trim().eq_ignore_ascii_case("date"))
        .context("no 'Date' column in the first sheet")?;

    let mut out = Vec::new();
    for (i, row) in rows.enumerate() {
        if row.iter().all(|c| matches!(c, DataType::Empty)) {
            continue;
        }
        let cell = row.get(date_col).unwrap_or(&DataType::Empty);
        let date = parse_cell(cell)
            .with_context(|| format!("row {}: unreadable date '{}'", i + 2, cell))?;
        out.push(InputRow {
            text: cell.to_string(),
            date,
        });
    }
    Ok(out)
}

fn parse_cell(cell: &DataType) -> Option<DateTriple> {
    if let DataType::String(s) = cell {
        let s = s.trim();
        for format in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(s, format) {
                return Some(DateTriple::new(d.year(), d.month(), d.day()));
            }
        }
        return None;
    }
    // Native Excel datetime cells (and serial floats) via calamine's dates feature
    cell.as_datetime()
        .map(|dt| DateTriple::new(dt.year(), dt.month(), dt.day()))
}

/// Write the augmented workbook: original `Date` column plus `Converted Date`.
/// An absence marker stays a blank cell; no placeholder is ever substituted.
pub fn write_rows(path: &Path, rows: &[InputRow], results: &[Option<DateTriple>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Converted Dates")?;

    let bold = Format::new().set_bold();
    sheet.write_string_with_format(0, 0, "Date", &bold)?;
    sheet.write_string_with_format(0, 1, "Converted Date", &bold)?;

    for (i, (row, result)) in rows.iter().zip(results).enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, row.text.as_str())?;
        if let Some(date) = result {
            sheet.write_string(r, 1, date.to_string())?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}
