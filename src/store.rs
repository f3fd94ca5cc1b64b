//! Dated-snapshot workbook persistence.
//!
//! Each persist call is one read-modify-write of the whole file: every
//! existing sheet is loaded, the capture-date sheet gains the batch's rows
//! (with a single header per date), and the workbook is rewritten through
//! a temporary file renamed into place. Exactly one process is assumed to
//! write to a given path at a time; concurrent writers may race.

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Local, NaiveDate};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use tracing::info;

use crate::error::StorageError;
use crate::models::CaptureBatch;

pub const HEADER: [&str; 5] = ["Title", "Ship", "Price", "Dates", "Duration"];

const COLUMN_WIDTHS: [f64; 5] = [40.0, 25.0, 12.0, 25.0, 10.0];

#[derive(Debug, Clone)]
struct SheetData {
    name: String,
    rows: Vec<Vec<String>>,
}

/// Persist `batch` under today's date.
pub fn persist(batch: &CaptureBatch, path: &Path) -> Result<(), StorageError> {
    persist_on(batch, path, Local::now().date_naive())
}

/// Persist `batch` into the sheet named after `date` (ISO `YYYY-MM-DD`).
///
/// An empty batch is a no-op: the file is neither read nor written.
pub fn persist_on(batch: &CaptureBatch, path: &Path, date: NaiveDate) -> Result<(), StorageError> {
    if batch.is_empty() {
        return Ok(());
    }

    let sheet_key = date.format("%Y-%m-%d").to_string();
    let mut sheets = load_sheets(path)?;

    let idx = match sheets.iter().position(|s| s.name == sheet_key) {
        Some(idx) => idx,
        None => {
            sheets.push(SheetData {
                name: sheet_key.clone(),
                rows: Vec::new(),
            });
            sheets.len() - 1
        }
    };

    let sheet = &mut sheets[idx];
    if sheet.rows.is_empty() {
        sheet.rows.push(HEADER.iter().map(|h| h.to_string()).collect());
    }
    for record in &batch.records {
        sheet.rows.push(record.to_row());
    }

    write_sheets(&sheets, path)?;
    info!(
        "Appended {} rows to sheet {} in {}",
        batch.scraped(),
        sheet_key,
        path.display()
    );
    Ok(())
}

/// Load every sheet from an existing workbook; a missing file is an empty
/// workbook with zero sheets.
fn load_sheets(path: &Path) -> Result<Vec<SheetData>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name)?;
        let rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();
        sheets.push(SheetData { name, rows });
    }
    Ok(sheets)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rewrite the whole workbook. Saves to a temporary sibling path first and
/// renames over the target, so a crash mid-write leaves the prior file
/// intact.
fn write_sheets(sheets: &[SheetData], path: &Path) -> Result<(), StorageError> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x000080))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new().set_border(FormatBorder::Thin);

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let format = if row_idx == 0 {
                &header_format
            } else {
                &cell_format
            };
            for (col_idx, cell) in row.iter().enumerate() {
                worksheet.write_with_format(row_idx as u32, col_idx as u16, cell, format)?;
            }
        }
    }

    let tmp = tmp_path(path);
    if let Err(e) = workbook.save(&tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "workbook.xlsx".into());
    name.push(".tmp");
    path.with_file_name(name)
}
