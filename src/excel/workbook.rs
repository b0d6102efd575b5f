use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

use crate::error::{BroadsheetError, Result};
use crate::excel::{CellValue, Sheet};

/// Every worksheet of a loaded workbook, in workbook order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    file_path: String,
}

pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    let mut workbook = open_workbook_auto(path_ref).map_err(|source| BroadsheetError::Load {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|source| BroadsheetError::Load {
                path: path_ref.to_path_buf(),
                source,
            })?;

        let sheet = create_sheet_from_range(name, &range);
        debug!(
            sheet = %name,
            rows = sheet.max_rows,
            cols = sheet.max_cols,
            "loaded worksheet"
        );
        sheets.push(sheet);
    }

    Ok(Workbook {
        sheets,
        file_path: path_str,
    })
}

fn create_sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    // The used range may start below/right of A1; keep absolute coordinates
    let (start_row, start_col) = match range.start() {
        Some((row, col)) => (row as usize, col as usize),
        None => return Sheet::new(name, 0, 0),
    };
    let (height, width) = range.get_size();

    let mut sheet = Sheet::new(name, start_row + height, start_col + width);

    for (row_idx, col_idx, cell) in range.used_cells() {
        let value = match cell {
            Data::Empty => continue,
            // Keep the error code so a row of #REF! cells is not blank
            Data::Error(e) => CellValue::Text(e.to_string()),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Float(*f),
            Data::Int(i) => CellValue::Int(*i),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        };

        sheet.data[start_row + row_idx + 1][start_col + col_idx + 1] = value;
    }

    sheet
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self {
            sheets,
            file_path: String::new(),
        }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheets_mut(&mut self) -> &mut [Sheet] {
        &mut self.sheets
    }

    pub fn get_file_path(&self) -> &str {
        &self.file_path
    }
}
