//! Builders for broadsheet workbooks written to a temporary directory.

use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::{Path, PathBuf};

/// A cell to write, addressed with 1-based row and column like the reader.
pub enum Value {
    Text(&'static str),
    Number(f64),
}

pub struct SheetSpec {
    pub name: &'static str,
    pub cells: Vec<(u32, u16, Value)>,
}

impl SheetSpec {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cells: Vec::new(),
        }
    }

    pub fn text(mut self, row: u32, col: u16, value: &'static str) -> Self {
        self.cells.push((row, col, Value::Text(value)));
        self
    }

    pub fn number(mut self, row: u32, col: u16, value: f64) -> Self {
        self.cells.push((row, col, Value::Number(value)));
        self
    }

    /// Writes `values` across a row starting at column `first_col`.
    pub fn numbers(mut self, row: u32, first_col: u16, values: &[f64]) -> Self {
        for (offset, value) in values.iter().enumerate() {
            self.cells
                .push((row, first_col + offset as u16, Value::Number(*value)));
        }
        self
    }
}

pub fn write_workbook(dir: &Path, file_name: &str, sheets: &[SheetSpec]) -> Result<PathBuf, XlsxError> {
    let mut workbook = Workbook::new();

    for spec in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(spec.name)?;
        for (row, col, value) in &spec.cells {
            match value {
                Value::Text(text) => worksheet.write_string(row - 1, col - 1, *text)?,
                Value::Number(number) => worksheet.write_number(row - 1, col - 1, *number)?,
            };
        }
    }

    let path = dir.join(file_name);
    workbook.save(&path)?;
    Ok(path)
}

/// One "Science" subject in C..E and a "Total" aggregate in F, below
/// `blank_rows` empty rows, with `students` starting right after the header.
pub fn science_term(
    name: &'static str,
    blank_rows: u32,
    students: &[(&'static str, [f64; 4])],
) -> SheetSpec {
    let top = blank_rows + 1;
    let mut sheet = SheetSpec::new(name)
        .text(top, 1, "Greenfield Secondary School")
        .text(top + 1, 3, "Science")
        .text(top + 2, 3, "Mid")
        .text(top + 2, 4, "Exam")
        .text(top + 2, 5, "Total")
        .text(top + 2, 6, "Total")
        .text(top + 2, 7, "Teacher's Comment")
        .text(top + 2, 8, "Coordinator's Comment")
        .numbers(top + 3, 3, &[30.0, 70.0, 100.0, 200.0]);

    for (offset, (student, scores)) in students.iter().enumerate() {
        let row = top + 4 + offset as u32;
        sheet = sheet.text(row, 2, *student).numbers(row, 3, scores);
    }
    sheet
}
