use serde::Serialize;

use crate::config::ScanConfig;
use crate::excel::Sheet;
use crate::utils::title_case;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentInfo {
    pub name: String,
    pub row: usize,
}

/// Walks the name column below the header, skipping blank rows.
///
/// Each call to [`students`] starts a fresh scan.
#[derive(Debug, Clone)]
pub struct Students<'a> {
    sheet: &'a Sheet,
    column: usize,
    next_row: usize,
    last_row: usize,
}

impl<'a> Students<'a> {
    pub fn new(sheet: &'a Sheet, config: &ScanConfig) -> Self {
        Self {
            sheet,
            column: config.name_column,
            next_row: config.first_student_row,
            last_row: sheet.max_row(),
        }
    }
}

impl Iterator for Students<'_> {
    type Item = StudentInfo;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_row <= self.last_row {
            let row = self.next_row;
            self.next_row += 1;

            let cell = self.sheet.cell(row, self.column);
            if !cell.is_truthy() {
                continue;
            }
            if let Some(name) = cell.as_text() {
                return Some(StudentInfo {
                    name: title_case(name.trim()),
                    row,
                });
            }
        }
        None
    }
}

pub fn students(sheet: &Sheet) -> Students<'_> {
    Students::new(sheet, &ScanConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excel::CellValue;

    fn roster() -> Sheet {
        let mut sheet = Sheet::new("Term1", 10, 3);
        sheet.set_cell(4, 2, CellValue::from("Header"));
        sheet.set_cell(5, 2, CellValue::from("  john DOE "));
        sheet.set_cell(7, 2, CellValue::from("ada lovelace"));
        sheet.set_cell(8, 2, CellValue::from(""));
        sheet.set_cell(10, 2, CellValue::from("grace hopper"));
        sheet
    }

    #[test]
    fn skips_blank_rows_and_title_cases_names() {
        let sheet = roster();
        let found: Vec<StudentInfo> = students(&sheet).collect();

        assert_eq!(
            found,
            vec![
                StudentInfo { name: "John Doe".into(), row: 5 },
                StudentInfo { name: "Ada Lovelace".into(), row: 7 },
                StudentInfo { name: "Grace Hopper".into(), row: 10 },
            ]
        );
    }

    #[test]
    fn restarts_from_scratch() {
        let sheet = roster();
        let mut first = students(&sheet);
        first.next();

        assert_eq!(students(&sheet).count(), 3);
        assert_eq!(first.count(), 2);
    }

    #[test]
    fn honours_the_configured_name_column() {
        let mut sheet = roster();
        sheet.set_cell(6, 1, CellValue::from("alan turing"));
        let config = ScanConfig {
            name_column: 1,
            ..ScanConfig::default()
        };

        let names: Vec<String> = Students::new(&sheet, &config).map(|s| s.name).collect();
        assert_eq!(names, vec!["Alan Turing"]);
    }
}
