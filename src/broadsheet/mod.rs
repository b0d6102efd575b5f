//! Broadsheet schema inference and per-student result extraction.
//!
//! A broadsheet keeps one term's results per worksheet. Rows 2-4 form the
//! header: subject labels (each spanning three columns), the sub-column
//! labels under them (mid-term, exam, total, or an aggregate name), and the
//! reference maximum of each column. Student names run down column B from
//! row 5, and the teacher's and coordinator's comments follow the last data
//! column.

mod grade;
mod names;
mod normalize;
mod results;
mod schema;
mod students;

use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::error::Result;
use crate::excel::{open_workbook, Sheet, Workbook};

pub use grade::{get_grade, Grade};
pub use names::{to_internal, EXAM_SCORE, MID_TERM_SCORE, TOTAL_SCORE};
pub use normalize::remove_empty_first_rows;
pub use results::{
    get_aggregates_values, get_comment_value, get_subjects_scores_for_student, student_results,
    student_results_with_config, StudentResult, StudentResults, SubjectScore,
};
pub use schema::{
    get_broadsheet_schema, get_broadsheet_schema_with_config, BroadsheetSchema, ColumnRef,
    ColumnRole, HeaderColumn, ScanState, SubjectSchema,
};
pub use students::{students, StudentInfo, Students};

/// Everything extracted from one worksheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BroadsheetData {
    pub students_results: Vec<StudentResult>,
    pub broadsheet_schema: BroadsheetSchema,
}

/// Extracted worksheets keyed by term, in workbook order.
pub type BroadsheetsData = IndexMap<String, BroadsheetData>;

/// Worksheets large enough to hold a header and at least one student.
pub fn nonempty_worksheets<'a>(
    workbook: &'a mut Workbook,
    config: &'a ScanConfig,
) -> impl Iterator<Item = &'a mut Sheet> + 'a {
    workbook.sheets_mut().iter_mut().filter(move |sheet| {
        let keep = sheet.max_row() >= config.min_rows && sheet.max_column() >= config.min_columns;
        if !keep {
            debug!(
                sheet = %sheet.name,
                rows = sheet.max_row(),
                cols = sheet.max_column(),
                "skipping worksheet too small to be a broadsheet"
            );
        }
        keep
    })
}

/// Normalizes, maps and extracts a single worksheet.
pub fn extract_sheet_data(sheet: &mut Sheet, config: &ScanConfig) -> Result<BroadsheetData> {
    let sheet = remove_empty_first_rows(sheet);
    let schema = get_broadsheet_schema_with_config(sheet, config);

    for (subject, subject_schema) in &schema.subjects {
        if !subject_schema.is_complete() {
            warn!(
                term = %schema.term,
                subject = %subject,
                "subject is missing score columns; extraction fails if any student is present"
            );
        }
    }

    let students_results = student_results_with_config(sheet, Some(&schema), config)
        .collect::<Result<Vec<_>>>()?;

    info!(
        term = %schema.term,
        subjects = schema.subjects.len(),
        aggregates = schema.aggregates.len(),
        students = students_results.len(),
        "extracted worksheet"
    );

    Ok(BroadsheetData {
        students_results,
        broadsheet_schema: schema,
    })
}

/// Extracts every broadsheet of an already loaded workbook.
///
/// Worksheets resolving to the same term overwrite earlier ones.
pub fn extract_workbook_data(mut workbook: Workbook, config: &ScanConfig) -> Result<BroadsheetsData> {
    debug!(
        file = workbook.get_file_path(),
        sheets = workbook.sheets().len(),
        "extracting workbook"
    );
    let mut broadsheets_data = BroadsheetsData::new();

    for sheet in nonempty_worksheets(&mut workbook, config) {
        let data = extract_sheet_data(sheet, config)?;
        let term = data.broadsheet_schema.term.clone();

        if broadsheets_data.insert(term.clone(), data).is_some() {
            warn!(term = %term, sheet = %sheet.name, "duplicate term, keeping the later worksheet");
        }
    }

    Ok(broadsheets_data)
}

/// Loads the workbook at `path` and extracts all of its broadsheets.
pub fn extract_broadsheets_data<P: AsRef<Path>>(path: P) -> Result<BroadsheetsData> {
    extract_broadsheets_data_with_config(path, &ScanConfig::default())
}

pub fn extract_broadsheets_data_with_config<P: AsRef<Path>>(
    path: P,
    config: &ScanConfig,
) -> Result<BroadsheetsData> {
    let workbook = open_workbook(path)?;
    extract_workbook_data(workbook, config)
}
