use indexmap::IndexMap;
use serde::Serialize;
use std::borrow::Cow;
use tracing::warn;

use crate::broadsheet::grade::{get_grade, Grade};
use crate::broadsheet::names::{EXAM_SCORE, MID_TERM_SCORE, TOTAL_SCORE};
use crate::broadsheet::schema::{
    get_broadsheet_schema_with_config, BroadsheetSchema, ColumnRef, SubjectSchema,
};
use crate::broadsheet::students::Students;
use crate::config::ScanConfig;
use crate::error::{BroadsheetError, Result};
use crate::excel::{CellValue, Sheet};
use crate::utils::{cell_reference, round_to_one_decimal};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectScore {
    pub mid_term_score: Option<f64>,
    pub exam_score: Option<f64>,
    pub total_score: Option<f64>,
    pub grade: Option<Grade>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentResult {
    pub term: String,
    pub student: String,
    pub subjects: IndexMap<String, SubjectScore>,
    pub aggregates: IndexMap<String, Option<f64>>,
    pub teachers_comment: Option<String>,
    pub coordinators_comment: Option<String>,
}

fn score_value(sheet: &Sheet, row: usize, col: usize) -> Option<f64> {
    let cell = sheet.cell(row, col);
    let value = cell.as_number();
    if let (None, CellValue::Text(text)) = (value, cell) {
        if !text.trim().is_empty() {
            warn!(cell = %cell_reference((row, col)), value = %text, "non-numeric score treated as absent");
        }
    }
    value
}

fn required(subject: &str, column: Option<ColumnRef>, field: &'static str) -> Result<ColumnRef> {
    column.ok_or_else(|| BroadsheetError::SchemaInconsistency {
        subject: subject.to_string(),
        field,
    })
}

/// Reads each subject's three score columns on `row` and grades the total.
///
/// A subject without all three score columns is reported as a schema
/// inconsistency rather than producing partial scores.
pub fn get_subjects_scores_for_student(
    sheet: &Sheet,
    row: usize,
    subjects: &IndexMap<String, SubjectSchema>,
) -> Result<IndexMap<String, SubjectScore>> {
    let mut scores = IndexMap::with_capacity(subjects.len());

    for (subject, schema) in subjects {
        let mid_term = required(subject, schema.mid_term_score, MID_TERM_SCORE)?;
        let exam = required(subject, schema.exam_score, EXAM_SCORE)?;
        let total = required(subject, schema.total_score, TOTAL_SCORE)?;

        let total_score = score_value(sheet, row, total.column);
        scores.insert(
            subject.clone(),
            SubjectScore {
                mid_term_score: score_value(sheet, row, mid_term.column),
                exam_score: score_value(sheet, row, exam.column),
                total_score,
                grade: get_grade(total_score),
            },
        );
    }

    Ok(scores)
}

/// Reads each aggregate on `row`, rounded to one decimal place.
///
/// Zero is reported as absent, the same as an empty cell.
pub fn get_aggregates_values(
    sheet: &Sheet,
    row: usize,
    aggregates: &IndexMap<String, ColumnRef>,
) -> IndexMap<String, Option<f64>> {
    aggregates
        .iter()
        .map(|(name, column)| {
            let value = score_value(sheet, row, column.column)
                .filter(|v| *v != 0.0)
                .map(round_to_one_decimal);
            (name.clone(), value)
        })
        .collect()
}

pub fn get_comment_value(sheet: &Sheet, row: usize, col: usize) -> Option<String> {
    let cell = sheet.cell(row, col);
    if !cell.is_truthy() {
        return None;
    }
    cell.as_text().map(|text| text.trim().to_string())
}

/// Yields one [`StudentResult`] per student row of the sheet.
pub struct StudentResults<'a> {
    sheet: &'a Sheet,
    schema: Cow<'a, BroadsheetSchema>,
    students: Students<'a>,
}

impl StudentResults<'_> {
    fn result_for(&self, name: String, row: usize) -> Result<StudentResult> {
        let schema = self.schema.as_ref();
        let comment = |column: Option<ColumnRef>| {
            column.and_then(|c| get_comment_value(self.sheet, row, c.column))
        };

        Ok(StudentResult {
            term: schema.term.clone(),
            student: name,
            subjects: get_subjects_scores_for_student(self.sheet, row, &schema.subjects)?,
            aggregates: get_aggregates_values(self.sheet, row, &schema.aggregates),
            teachers_comment: comment(schema.teachers_comment),
            coordinators_comment: comment(schema.coordinators_comment),
        })
    }
}

impl Iterator for StudentResults<'_> {
    type Item = Result<StudentResult>;

    fn next(&mut self) -> Option<Self::Item> {
        let student = self.students.next()?;
        Some(self.result_for(student.name, student.row))
    }
}

/// Extracts every student's result, inferring the schema when none is given.
pub fn student_results<'a>(
    sheet: &'a Sheet,
    schema: Option<&'a BroadsheetSchema>,
) -> StudentResults<'a> {
    student_results_with_config(sheet, schema, &ScanConfig::default())
}

pub fn student_results_with_config<'a>(
    sheet: &'a Sheet,
    schema: Option<&'a BroadsheetSchema>,
    config: &ScanConfig,
) -> StudentResults<'a> {
    let schema = match schema {
        Some(schema) => Cow::Borrowed(schema),
        None => Cow::Owned(get_broadsheet_schema_with_config(sheet, config)),
    };

    StudentResults {
        sheet,
        schema,
        students: Students::new(sheet, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadsheet::schema::get_broadsheet_schema;
    use pretty_assertions::assert_eq;

    /// Term1: Science in C..E, "Total" aggregate in F, comments in G and H.
    fn science_sheet() -> Sheet {
        let mut sheet = Sheet::new("Term1", 4, 8);
        let mut put = |row: usize, col: usize, value: CellValue| sheet.set_cell(row, col, value);

        put(1, 1, "Greenfield School".into());
        put(2, 3, "Science".into());
        for (col, sub_title) in [(3, "Mid"), (4, "Exam"), (5, "Total"), (6, "Total")] {
            put(3, col, sub_title.into());
        }
        put(3, 7, "Teacher's Comment".into());
        put(3, 8, "Coordinator's Comment".into());
        put(4, 3, 30.into());
        put(4, 4, 70.into());
        put(4, 5, 100.into());

        put(5, 2, "john doe".into());
        put(5, 3, 70.into());
        put(5, 4, 80.into());
        put(5, 5, 75.into());
        put(5, 6, 150.into());
        put(5, 7, "  Good effort. ".into());

        put(7, 2, "ada".into());
        put(7, 3, "ABS".into());
        put(7, 5, 84.96.into());
        put(7, 6, 0.into());
        put(7, 8, "Excellent".into());
        sheet
    }

    #[test]
    fn extracts_scores_aggregates_and_comments() {
        let sheet = science_sheet();
        let results: Vec<StudentResult> = student_results(&sheet, None)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(results.len(), 2);
        let john = &results[0];
        assert_eq!(john.term, "Term1");
        assert_eq!(john.student, "John Doe");
        assert_eq!(
            john.subjects["science"],
            SubjectScore {
                mid_term_score: Some(70.0),
                exam_score: Some(80.0),
                total_score: Some(75.0),
                grade: Some(Grade::B),
            }
        );
        assert_eq!(john.aggregates["total_score"], Some(150.0));
        assert_eq!(john.teachers_comment.as_deref(), Some("Good effort."));
        assert_eq!(john.coordinators_comment, None);
    }

    #[test]
    fn missing_values_degrade_to_none() {
        let sheet = science_sheet();
        let schema = get_broadsheet_schema(&sheet);
        let ada = student_results(&sheet, Some(&schema))
            .nth(1)
            .unwrap()
            .unwrap();

        let science = &ada.subjects["science"];
        assert_eq!(science.mid_term_score, None);
        assert_eq!(science.exam_score, None);
        assert_eq!(science.grade, Some(Grade::A));
        // zero aggregates collapse to absent
        assert_eq!(ada.aggregates["total_score"], None);
        assert_eq!(ada.teachers_comment, None);
        assert_eq!(ada.coordinators_comment.as_deref(), Some("Excellent"));
    }

    #[test]
    fn aggregates_round_to_one_decimal() {
        let sheet = Sheet::from_rows("Term1", vec![vec![CellValue::Empty, CellValue::from(72.46)]]);
        let mut aggregates = IndexMap::new();
        aggregates.insert("average %".to_string(), ColumnRef::new(2, None));
        aggregates.insert("missing".to_string(), ColumnRef::new(9, None));

        let values = get_aggregates_values(&sheet, 1, &aggregates);
        assert_eq!(values["average %"], Some(72.5));
        assert_eq!(values["missing"], None);
    }

    #[test]
    fn incomplete_subject_is_a_schema_inconsistency() {
        let sheet = science_sheet();
        let mut schema = get_broadsheet_schema(&sheet);
        schema.subjects["science"].exam_score = None;

        let err = student_results(&sheet, Some(&schema))
            .next()
            .unwrap()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "schema inconsistency for subject science: missing exam_score column"
        );
    }

    #[test]
    fn comments_are_absent_without_comment_columns() {
        let mut sheet = science_sheet();
        for col in 3..=8 {
            sheet.set_cell(3, col, CellValue::Empty);
        }
        sheet.set_cell(2, 3, CellValue::Empty);

        let results: Vec<StudentResult> = student_results(&sheet, None)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].subjects.is_empty());
        assert_eq!(results[0].teachers_comment, None);
    }

    #[test]
    fn blank_comment_text_trims_to_empty() {
        let sheet = Sheet::from_rows("Term1", vec![vec![CellValue::from("   ")]]);
        assert_eq!(get_comment_value(&sheet, 1, 1).as_deref(), Some(""));
        assert_eq!(get_comment_value(&sheet, 1, 2), None);
    }
}
