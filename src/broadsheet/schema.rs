use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::broadsheet::names::{to_internal, EXAM_SCORE, MID_TERM_SCORE, TOTAL_SCORE};
use crate::config::{ScanConfig, MAX_COLUMN};
use crate::excel::{CellValue, Sheet};
use crate::utils::{index_to_col_name, title_case};

/// A resolved worksheet column plus the reference maximum written under it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnRef {
    pub column: usize,
    pub overall: Option<f64>,
}

impl ColumnRef {
    pub fn new(column: usize, overall: Option<f64>) -> Self {
        Self { column, overall }
    }
}

/// Score columns of one subject. A malformed header can leave any of them out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubjectSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mid_term_score: Option<ColumnRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_score: Option<ColumnRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<ColumnRef>,
    /// Sub-columns with labels other than the three score columns
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub others: IndexMap<String, ColumnRef>,
}

impl SubjectSchema {
    /// Stores `column` under the canonical sub-column name `key`.
    pub fn insert(&mut self, key: &str, column: ColumnRef) {
        match key {
            MID_TERM_SCORE => self.mid_term_score = Some(column),
            EXAM_SCORE => self.exam_score = Some(column),
            TOTAL_SCORE => self.total_score = Some(column),
            _ => {
                self.others.insert(key.to_string(), column);
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.mid_term_score.is_some() && self.exam_score.is_some() && self.total_score.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BroadsheetSchema {
    pub term: String,
    pub subjects: IndexMap<String, SubjectSchema>,
    pub aggregates: IndexMap<String, ColumnRef>,
    pub teachers_comment: Option<ColumnRef>,
    pub coordinators_comment: Option<ColumnRef>,
}

impl BroadsheetSchema {
    /// Teacher's and coordinator's comment columns, when any data column exists.
    pub fn comment_columns(&self) -> Option<(usize, usize)> {
        match (self.teachers_comment, self.coordinators_comment) {
            (Some(teachers), Some(coordinators)) => Some((teachers.column, coordinators.column)),
            _ => None,
        }
    }
}

/// The three header cells above one physical column.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderColumn {
    pub column: usize,
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub overall: Option<f64>,
}

impl HeaderColumn {
    pub fn read(sheet: &Sheet, column: usize, config: &ScanConfig) -> Self {
        Self {
            column,
            title: header_text(sheet.cell(config.title_row, column)),
            sub_title: header_text(sheet.cell(config.sub_title_row, column)),
            overall: sheet.cell(config.overall_row, column).as_number(),
        }
    }
}

fn header_text(cell: &CellValue) -> Option<String> {
    if cell.is_truthy() { cell.as_text() } else { None }
}

/// What a header column turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRole {
    /// A column of `subject`; `field` is `None` for a labelled column with no
    /// sub-title, which only registers the subject.
    Subject {
        subject: String,
        field: Option<String>,
    },
    Aggregate(String),
    Ignored,
}

/// State carried across the header scan.
///
/// A subject label is written once, above the first of its columns; the
/// following columns of the same group inherit it as the active title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanState {
    pub active_title: Option<String>,
    pub last_data_column: Option<usize>,
}

impl ScanState {
    /// Starts a new column group; titles never carry across groups.
    pub fn start_group(&mut self) {
        self.active_title = None;
    }

    pub fn classify(&mut self, header: &HeaderColumn) -> ColumnRole {
        if let Some(title) = &header.title {
            let subject = to_internal(title);
            self.active_title = Some(subject.clone());
            return ColumnRole::Subject {
                subject,
                field: header.sub_title.as_deref().map(to_internal),
            };
        }

        match (&self.active_title, header.sub_title.as_deref()) {
            (_, None) => ColumnRole::Ignored,
            (None, Some(sub_title)) => {
                let name = to_internal(sub_title);
                // Comment columns sit after the last data column, not among aggregates
                if name.contains("comment") {
                    ColumnRole::Ignored
                } else {
                    ColumnRole::Aggregate(name)
                }
            }
            (Some(subject), Some(sub_title)) => ColumnRole::Subject {
                subject: subject.clone(),
                field: Some(to_internal(sub_title)),
            },
        }
    }

    /// Classifies `header` and records it in `schema`.
    pub fn apply(&mut self, schema: &mut BroadsheetSchema, header: &HeaderColumn) {
        let column = ColumnRef::new(header.column, header.overall);

        match self.classify(header) {
            ColumnRole::Subject { subject, field } => {
                if !schema.subjects.contains_key(&subject) {
                    debug!(
                        term = %schema.term,
                        subject = %subject,
                        column = %index_to_col_name(header.column),
                        "registered subject"
                    );
                }
                let subject_schema = schema.subjects.entry(subject).or_default();
                if let Some(field) = field {
                    subject_schema.insert(&field, column);
                    self.last_data_column = Some(header.column);
                }
            }
            ColumnRole::Aggregate(name) => {
                debug!(
                    term = %schema.term,
                    aggregate = %name,
                    column = %index_to_col_name(header.column),
                    "registered aggregate"
                );
                schema.aggregates.insert(name, column);
                self.last_data_column = Some(header.column);
            }
            ColumnRole::Ignored => {}
        }
    }
}

/// Infers the broadsheet layout of `sheet` with the standard scan window.
pub fn get_broadsheet_schema(sheet: &Sheet) -> BroadsheetSchema {
    get_broadsheet_schema_with_config(sheet, &ScanConfig::default())
}

pub fn get_broadsheet_schema_with_config(sheet: &Sheet, config: &ScanConfig) -> BroadsheetSchema {
    let mut schema = BroadsheetSchema {
        term: title_case(sheet.name.trim()),
        ..Default::default()
    };

    let width = config.group_width.max(1);
    let last = config.last_column.min(MAX_COLUMN);
    let state = (config.first_column..=last)
        .step_by(width)
        .map(|start| start..=(start + width - 1).min(last))
        .fold(ScanState::default(), |mut state, group| {
            state.start_group();
            for column in group {
                state.apply(&mut schema, &HeaderColumn::read(sheet, column, config));
            }
            state
        });

    if let Some(last) = state.last_data_column {
        schema.teachers_comment = Some(ColumnRef::new(last + 1, None));
        schema.coordinators_comment = Some(ColumnRef::new(last + 2, None));
    }

    schema
}
