use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{BroadsheetError, Result};

/// Widest sheet an xlsx workbook can hold (column XFD).
pub const MAX_COLUMN: usize = 16384;

/// Where the header window, the name column and the student rows live.
///
/// The defaults describe the standard broadsheet layout: subject labels on
/// row 2, sub-column labels on row 3, reference maxima on row 4, student names
/// in column B from row 5, and a header scan over columns C..=KN.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// First column of the header scan
    pub first_column: usize,
    /// Last column of the header scan (inclusive)
    pub last_column: usize,
    /// Physical columns spanned by one subject label
    pub group_width: usize,
    pub title_row: usize,
    pub sub_title_row: usize,
    pub overall_row: usize,
    pub name_column: usize,
    pub first_student_row: usize,
    /// Sheets with fewer rows than this are skipped
    pub min_rows: usize,
    /// Sheets with fewer columns than this are skipped
    pub min_columns: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            first_column: 3,
            last_column: 300,
            group_width: 3,
            title_row: 2,
            sub_title_row: 3,
            overall_row: 4,
            name_column: 2,
            first_student_row: 5,
            min_rows: 5,
            min_columns: 3,
        }
    }
}

impl ScanConfig {
    /// Reads a TOML file; keys it leaves out keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: ScanConfig = toml::from_str(&content).map_err(|e| BroadsheetError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Defaults, with `BROADSHEET_LAST_COLUMN` overriding the scan cap.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            last_column: std::env::var("BROADSHEET_LAST_COLUMN")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| (default.first_column..=MAX_COLUMN).contains(v))
                .unwrap_or(default.last_column),
            ..default
        }
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let invalid = |message: &str| BroadsheetError::Config {
            path: path.to_path_buf(),
            message: message.to_string(),
        };

        if self.group_width == 0 {
            return Err(invalid("group_width must be at least 1"));
        }
        if self.first_column == 0 || self.last_column < self.first_column {
            return Err(invalid("last_column must not precede first_column"));
        }
        if self.last_column > MAX_COLUMN {
            return Err(invalid("last_column is beyond the last worksheet column (16384)"));
        }
        if self.title_row == 0 || self.sub_title_row == 0 || self.overall_row == 0 {
            return Err(invalid("header rows are 1-based"));
        }
        if self.name_column == 0 || self.first_student_row == 0 {
            return Err(invalid("name_column and first_student_row are 1-based"));
        }
        Ok(())
    }
}
