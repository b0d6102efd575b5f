//! Extracts structured student results from school result broadsheets.
//!
//! Broadsheet layouts differ from sheet to sheet, so the column map is
//! inferred from the header rows of each worksheet (see [`broadsheet`]) and
//! then applied row by row to every student.

pub mod broadsheet;
pub mod config;
pub mod error;
pub mod excel;
pub mod logging;
pub mod utils;

pub use broadsheet::{
    extract_broadsheets_data, extract_broadsheets_data_with_config, extract_workbook_data,
    BroadsheetData, BroadsheetSchema, BroadsheetsData, Grade, StudentResult,
};
pub use config::ScanConfig;
pub use error::{BroadsheetError, Result};
