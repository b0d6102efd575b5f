use tracing::debug;

use crate::excel::Sheet;

/// Deletes fully empty rows from the top of the sheet until row 1 holds a value.
///
/// Header detection relies on fixed row offsets, so this runs before any
/// schema extraction. Running it again is a no-op.
pub fn remove_empty_first_rows(sheet: &mut Sheet) -> &mut Sheet {
    let mut removed = 0;
    while sheet.max_row() > 0 && sheet.is_row_empty(1) {
        sheet.delete_row(1);
        removed += 1;
    }

    if removed > 0 {
        debug!(sheet = %sheet.name, removed, "removed leading empty rows");
    }
    sheet
}
