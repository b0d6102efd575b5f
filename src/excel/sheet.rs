use crate::excel::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// An in-memory worksheet grid addressed with 1-based rows and columns.
///
/// `data[0]` and `data[r][0]` are padding so that indexes match the sheet's
/// own coordinates.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub data: Vec<Vec<CellValue>>,
    pub max_rows: usize,
    pub max_cols: usize,
}

impl Sheet {
    pub fn new(name: &str, max_rows: usize, max_cols: usize) -> Self {
        Self {
            name: name.to_string(),
            data: vec![vec![CellValue::Empty; max_cols + 1]; max_rows + 1],
            max_rows,
            max_cols,
        }
    }

    /// Builds a sheet from rows of values, the first row landing at row 1.
    pub fn from_rows<R, C>(name: &str, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<CellValue>,
    {
        let rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut sheet = Sheet::new(name, rows.len(), width);
        for (row_idx, row) in rows.into_iter().enumerate() {
            for (col_idx, value) in row.into_iter().enumerate() {
                sheet.data[row_idx + 1][col_idx + 1] = value;
            }
        }
        sheet
    }

    pub fn max_row(&self) -> usize {
        self.max_rows
    }

    pub fn max_column(&self) -> usize {
        self.max_cols
    }

    /// Returns the cell at `(row, col)`; anything outside the grid is empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        if row < 1 || col < 1 {
            return &EMPTY_CELL;
        }
        self.data
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if row < 1 || col < 1 {
            return;
        }
        if row >= self.data.len() {
            let width = self.max_cols.max(col) + 1;
            self.data.resize_with(row + 1, || vec![CellValue::Empty; width]);
            self.max_rows = row;
        }
        if col >= self.data[row].len() {
            self.data[row].resize(col + 1, CellValue::Empty);
        }
        self.max_cols = self.max_cols.max(col);
        self.data[row][col] = value;
    }

    /// Iterates over the cells of row `row`, columns `1..=max_cols`.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &CellValue> + '_ {
        (1..=self.max_cols).map(move |col| self.cell(row, col))
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        self.row(row).all(CellValue::is_empty)
    }

    /// Removes `row`, shifting every later row up by one.
    pub fn delete_row(&mut self, row: usize) {
        // Out-of-range deletes are a no-op
        if row < 1 || row > self.max_rows {
            return;
        }

        if row < self.data.len() {
            self.data.remove(row);
            self.max_rows -= 1;
        }
    }
}
