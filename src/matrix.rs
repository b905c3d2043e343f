/// Store a dense matrix in a column-major way.
///
/// The evaluator reads a few feature columns at a time, so keeping each column contiguous
/// makes the distance loop a walk over plain slices.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMajorMatrix<A> {
    /// Number of rows in the matrix
    n_rows: usize,
    /// Number of columns in the matrix
    n_cols: usize,
    /// Values, one column after the other
    values: Vec<A>,
}

impl<A> ColumnMajorMatrix<A> {
    /// All the columns must have the same length.
    fn from_columns(columns: Vec<Vec<A>>) -> Self {
        let n_cols = columns.len();
        let n_rows = columns.first().map_or(0, |c| c.len());
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for column in columns {
            assert_eq!(column.len(), n_rows, "columns of different lengths");
            values.extend(column)
        }
        Self {
            n_rows,
            n_cols,
            values,
        }
    }

    /// All the rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<A>>) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        let mut columns: Vec<Vec<A>> = (0..n_cols).map(|_| Vec::with_capacity(n_rows)).collect();
        for row in rows {
            assert_eq!(row.len(), n_cols, "rows of different lengths");
            for (column, item) in columns.iter_mut().zip(row) {
                column.push(item)
            }
        }
        Self::from_columns(columns)
    }

    pub fn column(&self, col: usize) -> &[A] {
        let start = col * self.n_rows;
        &self.values[start..start + self.n_rows]
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }
}
