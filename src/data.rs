use crate::{ColumnMajorMatrix, FeatureSubset, SelectError, SelectResult};
use failure::{Error, ResultExt};
use std::fs;
use std::path::Path;

/// Util for parsing a numeric table without headers into a dataset.
///
/// Fields are separated by whitespace and/or commas, blank lines are skipped.
/// The first column must be the class label.
pub fn parse_table(data: &str) -> Result<Dataset, Error> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (n_line, l) in data.lines().enumerate() {
        let items: Vec<&str> = l
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|item| !item.is_empty())
            .collect();
        if items.is_empty() {
            continue;
        }
        let mut row = Vec::with_capacity(items.len());
        for item in items {
            let val = item
                .parse::<f64>()
                .with_context(|_| format!("line {}: {:?} is not a number", n_line + 1, item))?;
            row.push(val);
        }
        rows.push(row);
    }
    Ok(Dataset::from_rows(rows)?)
}

/// Read and parse a table from the disk. See `parse_table` for the format.
pub fn load_table(path: impl AsRef<Path>) -> Result<Dataset, Error> {
    let path = path.as_ref();
    let data =
        fs::read_to_string(path).with_context(|_| format!("cannot read {}", path.display()))?;
    let dataset =
        parse_table(&data).with_context(|_| format!("cannot load {}", path.display()))?;
    Ok(dataset)
}

/// Store the raw data: one class label and `n_features` real values per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Class of every row. Compared with `==`, so it's typically an integral value.
    labels: Vec<f64>,
    /// Feature `i` (1-based) is the column `i - 1`
    features: ColumnMajorMatrix<f64>,
}

impl Dataset {
    /// Build a dataset from rows where the first item is the label and the others the features.
    ///
    /// Fails if there are less than 2 rows, no feature, rows of different lengths
    /// or non-finite values.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> SelectResult<Dataset> {
        if rows.len() < 2 {
            return Err(SelectError::malformed(format!(
                "leave-one-out needs at least 2 rows, got {}",
                rows.len()
            )));
        }
        let width = rows[0].len();
        if width < 2 {
            return Err(SelectError::malformed(
                "rows need a label and at least one feature",
            ));
        }
        for (n_row, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SelectError::malformed(format!(
                    "row {} has {} columns, expected {}",
                    n_row + 1,
                    row.len(),
                    width
                )));
            }
            if let Some(col) = row.iter().position(|val| !val.is_finite()) {
                return Err(SelectError::malformed(format!(
                    "row {} column {} is not a finite number",
                    n_row + 1,
                    col
                )));
            }
        }

        let mut labels = Vec::with_capacity(rows.len());
        let features: Vec<Vec<f64>> = rows
            .into_iter()
            .map(|mut row| {
                labels.push(row.remove(0));
                row
            })
            .collect();
        Ok(Dataset {
            labels,
            features: ColumnMajorMatrix::from_rows(features),
        })
    }

    pub fn n_rows(&self) -> usize {
        self.features.n_rows()
    }

    /// Number of features, the label excluded.
    pub fn n_features(&self) -> usize {
        self.features.n_cols()
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    /// Values of the feature `feature`, 1-based.
    pub fn feature(&self, feature: usize) -> SelectResult<&[f64]> {
        self.check_feature(feature)?;
        Ok(self.features.column(feature - 1))
    }

    /// The subset {1, ..., n_features}.
    pub fn all_features(&self) -> FeatureSubset {
        (1..=self.n_features()).collect()
    }

    pub(crate) fn check_feature(&self, feature: usize) -> SelectResult<()> {
        if feature == 0 || feature > self.n_features() {
            return Err(SelectError::InvalidFeatureIndex {
                index: feature,
                n_features: self.n_features(),
            });
        }
        Ok(())
    }
}
