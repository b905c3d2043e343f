use crate::{Dataset, FeatureSubset, SelectError, SelectResult};

/// Euclidean distance between two rows, restricted to the given columns.
///
/// Over zero columns the distance is 0.
pub fn euclidean_distance(columns: &[&[f64]], a: usize, b: usize) -> f64 {
    let mut o = 0.;
    for column in columns {
        o += (column[a] - column[b]).powi(2);
    }
    o.sqrt()
}

/// Collect the columns of the subset, in ascending feature order so the summation order
/// doesn't depend on the order the features were added.
fn subset_columns<'a>(
    dataset: &'a Dataset,
    subset: &FeatureSubset,
) -> SelectResult<Vec<&'a [f64]>> {
    subset
        .sorted()
        .into_iter()
        .map(|feature| dataset.feature(feature))
        .collect()
}

/// Index of the closest other row. Rows are scanned in ascending order and the first minimum
/// wins, so with no column at all, or if every distance overflowed to infinity, it is the first
/// row that is not `row`.
fn nearest(columns: &[&[f64]], n_rows: usize, row: usize) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for other in (0..n_rows).filter(|&other| other != row) {
        let distance = euclidean_distance(columns, row, other);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((other, distance)),
        }
    }
    // A dataset has at least 2 rows
    best.map_or(row, |(other, _)| other)
}

/// Nearest other row of `row` when only the features of `subset` are considered.
pub fn nearest_neighbor(
    dataset: &Dataset,
    subset: &FeatureSubset,
    row: usize,
) -> SelectResult<usize> {
    if row >= dataset.n_rows() {
        return Err(SelectError::InvalidRowIndex {
            index: row,
            n_rows: dataset.n_rows(),
        });
    }
    let columns = subset_columns(dataset, subset)?;
    Ok(nearest(&columns, dataset.n_rows(), row))
}

/// Leave-one-out accuracy of the 1-nearest-neighbor classifier on the features of `subset`.
///
/// Every row is classified with the label of its closest other row. The features are used
/// with their raw values, there is no scaling.
pub fn evaluate(dataset: &Dataset, subset: &FeatureSubset) -> SelectResult<f64> {
    let columns = subset_columns(dataset, subset)?;
    let labels = dataset.labels();
    let n_rows = dataset.n_rows();

    let mut n_correct = 0;
    for row in 0..n_rows {
        if labels[row] == labels[nearest(&columns, n_rows, row)] {
            n_correct += 1;
        }
    }
    Ok(n_correct as f64 / n_rows as f64)
}
