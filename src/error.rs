use std::{error, fmt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Error raised when a dataset or a feature subset can't be evaluated.
///
/// We define a specific type instead of a boxed dyn Error so it stays Send + Sync, and can be
/// returned from inside Rayon closures.
pub enum SelectError {
    /// The table has ragged rows, less than 2 rows, no feature column or a non-finite value.
    MalformedDataset(String),
    /// A feature index outside of 1..=n_features.
    InvalidFeatureIndex { index: usize, n_features: usize },
    /// A row index outside of 0..n_rows.
    InvalidRowIndex { index: usize, n_rows: usize },
}

impl SelectError {
    pub(crate) fn malformed(msg: impl Into<String>) -> SelectError {
        SelectError::MalformedDataset(msg.into())
    }
}

impl fmt::Display for SelectError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectError::MalformedDataset(msg) => write!(f, "malformed dataset: {}", msg),
            SelectError::InvalidFeatureIndex { index, n_features } => write!(
                f,
                "invalid feature index {}, expected a value in 1..={}",
                index, n_features
            ),
            SelectError::InvalidRowIndex { index, n_rows } => {
                write!(f, "invalid row index {} for a dataset of {} rows", index, n_rows)
            }
        }
    }
}

impl error::Error for SelectError {}

pub type SelectResult<T> = Result<T, SelectError>;
