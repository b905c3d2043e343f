//! Greedy feature selection with a leave-one-out 1-nearest-neighbor accuracy.
//!
//! ```no_run
//! use rselect::{forward_select, load_table};
//!
//! let dataset = load_table("data.txt").unwrap();
//! let selection = forward_select(&dataset).unwrap();
//! println!("{} {:.3}", selection.best_subset, selection.best_accuracy);
//! ```

extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate ordered_float;
extern crate rayon;
#[macro_use]
extern crate serde_derive;

mod data;
mod error;
mod knn;
mod matrix;
pub mod report;
mod select;
mod subset;

pub use crate::data::*;
pub use crate::error::*;
pub use crate::knn::*;
pub use crate::matrix::*;
pub use crate::select::*;
pub use crate::subset::*;
