//! Row-level analytics over annotated reviews.

mod cohort;
mod evolution;
mod exclusion;
mod markers;

pub use cohort::*;
pub use evolution::*;
pub use exclusion::*;
pub use markers::*;
