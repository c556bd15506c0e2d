//! Domain models for the review-signals system.

mod descriptor;
mod events;
mod review;

pub use descriptor::*;
pub use events::*;
pub use review::*;
