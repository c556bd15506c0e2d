//! NLP service layer for review-signals.
//!
//! The deterministic core feeds exact text to phrase-extraction,
//! topic-classification and sentiment services and consumes their outputs
//! unmodified. This crate defines those service seams, a deterministic
//! co-occurrence phrase extractor usable without any model, and the
//! keyword post-processing path.

pub mod keywords;
pub mod rake;
pub mod services;

pub use keywords::*;
pub use rake::*;
pub use services::*;
