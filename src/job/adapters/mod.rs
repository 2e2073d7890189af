//! Adapter implementations for job ports.

pub mod memory;

mod http_processor;
mod validation;

pub use http_processor::HttpVideoProcessor;
pub use validation::{BAD_RANGE, ClipRangeValidator, INPUT_UNAVAILABLE};
