//! Volume indicators: trailing volume average

pub mod average;

pub use average::*;
