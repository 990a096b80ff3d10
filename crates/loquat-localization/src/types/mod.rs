//! Enumerated catalog types with localizable accessors

pub mod calendar;

pub use calendar::{Day, Month, Season};
