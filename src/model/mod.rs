// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod date;
pub mod wire;

// Re-export types so callers can use `crate::model::DateTriple` directly
pub use date::{Conversion, DateTriple, Direction};
