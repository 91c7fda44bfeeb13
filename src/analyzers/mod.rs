//! Aggregations over parsed coaster tables.
//!
//! Each submodule is a pure function over a [`crate::parser::Table`] or a
//! slice of numbers. [`analyzer`] wires them to files: read the input,
//! compute one result, and write it back out where a file is expected.

pub mod aggregate;
pub mod analyzer;
pub mod bucket;
pub mod filter;
pub mod frequency;
pub mod sort;
pub mod types;
pub mod utility;
