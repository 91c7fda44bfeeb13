pub mod analyzers;
pub mod coaster;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;

pub use error::{Error, Result};
