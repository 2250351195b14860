pub mod analysis;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod parse;
pub mod pipeline;

pub use error::{PatronError, Result};
pub use pipeline::{Analysis, analyze, analyze_draws};
