/// birdwatch library
///
/// Bird catalog storage and the reset-and-seed procedure.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod error;

// Re-exports for convenience
pub use config::Config;
pub use db::{Bird, Database};
pub use error::{BirdError, Result};
