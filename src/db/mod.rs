/// Database module for birdwatch
///
/// Handles all database operations using SQLite and sqlx.
/// Implements connection pooling for performance.

pub mod connection;
pub mod models;
pub mod queries;
pub mod session;

pub use connection::{Database, DatabaseStats};
pub use models::*;
pub use session::Session;
