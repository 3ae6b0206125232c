/// Error types for birdwatch
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for birdwatch operations
#[derive(Error, Debug)]
pub enum BirdError {
    /// Database-related errors (connection, constraint, commit)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (creating the database directory, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed command-line arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A seed phase failed and its transaction was rolled back
    #[error("Seed failed during {phase} phase: {source}")]
    SeedFailed {
        phase: SeedPhase,
        #[source]
        source: sqlx::Error,
    },
}

/// Steps of the reset-and-seed procedure that touch storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPhase {
    Delete,
    Stage,
    Commit,
}

impl std::fmt::Display for SeedPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SeedPhase::Delete => "delete",
            SeedPhase::Stage => "stage",
            SeedPhase::Commit => "commit",
        };
        write!(f, "{}", s)
    }
}

/// Result type alias for birdwatch operations
pub type Result<T> = std::result::Result<T, BirdError>;

/// Convert BirdError to a user-friendly error message
impl BirdError {
    pub fn user_message(&self) -> String {
        match self {
            BirdError::Database(e) => {
                format!("Database error occurred. Check the database path. Details: {}", e)
            }
            BirdError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            BirdError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            BirdError::InvalidArgument(msg) => {
                format!("Invalid argument: {}. Run 'birdwatch help' for usage", msg)
            }
            BirdError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            BirdError::SeedFailed { phase, source } => {
                format!(
                    "Seeding failed while running the {} phase; no changes were kept. Details: {}",
                    phase, source
                )
            }
        }
    }
}
