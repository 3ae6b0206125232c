/// Runtime configuration
///
/// The database location is resolved from, in order: an explicit override
/// (the `--db` flag), the `BIRDWATCH_DB` environment variable, and finally
/// `~/.birdwatch/birds.db`.

use crate::error::{BirdError, Result};
use std::path::PathBuf;

/// Environment variable naming the database file
pub const DB_ENV_VAR: &str = "BIRDWATCH_DB";

const DEFAULT_DIR: &str = ".birdwatch";
const DEFAULT_FILE: &str = "birds.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    /// Resolve configuration from the process environment
    pub fn load(db_override: Option<PathBuf>) -> Result<Self> {
        Self::resolve(
            db_override,
            std::env::var_os(DB_ENV_VAR).map(PathBuf::from),
            dirs::home_dir(),
        )
    }

    fn resolve(
        db_override: Option<PathBuf>,
        from_env: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Result<Self> {
        let database_path = db_override
            .or_else(|| from_env.filter(|p| !p.as_os_str().is_empty()))
            .or_else(|| home.map(|h| h.join(DEFAULT_DIR).join(DEFAULT_FILE)))
            .ok_or_else(|| {
                BirdError::Config(format!(
                    "no home directory found; pass --db or set {}",
                    DB_ENV_VAR
                ))
            })?;

        Ok(Self { database_path })
    }
}
