/// Resets the birds table to the demo catalog
///
/// Everything happens in one session: delete, insert four birds, commit.
/// Any failure rolls the whole thing back, so the table is either the old
/// content or the full catalog, never something in between.

use crate::db::{Bird, Database, Session};
use crate::error::{BirdError, Result, SeedPhase};
use std::sync::Arc;
use tracing::{info, warn};

/// The demo catalog as (name, species, image), in insert order
pub const SEED_BIRDS: [(&str, &str, &str); 4] = [
    (
        "Black-Capped Chickadee",
        "Poecile Atricapillus",
        "./images/black-capped-chickadee.jpeg",
    ),
    ("Grackle", "Quiscalus Quiscula", "./images/grackle.jpeg"),
    ("Common Starling", "Sturnus Vulgaris", "./images/starling.jpeg"),
    ("Mourning Dove", "Zenaida Macroura", "./images/dove.jpeg"),
];

/// Fresh, unsaved copies of the demo catalog
pub fn seed_birds() -> Vec<Bird> {
    SEED_BIRDS
        .iter()
        .map(|(name, species, image)| Bird::named(name, species, image))
        .collect()
}

/// What a successful seed run did
#[derive(Debug, Clone)]
pub struct SeedReport {
    /// Rows removed by the delete phase
    pub deleted: u64,
    /// The inserted birds with their new ids, in insert order
    pub birds: Vec<Bird>,
}

pub struct Seeder {
    db: Arc<Database>,
}

impl Seeder {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Delete every bird and insert the demo catalog, atomically
    ///
    /// A connection failure returns before anything is touched. A failure in
    /// any later phase rolls back and returns `BirdError::SeedFailed`.
    pub async fn run(&self) -> Result<SeedReport> {
        let mut session = self.db.session().await?;

        info!("Deleting existing birds...");
        let deleted = match session.delete_all_birds().await {
            Ok(n) => n,
            Err(source) => return Err(abort(session, SeedPhase::Delete, source).await),
        };
        info!(deleted, "Deleted existing birds");

        info!("Creating bird objects...");
        let mut birds = seed_birds();

        info!("Adding {} bird objects to transaction...", birds.len());
        if let Err(source) = session.add_all(&mut birds).await {
            return Err(abort(session, SeedPhase::Stage, source).await);
        }

        info!("Committing transaction...");
        // a failed commit drops the session, which rolls back
        session
            .commit()
            .await
            .map_err(|source| {
                warn!(error = %source, "commit failed, transaction rolled back");
                BirdError::SeedFailed {
                    phase: SeedPhase::Commit,
                    source,
                }
            })?;

        info!("Complete.");
        Ok(SeedReport { deleted, birds })
    }
}

async fn abort(session: Session, phase: SeedPhase, source: sqlx::Error) -> BirdError {
    warn!(%phase, error = %source, "seed failed, rolling back");

    // Dropping the session rolls back as well, so a failed explicit rollback
    // still leaves the table untouched.
    if let Err(e) = session.rollback().await {
        warn!(error = %e, "explicit rollback failed");
    }

    BirdError::SeedFailed { phase, source }
}
