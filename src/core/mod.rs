/// Core functionality modules
///
/// Contains the reset-and-seed procedure for the bird catalog.

pub mod seeder;

pub use seeder::{seed_birds, SeedReport, Seeder, SEED_BIRDS};
