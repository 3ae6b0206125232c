/// SQL query functions for database operations
///
/// Single-statement reads and writes that run outside a session.

use crate::db::models::*;
use crate::db::Database;
use crate::error::Result;
use tracing::debug;

impl Database {
    /// Insert one bird and return it with its assigned id
    ///
    /// # Arguments
    /// * `bird` - Bird to insert; its `id` is ignored
    ///
    /// # Returns
    /// * `Ok(Bird)` - The persisted bird
    /// * `Err(BirdError)` - If database operation fails
    pub async fn insert_bird(&self, bird: &Bird) -> Result<Bird> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO birds (name, species, image)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&bird.name)
        .bind(&bird.species)
        .bind(&bird.image)
        .fetch_one(self.pool())
        .await?;

        debug!(id, "inserted bird");

        Ok(Bird {
            id: Some(id),
            ..bird.clone()
        })
    }

    /// Get every bird, oldest first
    pub async fn list_birds(&self) -> Result<Vec<Bird>> {
        let birds = sqlx::query_as::<_, Bird>(
            "SELECT id, name, species, image FROM birds ORDER BY id",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(birds)
    }

    /// Get birds whose name contains `term`, ignoring case
    ///
    /// Filtering happens in Rust so non-ASCII names match the same way they do
    /// in `Bird::name_matches`.
    pub async fn search_birds(&self, term: &str) -> Result<Vec<Bird>> {
        let birds = self
            .list_birds()
            .await?
            .into_iter()
            .filter(|bird| bird.name_matches(term))
            .collect();

        Ok(birds)
    }

    /// Get a bird by id
    pub async fn get_bird(&self, id: i64) -> Result<Option<Bird>> {
        let bird = sqlx::query_as::<_, Bird>(
            "SELECT id, name, species, image FROM birds WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(bird)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new_test().await.unwrap();

        let saved = db
            .insert_bird(&Bird::named("Grackle", "Quiscalus Quiscula", "./images/grackle.jpeg"))
            .await
            .unwrap();
        assert!(saved.is_persisted());

        let fetched = db.get_bird(saved.id.unwrap()).await.unwrap();
        assert_eq!(fetched, Some(saved));
    }

    #[tokio::test]
    async fn test_get_missing_bird() {
        let db = Database::new_test().await.unwrap();
        assert_eq!(db.get_bird(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicates_and_odd_values_allowed() {
        let db = Database::new_test().await.unwrap();
        let long = "a".repeat(50_000);

        let first = db.insert_bird(&Bird::named("", &long, "")).await.unwrap();
        let second = db.insert_bird(&Bird::named("", &long, "")).await.unwrap();
        let blank = db.insert_bird(&Bird::new(None, None, None)).await.unwrap();

        assert_ne!(first.id, second.id);

        let birds = db.list_birds().await.unwrap();
        assert_eq!(birds, vec![first, second, blank]);
        assert_eq!(birds[0].species.as_ref().map(|s| s.len()), Some(50_000));
        assert_eq!(birds[2].to_json()["name"], serde_json::Value::Null);
    }

    #[tokio::test]
    async fn test_search_birds() {
        let db = Database::new_test().await.unwrap();
        db.insert_bird(&Bird::named("Common Starling", "Sturnus Vulgaris", "./images/starling.jpeg"))
            .await
            .unwrap();
        db.insert_bird(&Bird::named("Mourning Dove", "Zenaida Macroura", "./images/dove.jpeg"))
            .await
            .unwrap();

        let found = db.search_birds("DOVE").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.as_deref(), Some("Mourning Dove"));

        assert_eq!(db.search_birds("").await.unwrap().len(), 2);
        assert!(db.search_birds("heron").await.unwrap().is_empty());
    }
}
