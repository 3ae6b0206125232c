/// Scoped transactional session
///
/// A `Session` owns one pooled connection with an open transaction. Nothing it
/// writes is visible to other connections until `commit`. Dropping a session
/// without committing rolls the transaction back, so every exit path
/// (early return, `?`, panic) releases the connection with no partial writes.

use crate::db::models::Bird;
use crate::db::Database;
use crate::error::Result;
use sqlx::{Sqlite, Transaction};
use tracing::debug;

pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Database {
    /// Open a session on this database
    ///
    /// Fails with `BirdError::Database` if no connection can be acquired.
    pub async fn session(&self) -> Result<Session> {
        let tx = self.pool().begin().await?;
        debug!("session opened");
        Ok(Session { tx })
    }
}

impl Session {
    /// Remove every bird, returning how many rows went away
    pub async fn delete_all_birds(&mut self) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM birds")
            .execute(&mut *self.tx)
            .await?;

        Ok(result.rows_affected())
    }

    /// Insert one bird and write the assigned id back into it
    pub async fn add(&mut self, bird: &mut Bird) -> sqlx::Result<i64> {
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
        .fetch_one(&mut *self.tx)
        .await?;

        bird.id = Some(id);
        Ok(id)
    }

    /// Insert birds in slice order
    pub async fn add_all(&mut self, birds: &mut [Bird]) -> sqlx::Result<()> {
        for bird in birds.iter_mut() {
            self.add(bird).await?;
        }
        Ok(())
    }

    /// All birds as seen from inside this session, ordered by id
    pub async fn birds(&mut self) -> sqlx::Result<Vec<Bird>> {
        sqlx::query_as::<_, Bird>("SELECT id, name, species, image FROM birds ORDER BY id")
            .fetch_all(&mut *self.tx)
            .await
    }

    /// Make every change in this session durable
    pub async fn commit(self) -> sqlx::Result<()> {
        self.tx.commit().await?;
        debug!("session committed");
        Ok(())
    }

    /// Discard every change in this session
    pub async fn rollback(self) -> sqlx::Result<()> {
        self.tx.rollback().await?;
        debug!("session rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count(db: &Database) -> i64 {
        db.stats().await.unwrap().total_birds
    }

    #[tokio::test]
    async fn test_add_assigns_ids_in_order() {
        let db = Database::new_test().await.unwrap();
        let mut session = db.session().await.unwrap();

        let mut birds = vec![
            Bird::named("Grackle", "Quiscalus Quiscula", "./images/grackle.jpeg"),
            Bird::named("Mourning Dove", "Zenaida Macroura", "./images/dove.jpeg"),
        ];
        session.add_all(&mut birds).await.unwrap();

        let first = birds[0].id.unwrap();
        let second = birds[1].id.unwrap();
        assert!(first < second);

        let seen = session.birds().await.unwrap();
        assert_eq!(seen, birds);

        session.commit().await.unwrap();
        assert_eq!(count(&db).await, 2);
    }

    #[tokio::test]
    async fn test_drop_without_commit_discards_changes() {
        let db = Database::new_test().await.unwrap();

        {
            let mut session = db.session().await.unwrap();
            let mut bird = Bird::named("Grackle", "Quiscalus Quiscula", "./images/grackle.jpeg");
            session.add(&mut bird).await.unwrap();
        }

        assert_eq!(count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_rollback_restores_deleted_rows() {
        let db = Database::new_test().await.unwrap();
        db.insert_bird(&Bird::named("Test", "Testus testus", "x.jpg"))
            .await
            .unwrap();

        let mut session = db.session().await.unwrap();
        assert_eq!(session.delete_all_birds().await.unwrap(), 1);
        assert!(session.birds().await.unwrap().is_empty());
        session.rollback().await.unwrap();

        assert_eq!(count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_delete_all_on_empty_table() {
        let db = Database::new_test().await.unwrap();
        let mut session = db.session().await.unwrap();
        assert_eq!(session.delete_all_birds().await.unwrap(), 0);
        session.commit().await.unwrap();
    }
}
