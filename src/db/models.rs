/// Data models for database entities
///
/// All models map to database tables and use sqlx for type-safe queries.

use serde::Serialize;
use serde_json::json;
use sqlx::FromRow;

/// A bird record from the `birds` table
///
/// `id` is `None` until the record has been inserted. Field values are taken
/// as given; nothing is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Bird {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub species: Option<String>,
    pub image: Option<String>, // path or URI, never read
}

impl Bird {
    /// Build an unsaved bird
    pub fn new(name: Option<String>, species: Option<String>, image: Option<String>) -> Self {
        Self {
            id: None,
            name,
            species,
            image,
        }
    }

    /// Build an unsaved bird with every field set
    pub fn named(name: &str, species: &str, image: &str) -> Self {
        Self::new(
            Some(name.to_string()),
            Some(species.to_string()),
            Some(image.to_string()),
        )
    }

    /// True once the database has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Serialize to the transmissible shape `{ id, name, species, image }`
    ///
    /// Every key is always present; unset values come out as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.name,
            "species": self.species,
            "image": self.image,
        })
    }

    /// Case-insensitive substring match on the common name
    pub fn name_matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }

        self.name
            .as_deref()
            .map(|name| name.to_lowercase().contains(&term.to_lowercase()))
            .unwrap_or(false)
    }

    /// (name, species, image) triple, handy for comparing content without ids
    pub fn fields(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        (
            self.name.as_deref(),
            self.species.as_deref(),
            self.image.as_deref(),
        )
    }
}

// Diagnostic form only. Never use it to compare birds.
impl std::fmt::Display for Bird {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<Bird {} | Species: {}>",
            self.name.as_deref().unwrap_or("None"),
            self.species.as_deref().unwrap_or("None")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bird_is_unsaved() {
        let bird = Bird::named("Grackle", "Quiscalus Quiscula", "./images/grackle.jpeg");
        assert_eq!(bird.id, None);
        assert!(!bird.is_persisted());
        assert_eq!(bird.name.as_deref(), Some("Grackle"));
    }

    #[test]
    fn test_to_json_has_every_field() {
        let bird = Bird::named("Grackle", "Quiscalus Quiscula", "./images/grackle.jpeg");
        let value = bird.to_json();
        let obj = value.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert!(obj["id"].is_null());
        assert_eq!(obj["name"], "Grackle");
        assert_eq!(obj["species"], "Quiscalus Quiscula");
        assert_eq!(obj["image"], "./images/grackle.jpeg");
    }

    #[test]
    fn test_to_json_after_persist() {
        let mut bird = Bird::new(None, Some("Zenaida Macroura".to_string()), None);
        bird.id = Some(7);
        let value = bird.to_json();

        assert_eq!(value["id"], 7);
        assert!(value["name"].is_null());
        assert!(value["image"].is_null());
        // derived Serialize produces the same shape
        assert_eq!(serde_json::to_value(&bird).unwrap(), value);
    }

    #[test]
    fn test_display() {
        let bird = Bird::named("Mourning Dove", "Zenaida Macroura", "./images/dove.jpeg");
        assert_eq!(bird.to_string(), "<Bird Mourning Dove | Species: Zenaida Macroura>");

        let empty = Bird::new(None, None, None);
        assert_eq!(empty.to_string(), "<Bird None | Species: None>");
    }

    #[test]
    fn test_accepts_any_text() {
        let long = "x".repeat(100_000);
        let bird = Bird::named("", &long, "not a path at all");
        assert_eq!(bird.name.as_deref(), Some(""));
        assert_eq!(bird.species.as_ref().map(|s| s.len()), Some(100_000));
    }

    #[test]
    fn test_name_matches() {
        let bird = Bird::named("Common Starling", "Sturnus Vulgaris", "./images/starling.jpeg");
        assert!(bird.name_matches("star"));
        assert!(bird.name_matches("COMMON"));
        assert!(bird.name_matches(""));
        assert!(!bird.name_matches("dove"));

        let nameless = Bird::new(None, None, None);
        assert!(nameless.name_matches(""));
        assert!(!nameless.name_matches("a"));
    }
}
