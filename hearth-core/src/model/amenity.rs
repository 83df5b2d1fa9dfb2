use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bookable feature a place can offer (wifi, parking, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Amenity {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

impl Amenity {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }

    pub(crate) const CREATE_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS amenities (
            id VARCHAR(60) NOT NULL,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            name VARCHAR(128) NOT NULL,
            PRIMARY KEY (id)
        )
    "#;
}
