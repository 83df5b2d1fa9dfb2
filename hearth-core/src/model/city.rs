use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A city inside a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub state_id: String,
}

impl City {
    pub fn new(name: impl Into<String>, state_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            name: name.into(),
            state_id: state_id.into(),
        }
    }

    pub(crate) const CREATE_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS cities (
            id VARCHAR(60) NOT NULL,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            name VARCHAR(128) NOT NULL,
            state_id VARCHAR(60) NOT NULL,
            PRIMARY KEY (id),
            FOREIGN KEY (state_id) REFERENCES states (id)
        )
    "#;
}
