use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's writeup about a place they stayed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub text: String,
    pub place_id: String,
    pub user_id: String,
}

impl Review {
    pub fn new(
        text: impl Into<String>,
        place_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            text: text.into(),
            place_id: place_id.into(),
            user_id: user_id.into(),
        }
    }

    pub(crate) const CREATE_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id VARCHAR(60) NOT NULL,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            text VARCHAR(1024) NOT NULL,
            place_id VARCHAR(60) NOT NULL,
            user_id VARCHAR(60) NOT NULL,
            PRIMARY KEY (id),
            FOREIGN KEY (place_id) REFERENCES places (id),
            FOREIGN KEY (user_id) REFERENCES users (id)
        )
    "#;
}
