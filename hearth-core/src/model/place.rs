use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A rentable property listing, owned by a user and located in a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Place {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub number_rooms: i32,
    pub number_bathrooms: i32,
    pub max_guest: i32,
    pub price_by_night: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Place {
    /// New listing with zeroed counters and no coordinates.
    pub fn new(
        name: impl Into<String>,
        city_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
        }
    }

    pub(crate) const CREATE_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS places (
            id VARCHAR(60) NOT NULL,
            created_at DATETIME(6) NOT NULL,
            updated_at DATETIME(6) NOT NULL,
            city_id VARCHAR(60) NOT NULL,
            user_id VARCHAR(60) NOT NULL,
            name VARCHAR(128) NOT NULL,
            description VARCHAR(1024) NULL,
            number_rooms INT NOT NULL DEFAULT 0,
            number_bathrooms INT NOT NULL DEFAULT 0,
            max_guest INT NOT NULL DEFAULT 0,
            price_by_night INT NOT NULL DEFAULT 0,
            latitude DOUBLE NULL,
            longitude DOUBLE NULL,
            PRIMARY KEY (id),
            FOREIGN KEY (city_id) REFERENCES cities (id),
            FOREIGN KEY (user_id) REFERENCES users (id)
        )
    "#;
}

/// Join table for the many-to-many place/amenity relationship.
///
/// No model maps to it; rows exist only to link the two sides.
pub(crate) const PLACE_AMENITY_TABLE: &str = "place_amenity";

pub(crate) const CREATE_PLACE_AMENITY: &str = r#"
    CREATE TABLE IF NOT EXISTS place_amenity (
        place_id VARCHAR(60) NOT NULL,
        amenity_id VARCHAR(60) NOT NULL,
        PRIMARY KEY (place_id, amenity_id),
        FOREIGN KEY (place_id) REFERENCES places (id),
        FOREIGN KEY (amenity_id) REFERENCES amenities (id)
    )
"#;
