//! Entity SQL: one explicit statement per kind.
//!
//! Columns are always listed out so a schema drifting from the models fails
//! loudly at the first statement instead of silently misbinding.

use hearth_core::{Amenity, City, Entity, EntityKind, Place, Review, State, User};
use sqlx::mysql::MySqlPool;
use sqlx::{MySql, Transaction};

/// Insert one staged record inside the caller's transaction.
pub(crate) async fn insert(tx: &mut Transaction<'_, MySql>, entity: &Entity) -> sqlx::Result<()> {
    match entity {
        Entity::User(user) => {
            sqlx::query(
                r#"
                INSERT INTO users
                    (id, created_at, updated_at, email, password, first_name, last_name)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&user.id)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(&user.email)
            .bind(&user.password)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .execute(&mut **tx)
            .await?;
        }
        Entity::State(state) => {
            sqlx::query(
                r#"
                INSERT INTO states (id, created_at, updated_at, name)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&state.id)
            .bind(state.created_at)
            .bind(state.updated_at)
            .bind(&state.name)
            .execute(&mut **tx)
            .await?;
        }
        Entity::City(city) => {
            sqlx::query(
                r#"
                INSERT INTO cities (id, created_at, updated_at, name, state_id)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&city.id)
            .bind(city.created_at)
            .bind(city.updated_at)
            .bind(&city.name)
            .bind(&city.state_id)
            .execute(&mut **tx)
            .await?;
        }
        Entity::Amenity(amenity) => {
            sqlx::query(
                r#"
                INSERT INTO amenities (id, created_at, updated_at, name)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&amenity.id)
            .bind(amenity.created_at)
            .bind(amenity.updated_at)
            .bind(&amenity.name)
            .execute(&mut **tx)
            .await?;
        }
        Entity::Place(place) => {
            sqlx::query(
                r#"
                INSERT INTO places
                    (id, created_at, updated_at, city_id, user_id, name, description,
                     number_rooms, number_bathrooms, max_guest, price_by_night,
                     latitude, longitude)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&place.id)
            .bind(place.created_at)
            .bind(place.updated_at)
            .bind(&place.city_id)
            .bind(&place.user_id)
            .bind(&place.name)
            .bind(&place.description)
            .bind(place.number_rooms)
            .bind(place.number_bathrooms)
            .bind(place.max_guest)
            .bind(place.price_by_night)
            .bind(place.latitude)
            .bind(place.longitude)
            .execute(&mut **tx)
            .await?;
        }
        Entity::Review(review) => {
            sqlx::query(
                r#"
                INSERT INTO reviews (id, created_at, updated_at, text, place_id, user_id)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&review.id)
            .bind(review.created_at)
            .bind(review.updated_at)
            .bind(&review.text)
            .bind(&review.place_id)
            .bind(&review.user_id)
            .execute(&mut **tx)
            .await?;
        }
    }
    Ok(())
}

/// Delete one record by identity inside the caller's transaction.
///
/// Deleting an absent row affects zero rows and is not an error.
pub(crate) async fn delete(
    tx: &mut Transaction<'_, MySql>,
    kind: EntityKind,
    id: &str,
) -> sqlx::Result<()> {
    let sql = format!("DELETE FROM {} WHERE id = ?", kind.table());
    sqlx::query(&sql).bind(id).execute(&mut **tx).await?;
    Ok(())
}

/// Every committed row of one kind.
pub(crate) async fn fetch_all(pool: &MySqlPool, kind: EntityKind) -> sqlx::Result<Vec<Entity>> {
    let entities: Vec<Entity> = match kind {
        EntityKind::User => sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, password, first_name, last_name
            FROM users
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Entity::User)
        .collect(),
        EntityKind::State => {
            sqlx::query_as::<_, State>("SELECT id, created_at, updated_at, name FROM states")
                .fetch_all(pool)
                .await?
                .into_iter()
                .map(Entity::State)
                .collect()
        }
        EntityKind::City => sqlx::query_as::<_, City>(
            "SELECT id, created_at, updated_at, name, state_id FROM cities",
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Entity::City)
        .collect(),
        EntityKind::Amenity => {
            sqlx::query_as::<_, Amenity>("SELECT id, created_at, updated_at, name FROM amenities")
                .fetch_all(pool)
                .await?
                .into_iter()
                .map(Entity::Amenity)
                .collect()
        }
        EntityKind::Place => sqlx::query_as::<_, Place>(
            r#"
            SELECT id, created_at, updated_at, city_id, user_id, name, description,
                   number_rooms, number_bathrooms, max_guest, price_by_night,
                   latitude, longitude
            FROM places
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Entity::Place)
        .collect(),
        EntityKind::Review => sqlx::query_as::<_, Review>(
            "SELECT id, created_at, updated_at, text, place_id, user_id FROM reviews",
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Entity::Review)
        .collect(),
    };
    Ok(entities)
}

/// One committed record by identity, if present.
pub(crate) async fn fetch_by_id(
    pool: &MySqlPool,
    kind: EntityKind,
    id: &str,
) -> sqlx::Result<Option<Entity>> {
    let entity = match kind {
        EntityKind::User => sqlx::query_as::<_, User>(
            r#"
            SELECT id, created_at, updated_at, email, password, first_name, last_name
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Entity::User),
        EntityKind::State => sqlx::query_as::<_, State>(
            "SELECT id, created_at, updated_at, name FROM states WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Entity::State),
        EntityKind::City => sqlx::query_as::<_, City>(
            "SELECT id, created_at, updated_at, name, state_id FROM cities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Entity::City),
        EntityKind::Amenity => sqlx::query_as::<_, Amenity>(
            "SELECT id, created_at, updated_at, name FROM amenities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Entity::Amenity),
        EntityKind::Place => sqlx::query_as::<_, Place>(
            r#"
            SELECT id, created_at, updated_at, city_id, user_id, name, description,
                   number_rooms, number_bathrooms, max_guest, price_by_night,
                   latitude, longitude
            FROM places
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Entity::Place),
        EntityKind::Review => sqlx::query_as::<_, Review>(
            "SELECT id, created_at, updated_at, text, place_id, user_id FROM reviews WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Entity::Review),
    };
    Ok(entity)
}

/// Committed row count for one kind.
pub(crate) async fn count(pool: &MySqlPool, kind: EntityKind) -> sqlx::Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
    let row: (i64,) = sqlx::query_as(&sql).fetch_one(pool).await?;
    Ok(row.0 as u64)
}
