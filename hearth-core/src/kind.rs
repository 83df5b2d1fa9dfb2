//! The closed set of entity types the storage layer knows about.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tag identifying one persistable entity type.
///
/// Variants are declared in foreign-key dependency order: iterating
/// [`EntityKind::ALL`] yields parents before children, so schema creation
/// can follow declaration order directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl EntityKind {
    /// Every known kind, in dependency order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::User,
        EntityKind::State,
        EntityKind::City,
        EntityKind::Amenity,
        EntityKind::Place,
        EntityKind::Review,
    ];

    /// Name of the table backing this kind.
    pub const fn table(self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::State => "states",
            EntityKind::City => "cities",
            EntityKind::Amenity => "amenities",
            EntityKind::Place => "places",
            EntityKind::Review => "reviews",
        }
    }

    /// Type tag as it appears in identity keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::State => "State",
            EntityKind::City => "City",
            EntityKind::Amenity => "Amenity",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
        }
    }

    /// Identity key for a record of this kind: `"<Kind>.<id>"`.
    ///
    /// The embedded type tag keeps keys from colliding across kinds even
    /// when two records share an id.
    pub fn storage_key(self, id: &str) -> String {
        format!("{}.{}", self.as_str(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string tag that names no known entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity kind '{0}'")]
pub struct UnknownKindError(pub String);

impl FromStr for EntityKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(EntityKind::User),
            "State" => Ok(EntityKind::State),
            "City" => Ok(EntityKind::City),
            "Amenity" => Ok(EntityKind::Amenity),
            "Place" => Ok(EntityKind::Place),
            "Review" => Ok(EntityKind::Review),
            other => Err(UnknownKindError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_parents_before_children() {
        let order = EntityKind::ALL;
        let pos = |kind| order.iter().position(|k| *k == kind).unwrap();
        assert!(pos(EntityKind::State) < pos(EntityKind::City));
        assert!(pos(EntityKind::City) < pos(EntityKind::Place));
        assert!(pos(EntityKind::User) < pos(EntityKind::Place));
        assert!(pos(EntityKind::Place) < pos(EntityKind::Review));
    }

    #[test]
    fn table_names() {
        assert_eq!(EntityKind::User.table(), "users");
        assert_eq!(EntityKind::City.table(), "cities");
        assert_eq!(EntityKind::Amenity.table(), "amenities");
    }

    #[test]
    fn storage_key_embeds_type_tag() {
        assert_eq!(EntityKind::State.storage_key("abc-123"), "State.abc-123");
    }

    #[test]
    fn parses_every_tag_it_prints() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.as_str().parse::<EntityKind>(), Ok(kind));
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "Spaceship".parse::<EntityKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown entity kind 'Spaceship'");
    }
}
