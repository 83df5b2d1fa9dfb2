//! Registry of the entity types a storage instance persists.

use crate::kind::EntityKind;
use crate::model::{self, Amenity, City, Place, Review, State, User};

/// Name and creation DDL for one backing table.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub name: &'static str,
    pub create_sql: &'static str,
}

/// The set of entity types one storage instance manages.
///
/// Built once at startup and handed to the storage layer, which uses it to
/// create schema objects and to reject records of unregistered kinds. Kinds
/// are always held in dependency order, whatever order they were given in.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    kinds: Vec<EntityKind>,
}

impl EntityRegistry {
    /// Table names in the order the destructive test reset drops them:
    /// children before parents, so foreign keys never block a drop.
    pub const DROP_ORDER: [&'static str; 7] = [
        "reviews",
        "place_amenity",
        "places",
        "cities",
        "states",
        "amenities",
        "users",
    ];

    /// Registry covering every known kind.
    pub fn full() -> Self {
        Self::with_kinds(&EntityKind::ALL)
    }

    /// Registry covering a subset of kinds. Duplicates are collapsed and
    /// the canonical dependency order is restored.
    pub fn with_kinds(kinds: &[EntityKind]) -> Self {
        let kinds = EntityKind::ALL
            .into_iter()
            .filter(|kind| kinds.contains(kind))
            .collect();
        Self { kinds }
    }

    pub fn contains(&self, kind: EntityKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Registered kinds, parents before children.
    pub fn kinds(&self) -> &[EntityKind] {
        &self.kinds
    }

    /// Creation DDL for every registered table, in creation order. The
    /// place/amenity join table is included only when both sides are
    /// registered, and always comes last.
    pub fn table_specs(&self) -> Vec<TableSpec> {
        let mut specs: Vec<TableSpec> = self
            .kinds
            .iter()
            .map(|kind| TableSpec {
                name: kind.table(),
                create_sql: create_sql_for(*kind),
            })
            .collect();
        if self.contains(EntityKind::Place) && self.contains(EntityKind::Amenity) {
            specs.push(TableSpec {
                name: model::PLACE_AMENITY_TABLE,
                create_sql: model::CREATE_PLACE_AMENITY,
            });
        }
        specs
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::full()
    }
}

fn create_sql_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::User => User::CREATE_TABLE,
        EntityKind::State => State::CREATE_TABLE,
        EntityKind::City => City::CREATE_TABLE,
        EntityKind::Amenity => Amenity::CREATE_TABLE,
        EntityKind::Place => Place::CREATE_TABLE,
        EntityKind::Review => Review::CREATE_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_registry_covers_every_table() {
        let specs = EntityRegistry::full().table_specs();
        let names: Vec<&str> = specs.iter().map(|spec| spec.name).collect();
        assert_eq!(
            names,
            vec![
                "users",
                "states",
                "cities",
                "amenities",
                "places",
                "reviews",
                "place_amenity"
            ]
        );
    }

    #[test]
    fn drop_order_reverses_dependencies() {
        let pos = |name: &str| {
            EntityRegistry::DROP_ORDER
                .iter()
                .position(|t| *t == name)
                .unwrap()
        };
        assert!(pos("reviews") < pos("places"));
        assert!(pos("place_amenity") < pos("places"));
        assert!(pos("place_amenity") < pos("amenities"));
        assert!(pos("places") < pos("cities"));
        assert!(pos("cities") < pos("states"));
        assert!(pos("places") < pos("users"));
    }

    #[test]
    fn subset_skips_join_table_when_one_side_missing() {
        let registry = EntityRegistry::with_kinds(&[EntityKind::Place, EntityKind::City]);
        let names: Vec<&str> = registry.table_specs().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["cities", "places"]);
    }

    #[test]
    fn subset_restores_dependency_order_and_drops_duplicates() {
        let registry = EntityRegistry::with_kinds(&[
            EntityKind::Review,
            EntityKind::User,
            EntityKind::User,
            EntityKind::Place,
        ]);
        assert_eq!(
            registry.kinds(),
            &[EntityKind::User, EntityKind::Place, EntityKind::Review]
        );
    }

    #[test]
    fn contains_reflects_registration() {
        let registry = EntityRegistry::with_kinds(&[EntityKind::User]);
        assert!(registry.contains(EntityKind::User));
        assert!(!registry.contains(EntityKind::Review));
    }
}
