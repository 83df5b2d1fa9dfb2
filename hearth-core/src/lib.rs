pub mod entity;
pub mod kind;
pub mod model;
pub mod registry;

pub use entity::Entity;
pub use kind::{EntityKind, UnknownKindError};
pub use model::{Amenity, City, Place, Review, State, User};
pub use registry::{EntityRegistry, TableSpec};
