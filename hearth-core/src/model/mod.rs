//! Entity models persisted by the storage layer.
//!
//! Every model carries the shared identity trio (`id`, `created_at`,
//! `updated_at`) and owns the MySQL layout of its backing table.

mod amenity;
mod city;
mod place;
mod review;
mod state;
mod user;

pub use amenity::Amenity;
pub use city::City;
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use user::User;

pub(crate) use place::{CREATE_PLACE_AMENITY, PLACE_AMENITY_TABLE};
