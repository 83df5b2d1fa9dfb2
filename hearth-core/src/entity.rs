//! The tagged union moved in and out of storage.

use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;
use crate::model::{Amenity, City, Place, Review, State, User};

/// One persisted domain record, tagged with its kind.
///
/// The storage layer never interprets fields beyond the identifier and the
/// kind tag; everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Entity {
    User(User),
    State(State),
    City(City),
    Amenity(Amenity),
    Place(Place),
    Review(Review),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::User(_) => EntityKind::User,
            Entity::State(_) => EntityKind::State,
            Entity::City(_) => EntityKind::City,
            Entity::Amenity(_) => EntityKind::Amenity,
            Entity::Place(_) => EntityKind::Place,
            Entity::Review(_) => EntityKind::Review,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::User(user) => &user.id,
            Entity::State(state) => &state.id,
            Entity::City(city) => &city.id,
            Entity::Amenity(amenity) => &amenity.id,
            Entity::Place(place) => &place.id,
            Entity::Review(review) => &review.id,
        }
    }

    /// Identity key: `"<Kind>.<id>"`.
    pub fn storage_key(&self) -> String {
        self.kind().storage_key(self.id())
    }
}

impl From<User> for Entity {
    fn from(value: User) -> Self {
        Entity::User(value)
    }
}

impl From<State> for Entity {
    fn from(value: State) -> Self {
        Entity::State(value)
    }
}

impl From<City> for Entity {
    fn from(value: City) -> Self {
        Entity::City(value)
    }
}

impl From<Amenity> for Entity {
    fn from(value: Amenity) -> Self {
        Entity::Amenity(value)
    }
}

impl From<Place> for Entity {
    fn from(value: Place) -> Self {
        Entity::Place(value)
    }
}

impl From<Review> for Entity {
    fn from(value: Review) -> Self {
        Entity::Review(value)
    }
}
