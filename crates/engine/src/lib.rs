//! Persistence layer for the Holocron catalog.
//!
//! The [`Engine`] owns the database connection and exposes every read and
//! write the HTTP layer needs: catalog listing, user signup/login and the
//! per-user favourites.

pub use error::EngineError;
pub use favourites::{Favourite, FavouriteDetail, FavouriteEntity, FavouriteTarget};
pub use ops::{Engine, EngineBuilder};
pub use people::Model as Person;
pub use planets::Model as Planet;
pub use users::{NewUser, User};
pub use vehicles::Model as Vehicle;

mod error;
mod favourites;
mod ops;
mod people;
mod planets;
mod users;
mod vehicles;

type ResultEngine<T> = Result<T, EngineError>;
