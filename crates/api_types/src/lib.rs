use serde::{Deserialize, Serialize};

/// Plain `{msg}` body used for confirmations and user-visible failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub msg: String,
}

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// `{msg, results}` envelope wrapping every read endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub msg: String,
    pub results: T,
}

impl<T> Envelope<T> {
    pub fn new(msg: impl Into<String>, results: T) -> Self {
        Self {
            msg: msg.into(),
            results,
        }
    }
}

pub mod catalog {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct PersonView {
        pub id: i32,
        pub name: String,
        pub height: i32,
        pub mass: String,
        pub hair_color: String,
        pub skin_color: String,
        pub eye_color: String,
        pub birth_year: String,
        pub gender: String,
    }

    /// Planets are imported from a partial upstream feed, so every
    /// attribute besides the id may be missing.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct PlanetView {
        pub id: i32,
        pub name: Option<String>,
        pub rotation_period: Option<i32>,
        pub orbital_period: Option<i32>,
        pub diameter: Option<i32>,
        pub climate: Option<String>,
        pub gravity: Option<f64>,
        pub terrain: Option<String>,
        pub surface_water: Option<i32>,
        pub population: Option<i64>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct VehicleView {
        pub id: i32,
        pub name: String,
        pub model: String,
        pub manufacturer: String,
        pub cost_in_credits: i64,
        pub length: f64,
        pub speed: i32,
        pub crew: i32,
        pub cargo_capacity: i64,
        pub consumables: String,
        pub vehicle_class: String,
    }
}

pub mod user {
    use super::*;

    /// Public projection of a user. The password never leaves the server.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i32,
        pub email: String,
        pub username: String,
        pub is_active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Signup {
        pub username: String,
        pub email: String,
        pub password: String,
        pub is_active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignupResponse {
        pub msg: String,
        pub response: UserView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub access_token: String,
        pub user: UserView,
    }

    /// Body of `POST /login`.
    ///
    /// Wrong credentials are answered with a `200` and a bare message rather
    /// than an error status; clients have to look at the shape.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum LoginReply {
        Granted(LoginResponse),
        Rejected(Message),
    }
}

pub mod favourite {
    use super::catalog::{PersonView, PlanetView, VehicleView};
    use super::*;

    /// Kind of catalog entity a favourite points at, as spelled in the URL.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum FavouriteKind {
        People,
        Planet,
        Vehicle,
    }

    /// A favourite row, enriched with the favourited entity.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FavouriteView {
        pub id: i32,
        pub name: Option<String>,
        pub id_user: Option<i32>,
        pub id_peoples: Option<i32>,
        pub id_planets: Option<i32>,
        pub id_vehicles: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub people: Option<PersonView>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub planet: Option<PlanetView>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub vehicle: Option<VehicleView>,
    }
}

pub mod sitemap {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RouteView {
        pub method: String,
        pub path: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Sitemap {
        pub msg: String,
        pub routes: Vec<RouteView>,
    }
}
