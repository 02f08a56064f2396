#![allow(dead_code)]

use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, NewUser, Person, Planet, User, Vehicle};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub fn luke() -> Person {
    Person {
        id: 1,
        name: "Luke Skywalker".to_string(),
        height: 172,
        mass: "77".to_string(),
        hair_color: "blond".to_string(),
        skin_color: "fair".to_string(),
        eye_color: "blue".to_string(),
        birth_year: "19BBY".to_string(),
        gender: "male".to_string(),
    }
}

pub fn tatooine() -> Planet {
    Planet {
        id: 1,
        name: Some("Tatooine".to_string()),
        rotation_period: Some(23),
        orbital_period: Some(304),
        diameter: Some(10465),
        climate: Some("arid".to_string()),
        gravity: Some(1.0),
        terrain: Some("desert".to_string()),
        surface_water: Some(1),
        population: Some(200_000),
    }
}

/// A planet known only by its id.
pub fn unnamed_planet(id: i32) -> Planet {
    Planet {
        id,
        name: None,
        rotation_period: None,
        orbital_period: None,
        diameter: None,
        climate: None,
        gravity: None,
        terrain: None,
        surface_water: None,
        population: None,
    }
}

pub fn sand_crawler() -> Vehicle {
    Vehicle {
        id: 4,
        name: "Sand Crawler".to_string(),
        model: "Digger Crawler".to_string(),
        manufacturer: "Corellia Mining Corporation".to_string(),
        cost_in_credits: 150_000,
        length: 36.8,
        speed: 30,
        crew: 46,
        cargo_capacity: 50_000,
        consumables: "2 months".to_string(),
        vehicle_class: "wheeled".to_string(),
    }
}

pub async fn seed_catalog(engine: &Engine) {
    engine.import_people(vec![luke()]).await.unwrap();
    engine
        .import_planets(vec![tatooine(), unnamed_planet(2)])
        .await
        .unwrap();
    engine.import_vehicles(vec![sand_crawler()]).await.unwrap();
}

pub async fn signup(engine: &Engine, username: &str) -> User {
    engine
        .signup(NewUser {
            username: username.to_string(),
            email: format!("{username}@rebels.org"),
            password: "x".to_string(),
            is_active: true,
        })
        .await
        .unwrap()
}
