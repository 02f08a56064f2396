//! Read-only catalog endpoints: people, planets and vehicles.

use api_types::{
    Envelope,
    catalog::{PersonView, PlanetView, VehicleView},
};
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;

use crate::{ServerError, server::ServerState};

const FOUND: &str = "This is the one you are looking for";

pub(crate) fn map_person(person: engine::Person) -> PersonView {
    PersonView {
        id: person.id,
        name: person.name,
        height: person.height,
        mass: person.mass,
        hair_color: person.hair_color,
        skin_color: person.skin_color,
        eye_color: person.eye_color,
        birth_year: person.birth_year,
        gender: person.gender,
    }
}

pub(crate) fn map_planet(planet: engine::Planet) -> PlanetView {
    PlanetView {
        id: planet.id,
        name: planet.name,
        rotation_period: planet.rotation_period,
        orbital_period: planet.orbital_period,
        diameter: planet.diameter,
        climate: planet.climate,
        gravity: planet.gravity,
        terrain: planet.terrain,
        surface_water: planet.surface_water,
        population: planet.population,
    }
}

pub(crate) fn map_vehicle(vehicle: engine::Vehicle) -> VehicleView {
    VehicleView {
        id: vehicle.id,
        name: vehicle.name,
        model: vehicle.model,
        manufacturer: vehicle.manufacturer,
        cost_in_credits: vehicle.cost_in_credits,
        length: vehicle.length,
        speed: vehicle.speed,
        crew: vehicle.crew,
        cargo_capacity: vehicle.cargo_capacity,
        consumables: vehicle.consumables,
        vehicle_class: vehicle.vehicle_class,
    }
}

pub async fn list_people(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<PersonView>>>, ServerError> {
    let results = state
        .engine
        .list_people()
        .await?
        .into_iter()
        .map(map_person)
        .collect();

    Ok(Json(Envelope::new(
        "These are the People from Star Wars",
        results,
    )))
}

pub async fn get_person(
    State(state): State<ServerState>,
    WithRejection(Path(people_id), _): WithRejection<Path<i32>, ServerError>,
) -> Result<Json<Envelope<PersonView>>, ServerError> {
    let person = state.engine.person(people_id).await?;
    Ok(Json(Envelope::new(FOUND, map_person(person))))
}

pub async fn list_planets(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<PlanetView>>>, ServerError> {
    let results = state
        .engine
        .list_planets()
        .await?
        .into_iter()
        .map(map_planet)
        .collect();

    Ok(Json(Envelope::new(
        "These are the Planets from Star Wars",
        results,
    )))
}

pub async fn get_planet(
    State(state): State<ServerState>,
    WithRejection(Path(planet_id), _): WithRejection<Path<i32>, ServerError>,
) -> Result<Json<Envelope<PlanetView>>, ServerError> {
    let planet = state.engine.planet(planet_id).await?;
    Ok(Json(Envelope::new(FOUND, map_planet(planet))))
}

pub async fn list_vehicles(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<VehicleView>>>, ServerError> {
    let results = state
        .engine
        .list_vehicles()
        .await?
        .into_iter()
        .map(map_vehicle)
        .collect();

    Ok(Json(Envelope::new(
        "These are the Vehicles from Star Wars",
        results,
    )))
}

pub async fn get_vehicle(
    State(state): State<ServerState>,
    WithRejection(Path(vehicle_id), _): WithRejection<Path<i32>, ServerError>,
) -> Result<Json<Envelope<VehicleView>>, ServerError> {
    let vehicle = state.engine.vehicle(vehicle_id).await?;
    Ok(Json(Envelope::new(FOUND, map_vehicle(vehicle))))
}
