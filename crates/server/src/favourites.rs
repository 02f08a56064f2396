//! Favourites endpoints.

use api_types::{
    Envelope, Message,
    favourite::{FavouriteKind, FavouriteView},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use engine::{FavouriteDetail, FavouriteEntity, FavouriteTarget};

use crate::{
    Identity, ServerError,
    catalog::{map_person, map_planet, map_vehicle},
    server::ServerState,
};

fn target_for(kind: FavouriteKind, target_id: i32) -> FavouriteTarget {
    match kind {
        FavouriteKind::People => FavouriteTarget::Person(target_id),
        FavouriteKind::Planet => FavouriteTarget::Planet(target_id),
        FavouriteKind::Vehicle => FavouriteTarget::Vehicle(target_id),
    }
}

fn map_favourite(detail: FavouriteDetail) -> FavouriteView {
    let FavouriteDetail { favourite, entity } = detail;
    let mut view = FavouriteView {
        id: favourite.id,
        name: favourite.name,
        id_user: Some(favourite.user_id),
        id_peoples: None,
        id_planets: None,
        id_vehicles: None,
        people: None,
        planet: None,
        vehicle: None,
    };
    match favourite.target {
        FavouriteTarget::Person(id) => view.id_peoples = Some(id),
        FavouriteTarget::Planet(id) => view.id_planets = Some(id),
        FavouriteTarget::Vehicle(id) => view.id_vehicles = Some(id),
    }
    match entity {
        Some(FavouriteEntity::Person(person)) => view.people = Some(map_person(person)),
        Some(FavouriteEntity::Planet(planet)) => view.planet = Some(map_planet(planet)),
        Some(FavouriteEntity::Vehicle(vehicle)) => view.vehicle = Some(map_vehicle(vehicle)),
        None => {}
    }
    view
}

/// List the favourites of the token owner.
///
/// An empty list is answered with `204`; the message attached to it is
/// dropped by the transport.
pub async fn list(
    Extension(identity): Extension<Identity>,
    State(state): State<ServerState>,
    WithRejection(Path(user_id), _): WithRejection<Path<i32>, ServerError>,
) -> Result<Response, ServerError> {
    if identity != Identity(user_id) {
        return Err(ServerError::Forbidden);
    }

    let favourites = state.engine.favourites(user_id).await?;
    if favourites.is_empty() {
        return Ok((
            StatusCode::NO_CONTENT,
            Json(Message::new("This user has no favourites")),
        )
            .into_response());
    }

    let results: Vec<FavouriteView> = favourites.into_iter().map(map_favourite).collect();
    Ok(Json(Envelope::new("These are the favourites of the user", results)).into_response())
}

pub async fn add(
    State(state): State<ServerState>,
    WithRejection(Path((user_id, kind, target_id)), _): WithRejection<
        Path<(i32, FavouriteKind, i32)>,
        ServerError,
    >,
) -> Result<(StatusCode, Json<Message>), ServerError> {
    let target = target_for(kind, target_id);
    let favourite = state.engine.add_favourite(user_id, target).await?;
    tracing::debug!(user_id, favourite_id = favourite.id, "favourite added");

    Ok((
        StatusCode::CREATED,
        Json(Message::new(format!(
            "{} added to favourites",
            target.label()
        ))),
    ))
}

pub async fn remove(
    State(state): State<ServerState>,
    WithRejection(Path((user_id, kind, target_id)), _): WithRejection<
        Path<(i32, FavouriteKind, i32)>,
        ServerError,
    >,
) -> Result<Json<Message>, ServerError> {
    let target = target_for(kind, target_id);
    state.engine.remove_favourite(user_id, target).await?;
    tracing::debug!(user_id, target_id, "favourite removed");

    Ok(Json(Message::new(format!(
        "{} removed from favourites",
        target.label()
    ))))
}
