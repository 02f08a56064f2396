//! User directory, signup and login endpoints.

use api_types::{
    Envelope, Message,
    user::{Login, LoginReply, LoginResponse, Signup, SignupResponse, UserView},
};
use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use engine::NewUser;

use crate::{ServerError, server::ServerState};

fn map_user(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        username: user.username,
        is_active: user.is_active,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<UserView>>>, ServerError> {
    let results = state
        .engine
        .list_users()
        .await?
        .into_iter()
        .map(map_user)
        .collect();

    Ok(Json(Envelope::new("These are the users", results)))
}

pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(user_id), _): WithRejection<Path<i32>, ServerError>,
) -> Result<Json<Envelope<UserView>>, ServerError> {
    let user = state.engine.user(user_id).await?;
    Ok(Json(Envelope::new(
        "This is the one you are looking for",
        map_user(user),
    )))
}

/// Register a user. Duplicate usernames or emails are rejected by the store
/// and surface as a `500`.
pub async fn signup(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<Signup>, ServerError>,
) -> Result<Json<SignupResponse>, ServerError> {
    let user = state
        .engine
        .signup(NewUser {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            is_active: payload.is_active,
        })
        .await?;
    tracing::info!(user_id = user.id, "user signed up");

    Ok(Json(SignupResponse {
        msg: "User created".to_string(),
        response: map_user(user),
    }))
}

/// Exchange email and password for an access token.
///
/// A wrong password is answered with `200` and `{"msg": "Incorrect login"}`;
/// existing clients rely on that shape.
pub async fn login(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<Login>, ServerError>,
) -> Result<Json<LoginReply>, ServerError> {
    let Some(user) = state
        .engine
        .login(&payload.email, &payload.password)
        .await?
    else {
        tracing::warn!("rejected login attempt");
        return Ok(Json(LoginReply::Rejected(Message::new("Incorrect login"))));
    };

    let access_token = state.tokens.issue(user.id)?;
    Ok(Json(LoginReply::Granted(LoginResponse {
        access_token,
        user: map_user(user),
    })))
}
