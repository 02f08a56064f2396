use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::typed_header::TypedHeaderRejection;
use engine::EngineError;

use api_types::Message;
use serde::Serialize;
pub use auth::{Identity, TokenKeys};
pub use server::{ROUTES, ServerState, router, run_with_listener};

mod auth;
mod catalog;
mod favourites;
mod server;
mod user;

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Missing or invalid bearer token.
    Unauthorized(String),
    /// The bearer token belongs to somebody else.
    Forbidden,
    /// The path did not match a resource (e.g. a non-numeric id).
    NotFound,
    /// Anything the handlers do not recover from: malformed bodies, storage
    /// failures, token signing failures.
    Unhandled(String),
}

/// Body of a `500` response.
#[derive(Serialize)]
struct Error {
    msg: String,
    error: String,
    status_code: u16,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingFavourite(_) | EngineError::MissingFavourite(_) => {
            StatusCode::BAD_REQUEST
        }
        EngineError::InvalidFavourite(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn unhandled(error: String) -> axum::response::Response {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (
        status,
        Json(Error {
            msg: "internal server error".to_string(),
            error,
            status_code: status.as_u16(),
        }),
    )
        .into_response()
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServerError::Engine(err) => {
                let status = status_for_engine_error(&err);
                if status.is_server_error() {
                    tracing::error!("engine error: {err}");
                    return unhandled(match err {
                        EngineError::Database(_) => "database error".to_string(),
                        other => other.to_string(),
                    });
                }
                (status, Json(Message::new(err.to_string()))).into_response()
            }
            ServerError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(Message::new(msg))).into_response()
            }
            ServerError::Forbidden => {
                (StatusCode::FORBIDDEN, Json(Message::new("no permission"))).into_response()
            }
            ServerError::NotFound => {
                (StatusCode::NOT_FOUND, Json(Message::new("Not found"))).into_response()
            }
            ServerError::Unhandled(err) => {
                tracing::error!("unhandled error: {err}");
                unhandled(err)
            }
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Unhandled(value.body_text())
    }
}

impl From<TypedHeaderRejection> for ServerError {
    fn from(value: TypedHeaderRejection) -> Self {
        if value.is_missing() {
            Self::Unauthorized("Missing Authorization Header".to_string())
        } else {
            Self::Unauthorized("Invalid Authorization Header".to_string())
        }
    }
}

impl From<PathRejection> for ServerError {
    fn from(_: PathRejection) -> Self {
        Self::NotFound
    }
}
