use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    extract::WithRejection,
    headers::{Authorization, authorization::Bearer},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::sync::Arc;

use api_types::sitemap::{RouteView, Sitemap};
use engine::Engine;

use crate::{ServerError, TokenKeys, catalog, favourites, user};

/// Every registered `(method, path)` pair, served by `GET /`.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/people"),
    ("GET", "/people/{people_id}"),
    ("GET", "/planets"),
    ("GET", "/planets/{planet_id}"),
    ("GET", "/vehicles"),
    ("GET", "/vehicles/{vehicle_id}"),
    ("GET", "/users"),
    ("GET", "/users/{user_id}"),
    ("GET", "/users/{user_id}/favourites"),
    ("POST", "/users/{user_id}/favourites/{kind}/{target_id}"),
    ("DELETE", "/users/{user_id}/favourites/{kind}/{target_id}"),
    ("POST", "/signup"),
    ("POST", "/login"),
];

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub tokens: Arc<TokenKeys>,
}

impl ServerState {
    pub fn new(engine: Engine, tokens: TokenKeys) -> Self {
        Self {
            engine: Arc::new(engine),
            tokens: Arc::new(tokens),
        }
    }
}

/// Reject the request unless it carries a valid bearer token; the verified
/// [`Identity`](crate::Identity) is made available to the handler.
async fn require_bearer(
    State(state): State<ServerState>,
    WithRejection(TypedHeader(Authorization(bearer)), _): WithRejection<
        TypedHeader<Authorization<Bearer>>,
        ServerError,
    >,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let identity = state.tokens.verify(bearer.token())?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

async fn sitemap() -> Json<Sitemap> {
    Json(Sitemap {
        msg: "Available endpoints".to_string(),
        routes: ROUTES
            .iter()
            .map(|(method, path)| RouteView {
                method: method.to_string(),
                path: path.to_string(),
            })
            .collect(),
    })
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/users/{user_id}/favourites", get(favourites::list))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    Router::new()
        .route("/", get(sitemap))
        .route("/people", get(catalog::list_people))
        .route("/people/{people_id}", get(catalog::get_person))
        .route("/planets", get(catalog::list_planets))
        .route("/planets/{planet_id}", get(catalog::get_planet))
        .route("/vehicles", get(catalog::list_vehicles))
        .route("/vehicles/{vehicle_id}", get(catalog::get_vehicle))
        .route("/users", get(user::list))
        .route("/users/{user_id}", get(user::get))
        .route(
            "/users/{user_id}/favourites/{kind}/{target_id}",
            post(favourites::add).delete(favourites::remove),
        )
        .route("/signup", post(user::signup))
        .route("/login", post(user::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await
}
