use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::Duration;
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Engine, Person, Planet, Vehicle};
use migration::MigratorTrait;
use server::{ServerState, TokenKeys};

const SECRET: &[u8] = b"test-secret";

async fn app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let seeder = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    seeder
        .import_people(vec![Person {
            id: 1,
            name: "Luke Skywalker".to_string(),
            height: 172,
            mass: "77".to_string(),
            hair_color: "blond".to_string(),
            skin_color: "fair".to_string(),
            eye_color: "blue".to_string(),
            birth_year: "19BBY".to_string(),
            gender: "male".to_string(),
        }])
        .await
        .unwrap();
    seeder
        .import_planets(vec![Planet {
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
        }])
        .await
        .unwrap();
    seeder
        .import_vehicles(vec![Vehicle {
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
        }])
        .await
        .unwrap();

    let engine = Engine::builder().database(db).build().await.unwrap();
    server::router(ServerState::new(
        engine,
        TokenKeys::new(SECRET, Duration::minutes(15)),
    ))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

async fn signup(app: &Router, username: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/signup",
        Some(json!({
            "username": username,
            "email": format!("{username}@rebels.org"),
            "password": "x",
            "is_active": true,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["response"].clone()
}

async fn login(app: &Router, username: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/login",
        Some(json!({ "email": format!("{username}@rebels.org"), "password": "x" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn existing_rows_are_returned_unchanged() {
    let app = app().await;

    let (status, body) = get(&app, "/people/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["name"], "Luke Skywalker");
    assert_eq!(body["results"]["height"], 172);
    assert_eq!(body["results"]["birth_year"], "19BBY");

    let (status, body) = get(&app, "/planets/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["climate"], "arid");
    assert_eq!(body["results"]["population"], 200_000);

    let (status, body) = get(&app, "/vehicles/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["length"], 36.8);
}

#[tokio::test]
async fn lists_are_wrapped_in_envelope() {
    let app = app().await;

    for uri in ["/people", "/planets", "/vehicles"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body["msg"].is_string(), "{uri}");
        assert_eq!(body["results"].as_array().unwrap().len(), 1, "{uri}");
    }

    let (status, body) = get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn unknown_ids_are_404_with_message() {
    let app = app().await;

    for (uri, msg) in [
        ("/people/99", "Person not found"),
        ("/planets/99", "Planet not found"),
        ("/vehicles/99", "Vehicle not found"),
        ("/users/99", "User not found"),
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["msg"], msg, "{uri}");
    }
}

#[tokio::test]
async fn non_numeric_id_is_404() {
    let app = app().await;

    let (status, body) = get(&app, "/people/luke").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["msg"].is_string());
}

#[tokio::test]
async fn signup_then_login_returns_same_user() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/signup",
        Some(json!({
            "username": "luke",
            "email": "luke@rebels.org",
            "password": "x",
            "is_active": true,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let user = body["response"].clone();
    assert!(user["id"].as_i64().unwrap() > 0);
    assert_eq!(user["username"], "luke");
    assert_eq!(user["email"], "luke@rebels.org");
    assert!(user.get("password").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "luke@rebels.org", "password": "x" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert_eq!(body["user"], user);
}

#[tokio::test]
async fn users_never_expose_password() {
    let app = app().await;
    let user = signup(&app, "leia").await;

    let (_, body) = get(&app, "/users").await;
    assert!(body["results"][0].get("password").is_none());

    let (_, body) = get(&app, &format!("/users/{}", user["id"])).await;
    assert_eq!(body["results"], user);
    assert!(body["results"].get("password").is_none());
}

// Wrong credentials still answer 200; this pins the current contract.
#[tokio::test]
async fn wrong_password_is_200_without_token() {
    let app = app().await;
    signup(&app, "luke").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "luke@rebels.org", "password": "wrong" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "msg": "Incorrect login" }));
}

#[tokio::test]
async fn unknown_email_is_404() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "vader@empire.gov", "password": "x" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "User not found");
}

#[tokio::test]
async fn incomplete_signup_is_500_with_status_code() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/signup",
        Some(json!({ "username": "han" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status_code"], 500);
    assert!(body["error"].is_string());
    assert!(body["msg"].is_string());
}

#[tokio::test]
async fn duplicate_signup_is_500() {
    let app = app().await;
    signup(&app, "han").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/signup",
        Some(json!({
            "username": "han",
            "email": "han@rebels.org",
            "password": "y",
            "is_active": true,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status_code"], 500);
}

#[tokio::test]
async fn adding_same_planet_twice_is_400() {
    let app = app().await;
    let user = signup(&app, "luke").await;
    let uri = format!("/users/{}/favourites/planet/1", user["id"]);

    let (status, _) = send(&app, Method::POST, &uri, None, None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, &uri, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Planet already in favourites");

    let token = login(&app, "luke").await;
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/users/{}/favourites", user["id"]),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn adding_requires_user_and_target() {
    let app = app().await;
    let user = signup(&app, "luke").await;

    let (status, body) = send(&app, Method::POST, "/users/99/favourites/people/1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "User not found");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/users/{}/favourites/people/99", user["id"]),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Person not found");
}

#[tokio::test]
async fn removing_requires_user_and_target() {
    let app = app().await;
    let user = signup(&app, "luke").await;

    let (status, body) = send(&app, Method::DELETE, "/users/99/favourites/planet/1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "User not found");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/users/{}/favourites/planet/99", user["id"]),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "Planet not found");
}

#[tokio::test]
async fn unknown_kind_is_404() {
    let app = app().await;
    let user = signup(&app, "luke").await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/users/{}/favourites/starship/1", user["id"]),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_absent_favourite_is_400() {
    let app = app().await;
    let user = signup(&app, "luke").await;

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/users/{}/favourites/people/1", user["id"]),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Person not in favourites");
}

#[tokio::test]
async fn add_remove_then_list_is_204() {
    let app = app().await;
    let user = signup(&app, "luke").await;
    let token = login(&app, "luke").await;
    let uri = format!("/users/{}/favourites/planet/1", user["id"]);

    let (status, _) = send(&app, Method::POST, &uri, None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["msg"], "Planet removed from favourites");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/users/{}/favourites", user["id"]),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn listing_embeds_favourited_entities() {
    let app = app().await;
    let user = signup(&app, "luke").await;
    let token = login(&app, "luke").await;

    for kind in ["people/1", "vehicle/4"] {
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/users/{}/favourites/{kind}", user["id"]),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/users/{}/favourites", user["id"]),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["id_peoples"], 1);
    assert_eq!(results[0]["id_planets"], Value::Null);
    assert_eq!(results[0]["name"], "Luke Skywalker");
    assert_eq!(results[0]["people"]["eye_color"], "blue");
    assert!(results[0].get("vehicle").is_none());

    assert_eq!(results[1]["id_vehicles"], 4);
    assert_eq!(results[1]["vehicle"]["model"], "Digger Crawler");
}

#[tokio::test]
async fn foreign_token_is_403_whatever_the_data() {
    let app = app().await;
    let luke = signup(&app, "luke").await;
    signup(&app, "leia").await;
    let leia_token = login(&app, "leia").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/users/{}/favourites", luke["id"]),
        None,
        Some(&leia_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["msg"], "no permission");

    let (status, _) = send(
        &app,
        Method::GET,
        "/users/99/favourites",
        None,
        Some(&leia_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn listing_without_valid_token_is_401() {
    let app = app().await;
    let user = signup(&app, "luke").await;
    let uri = format!("/users/{}/favourites", user["id"]);

    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Missing Authorization Header");

    let (status, _) = send(&app, Method::GET, &uri, None, Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = TokenKeys::new(b"other-secret", Duration::minutes(15))
        .issue(user["id"].as_i64().unwrap() as i32)
        .unwrap();
    let (status, _) = send(&app, Method::GET, &uri, None, Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_authorization_is_401() {
    let app = app().await;
    let user = signup(&app, "luke").await;

    let request = Request::builder()
        .method(Method::GET)
        .uri(format!("/users/{}/favourites", user["id"]))
        .header(header::AUTHORIZATION, "Basic Zm9vOmJhcg==")
        .body(Body::empty())
        .unwrap();

    let (status, body) = dispatch(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Invalid Authorization Header");
}

#[tokio::test]
async fn token_for_deleted_user_is_404() {
    let app = app().await;
    let token = TokenKeys::new(SECRET, Duration::minutes(15))
        .issue(99)
        .unwrap();

    let (status, body) = send(
        &app,
        Method::GET,
        "/users/99/favourites",
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "User not found");
}

#[tokio::test]
async fn sitemap_lists_every_route() {
    let app = app().await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let routes = body["routes"].as_array().unwrap();
    assert_eq!(routes.len(), server::ROUTES.len());
    assert!(routes.contains(&json!({
        "method": "GET",
        "path": "/users/{user_id}/favourites",
    })));
}

#[tokio::test]
async fn every_listed_route_is_registered() {
    let app = app().await;

    for (method, path) in server::ROUTES {
        let uri = path
            .replace("{kind}", "planet")
            .replace("{people_id}", "1")
            .replace("{planet_id}", "1")
            .replace("{vehicle_id}", "4")
            .replace("{user_id}", "1")
            .replace("{target_id}", "1");
        let method = Method::from_bytes(method.as_bytes()).unwrap();

        let (status, body) = send(&app, method.clone(), &uri, None, None).await;
        assert_ne!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        // Unmatched routes fall through to axum's empty 404.
        assert!(
            status != StatusCode::NOT_FOUND || body["msg"].is_string(),
            "{method} {uri} is not routed"
        );
    }
}
