use migration::{Migrator, MigratorTrait};
use server::{ServerState, TokenKeys};

mod settings;

/// Used when no secret is configured, so a local checkout runs out of the box.
const DEVELOPMENT_SECRET: &str = "holocron-development-secret";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "holocron={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = sea_orm::Database::connect(&settings.server.database_url).await?;
    Migrator::up(&db, None).await?;

    let engine = engine::Engine::builder().database(db).build().await?;

    let secret = settings.auth.jwt_secret.unwrap_or_else(|| {
        tracing::warn!("no JWT secret configured, using the development secret");
        DEVELOPMENT_SECRET.to_string()
    });
    let tokens = TokenKeys::new(
        secret.as_bytes(),
        chrono::Duration::minutes(settings.auth.token_ttl_minutes),
    );

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(ServerState::new(engine, tokens), listener).await?;

    Ok(())
}
