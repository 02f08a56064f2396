//! Handles settings for the application.
//!
//! Values are layered, lowest priority first: built-in defaults, an optional
//! `settings.toml` in the working directory, `HOLOCRON__<SECTION>__<KEY>`
//! environment variables, then the conventional `DATABASE_URL`, `PORT` and
//! `JWT_SECRET_KEY` variables.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database_url: String,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub jwt_secret: Option<String>,
    pub token_ttl_minutes: i64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub auth: Auth,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(
            Environment::with_prefix("HOLOCRON"),
            |name| std::env::var(name).ok(),
        )
    }

    fn load(
        environment: Environment,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.database_url", "sqlite:./holocron.db?mode=rwc")?
            .set_default("auth.token_ttl_minutes", 15)?
            .add_source(File::with_name("settings").required(false))
            .add_source(
                environment
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.database_url", var("DATABASE_URL"))?
            .set_override_option("server.port", var("PORT"))?
            .set_override_option("auth.jwt_secret", var("JWT_SECRET_KEY"))?
            .build()?;

        settings.try_deserialize()
    }
}
