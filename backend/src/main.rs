//! Backend entry-point: loads configuration, runs migrations, and serves the API.

use std::sync::Arc;

use actix_web::web;
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use backend::config::Settings;
use backend::inbound::http::health::HealthState;
use backend::outbound::mail::HttpMailer;
use backend::outbound::persistence::{
    DbPool, DieselCampaignRepository, DieselContactRepository, DieselUserRepository, PoolConfig,
};
use backend::server::{ServerPorts, build_http_state, create_server};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = Settings::load()
        .map_err(|e| std::io::Error::other(format!("configuration load failed: {e}")))?;

    init_tracing(&settings);
    run_migrations(&settings.database_url)?;

    let mail_endpoint = Url::parse(&settings.mail_endpoint)
        .map_err(|e| std::io::Error::other(format!("invalid mail endpoint: {e}")))?;
    let mailer = HttpMailer::new(
        mail_endpoint,
        settings.mail_api_key.clone(),
        settings.mail_timeout(),
    )
    .map_err(|e| std::io::Error::other(format!("mail client construction failed: {e}")))?;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.clone()).with_max_size(settings.database_pool_size),
    )
    .await
    .map_err(|e| std::io::Error::other(format!("database pool construction failed: {e}")))?;

    let http_state = build_http_state(
        &settings.token_secret,
        ServerPorts {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            campaigns: Arc::new(DieselCampaignRepository::new(pool.clone())),
            contacts: Arc::new(DieselContactRepository::new(pool)),
            mailer: Arc::new(mailer),
        },
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, settings.bind_addr())?;
    server.await
}

/// Initialise tracing from `RUST_LOG`, emitting JSON lines when configured.
fn init_tracing(settings: &Settings) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env());
    let outcome = if settings.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = outcome {
        warn!(error = %e, "tracing init failed");
    }
}

/// Apply embedded migrations over a blocking connection before serving.
fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut connection = PgConnection::establish(database_url)
        .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| std::io::Error::other(format!("migration run failed: {e}")))?;
    if !applied.is_empty() {
        info!(count = applied.len(), "applied pending migrations");
    }
    Ok(())
}
