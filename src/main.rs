//! KaiD waitlist server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use kaid_waitlist::adapters::http::{app_router, WaitlistAppState};
use kaid_waitlist::adapters::{InMemoryWaitlist, PostgresSignupReader, PostgresSignupRepository};
use kaid_waitlist::config::{AppConfig, DatabaseConfig, StorageBackend};
use kaid_waitlist::ports::{SignupReader, SignupRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let state = build_state(&config).await?;
    let app = app_router(state, &config.server, config.waitlist.admin_routes_enabled);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        storage = ?config.waitlist.storage,
        policy = ?config.waitlist.resubmission_policy,
        admin_routes = config.waitlist.admin_routes_enabled,
        "KaiD waitlist listening"
    );

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn build_state(config: &AppConfig) -> Result<WaitlistAppState, sqlx::Error> {
    let waitlist = &config.waitlist;

    let (signup_repository, signup_reader): (Arc<dyn SignupRepository>, Arc<dyn SignupReader>) =
        match waitlist.storage {
            StorageBackend::Postgres => {
                let pool = connect(&config.database).await?;
                tracing::info!("Connected to PostgreSQL");
                let repository: Arc<dyn SignupRepository> =
                    Arc::new(PostgresSignupRepository::new(pool.clone()));
                let reader: Arc<dyn SignupReader> = Arc::new(PostgresSignupReader::new(pool));
                (repository, reader)
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; signups are lost on restart");
                let store = Arc::new(InMemoryWaitlist::new());
                let repository: Arc<dyn SignupRepository> = store.clone();
                let reader: Arc<dyn SignupReader> = store;
                (repository, reader)
            }
        };

    Ok(WaitlistAppState {
        signup_repository,
        signup_reader,
        source_tag: waitlist.source_tag.clone(),
        resubmission_policy: waitlist.resubmission_policy,
    })
}

async fn connect(database: &DatabaseConfig) -> Result<sqlx::PgPool, sqlx::Error> {
    database.pool_options().connect(&database.url).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
