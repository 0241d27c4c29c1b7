use anyhow::Result;
use axum::{ServiceExt, body::Body};
use std::{net::SocketAddr, sync::Arc};
use tabletop_catalog::{
    application::{
        ports::{
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        services::{ApplicationServices, CatalogRepositories},
    },
    config::AppConfig,
    domain::{slug::SlugGenerator, user::UserRepository},
    infrastructure::{
        database,
        repositories::{
            PostgresCatalogReferences, PostgresCatalogRepository, PostgresUserRepository,
        },
        security::{password::Argon2PasswordHasher, token::BiscuitTokenManager},
        time::SystemClock,
        util::DefaultSlugGenerator,
    },
    presentation::http::{routes::build_router, state::HttpState},
};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let catalog = CatalogRepositories {
        licenses: Arc::new(PostgresCatalogRepository::new(pool.clone())),
        publishers: Arc::new(PostgresCatalogRepository::new(pool.clone())),
        authors: Arc::new(PostgresCatalogRepository::new(pool.clone())),
        systems: Arc::new(PostgresCatalogRepository::new(pool.clone())),
        games: Arc::new(PostgresCatalogRepository::new(pool.clone())),
        editions: Arc::new(PostgresCatalogRepository::new(pool.clone())),
        products: Arc::new(PostgresCatalogRepository::new(pool.clone())),
        references: Arc::new(PostgresCatalogReferences::new(pool)),
    };

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        catalog,
        password_hasher,
        token_manager,
        clock,
        slugger,
        config.default_timezone(),
    ));

    let state = HttpState { services };

    let app = build_router(state, config.allowed_origins());
    let service = app.into_service::<Body>().into_make_service();

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(%address, timezone = %config.default_timezone(), "catalog listening");

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
