use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ratix::{
    cache::CacheService,
    config::{Config, LogFormat},
    database::Database,
    redis_client::RedisClient,
    repositories::PgTicketStore,
    services::{seed, ticket_expiry::TicketExpiryJob},
    AppState, Repositories,
};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Invalid configuration")?;

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log));
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    info!("Starting Ratix API ({})", config.app.environment);
    if config.uses_default_jwt_secret() {
        warn!("JWT_SECRET is not set, using the built-in development secret");
    }

    // Connect to the database
    let db = Database::new(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database connected");

    db.run_migrations().await.context("Failed to run migrations")?;

    // Redis is optional: without it the catalog is served uncached
    let cache = match &config.redis.url {
        Some(url) => match RedisClient::new(url).await {
            Ok(redis) => {
                info!("Redis connected");
                CacheService::new(redis, config.cache.catalog_ttl_seconds)
            }
            Err(e) => {
                warn!("Failed to connect to Redis, catalog cache disabled: {}", e);
                CacheService::disabled()
            }
        },
        None => CacheService::disabled(),
    };

    if config.features.seed_demo_data {
        seed::seed_demo_data(&db, &cache)
            .await
            .context("Failed to seed demo data")?;
    }

    // --- Start background tasks ---
    if config.features.enable_ticket_expiry {
        TicketExpiryJob::new(PgTicketStore::new(db.pool.clone()), &config.jobs).spawn();
    }

    // --- Start the web server ---
    let addr = format!("{}:{}", config.app.host, config.app.port);
    let state = Arc::new(AppState::new(config, cache, Repositories::postgres(&db)));
    let app = ratix::app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
