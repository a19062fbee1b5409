pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod error;
pub mod middleware;
pub mod models;
pub mod redis_client;
pub mod repositories;
pub mod seating;
pub mod services;

#[cfg(test)]
mod testing;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::CacheService;
use crate::config::Config;
use crate::database::Database;
use crate::repositories::{
    CinemaCatalog, MovieCatalog, PgCinemaCatalog, PgMovieCatalog, PgTicketStore, PgUserRepository,
    TicketStore, UserRepository,
};
use crate::seating::{PricingResolver, SeatLayoutService};
use crate::services::{CinemaService, MovieService, TicketService, UserService};

/// Хранилища, из которых собираются сервисы.
#[derive(Clone)]
pub struct Repositories {
    pub cinemas: Arc<dyn CinemaCatalog>,
    pub movies: Arc<dyn MovieCatalog>,
    pub tickets: Arc<dyn TicketStore>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn postgres(db: &Database) -> Self {
        Self {
            cinemas: Arc::new(PgCinemaCatalog::new(db.pool.clone())),
            movies: Arc::new(PgMovieCatalog::new(db.pool.clone())),
            tickets: Arc::new(PgTicketStore::new(db.pool.clone())),
            users: Arc::new(PgUserRepository::new(db.pool.clone())),
        }
    }
}

// Shared state для всего приложения
pub struct AppState {
    pub config: Config,
    pub cache: CacheService,
    pub users: UserService,
    pub movies: MovieService,
    pub cinemas: CinemaService,
    pub tickets: TicketService,
    pub seats: SeatLayoutService,
}

impl AppState {
    pub fn new(config: Config, cache: CacheService, repos: Repositories) -> Self {
        let seats = SeatLayoutService::new(
            repos.cinemas.clone(),
            repos.tickets.clone(),
            PricingResolver::from_config(&config.pricing),
        );
        Self {
            users: UserService::new(repos.users, config.jwt.clone()),
            movies: MovieService::new(repos.movies),
            cinemas: CinemaService::new(repos.cinemas),
            tickets: TicketService::new(repos.tickets),
            seats,
            cache,
            config,
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "Ratix API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .merge(controllers::routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
