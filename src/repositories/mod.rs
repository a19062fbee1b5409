//! Доступ к хранилищу. Сервисы зависят от трейтов, Postgres-реализации
//! лежат в подмодулях.

pub mod cinema;
pub mod movie;
pub mod ticket;
pub mod user;

use async_trait::async_trait;

use crate::models::{
    Cinema, Genre, MovieDetail, MoviePage, MovieStatus, NewUser, ShowtimeVenue, TicketStatusFilter,
    TicketView, User,
};

pub use cinema::PgCinemaCatalog;
pub use movie::PgMovieCatalog;
pub use ticket::PgTicketStore;
pub use user::PgUserRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Каталог кинотеатров.
#[async_trait]
pub trait CinemaCatalog: Send + Sync {
    async fn list_cities(&self) -> RepoResult<Vec<String>>;

    async fn list_by_city(&self, city: &str) -> RepoResult<Vec<Cinema>>;

    /// Кинотеатр сеанса и схема зала. `NotFound`, если у сеанса нет кинотеатра.
    async fn resolve_cinema_for_showtime(&self, showtime_id: i64) -> RepoResult<ShowtimeVenue>;
}

/// Хранилище билетов.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Строки мест всех неотменённых билетов сеанса, как они лежат в базе.
    async fn list_active_seat_codes(&self, showtime_id: i64) -> RepoResult<Vec<String>>;

    /// Билеты пользователя, новые первыми.
    async fn list_by_user(&self, user_id: i64, filter: TicketStatusFilter) -> RepoResult<Vec<TicketView>>;

    async fn find_by_id(&self, ticket_id: i64) -> RepoResult<TicketView>;
}

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn list_genres(&self) -> RepoResult<Vec<Genre>>;

    async fn list_by_status(&self, status: MovieStatus, limit: i64, offset: i64) -> RepoResult<MoviePage>;

    async fn list_by_genre(&self, genre: &str, limit: i64, offset: i64) -> RepoResult<MoviePage>;

    async fn find_detail(&self, movie_id: i64) -> RepoResult<MovieDetail>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, user_id: i64) -> RepoResult<User>;

    async fn find_by_email(&self, email: &str) -> RepoResult<User>;

    /// `Conflict`, если email уже занят.
    async fn create(&self, user: NewUser) -> RepoResult<User>;
}
