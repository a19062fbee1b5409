//! In-memory реализации репозиториев для тестов.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::{
    CastMember, Cinema, Genre, Movie, MovieDetail, MoviePage, MovieStatus, NewUser, ShowtimeListing,
    ShowtimeVenue, Ticket, TicketStatus, TicketStatusFilter, TicketView, User,
};
use crate::repositories::{
    CinemaCatalog, MovieCatalog, RepoError, RepoResult, TicketStore, UserRepository,
};
use crate::seating::TheaterLayout;

#[derive(Default)]
struct State {
    cinemas: Vec<Cinema>,
    venues: HashMap<i64, ShowtimeVenue>,
    tickets: Vec<Ticket>,
    users: Vec<User>,
    genres: Vec<Genre>,
    movies: Vec<Movie>,
    cast: Vec<CastMember>,
    showtimes: Vec<(i64, ShowtimeListing)>,
    fail_ticket_reads: bool,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn add_cinema(&self, id: i64, name: &str, city: &str, base_price: i64) -> Cinema {
        let cinema = Cinema {
            id,
            name: name.to_string(),
            city: city.to_string(),
            address: format!("{} street", name),
            base_price,
        };
        self.with_state(|s| s.cinemas.push(cinema.clone()));
        cinema
    }

    /// Сеанс в отдельном кинотеатре со стандартной схемой зала.
    pub fn add_showtime(&self, showtime_id: i64, base_price: i64) {
        self.insert_venue(showtime_id, base_price, None);
    }

    pub fn add_showtime_with_layout(&self, showtime_id: i64, base_price: i64, layout: TheaterLayout) {
        self.insert_venue(showtime_id, base_price, Some(layout));
    }

    fn insert_venue(&self, showtime_id: i64, base_price: i64, layout: Option<TheaterLayout>) {
        let cinema = Cinema {
            id: 100 + showtime_id,
            name: format!("Cinema {}", showtime_id),
            city: "Jakarta".to_string(),
            address: String::new(),
            base_price,
        };
        self.with_state(|s| {
            s.venues.insert(showtime_id, ShowtimeVenue { cinema, layout });
        });
    }

    /// Билет пользователя 1.
    pub fn add_ticket(&self, showtime_id: i64, seats: &str, status: TicketStatus) -> i64 {
        self.add_ticket_for(1, showtime_id, seats, status)
    }

    pub fn add_ticket_for(&self, user_id: i64, showtime_id: i64, seats: &str, status: TicketStatus) -> i64 {
        self.with_state(|s| {
            let id = s.tickets.len() as i64 + 1;
            let created_at = Utc.with_ymd_and_hms(2024, 11, 1, 10, 0, 0).unwrap() + Duration::hours(id);
            s.tickets.push(Ticket {
                id,
                user_id,
                movie_id: 1,
                showtime_id,
                booking_code: format!("BOOK-{:05}", id),
                seats: seats.to_string(),
                cinema_name: "Cinema XXI, Grand Indonesia".to_string(),
                theater_name: "Studio 1".to_string(),
                price: 75_000,
                status: status.as_str().to_string(),
                created_at,
                updated_at: created_at,
            });
            id
        })
    }

    pub fn fail_ticket_reads(&self) {
        self.with_state(|s| s.fail_ticket_reads = true);
    }

    pub fn add_genre(&self, id: i64, name: &str) {
        self.with_state(|s| {
            s.genres.push(Genre {
                id,
                name: name.to_string(),
            })
        });
    }

    pub fn add_movie(&self, id: i64, title: &str, status: MovieStatus, genres: &[&str]) {
        self.with_state(|s| {
            s.movies.push(Movie {
                id,
                title: title.to_string(),
                description: format!("{} description", title),
                duration: 135,
                rating: 8.9,
                poster_url: format!("https://example.com/{}.jpg", id),
                release_date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
                status: status.as_str().to_string(),
                genres: genres.iter().map(|g| g.to_string()).collect(),
            })
        });
    }

    pub fn add_cast(&self, movie_id: i64, name: &str, role: &str) {
        self.with_state(|s| {
            let id = s.cast.len() as i64 + 1;
            s.cast.push(CastMember {
                id,
                movie_id,
                name: name.to_string(),
                role: role.to_string(),
                character_name: String::new(),
                photo_url: String::new(),
            })
        });
    }

    pub fn add_movie_showtime(&self, movie_id: i64, showtime: ShowtimeListing) {
        self.with_state(|s| s.showtimes.push((movie_id, showtime)));
    }

    fn ticket_view(ticket: &Ticket) -> TicketView {
        TicketView {
            ticket: ticket.clone(),
            movie_title: "The Crimson Blade".to_string(),
            poster_url: "https://example.com/poster1.jpg".to_string(),
            duration: 135,
            rating: 8.9,
            showtime_start: Utc.with_ymd_and_hms(2024, 11, 16, 19, 30, 0).unwrap(),
        }
    }

    fn page(movies: Vec<Movie>, limit: i64, offset: i64) -> MoviePage {
        let total = movies.len() as i64;
        let movies = movies
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        MoviePage { movies, total }
    }
}

fn unavailable() -> RepoError {
    RepoError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl CinemaCatalog for InMemoryStore {
    async fn list_cities(&self) -> RepoResult<Vec<String>> {
        Ok(self.with_state(|s| {
            let mut cities: Vec<String> = s.cinemas.iter().map(|c| c.city.clone()).collect();
            cities.sort();
            cities.dedup();
            cities
        }))
    }

    async fn list_by_city(&self, city: &str) -> RepoResult<Vec<Cinema>> {
        Ok(self.with_state(|s| s.cinemas.iter().filter(|c| c.city == city).cloned().collect()))
    }

    async fn resolve_cinema_for_showtime(&self, showtime_id: i64) -> RepoResult<ShowtimeVenue> {
        self.with_state(|s| s.venues.get(&showtime_id).cloned())
            .ok_or_else(|| RepoError::NotFound(format!("cinema for showtime {}", showtime_id)))
    }
}

#[async_trait]
impl TicketStore for InMemoryStore {
    async fn list_active_seat_codes(&self, showtime_id: i64) -> RepoResult<Vec<String>> {
        self.with_state(|s| {
            if s.fail_ticket_reads {
                return Err(unavailable());
            }
            Ok(s.tickets
                .iter()
                .filter(|t| t.showtime_id == showtime_id && t.status().occupies_seats())
                .map(|t| t.seats.clone())
                .collect())
        })
    }

    async fn list_by_user(&self, user_id: i64, filter: TicketStatusFilter) -> RepoResult<Vec<TicketView>> {
        self.with_state(|s| {
            if s.fail_ticket_reads {
                return Err(unavailable());
            }
            let mut tickets: Vec<TicketView> = s
                .tickets
                .iter()
                .filter(|t| t.user_id == user_id && filter.matches(t.status()))
                .map(Self::ticket_view)
                .collect();
            tickets.sort_by(|a, b| b.ticket.created_at.cmp(&a.ticket.created_at));
            Ok(tickets)
        })
    }

    async fn find_by_id(&self, ticket_id: i64) -> RepoResult<TicketView> {
        self.with_state(|s| {
            s.tickets
                .iter()
                .find(|t| t.id == ticket_id)
                .map(Self::ticket_view)
                .ok_or_else(|| RepoError::NotFound(format!("ticket {}", ticket_id)))
        })
    }
}

#[async_trait]
impl MovieCatalog for InMemoryStore {
    async fn list_genres(&self) -> RepoResult<Vec<Genre>> {
        Ok(self.with_state(|s| s.genres.clone()))
    }

    async fn list_by_status(&self, status: MovieStatus, limit: i64, offset: i64) -> RepoResult<MoviePage> {
        let movies = self.with_state(|s| {
            s.movies
                .iter()
                .filter(|m| m.status == status.as_str())
                .cloned()
                .collect()
        });
        Ok(Self::page(movies, limit, offset))
    }

    async fn list_by_genre(&self, genre: &str, limit: i64, offset: i64) -> RepoResult<MoviePage> {
        let movies = self.with_state(|s| {
            s.movies
                .iter()
                .filter(|m| m.genres.iter().any(|g| g == genre))
                .cloned()
                .collect()
        });
        Ok(Self::page(movies, limit, offset))
    }

    async fn find_detail(&self, movie_id: i64) -> RepoResult<MovieDetail> {
        self.with_state(|s| {
            let movie = s
                .movies
                .iter()
                .find(|m| m.id == movie_id)
                .cloned()
                .ok_or_else(|| RepoError::NotFound(format!("movie {}", movie_id)))?;
            let cast = s.cast.iter().filter(|c| c.movie_id == movie_id).cloned().collect();
            let showtimes = s
                .showtimes
                .iter()
                .filter(|(m, _)| *m == movie_id)
                .map(|(_, st)| st.clone())
                .collect();
            Ok(MovieDetail { movie, cast, showtimes })
        })
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, user_id: i64) -> RepoResult<User> {
        self.with_state(|s| s.users.iter().find(|u| u.id == user_id).cloned())
            .ok_or_else(|| RepoError::NotFound(format!("user {}", user_id)))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<User> {
        self.with_state(|s| s.users.iter().find(|u| u.email == email).cloned())
            .ok_or_else(|| RepoError::NotFound(format!("user {}", email)))
    }

    async fn create(&self, user: NewUser) -> RepoResult<User> {
        self.with_state(|s| {
            if s.users.iter().any(|u| u.email == user.email) {
                return Err(RepoError::Conflict(format!("user {}", user.email)));
            }
            let created = User {
                id: s.users.len() as i64 + 1,
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
                created_at: Utc::now(),
            };
            s.users.push(created.clone());
            Ok(created)
        })
    }
}

/// Приложение поверх in-memory хранилища, без Redis.
pub fn test_app(store: std::sync::Arc<InMemoryStore>) -> axum::Router {
    let repos = crate::Repositories {
        cinemas: store.clone(),
        movies: store.clone(),
        tickets: store.clone(),
        users: store,
    };
    let mut state = crate::AppState::new(
        crate::config::Config::for_tests(),
        crate::cache::CacheService::disabled(),
        repos,
    );
    state.users = state.users.with_hash_cost(4);
    crate::app(std::sync::Arc::new(state))
}

/// Отправляет запрос в приложение и возвращает статус и тело.
pub async fn send(
    app: axum::Router,
    request: axum::http::Request<axum::body::Body>,
) -> (axum::http::StatusCode, axum::http::HeaderMap, String) {
    use tower::ServiceExt;

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn get(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap()
}
