use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use super::{CinemaCatalog, RepoError, RepoResult};
use crate::models::{Cinema, ShowtimeVenue};
use crate::seating::TheaterLayout;

#[derive(Clone)]
pub struct PgCinemaCatalog {
    pool: PgPool,
}

impl PgCinemaCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Кинотеатр сеанса + колонки схемы зала (LEFT JOIN, зала может не быть)
#[derive(FromRow)]
struct VenueRow {
    #[sqlx(flatten)]
    cinema: Cinema,
    seat_rows: Option<i32>,
    seat_cols: Option<i32>,
    premium_from_row: Option<i32>,
}

#[async_trait]
impl CinemaCatalog for PgCinemaCatalog {
    async fn list_cities(&self) -> RepoResult<Vec<String>> {
        let cities = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT city FROM cinemas ORDER BY city"
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(cities)
    }

    async fn list_by_city(&self, city: &str) -> RepoResult<Vec<Cinema>> {
        let cinemas = sqlx::query_as::<_, Cinema>(
            "SELECT id, name, city, address, base_price
             FROM cinemas
             WHERE city = $1
             ORDER BY name"
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await?;
        Ok(cinemas)
    }

    async fn resolve_cinema_for_showtime(&self, showtime_id: i64) -> RepoResult<ShowtimeVenue> {
        let row = sqlx::query_as::<_, VenueRow>(
            r#"
            SELECT c.id, c.name, c.city, c.address, c.base_price,
                   t.seat_rows, t.seat_cols, t.premium_from_row
            FROM showtimes s
            JOIN cinemas c ON c.id = s.cinema_id
            LEFT JOIN theaters t ON t.id = s.theater_id
            WHERE s.id = $1
            "#
        )
        .bind(showtime_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("cinema for showtime {}", showtime_id)))?;

        // Битая схема в базе: отдаём стандартную
        let layout = match TheaterLayout::from_columns(row.seat_rows, row.seat_cols, row.premium_from_row) {
            Ok(layout) => layout,
            Err(e) => {
                warn!("Showtime {}: invalid theater layout ({}), using default", showtime_id, e);
                None
            }
        };

        Ok(ShowtimeVenue { cinema: row.cinema, layout })
    }
}
