use async_trait::async_trait;
use sqlx::PgPool;

use super::{RepoError, RepoResult, TicketStore};
use crate::models::{TicketStatus, TicketStatusFilter, TicketView};

const TICKET_VIEW_SELECT: &str = r#"
    SELECT t.id, t.user_id, t.movie_id, t.showtime_id, t.booking_code, t.seats,
           t.cinema_name, t.theater_name, t.price, t.status, t.created_at, t.updated_at,
           m.title AS movie_title, m.poster_url, m.duration, m.rating,
           s.start_time AS showtime_start
    FROM tickets t
    JOIN movies m ON m.id = t.movie_id
    JOIN showtimes s ON s.id = t.showtime_id
"#;

#[derive(Clone)]
pub struct PgTicketStore {
    pool: PgPool,
}

impl PgTicketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Переводит активные билеты уже прошедших сеансов в `completed`.
    /// Возвращает число обновлённых билетов.
    pub async fn complete_past_tickets(&self, grace_minutes: i32) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tickets t
            SET status = $1, updated_at = NOW()
            FROM showtimes s
            WHERE s.id = t.showtime_id
              AND t.status = $2
              AND s.start_time < NOW() - make_interval(mins => $3::int)
            "#
        )
        .bind(TicketStatus::Completed.as_str())
        .bind(TicketStatus::Active.as_str())
        .bind(grace_minutes)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn list_active_seat_codes(&self, showtime_id: i64) -> RepoResult<Vec<String>> {
        let seats = sqlx::query_scalar::<_, String>(
            "SELECT seats FROM tickets WHERE showtime_id = $1 AND status = ANY($2)"
        )
        .bind(showtime_id)
        .bind(TicketStatus::seat_holding())
        .fetch_all(&self.pool)
        .await?;
        Ok(seats)
    }

    async fn list_by_user(&self, user_id: i64, filter: TicketStatusFilter) -> RepoResult<Vec<TicketView>> {
        let tickets = match filter.statuses() {
            Some(statuses) => {
                let query = format!(
                    "{} WHERE t.user_id = $1 AND t.status = ANY($2) ORDER BY t.created_at DESC",
                    TICKET_VIEW_SELECT
                );
                sqlx::query_as::<_, TicketView>(&query)
                    .bind(user_id)
                    .bind(statuses)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let query = format!(
                    "{} WHERE t.user_id = $1 ORDER BY t.created_at DESC",
                    TICKET_VIEW_SELECT
                );
                sqlx::query_as::<_, TicketView>(&query)
                    .bind(user_id)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(tickets)
    }

    async fn find_by_id(&self, ticket_id: i64) -> RepoResult<TicketView> {
        let query = format!("{} WHERE t.id = $1", TICKET_VIEW_SELECT);
        sqlx::query_as::<_, TicketView>(&query)
            .bind(ticket_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("ticket {}", ticket_id)))
    }
}
