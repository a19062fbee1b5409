use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// Жизненный цикл билета. `history` - устаревшее значение старых записей,
/// трактуется так же, как `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Active,
    History,
    Completed,
    Cancelled,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Active,
        TicketStatus::History,
        TicketStatus::Completed,
        TicketStatus::Cancelled,
    ];

    /// Статусы, в которых билет держит места, как строки для SQL.
    pub fn seat_holding() -> Vec<String> {
        Self::ALL
            .iter()
            .filter(|s| s.occupies_seats())
            .map(|s| s.as_str().to_string())
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Active => "active",
            TicketStatus::History => "history",
            TicketStatus::Completed => "completed",
            TicketStatus::Cancelled => "cancelled",
        }
    }

    /// Занимает ли билет в этом статусе свои места.
    pub fn occupies_seats(&self) -> bool {
        !matches!(self, TicketStatus::Cancelled)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown ticket status: {0}")]
pub struct UnknownTicketStatus(pub String);

impl FromStr for TicketStatus {
    type Err = UnknownTicketStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(TicketStatus::Active),
            "history" => Ok(TicketStatus::History),
            "completed" => Ok(TicketStatus::Completed),
            "cancelled" => Ok(TicketStatus::Cancelled),
            other => Err(UnknownTicketStatus(other.to_string())),
        }
    }
}

/// Фильтр списка "мои билеты".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatusFilter {
    All,
    Active,
    History,
}

impl TicketStatusFilter {
    /// Статусы фильтра как строки для SQL. `None` - без фильтра по статусу.
    pub fn statuses(&self) -> Option<Vec<String>> {
        if *self == TicketStatusFilter::All {
            return None;
        }
        Some(
            TicketStatus::ALL
                .iter()
                .filter(|s| self.matches(**s))
                .map(|s| s.as_str().to_string())
                .collect(),
        )
    }

    pub fn matches(&self, status: TicketStatus) -> bool {
        match self {
            TicketStatusFilter::All => true,
            TicketStatusFilter::Active => status == TicketStatus::Active,
            TicketStatusFilter::History => status != TicketStatus::Active,
        }
    }
}

impl FromStr for TicketStatusFilter {
    type Err = UnknownTicketStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(TicketStatusFilter::All),
            "active" => Ok(TicketStatusFilter::Active),
            "history" => Ok(TicketStatusFilter::History),
            other => Err(UnknownTicketStatus(other.to_string())),
        }
    }
}

/// Запись о бронировании. Названия кинотеатра и зала сохраняются на момент
/// покупки и не подтягиваются из каталога.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub showtime_id: i64,
    pub booking_code: String,
    /// Одно или несколько мест через запятую, например "G14, G15".
    pub seats: String,
    pub cinema_name: String,
    pub theater_name: String,
    pub price: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Нераспознанный статус считаем активным: такой билет не должен
    /// освобождать свои места.
    pub fn status(&self) -> TicketStatus {
        self.status.parse().unwrap_or(TicketStatus::Active)
    }
}

/// Билет вместе с данными фильма и сеанса для списков и карточки билета.
#[derive(Debug, Clone, FromRow)]
pub struct TicketView {
    #[sqlx(flatten)]
    pub ticket: Ticket,
    pub movie_title: String,
    pub poster_url: String,
    pub duration: i32,
    pub rating: f64,
    pub showtime_start: DateTime<Utc>,
}
