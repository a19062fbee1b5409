//! Схема мест сеанса.
//!
//! - `map` - геометрия зала и категории рядов;
//! - `occupancy` - занятые места из неотменённых билетов;
//! - `pricing` - цена места по категории;
//! - `layout` - сборка итоговой схемы для клиента.

pub mod layout;
pub mod map;
pub mod occupancy;
pub mod pricing;

pub use layout::{
    parse_showtime_id, Seat, SeatLayout, SeatLayoutResponse, SeatLayoutService, SeatLegend,
    SeatStatus,
};
pub use map::{LayoutError, SeatCoordinate, SeatTier, TheaterLayout};
pub use occupancy::{normalize_seat_code, BookingAggregator, OccupiedSeats};
pub use pricing::PricingResolver;

use crate::repositories::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum SeatLayoutError {
    #[error("invalid showtime identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("failed to resolve cinema for showtime {showtime_id}: {source}")]
    CinemaResolutionFailed {
        showtime_id: i64,
        #[source]
        source: RepoError,
    },

    #[error("failed to fetch booked seats for showtime {showtime_id}: {source}")]
    BookingFetchFailed {
        showtime_id: i64,
        #[source]
        source: RepoError,
    },
}
