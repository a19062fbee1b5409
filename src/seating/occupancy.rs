use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::SeatLayoutError;
use crate::repositories::TicketStore;

/// Приводит код места к виду, в котором его генерирует схема зала:
/// без пробелов, в верхнем регистре. Пустой фрагмент - `None`.
pub fn normalize_seat_code(raw: &str) -> Option<String> {
    let code: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    (!code.is_empty()).then_some(code)
}

/// Множество занятых мест сеанса.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupiedSeats {
    codes: HashSet<String>,
}

impl OccupiedSeats {
    /// Строки мест из билетов: в одной строке может быть несколько мест
    /// через запятую ("G14, G15").
    pub fn from_seat_strings<I, S>(seat_strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = seat_strings
            .into_iter()
            .flat_map(|seats| {
                seats
                    .as_ref()
                    .split(',')
                    .filter_map(normalize_seat_code)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { codes }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Собирает занятые места сеанса из неотменённых билетов.
#[derive(Clone)]
pub struct BookingAggregator {
    tickets: Arc<dyn TicketStore>,
}

impl BookingAggregator {
    pub fn new(tickets: Arc<dyn TicketStore>) -> Self {
        Self { tickets }
    }

    /// Несуществующий сеанс даёт пустое множество. Ошибка хранилища
    /// прерывает весь запрос: занятость нельзя занижать.
    pub async fn occupied_seats(&self, showtime_id: i64) -> Result<OccupiedSeats, SeatLayoutError> {
        let seat_strings = self
            .tickets
            .list_active_seat_codes(showtime_id)
            .await
            .map_err(|source| SeatLayoutError::BookingFetchFailed { showtime_id, source })?;

        let occupied = OccupiedSeats::from_seat_strings(&seat_strings);
        debug!(
            "Showtime {}: {} active tickets, {} occupied seats",
            showtime_id,
            seat_strings.len(),
            occupied.len()
        );
        Ok(occupied)
    }
}
