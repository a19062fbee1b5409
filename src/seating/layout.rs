use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::map::SeatTier;
use super::occupancy::BookingAggregator;
use super::pricing::PricingResolver;
use super::SeatLayoutError;
use crate::repositories::{CinemaCatalog, TicketStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Occupied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub row: char,
    pub number: u32,
    pub status: SeatStatus,
    #[serde(rename = "type")]
    pub tier: SeatTier,
    pub price: i64,
}

impl Seat {
    pub fn code(&self) -> String {
        format!("{}{}", self.row, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatLayout {
    pub rows: u32,
    pub cols: u32,
    pub seats: Vec<Seat>,
}

/// Подписи статусов для клиента. `selected` на сервере не вычисляется:
/// это выбор пользователя на клиенте до покупки.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatLegend {
    pub available: &'static str,
    pub occupied: &'static str,
    pub selected: &'static str,
}

impl Default for SeatLegend {
    fn default() -> Self {
        Self {
            available: "Available",
            occupied: "Occupied",
            selected: "Selected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatLayoutResponse {
    pub layout: SeatLayout,
    pub legend: SeatLegend,
}

/// Разбирает идентификатор сеанса из пути запроса.
pub fn parse_showtime_id(raw: &str) -> Result<i64, SeatLayoutError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(SeatLayoutError::InvalidIdentifier(raw.to_string())),
    }
}

/// Схема мест сеанса: геометрия зала + занятые места + цены.
///
/// Ничего не кеширует, каждый вызов читает текущее состояние хранилища.
#[derive(Clone)]
pub struct SeatLayoutService {
    catalog: Arc<dyn CinemaCatalog>,
    bookings: BookingAggregator,
    pricing: PricingResolver,
}

impl SeatLayoutService {
    pub fn new(
        catalog: Arc<dyn CinemaCatalog>,
        tickets: Arc<dyn TicketStore>,
        pricing: PricingResolver,
    ) -> Self {
        Self {
            catalog,
            bookings: BookingAggregator::new(tickets),
            pricing,
        }
    }

    pub async fn compose_layout(&self, showtime_id: i64) -> Result<SeatLayoutResponse, SeatLayoutError> {
        // 1. Кинотеатр сеанса: без базовой цены считать нечего
        let venue = self
            .catalog
            .resolve_cinema_for_showtime(showtime_id)
            .await
            .map_err(|source| SeatLayoutError::CinemaResolutionFailed { showtime_id, source })?;

        // 2. Занятые места
        let occupied = self.bookings.occupied_seats(showtime_id).await?;

        // 3. Геометрия зала
        let geometry = venue.layout.unwrap_or_default();

        // 4. Статус и цена каждого места, в порядке генерации
        let base_price = venue.cinema.base_price;
        let seats: Vec<Seat> = geometry
            .coordinates()
            .into_iter()
            .map(|coordinate| Seat {
                row: coordinate.row,
                number: coordinate.number,
                status: if occupied.contains(&coordinate.code()) {
                    SeatStatus::Occupied
                } else {
                    SeatStatus::Available
                },
                tier: coordinate.tier,
                price: self.pricing.resolve(base_price, coordinate.tier),
            })
            .collect();

        let occupied_on_grid = seats
            .iter()
            .filter(|seat| seat.status == SeatStatus::Occupied)
            .count();
        if occupied_on_grid < occupied.len() {
            warn!(
                "Showtime {}: {} booked seat codes are outside the {}x{} layout",
                showtime_id,
                occupied.len() - occupied_on_grid,
                geometry.rows(),
                geometry.cols()
            );
        }
        info!(
            "Seat layout for showtime {} (cinema {}): {} seats, {} occupied",
            showtime_id,
            venue.cinema.id,
            seats.len(),
            occupied_on_grid
        );

        // 5. Ответ
        Ok(SeatLayoutResponse {
            layout: SeatLayout {
                rows: geometry.rows(),
                cols: geometry.cols(),
                seats,
            },
            legend: SeatLegend::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TicketStatus;
    use crate::repositories::RepoError;
    use crate::seating::TheaterLayout;
    use crate::testing::InMemoryStore;

    fn service(store: InMemoryStore) -> SeatLayoutService {
        let store = Arc::new(store);
        SeatLayoutService::new(store.clone(), store, PricingResolver::new(25_000))
    }

    fn seat<'a>(layout: &'a SeatLayoutResponse, code: &str) -> &'a Seat {
        layout
            .layout
            .seats
            .iter()
            .find(|s| s.code() == code)
            .unwrap_or_else(|| panic!("seat {code} missing"))
    }

    #[tokio::test]
    async fn no_tickets_means_everything_available() {
        let store = InMemoryStore::new();
        store.add_showtime(1, 50_000);

        let layout = service(store).compose_layout(1).await.unwrap();

        assert_eq!(layout.layout.rows, 12);
        assert_eq!(layout.layout.cols, 8);
        assert_eq!(layout.layout.seats.len(), 96);
        assert!(layout
            .layout
            .seats
            .iter()
            .all(|s| s.status == SeatStatus::Available));
    }

    #[tokio::test]
    async fn premium_rows_carry_surcharge() {
        let store = InMemoryStore::new();
        store.add_showtime(1, 50_000);

        let layout = service(store).compose_layout(1).await.unwrap();

        for seat in &layout.layout.seats {
            if matches!(seat.row, 'J' | 'K' | 'L') {
                assert_eq!(seat.tier, SeatTier::Premium);
                assert_eq!(seat.price, 75_000);
            } else {
                assert_eq!(seat.tier, SeatTier::Standard);
                assert_eq!(seat.price, 50_000);
            }
        }
    }

    #[tokio::test]
    async fn order_starts_at_a1_and_ends_at_l8() {
        let store = InMemoryStore::new();
        store.add_showtime(1, 50_000);

        let layout = service(store).compose_layout(1).await.unwrap();
        let seats = &layout.layout.seats;

        assert_eq!((seats[0].row, seats[0].number), ('A', 1));
        assert_eq!((seats[95].row, seats[95].number), ('L', 8));
    }

    #[tokio::test]
    async fn mixed_tickets_scenario() {
        let store = InMemoryStore::new();
        store.add_showtime(42, 35_000);
        store.add_ticket(42, "A1", TicketStatus::Active);
        store.add_ticket(42, "J3, J4", TicketStatus::Active);

        let layout = service(store).compose_layout(42).await.unwrap();

        let a1 = seat(&layout, "A1");
        assert_eq!(a1.status, SeatStatus::Occupied);
        assert_eq!(a1.tier, SeatTier::Standard);
        assert_eq!(a1.price, 35_000);

        for code in ["J3", "J4"] {
            let s = seat(&layout, code);
            assert_eq!(s.status, SeatStatus::Occupied);
            assert_eq!(s.tier, SeatTier::Premium);
            assert_eq!(s.price, 60_000);
        }

        let available: Vec<&Seat> = layout
            .layout
            .seats
            .iter()
            .filter(|s| s.status == SeatStatus::Available)
            .collect();
        assert_eq!(available.len(), 93);
        for s in available {
            let expected = if s.tier == SeatTier::Premium { 60_000 } else { 35_000 };
            assert_eq!(s.price, expected);
        }
    }

    #[tokio::test]
    async fn multi_seat_ticket_occupies_exactly_its_seats() {
        let store = InMemoryStore::new();
        store.add_showtime_with_layout(1, 50_000, TheaterLayout::new(12, 16, 9).unwrap());
        store.add_ticket(1, "G14, G15", TicketStatus::Active);

        let layout = service(store).compose_layout(1).await.unwrap();

        let occupied: Vec<String> = layout
            .layout
            .seats
            .iter()
            .filter(|s| s.status == SeatStatus::Occupied)
            .map(Seat::code)
            .collect();
        assert_eq!(occupied, vec!["G14".to_string(), "G15".to_string()]);
    }

    #[tokio::test]
    async fn cancelled_ticket_leaves_seat_available() {
        let store = InMemoryStore::new();
        store.add_showtime(1, 50_000);
        store.add_ticket(1, "A1", TicketStatus::Cancelled);

        let layout = service(store).compose_layout(1).await.unwrap();

        assert_eq!(seat(&layout, "A1").status, SeatStatus::Available);
    }

    #[tokio::test]
    async fn repeated_calls_are_identical() {
        let store = InMemoryStore::new();
        store.add_showtime(3, 40_000);
        store.add_ticket(3, "C2, K7", TicketStatus::Active);
        let service = service(store);

        let first = service.compose_layout(3).await.unwrap();
        let second = service.compose_layout(3).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn theater_layout_overrides_default_geometry() {
        let store = InMemoryStore::new();
        store.add_showtime_with_layout(5, 30_000, TheaterLayout::new(3, 4, 2).unwrap());

        let layout = service(store).compose_layout(5).await.unwrap();

        assert_eq!(layout.layout.rows, 3);
        assert_eq!(layout.layout.cols, 4);
        assert_eq!(layout.layout.seats.len(), 12);
        assert_eq!(seat(&layout, "B4").price, 30_000);
        assert_eq!(seat(&layout, "C1").tier, SeatTier::Premium);
        assert_eq!(seat(&layout, "C1").price, 55_000);
    }

    #[tokio::test]
    async fn missing_cinema_aborts() {
        let store = InMemoryStore::new();
        store.add_ticket(9, "A1", TicketStatus::Active);

        let err = service(store).compose_layout(9).await.unwrap_err();

        assert!(matches!(
            err,
            SeatLayoutError::CinemaResolutionFailed { showtime_id: 9, source: RepoError::NotFound(_) }
        ));
    }

    #[tokio::test]
    async fn booking_failure_aborts_without_partial_layout() {
        let store = InMemoryStore::new();
        store.add_showtime(1, 50_000);
        store.fail_ticket_reads();

        let err = service(store).compose_layout(1).await.unwrap_err();

        assert!(matches!(err, SeatLayoutError::BookingFetchFailed { showtime_id: 1, .. }));
    }

    #[test]
    fn seat_serializes_with_wire_names() {
        let seat = Seat {
            row: 'A',
            number: 1,
            status: SeatStatus::Available,
            tier: SeatTier::Standard,
            price: 50_000,
        };
        let json = serde_json::to_value(&seat).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "row": "A",
                "number": 1,
                "status": "available",
                "type": "standard",
                "price": 50000
            })
        );
    }

    #[test]
    fn showtime_id_parsing() {
        assert_eq!(parse_showtime_id("42").unwrap(), 42);
        assert!(matches!(
            parse_showtime_id("abc"),
            Err(SeatLayoutError::InvalidIdentifier(_))
        ));
        assert!(parse_showtime_id("0").is_err());
        assert!(parse_showtime_id("-3").is_err());
    }
}
