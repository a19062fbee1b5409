use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::seating::TheaterLayout;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Cinema {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: String,
    /// Базовая цена места в целых единицах валюты.
    pub base_price: i64,
}

/// Кинотеатр, которому принадлежит сеанс, и схема зала (если она задана).
#[derive(Debug, Clone)]
pub struct ShowtimeVenue {
    pub cinema: Cinema,
    pub layout: Option<TheaterLayout>,
}
