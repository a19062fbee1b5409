use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{TicketStatus, TicketStatusFilter, TicketView};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tickets", get(my_tickets))
        .route("/tickets/{id}", get(ticket_detail))
}

#[derive(Debug, Deserialize)]
pub struct TicketsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TicketListItem {
    pub id: i64,
    pub movie_title: String,
    pub poster_url: String,
    pub date: String,
    pub time: String,
    pub cinema_name: String,
    pub status: TicketStatus,
    pub is_active: bool,
}

impl From<TicketView> for TicketListItem {
    fn from(view: TicketView) -> Self {
        let status = view.ticket.status();
        Self {
            id: view.ticket.id,
            movie_title: view.movie_title,
            poster_url: view.poster_url,
            date: view.showtime_start.format("%Y-%m-%d").to_string(),
            time: view.showtime_start.format("%H:%M").to_string(),
            cinema_name: view.ticket.cinema_name,
            status,
            is_active: status == TicketStatus::Active,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TicketDetailResponse {
    pub id: i64,
    pub movie_title: String,
    pub poster_url: String,
    pub duration: i32,
    pub rating: f64,
    pub date_time: DateTime<Utc>,
    pub cinema_name: String,
    pub theater_name: String,
    pub seats: String,
    pub booking_code: String,
    pub price: i64,
    pub status: TicketStatus,
}

impl From<TicketView> for TicketDetailResponse {
    fn from(view: TicketView) -> Self {
        let status = view.ticket.status();
        Self {
            id: view.ticket.id,
            movie_title: view.movie_title,
            poster_url: view.poster_url,
            duration: view.duration,
            rating: view.rating,
            date_time: view.showtime_start,
            cinema_name: view.ticket.cinema_name,
            theater_name: view.ticket.theater_name,
            seats: view.ticket.seats,
            booking_code: view.ticket.booking_code,
            price: view.ticket.price,
            status,
        }
    }
}

// GET /tickets?status=
async fn my_tickets(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(params): Query<TicketsQuery>,
) -> AppResult<Json<Vec<TicketListItem>>> {
    let filter = params
        .status
        .as_deref()
        .unwrap_or_default()
        .parse::<TicketStatusFilter>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let tickets = state.tickets.my_tickets(user.user_id, filter).await?;
    Ok(Json(tickets.into_iter().map(TicketListItem::from).collect()))
}

// GET /tickets/{id}
async fn ticket_detail(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(ticket_id): Path<i64>,
) -> AppResult<Json<TicketDetailResponse>> {
    let ticket = state.tickets.ticket_detail(user.user_id, ticket_id).await?;
    Ok(Json(ticket.into()))
}
