use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use crate::error::AppResult;
use crate::seating::{parse_showtime_id, SeatLayoutResponse};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/showtimes/{id}/seats", get(seat_layout))
}

// GET /showtimes/{id}/seats
// Идентификатор разбираем сами, чтобы ответить 400 с нашим текстом
async fn seat_layout(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<SeatLayoutResponse>> {
    let showtime_id = parse_showtime_id(&raw_id)?;
    let layout = state.seats.compose_layout(showtime_id).await?;
    Ok(Json(layout))
}
