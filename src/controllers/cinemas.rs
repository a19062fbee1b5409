use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::cached_json;
use crate::cache::catalog::catalog_key;
use crate::error::AppResult;
use crate::models::Cinema;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/locations", get(locations))
        .route("/cinemas", get(cinemas_by_city))
}

#[derive(Debug, Deserialize)]
pub struct CinemasQuery {
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub cities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CinemaResponse {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: String,
}

impl From<Cinema> for CinemaResponse {
    fn from(cinema: Cinema) -> Self {
        Self {
            id: cinema.id,
            name: cinema.name,
            city: cinema.city,
            address: cinema.address,
        }
    }
}

// GET /locations
async fn locations(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let cinemas = &state.cinemas;
    cached_json(&state, catalog_key("locations", &[]), move || async move {
        Ok(LocationsResponse {
            cities: cinemas.locations().await?,
        })
    })
    .await
}

// GET /cinemas?city=
async fn cinemas_by_city(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CinemasQuery>,
) -> AppResult<Response> {
    let city = params.city.unwrap_or_default();
    let city = city.trim();
    let cinemas = &state.cinemas;
    cached_json(&state, catalog_key("cinemas", &[("city", city)]), move || async move {
        let list = cinemas.cinemas_in(city).await?;
        Ok(list.into_iter().map(CinemaResponse::from).collect::<Vec<_>>())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{get, send, test_app, InMemoryStore};
    use axum::http::StatusCode;

    fn store() -> Arc<InMemoryStore> {
        let store = InMemoryStore::new();
        store.add_cinema(1, "Cinema XXI, Grand Indonesia", "Jakarta", 50_000);
        store.add_cinema(2, "CGV, Paris Van Java", "Bandung", 35_000);
        Arc::new(store)
    }

    #[tokio::test]
    async fn lists_cities() {
        let (status, _, body) = send(test_app(store()), get("/locations")).await;
        assert_eq!(status, StatusCode::OK);
        let locations: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(locations["cities"], serde_json::json!(["Bandung", "Jakarta"]));
    }

    #[tokio::test]
    async fn lists_cinemas_in_city() {
        let (status, _, body) = send(test_app(store()), get("/cinemas?city=Jakarta")).await;
        assert_eq!(status, StatusCode::OK);
        let cinemas: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(cinemas.as_array().unwrap().len(), 1);
        assert_eq!(cinemas[0]["name"], "Cinema XXI, Grand Indonesia");
        assert!(cinemas[0].get("base_price").is_none());
    }

    #[tokio::test]
    async fn city_is_required() {
        let (status, _, _) = send(test_app(store()), get("/cinemas")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
