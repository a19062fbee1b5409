use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::cached_json;
use crate::cache::catalog::catalog_key;
use crate::error::AppResult;
use crate::models::{CastMember, Movie, MovieDetail};
use crate::services::{MovieCategory, Pagination};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/categories", get(list_categories))
        .route("/movies/banner", get(banner))
        .route("/movies/{id}", get(movie_detail))
}

#[derive(Debug, Deserialize)]
pub struct MoviesQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MovieListResponse {
    pub movies: Vec<Movie>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub movie_id: i64,
    pub title: String,
    pub poster_url: String,
    pub rating: f64,
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ShowtimeResponse {
    pub id: i64,
    pub date: String,
    pub start_time: String,
    pub cinema_name: String,
    pub price: i64,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailResponse {
    #[serde(flatten)]
    pub movie: Movie,
    pub cast: Vec<CastMember>,
    pub showtimes: Vec<ShowtimeResponse>,
}

impl From<MovieDetail> for MovieDetailResponse {
    fn from(detail: MovieDetail) -> Self {
        let showtimes = detail
            .showtimes
            .into_iter()
            .map(|s| ShowtimeResponse {
                id: s.id,
                date: s.start_time.format("%Y-%m-%d").to_string(),
                start_time: s.start_time.format("%H:%M").to_string(),
                cinema_name: s.cinema_name,
                price: s.base_price,
            })
            .collect();
        Self {
            movie: detail.movie,
            cast: detail.cast,
            showtimes,
        }
    }
}

// GET /movies?category=&page=&pageSize=
async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MoviesQuery>,
) -> AppResult<Response> {
    let category_raw = params.category.unwrap_or_default();
    let category = MovieCategory::parse(&category_raw);
    let pagination = Pagination::new(params.page, params.page_size);

    let key = catalog_key(
        "movies",
        &[
            ("category", category_raw.trim()),
            ("p", &pagination.page.to_string()),
            ("ps", &pagination.page_size.to_string()),
        ],
    );

    let movies = &state.movies;
    let category = &category;
    cached_json(&state, key, move || async move {
        let page = movies.list(category, pagination).await?;
        Ok(MovieListResponse {
            movies: page.movies,
            page: pagination.page,
            page_size: pagination.page_size,
            total: page.total,
        })
    })
    .await
}

// GET /movies/categories
async fn list_categories(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let movies = &state.movies;
    cached_json(&state, catalog_key("genres", &[]), move || movies.categories()).await
}

// GET /movies/banner
async fn banner(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let response = match state.movies.banner().await? {
        Some(movie) => Json(BannerResponse {
            movie_id: movie.id,
            title: movie.title,
            poster_url: movie.poster_url,
            rating: movie.rating,
            genres: movie.genres,
        })
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    };
    Ok(response)
}

// GET /movies/{id}
async fn movie_detail(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieDetailResponse>> {
    let detail = state.movies.detail(movie_id).await?;
    Ok(Json(detail.into()))
}
