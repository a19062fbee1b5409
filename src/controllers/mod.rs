pub mod auth;
pub mod cinemas;
pub mod movies;
pub mod showtimes;
pub mod tickets;

use axum::{
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Router,
};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth::routes())
        .merge(movies::routes())
        .merge(cinemas::routes())
        .merge(showtimes::routes())
        .merge(tickets::routes())
}

const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

fn json_response(body: String, cache_status: &'static str) -> Response {
    (
        [(header::CONTENT_TYPE, "application/json"), (X_CACHE, cache_status)],
        body,
    )
        .into_response()
}

/// Отдаёт ответ каталога из кеша, а при промахе строит его и кладёт в кеш.
/// Ошибки Redis не роняют запрос.
pub(crate) async fn cached_json<T, F, Fut>(state: &AppState, key: String, load: F) -> AppResult<Response>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    // 1. Пытаемся получить результат из кеша
    match state.cache.get_cached(&key).await {
        Ok(Some(cached_json)) => return Ok(json_response(cached_json, "HIT")),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache read failed for {}: {}", key, e),
    }

    // 2. Промах: идём в базу
    let body = load().await?;
    let json_str = serde_json::to_string(&body)
        .map_err(|e| AppError::Internal(format!("failed to serialize response: {}", e)))?;

    // 3. Сохраняем результат в кеш
    if let Err(e) = state.cache.cache_response(&key, &json_str).await {
        tracing::error!("Failed to cache {}: {:?}", key, e);
    }

    Ok(json_response(json_str, "MISS"))
}
