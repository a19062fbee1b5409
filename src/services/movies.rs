use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{Genre, Movie, MovieDetail, MoviePage, MovieStatus};
use crate::repositories::MovieCatalog;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Pagination {
    /// Нормализует параметры запроса: страница с 1, размер 1..=50.
    pub fn new(page: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }
}

/// Категория списка фильмов: статус проката или название жанра.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieCategory {
    Status(MovieStatus),
    Genre(String),
}

impl MovieCategory {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return MovieCategory::Status(MovieStatus::NowShowing);
        }
        match raw.parse::<MovieStatus>() {
            Ok(status) => MovieCategory::Status(status),
            Err(()) => MovieCategory::Genre(raw.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct MovieService {
    catalog: Arc<dyn MovieCatalog>,
}

impl MovieService {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn categories(&self) -> AppResult<Vec<Genre>> {
        Ok(self.catalog.list_genres().await?)
    }

    /// Баннер - первый фильм в прокате.
    pub async fn banner(&self) -> AppResult<Option<Movie>> {
        let page = self.catalog.list_by_status(MovieStatus::NowShowing, 1, 0).await?;
        Ok(page.movies.into_iter().next())
    }

    pub async fn list(&self, category: &MovieCategory, pagination: Pagination) -> AppResult<MoviePage> {
        let page = match category {
            MovieCategory::Status(status) => {
                self.catalog
                    .list_by_status(*status, pagination.limit(), pagination.offset())
                    .await?
            }
            MovieCategory::Genre(genre) => {
                self.catalog
                    .list_by_genre(genre, pagination.limit(), pagination.offset())
                    .await?
            }
        };
        Ok(page)
    }

    pub async fn detail(&self, movie_id: i64) -> AppResult<MovieDetail> {
        Ok(self.catalog.find_detail(movie_id).await?)
    }
}
