use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::Cinema;
use crate::repositories::CinemaCatalog;

#[derive(Clone)]
pub struct CinemaService {
    catalog: Arc<dyn CinemaCatalog>,
}

impl CinemaService {
    pub fn new(catalog: Arc<dyn CinemaCatalog>) -> Self {
        Self { catalog }
    }

    /// Города, в которых есть кинотеатры.
    pub async fn locations(&self) -> AppResult<Vec<String>> {
        Ok(self.catalog.list_cities().await?)
    }

    pub async fn cinemas_in(&self, city: &str) -> AppResult<Vec<Cinema>> {
        let city = city.trim();
        if city.is_empty() {
            return Err(AppError::BadRequest("City parameter is required".into()));
        }
        Ok(self.catalog.list_by_city(city).await?)
    }
}
