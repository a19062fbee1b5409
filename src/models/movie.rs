use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieStatus {
    NowShowing,
    ComingSoon,
}

impl MovieStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieStatus::NowShowing => "now_showing",
            MovieStatus::ComingSoon => "coming_soon",
        }
    }
}

impl fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "now_showing" => Ok(MovieStatus::NowShowing),
            "coming_soon" => Ok(MovieStatus::ComingSoon),
            _ => Err(()),
        }
    }
}

/// Фильм вместе с названиями жанров (агрегируются в SQL через `array_agg`).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Длительность в минутах.
    pub duration: i32,
    pub rating: f64,
    pub poster_url: String,
    pub release_date: NaiveDate,
    pub status: String,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub movie_id: i64,
    pub name: String,
    pub role: String,
    pub character_name: String,
    pub photo_url: String,
}

/// Сеанс фильма с данными кинотеатра, нужными карточке фильма.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ShowtimeListing {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub cinema_id: i64,
    pub cinema_name: String,
    pub base_price: i64,
}

#[derive(Debug, Clone)]
pub struct MovieDetail {
    pub movie: Movie,
    pub cast: Vec<CastMember>,
    pub showtimes: Vec<ShowtimeListing>,
}

/// Одна страница списка фильмов.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: i64,
}
