use async_trait::async_trait;
use sqlx::PgPool;

use super::{MovieCatalog, RepoError, RepoResult};
use crate::models::{CastMember, Genre, Movie, MovieDetail, MoviePage, MovieStatus, ShowtimeListing};

// Жанры собираются в массив, чтобы фильм приходил одной строкой
const MOVIE_SELECT: &str = r#"
    SELECT m.id, m.title, m.description, m.duration, m.rating, m.poster_url,
           m.release_date, m.status,
           COALESCE(
               array_agg(g.name ORDER BY g.name) FILTER (WHERE g.name IS NOT NULL),
               '{}'
           ) AS genres
    FROM movies m
    LEFT JOIN movie_genres mg ON mg.movie_id = m.id
    LEFT JOIN genres g ON g.id = mg.genre_id
"#;

#[derive(Clone)]
pub struct PgMovieCatalog {
    pool: PgPool,
}

impl PgMovieCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieCatalog for PgMovieCatalog {
    async fn list_genres(&self) -> RepoResult<Vec<Genre>> {
        let genres = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(genres)
    }

    async fn list_by_status(&self, status: MovieStatus, limit: i64, offset: i64) -> RepoResult<MoviePage> {
        let query = format!(
            "{} WHERE m.status = $1 GROUP BY m.id ORDER BY m.release_date DESC, m.id LIMIT $2 OFFSET $3",
            MOVIE_SELECT
        );
        let movies = sqlx::query_as::<_, Movie>(&query)
            .bind(status.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(MoviePage { movies, total })
    }

    async fn list_by_genre(&self, genre: &str, limit: i64, offset: i64) -> RepoResult<MoviePage> {
        // Фильтр по жанру через EXISTS, иначе array_agg вернёт только совпавший жанр
        let query = format!(
            r#"{} WHERE EXISTS (
                    SELECT 1 FROM movie_genres fmg
                    JOIN genres fg ON fg.id = fmg.genre_id
                    WHERE fmg.movie_id = m.id AND fg.name = $1
                )
                GROUP BY m.id ORDER BY m.release_date DESC, m.id LIMIT $2 OFFSET $3"#,
            MOVIE_SELECT
        );
        let movies = sqlx::query_as::<_, Movie>(&query)
            .bind(genre)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT mg.movie_id)
            FROM movie_genres mg
            JOIN genres g ON g.id = mg.genre_id
            WHERE g.name = $1
            "#
        )
        .bind(genre)
        .fetch_one(&self.pool)
        .await?;

        Ok(MoviePage { movies, total })
    }

    async fn find_detail(&self, movie_id: i64) -> RepoResult<MovieDetail> {
        let query = format!("{} WHERE m.id = $1 GROUP BY m.id", MOVIE_SELECT);
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("movie {}", movie_id)))?;

        let cast = sqlx::query_as::<_, CastMember>(
            "SELECT id, movie_id, name, role, character_name, photo_url
             FROM cast_members
             WHERE movie_id = $1
             ORDER BY id"
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;

        let showtimes = sqlx::query_as::<_, ShowtimeListing>(
            r#"
            SELECT s.id, s.start_time, c.id AS cinema_id, c.name AS cinema_name, c.base_price
            FROM showtimes s
            JOIN cinemas c ON c.id = s.cinema_id
            WHERE s.movie_id = $1
            ORDER BY s.start_time
            "#
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(MovieDetail { movie, cast, showtimes })
    }
}
