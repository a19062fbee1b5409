//! Демо-данные для пустой базы: каталог, зал с явной схемой и пара билетов.

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use crate::cache::CacheService;
use crate::database::Database;
use crate::models::{MovieStatus, TicketStatus};
use crate::seating::TheaterLayout;

pub const DEMO_USER_EMAIL: &str = "demo@ratix.local";
const DEMO_USER_PASSWORD: &str = "demo123";

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to hash demo password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

struct DemoCinema {
    name: &'static str,
    city: &'static str,
    address: &'static str,
    base_price: i64,
}

struct DemoMovie {
    title: &'static str,
    description: &'static str,
    duration: i32,
    rating: f64,
    poster_url: &'static str,
    release_date: (i32, u32, u32),
    status: MovieStatus,
    genres: &'static [&'static str],
    cast: &'static [(&'static str, &'static str, &'static str)],
}

const CINEMAS: &[DemoCinema] = &[
    DemoCinema {
        name: "Cinema XXI, Grand Indonesia",
        city: "Jakarta",
        address: "Jl. M.H. Thamrin No.1",
        base_price: 50_000,
    },
    DemoCinema {
        name: "CGV, Paris Van Java",
        city: "Bandung",
        address: "Jl. Sukajadi No.131-139",
        base_price: 35_000,
    },
];

const GENRES: &[&str] = &["Action", "Fantasy"];

const MOVIES: &[DemoMovie] = &[
    DemoMovie {
        title: "The Crimson Blade",
        description: "A disgraced swordsman returns to defend the city that exiled him.",
        duration: 135,
        rating: 8.9,
        poster_url: "https://images.ratix.local/posters/crimson-blade.jpg",
        release_date: (2024, 11, 1),
        status: MovieStatus::NowShowing,
        genres: &["Action", "Fantasy"],
        cast: &[
            ("Raka Pratama", "Actor", "Arjuna"),
            ("Dewi Lestari", "Actress", "Sekar"),
            ("Hanung Wibowo", "Director", ""),
        ],
    },
    DemoMovie {
        title: "Echoes of Tomorrow",
        description: "Two strangers keep meeting in a dream that predicts the next day.",
        duration: 118,
        rating: 0.0,
        poster_url: "https://images.ratix.local/posters/echoes-of-tomorrow.jpg",
        release_date: (2025, 2, 14),
        status: MovieStatus::ComingSoon,
        genres: &["Fantasy"],
        cast: &[("Maya Putri", "Actress", "Laras")],
    },
];

// Схема демо-зала: 12 рядов по 16 мест, премиум с ряда J
const DEMO_THEATER_ROWS: i32 = 12;
const DEMO_THEATER_COLS: i32 = 16;
const DEMO_THEATER_PREMIUM_FROM_ROW: i32 = 9;

const DEMO_TICKETS: &[(&str, TicketStatus)] = &[
    ("G14, G15", TicketStatus::Active),
    ("A1", TicketStatus::History),
];

fn demo_layout() -> Option<TheaterLayout> {
    TheaterLayout::from_columns(
        Some(DEMO_THEATER_ROWS),
        Some(DEMO_THEATER_COLS),
        Some(DEMO_THEATER_PREMIUM_FROM_ROW),
    )
    .ok()
    .flatten()
}

/// Заполняет базу, если в ней ещё нет фильмов. Возвращает `true`, если данные добавлены.
pub async fn seed_demo_data(db: &Database, cache: &CacheService) -> Result<bool, SeedError> {
    let movies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
        .fetch_one(&db.pool)
        .await?;
    if movies > 0 {
        info!("Catalog already has {} movies, skipping demo seed", movies);
        return Ok(false);
    }

    let password_hash = bcrypt::hash(DEMO_USER_PASSWORD, bcrypt::DEFAULT_COST)?;
    let mut tx = db.pool.begin().await?;

    let user_id: i64 = sqlx::query_scalar(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)
         ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name
         RETURNING id"
    )
    .bind("Demo User")
    .bind(DEMO_USER_EMAIL)
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await?;

    let mut cinema_ids = Vec::with_capacity(CINEMAS.len());
    for cinema in CINEMAS {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO cinemas (name, city, address, base_price) VALUES ($1, $2, $3, $4) RETURNING id"
        )
        .bind(cinema.name)
        .bind(cinema.city)
        .bind(cinema.address)
        .bind(cinema.base_price)
        .fetch_one(&mut *tx)
        .await?;
        cinema_ids.push(id);
    }

    let layout = demo_layout().unwrap_or_default();
    let theater_id: i64 = sqlx::query_scalar(
        "INSERT INTO theaters (cinema_id, name, type, seat_rows, seat_cols, premium_from_row)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id"
    )
    .bind(cinema_ids[0])
    .bind("Studio 1")
    .bind("Regular")
    .bind(layout.rows() as i32)
    .bind(layout.cols() as i32)
    .bind(layout.premium_from_row() as i32)
    .fetch_one(&mut *tx)
    .await?;

    for genre in GENRES {
        sqlx::query("INSERT INTO genres (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(*genre)
            .execute(&mut *tx)
            .await?;
    }

    let tomorrow = Utc::now() + Duration::days(1);
    let mut first_showtime = None;

    for movie in MOVIES {
        let (y, m, d) = movie.release_date;
        let release_date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        let movie_id: i64 = sqlx::query_scalar(
            "INSERT INTO movies (title, description, duration, rating, poster_url, release_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id"
        )
        .bind(movie.title)
        .bind(movie.description)
        .bind(movie.duration)
        .bind(movie.rating)
        .bind(movie.poster_url)
        .bind(release_date)
        .bind(movie.status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO movie_genres (movie_id, genre_id)
             SELECT $1, id FROM genres WHERE name = ANY($2)"
        )
        .bind(movie_id)
        .bind(movie.genres.iter().map(|g| g.to_string()).collect::<Vec<_>>())
        .execute(&mut *tx)
        .await?;

        for (name, role, character) in movie.cast {
            sqlx::query(
                "INSERT INTO cast_members (movie_id, name, role, character_name) VALUES ($1, $2, $3, $4)"
            )
            .bind(movie_id)
            .bind(*name)
            .bind(*role)
            .bind(*character)
            .execute(&mut *tx)
            .await?;
        }

        if movie.status != MovieStatus::NowShowing {
            continue;
        }

        // Два сеанса в первом кинотеатре (с демо-залом) и один во втором
        for (hours, cinema_id, theater) in [
            (0, cinema_ids[0], Some(theater_id)),
            (3, cinema_ids[0], Some(theater_id)),
            (1, cinema_ids[1], None),
        ] {
            let showtime_id: i64 = sqlx::query_scalar(
                "INSERT INTO showtimes (movie_id, cinema_id, theater_id, start_time)
                 VALUES ($1, $2, $3, $4) RETURNING id"
            )
            .bind(movie_id)
            .bind(cinema_id)
            .bind(theater)
            .bind(tomorrow + Duration::hours(hours))
            .fetch_one(&mut *tx)
            .await?;
            first_showtime.get_or_insert((showtime_id, movie_id));
        }
    }

    if let Some((showtime_id, movie_id)) = first_showtime {
        let cinema = &CINEMAS[0];
        for (i, (seats, status)) in DEMO_TICKETS.iter().enumerate() {
            let seat_count = seats.split(',').count() as i64;
            sqlx::query(
                "INSERT INTO tickets
                     (user_id, movie_id, showtime_id, booking_code, seats, cinema_name, theater_name, price, status)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"
            )
            .bind(user_id)
            .bind(movie_id)
            .bind(showtime_id)
            .bind(format!("DEMO-{:04}", i + 1))
            .bind(*seats)
            .bind(cinema.name)
            .bind("Studio 1")
            .bind(cinema.base_price * seat_count)
            .bind(status.as_str())
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    info!(
        "🌱 Seeded demo data: {} cinemas, {} movies, {} tickets (user {})",
        CINEMAS.len(),
        MOVIES.len(),
        DEMO_TICKETS.len(),
        DEMO_USER_EMAIL
    );

    if let Err(e) = cache.invalidate_catalog().await {
        tracing::warn!("Failed to invalidate catalog cache after seeding: {}", e);
    }
    Ok(true)
}
