//! Геометрия зала: ряды, места в ряду и категория ряда.
//!
//! Схема не зависит от бронирований. Если для зала схема не задана,
//! используется стандартная: 12 рядов (A..L) по 8 мест, ряды J, K, L - премиум.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ROWS: u32 = 12;
pub const DEFAULT_COLS: u32 = 8;
pub const DEFAULT_PREMIUM_FROM_ROW: u32 = 9;

/// Ряды подписываются одной буквой.
pub const MAX_ROWS: u32 = 26;
pub const MAX_COLS: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatTier {
    Standard,
    Premium,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("row count must be between 1 and {MAX_ROWS}, got {0}")]
    Rows(i64),
    #[error("seat count per row must be between 1 and {MAX_COLS}, got {0}")]
    Cols(i64),
    #[error("first premium row must not be negative, got {0}")]
    PremiumFromRow(i64),
}

/// Схема зала.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheaterLayout {
    rows: u32,
    cols: u32,
    /// Индекс (с нуля) первого премиум-ряда. Значение `>= rows` - премиум-рядов нет.
    premium_from_row: u32,
}

impl Default for TheaterLayout {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            premium_from_row: DEFAULT_PREMIUM_FROM_ROW,
        }
    }
}

impl TheaterLayout {
    pub fn new(rows: u32, cols: u32, premium_from_row: u32) -> Result<Self, LayoutError> {
        if rows == 0 || rows > MAX_ROWS {
            return Err(LayoutError::Rows(rows as i64));
        }
        if cols == 0 || cols > MAX_COLS {
            return Err(LayoutError::Cols(cols as i64));
        }
        Ok(Self { rows, cols, premium_from_row })
    }

    /// Схема из колонок таблицы `theaters`.
    ///
    /// `Ok(None)` - схема не задана (нет числа рядов или мест), нужно брать
    /// стандартную. Без `premium_from_row` премиум-рядов в зале нет.
    pub fn from_columns(
        rows: Option<i32>,
        cols: Option<i32>,
        premium_from_row: Option<i32>,
    ) -> Result<Option<Self>, LayoutError> {
        let (Some(rows), Some(cols)) = (rows, cols) else {
            return Ok(None);
        };
        let rows = u32::try_from(rows).map_err(|_| LayoutError::Rows(rows as i64))?;
        let cols = u32::try_from(cols).map_err(|_| LayoutError::Cols(cols as i64))?;
        let premium_from_row = match premium_from_row {
            Some(p) => u32::try_from(p).map_err(|_| LayoutError::PremiumFromRow(p as i64))?,
            None => rows,
        };
        Self::new(rows, cols, premium_from_row).map(Some)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn premium_from_row(&self) -> u32 {
        self.premium_from_row
    }

    pub fn seat_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn tier_for_row(&self, row_index: u32) -> SeatTier {
        if row_index >= self.premium_from_row {
            SeatTier::Premium
        } else {
            SeatTier::Standard
        }
    }

    /// Все места зала: ряды по алфавиту, внутри ряда места по возрастанию.
    /// Клиент рисует схему в этом порядке.
    pub fn coordinates(&self) -> Vec<SeatCoordinate> {
        let mut seats = Vec::with_capacity(self.seat_count());
        for row_index in 0..self.rows {
            let row = row_label(row_index);
            let tier = self.tier_for_row(row_index);
            for number in 1..=self.cols {
                seats.push(SeatCoordinate { row, row_index, number, tier });
            }
        }
        seats
    }
}

fn row_label(row_index: u32) -> char {
    // row_index < MAX_ROWS гарантирует конструктор
    char::from(b'A' + row_index as u8)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatCoordinate {
    pub row: char,
    pub row_index: u32,
    pub number: u32,
    pub tier: SeatTier,
}

impl SeatCoordinate {
    /// Код места, например "G4".
    pub fn code(&self) -> String {
        format!("{}{}", self.row, self.number)
    }
}
