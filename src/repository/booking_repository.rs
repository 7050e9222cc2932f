use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Booking, BookingStatus},
    error::{AppError, Result},
    repository::BookingRepository,
};

// Statuses that keep a room occupied for availability purposes. Must stay in
// sync with BookingStatus::holds_room.
const HELD_STATUSES: &str = "('open', 'pending', 'authorized', 'paid', 'settled')";

#[derive(FromRow)]
struct BookingRow {
    id: String,
    guest_id: String,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: i64,
    total_cents: i64,
    status: String,
    payment_id: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: BookingRow) -> Result<Booking> {
        Ok(Booking {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            guest_id: Uuid::parse_str(&row.guest_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            room_id: row.room_id as u32,
            check_in: row.check_in,
            check_out: row.check_out,
            guests: row.guests as u32,
            total_cents: row.total_cents,
            // Stored verbatim as the provider reported it
            status: BookingStatus::from_provider(&row.status),
            payment_id: row.payment_id,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking> {
        let id_str = booking.id.to_string();
        let guest_id_str = booking.guest_id.to_string();
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, guest_id, room_id, check_in, check_out, guests,
                total_cents, status, payment_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&guest_id_str)
        .bind(booking.room_id as i64)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.guests as i64)
        .bind(booking.total_cents)
        .bind(booking.status.as_str())
        .bind(&booking.payment_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(booking.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created booking".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, guest_id, room_id, check_in, check_out, guests,
                   total_cents, status, payment_id, created_at, updated_at
            FROM bookings
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_booking(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_guest(&self, guest_id: Uuid) -> Result<Vec<Booking>> {
        let guest_id_str = guest_id.to_string();
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, guest_id, room_id, check_in, check_out, guests,
                   total_cents, status, payment_id, created_at, updated_at
            FROM bookings
            WHERE guest_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(guest_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_booking).collect()
    }

    async fn find_by_payment_id(&self, payment_id: &str) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, guest_id, room_id, check_in, check_out, guests,
                   total_cents, status, payment_id, created_at, updated_at
            FROM bookings
            WHERE payment_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(payment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_booking).collect()
    }

    async fn update_status_by_payment(
        &self,
        payment_id: &str,
        status: BookingStatus,
    ) -> Result<u64> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = ?,
                updated_at = ?
            WHERE payment_id = ?
            "#,
        )
        .bind(status.as_str())
        .bind(now)
        .bind(payment_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn count_overlapping(
        &self,
        room_id: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<i64> {
        // Half-open ranges: an existing stay blocks the new one iff it
        // starts before the new check-out and ends after the new check-in.
        let sql = format!(
            r#"
            SELECT COUNT(*) FROM bookings
            WHERE room_id = ?
            AND status IN {HELD_STATUSES}
            AND check_in < ?
            AND check_out > ?
            "#
        );

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(room_id as i64)
            .bind(check_out)
            .bind(check_in)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count)
    }

    async fn held_ranges(&self, room_id: u32) -> Result<Vec<(NaiveDate, NaiveDate)>> {
        let sql = format!(
            r#"
            SELECT check_in, check_out FROM bookings
            WHERE room_id = ?
            AND status IN {HELD_STATUSES}
            ORDER BY check_in ASC
            "#
        );

        let rows: Vec<(NaiveDate, NaiveDate)> = sqlx::query_as(&sql)
            .bind(room_id as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows)
    }
}
