use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::CartItem,
    error::{AppError, Result},
    repository::CartRepository,
};

#[derive(FromRow)]
struct CartItemRow {
    id: String,
    guest_id: String,
    room_id: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: i64,
    created_at: NaiveDateTime,
}

pub struct SqliteCartRepository {
    pool: SqlitePool,
}

impl SqliteCartRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: CartItemRow) -> Result<CartItem> {
        Ok(CartItem {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            guest_id: Uuid::parse_str(&row.guest_id)
                .map_err(|e| AppError::Database(e.to_string()))?,
            room_id: row.room_id as u32,
            check_in: row.check_in,
            check_out: row.check_out,
            guests: row.guests as u32,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        })
    }
}

#[async_trait]
impl CartRepository for SqliteCartRepository {
    async fn add(&self, item: CartItem) -> Result<CartItem> {
        let id_str = item.id.to_string();
        let guest_id_str = item.guest_id.to_string();
        let created_at_naive = item.created_at.naive_utc();

        sqlx::query(
            r#"
            INSERT INTO cart_items (
                id, guest_id, room_id, check_in, check_out, guests, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&guest_id_str)
        .bind(item.room_id as i64)
        .bind(item.check_in)
        .bind(item.check_out)
        .bind(item.guests as i64)
        .bind(created_at_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(item.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created cart item".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartItem>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT id, guest_id, room_id, check_in, check_out, guests, created_at
            FROM cart_items
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_item(r)?)),
            None => Ok(None),
        }
    }

    async fn list_by_guest(&self, guest_id: Uuid) -> Result<Vec<CartItem>> {
        let guest_id_str = guest_id.to_string();
        let rows = sqlx::query_as::<_, CartItemRow>(
            r#"
            SELECT id, guest_id, room_id, check_in, check_out, guests, created_at
            FROM cart_items
            WHERE guest_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(guest_id_str)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn remove(&self, id: Uuid, guest_id: Uuid) -> Result<bool> {
        // Scoped to the owning guest so one guest cannot remove another's item
        let result = sqlx::query("DELETE FROM cart_items WHERE id = ? AND guest_id = ?")
            .bind(id.to_string())
            .bind(guest_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_guest(&self, guest_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM cart_items WHERE guest_id = ?")
            .bind(guest_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
