use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{CreateGuestRequest, Guest, UpdateGuestRequest},
    error::{AppError, Result},
    repository::GuestRepository,
};

// Database row struct that matches the SQLite schema
#[derive(FromRow)]
struct GuestRow {
    id: String,
    email: String,
    full_name: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteGuestRepository {
    pool: SqlitePool,
}

impl SqliteGuestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_guest(row: GuestRow) -> Result<Guest> {
        Ok(Guest {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            email: row.email,
            full_name: row.full_name,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl GuestRepository for SqliteGuestRepository {
    async fn create(&self, request: CreateGuestRequest) -> Result<Guest> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        // Hash the password with argon2
        use argon2::password_hash::{rand_core::OsRng, SaltString};
        use argon2::{Argon2, PasswordHasher};

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let password_hash = argon2
            .hash_password(request.password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        let id_str = id.to_string();
        let now_naive = now.naive_utc();

        sqlx::query(
            r#"
            INSERT INTO guests (
                id, email, full_name, password_hash, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_str)
        .bind(&request.email)
        .bind(&request.full_name)
        .bind(&password_hash)
        .bind(now_naive)
        .bind(now_naive)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created guest".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Guest>> {
        let id_str = id.to_string();
        let row = sqlx::query_as::<_, GuestRow>(
            r#"
            SELECT id, email, full_name, created_at, updated_at
            FROM guests
            WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_guest(r)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Guest>> {
        let row = sqlx::query_as::<_, GuestRow>(
            r#"
            SELECT id, email, full_name, created_at, updated_at
            FROM guests
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_guest(r)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, update: UpdateGuestRequest) -> Result<Guest> {
        let id_str = id.to_string();
        let now_naive = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE guests
            SET full_name = COALESCE(?, full_name),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&update.full_name)
        .bind(now_naive)
        .bind(&id_str)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Guest not found".to_string())
        })
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();
        sqlx::query("DELETE FROM guests WHERE id = ?")
            .bind(&id_str)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

pub async fn get_password_hash(pool: &SqlitePool, email: &str) -> Result<Option<String>> {
    let result = sqlx::query_scalar::<_, String>(
        "SELECT password_hash FROM guests WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(result)
}
