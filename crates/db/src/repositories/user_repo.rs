//! Account lookups for login and the admin bootstrap.
//!
//! Emails are stored as entered; lookups compare them case-insensitively
//! so `Admin@Studio.gr` and `admin@studio.gr` log into the same account.

use sqlx::PgPool;
use studio_core::roles::ROLE_ADMIN;
use studio_core::types::DbId;

use crate::models::user::{NewUser, User};

const USER_FIELDS: &str = "id, email, password_hash, name, role, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn create(pool: &PgPool, new: NewUser<'_>) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, name, role) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_FIELDS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(new.email)
            .bind(new.password_hash)
            .bind(new.name)
            .bind(new.role)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {USER_FIELDS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let sql = format!(
            "SELECT {USER_FIELDS} FROM users WHERE lower(email) = lower($1) ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Make `email` an administrator with `password_hash`, creating the
    /// account on first boot. Runs on every start, so a changed
    /// `ADMIN_PASSWORD` takes effect after a restart.
    pub async fn upsert_admin(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, role) VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_users_email DO UPDATE \
             SET password_hash = EXCLUDED.password_hash, role = EXCLUDED.role, updated_at = NOW() \
             RETURNING {USER_FIELDS}"
        );
        let admin = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(password_hash)
            .bind(ROLE_ADMIN)
            .fetch_one(pool)
            .await?;
        tracing::debug!(user_id = admin.id, "Administrator account written");
        Ok(admin)
    }
}
