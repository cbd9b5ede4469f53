use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Platform role, stored as a postgres enum column
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Moderator,
    Admin,
}

/// User account - SQL persistence layer
///
/// Username, email, and mobile number are each globally unique (backed by
/// database constraints). Verification flags start false and flip to true
/// exactly once, by redeeming the matching code.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub mobile_number: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub full_name: String,
    pub role: UserRole,

    pub email_verified: bool,
    pub mobile_verified: bool,
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Fields required to create an account
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub full_name: String,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Find user by username
    pub async fn find_by_username(username: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Check if a username is taken
    pub async fn exists_by_username(username: &str, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Check if an email is taken
    pub async fn exists_by_email(email: &str, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Check if a mobile number is taken
    pub async fn exists_by_mobile_number(mobile_number: &str, pool: &PgPool) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE mobile_number = $1)",
        )
        .bind(mobile_number)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert a new account with both verification flags false and the
    /// default role
    pub async fn create(new: &NewUser, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (
                username,
                email,
                mobile_number,
                password_hash,
                full_name,
                role,
                email_verified,
                mobile_verified,
                active
             )
             VALUES ($1, $2, $3, $4, $5, $6, false, false, true)
             RETURNING *",
        )
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.mobile_number)
        .bind(&new.password_hash)
        .bind(&new.full_name)
        .bind(UserRole::User)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Set the email-verified flag. Takes any executor so the caller can run
    /// it inside the same transaction as the code consumption.
    pub async fn mark_email_verified<'e>(
        id: i64,
        executor: impl sqlx::PgExecutor<'e>,
    ) -> Result<()> {
        sqlx::query("UPDATE users SET email_verified = true, updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Set the mobile-verified flag. Same transactional contract as
    /// `mark_email_verified`.
    pub async fn mark_mobile_verified<'e>(
        id: i64,
        executor: impl sqlx::PgExecutor<'e>,
    ) -> Result<()> {
        sqlx::query("UPDATE users SET mobile_verified = true, updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Record a successful login
    pub async fn touch_last_login(id: i64, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_at = now(), updated_at = now() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            mobile_number: "+15551234567".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            full_name: "Alice Example".to_string(),
            role: UserRole::User,
            email_verified: false,
            mobile_verified: false,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    }
}
