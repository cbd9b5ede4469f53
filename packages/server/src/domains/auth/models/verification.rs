use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

/// Verification channel, stored as a postgres enum column
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "verification_channel", rename_all = "lowercase")]
pub enum VerificationChannel {
    Email,
    Mobile,
}

impl VerificationChannel {
    /// Parse the wire form used by the resend endpoint ("email" | "mobile")
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "email" => Some(VerificationChannel::Email),
            "mobile" => Some(VerificationChannel::Mobile),
            _ => None,
        }
    }
}

/// One-time verification code - SQL persistence layer
///
/// At most one unused code exists per (user, channel): issuing a new code
/// deletes the previous one, and a partial unique index backs the invariant.
/// A code flips unused -> used exactly once.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Verification {
    pub id: i64,
    pub user_id: i64,
    pub code: String,
    pub channel: VerificationChannel,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Verification {
    /// Issue a fresh code for (user, channel), superseding any unused one.
    ///
    /// Delete and insert run in one transaction so no window exists with two
    /// live codes for the pair.
    pub async fn issue(
        user_id: i64,
        channel: VerificationChannel,
        code: &str,
        ttl_secs: i64,
        pool: &PgPool,
    ) -> Result<Self> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM verifications WHERE user_id = $1 AND channel = $2 AND used = false")
            .bind(user_id)
            .bind(channel)
            .execute(&mut *tx)
            .await?;

        let expires_at = Utc::now() + Duration::seconds(ttl_secs);
        let verification = sqlx::query_as::<_, Self>(
            "INSERT INTO verifications (user_id, code, channel, expires_at, used)
             VALUES ($1, $2, $3, $4, false)
             RETURNING *",
        )
        .bind(user_id)
        .bind(code)
        .bind(channel)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(verification)
    }

    /// Current unused code for the pair, if any
    pub async fn find_live_unused(
        user_id: i64,
        channel: VerificationChannel,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM verifications WHERE user_id = $1 AND channel = $2 AND used = false",
        )
        .bind(user_id)
        .bind(channel)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Unused code for the pair matching `code` exactly (case-sensitive, no
    /// normalization), if any
    pub async fn find_live_unused_by_code(
        user_id: i64,
        channel: VerificationChannel,
        code: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM verifications
             WHERE user_id = $1 AND channel = $2 AND code = $3 AND used = false",
        )
        .bind(user_id)
        .bind(channel)
        .bind(code)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark the code used. Compare-and-swap on the used flag: returns false
    /// when a concurrent redemption already consumed the record. Takes any
    /// executor so the caller can pair it with the account-flag flip in one
    /// transaction.
    pub async fn consume<'e>(&self, executor: impl sqlx::PgExecutor<'e>) -> Result<bool> {
        let result = sqlx::query("UPDATE verifications SET used = true WHERE id = $1 AND used = false")
            .bind(self.id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Delete the record (used when a code is found expired at redemption)
    pub async fn discard(&self, pool: &PgPool) -> Result<()> {
        sqlx::query("DELETE FROM verifications WHERE id = $1")
            .bind(self.id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Whether the code is past its expiry at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(expires_at: DateTime<Utc>) -> Verification {
        Verification {
            id: 1,
            user_id: 1,
            code: "042517".to_string(),
            channel: VerificationChannel::Email,
            expires_at,
            used: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        // Exactly at the expiry instant the code is still redeemable
        assert!(!sample(now).is_expired_at(now));
        assert!(!sample(now + Duration::seconds(60)).is_expired_at(now));
        assert!(sample(now - Duration::seconds(1)).is_expired_at(now));
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!(
            VerificationChannel::parse("email"),
            Some(VerificationChannel::Email)
        );
        assert_eq!(
            VerificationChannel::parse("MOBILE"),
            Some(VerificationChannel::Mobile)
        );
        assert_eq!(VerificationChannel::parse("carrier-pigeon"), None);
    }
}
