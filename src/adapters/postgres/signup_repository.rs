//! PostgreSQL implementation of SignupRepository.
//!
//! Writes to `waitlist_signups`, `child_profiles` and `feature_preferences`.
//! Step 2 runs in one transaction; feature rows sit behind a savepoint so a
//! failure there does not undo the profile.

use std::net::IpAddr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, SignupId, Timestamp};
use crate::domain::waitlist::{EmailAddress, Provenance, ResubmissionPolicy, Signup, SignupStep};
use crate::ports::{FeatureWrite, ProfileCompletion, SignupRepository};

/// SQLSTATE raised on a unique index violation.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL implementation of the SignupRepository port.
pub struct PostgresSignupRepository {
    pool: PgPool,
}

impl PostgresSignupRepository {
    /// Creates a new PostgresSignupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a signup.
#[derive(Debug, sqlx::FromRow)]
struct SignupRow {
    id: Uuid,
    parent_name: String,
    email: String,
    step_completed: i16,
    source: Option<String>,
    user_agent: Option<String>,
    ip_address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SignupRow> for Signup {
    type Error = DomainError;

    fn try_from(row: SignupRow) -> Result<Self, Self::Error> {
        let step = SignupStep::try_from(row.step_completed).map_err(|e| {
            DomainError::database(format!("Invalid step_completed value: {}", e))
        })?;

        Ok(Signup::reconstitute(
            SignupId::from_uuid(row.id),
            row.parent_name,
            EmailAddress::from_stored(row.email),
            step,
            Provenance {
                source: row.source,
                user_agent: row.user_agent,
                ip_address: parse_ip(row.ip_address.as_deref())?,
            },
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

fn parse_ip(raw: Option<&str>) -> Result<Option<IpAddr>, DomainError> {
    raw.map(|s| {
        s.parse::<IpAddr>()
            .map_err(|e| DomainError::database(format!("Invalid ip_address value '{}': {}", s, e)))
    })
    .transpose()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Inserts the feature rows inside a savepoint of `tx`, keeping submission
/// order in `position`.
///
/// A failed insert rolls back only the savepoint.
async fn write_features(
    tx: &mut Transaction<'_, Postgres>,
    completion: &ProfileCompletion,
) -> Result<FeatureWrite, DomainError> {
    if completion.features.is_empty() {
        return Ok(FeatureWrite::Skipped);
    }

    let labels: Vec<String> = completion
        .features
        .iter()
        .map(|f| f.as_str().to_string())
        .collect();

    let mut savepoint = sqlx::Connection::begin(&mut **tx).await.map_err(|e| {
        DomainError::database(format!("Failed to open feature savepoint: {}", e))
    })?;

    let inserted = sqlx::query(
        r#"
        INSERT INTO feature_preferences (waitlist_signup_id, feature_name, position)
        SELECT $1, label, position
        FROM unnest($2::text[]) WITH ORDINALITY AS submitted(label, position)
        "#,
    )
    .bind(completion.signup_id.as_uuid())
    .bind(&labels)
    .execute(&mut *savepoint)
    .await;

    match inserted {
        Ok(result) => {
            savepoint.commit().await.map_err(|e| {
                DomainError::database(format!("Failed to release feature savepoint: {}", e))
            })?;
            Ok(FeatureWrite::Persisted(result.rows_affected() as usize))
        }
        Err(e) => {
            savepoint.rollback().await.map_err(|e| {
                DomainError::database(format!("Failed to roll back feature savepoint: {}", e))
            })?;
            Ok(FeatureWrite::Failed(e.to_string()))
        }
    }
}

#[async_trait]
impl SignupRepository for PostgresSignupRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Signup>, DomainError> {
        let row: Option<SignupRow> = sqlx::query_as(
            r#"
            SELECT id, parent_name, email, step_completed, source, user_agent, ip_address,
                   created_at, updated_at
            FROM waitlist_signups
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find signup: {}", e)))?;

        row.map(Signup::try_from).transpose()
    }

    async fn insert(&self, signup: &Signup) -> Result<(), DomainError> {
        let provenance = signup.provenance();

        sqlx::query(
            r#"
            INSERT INTO waitlist_signups (
                id, parent_name, email, step_completed, source, user_agent, ip_address,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(signup.id().as_uuid())
        .bind(signup.parent_name())
        .bind(signup.email().as_str())
        .bind(signup.step().marker())
        .bind(&provenance.source)
        .bind(&provenance.user_agent)
        .bind(provenance.ip_address.map(|ip| ip.to_string()))
        .bind(signup.created_at().as_datetime())
        .bind(signup.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return DomainError::new(ErrorCode::DuplicateEmail, "This email is already registered");
            }
            DomainError::database(format!("Failed to insert signup: {}", e))
        })?;

        Ok(())
    }

    async fn refresh_identity(
        &self,
        id: &SignupId,
        parent_name: &str,
        provenance: &Provenance,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE waitlist_signups SET
                parent_name = $2,
                user_agent = COALESCE($3, user_agent),
                ip_address = COALESCE($4, ip_address),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(parent_name)
        .bind(&provenance.user_agent)
        .bind(provenance.ip_address.map(|ip| ip.to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to refresh signup: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::SignupNotFound, "Signup not found"));
        }

        Ok(())
    }

    async fn complete_profile(
        &self,
        completion: &ProfileCompletion,
    ) -> Result<FeatureWrite, DomainError> {
        let signup_id = completion.signup_id.as_uuid();
        let profile = &completion.profile;

        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to begin transaction: {}", e))
        })?;

        let result = sqlx::query(
            r#"
            UPDATE waitlist_signups SET step_completed = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(signup_id)
        .bind(SignupStep::ProfileCompleted.marker())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to mark signup complete: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::SignupNotFound, "Signup not found"));
        }

        if completion.policy == ResubmissionPolicy::Replace {
            sqlx::query("DELETE FROM feature_preferences WHERE waitlist_signup_id = $1")
                .bind(signup_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database(format!("Failed to clear features: {}", e)))?;
            sqlx::query("DELETE FROM child_profiles WHERE waitlist_signup_id = $1")
                .bind(signup_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database(format!("Failed to clear profiles: {}", e)))?;
        }

        sqlx::query(
            r#"
            INSERT INTO child_profiles (
                id, waitlist_signup_id, child_name, child_age, child_interests, suggestions,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(signup_id)
        .bind(&profile.child_name)
        .bind(i32::from(profile.child_age.value()))
        .bind(&profile.child_interests)
        .bind(&profile.suggestions)
        .bind(profile.created_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert child profile: {}", e)))?;

        let features = write_features(&mut tx, completion).await?;

        tx.commit().await.map_err(|e| {
            DomainError::database(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(features)
    }
}
