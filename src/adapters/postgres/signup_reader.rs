//! PostgreSQL implementation of SignupReader.
//!
//! Reads the `complete_signups` view defined in `schema/waitlist.sql`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, SignupId, Timestamp};
use crate::domain::waitlist::{ChildAge, CompleteSignup, EmailAddress, SignupStep};
use crate::ports::SignupReader;

const SELECT_COMPLETE_SIGNUPS: &str = r#"
    SELECT id, parent_name, email, created_at, step_completed,
           child_name, child_age, child_interests, suggestions, selected_features
    FROM complete_signups
"#;

/// PostgreSQL implementation of the SignupReader port.
pub struct PostgresSignupReader {
    pool: PgPool,
}

impl PostgresSignupReader {
    /// Creates a new PostgresSignupReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row of the `complete_signups` view.
#[derive(Debug, sqlx::FromRow)]
struct CompleteSignupRow {
    id: Uuid,
    parent_name: String,
    email: String,
    created_at: DateTime<Utc>,
    step_completed: i16,
    child_name: Option<String>,
    child_age: Option<i32>,
    child_interests: Option<String>,
    suggestions: Option<String>,
    selected_features: Option<Vec<String>>,
}

impl TryFrom<CompleteSignupRow> for CompleteSignup {
    type Error = DomainError;

    fn try_from(row: CompleteSignupRow) -> Result<Self, Self::Error> {
        let step_completed = SignupStep::try_from(row.step_completed).map_err(|e| {
            DomainError::database(format!("Invalid step_completed value: {}", e))
        })?;
        let child_age = row
            .child_age
            .map(|age| ChildAge::new(i64::from(age)))
            .transpose()
            .map_err(|e| DomainError::database(format!("Invalid child_age value: {}", e)))?;

        Ok(CompleteSignup {
            id: SignupId::from_uuid(row.id),
            parent_name: row.parent_name,
            email: EmailAddress::from_stored(row.email),
            created_at: Timestamp::from_datetime(row.created_at),
            step_completed,
            child_name: row.child_name,
            child_age,
            child_interests: row.child_interests,
            suggestions: row.suggestions,
            selected_features: row.selected_features.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl SignupReader for PostgresSignupReader {
    async fn list_all(&self) -> Result<Vec<CompleteSignup>, DomainError> {
        let sql = format!("{} ORDER BY created_at DESC", SELECT_COMPLETE_SIGNUPS);
        let rows: Vec<CompleteSignupRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to list signups: {}", e)))?;

        rows.into_iter().map(CompleteSignup::try_from).collect()
    }

    async fn get_by_id(&self, id: &SignupId) -> Result<Option<CompleteSignup>, DomainError> {
        let sql = format!("{} WHERE id = $1", SELECT_COMPLETE_SIGNUPS);
        let row: Option<CompleteSignupRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to get signup: {}", e)))?;

        row.map(CompleteSignup::try_from).transpose()
    }

    async fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CompleteSignup>, DomainError> {
        let sql = format!("{} WHERE email = $1", SELECT_COMPLETE_SIGNUPS);
        let row: Option<CompleteSignupRow> = sqlx::query_as(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to get signup: {}", e)))?;

        row.map(CompleteSignup::try_from).transpose()
    }
}
