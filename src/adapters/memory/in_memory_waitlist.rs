//! In-memory implementation of `SignupRepository` and `SignupReader`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, SignupId};
use crate::domain::waitlist::{
    ChildProfile, CompleteSignup, EmailAddress, Provenance, ResubmissionPolicy, Signup,
};
use crate::ports::{FeatureWrite, ProfileCompletion, SignupReader, SignupRepository};

#[derive(Debug, Default)]
struct WaitlistTables {
    signups: Vec<Signup>,
    child_profiles: Vec<ChildProfile>,
    feature_preferences: Vec<FeatureRow>,
}

#[derive(Debug, Clone)]
struct FeatureRow {
    signup_id: SignupId,
    feature_name: String,
}

/// Waitlist storage backed by process memory.
///
/// Mirrors the storage contract of the Postgres gateway: unique emails,
/// atomic step-2 writes, one view row per signup.
#[derive(Debug, Default)]
pub struct InMemoryWaitlist {
    tables: RwLock<WaitlistTables>,
    fail_feature_writes: bool,
}

impl InMemoryWaitlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every feature-preference write fail, to exercise the
    /// non-fatal path of step 2.
    pub fn with_failing_feature_writes(mut self) -> Self {
        self.fail_feature_writes = true;
        self
    }

    /// Number of stored signups.
    pub async fn signup_count(&self) -> usize {
        self.tables.read().await.signups.len()
    }

    /// Number of child profiles stored for `id`.
    pub async fn profile_count(&self, id: &SignupId) -> usize {
        self.tables
            .read()
            .await
            .child_profiles
            .iter()
            .filter(|p| &p.signup_id == id)
            .count()
    }
}

#[async_trait]
impl SignupRepository for InMemoryWaitlist {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Signup>, DomainError> {
        Ok(self
            .tables
            .read()
            .await
            .signups
            .iter()
            .find(|s| s.email() == email)
            .cloned())
    }

    async fn insert(&self, signup: &Signup) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables.signups.iter().any(|s| s.email() == signup.email()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateEmail,
                format!("Email already registered: {}", signup.email()),
            ));
        }
        tables.signups.push(signup.clone());
        Ok(())
    }

    async fn refresh_identity(
        &self,
        id: &SignupId,
        parent_name: &str,
        provenance: &Provenance,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let signup = tables
            .signups
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| not_found(id))?;
        signup
            .refresh_identity(parent_name, provenance.clone())
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        Ok(())
    }

    async fn complete_profile(
        &self,
        completion: &ProfileCompletion,
    ) -> Result<FeatureWrite, DomainError> {
        let mut tables = self.tables.write().await;
        let id = completion.signup_id;

        let signup = tables
            .signups
            .iter_mut()
            .find(|s| s.id() == &id)
            .ok_or_else(|| not_found(&id))?;
        signup.complete_profile();

        if completion.policy == ResubmissionPolicy::Replace {
            tables.child_profiles.retain(|p| p.signup_id != id);
            tables.feature_preferences.retain(|f| f.signup_id != id);
        }
        tables.child_profiles.push(completion.profile.clone());

        if completion.features.is_empty() {
            return Ok(FeatureWrite::Skipped);
        }
        if self.fail_feature_writes {
            return Ok(FeatureWrite::Failed(
                "feature preference writes disabled".to_string(),
            ));
        }
        tables
            .feature_preferences
            .extend(completion.features.iter().map(|f| FeatureRow {
                signup_id: id,
                feature_name: f.as_str().to_string(),
            }));
        Ok(FeatureWrite::Persisted(completion.features.len()))
    }
}

#[async_trait]
impl SignupReader for InMemoryWaitlist {
    async fn list_all(&self) -> Result<Vec<CompleteSignup>, DomainError> {
        let tables = self.tables.read().await;
        let mut rows: Vec<CompleteSignup> = tables
            .signups
            .iter()
            .map(|s| tables.project(s))
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn get_by_id(&self, id: &SignupId) -> Result<Option<CompleteSignup>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .signups
            .iter()
            .find(|s| s.id() == id)
            .map(|s| tables.project(s)))
    }

    async fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CompleteSignup>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .signups
            .iter()
            .find(|s| s.email() == email)
            .map(|s| tables.project(s)))
    }
}

impl WaitlistTables {
    /// Joins a signup with its latest child profile and all its features.
    fn project(&self, signup: &Signup) -> CompleteSignup {
        let profile = self
            .child_profiles
            .iter()
            .rev()
            .find(|p| &p.signup_id == signup.id());
        CompleteSignup {
            id: *signup.id(),
            parent_name: signup.parent_name().to_string(),
            email: signup.email().clone(),
            created_at: *signup.created_at(),
            step_completed: signup.step(),
            child_name: profile.map(|p| p.child_name.clone()),
            child_age: profile.map(|p| p.child_age),
            child_interests: profile.and_then(|p| p.child_interests.clone()),
            suggestions: profile.and_then(|p| p.suggestions.clone()),
            selected_features: self
                .feature_preferences
                .iter()
                .filter(|f| &f.signup_id == signup.id())
                .map(|f| f.feature_name.clone())
                .collect(),
        }
    }
}

fn not_found(id: &SignupId) -> DomainError {
    DomainError::new(ErrorCode::SignupNotFound, format!("Signup not found: {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::waitlist::{ChildAge, FeatureLabel};

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::parse(raw).unwrap()
    }

    fn signup(raw: &str) -> Signup {
        Signup::start("Parent", email(raw), Provenance::default()).unwrap()
    }

    fn completion(id: SignupId, name: &str, features: &[&str]) -> ProfileCompletion {
        ProfileCompletion {
            signup_id: id,
            profile: ChildProfile::new(id, name.to_string(), ChildAge::new(6).unwrap(), None, None),
            features: features.iter().map(|f| FeatureLabel::new(*f)).collect(),
            policy: ResubmissionPolicy::Append,
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let store = InMemoryWaitlist::new();
        store.insert(&signup("a@example.com")).await.unwrap();

        let err = store.insert(&signup("a@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEmail);
        assert_eq!(store.signup_count().await, 1);
    }

    #[tokio::test]
    async fn complete_profile_requires_existing_signup() {
        let store = InMemoryWaitlist::new();
        let err = store
            .complete_profile(&completion(SignupId::new(), "Mia", &[]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SignupNotFound);
    }

    #[tokio::test]
    async fn view_joins_latest_profile_and_features() {
        let store = InMemoryWaitlist::new();
        let s = signup("a@example.com");
        let id = *s.id();
        store.insert(&s).await.unwrap();

        let outcome = store
            .complete_profile(&completion(id, "Mia", &["Art", "Music"]))
            .await
            .unwrap();
        assert_eq!(outcome, FeatureWrite::Persisted(2));

        let row = store.get_by_id(&id).await.unwrap().unwrap();
        assert!(row.is_completed());
        assert_eq!(row.child_name.as_deref(), Some("Mia"));
        assert_eq!(row.selected_features, vec!["Art", "Music"]);
    }

    #[tokio::test]
    async fn features_keep_submission_order() {
        let store = InMemoryWaitlist::new();
        let s = signup("a@example.com");
        let id = *s.id();
        store.insert(&s).await.unwrap();

        store
            .complete_profile(&completion(id, "Mia", &["Music", "Art", "Coding"]))
            .await
            .unwrap();

        let row = store.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(row.selected_features, vec!["Music", "Art", "Coding"]);
    }

    #[tokio::test]
    async fn append_policy_keeps_every_profile() {
        let store = InMemoryWaitlist::new();
        let s = signup("a@example.com");
        let id = *s.id();
        store.insert(&s).await.unwrap();

        store.complete_profile(&completion(id, "Mia", &[])).await.unwrap();
        store.complete_profile(&completion(id, "Leo", &[])).await.unwrap();

        assert_eq!(store.profile_count(&id).await, 2);
        let row = store.get_by_email(&email("a@example.com")).await.unwrap().unwrap();
        assert_eq!(row.child_name.as_deref(), Some("Leo"));
    }

    #[tokio::test]
    async fn replace_policy_drops_previous_profile_and_features() {
        let store = InMemoryWaitlist::new();
        let s = signup("a@example.com");
        let id = *s.id();
        store.insert(&s).await.unwrap();

        store.complete_profile(&completion(id, "Mia", &["Art"])).await.unwrap();
        let mut second = completion(id, "Leo", &["Music"]);
        second.policy = ResubmissionPolicy::Replace;
        store.complete_profile(&second).await.unwrap();

        assert_eq!(store.profile_count(&id).await, 1);
        let row = store.get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(row.selected_features, vec!["Music"]);
    }

    #[tokio::test]
    async fn failing_feature_writes_keep_profile() {
        let store = InMemoryWaitlist::new().with_failing_feature_writes();
        let s = signup("a@example.com");
        let id = *s.id();
        store.insert(&s).await.unwrap();

        let outcome = store.complete_profile(&completion(id, "Mia", &["Art"])).await.unwrap();

        assert!(matches!(outcome, FeatureWrite::Failed(_)));
        let row = store.get_by_id(&id).await.unwrap().unwrap();
        assert!(row.is_completed());
        assert!(row.selected_features.is_empty());
    }

    #[tokio::test]
    async fn list_all_orders_newest_first() {
        let store = InMemoryWaitlist::new();
        store.insert(&signup("first@example.com")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.insert(&signup("second@example.com")).await.unwrap();

        let rows = store.list_all().await.unwrap();
        assert_eq!(rows[0].email.as_str(), "second@example.com");
        assert_eq!(rows[1].email.as_str(), "first@example.com");
    }
}
