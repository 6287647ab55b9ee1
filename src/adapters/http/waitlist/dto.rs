//! HTTP DTOs (Data Transfer Objects) for waitlist endpoints.
//!
//! Request and response bodies are camelCase JSON, matching what the landing
//! page already sends.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::application::{Step1Outcome, SubmitStep1Result, SubmitStep2Result};
use crate::domain::waitlist::{AgeInput, StatusFilter};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/signup-step1`.
///
/// Fields are optional here so that a missing field reaches the domain
/// validation and gets its message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step1Request {
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `POST /api/signup-step2`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step2Request {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub child_name: Option<String>,
    /// `None` only when the key is absent; an explicit `null` is kept.
    #[serde(default, deserialize_with = "present")]
    pub child_age: Option<Value>,
    #[serde(default)]
    pub child_interests: Option<String>,
    #[serde(default)]
    pub selected_features: Option<Vec<String>>,
    #[serde(default)]
    pub suggestions: Option<String>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Step2Request {
    /// Raw age as submitted: a number, or anything else as text.
    pub fn age_input(&self) -> Option<AgeInput> {
        self.child_age.as_ref().map(|value| match value {
            Value::Number(n) => AgeInput::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => AgeInput::Text(s.clone()),
            other => AgeInput::Text(other.to_string()),
        })
    }
}

/// Query of `GET /api/waitlist`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitlistQuery {
    pub email: Option<String>,
    pub id: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
}

/// Query of `GET /api/waitlist/export`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Success envelope shared by both signup steps.
#[derive(Debug, Clone, Serialize)]
pub struct StepResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> StepResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Data of a successful step 1.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step1Data {
    pub parent_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub already_completed: Option<bool>,
}

impl From<&SubmitStep1Result> for Step1Data {
    fn from(result: &SubmitStep1Result) -> Self {
        let completed = result.already_completed();
        Self {
            parent_name: result.parent_name.clone(),
            email: result.email.to_string(),
            id: (!completed).then(|| result.signup_id.to_string()),
            already_completed: completed.then_some(true),
        }
    }
}

/// User-facing message for each step-1 outcome.
pub fn step1_message(outcome: Step1Outcome) -> &'static str {
    match outcome {
        Step1Outcome::Created => "Step 1 completed successfully",
        Step1Outcome::Refreshed => "Welcome back! Let's complete your signup.",
        Step1Outcome::AlreadyCompleted => "You've already completed the signup process!",
    }
}

pub const STEP2_MESSAGE: &str =
    "Registration completed successfully! Welcome to the KaiD family! 🎉";

/// Data of a successful step 2.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step2Data {
    pub email: String,
    pub child_name: String,
    pub child_age: u8,
    pub features_selected: usize,
}

impl From<SubmitStep2Result> for Step2Data {
    fn from(result: SubmitStep2Result) -> Self {
        Self {
            email: result.email.to_string(),
            child_name: result.child_name,
            child_age: result.child_age.value(),
            features_selected: result.features_selected,
        }
    }
}

/// Error body: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
