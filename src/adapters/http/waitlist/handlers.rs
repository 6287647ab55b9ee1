//! HTTP handlers for waitlist endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    ExportSignupsHandler, ExportSignupsQuery, GetSignupHandler, GetSignupQuery,
    GetWaitlistStatsHandler, GetWaitlistStatsQuery, ListSignupsHandler, ListSignupsQuery,
    SignupLookup, SubmitStep1Command, SubmitStep1Handler, SubmitStep2Command, SubmitStep2Handler,
};
use crate::domain::waitlist::{ResubmissionPolicy, SignupFilter, WaitlistError};
use crate::ports::{SignupReader, SignupRepository};

use super::client::ClientMetadata;
use super::dto::{
    step1_message, ErrorResponse, ExportQuery, HealthResponse, Step1Data, Step1Request,
    Step2Data, Step2Request, StepResponse, WaitlistQuery, STEP2_MESSAGE,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; dependencies are Arc-wrapped.
#[derive(Clone)]
pub struct WaitlistAppState {
    pub signup_repository: Arc<dyn SignupRepository>,
    pub signup_reader: Arc<dyn SignupReader>,
    /// Provenance source recorded on new signups.
    pub source_tag: String,
    pub resubmission_policy: ResubmissionPolicy,
}

impl WaitlistAppState {
    /// Create handlers on demand from the shared state.
    pub fn submit_step1_handler(&self) -> SubmitStep1Handler {
        SubmitStep1Handler::new(self.signup_repository.clone(), self.source_tag.clone())
    }

    pub fn submit_step2_handler(&self) -> SubmitStep2Handler {
        SubmitStep2Handler::new(self.signup_repository.clone(), self.resubmission_policy)
    }

    pub fn get_signup_handler(&self) -> GetSignupHandler {
        GetSignupHandler::new(self.signup_reader.clone())
    }

    pub fn list_signups_handler(&self) -> ListSignupsHandler {
        ListSignupsHandler::new(self.signup_reader.clone())
    }

    pub fn export_signups_handler(&self) -> ExportSignupsHandler {
        ExportSignupsHandler::new(self.signup_reader.clone())
    }

    pub fn stats_handler(&self) -> GetWaitlistStatsHandler {
        GetWaitlistStatsHandler::new(self.signup_reader.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/signup-step1 - Capture parent name and email
pub async fn submit_step1(
    State(state): State<WaitlistAppState>,
    client: ClientMetadata,
    payload: Result<Json<Step1Request>, JsonRejection>,
) -> Result<impl IntoResponse, WaitlistApiError> {
    let Json(request) = payload?;

    let handler = state.submit_step1_handler();
    let cmd = SubmitStep1Command {
        parent_name: request.parent_name.unwrap_or_default(),
        email: request.email.unwrap_or_default(),
        user_agent: client.user_agent,
        ip_address: client.ip_address,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(StepResponse::ok(
        step1_message(result.outcome),
        Step1Data::from(&result),
    )))
}

/// POST /api/signup-step2 - Attach child profile and feature preferences
pub async fn submit_step2(
    State(state): State<WaitlistAppState>,
    payload: Result<Json<Step2Request>, JsonRejection>,
) -> Result<impl IntoResponse, WaitlistApiError> {
    let Json(request) = payload?;

    let handler = state.submit_step2_handler();
    let cmd = SubmitStep2Command {
        child_age: request.age_input(),
        email: request.email.unwrap_or_default(),
        child_name: request.child_name.unwrap_or_default(),
        child_interests: request.child_interests,
        selected_features: request.selected_features.unwrap_or_default(),
        suggestions: request.suggestions,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(StepResponse::ok(STEP2_MESSAGE, Step2Data::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/waitlist - One signup by `email` or `id`, else the filtered list
pub async fn get_waitlist(
    State(state): State<WaitlistAppState>,
    Query(query): Query<WaitlistQuery>,
) -> Result<Response, WaitlistApiError> {
    let email = query.email.filter(|e| !e.is_empty());
    let id = query.id.filter(|i| !i.is_empty());

    let lookup = match (email, id) {
        (Some(email), _) => Some(SignupLookup::ByEmail(email)),
        (None, Some(id)) => Some(SignupLookup::ById(id)),
        (None, None) => None,
    };

    if let Some(lookup) = lookup {
        let signup = state
            .get_signup_handler()
            .handle(GetSignupQuery { lookup })
            .await?;
        return Ok(Json(signup).into_response());
    }

    let signups = state
        .list_signups_handler()
        .handle(ListSignupsQuery {
            filter: SignupFilter::new(query.search, query.status),
        })
        .await?;

    Ok(Json(signups).into_response())
}

/// GET /api/waitlist/stats - Funnel statistics
pub async fn get_waitlist_stats(
    State(state): State<WaitlistAppState>,
) -> Result<impl IntoResponse, WaitlistApiError> {
    let stats = state.stats_handler().handle(GetWaitlistStatsQuery).await?;
    Ok(Json(stats))
}

/// GET /api/waitlist/export - CSV download of the filtered list
pub async fn export_waitlist(
    State(state): State<WaitlistAppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, WaitlistApiError> {
    let export = state
        .export_signups_handler()
        .handle(ExportSignupsQuery {
            filter: SignupFilter::new(query.search, query.status),
        })
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        export.body,
    ))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type that converts waitlist errors to HTTP responses.
#[derive(Debug)]
pub struct WaitlistApiError(WaitlistError);

impl From<WaitlistError> for WaitlistApiError {
    fn from(err: WaitlistError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for WaitlistApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(WaitlistError::validation("body", rejection.body_text()))
    }
}

impl IntoResponse for WaitlistApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            WaitlistError::ValidationFailed { .. } | WaitlistError::PrecursorMissing => {
                StatusCode::BAD_REQUEST
            }
            WaitlistError::NotFound => StatusCode::NOT_FOUND,
            WaitlistError::DuplicateEmail => StatusCode::CONFLICT,
            WaitlistError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Storage detail stays in the logs.
        let message = match &self.0 {
            WaitlistError::Persistence(detail) => {
                tracing::error!(error = %detail, "Waitlist request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.message(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_bad_request_with_message() {
        let response =
            WaitlistApiError(WaitlistError::validation("email", "Please enter a valid email address"))
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await["error"], "Please enter a valid email address");
    }

    #[tokio::test]
    async fn precursor_missing_maps_to_bad_request() {
        let response = WaitlistApiError(WaitlistError::PrecursorMissing).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await["error"], "Please complete step 1 first");
    }

    #[tokio::test]
    async fn duplicate_maps_to_conflict() {
        let response = WaitlistApiError(WaitlistError::DuplicateEmail).into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_of(response).await["error"], "This email is already registered");
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = WaitlistApiError(WaitlistError::NotFound).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await["error"], "Signup not found");
    }

    #[tokio::test]
    async fn persistence_detail_is_not_leaked() {
        let response = WaitlistApiError(WaitlistError::persistence(
            "relation \"waitlist_signups\" does not exist",
        ))
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await["error"], INTERNAL_ERROR_MESSAGE);
    }
}
