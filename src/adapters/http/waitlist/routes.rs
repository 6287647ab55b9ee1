//! Axum router configuration for waitlist endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    export_waitlist, get_waitlist, get_waitlist_stats, submit_step1, submit_step2,
    WaitlistAppState,
};

/// Public signup routes, mounted under `/api`.
///
/// # Routes
/// - `POST /signup-step1` - Capture parent name and email
/// - `POST /signup-step2` - Attach the child profile
pub fn signup_routes() -> Router<WaitlistAppState> {
    Router::new()
        .route("/signup-step1", post(submit_step1))
        .route("/signup-step2", post(submit_step2))
}

/// Read-side routes, mounted under `/api/waitlist`.
///
/// These expose personal data and sit behind whatever gate the deployment
/// puts in front of them.
///
/// # Routes
/// - `GET /` - One signup by `email` or `id`, else the list
/// - `GET /stats` - Funnel statistics
/// - `GET /export` - CSV download
pub fn admin_routes() -> Router<WaitlistAppState> {
    Router::new()
        .route("/", get(get_waitlist))
        .route("/stats", get(get_waitlist_stats))
        .route("/export", get(export_waitlist))
}

/// The complete waitlist API, suitable for nesting at `/api`.
pub fn waitlist_router(admin_routes_enabled: bool) -> Router<WaitlistAppState> {
    let router = signup_routes();
    if admin_routes_enabled {
        router.nest("/waitlist", admin_routes())
    } else {
        router
    }
}
