//! HTTP adapter for waitlist endpoints.
//!
//! Exposes the waitlist via REST API:
//! - `POST /api/signup-step1` - Capture parent name and email
//! - `POST /api/signup-step2` - Attach child profile and feature preferences
//! - `GET /api/waitlist` - Get one signup (`?email=` / `?id=`) or list them
//! - `GET /api/waitlist/stats` - Funnel statistics
//! - `GET /api/waitlist/export` - CSV export

mod client;
pub mod dto;
mod handlers;
mod routes;

pub use client::ClientMetadata;
pub use handlers::{health, WaitlistApiError, WaitlistAppState};
pub use routes::{admin_routes, signup_routes, waitlist_router};
