//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through `SignupRepository`; query handlers read
//! the joined view through `SignupReader`.

pub mod handlers;

pub use handlers::{
    ExportSignupsHandler, ExportSignupsQuery, GetSignupHandler, GetSignupQuery,
    GetWaitlistStatsHandler, GetWaitlistStatsQuery, ListSignupsHandler, ListSignupsQuery,
    SignupLookup, Step1Outcome, SubmitStep1Command, SubmitStep1Handler, SubmitStep1Result,
    SubmitStep2Command, SubmitStep2Handler, SubmitStep2Result,
};
