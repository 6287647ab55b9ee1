//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod analytics;
pub mod waitlist;

pub use analytics::{GetWaitlistStatsHandler, GetWaitlistStatsQuery, GetWaitlistStatsResult};
pub use waitlist::{
    // Commands
    Step1Outcome, SubmitStep1Command, SubmitStep1Handler, SubmitStep1Result,
    SubmitStep2Command, SubmitStep2Handler, SubmitStep2Result,
    // Queries
    ExportSignupsHandler, ExportSignupsQuery, ExportSignupsResult,
    GetSignupHandler, GetSignupQuery, GetSignupResult, SignupLookup,
    ListSignupsHandler, ListSignupsQuery, ListSignupsResult,
};
