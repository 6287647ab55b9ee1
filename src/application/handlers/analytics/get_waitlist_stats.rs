//! GetWaitlistStatsHandler - Query handler for the funnel statistics.

use std::sync::Arc;

use crate::domain::analytics::WaitlistStats;
use crate::domain::waitlist::WaitlistError;
use crate::ports::SignupReader;

/// Query to aggregate statistics over every signup.
#[derive(Debug, Clone)]
pub struct GetWaitlistStatsQuery;

pub type GetWaitlistStatsResult = WaitlistStats;

/// Handler for the stats snapshot.
///
/// Reads the whole view and aggregates in process; nothing is cached.
pub struct GetWaitlistStatsHandler {
    reader: Arc<dyn SignupReader>,
}

impl GetWaitlistStatsHandler {
    pub fn new(reader: Arc<dyn SignupReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        _query: GetWaitlistStatsQuery,
    ) -> Result<GetWaitlistStatsResult, WaitlistError> {
        let signups = self.reader.list_all().await?;
        Ok(WaitlistStats::compute(&signups))
    }
}
