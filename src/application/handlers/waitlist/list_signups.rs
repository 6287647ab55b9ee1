//! ListSignupsHandler - Query handler for the admin signup list.

use std::sync::Arc;

use crate::domain::waitlist::{CompleteSignup, SignupFilter, WaitlistError};
use crate::ports::SignupReader;

/// Query to list signups, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListSignupsQuery {
    pub filter: SignupFilter,
}

pub type ListSignupsResult = Vec<CompleteSignup>;

pub struct ListSignupsHandler {
    reader: Arc<dyn SignupReader>,
}

impl ListSignupsHandler {
    pub fn new(reader: Arc<dyn SignupReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ListSignupsQuery) -> Result<ListSignupsResult, WaitlistError> {
        let signups = self.reader.list_all().await?;
        Ok(query.filter.apply(signups))
    }
}
