//! ExportSignupsHandler - Query handler producing the CSV download.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::waitlist::{render_csv, CsvExport, SignupFilter, WaitlistError};
use crate::ports::SignupReader;

/// Query to export the (filtered) signup list.
#[derive(Debug, Clone, Default)]
pub struct ExportSignupsQuery {
    pub filter: SignupFilter,
}

pub type ExportSignupsResult = CsvExport;

pub struct ExportSignupsHandler {
    reader: Arc<dyn SignupReader>,
}

impl ExportSignupsHandler {
    pub fn new(reader: Arc<dyn SignupReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ExportSignupsQuery,
    ) -> Result<ExportSignupsResult, WaitlistError> {
        let signups = query.filter.apply(self.reader.list_all().await?);
        let export = render_csv(&signups, Timestamp::now())?;

        tracing::info!(rows = signups.len(), filename = %export.filename, "Exported signups");
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryWaitlist;
    use crate::domain::waitlist::{EmailAddress, Provenance, Signup, StatusFilter};
    use crate::ports::SignupRepository;

    async fn seeded() -> Arc<InMemoryWaitlist> {
        let store = Arc::new(InMemoryWaitlist::new());
        for (name, email) in [("Alex", "alex@example.com"), ("Sam", "sam@example.com")] {
            let signup =
                Signup::start(name, EmailAddress::parse(email).unwrap(), Provenance::default())
                    .unwrap();
            store.insert(&signup).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn exports_header_and_one_row_per_signup() {
        let handler = ExportSignupsHandler::new(seeded().await);

        let export = handler.handle(ExportSignupsQuery::default()).await.unwrap();

        assert!(export.filename.starts_with("kaid-waitlist-"));
        assert!(export.filename.ends_with(".csv"));
        let lines: Vec<_> = export.body.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("\"Parent Name\",\"Email\""));
    }

    #[tokio::test]
    async fn export_respects_filter() {
        let handler = ExportSignupsHandler::new(seeded().await);

        let export = handler
            .handle(ExportSignupsQuery {
                filter: SignupFilter::new(Some("sam".to_string()), StatusFilter::All),
            })
            .await
            .unwrap();

        let lines: Vec<_> = export.body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"sam@example.com\""));
        assert!(lines[1].ends_with("\"Incomplete\""));
    }
}
