//! CSV export of the signup list for the admin dashboard.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};

use super::CompleteSignup;

const HEADERS: [&str; 9] = [
    "Parent Name",
    "Email",
    "Child Name",
    "Child Age",
    "Interests",
    "Selected Features",
    "Suggestions",
    "Date",
    "Status",
];

/// A rendered export ready to be served as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub body: String,
}

/// Renders `signups` as CSV, every cell quoted, in the given order.
pub fn render_csv(signups: &[CompleteSignup], generated_at: Timestamp) -> Result<CsvExport, DomainError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(HEADERS).map_err(export_error)?;
    for signup in signups {
        writer.write_record(row(signup)).map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("CSV flush failed: {}", e)))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("CSV not UTF-8: {}", e)))?;

    Ok(CsvExport {
        filename: format!("kaid-waitlist-{}.csv", generated_at.date_string()),
        body,
    })
}

fn row(signup: &CompleteSignup) -> [String; 9] {
    [
        signup.parent_name.clone(),
        signup.email.to_string(),
        signup.child_name.clone().unwrap_or_default(),
        signup.child_age.map(|a| a.to_string()).unwrap_or_default(),
        signup.child_interests.clone().unwrap_or_default(),
        signup.selected_features.join(", "),
        signup.suggestions.clone().unwrap_or_default(),
        signup.created_at.date_string(),
        if signup.is_completed() { "Complete" } else { "Incomplete" }.to_string(),
    ]
}

fn export_error(e: csv::Error) -> DomainError {
    DomainError::new(ErrorCode::InternalError, format!("CSV export failed: {}", e))
}
