//! User-facing summaries of send operations.
//!
//! Pure formatting; nothing here sends or stores anything. Wording stays
//! honest about what a channel can know: a native send was handed to the
//! network, an app-intent send only opened the compose screen.

use crate::models::{BulkReport, ChannelKind, DispatchOutcome, DispatchSummary};
use serde::Serialize;
use std::fmt;

/// Title and body of a completion dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDialog {
    pub title: String,
    pub body: String,
}

impl fmt::Display for ReportDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.title, self.body)
    }
}

/// Dialog for one beneficiary's (or one batch's) outcomes.
pub fn summarize(outcomes: &[DispatchOutcome]) -> ReportDialog {
    let summary = DispatchSummary::from_outcomes(outcomes);

    let mut lines: Vec<String> = outcomes.iter().map(outcome_line).collect();
    lines.push(String::new());
    lines.push(roll_up(summary.sent(), summary.opened(), summary.failed()));

    ReportDialog {
        title: title(&summary).to_string(),
        body: lines.join("\n"),
    }
}

fn title(summary: &DispatchSummary) -> &'static str {
    match (summary.sent(), summary.opened(), summary.failed()) {
        (0, 0, _) => "SMS Failed",
        (_, 0, 0) => "SMS Sent",
        (0, _, 0) => "Messaging App Opened",
        (_, _, 0) => "SMS Sent / Opened",
        (0, _, _) => "Messaging App Partially Opened",
        _ => "SMS Partially Sent",
    }
}

fn roll_up(sent: usize, opened: usize, failed: usize) -> String {
    format!(
        "{} sent, {} opened in messaging app, {} failed",
        sent, opened, failed
    )
}

/// Dialog shown when a beneficiary has no usable phone number.
pub fn no_contacts_dialog(beneficiary_name: &str) -> ReportDialog {
    ReportDialog {
        title: "No Contacts".to_string(),
        body: format!("No valid phone numbers found for {}.", beneficiary_name),
    }
}

/// Totals of a bulk send.
pub fn summarize_bulk(report: &BulkReport) -> ReportDialog {
    let summary = &report.summary;
    let mut lines = vec![
        format!("Beneficiaries: {}", summary.beneficiaries()),
        format!("Messages: {}", summary.total()),
        format!("Sent: {}", summary.sent()),
        format!("Opened in messaging app: {}", summary.opened()),
        format!("Failed: {}", summary.failed()),
    ];
    if summary.beneficiaries_without_contacts() > 0 {
        lines.push(format!(
            "Skipped (no contacts): {}",
            summary.beneficiaries_without_contacts()
        ));
    }

    ReportDialog {
        title: "Bulk SMS Complete".to_string(),
        body: lines.join("\n"),
    }
}

fn outcome_line(outcome: &DispatchOutcome) -> String {
    let marker = if outcome.success { '✓' } else { '✗' };
    let status = match (outcome.success, outcome.channel_used) {
        (true, ChannelKind::Native) => "sent".to_string(),
        (true, _) => "messaging app opened".to_string(),
        (false, _) => format!(
            "failed: {}",
            outcome.error_detail.as_deref().unwrap_or("unknown error")
        ),
    };
    format!(
        "{} {} ({}): {}",
        marker,
        outcome.contact.kind().label(),
        outcome.contact.number(),
        status
    )
}
