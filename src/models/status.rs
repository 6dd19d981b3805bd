// ============================================================================
// STATUS - Dashboard tabs and display status derivation
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tab selected on the submissions dashboard.
///
/// Every tab except `All` is forwarded verbatim as the `status` query param.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
    Paid,
}

impl SubmissionFilter {
    pub const TABS: [SubmissionFilter; 5] = [
        SubmissionFilter::All,
        SubmissionFilter::Pending,
        SubmissionFilter::Approved,
        SubmissionFilter::Rejected,
        SubmissionFilter::Paid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionFilter::All => "ALL",
            SubmissionFilter::Pending => "PENDING",
            SubmissionFilter::Approved => "APPROVED",
            SubmissionFilter::Rejected => "REJECTED",
            SubmissionFilter::Paid => "PAID",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::TABS.iter().copied().find(|tab| tab.as_str() == value)
    }

    /// Value for the `status` query parameter, `None` means "omit"
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            SubmissionFilter::All => None,
            other => Some(other.as_str()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionFilter::All => "All",
            SubmissionFilter::Pending => "Pending",
            SubmissionFilter::Approved => "Approved",
            SubmissionFilter::Rejected => "Rejected",
            SubmissionFilter::Paid => "Paid Tickets",
        }
    }
}

impl fmt::Display for SubmissionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status shown on a submission card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayStatus {
    PendingApproval,
    Approved,
    Rejected,
    Paid,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::PendingApproval => "PENDING_APPROVAL",
            DisplayStatus::Approved => "APPROVED",
            DisplayStatus::Rejected => "REJECTED",
            DisplayStatus::Paid => "PAID",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DisplayStatus::PendingApproval => "Pending",
            DisplayStatus::Approved => "Approved",
            DisplayStatus::Rejected => "Rejected",
            DisplayStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the card status from the active tab and the backend's two status vocabularies.
///
/// Precedence: the paid tab wins, then the verification status, then the raw ticket status.
pub fn derive_display_status(
    tab: SubmissionFilter,
    verification_status: Option<&str>,
    ticket_status: Option<&str>,
) -> DisplayStatus {
    if tab == SubmissionFilter::Paid {
        return DisplayStatus::Paid;
    }

    // An empty verification status counts as absent
    match verification_status.filter(|s| !s.is_empty()) {
        Some(verification) => match verification {
            "PENDING" => DisplayStatus::PendingApproval,
            "APPROVED" => DisplayStatus::Approved,
            "REJECTED" => DisplayStatus::Rejected,
            _ => DisplayStatus::PendingApproval,
        },
        None => match ticket_status {
            Some("PENDING_VERIFICATION") => DisplayStatus::PendingApproval,
            Some("PAID") => DisplayStatus::Paid,
            _ => DisplayStatus::PendingApproval,
        },
    }
}
