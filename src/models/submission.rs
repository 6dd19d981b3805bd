// ============================================================================
// SUBMISSION - Card model derived from raw ticket records
// ============================================================================

use super::status::{derive_display_status, DisplayStatus, SubmissionFilter};
use super::ticket::TicketRecord;
use crate::utils::dates::format_display_date;

/// What a submission card renders
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: String,
    pub name: String,
    pub submitted_at: String,
    pub status: DisplayStatus,
    pub document_type: &'static str,
    pub document_name: &'static str,
    pub document_url: Option<String>,
    pub approved_by: Option<&'static str>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub institution_name: Option<String>,
    pub course_of_study: Option<String>,
    pub student_id_number: Option<String>,
    pub ticket_type: Option<String>,
    pub amount: Option<f64>,
    pub payment_method: Option<String>,
}

impl Submission {
    pub fn from_record(record: &TicketRecord, tab: SubmissionFilter) -> Self {
        let status = derive_display_status(
            tab,
            record.verification_status.as_deref(),
            record.ticket_status.as_deref(),
        );
        let document_url = record
            .verification_document_url
            .clone()
            .filter(|u| !u.is_empty())
            .or_else(|| record.student_document_url.clone().filter(|u| !u.is_empty()));
        let is_student = record.is_student();

        let document_name = match (&document_url, is_student) {
            (Some(_), _) => "Student ID Document",
            (None, true) => "No document uploaded",
            (None, false) => "N/A",
        };

        Self {
            id: record.id.clone(),
            name: record
                .full_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            submitted_at: record
                .created_at
                .as_deref()
                .map(format_display_date)
                .unwrap_or_else(|| "Invalid Date".to_string()),
            status,
            document_type: if is_student { "Student Verification" } else { "Non-Student Ticket" },
            document_name,
            document_url,
            approved_by: matches!(status, DisplayStatus::Approved | DisplayStatus::Paid).then_some("System"),
            email: record.email.clone(),
            phone_number: record.phone_number.clone(),
            institution_name: record.institution_name.clone(),
            course_of_study: record.course_of_study.clone(),
            student_id_number: record.student_id_number.clone(),
            ticket_type: record.ticket_type.clone(),
            amount: record.amount,
            payment_method: record.payment_method.clone(),
        }
    }

    /// Approve/reject are offered only on pending student verifications
    pub fn is_reviewable(&self) -> bool {
        self.status == DisplayStatus::PendingApproval
            && self.ticket_type.as_deref() == Some(super::ticket::TICKET_TYPE_STUDENT)
    }

    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// Client-side narrowing of an already server-filtered list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionSearch {
    pub term: String,
    pub institution: String,
    pub ticket_type: String,
    pub payment_method: String,
}

impl SubmissionSearch {
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
            && self.institution.is_empty()
            && self.ticket_type.is_empty()
            && self.payment_method.is_empty()
    }

    pub fn matches(&self, submission: &Submission) -> bool {
        if !self.term.is_empty() {
            let term = self.term.to_lowercase();
            let contains = |field: &Option<String>| {
                field
                    .as_deref()
                    .map(|v| v.to_lowercase().contains(&term))
                    .unwrap_or(false)
            };
            let phone_hit = submission
                .phone_number
                .as_deref()
                .map(|p| p.contains(self.term.as_str()))
                .unwrap_or(false);

            if !(submission.name.to_lowercase().contains(&term)
                || phone_hit
                || contains(&submission.institution_name)
                || contains(&submission.course_of_study))
            {
                return false;
            }
        }
        if !self.institution.is_empty()
            && submission.institution_name.as_deref() != Some(self.institution.as_str())
        {
            return false;
        }
        if !self.ticket_type.is_empty()
            && submission.ticket_type.as_deref() != Some(self.ticket_type.as_str())
        {
            return false;
        }
        if !self.payment_method.is_empty()
            && submission.payment_method.as_deref() != Some(self.payment_method.as_str())
        {
            return false;
        }
        true
    }

    pub fn apply(&self, submissions: Vec<Submission>) -> Vec<Submission> {
        if self.is_empty() {
            return submissions;
        }
        submissions.into_iter().filter(|s| self.matches(s)).collect()
    }
}

/// Distinct institution names, sorted, for the institution filter
pub fn institutions(records: &[TicketRecord]) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .filter_map(|r| r.institution_name.clone())
        .filter(|n| !n.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}
