pub mod auth;
pub mod dashboard;
pub mod status;
pub mod submission;
pub mod team;
pub mod ticket;

pub use auth::{AuthResponse, LoginRequest, User};
pub use dashboard::DashboardStats;
pub use status::{derive_display_status, DisplayStatus, SubmissionFilter};
pub use submission::{Submission, SubmissionSearch};
pub use team::{CreateAdminUserRequest, ProtocolMember};
pub use ticket::{ApprovedTicketsQuery, Page, TicketRecord};

use serde::{Deserialize, Deserializer};

/// Backend ids arrive as strings or numbers depending on the endpoint
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
