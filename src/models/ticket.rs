// ============================================================================
// TICKET - Raw ticket records + approved tickets paging
// ============================================================================

use serde::{Deserialize, Serialize};
use super::string_or_number;

/// Ticket/application record as returned by the backend.
///
/// The same shape backs the submissions list and the paid tickets table;
/// everything except `id` may be missing depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub ticket_type: Option<String>,
    pub amount: Option<f64>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub created_at: Option<String>,
    pub ticket_code: Option<String>,
    pub institution_name: Option<String>,
    pub course_of_study: Option<String>,
    pub student_id_number: Option<String>,
    pub verification_status: Option<String>,
    pub ticket_status: Option<String>,
    pub verification_document_url: Option<String>,
    pub student_document_url: Option<String>,
    pub qr_code_url: Option<String>,
}

pub const TICKET_TYPE_STUDENT: &str = "STUDENT";
pub const TICKET_TYPE_NON_STUDENT: &str = "NON_STUDENT";

impl TicketRecord {
    pub fn is_student(&self) -> bool {
        self.ticket_type.as_deref() == Some(TICKET_TYPE_STUDENT)
    }
}

/// `NON_STUDENT` -> `NON STUDENT`, `mobile_money` -> `mobile money`.
/// Only the first underscore is replaced.
pub fn humanize_code(code: &str) -> String {
    code.replacen('_', " ", 1)
}

/// Spring-style page envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number_of_elements: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Parameters of `GET /admin/dashboard/tickets`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ApprovedTicketsQuery {
    /// Zero-based
    pub page: u32,
    pub size: u32,
    pub ticket_type: Option<String>,
    pub payment_method: Option<String>,
}

impl ApprovedTicketsQuery {
    /// Only successful payments are listed
    pub const PAYMENT_STATUS: &'static str = "SUCCESS";

    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size, ..Default::default() }
    }

    pub fn with_ticket_type(mut self, ticket_type: Option<String>) -> Self {
        self.ticket_type = ticket_type;
        self
    }

    pub fn with_payment_method(mut self, payment_method: Option<String>) -> Self {
        self.payment_method = payment_method;
        self
    }

    /// Query string pairs; blank filters are dropped rather than sent empty
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
            ("paymentStatus".to_string(), Self::PAYMENT_STATUS.to_string()),
        ];
        if let Some(ticket_type) = non_blank(&self.ticket_type) {
            params.push(("ticketType".to_string(), ticket_type.to_string()));
        }
        if let Some(payment_method) = non_blank(&self.payment_method) {
            params.push(("paymentMethod".to_string(), payment_method.to_string()));
        }
        params
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_filters_are_omitted() {
        let query = ApprovedTicketsQuery::new(0, 10)
            .with_ticket_type(Some(String::new()))
            .with_payment_method(None);
        let params = query.to_params();

        assert_eq!(
            params,
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "10".to_string()),
                ("paymentStatus".to_string(), "SUCCESS".to_string()),
            ]
        );
        assert!(params.iter().all(|(k, _)| k != "ticketType" && k != "paymentMethod"));
    }

    #[test]
    fn set_filters_are_forwarded() {
        let query = ApprovedTicketsQuery::new(3, 10)
            .with_ticket_type(Some("STUDENT".into()))
            .with_payment_method(Some("mobile_money".into()));
        let params = query.to_params();

        assert!(params.contains(&("page".to_string(), "3".to_string())));
        assert!(params.contains(&("ticketType".to_string(), "STUDENT".to_string())));
        assert!(params.contains(&("paymentMethod".to_string(), "mobile_money".to_string())));
    }

    #[test]
    fn parses_page_with_numeric_ids() {
        let json = r#"{
            "content": [{"id": 7, "fullName": "Ama Mensah", "ticketType": "STUDENT", "amount": 50}],
            "totalPages": 4, "totalElements": 31, "numberOfElements": 1
        }"#;
        let page: Page<TicketRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(page.content[0].id, "7");
        assert!(page.content[0].is_student());
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn humanize_replaces_first_underscore() {
        assert_eq!(humanize_code("NON_STUDENT"), "NON STUDENT");
        assert_eq!(humanize_code("mobile_money"), "mobile money");
        assert_eq!(humanize_code("card"), "card");
    }
}
