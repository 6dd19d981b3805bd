// ============================================================================
// SUBMISSION SERVICE - Applications, review actions, paid tickets, stats
// ============================================================================

use serde_json::Value;

use crate::error::ApiResult;
use crate::models::{ApprovedTicketsQuery, DashboardStats, Page, SubmissionFilter, TicketRecord};
use crate::services::api_client::ApiClient;
use crate::services::http::encode_path_segment;
use crate::services::query_client::{Query, QueryTag};

/// Tags a successful approve or reject makes stale
pub const REVIEW_INVALIDATES: [QueryTag; 2] = [QueryTag::Submissions, QueryTag::DashboardStats];

pub fn submissions_query(filter: SubmissionFilter) -> Query {
    Query::new(
        "submissions",
        vec![filter.as_str().to_string()],
        &[QueryTag::Submissions],
    )
}

pub fn dashboard_stats_query() -> Query {
    Query::new("dashboardStats", vec![], &[QueryTag::DashboardStats])
}

pub fn approved_tickets_query(query: &ApprovedTicketsQuery) -> Query {
    Query::new(
        "approvedTickets",
        vec![
            query.page.to_string(),
            query.size.to_string(),
            query.ticket_type.clone().unwrap_or_default(),
            query.payment_method.clone().unwrap_or_default(),
        ],
        &[QueryTag::ApprovedTickets],
    )
}

/// `GET /student-tickets/admin/applications`, filtered server side.
/// `ALL` sends no `status` parameter.
pub async fn list_submissions(
    api: &ApiClient,
    filter: SubmissionFilter,
) -> ApiResult<Vec<TicketRecord>> {
    let params = filter
        .query_value()
        .map(|status| vec![("status".to_string(), status.to_string())])
        .unwrap_or_default();
    api.get_json("/student-tickets/admin/applications", params).await
}

pub async fn approve(api: &ApiClient, id: &str) -> ApiResult<Value> {
    log::info!("✅ [REVIEW] Approving submission {}", id);
    let path = format!("/student-tickets/admin/approve/{}", encode_path_segment(id));
    api.post_json::<Value, Value>(&path, None).await
}

pub async fn reject(api: &ApiClient, id: &str, reason: &str) -> ApiResult<Value> {
    log::info!("⛔ [REVIEW] Rejecting submission {}", id);
    let body = serde_json::json!({ "reason": reason });
    let path = format!("/student-tickets/admin/reject/{}", encode_path_segment(id));
    api.post_json(&path, Some(&body)).await
}

/// `GET /admin/dashboard/tickets`: successful payments only, zero-based page
pub async fn list_approved_tickets(
    api: &ApiClient,
    query: &ApprovedTicketsQuery,
) -> ApiResult<Page<TicketRecord>> {
    api.get_json("/admin/dashboard/tickets", query.to_params()).await
}

pub async fn get_dashboard_stats(api: &ApiClient) -> ApiResult<DashboardStats> {
    api.get_json("/admin/dashboard/stats", vec![]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::test_support::{test_client, MockTransport};

    #[tokio::test]
    async fn all_filter_sends_no_status() {
        let transport = MockTransport::new();
        transport.respond("GET", "/student-tickets/admin/applications", 200, "[]");
        let (client, _, _, _) = test_client(&transport);

        let records = list_submissions(&client, SubmissionFilter::All).await.unwrap();

        assert!(records.is_empty());
        assert!(transport.requests()[0].query.is_empty());
    }

    #[tokio::test]
    async fn other_filters_are_sent_verbatim() {
        let transport = MockTransport::new();
        transport.respond(
            "GET",
            "/student-tickets/admin/applications",
            200,
            r#"[{"id":12,"fullName":"Ama Mensah","ticketType":"STUDENT","verificationStatus":"PENDING"}]"#,
        );
        let (client, _, _, _) = test_client(&transport);

        for filter in [
            SubmissionFilter::Pending,
            SubmissionFilter::Approved,
            SubmissionFilter::Rejected,
            SubmissionFilter::Paid,
        ] {
            let records = list_submissions(&client, filter).await.unwrap();
            assert_eq!(records[0].id, "12");
        }

        let statuses: Vec<String> = transport
            .requests()
            .iter()
            .filter_map(|r| r.query_param("status").map(str::to_string))
            .collect();
        assert_eq!(statuses, vec!["PENDING", "APPROVED", "REJECTED", "PAID"]);
    }

    #[tokio::test]
    async fn review_actions_hit_id_paths() {
        let transport = MockTransport::new();
        transport.respond("POST", "/student-tickets/admin/approve/42", 200, r#"{"ok":true}"#);
        transport.respond("POST", "/student-tickets/admin/reject/42", 200, "");
        let (client, _, _, _) = test_client(&transport);

        let approved = approve(&client, "42").await.unwrap();
        let rejected = reject(&client, "42", "Blurry ID").await.unwrap();

        assert_eq!(approved["ok"], true);
        assert_eq!(rejected, Value::Null);
        let sent = transport.requests();
        assert_eq!(sent[0].body, None);
        assert_eq!(sent[1].body, Some(serde_json::json!({"reason": "Blurry ID"})));
    }

    #[tokio::test]
    async fn review_ids_are_escaped_in_the_path() {
        let transport = MockTransport::new();
        let (client, _, _, _) = test_client(&transport);

        let _ = approve(&client, "a/b?c").await;
        let _ = reject(&client, "7 8", "Blurry ID").await;

        let sent = transport.requests();
        assert!(sent[0].url.ends_with("/student-tickets/admin/approve/a%2Fb%3Fc"));
        assert!(sent[1].url.ends_with("/student-tickets/admin/reject/7%208"));
    }

    #[tokio::test]
    async fn approved_tickets_always_filter_successful_payments() {
        let transport = MockTransport::new();
        transport.respond(
            "GET",
            "/admin/dashboard/tickets",
            200,
            r#"{"content":[{"id":"t1","fullName":"Kofi","amount":50}],"totalPages":3,"totalElements":21}"#,
        );
        let (client, _, _, _) = test_client(&transport);

        let query = ApprovedTicketsQuery::new(2, 10).with_payment_method(Some("MOBILE_MONEY".into()));
        let page = list_approved_tickets(&client, &query).await.unwrap();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content[0].amount, Some(50.0));
        let sent = &transport.requests()[0];
        assert_eq!(sent.query_param("page"), Some("2"));
        assert_eq!(sent.query_param("size"), Some("10"));
        assert_eq!(sent.query_param("paymentStatus"), Some("SUCCESS"));
        assert_eq!(sent.query_param("paymentMethod"), Some("MOBILE_MONEY"));
        assert_eq!(sent.query_param("ticketType"), None);
    }

    #[tokio::test]
    async fn errors_propagate_unmodified() {
        let transport = MockTransport::new();
        transport.respond("GET", "/admin/dashboard/stats", 503, r#"{"message":"maintenance"}"#);
        let (client, _, _, _) = test_client(&transport);

        let err = get_dashboard_stats(&client).await.unwrap_err();

        assert_eq!(
            err,
            ApiError::Remote {
                status: 503,
                body: Some(serde_json::json!({"message": "maintenance"})),
            }
        );
    }

    #[test]
    fn query_keys_follow_parameters() {
        assert_ne!(
            submissions_query(SubmissionFilter::Pending).key,
            submissions_query(SubmissionFilter::Paid).key
        );
        let first = approved_tickets_query(&ApprovedTicketsQuery::new(0, 10));
        let second = approved_tickets_query(&ApprovedTicketsQuery::new(1, 10));
        assert_ne!(first.key, second.key);
        assert_eq!(dashboard_stats_query().tags, vec![QueryTag::DashboardStats]);
    }
}
