// ============================================================================
// TEAM SERVICE - Protocol team (sub-administrators)
// ============================================================================

use serde_json::Value;

use crate::error::ApiResult;
use crate::models::{CreateAdminUserRequest, ProtocolMember};
use crate::services::api_client::ApiClient;
use crate::services::query_client::{Query, QueryTag};

pub const CREATE_SUB_ADMIN_INVALIDATES: [QueryTag; 3] = [
    QueryTag::Submissions,
    QueryTag::DashboardStats,
    QueryTag::ProtocolTeam,
];

pub fn protocol_team_query() -> Query {
    Query::new("protocolTeam", vec![], &[QueryTag::ProtocolTeam])
}

pub async fn create_sub_admin(api: &ApiClient, request: &CreateAdminUserRequest) -> ApiResult<Value> {
    log::info!("👤 [TEAM] Creating sub-admin {}", request.email);
    api.post_json("/admin/users/protocol-team", Some(request)).await
}

pub async fn get_protocol_team(api: &ApiClient) -> ApiResult<Vec<ProtocolMember>> {
    api.get_json("/admin/users/protocol-team", vec![]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_client, MockTransport};

    #[tokio::test]
    async fn create_posts_camel_case_body() {
        let transport = MockTransport::new();
        transport.respond("POST", "/admin/users/protocol-team", 201, r#"{"id":9}"#);
        let (client, _, _, _) = test_client(&transport);

        let request = CreateAdminUserRequest {
            full_name: "Esi Owusu".into(),
            email: "esi@event.gh".into(),
            password: "longpass1".into(),
            phone_number: "+233201234567".into(),
        };
        let created = create_sub_admin(&client, &request).await.unwrap();

        assert_eq!(created["id"], 9);
        assert_eq!(
            transport.requests()[0].body,
            Some(serde_json::json!({
                "fullName": "Esi Owusu",
                "email": "esi@event.gh",
                "password": "longpass1",
                "phoneNumber": "+233201234567",
            }))
        );
    }

    #[tokio::test]
    async fn lists_members() {
        let transport = MockTransport::new();
        transport.respond(
            "GET",
            "/admin/users/protocol-team",
            200,
            r#"[{"id":1,"fullName":"Yaw","email":"yaw@event.gh","role":"PROTOCOL","active":true}]"#,
        );
        let (client, _, _, _) = test_client(&transport);

        let members = get_protocol_team(&client).await.unwrap();

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].full_name, "Yaw");
        assert!(members[0].active);
    }
}
