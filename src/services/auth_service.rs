// ============================================================================
// AUTH SERVICE - Login against the admin API
// ============================================================================

use crate::error::ApiResult;
use crate::models::{AuthResponse, LoginRequest};
use crate::services::api_client::ApiClient;

/// `POST /auth/login`. The caller stores the returned token in the session.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> ApiResult<AuthResponse> {
    log::info!("🔐 [AUTH] Login attempt for {}", email);
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    api.post_json("/auth/login", Some(&request)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{error_message, ApiError};
    use crate::services::http::Method;
    use crate::test_support::{test_client, MockTransport};

    #[tokio::test]
    async fn posts_credentials_and_parses_response() {
        let transport = MockTransport::new();
        transport.respond(
            "POST",
            "/auth/login",
            200,
            r#"{"token":"jwt-1","user":{"id":3,"email":"a@b.com","role":"ADMIN"}}"#,
        );
        let (client, _, _, _) = test_client(&transport);

        let response = login(&client, "a@b.com", "secret1").await.unwrap();

        assert_eq!(response.token, "jwt-1");
        assert_eq!(response.user.id, "3");
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(
            sent.body,
            Some(serde_json::json!({"email": "a@b.com", "password": "secret1"}))
        );
    }

    #[tokio::test]
    async fn rejected_credentials_surface_server_message() {
        let transport = MockTransport::new();
        transport.respond("POST", "/auth/login", 400, r#"{"message":"Bad credentials"}"#);
        let (client, session, _, _) = test_client(&transport);

        let err = login(&client, "a@b.com", "wrong-pass").await.unwrap_err();

        assert!(matches!(err, ApiError::Remote { status: 400, .. }));
        assert_eq!(error_message(&err), "Bad credentials");
        assert!(!session.is_authenticated());
    }
}
