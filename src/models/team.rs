use serde::{Deserialize, Serialize};
use super::string_or_number;

/// Sub-administrator on the protocol team
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtocolMember {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
    pub active: bool,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminUserRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_camel_case_keys() {
        let request = CreateAdminUserRequest {
            full_name: "Nana Yeboah".into(),
            email: "nana@event.gh".into(),
            password: "secret123".into(),
            phone_number: "+233241234567".into(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fullName"], "Nana Yeboah");
        assert_eq!(json["phoneNumber"], "+233241234567");
    }

    #[test]
    fn parses_member() {
        let member: ProtocolMember = serde_json::from_str(
            r#"{"id":"u-9","fullName":"Kwame","email":"k@e.gh","phoneNumber":"0200000000","role":"PROTOCOL","active":true,"createdAt":"2024-05-01T10:00:00"}"#,
        )
        .unwrap();
        assert!(member.active);
        assert_eq!(member.role, "PROTOCOL");
    }
}
