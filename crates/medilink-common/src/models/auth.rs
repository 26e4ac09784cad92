use serde::{Deserialize, Serialize};

/// Account role asserted by the auth service.
///
/// The wire value is an open-ended string; anything this client does not
/// recognize lands in `Unknown` rather than failing deserialization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Doctor,
    Admin,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "PATIENT",
            Role::Doctor => "DOCTOR",
            Role::Admin => "ADMIN",
            Role::Unknown => "UNKNOWN",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    /// Open-ended parse matching the wire behavior: unrecognized strings
    /// become `Unknown` rather than failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "PATIENT" => Role::Patient,
            "DOCTOR" => Role::Doctor,
            "ADMIN" => Role::Admin,
            _ => Role::Unknown,
        })
    }
}

/// Authenticated identity as returned by the auth service.
///
/// Login responses carry the name fields but no account id; register
/// responses carry the id but no names. Both shapes deserialize into this
/// one type, with the gaps defaulting to `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Bearer credential. Defaulted so a token-less 200 still parses; the
    /// auth client treats an empty token as a failed exchange.
    #[serde(default)]
    pub token: String,
}

impl Session {
    /// Human-facing name: "First Last" when both are present, otherwise the
    /// username.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            _ => self.username.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Patient).unwrap(), r#""PATIENT""#);
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), r#""DOCTOR""#);

        let role: Role = serde_json::from_str(r#""ADMIN""#).unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_unrecognized_role_maps_to_unknown() {
        let role: Role = serde_json::from_str(r#""SUPERUSER""#).unwrap();
        assert_eq!(role, Role::Unknown);
    }

    #[test]
    fn test_role_from_str_never_fails() {
        assert_eq!("doctor".parse::<Role>().unwrap(), Role::Doctor);
        assert_eq!("PATIENT".parse::<Role>().unwrap(), Role::Patient);
        assert_eq!("whatever".parse::<Role>().unwrap(), Role::Unknown);
    }

    #[test]
    fn test_session_from_login_response() {
        // Login responses have no account id.
        let json = r#"{
            "token": "eyJhbGciOi...",
            "username": "jdoe",
            "email": "jdoe@example.com",
            "role": "PATIENT",
            "firstName": "Jane",
            "lastName": "Doe"
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.username, "jdoe");
        assert_eq!(session.role, Role::Patient);
        assert!(session.account_id.is_none());
        assert_eq!(session.display_name(), "Jane Doe");
    }

    #[test]
    fn test_session_from_register_response() {
        // Register responses have an id but no name fields.
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "username": "jdoe",
            "email": "jdoe@example.com",
            "role": "PATIENT",
            "token": "eyJhbGciOi..."
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(
            session.account_id.as_deref(),
            Some("550e8400-e29b-41d4-a716-446655440000")
        );
        assert!(session.first_name.is_none());
        assert_eq!(session.display_name(), "jdoe");
    }

    #[test]
    fn test_session_without_token_parses_as_empty() {
        let json = r#"{
            "username": "jdoe",
            "email": "jdoe@example.com",
            "role": "PATIENT"
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert!(session.token.is_empty());
    }

    #[test]
    fn test_register_request_wire_format() {
        let req = RegisterRequest {
            username: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            password: "hunter2".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            role: Role::Patient,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["role"], "PATIENT");
    }
}
