//! Authentication request/response models

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Credential fields a form can report an error against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Password];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
        }
    }

    /// Human-readable label used in messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

/// Per-field error reasons, keyed by known fields only
pub type FieldErrors = BTreeMap<Field, String>;

/// Keep the entries of a server error map that name a known field
pub fn known_field_errors(raw: &HashMap<String, String>) -> FieldErrors {
    raw.iter()
        .filter_map(|(key, reason)| {
            key.parse::<Field>()
                .ok()
                .map(|field| (field, reason.clone()))
        })
        .collect()
}

/// Login request
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Register request
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupCredentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignupCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupCredentials")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// User identifier; servers send either a number or a string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{}", id),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

/// User info returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Payload of a successful register/login call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthData {
    /// Read the `data` member of a `/auth/register` or `/auth/login` success body.
    ///
    /// The server has already accepted the credentials at this point, so a
    /// payload that doesn't fit [`AuthData`] is dropped rather than reported.
    pub fn from_body(body: &Value) -> Option<Self> {
        let data = body.get("data").filter(|data| !data.is_null())?;

        match serde_json::from_value(data.clone()) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unrecognized authentication payload");
                None
            }
        }
    }
}

/// Flat wire shape of an authentication outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AuthData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, String>>,
}

/// Uniform result of an authentication operation
///
/// A failure always carries a non-empty message; use [`AuthOutcome::failure`]
/// to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "AuthResponse")]
pub enum AuthOutcome {
    Success {
        data: Option<AuthData>,
        message: Option<String>,
    },
    Failure {
        message: String,
        errors: FieldErrors,
    },
}

impl AuthOutcome {
    pub fn success(data: Option<AuthData>, message: impl Into<String>) -> Self {
        AuthOutcome::Success {
            data,
            message: Some(message.into()),
        }
    }

    /// Build a failure, substituting `fallback` when `message` is missing or empty
    pub fn failure(message: Option<&str>, fallback: &str, errors: FieldErrors) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_string();

        AuthOutcome::Failure { message, errors }
    }

    /// Interpret a wire payload, keeping only known field errors
    pub fn from_response(response: AuthResponse, fallback: &str) -> Self {
        if response.success {
            return AuthOutcome::Success {
                data: response.data,
                message: response.message,
            };
        }

        let errors = response
            .errors
            .as_ref()
            .map(known_field_errors)
            .unwrap_or_default();

        AuthOutcome::failure(response.message.as_deref(), fallback, errors)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            AuthOutcome::Success { message, .. } => message.as_deref(),
            AuthOutcome::Failure { message, .. } => Some(message),
        }
    }

    pub fn data(&self) -> Option<&AuthData> {
        match self {
            AuthOutcome::Success { data, .. } => data.as_ref(),
            AuthOutcome::Failure { .. } => None,
        }
    }

    /// Field errors of a failure; `None` for successes and for failures without any
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            AuthOutcome::Failure { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }
}

impl From<AuthOutcome> for AuthResponse {
    fn from(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Success { data, message } => AuthResponse {
                success: true,
                data,
                message,
                errors: None,
            },
            AuthOutcome::Failure { message, errors } => AuthResponse {
                success: false,
                data: None,
                message: Some(message),
                errors: (!errors.is_empty()).then(|| {
                    errors
                        .into_iter()
                        .map(|(field, reason)| (field.as_str().to_string(), reason))
                        .collect()
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_user() -> User {
        User {
            id: Some(UserId::from("u1")),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("email".parse::<Field>(), Ok(Field::Email));
        assert_eq!("name".parse::<Field>(), Ok(Field::Name));
        assert!("Email".parse::<Field>().is_err());
        assert!("mobile".parse::<Field>().is_err());
        assert_eq!(Field::Password.to_string(), "password");
    }

    #[test]
    fn test_known_field_errors_drops_unknown_keys() {
        let mut raw = HashMap::new();
        raw.insert("email".to_string(), "taken".to_string());
        raw.insert("mobile".to_string(), "required".to_string());

        let errors = known_field_errors(&raw);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&Field::Email).map(String::as_str), Some("taken"));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = SignupCredentials {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        let printed = format!("{:?}", creds);

        assert!(printed.contains("ada@example.com"));
        assert!(!printed.contains("hunter22"));

        let login = LoginCredentials {
            email: "ada@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(!format!("{:?}", login).contains("hunter22"));
    }

    #[test]
    fn test_user_uses_camel_case() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(value["createdAt"], "2024-01-01T00:00:00Z");

        let parsed: User = serde_json::from_value(json!({
            "id": "u2", "name": "Bob", "email": "bob@example.com"
        }))
        .unwrap();
        assert!(parsed.created_at.is_none());
    }

    #[test]
    fn test_user_id_accepts_numbers_and_strings() {
        let numeric: User = serde_json::from_value(json!({
            "id": 42, "name": "Ada", "email": "ada@example.com"
        }))
        .unwrap();
        assert_eq!(numeric.id, Some(UserId::Number(42)));
        assert_eq!(serde_json::to_value(&numeric).unwrap()["id"], 42);

        let text: User = serde_json::from_value(json!({ "id": "u1" })).unwrap();
        assert_eq!(text.id.map(|id| id.to_string()), Some("u1".to_string()));
        assert!(text.name.is_empty());
    }

    #[test]
    fn test_auth_data_from_body() {
        let full = json!({
            "data": {
                "user": { "id": 42, "name": "Ada", "email": "ada@example.com" },
                "token": "t"
            }
        });
        let data = AuthData::from_body(&full).unwrap();
        assert_eq!(data.user.and_then(|u| u.id), Some(UserId::Number(42)));
        assert_eq!(data.token.as_deref(), Some("t"));

        let token_only = AuthData::from_body(&json!({ "data": { "token": "t" } })).unwrap();
        assert!(token_only.user.is_none());

        assert!(AuthData::from_body(&json!({})).is_none());
        assert!(AuthData::from_body(&json!({ "data": null })).is_none());
        assert!(AuthData::from_body(&json!({ "data": "opaque" })).is_none());
        assert!(AuthData::from_body(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn test_failure_message_fallback() {
        let missing = AuthOutcome::failure(None, "Login failed", FieldErrors::new());
        assert_eq!(missing.message(), Some("Login failed"));

        let empty = AuthOutcome::failure(Some(""), "Login failed", FieldErrors::new());
        assert_eq!(empty.message(), Some("Login failed"));

        let given =
            AuthOutcome::failure(Some("Bad password"), "Login failed", FieldErrors::new());
        assert_eq!(given.message(), Some("Bad password"));
        assert!(!given.is_success());
        assert!(given.errors().is_none());
    }

    #[test]
    fn test_outcome_serializes_to_wire_shape() {
        let success = AuthOutcome::success(
            Some(AuthData {
                user: Some(sample_user()),
                token: Some("t".to_string()),
            }),
            "Login successful",
        );
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({
                "success": true,
                "data": {
                    "user": {
                        "id": "u1",
                        "name": "Ada",
                        "email": "ada@example.com",
                        "createdAt": "2024-01-01T00:00:00Z"
                    },
                    "token": "t"
                },
                "message": "Login successful"
            })
        );

        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, "taken".to_string());
        let failure =
            AuthOutcome::failure(Some("Validation failed"), "Registration failed", errors);
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "success": false,
                "message": "Validation failed",
                "errors": { "email": "taken" }
            })
        );
    }

    #[test]
    fn test_from_response() {
        let response: AuthResponse = serde_json::from_value(json!({
            "success": false,
            "errors": { "password": "too weak", "captcha": "missing" }
        }))
        .unwrap();

        let outcome = AuthOutcome::from_response(response, "Failed to get user");

        assert_eq!(outcome.message(), Some("Failed to get user"));
        let errors = outcome.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&Field::Password).map(String::as_str), Some("too weak"));

        let ok: AuthResponse = serde_json::from_value(json!({ "success": true })).unwrap();
        let outcome = AuthOutcome::from_response(ok, "Failed to get user");
        assert!(outcome.is_success());
        assert!(outcome.data().is_none());
        assert!(outcome.message().is_none());
    }
}
