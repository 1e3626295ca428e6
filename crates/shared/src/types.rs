//! Wire types for the Keygate authentication API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public projection of an account, the only form of an account that ever
/// crosses the service boundary. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Body of `POST /api/auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful response from register and login. The token is opaque to the
/// client; it is stored and replayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Header carrying the session token on authenticated requests.
/// A dedicated header rather than standard bearer auth; client and server
/// must agree on it.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_round_trips_through_json() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        let back: PublicUser = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn error_envelope_shape() {
        let json = r#"{"error":{"code":"INVALID_CREDENTIALS","message":"Invalid credentials"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code, "INVALID_CREDENTIALS");
    }
}
