//! HTTP transport for the Keygate authentication API

use keygate_shared::{
    AuthResponse, ErrorEnvelope, LoginRequest, PublicUser, RegisterRequest, AUTH_TOKEN_HEADER,
};
use reqwest::Response;

use crate::error::ClientError;

/// Thin client over the server's three operations. Holds no session state;
/// the token is supplied by the caller and treated as an opaque string.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:5000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create an account; the response token is already a live session.
    pub async fn register(&self, credentials: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/auth/register", self.base_url))
            .json(credentials)
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let response = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(credentials)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Resolve a previously issued token to the current user's view.
    pub async fn current_user(&self, token: &str) -> Result<PublicUser, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/auth/me", self.base_url))
            .header(AUTH_TOKEN_HEADER, token)
            .send()
            .await?;
        parse_response(response).await
    }
}

/// Deserialize a success body, or turn the server's error envelope into a
/// `ClientError::Api` with a message fit for display.
async fn parse_response<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<ErrorEnvelope>().await {
        Ok(envelope) => envelope.error.message,
        Err(_) => "Request failed".to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
