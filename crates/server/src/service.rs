//! Authentication service: registration, login, and identity resolution

use keygate_shared::{AuthResponse, PublicUser};

use crate::auth::{hash_password, verify_password, TokenCodec};
use crate::directory::{AccountDirectory, NewAccount};
use crate::error::{ApiError, ApiResult};

/// Minimum plaintext password length, enforced before hashing
pub const MIN_PASSWORD_LEN: usize = 6;

/// Orchestrates the credential hasher, token codec, and account directory.
/// Stateless per request; the directory is the only shared state.
#[derive(Clone)]
pub struct AuthService<D> {
    directory: D,
    tokens: TokenCodec,
}

impl<D: AccountDirectory> AuthService<D> {
    pub fn new(directory: D, tokens: TokenCodec) -> Self {
        Self { directory, tokens }
    }

    /// Create an account and log it in. The directory's uniqueness
    /// constraint is the source of truth for duplicate emails; the lookup
    /// here is only a fast path, and a duplicate violation at create time
    /// maps to the same outcome.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        let name = name.trim();
        let email = normalize_email(email);
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation("All fields are required".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if self.directory.find_by_email(&email).await?.is_some() {
            return Err(ApiError::DuplicateAccount);
        }

        let password_hash = hash_password(password)?;
        let account = self
            .directory
            .create(NewAccount {
                name: name.to_string(),
                email,
                password_hash,
            })
            .await?;

        let token = self.issue_token(&account.id)?;
        tracing::info!(account_id = %account.id, "account registered");

        Ok(AuthResponse {
            token,
            user: account.public_view(),
        })
    }

    /// Authenticate an existing account. Unknown email and wrong password
    /// are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation("All fields are required".to_string()));
        }

        let account = self
            .directory
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash)? {
            return Err(ApiError::InvalidCredentials);
        }

        let token = self.issue_token(&account.id)?;
        tracing::info!(account_id = %account.id, "login succeeded");

        Ok(AuthResponse {
            token,
            user: account.public_view(),
        })
    }

    /// Resolve a session token to its account's public view.
    pub async fn identify(&self, token: &str) -> ApiResult<PublicUser> {
        let account_id = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            ApiError::Unauthenticated
        })?;

        let account = self
            .directory
            .find_by_id(account_id)
            .await?
            // Account deleted out of band after the token was issued
            .ok_or(ApiError::AccountNotFound)?;

        Ok(account.public_view())
    }

    fn issue_token(&self, account_id: &uuid::Uuid) -> ApiResult<String> {
        self.tokens.issue(*account_id).map_err(|e| {
            tracing::error!(error = %e, "token issuance failed");
            ApiError::Internal
        })
    }
}

/// Emails are matched case-insensitively: stored and looked up lowercase.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
