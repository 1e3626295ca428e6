//! Session token issuance and verification

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Claims carried by a Keygate session token. The account id is the sole
/// identity claim; the server keeps no record of issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: Uuid,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

/// Stateless codec for signed session tokens. Pure function of the input,
/// the clock, and the process-wide signing secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from the configured signing secret and token lifetime.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Issue a signed token for an account, expiring `ttl` from now.
    pub fn issue(&self, account_id: Uuid) -> Result<String, TokenError> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: account_id,
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        };

        // Explicit algorithm prevents algorithm confusion attacks
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verify a token and return the embedded account id.
    /// Fails if the signature does not match, the encoding is malformed, or
    /// the token has expired. Expiry is exact: no clock-skew leeway.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

/// Token verification failures. Callers must collapse `Expired` and
/// `Invalid` into one user-facing outcome; the distinction exists for
/// operational logging only.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-chars!";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = TokenCodec::new(SECRET, Duration::hours(1));
        let account_id = Uuid::new_v4();

        let token = codec.issue(account_id).expect("Failed to issue token");
        let decoded = codec.verify(&token).expect("Token should verify");
        assert_eq!(decoded, account_id);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // A codec with a negative lifetime issues already-expired tokens
        let codec = TokenCodec::new(SECRET, Duration::seconds(-1));
        let token = codec
            .issue(Uuid::new_v4())
            .expect("Failed to issue token");

        assert!(matches!(codec.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let codec = TokenCodec::new(SECRET, Duration::hours(1));
        let token = codec
            .issue(Uuid::new_v4())
            .expect("Failed to issue token");

        // Flip the last character of the signature
        let mut tampered = token.clone();
        let last = tampered.pop().expect("token is non-empty");
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_ne!(token, tampered);

        assert!(matches!(codec.verify(&tampered), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let codec = TokenCodec::new(SECRET, Duration::hours(1));
        let other = TokenCodec::new("another-secret-key-with-32-chars!!", Duration::hours(1));

        let token = codec
            .issue(Uuid::new_v4())
            .expect("Failed to issue token");
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let codec = TokenCodec::new(SECRET, Duration::hours(1));
        assert!(matches!(
            codec.verify("not.a.token"),
            Err(TokenError::Invalid)
        ));
    }
}
