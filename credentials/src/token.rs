use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use crate::errors::TokenError;

/// Lifetime of every issued access token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims carried by an access token.
///
/// Fixed shape: subject (user identifier), role, issued-at and expiry as
/// Unix timestamps. Expiry is always `iat + TOKEN_TTL_SECS`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Role granted to the subject at issuance time
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims for a subject, expiring one lifetime after `issued_at`.
    pub fn new(subject: impl ToString, role: impl ToString, issued_at: i64) -> Self {
        Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        }
    }
}

/// Issues and verifies signed access tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signing secret is provided once at
/// construction and held for the lifetime of the process.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenIssuer {
    /// Create a new token issuer from the process-wide secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a subject and role.
    ///
    /// Claims are stamped with the current time; the token expires
    /// [`TOKEN_TTL_SECS`] seconds later.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, TokenError> {
        let claims = AccessClaims::new(subject, role, Utc::now().timestamp());
        self.sign(&claims)
    }

    /// Decode a token and validate its signature and expiry.
    ///
    /// Expiry is checked with zero leeway, so a token is rejected the moment
    /// its `exp` timestamp passes.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry timestamp
    /// * `Invalid` - Signature does not verify or the token is malformed
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }

    fn sign(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }
}
