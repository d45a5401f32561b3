//! Credential primitives for the authentication service.
//!
//! Provides the two pieces of the service with a cryptographic contract:
//! - Password hashing (Argon2id with a fresh salt per call)
//! - Access token issuance and verification (HS256 JWT, fixed lifetime)
//!
//! The crate is deliberately free of I/O and domain types so the service can
//! inject these primitives wherever credentials are checked or proven.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credentials::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let stored = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &stored).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use credentials::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let token = issuer.issue("user123", "admin").unwrap();
//! let claims = issuer.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod errors;
pub mod hasher;
pub mod token;

// Re-export commonly used items
pub use errors::PasswordError;
pub use errors::TokenError;
pub use hasher::PasswordHasher;
pub use token::AccessClaims;
pub use token::TokenIssuer;
pub use token::TOKEN_TTL_SECS;
