//! Authentication utilities library
//!
//! Provides the credential primitives used by the profile service:
//! - Password hashing (Argon2id)
//! - Signed bearer tokens (HS256 JWT) with expiry
//! - Gravatar avatar resolution
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let service = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//! let token = service.sign("user123").unwrap();
//! let claims = service.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod avatar;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use avatar::AvatarResolver;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
