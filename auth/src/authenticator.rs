use chrono::Duration;

use crate::avatar::AvatarResolver;
use crate::jwt::Claims;
use crate::jwt::TokenError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing, token handling and
/// avatar resolution.
///
/// Built once from configuration and shared; carries the signing secret so no
/// caller needs to look it up.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    avatar_resolver: AvatarResolver,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(jwt_secret, token_ttl),
            avatar_resolver: AvatarResolver::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Resolve the display image for an email address.
    pub fn avatar_url(&self, email: &str) -> String {
        self.avatar_resolver.resolve(email)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.sign(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token for `subject` without password verification.
    ///
    /// Used right after registration, where the caller has just proven the
    /// credentials by choosing them.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn generate_token(&self, subject: &str) -> Result<String, TokenError> {
        self.token_service.sign(subject)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `Invalid` - Signature mismatch or malformed token
    /// * `Expired` - Token lifetime elapsed
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_service.verify(token)
    }
}
