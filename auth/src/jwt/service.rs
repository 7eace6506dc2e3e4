use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Signs identity claims into bearer tokens and verifies them back.
///
/// Uses HS256 (HMAC with SHA-256). The secret and token lifetime are fixed at
/// construction time.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (at least 32 bytes for HS256)
    /// * `ttl` - Lifetime of issued tokens
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Sign a token for `subject` that expires after the configured lifetime.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn sign(&self, subject: &str) -> Result<String, TokenError> {
        self.encode(&Claims::for_subject(subject, self.ttl))
    }

    /// Encode explicit claims into a token.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// No leeway is applied to `exp`.
    ///
    /// # Errors
    /// * `Expired` - Current time is past `exp`
    /// * `Invalid` - Signature mismatch, malformed token, or missing claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_sign_and_verify() {
        let service = TokenService::new(SECRET, Duration::hours(1));

        let token = service.sign("user123").expect("Failed to sign token");
        assert!(!token.is_empty());

        let claims = service.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
    }

    #[test]
    fn test_verify_malformed_token() {
        let service = TokenService::new(SECRET, Duration::hours(1));

        let result = service.verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let signer = TokenService::new(b"secret1_at_least_32_bytes_long_key!", Duration::hours(1));
        let verifier =
            TokenService::new(b"secret2_at_least_32_bytes_long_key!", Duration::hours(1));

        let token = signer.sign("user123").expect("Failed to sign token");

        let result = verifier.verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_expired_token() {
        let service = TokenService::new(SECRET, Duration::hours(1));
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user123".to_string(),
            iat: now - 120,
            exp: now - 60,
        };

        let token = service.encode(&claims).expect("Failed to sign token");

        assert_eq!(service.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_tampered_payload() {
        let service = TokenService::new(SECRET, Duration::hours(1));
        let token = service.sign("user123").expect("Failed to sign token");
        let other = service.sign("user456").expect("Failed to sign token");

        // Splice the second token's payload under the first token's signature.
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(matches!(service.verify(&forged), Err(TokenError::Invalid(_))));
    }
}
