use sha2::Digest;
use sha2::Sha256;

const GRAVATAR_BASE_URL: &str = "https://www.gravatar.com/avatar";

/// Maps an email address to a Gravatar image URL.
///
/// Pure function of the email: the address is trimmed and lowercased, hashed with
/// SHA-256 and embedded in the URL together with fixed size (200px), rating (pg)
/// and fallback (mystery man) parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvatarResolver;

impl AvatarResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, email: &str) -> String {
        let normalized = email.trim().to_lowercase();
        let digest = hex::encode(Sha256::digest(normalized.as_bytes()));

        format!("{GRAVATAR_BASE_URL}/{digest}?s=200&r=pg&d=mm")
    }
}
