use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::validation::ValidationErrors;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account. `avatar_url` is frozen at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Name,
    pub email: EmailAddress,
    pub password_hash: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type. Never empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    pub fn new(name: String) -> Result<Self, NameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Err(NameError::Empty)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored lowercased so
/// uniqueness is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new account.
///
/// The password is kept in clear only until the service hashes it.
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub name: Name,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterUserCommand {
    const MIN_PASSWORD_LENGTH: usize = 6;

    /// Validate raw registration input.
    ///
    /// Every field is checked; all failures are reported together.
    pub fn parse(name: &str, email: &str, password: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors.check("name", Name::new(name.to_string()), "Name is required");
        let email = errors.check(
            "email",
            EmailAddress::new(email.to_string()),
            "Please include a valid email",
        );
        if password.chars().count() < Self::MIN_PASSWORD_LENGTH {
            errors.push(
                "password",
                "Please enter a password with 6 or more characters",
            );
        }

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(Self {
                name,
                email,
                password: password.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Command to log into an existing account.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn parse(email: &str, password: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let email = errors.check(
            "email",
            EmailAddress::new(email.to_string()),
            "Please include a valid email",
        );
        if password.is_empty() {
            errors.push("password", "Password is required");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(Self {
                email,
                password: password.to_string(),
            }),
            _ => Err(errors),
        }
    }
}
