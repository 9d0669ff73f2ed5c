//! Sign-in is delegated to an external identity provider. This module only
//! defines the boundary and maps provider failures to the messages the login
//! screen shows.

pub mod dto;
pub mod firebase;
pub mod local;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use firebase::{FirebaseConfig, FirebaseIdentityClient};
pub use local::StaticIdentityProvider;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserProfile {
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Student")
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("No account found with this email address.")]
    UserNotFound,

    #[error("Incorrect password. Please try again.")]
    WrongPassword,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("This account has been disabled.")]
    UserDisabled,

    #[error("Too many failed attempts. Please try again later.")]
    TooManyRequests,

    #[error("Email and password are required.")]
    MissingCredentials,

    /// Anything else the provider reports. The detail is for logs only.
    #[error("An error occurred during login. Please try again.")]
    Provider(String),
}

impl IdentityError {
    pub fn code(&self) -> &'static str {
        match self {
            IdentityError::UserNotFound => "auth/user-not-found",
            IdentityError::WrongPassword => "auth/wrong-password",
            IdentityError::InvalidEmail => "auth/invalid-email",
            IdentityError::UserDisabled => "auth/user-disabled",
            IdentityError::TooManyRequests => "auth/too-many-requests",
            IdentityError::MissingCredentials => "auth/missing-credentials",
            IdentityError::Provider(_) => "auth/internal-error",
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, IdentityError>;
    async fn sign_out(&self, uid: &str) -> Result<(), IdentityError>;
}

/// Rejects obviously unusable input before a provider round trip.
pub fn check_credentials(email: &str, password: &str) -> Result<(), IdentityError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(IdentityError::MissingCredentials);
    }
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if !valid_email {
        return Err(IdentityError::InvalidEmail);
    }
    Ok(())
}
