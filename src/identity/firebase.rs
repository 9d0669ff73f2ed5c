use std::env;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, warn};

use super::{dto, IdentityError, IdentityProvider, UserProfile};

const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub endpoint: String,
}

impl FirebaseConfig {
    /// `None` when `FIREBASE_API_KEY` is not set.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("FIREBASE_API_KEY").ok().filter(|k| !k.is_empty())?;
        let endpoint = env::var("FIREBASE_AUTH_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Some(Self { api_key, endpoint })
    }
}

pub struct FirebaseIdentityClient {
    client: Client,
    config: FirebaseConfig,
}

impl FirebaseIdentityClient {
    pub fn new(config: FirebaseConfig) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .build()
            .map_err(|e| IdentityError::Provider(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }
}

/// Maps the REST error message (`EMAIL_NOT_FOUND`, `TOO_MANY_ATTEMPTS_TRY_LATER : ...`)
/// to the error shown on the login screen.
pub fn map_rest_error(message: &str) -> IdentityError {
    let code = message.split([' ', ':']).next().unwrap_or_default();
    match code {
        "EMAIL_NOT_FOUND" => IdentityError::UserNotFound,
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => IdentityError::WrongPassword,
        "INVALID_EMAIL" => IdentityError::InvalidEmail,
        "USER_DISABLED" => IdentityError::UserDisabled,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => IdentityError::TooManyRequests,
        other => IdentityError::Provider(other.to_string()),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, IdentityError> {
        let url = format!(
            "{}/accounts:signInWithPassword?key={}",
            self.config.endpoint, self.config.api_key
        );

        let request_body = dto::SignInRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("identity provider unreachable: {}", e);
                IdentityError::Provider(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = match serde_json::from_str::<dto::ErrorEnvelope>(&body) {
                Ok(envelope) => map_rest_error(&envelope.error.message),
                Err(_) => IdentityError::Provider(format!("{}: {}", status, body)),
            };
            warn!("sign-in rejected ({}): {}", status, err.code());
            return Err(err);
        }

        let parsed: dto::SignInResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Provider(format!("Failed to parse sign-in response: {}", e)))?;

        debug!("signed in {}", parsed.local_id);
        Ok(UserProfile {
            uid: parsed.local_id,
            email: parsed.email,
            display_name: parsed.display_name.filter(|n| !n.is_empty()),
        })
    }

    async fn sign_out(&self, uid: &str) -> Result<(), IdentityError> {
        // ID tokens are held client side; nothing to revoke here.
        debug!("signed out {}", uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_rest_error() {
        assert_eq!(map_rest_error("EMAIL_NOT_FOUND"), IdentityError::UserNotFound);
        assert_eq!(map_rest_error("INVALID_LOGIN_CREDENTIALS"), IdentityError::WrongPassword);
        assert_eq!(
            map_rest_error("TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled"),
            IdentityError::TooManyRequests
        );
        assert_eq!(map_rest_error("USER_DISABLED"), IdentityError::UserDisabled);
        assert_eq!(
            map_rest_error("OPERATION_NOT_ALLOWED"),
            IdentityError::Provider("OPERATION_NOT_ALLOWED".to_string())
        );
    }

    #[test]
    fn test_error_envelope_parses() {
        let body = r#"{"error":{"code":400,"message":"INVALID_EMAIL","errors":[]}}"#;
        let envelope: dto::ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.error.code, 400);
        assert_eq!(map_rest_error(&envelope.error.message), IdentityError::InvalidEmail);
    }
}
