use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::{Duration, Instant};
use tracing::{debug, warn};

use super::{IdentityError, IdentityProvider, UserProfile};

/// Consecutive wrong passwords before an account is throttled.
const MAX_FAILED_ATTEMPTS: u32 = 5;

/// Failures older than this are forgotten, which also lifts a throttle.
const THROTTLE_WINDOW: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Copy)]
struct Failures {
    count: u32,
    last: Instant,
}

struct Account {
    password: String,
    profile: UserProfile,
    disabled: bool,
}

/// In-memory accounts, for local runs without a provider key and for tests.
#[derive(Default)]
pub struct StaticIdentityProvider {
    accounts: HashMap<String, Account>,
    failed_attempts: Mutex<HashMap<String, Failures>>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single demo learner.
    pub fn demo() -> Self {
        Self::new().with_account("demo@academy.dev", "automation", Some("Demo Learner"))
    }

    pub fn with_account(mut self, email: &str, password: &str, display_name: Option<&str>) -> Self {
        let uid = format!("local-{}", self.accounts.len() + 1);
        self.accounts.insert(
            email.to_lowercase(),
            Account {
                password: password.to_string(),
                profile: UserProfile {
                    uid,
                    email: email.to_string(),
                    display_name: display_name.map(String::from),
                },
                disabled: false,
            },
        );
        self
    }

    pub fn with_disabled_account(mut self, email: &str, password: &str) -> Self {
        self = self.with_account(email, password, None);
        if let Some(account) = self.accounts.get_mut(&email.to_lowercase()) {
            account.disabled = true;
        }
        self
    }

    fn record_failure(&self, key: &str) {
        let now = Instant::now();
        let mut failed = self
            .failed_attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = failed.entry(key.to_string()).or_insert(Failures { count: 0, last: now });
        if now.duration_since(entry.last) >= THROTTLE_WINDOW {
            entry.count = 0;
        }
        entry.count += 1;
        entry.last = now;
    }

    fn is_throttled(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut failed = self
            .failed_attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match failed.get(key).copied() {
            Some(f) if now.duration_since(f.last) >= THROTTLE_WINDOW => {
                failed.remove(key);
                false
            }
            Some(f) => f.count >= MAX_FAILED_ATTEMPTS,
            None => false,
        }
    }

    fn reset_failures(&self, key: &str) {
        let mut failed = self
            .failed_attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        failed.remove(key);
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, IdentityError> {
        let key = email.to_lowercase();
        let account = self.accounts.get(&key).ok_or(IdentityError::UserNotFound)?;

        if account.disabled {
            return Err(IdentityError::UserDisabled);
        }
        if self.is_throttled(&key) {
            warn!("sign-in throttled for {}", account.profile.uid);
            return Err(IdentityError::TooManyRequests);
        }
        if account.password != password {
            self.record_failure(&key);
            return Err(IdentityError::WrongPassword);
        }

        self.reset_failures(&key);
        debug!("signed in {}", account.profile.uid);
        Ok(account.profile.clone())
    }

    async fn sign_out(&self, uid: &str) -> Result<(), IdentityError> {
        debug!("signed out {}", uid);
        Ok(())
    }
}
