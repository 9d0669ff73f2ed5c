use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

use crate::identity::UserProfile;
use crate::tutorial::ChapterProgress;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// How long a token stays valid after login.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    pub theme: Theme,
    pub expires_at: Instant,
    chapters: HashMap<String, ChapterProgress>,
}

impl Session {
    pub fn new(user: UserProfile, ttl: Duration) -> Self {
        Self {
            user,
            theme: Theme::default(),
            expires_at: Instant::now() + ttl,
            chapters: HashMap::new(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn chapter_progress(&self, slug: &str) -> Option<&ChapterProgress> {
        self.chapters.get(slug)
    }

    pub fn chapter_progress_mut(&mut self, slug: &str) -> &mut ChapterProgress {
        self.chapters.entry(slug.to_string()).or_default()
    }
}

/// Signed-in sessions, keyed by the bearer token handed out at login.
/// Expired sessions are dropped on lookup and pruned on every login.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self, user: UserProfile) -> Uuid {
        let token = Uuid::new_v4();
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        if sessions.len() < before {
            debug!("pruned {} expired sessions", before - sessions.len());
        }
        sessions.insert(token, Session::new(user, self.ttl));
        token
    }

    pub async fn get(&self, token: &Uuid) -> Option<Session> {
        let now = Instant::now();
        {
            let sessions = self.inner.read().await;
            match sessions.get(token) {
                Some(session) if !session.is_expired(now) => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.inner.write().await.remove(token);
        None
    }

    pub async fn remove(&self, token: &Uuid) -> Option<Session> {
        self.inner.write().await.remove(token)
    }

    /// Runs `f` against the session under the write lock.
    pub async fn update<F, R>(&self, token: &Uuid, f: F) -> Option<R>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let now = Instant::now();
        let mut sessions = self.inner.write().await;
        if sessions.get(token).is_some_and(|s| s.is_expired(now)) {
            sessions.remove(token);
            return None;
        }
        sessions.get_mut(token).map(f)
    }

    /// Live and not yet pruned sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner() -> UserProfile {
        UserProfile {
            uid: "u1".to_string(),
            email: "learner@academy.dev".to_string(),
            display_name: None,
        }
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let store = SessionStore::new();
        let token = store.create(learner()).await;
        assert_eq!(store.len().await, 1);

        let theme = store.update(&token, |s| {
            s.theme = s.theme.toggle();
            s.theme
        });
        assert_eq!(theme.await, Some(Theme::Dark));
        assert_eq!(store.get(&token).await.map(|s| s.theme), Some(Theme::Dark));

        assert!(store.remove(&token).await.is_some());
        assert!(store.get(&token).await.is_none());
        assert!(store.update(&token, |_| ()).await.is_none());
    }

    #[tokio::test]
    async fn test_chapter_progress_is_per_tutorial() {
        let store = SessionStore::new();
        let token = store.create(learner()).await;
        store
            .update(&token, |s| s.chapter_progress_mut("excel").toggle("1"))
            .await;

        let session = store.get(&token).await.unwrap();
        assert!(session.chapter_progress("excel").unwrap().is_completed("1"));
        assert!(session.chapter_progress("python").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_token_is_rejected() {
        let store = SessionStore::with_ttl(Duration::from_secs(60));
        let token = store.create(learner()).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(store.get(&token).await.is_some());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(store.get(&token).await.is_none());
        assert!(store.update(&token, |_| ()).await.is_none());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_prunes_expired_sessions() {
        let store = SessionStore::with_ttl(Duration::from_secs(60));
        for _ in 0..200 {
            store.create(learner()).await;
        }
        assert_eq!(store.len().await, 200);

        tokio::time::advance(Duration::from_secs(61)).await;
        store.create(learner()).await;
        assert_eq!(store.len().await, 1);
    }
}
