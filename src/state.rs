use std::sync::Arc;

use tracing::info;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::AppError;
use crate::identity::{FirebaseIdentityClient, IdentityProvider, StaticIdentityProvider};
use crate::session::SessionStore;
use crate::tutorial::TutorialLibrary;

/// Everything a handler may read or update. The catalog and tutorials are
/// fixed at startup; sessions are the only mutable part.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub tutorials: Arc<TutorialLibrary>,
    pub identity: Arc<dyn IdentityProvider>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Catalog,
        tutorials: TutorialLibrary,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let sessions = SessionStore::with_ttl(config.session_ttl);
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            tutorials: Arc::new(tutorials),
            identity,
            sessions,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let catalog = config.load_catalog()?;

        let identity: Arc<dyn IdentityProvider> = match &config.firebase {
            Some(firebase) => {
                info!("using Firebase identity provider at {}", firebase.endpoint);
                Arc::new(FirebaseIdentityClient::new(firebase.clone())?)
            }
            None => Arc::new(StaticIdentityProvider::demo()),
        };

        Ok(Self::new(config.clone(), catalog, TutorialLibrary::sample(), identity))
    }
}
