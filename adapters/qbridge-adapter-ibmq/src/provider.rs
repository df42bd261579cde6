//! IBM Q provider: one shared client, one handle per backend.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::{IbmqApi, IbmqConnector};
use crate::backend::IbmqBackend;
use crate::credentials::Credentials;
use crate::error::{IbmqError, IbmqResult};

/// Entry point for an IBM Q account.
///
/// Backend handles are created once, on first use, and shared afterwards.
pub struct IbmqProvider {
    /// Account credentials.
    credentials: Credentials,
    /// API client shared by every handle.
    api: Arc<dyn IbmqApi>,
    /// Handles keyed by backend name; `None` until first loaded.
    backends: RwLock<Option<FxHashMap<String, Arc<IbmqBackend>>>>,
}

impl IbmqProvider {
    /// Create a provider over an existing API client.
    pub fn new(credentials: Credentials, api: Arc<dyn IbmqApi>) -> Self {
        Self {
            credentials,
            api,
            backends: RwLock::new(None),
        }
    }

    /// Create a provider talking HTTP to the API in `credentials`.
    pub fn connect(credentials: Credentials) -> IbmqResult<Self> {
        let connector = IbmqConnector::new(&credentials)?;
        tracing::info!("using IBM Q API at {}", connector.base_url());
        Ok(Self::new(credentials, Arc::new(connector)))
    }

    /// Create a provider from the `QE_*` environment variables.
    pub fn from_env() -> IbmqResult<Self> {
        Self::connect(Credentials::from_env()?)
    }

    /// Account credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Fetch backend configurations and rebuild every handle.
    ///
    /// Returns the number of backends.
    pub async fn refresh(&self) -> IbmqResult<usize> {
        let configurations = self.api.available_backends().await?;

        let mut backends = FxHashMap::default();
        for configuration in configurations {
            debug!("Registering backend: {}", configuration.backend_name);
            let name = configuration.backend_name.clone();
            let handle = IbmqBackend::new(configuration, &self.credentials, Arc::clone(&self.api));
            backends.insert(name, Arc::new(handle));
        }

        let count = backends.len();
        *self.backends.write().await = Some(backends);
        Ok(count)
    }

    /// All backends of the account, sorted by name.
    pub async fn backends(&self) -> IbmqResult<Vec<Arc<IbmqBackend>>> {
        self.ensure_loaded().await?;

        let backends = self.backends.read().await;
        let mut list: Vec<_> = backends.iter().flat_map(|b| b.values()).cloned().collect();
        list.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(list)
    }

    /// The backend called `name`.
    pub async fn get_backend(&self, name: &str) -> IbmqResult<Arc<IbmqBackend>> {
        self.ensure_loaded().await?;

        self.backends
            .read()
            .await
            .as_ref()
            .and_then(|b| b.get(name))
            .cloned()
            .ok_or_else(|| IbmqError::BackendUnavailable(name.to_string()))
    }

    async fn ensure_loaded(&self) -> IbmqResult<()> {
        if self.backends.read().await.is_none() {
            self.refresh().await?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for IbmqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IbmqProvider")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
