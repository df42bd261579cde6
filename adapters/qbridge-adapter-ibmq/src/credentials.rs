//! IBM Q account credentials.
//!
//! Credentials carry the API token, the API base URL and, for accounts
//! that belong to a network, the hub/group/project triple that scopes job
//! submission and listing.

use std::fmt;

use crate::error::{IbmqError, IbmqResult};

/// Default IBM Q Experience API endpoint.
pub const DEFAULT_URL: &str = "https://quantumexperience.ng.bluemix.net/api";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "QE_TOKEN";
/// Environment variable overriding the API URL.
pub const URL_ENV: &str = "QE_URL";
/// Environment variable holding the hub.
pub const HUB_ENV: &str = "QE_HUB";
/// Environment variable holding the group.
pub const GROUP_ENV: &str = "QE_GROUP";
/// Environment variable holding the project.
pub const PROJECT_ENV: &str = "QE_PROJECT";

/// Account credentials for the IBM Q API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API token.
    pub token: String,
    /// API base URL.
    pub url: String,
    /// Hub the account belongs to.
    pub hub: Option<String>,
    /// Group within the hub.
    pub group: Option<String>,
    /// Project within the group.
    pub project: Option<String>,
}

impl Credentials {
    /// Create credentials for the public (non-network) API.
    pub fn new(token: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            url: url.into(),
            hub: None,
            group: None,
            project: None,
        }
    }

    /// Scope the credentials to a hub/group/project.
    pub fn with_instance(
        mut self,
        hub: impl Into<String>,
        group: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        self.hub = Some(hub.into());
        self.group = Some(group.into());
        self.project = Some(project.into());
        self
    }

    /// Load credentials from the `QE_*` environment variables.
    pub fn from_env() -> IbmqResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    ///
    /// Empty values count as unset. Hub, group and project must be given
    /// together or not at all.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> IbmqResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get(TOKEN_ENV).ok_or(IbmqError::MissingToken)?;
        let url = get(URL_ENV).unwrap_or_else(|| DEFAULT_URL.to_string());
        let credentials = Self::new(token, url);

        match (get(HUB_ENV), get(GROUP_ENV), get(PROJECT_ENV)) {
            (Some(hub), Some(group), Some(project)) => {
                Ok(credentials.with_instance(hub, group, project))
            }
            (None, None, None) => Ok(credentials),
            _ => Err(IbmqError::InvalidParameter(format!(
                "{HUB_ENV}, {GROUP_ENV} and {PROJECT_ENV} must be set together"
            ))),
        }
    }

    /// Whether the credentials are scoped to a hub/group/project.
    pub fn has_instance(&self) -> bool {
        self.hub.is_some() && self.group.is_some() && self.project.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("url", &self.url)
            .field("hub", &self.hub)
            .field("group", &self.group)
            .field("project", &self.project)
            .finish()
    }
}
