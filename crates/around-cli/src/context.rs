//! Wiring of configuration, session state and adapters for a command

use crate::cli::GlobalArgs;
use crate::errors;
use anyhow::{Context, Result};
use around_core::config::{CliConfigOverrides, LayeredConfig};
use around_core::models::{AuthCredential, GeoPosition, Topic};
use around_core::ports::GeolocationProbe;
use around_discovery::{DiscoveryCoordinator, StaticProbe, UnsupportedProbe};
use around_http::{HttpPostPublisher, HttpQueryClient, IpGeolocationProbe};
use around_store::FileStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Directory holding the default config and state files
const AROUND_DIR: &str = ".around";

pub struct AppContext {
    pub config: LayeredConfig,
    pub config_path: Option<PathBuf>,
    pub store: Arc<FileStore>,
    token: Option<String>,
}

impl AppContext {
    /// Load layered configuration and open the session state file
    ///
    /// An explicit `--config` file must exist; the default one is optional.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let (config_path, required) = match &global.config {
            Some(path) => (path.clone(), true),
            None => (default_path("config.toml"), false),
        };

        let mut config = LayeredConfig::with_defaults();
        let config_path = if required || config_path.exists() {
            config = config
                .load_from_file(&config_path)
                .with_context(|| format!("Failed to load {}", config_path.display()))?;
            Some(config_path)
        } else {
            None
        };

        let mut config = config.load_from_env();
        config.update_from_cli(CliConfigOverrides {
            api_root: global.api_root.clone(),
            default_radius_km: global.default_radius,
            geolocation_url: global.geolocation_url.clone(),
        });

        let state_path = global.state.clone().unwrap_or_else(|| default_path("state.json"));
        tracing::debug!(state = %state_path.display(), "Using session state file");

        Ok(Self {
            config,
            config_path,
            store: Arc::new(FileStore::new(state_path)),
            token: global.token.clone(),
        })
    }

    pub fn state_path(&self) -> &Path {
        self.store.path()
    }

    /// Token from `--token`, else the stored one
    pub async fn credential(&self) -> Result<AuthCredential> {
        if let Some(token) = &self.token {
            return Ok(AuthCredential::new(token.clone()));
        }

        match self.store.load_credential().await? {
            Some(credential) => Ok(credential),
            None => Err(errors::missing_token().into()),
        }
    }

    /// Probe for `start`: an explicit fix, the configured service, or none
    pub fn probe(&self, at: Option<GeoPosition>) -> Arc<dyn GeolocationProbe> {
        if let Some(position) = at {
            return Arc::new(StaticProbe::at(position));
        }

        match &self.config.geolocation_url.value {
            Some(url) => Arc::new(IpGeolocationProbe::new(url.clone())),
            None => Arc::new(UnsupportedProbe),
        }
    }

    pub fn query_client(&self) -> Arc<HttpQueryClient> {
        Arc::new(HttpQueryClient::new(
            self.config.api_root.value.clone(),
            self.config.auth_prefix.value.clone(),
        ))
    }

    pub fn publisher(&self) -> Arc<HttpPostPublisher> {
        Arc::new(HttpPostPublisher::new(
            self.config.api_root.value.clone(),
            self.config.auth_prefix.value.clone(),
        ))
    }

    /// Discovery coordinator over the session state file and the backend
    pub async fn discovery(
        &self,
        probe: Arc<dyn GeolocationProbe>,
        topic: Topic,
    ) -> Result<Arc<DiscoveryCoordinator>> {
        let credential = self.credential().await?;

        let coordinator =
            DiscoveryCoordinator::new(self.store.clone(), probe, self.query_client(), credential)
                .with_topic(topic)
                .with_geo_options(self.config.geo_options())
                .with_default_radius(self.config.default_radius_km.value);

        Ok(Arc::new(coordinator))
    }
}

fn default_path(file: &str) -> PathBuf {
    Path::new(AROUND_DIR).join(file)
}
