//! Application state for the web server.
//!
//! One wizard session lives behind a `tokio::sync::Mutex`. Handlers hold
//! the guard across the model call, so two actions on the session never
//! interleave.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::{Mutex, RwLock};

use builderschool_core::llm::client::CompletionClient;
use builderschool_core::wizard::WizardService;
use builderschool_infra::llm::build_provider;
use builderschool_infra::secret::resolve_api_key;
use builderschool_types::config::AppConfig;
use builderschool_types::error::WizardError;
use builderschool_types::session::WizardSession;

/// Builds the wizard service once a key is known.
pub type Connector = fn(&AppConfig, SecretString) -> WizardService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<WizardSession>>,
    /// `None` until an API key has been resolved.
    service: Arc<RwLock<Option<Arc<WizardService>>>>,
    connect: Connector,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service: Option<WizardService>, config: AppConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(WizardSession::new())),
            service: Arc::new(RwLock::new(service.map(Arc::new))),
            connect: wizard_service,
            config: Arc::new(config),
        }
    }

    /// Swap the function that turns a key into a service.
    #[cfg(test)]
    pub fn with_connector(mut self, connect: Connector) -> Self {
        self.connect = connect;
        self
    }

    /// Resolve the API key and wire the provider for `config`.
    ///
    /// A missing key is not fatal here: the server still starts, wizard
    /// actions answer with `CREDENTIAL_MISSING`, and the page can supply a
    /// key through [`AppState::set_api_key`].
    pub fn init(config: AppConfig, explicit_key: Option<SecretString>) -> Self {
        let service = match resolve_api_key(explicit_key, &config.api_key_env) {
            Ok(key) => Some(wizard_service(&config, key)),
            Err(err) => {
                tracing::warn!("{err}");
                None
            }
        };
        Self::new(service, config)
    }

    /// The wizard service, or `CredentialMissing` when no key was found.
    pub async fn service(&self) -> Result<Arc<WizardService>, WizardError> {
        self.service
            .read()
            .await
            .clone()
            .ok_or_else(|| WizardError::CredentialMissing {
                env_var: self.config.api_key_env.clone(),
            })
    }

    /// Replace the service with one built on `key`. A blank key falls back
    /// to the environment variable; when that is empty too the current
    /// service is left alone.
    pub async fn set_api_key(&self, key: SecretString) -> Result<(), WizardError> {
        let key = resolve_api_key(Some(key), &self.config.api_key_env)?;
        let service = (self.connect)(&self.config, key);
        *self.service.write().await = Some(Arc::new(service));
        tracing::info!(provider = %self.config.provider_name, "API key updated");
        Ok(())
    }

    pub async fn has_credentials(&self) -> bool {
        self.service.read().await.is_some()
    }
}

/// Build the wizard service on top of the configured provider.
pub fn wizard_service(config: &AppConfig, api_key: SecretString) -> WizardService {
    let provider = build_provider(config, api_key);
    WizardService::new(CompletionClient::new(provider, config.model.clone()))
}
