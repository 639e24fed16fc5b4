//! API key resolution.
//!
//! Sources are consulted in order and the first non-blank key wins. The key
//! stays wrapped in [`SecretString`] until the provider client is built.

pub mod chain;
pub mod env;

use secrecy::SecretString;

use builderschool_types::error::WizardError;

/// Somewhere an API key might come from.
pub trait KeySource: Send + Sync {
    /// Where the key came from, for logs. Never the key itself.
    fn label(&self) -> String;

    fn get(&self) -> Option<SecretString>;
}

/// Resolve the key from `explicit`, then the `env_var` environment variable.
///
/// Fails with `CredentialMissing` naming `env_var` when neither has a value.
pub fn resolve_api_key(
    explicit: Option<SecretString>,
    env_var: &str,
) -> Result<SecretString, WizardError> {
    for source in chain::build_key_chain(explicit, env_var) {
        if let Some(key) = source.get() {
            tracing::debug!(source = %source.label(), "resolved API key");
            return Ok(key);
        }
    }
    Err(WizardError::CredentialMissing {
        env_var: env_var.to_string(),
    })
}
