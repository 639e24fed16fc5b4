//! Key chain builder -- wires key sources in priority order.
//!
//! Default order: `[ExplicitKey, EnvKeySource(config.api_key_env)]`.

use secrecy::SecretString;

use super::KeySource;
use super::env::EnvKeySource;

/// A key handed over directly: `--api-key`, `BSCHOOL_API_KEY`, or typed
/// into the terminal wizard's password prompt.
pub struct ExplicitKey(Option<SecretString>);

impl ExplicitKey {
    pub fn new(key: Option<SecretString>) -> Self {
        Self(key)
    }
}

impl KeySource for ExplicitKey {
    fn label(&self) -> String {
        "explicit".to_string()
    }

    fn get(&self) -> Option<SecretString> {
        use secrecy::ExposeSecret;
        self.0
            .as_ref()
            .map(|key| key.expose_secret().trim())
            .filter(|key| !key.is_empty())
            .map(|key| SecretString::from(key.to_string()))
    }
}

/// Build the key resolution chain, first match wins.
pub fn build_key_chain(explicit: Option<SecretString>, env_var: &str) -> Vec<Box<dyn KeySource>> {
    vec![
        Box::new(ExplicitKey::new(explicit)),
        Box::new(EnvKeySource::new(env_var)),
    ]
}
