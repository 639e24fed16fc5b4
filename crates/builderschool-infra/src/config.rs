//! Configuration loader for Builder School.
//!
//! Reads `config.toml` (by default `{config_dir}/builder-school/config.toml`)
//! into [`AppConfig`]. A missing or malformed file falls back to the Groq
//! defaults.

use std::path::{Path, PathBuf};

use builderschool_types::config::AppConfig;

const APP_DIR: &str = "builder-school";
const CONFIG_FILE: &str = "config.toml";

/// Platform config location, e.g. `~/.config/builder-school/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load configuration from `path`.
///
/// - Missing file: [`AppConfig::default()`], logged at debug.
/// - Unreadable or unparsable file: the default, logged as a warning.
pub async fn load_app_config(path: &Path) -> AppConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => {
            tracing::debug!(
                provider = %config.provider_name,
                model = %config.model,
                "Loaded config from {}",
                path.display()
            );
            config
        }
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            AppConfig::default()
        }
    }
}

/// Load from `explicit` when given, otherwise from [`default_config_path`].
pub async fn resolve_app_config(explicit: Option<&Path>) -> AppConfig {
    match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_app_config(&path).await,
        None => {
            tracing::debug!("No config directory on this platform, using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(&tmp.path().join(CONFIG_FILE)).await;
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        tokio::fs::write(
            &path,
            r#"
model = "llama-3.1-8b-instant"

[server]
port = 9000
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(&path).await;
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.api_key_env, "GROQ_API_KEY");
    }

    #[tokio::test]
    async fn invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        assert_eq!(load_app_config(&path).await, AppConfig::default());
    }

    #[tokio::test]
    async fn explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        tokio::fs::write(&path, "provider_name = \"openai\"\n").await.unwrap();

        let config = resolve_app_config(Some(&path)).await;
        assert_eq!(config.provider_name, "openai");
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("builder-school/config.toml"));
        }
    }
}
