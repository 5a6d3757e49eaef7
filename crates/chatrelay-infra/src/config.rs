//! Configuration loader for chatrelay.
//!
//! Builds a [`RelayConfig`] once at startup: built-in defaults, then an
//! optional `config.toml`, then environment variables. CLI flags are applied
//! by the binary on top of the result.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chatrelay_types::config::RelayConfig;

pub const ENV_API_KEY: &str = "LITELLM_API_KEY";
pub const ENV_BASE_URL: &str = "LITELLM_BASE_URL";
pub const ENV_MODEL: &str = "LITELLM_MODEL_NAME";
pub const ENV_LLM_TIMEOUT_SECS: &str = "CHATRELAY_LLM_TIMEOUT_SECS";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_HOST: &str = "CHATRELAY_HOST";
pub const ENV_PORT: &str = "CHATRELAY_PORT";
pub const ENV_WEB_DIR: &str = "CHATRELAY_WEB_DIR";

/// Load configuration from an optional TOML file.
///
/// - If no path is given, returns [`RelayConfig::default()`].
/// - If the file does not exist, logs at debug and returns the default.
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub async fn load_config(path: Option<&Path>) -> RelayConfig {
    let Some(config_path) = path else {
        return RelayConfig::default();
    };

    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", config_path.display());
            return RelayConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return RelayConfig::default();
        }
    };

    match toml::from_str::<RelayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RelayConfig::default()
        }
    }
}

/// Overlay environment variables onto `config`.
///
/// `lookup` resolves a variable name to its value; pass
/// `|name| std::env::var(name).ok()` for the process environment.
/// Numeric values that fail to parse are ignored with a warning.
pub fn apply_env_overrides(config: &mut RelayConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(value) = lookup(ENV_API_KEY) {
        config.llm.api_key = value;
    }
    if let Some(value) = lookup(ENV_BASE_URL) {
        config.llm.base_url = value;
    }
    if let Some(value) = lookup(ENV_MODEL) {
        config.llm.model = value;
    }
    if let Some(value) = parse_env(&lookup, ENV_LLM_TIMEOUT_SECS) {
        config.llm.request_timeout_secs = value;
    }
    if let Some(value) = lookup(ENV_DATABASE_URL) {
        config.database_url = value;
    }
    if let Some(value) = lookup(ENV_HOST) {
        config.server.host = value;
    }
    if let Some(value) = parse_env(&lookup, ENV_PORT) {
        config.server.port = value;
    }
    if let Some(value) = lookup(ENV_WEB_DIR) {
        config.server.web_dir = if value.is_empty() {
            None
        } else {
            Some(PathBuf::from(value))
        };
    }
}

fn parse_env<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {name}={raw:?}: not a valid number");
            None
        }
    }
}

/// Load the file (if any) and apply the process environment.
pub async fn resolve_config(path: Option<&Path>) -> RelayConfig {
    let mut config = load_config(path).await;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[tokio::test]
    async fn load_config_without_path_returns_default() {
        let config = load_config(None).await;
        assert_eq!(config.database_url, "sqlite://chatrelay.db?mode=rwc");
        assert_eq!(config.llm.model, "ollama/qwen3:0.6b");
    }

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(Some(&tmp.path().join("config.toml"))).await;
        assert_eq!(config.server.port, 8000);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
database_url = "sqlite:///var/lib/chatrelay/chat.db?mode=rwc"

[llm]
base_url = "http://litellm:4000/"
model = "gpt-4o-mini"
request_timeout_secs = 30

[server]
port = 9000
web_dir = "frontend/dist"
"#,
        )
        .await
        .unwrap();

        let config = load_config(Some(&config_path)).await;
        assert_eq!(config.database_url, "sqlite:///var/lib/chatrelay/chat.db?mode=rwc");
        assert_eq!(config.llm.base_url, "http://litellm:4000/");
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.request_timeout_secs, 30);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.web_dir, Some(PathBuf::from("frontend/dist")));
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(Some(&config_path)).await;
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn env_overrides_replace_values() {
        let mut config = RelayConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_API_KEY, "sk-env"),
                (ENV_BASE_URL, "http://gateway:8023/"),
                (ENV_MODEL, "ollama/llama3"),
                (ENV_LLM_TIMEOUT_SECS, "5"),
                (ENV_DATABASE_URL, "sqlite:///tmp/env.db?mode=rwc"),
                (ENV_HOST, "127.0.0.1"),
                (ENV_PORT, "8080"),
                (ENV_WEB_DIR, "/srv/www"),
            ]),
        );

        assert_eq!(config.llm.api_key, "sk-env");
        assert_eq!(config.llm.base_url, "http://gateway:8023/");
        assert_eq!(config.llm.model, "ollama/llama3");
        assert_eq!(config.llm.request_timeout_secs, 5);
        assert_eq!(config.database_url, "sqlite:///tmp/env.db?mode=rwc");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.web_dir, Some(PathBuf::from("/srv/www")));
    }

    #[test]
    fn env_overrides_absent_keep_values() {
        let mut config = RelayConfig::default();
        config.llm.model = "from-file".to_string();
        apply_env_overrides(&mut config, env(&[]));
        assert_eq!(config.llm.model, "from-file");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn env_overrides_ignore_bad_numbers() {
        let mut config = RelayConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[(ENV_PORT, "eighty"), (ENV_LLM_TIMEOUT_SECS, "-1")]),
        );
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.request_timeout_secs, 60);
    }

    #[test]
    fn env_empty_web_dir_clears_it() {
        let mut config = RelayConfig::default();
        config.server.web_dir = Some(PathBuf::from("dist"));
        apply_env_overrides(&mut config, env(&[(ENV_WEB_DIR, "")]));
        assert!(config.server.web_dir.is_none());
    }
}
