//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `PAYLINK_API_BASE_URL` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Every loaded configuration is validated before it is returned.
//!
//! ## Environment Variables
//! - `PAYLINK_API_BASE_URL`: API base URL (required for env loading)
//! - `PAYLINK_API_TIMEOUT_SECS`: Whole-request timeout in seconds
//! - `PAYLINK_USER_AGENT`: User-Agent header value
//! - `PAYLINK_STORAGE_BACKEND`: `memory`, `file` or `keychain`
//! - `PAYLINK_STORAGE_PATH`: Session file path for the file backend
//! - `PAYLINK_TOKEN_KEY`: Storage key holding the credential
//! - `PAYLINK_KEYCHAIN_SERVICE`: Service name for the keychain backend
//!
//! ## File Locations
//! The loader probes the following names in the current working directory,
//! then its parent, then its grandparent, then next to the executable:
//! `paylink.json`, `paylink.toml`, `config.json`, `config.toml`.

use std::path::{Path, PathBuf};

use paylink_domain::{ClientConfig, PayLinkError, Result, StorageBackend};

const CONFIG_FILE_NAMES: [&str; 4] = ["paylink.json", "paylink.toml", "config.json", "config.toml"];

/// How many directory levels above the working directory are probed.
const PARENT_LEVELS: usize = 2;

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If that fails, falls
/// back to loading from a config file.
///
/// # Errors
/// Returns `PayLinkError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The loaded configuration does not validate
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `PAYLINK_API_BASE_URL` is required; everything else falls back to
/// the defaults of [`ClientConfig`].
///
/// # Errors
/// Returns `PayLinkError::Config` if the base URL is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig::default();
    config.api.base_url = env_var("PAYLINK_API_BASE_URL")?;

    if let Some(raw) = env_opt("PAYLINK_API_TIMEOUT_SECS") {
        let secs = raw
            .parse::<u64>()
            .map_err(|e| PayLinkError::Config(format!("Invalid timeout '{raw}': {e}")))?;
        config.api.timeout_secs = Some(secs);
    }
    config.api.user_agent = env_opt("PAYLINK_USER_AGENT");

    if let Some(raw) = env_opt("PAYLINK_STORAGE_BACKEND") {
        config.storage.backend = raw.parse::<StorageBackend>().map_err(PayLinkError::Config)?;
    }
    if let Some(path) = env_opt("PAYLINK_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    }
    if let Some(key) = env_opt("PAYLINK_TOKEN_KEY") {
        config.storage.key = key;
    }
    if let Some(service) = env_opt("PAYLINK_KEYCHAIN_SERVICE") {
        config.storage.keychain_service = service;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `PayLinkError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The parsed configuration does not validate
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PayLinkError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PayLinkError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PayLinkError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `PayLinkError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PayLinkError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PayLinkError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PayLinkError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend(cwd.ancestors().take(PARENT_LEVELS + 1).map(Path::to_path_buf));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Get required environment variable
///
/// # Errors
/// Returns `PayLinkError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        PayLinkError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use paylink_domain::Encoding;
    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_KEYS: [&str; 7] = [
        "PAYLINK_API_BASE_URL",
        "PAYLINK_API_TIMEOUT_SECS",
        "PAYLINK_USER_AGENT",
        "PAYLINK_STORAGE_BACKEND",
        "PAYLINK_STORAGE_PATH",
        "PAYLINK_TOKEN_KEY",
        "PAYLINK_KEYCHAIN_SERVICE",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("PAYLINK_API_BASE_URL", "https://pay.example.com");
        std::env::set_var("PAYLINK_API_TIMEOUT_SECS", "15");
        std::env::set_var("PAYLINK_USER_AGENT", "paylink-cli/1.0");
        std::env::set_var("PAYLINK_STORAGE_BACKEND", "Memory");
        std::env::set_var("PAYLINK_STORAGE_PATH", "/tmp/session.json");
        std::env::set_var("PAYLINK_TOKEN_KEY", "sessionToken");
        std::env::set_var("PAYLINK_KEYCHAIN_SERVICE", "PayLink.test");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://pay.example.com");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.api.user_agent.as_deref(), Some("paylink-cli/1.0"));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/session.json"));
        assert_eq!(config.storage.key, "sessionToken");
        assert_eq!(config.storage.keychain_service, "PayLink.test");

        clear_env();
    }

    #[test]
    fn test_load_from_env_uses_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("PAYLINK_API_BASE_URL", "http://localhost:8000");
        let config = load_from_env().unwrap();

        assert_eq!(config.api.timeout_secs, None);
        assert_eq!(config.storage.key, "authToken");
        assert_eq!(config.storage.backend, StorageBackend::File);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, PayLinkError::Config(_)), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("PAYLINK_API_BASE_URL", "http://localhost:8000");
        std::env::set_var("PAYLINK_API_TIMEOUT_SECS", "soon");
        assert!(matches!(load_from_env(), Err(PayLinkError::Config(_))));

        std::env::remove_var("PAYLINK_API_TIMEOUT_SECS");
        std::env::set_var("PAYLINK_STORAGE_BACKEND", "cookie-jar");
        assert!(matches!(load_from_env(), Err(PayLinkError::Config(_))));

        std::env::remove_var("PAYLINK_STORAGE_BACKEND");
        std::env::set_var("PAYLINK_API_BASE_URL", "localhost");
        assert!(matches!(load_from_env(), Err(PayLinkError::Config(_))));

        clear_env();
    }

    #[test]
    fn test_load_from_file_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paylink.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://pay.example.com"
timeout_secs = 20

[endpoints]
login = "/token"
login_encoding = "form-urlencoded"

[storage]
backend = "memory"
"#,
        )
        .unwrap();

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.api.base_url, "https://pay.example.com");
        assert_eq!(config.api.timeout_secs, Some(20));
        assert_eq!(config.endpoints.login, "/token");
        assert_eq!(config.endpoints.login_encoding, Encoding::FormUrlencoded);
        assert_eq!(config.endpoints.send, "/send");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/paylink.json")));
        assert!(matches!(result, Err(PayLinkError::Config(_))));
    }

    #[test]
    fn test_load_from_file_rejects_invalid_endpoint() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("paylink.json");
        std::fs::write(&path, r#"{"endpoints": {"balance": "balance"}}"#).unwrap();

        let err = load_from_file(Some(path)).unwrap_err();
        assert!(err.to_string().contains("balance"));
    }

    #[test]
    fn test_parse_config_json() {
        let json_content = r#"{"api": {"base_url": "http://10.0.0.5:8000"}}"#;
        let config = parse_config(json_content, Path::new("paylink.json")).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:8000");
    }

    #[test]
    fn test_parse_config_invalid_json() {
        let result = parse_config(r#"{ "api": "#, Path::new("paylink.json"));
        assert!(matches!(result, Err(PayLinkError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("api: {}", Path::new("paylink.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
