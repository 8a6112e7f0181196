//! Configuration for the workspace synchronisation client.
//!
//! This module handles finding and loading TOML configuration files from
//! various locations (explicit path, local directory, system directory) and
//! applying `STRUCTURIZR_*` environment overrides on top.
//!
//! # Example
//!
//! ```
//! # use structurizr::config::{ArchiveLocation, ClientConfig};
//! let config: ClientConfig = toml::from_str(
//!     r#"
//!     workspace_id = 42
//!     user = "alice"
//!     workspace_archive_location = "off"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.workspace_id(), Some(42));
//! assert_eq!(config.workspace_archive_location(), &ArchiveLocation::Disabled);
//! assert!(config.merge_from_remote());
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::StructurizrError;

/// Environment variable overriding [`ClientConfig::url`].
pub const ENV_URL: &str = "STRUCTURIZR_URL";
/// Environment variable overriding [`ClientConfig::workspace_id`].
pub const ENV_WORKSPACE_ID: &str = "STRUCTURIZR_WORKSPACE_ID";
/// Environment variable overriding [`ClientConfig::user`].
pub const ENV_USER: &str = "STRUCTURIZR_USER";
/// Environment variable overriding [`ClientConfig::agent`].
pub const ENV_AGENT: &str = "STRUCTURIZR_AGENT";
/// Environment variable overriding [`ClientConfig::workspace_archive_location`].
pub const ENV_WORKSPACE_ARCHIVE_LOCATION: &str = "STRUCTURIZR_WORKSPACE_ARCHIVE_LOCATION";

const DEFAULT_URL: &str = "https://api.structurizr.com";
const DEFAULT_AGENT: &str = concat!("structurizr-rs/", env!("CARGO_PKG_VERSION"));

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Where fetched workspaces are archived before they are parsed.
///
/// Deserialised from a string: an empty value or `"off"` disables archiving,
/// anything else names the archive directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ArchiveLocation {
    /// Archive into this directory, creating it when needed.
    Directory(PathBuf),
    /// Never write archive files.
    Disabled,
}

impl ArchiveLocation {
    /// Returns the archive directory, or `None` when archiving is disabled.
    pub fn directory(&self) -> Option<&Path> {
        match self {
            Self::Directory(path) => Some(path.as_path()),
            Self::Disabled => None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Directory(_))
    }
}

impl Default for ArchiveLocation {
    fn default() -> Self {
        Self::Directory(PathBuf::from("."))
    }
}

impl From<String> for ArchiveLocation {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for ArchiveLocation {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("off") {
            Self::Disabled
        } else {
            Self::Directory(PathBuf::from(value))
        }
    }
}

/// Settings of a [`WorkspaceClient`](crate::WorkspaceClient).
///
/// Every field is optional in the TOML file; absent fields take their
/// defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the Structurizr API.
    url: String,

    /// The workspace the client reads and writes.
    workspace_id: Option<i64>,

    /// Stamped as the last modifying user on upload.
    user: Option<String>,

    /// Stamped as the last modifying agent on upload.
    agent: String,

    workspace_archive_location: ArchiveLocation,

    /// Copy layout information from the remote workspace before uploading.
    merge_from_remote: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_owned(),
            workspace_id: None,
            user: None,
            agent: DEFAULT_AGENT.to_owned(),
            workspace_archive_location: ArchiveLocation::default(),
            merge_from_remote: true,
        }
    }
}

impl ClientConfig {
    /// Creates a default configuration for the given workspace.
    pub fn new(workspace_id: i64) -> Self {
        Self {
            workspace_id: Some(workspace_id),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    pub fn with_archive_location(mut self, location: impl Into<ArchiveLocation>) -> Self {
        self.workspace_archive_location = location.into();
        self
    }

    pub fn with_merge_from_remote(mut self, merge: bool) -> Self {
        self.merge_from_remote = merge;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn workspace_id(&self) -> Option<i64> {
        self.workspace_id
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn workspace_archive_location(&self) -> &ArchiveLocation {
        &self.workspace_archive_location
    }

    pub fn merge_from_remote(&self) -> bool {
        self.merge_from_remote
    }

    /// Applies `STRUCTURIZR_*` overrides read through `lookup`.
    ///
    /// `lookup` returns the value of an environment variable, or `None` when
    /// it is unset. [`load_config`] passes the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the URL override is not an
    /// HTTP(S) URL or the workspace ID override is not an integer.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(ENV_URL) {
            let url = value.trim().trim_end_matches('/');
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::Validation(format!(
                    "{ENV_URL} must be an HTTP(S) URL, got `{value}`"
                )));
            }
            debug!(url = url; "Service URL overridden from environment");
            self.url = url.to_owned();
        }
        if let Some(value) = lookup(ENV_WORKSPACE_ID) {
            let id = value.trim().parse::<i64>().map_err(|_| {
                ConfigError::Validation(format!(
                    "{ENV_WORKSPACE_ID} must be an integer, got `{value}`"
                ))
            })?;
            debug!(workspace_id = id; "Workspace ID overridden from environment");
            self.workspace_id = Some(id);
        }
        if let Some(user) = lookup(ENV_USER) {
            self.user = Some(user);
        }
        if let Some(agent) = lookup(ENV_AGENT) {
            self.agent = agent;
        }
        if let Some(location) = lookup(ENV_WORKSPACE_ARCHIVE_LOCATION) {
            self.workspace_archive_location = ArchiveLocation::from(location);
            debug!(
                location:? = self.workspace_archive_location;
                "Archive location overridden from environment"
            );
        }
        Ok(self)
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (structurizr/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// Environment overrides are applied to whichever configuration was found.
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
/// - An environment override is invalid
pub fn load_config(
    explicit_path: Option<impl AsRef<Path>>,
) -> Result<ClientConfig, StructurizrError> {
    let config = find_config(explicit_path)?;
    Ok(config.with_env_overrides(|key| std::env::var(key).ok())?)
}

fn find_config(explicit_path: Option<impl AsRef<Path>>) -> Result<ClientConfig, StructurizrError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("structurizr/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "structurizr", "structurizr") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(ClientConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<ClientConfig, StructurizrError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: ClientConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.url(), "https://api.structurizr.com");
        assert_eq!(config.workspace_id(), None);
        assert_eq!(config.user(), None);
        assert!(config.agent().starts_with("structurizr-rs/"));
        assert_eq!(
            config.workspace_archive_location(),
            &ArchiveLocation::Directory(PathBuf::from("."))
        );
        assert!(config.merge_from_remote());
    }

    #[test]
    fn test_archive_location_from_str() {
        assert_eq!(ArchiveLocation::from(""), ArchiveLocation::Disabled);
        assert_eq!(ArchiveLocation::from("  "), ArchiveLocation::Disabled);
        assert_eq!(ArchiveLocation::from("off"), ArchiveLocation::Disabled);
        assert_eq!(ArchiveLocation::from("OFF"), ArchiveLocation::Disabled);
        assert_eq!(
            ArchiveLocation::from("archive"),
            ArchiveLocation::Directory(PathBuf::from("archive"))
        );
        assert!(!ArchiveLocation::Disabled.is_enabled());
        assert_eq!(ArchiveLocation::Disabled.directory(), None);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
            url = "https://structurizr.example.com/api"
            workspace_archive_location = "/var/archive"
            merge_from_remote = false
            "#,
        )
        .unwrap();

        assert_eq!(config.url(), "https://structurizr.example.com/api");
        assert_eq!(
            config.workspace_archive_location().directory(),
            Some(Path::new("/var/archive"))
        );
        assert!(!config.merge_from_remote());
        assert!(config.agent().starts_with("structurizr-rs/"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::new(1)
            .with_user("alice")
            .with_env_overrides(lookup(&[
                (ENV_WORKSPACE_ID, "42"),
                (ENV_AGENT, "ci"),
                (ENV_WORKSPACE_ARCHIVE_LOCATION, "off"),
            ]))
            .unwrap();

        assert_eq!(config.workspace_id(), Some(42));
        assert_eq!(config.user(), Some("alice"));
        assert_eq!(config.agent(), "ci");
        assert_eq!(config.workspace_archive_location(), &ArchiveLocation::Disabled);
    }

    #[test]
    fn test_env_overrides_url() {
        let config = ClientConfig::new(1)
            .with_env_overrides(lookup(&[(ENV_URL, "https://structurizr.example.com/api/")]))
            .unwrap();
        assert_eq!(config.url(), "https://structurizr.example.com/api");

        let err = ClientConfig::new(1)
            .with_env_overrides(lookup(&[(ENV_URL, "structurizr.example.com")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: STRUCTURIZR_URL must be an HTTP(S) URL, got `structurizr.example.com`"
        );
    }

    #[test]
    fn test_env_override_rejects_invalid_workspace_id() {
        let err = ClientConfig::default()
            .with_env_overrides(lookup(&[(ENV_WORKSPACE_ID, "forty-two")]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: STRUCTURIZR_WORKSPACE_ID must be an integer, got `forty-two`"
        );
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(
            err,
            StructurizrError::Config(ConfigError::MissingFile(_))
        ));
    }
}
