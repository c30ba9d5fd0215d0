//! Configuration for a posting run.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [platform] [login] [post] [render]
//! ├── error          # ConfigError
//! ├── util           # config file lookup, path resolution
//! └── mod.rs         # Config (this file)
//! ```
//!
//! # Sources
//!
//! Built once at startup, later sources win:
//!
//! 1. defaults
//! 2. `notepost.toml` (explicit `--config`, or searched upward from cwd)
//! 3. environment (`LOGIN_EMAIL`, `LOGIN_PASSWORD`) and CLI flags

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{LoginConfig, PlatformConfig, PostConfig, RenderConfig};

use util::{find_config_file, resolve_path};

use crate::article::Renderer;
use crate::cli::Cli;
use crate::log;
use crate::session::{Credentials, PLACEHOLDER_EMAIL, PLACEHOLDER_PASSWORD};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "notepost.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing notepost.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Config file the settings came from, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Login credentials, from env or CLI only (internal use only)
    #[serde(skip)]
    pub credentials: Credentials,

    /// Render and print without posting (internal use only)
    #[serde(skip)]
    pub dry_run: bool,

    pub platform: PlatformConfig,
    pub login: LoginConfig,
    pub post: PostConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            credentials: Credentials::default(),
            dry_run: false,
            platform: PlatformConfig::default(),
            login: LoginConfig::default(),
            post: PostConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// Validation is separate (see [`Config::validate`]) so a dry run can skip
    /// the credential check.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = match &cli.config {
            Some(explicit) => Some(explicit.clone()),
            None => find_config_file(Path::new(CONFIG_FILE)),
        };

        let mut config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let fields = ignored.join(", ");
            log!("warning"; "ignoring unknown fields in {}: {}", path.display(), fields);
        }

        let root = path.parent().unwrap_or(Path::new("."));
        config.post.file = resolve_path(&config.post.file, root);
        config.login.screenshot = resolve_path(&config.login.screenshot, root);
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Apply environment/CLI overrides on top of file settings.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(file) = &cli.file {
            self.post.file = resolve_path(file, Path::new(""));
        }
        self.post.publish |= cli.publish;
        self.render.fallback |= cli.fallback;
        if let Some(webdriver) = &cli.webdriver {
            self.login.webdriver = webdriver.clone();
        }
        if cli.no_spawn_driver {
            self.login.spawn_driver = false;
        }
        if cli.show_browser {
            self.login.headless = false;
        }
        self.dry_run = cli.dry_run;

        self.credentials = Credentials::new(
            cli.email.as_deref().unwrap_or(PLACEHOLDER_EMAIL),
            cli.password.as_deref().unwrap_or(PLACEHOLDER_PASSWORD),
        );
    }

    /// Check everything a posting run needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_credentials()?;
        self.platform.validate()?;
        self.login.validate()
    }

    /// Reject unset or placeholder credentials.
    pub fn validate_credentials(&self) -> Result<(), ConfigError> {
        let email = self.credentials.email.trim();
        let password = self.credentials.password.expose_secret();
        let unset = |value: &str, placeholder: &str| value.is_empty() || value == placeholder;

        if unset(email, PLACEHOLDER_EMAIL) || unset(password, PLACEHOLDER_PASSWORD) {
            return Err(ConfigError::Credentials);
        }
        Ok(())
    }

    pub fn renderer(&self) -> Renderer {
        self.render.renderer()
    }
}

// ============================================================================
// tests
// ============================================================================
