//! Site configuration loaded from `site.toml`
//!
//! # Example
//! ```toml
//! [render]
//! pretty = true
//! class_prefix = "sb-"
//! theme = "themes/harbor.toml"
//!
//! [serve]
//! port = 8080
//!
//! [build]
//! output = "dist"
//! clean = true
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::renderer::HtmlConfig;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

mod defaults {
    pub fn r#true() -> bool {
        true
    }

    pub mod render {
        pub fn class_prefix() -> String {
            "sb-".into()
        }

        pub fn lang() -> String {
            "en".into()
        }
    }

    pub mod serve {
        pub fn interface() -> String {
            "127.0.0.1".into()
        }

        pub fn port() -> u16 {
            5277
        }
    }

    pub mod build {
        use std::path::PathBuf;

        pub fn output() -> PathBuf {
            "public".into()
        }
    }
}

/// Root of `site.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default)]
    pub render: RenderSection,
    #[serde(default)]
    pub serve: ServeConfig,
    #[serde(default)]
    pub build: BuildSection,
}

/// `[render]` - HTML output settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSection {
    #[serde(default = "defaults::r#true")]
    pub pretty: bool,
    /// Empty string disables prefixing
    #[serde(default = "defaults::render::class_prefix")]
    pub class_prefix: String,
    #[serde(default = "defaults::render::lang")]
    pub lang: String,
    #[serde(default)]
    pub debug: bool,
    /// Theme TOML, relative to the config file
    #[serde(default)]
    pub theme: Option<PathBuf>,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            pretty: true,
            class_prefix: defaults::render::class_prefix(),
            lang: defaults::render::lang(),
            debug: false,
            theme: None,
        }
    }
}

impl RenderSection {
    /// HTML writer settings for full documents
    pub fn html_config(&self) -> HtmlConfig {
        let config = HtmlConfig::new()
            .with_pretty_print(self.pretty)
            .with_lang(self.lang.clone())
            .with_debug(self.debug);
        if self.class_prefix.is_empty() {
            config.without_class_prefix()
        } else {
            config.with_class_prefix(self.class_prefix.clone())
        }
    }
}

/// `[serve]` - development server settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces
    #[serde(default = "defaults::serve::interface")]
    pub interface: String,

    /// HTTP port number (default: 5277).
    #[serde(default = "defaults::serve::port")]
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: defaults::serve::interface(),
            port: defaults::serve::port(),
        }
    }
}

/// `[build]` - static export settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    #[serde(default = "defaults::build::output")]
    pub output: PathBuf,
    /// Remove the output directory before writing
    #[serde(default)]
    pub clean: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            output: defaults::build::output(),
            clean: false,
        }
    }
}

impl SiteConfig {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file; relative paths inside it resolve against its directory
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;

        if let Some(root) = path.parent() {
            config.render.theme = config.render.theme.map(|theme| root.join(theme));
            if config.build.output.is_relative() {
                config.build.output = root.join(&config.build.output);
            }
        }
        Ok(config)
    }

    /// Load `path` if given, otherwise `site.toml` when present, otherwise defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => {
                let implicit = Path::new("site.toml");
                if implicit.is_file() {
                    debug!("using config {}", implicit.display());
                    Self::from_path(implicit)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serve.port == 0 {
            return Err(ConfigError::Validation(
                "[serve] port must be greater than 0".to_string(),
            ));
        }
        if self.render.lang.trim().is_empty() {
            return Err(ConfigError::Validation(
                "[render] lang must not be empty".to_string(),
            ));
        }
        if self.build.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "[build] output must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
