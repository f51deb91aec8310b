//! Theme tokens for generated pages
//!
//! A theme maps color token names to concrete values and is emitted as CSS
//! custom properties in the document head. Themes load from TOML; a
//! blueprint's design-system style tokens are layered on top.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::blueprint::DesignSystem;
use crate::renderer::HtmlConfig;

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse theme TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Named color tokens plus an optional font stack
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Token name -> CSS color, ordered for stable output
    pub colors: BTreeMap<String, String>,
    pub font_family: Option<String>,
}

#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
    fonts: Option<TomlFonts>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlFonts {
    family: Option<String>,
}

/// Blue primary, purple secondary, amber accent over neutral grays
const DEFAULT_THEME: &str = r##"
[metadata]
name = "default"

[colors]
primary = "#1D4ED8"
secondary = "#9333EA"
accent = "#F59E0B"
neutral = "#404040"
neutral-light = "#F5F5F5"
neutral-dark = "#171717"
warning = "#B45309"

[fonts]
family = "system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif"
"##;

impl Theme {
    /// Load theme from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load theme from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        Ok(Theme {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
            font_family: parsed.fonts.and_then(|f| f.family),
        })
    }

    /// Resolve a color token to a concrete value
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a color token, falling back to the default theme
    ///
    /// Unknown tokens fall back to the neutral text color.
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        if let Some(color) = default_theme().resolve(token) {
            return color.to_string();
        }

        "#404040".to_string()
    }

    /// Layer a blueprint's design-system tokens over this theme
    ///
    /// `primary_color` becomes the `primary` token and underscores become
    /// hyphens. Non-string token values are ignored.
    pub fn with_design_system(mut self, design: &DesignSystem) -> Self {
        for (key, value) in &design.style_tokens {
            let Value::String(color) = value else {
                debug!("ignoring non-string style token '{}'", key);
                continue;
            };
            let token = key.strip_suffix("_color").unwrap_or(key).replace('_', "-");
            self.colors.insert(token, color.clone());
        }
        if let Some(family) = &design.font_family {
            self.font_family = Some(family.clone());
        }
        self
    }

    /// Stylesheet with the tokens as custom properties and minimal base rules
    pub fn css(&self, config: &HtmlConfig) -> String {
        let var = |token: &str| format!("--{}", config.class(token));
        let class = |name: &str| format!(".{}", config.class(name));

        let mut css = String::from(":root {\n");
        for (token, value) in &self.colors {
            if !is_safe_css_value(token) || !is_safe_css_value(value) {
                warn!("skipping theme token '{}' with unsafe value", token);
                continue;
            }
            css.push_str(&format!("  {}: {};\n", var(token), value));
        }
        if let Some(family) = self.font_family.as_deref().filter(|f| is_safe_css_value(f)) {
            css.push_str(&format!("  {}: {};\n", var("font-family"), family));
        }
        css.push_str("}\n");

        let color = |token: &str| {
            let mut fallback = self.resolve_or_default(token);
            if !is_safe_css_value(&fallback) {
                fallback = default_theme().resolve_or_default(token);
            }
            format!("var({}, {})", var(token), fallback)
        };
        css.push_str(&format!(
            "body {{ margin: 0; font-family: var({}, sans-serif); color: {}; background: {}; }}\n",
            var("font-family"),
            color("neutral-dark"),
            color("neutral-light"),
        ));
        css.push_str(&format!(
            "{} {{ display: inline-block; padding: 0.5rem 1rem; border-radius: 0.25rem; text-decoration: none; }}\n",
            class("btn")
        ));
        css.push_str(&format!(
            "{} {{ background: {}; color: #fff; }}\n",
            class("btn-primary"),
            color("primary")
        ));
        css.push_str(&format!(
            "{} {{ background: {}; color: #fff; }}\n",
            class("btn-secondary"),
            color("secondary")
        ));
        css.push_str(&format!(
            "{}, {} {{ border: 2px dashed {}; padding: 1rem; }}\n",
            class("placeholder"),
            class("invalid-props"),
            color("warning")
        ));
        css
    }
}

/// Whether a value can sit inside a style element without escaping it
fn is_safe_css_value(value: &str) -> bool {
    !value.is_empty() && !value.contains(['<', '>', '{', '}', ';'])
}

/// The embedded default theme, parsed on first use
fn default_theme() -> &'static Theme {
    static DEFAULT: OnceLock<Theme> = OnceLock::new();
    DEFAULT.get_or_init(|| Theme::from_str(DEFAULT_THEME).expect("Default theme should be valid TOML"))
}

impl Default for Theme {
    fn default() -> Self {
        default_theme().clone()
    }
}
