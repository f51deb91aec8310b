//! Site Blueprint - render marketing sites from declarative JSON blueprints
//!
//! This library loads a blueprint (pages made of sections made of named
//! components), resolves a requested path to a page, dispatches each
//! component name through a static registry and renders the result as HTML.
//! Unknown component names become visible placeholders; unknown paths render
//! a 404 view.
//!
//! # Example
//!
//! ```rust
//! use site_blueprint::render;
//!
//! let html = render(r#"{
//!     "client_name": "Acme Freight",
//!     "pages": [{ "page_name": "Home", "page_path": "/", "sections": [] }]
//! }"#, "/").unwrap();
//! assert!(html.contains("<title>Home | Acme Freight</title>"));
//! ```

pub mod blueprint;
pub mod build;
pub mod components;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod lint;
pub mod renderer;
pub mod serve;
pub mod theme;

use std::path::Path;

use thiserror::Error;

pub use blueprint::{parse, Blueprint, BlueprintComponent, Page, Section};
pub use dispatch::{resolve, Component, ComponentRegistry, RenderNode, Resolution};
pub use error::BlueprintError;
pub use lint::{LintCategory, LintWarning};
pub use renderer::{render_resolution, HtmlConfig, PageStatus, RenderedPage};
pub use theme::Theme;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error loading the blueprint
    #[error(transparent)]
    Blueprint(#[from] BlueprintError),
}

/// A loaded blueprint with everything needed to render it
///
/// Immutable once built, so it can be shared across server threads.
#[derive(Debug, Clone)]
pub struct Site {
    pub blueprint: Blueprint,
    pub registry: ComponentRegistry,
    pub theme: Theme,
    pub html: HtmlConfig,
}

impl Site {
    /// Built-in components, default theme with the blueprint's design tokens
    pub fn new(blueprint: Blueprint) -> Self {
        let site = Self {
            blueprint,
            registry: ComponentRegistry::builtin(),
            theme: Theme::default(),
            html: HtmlConfig::default(),
        };
        site.with_theme(Theme::default())
    }

    /// Load a blueprint file with default settings
    pub fn from_file(path: &Path) -> Result<Self, BlueprintError> {
        Ok(Self::new(Blueprint::from_file(path)?))
    }

    pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set the base theme; design-system tokens from the blueprint still win
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = match &self.blueprint.design_system {
            Some(design) => theme.with_design_system(design),
            None => theme,
        };
        self
    }

    pub fn with_html(mut self, html: HtmlConfig) -> Self {
        self.html = html;
        self
    }

    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        resolve(&self.blueprint, &self.registry, path)
    }

    /// Resolve and render a requested path
    pub fn render(&self, path: &str) -> RenderedPage {
        render_resolution(&self.resolve(path), &self.blueprint, &self.theme, &self.html)
    }

    /// Render the 404 view for `path` whether or not a page exists there
    pub fn render_not_found(&self, path: &str) -> RenderedPage {
        let resolution = Resolution::NotFound {
            path: blueprint::normalize_path(path),
        };
        render_resolution(&resolution, &self.blueprint, &self.theme, &self.html)
    }

    /// Render the 404 view without naming a path, as served for any miss
    pub fn render_generic_not_found(&self) -> RenderedPage {
        let resolution = Resolution::NotFound {
            path: String::new(),
        };
        render_resolution(&resolution, &self.blueprint, &self.theme, &self.html)
    }

    pub fn lint(&self) -> Vec<LintWarning> {
        lint::check(&self.blueprint, &self.registry)
    }
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// HTML output configuration
    pub html: HtmlConfig,
    /// Base theme for color tokens
    pub theme: Theme,
    /// Debug mode: annotate components with their blueprint descriptors
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTML configuration
    pub fn with_html(mut self, config: HtmlConfig) -> Self {
        self.html = config;
        self
    }

    /// Set the base theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render one path of a JSON blueprint with default configuration
///
/// Unknown paths are not an error: the returned document is the 404 view.
pub fn render(source: &str, path: &str) -> Result<String, RenderError> {
    render_with_config(source, path, RenderConfig::default())
}

/// Render one path of a JSON blueprint with custom configuration
///
/// # Example
///
/// ```rust
/// use site_blueprint::{render_with_config, HtmlConfig, RenderConfig};
///
/// let config = RenderConfig::new()
///     .with_html(HtmlConfig::default().with_standalone(false).with_pretty_print(false));
///
/// let html = render_with_config(r#"{
///     "client_name": "Acme",
///     "pages": [{
///         "page_name": "Home",
///         "page_path": "/",
///         "sections": [{
///             "section_name": "Intro",
///             "components": [{ "component_name": "Text", "props": { "body": "Hello" } }]
///         }]
///     }]
/// }"#, "/", config).unwrap();
///
/// assert!(html.contains(r#"<p class="sb-text">Hello</p>"#));
/// ```
pub fn render_with_config(
    source: &str,
    path: &str,
    config: RenderConfig,
) -> Result<String, RenderError> {
    let blueprint = parse(source)?;
    let debug = config.debug || config.html.debug;
    let html = config.html.with_debug(debug);
    let site = Site::new(blueprint).with_theme(config.theme).with_html(html);
    Ok(site.render(path).html)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = r##"{
        "client_name": "Acme Freight",
        "pages": [
            {
                "page_name": "Home",
                "page_path": "/",
                "sections": [{
                    "section_name": "Hero",
                    "components": [{ "component_name": "Hero", "props": { "title": "Ship it" } }]
                }]
            }
        ],
        "design_system": { "styleTokens": { "primary_color": "#123456" } }
    }"##;

    #[test]
    fn test_render_found_page() {
        let html = render(SITE, "/").unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Ship it"));
    }

    #[test]
    fn test_render_unknown_path_is_not_an_error() {
        let html = render(SITE, "/nope").unwrap();
        assert!(html.contains("404 Not Found"));
    }

    #[test]
    fn test_render_invalid_json_is_an_error() {
        assert!(matches!(
            render("{", "/"),
            Err(RenderError::Blueprint(BlueprintError::Syntax { .. }))
        ));
    }

    #[test]
    fn test_design_tokens_survive_theme_override() {
        let site = Site::new(parse(SITE).unwrap()).with_theme(Theme::from_str("").unwrap());
        assert_eq!(site.theme.resolve("primary"), Some("#123456"));
        assert!(site.render("/").html.contains("--sb-primary: #123456;"));
    }

    #[test]
    fn test_render_not_found_for_existing_path() {
        let site = Site::new(parse(SITE).unwrap());
        let page = site.render_not_found("/");
        assert_eq!(page.status, PageStatus::NotFound);
    }

    #[test]
    fn test_generic_not_found_page() {
        let site = Site::new(parse(SITE).unwrap());
        let page = site.render_generic_not_found();
        assert_eq!(page.status, PageStatus::NotFound);
        assert!(page.html.contains("The requested page does not exist."));
        assert!(!page.html.contains("<code>"));
    }

    #[test]
    fn test_config_debug_flag() {
        let config = RenderConfig::new()
            .with_html(HtmlConfig::default().with_standalone(false))
            .with_debug(true);
        let html = render_with_config(SITE, "/", config).unwrap();
        assert!(html.contains(r#"data-component="Hero""#));
    }

    #[test]
    fn test_site_lint() {
        let site = Site::new(parse(SITE).unwrap());
        assert!(site.lint().is_empty());
    }
}
