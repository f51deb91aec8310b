//! HTML renderer for resolved pages
//!
//! This module takes a [`Resolution`](crate::dispatch::Resolution) and
//! produces an HTML string with prefixed CSS classes for styling.

pub mod config;
pub mod html;
pub mod markup;

pub use config::HtmlConfig;
pub use html::{render_markup, render_resolution, HtmlBuilder, PageStatus, RenderedPage};
pub use markup::{Element, Markup};

use crate::blueprint::{normalize_path, Blueprint};

/// What a component can see while rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub blueprint: &'a Blueprint,
    /// Normalized key of the page being rendered
    pub path: &'a str,
    pub config: &'a HtmlConfig,
}

/// A navigation target derived from the blueprint's pages
#[derive(Debug, Clone, PartialEq)]
pub struct PageLink {
    pub label: String,
    pub href: String,
}

impl<'a> RenderContext<'a> {
    pub fn new(blueprint: &'a Blueprint, path: &'a str, config: &'a HtmlConfig) -> Self {
        Self {
            blueprint,
            path,
            config,
        }
    }

    /// Prefixed CSS class
    pub fn class(&self, name: &str) -> String {
        self.config.class(name)
    }

    pub fn site_name(&self) -> &'a str {
        &self.blueprint.client_name
    }

    /// One link per page, in declaration order
    pub fn page_links(&self) -> Vec<PageLink> {
        self.blueprint
            .pages
            .iter()
            .map(|p| PageLink {
                label: p.page_name.clone(),
                href: p.route_key(),
            })
            .collect()
    }

    /// Whether an internal href points at the page being rendered
    pub fn is_current(&self, href: &str) -> bool {
        href.starts_with('/') && !href.starts_with("//") && normalize_path(href) == self.path
    }
}
