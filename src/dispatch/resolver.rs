//! Resolution - maps a requested path to an ordered tree of render nodes

use log::{debug, warn};

use crate::blueprint::{normalize_path, Blueprint, BlueprintComponent, Page, Section};

use super::registry::{ComponentEntry, ComponentRegistry};

/// Outcome of resolving a path against a blueprint
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// A page matched; nodes are in declaration order
    Found(ResolvedPage<'a>),
    /// No page declares this path
    NotFound { path: String },
}

impl<'a> Resolution<'a> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// The normalized key that was looked up
    pub fn path(&self) -> &str {
        match self {
            Resolution::Found(page) => &page.path,
            Resolution::NotFound { path } => path,
        }
    }

    /// Section nodes in render order (empty when not found)
    pub fn nodes(&self) -> Vec<&RenderNode<'a>> {
        match self {
            Resolution::Found(page) => page.nodes().collect(),
            Resolution::NotFound { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPage<'a> {
    pub page: &'a Page,
    /// Normalized route key
    pub path: String,
    pub header: Option<RenderNode<'a>>,
    pub footer: Option<RenderNode<'a>>,
    pub sections: Vec<ResolvedSection<'a>>,
}

impl<'a> ResolvedPage<'a> {
    /// Section nodes in render order, excluding header and footer
    pub fn nodes(&self) -> impl Iterator<Item = &RenderNode<'a>> {
        self.sections.iter().flat_map(|s| s.nodes.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSection<'a> {
    pub section: &'a Section,
    pub nodes: Vec<RenderNode<'a>>,
}

/// One dispatched component
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderNode<'a> {
    /// Registered implementation paired with the blueprint component
    Component {
        entry: &'a ComponentEntry,
        component: &'a BlueprintComponent,
    },
    /// No implementation registered under `name`
    Placeholder {
        name: &'a str,
        component: &'a BlueprintComponent,
    },
}

impl<'a> RenderNode<'a> {
    /// Blueprint name of the component
    pub fn name(&self) -> &'a str {
        match *self {
            RenderNode::Component { component, .. } | RenderNode::Placeholder { component, .. } => {
                &component.component_name
            }
        }
    }

    pub fn component(&self) -> &'a BlueprintComponent {
        match *self {
            RenderNode::Component { component, .. } | RenderNode::Placeholder { component, .. } => {
                component
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderNode::Placeholder { .. })
    }
}

/// Dispatch a single blueprint component through the registry
pub fn dispatch<'a>(
    component: &'a BlueprintComponent,
    registry: &'a ComponentRegistry,
) -> RenderNode<'a> {
    match registry.get(&component.component_name) {
        Some(entry) => RenderNode::Component { entry, component },
        None => {
            warn!(
                "no component registered as '{}', rendering placeholder",
                component.component_name
            );
            RenderNode::Placeholder {
                name: &component.component_name,
                component,
            }
        }
    }
}

/// Resolve a requested path into render nodes
///
/// Unknown component names become placeholders and resolution carries on;
/// an unknown path yields [`Resolution::NotFound`]. The blueprint is only
/// borrowed, so resolving the same path twice gives equal results.
pub fn resolve<'a>(
    blueprint: &'a Blueprint,
    registry: &'a ComponentRegistry,
    path: &str,
) -> Resolution<'a> {
    let key = normalize_path(path);

    let Some(page) = blueprint.find_page(&key) else {
        warn!("no page declared for '{}'", key);
        return Resolution::NotFound { path: key };
    };

    let sections = page
        .sections
        .iter()
        .map(|section| ResolvedSection {
            section,
            nodes: section
                .components
                .iter()
                .map(|c| dispatch(c, registry))
                .collect(),
        })
        .collect::<Vec<_>>();

    let (header, footer) = blueprint.globals();
    let resolved = ResolvedPage {
        page,
        path: key,
        header: header.map(|c| dispatch(c, registry)),
        footer: footer.map(|c| dispatch(c, registry)),
        sections,
    };

    debug!(
        "resolved '{}' to page '{}' ({} sections, {} components)",
        resolved.path,
        page.page_name,
        resolved.sections.len(),
        resolved.nodes().count()
    );

    Resolution::Found(resolved)
}
