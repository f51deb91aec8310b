//! Lint engine for detecting blueprint defects before rendering.
//!
//! Checks every component against the registry: unknown names, props that
//! do not convert into the component's typed configuration, and internal
//! links that point at pages the blueprint does not declare.

use std::fmt;

use serde_json::Value;

use crate::blueprint::{normalize_path, Blueprint, BlueprintComponent};
use crate::dispatch::ComponentRegistry;

/// A lint warning about a blueprint defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    /// Where the component sits, e.g. `page "/" > section "Hero" > Button #1`
    pub location: String,
    pub message: String,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.category, self.location, self.message)
    }
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Component,
    Props,
    Link,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Component => write!(f, "component"),
            LintCategory::Props => write!(f, "props"),
            LintCategory::Link => write!(f, "link"),
        }
    }
}

/// Prop keys whose string values are treated as link targets
const LINK_KEYS: &[&str] = &[
    "href",
    "link",
    "url",
    "button_link",
    "buttonLink",
    "primary_href",
    "primaryHref",
    "secondary_href",
    "secondaryHref",
];

/// Run all lint checks on a blueprint.
pub fn check(blueprint: &Blueprint, registry: &ComponentRegistry) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    let (header, footer) = blueprint.globals();
    for (slot, component) in [("header", header), ("footer", footer)] {
        if let Some(component) = component {
            let location = format!("global {} > {}", slot, component.component_name);
            check_component(blueprint, registry, component, &location, &mut warnings);
        }
    }

    for page in &blueprint.pages {
        for section in &page.sections {
            for (idx, component) in section.components.iter().enumerate() {
                let location = format!(
                    "page \"{}\" > section \"{}\" > {} #{}",
                    page.route_key(),
                    section.section_name,
                    component.component_name,
                    idx + 1
                );
                check_component(blueprint, registry, component, &location, &mut warnings);
            }
        }
    }

    warnings
}

fn check_component(
    blueprint: &Blueprint,
    registry: &ComponentRegistry,
    component: &BlueprintComponent,
    location: &str,
    warnings: &mut Vec<LintWarning>,
) {
    match registry.get(&component.component_name) {
        None => warnings.push(LintWarning {
            category: LintCategory::Component,
            location: location.to_string(),
            message: format!(
                "'{}' is not a registered component and will render as a placeholder",
                component.component_name
            ),
        }),
        Some(entry) => {
            if let Err(err) = entry.validate(&component.props) {
                warnings.push(LintWarning {
                    category: LintCategory::Props,
                    location: location.to_string(),
                    message: err.message,
                });
            }
        }
    }

    let mut links = Vec::new();
    collect_links(&Value::Object(component.props.clone()), &mut links);
    for link in links {
        if blueprint.find_page(&normalize_path(&link)).is_none() {
            warnings.push(LintWarning {
                category: LintCategory::Link,
                location: location.to_string(),
                message: format!("link '{}' does not match any page", link),
            });
        }
    }
}

/// Collect internal link targets anywhere in a prop tree, in document order
fn collect_links(value: &Value, links: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::String(s) if LINK_KEYS.contains(&key.as_str()) && is_internal(s) => {
                        links.push(s.clone());
                    }
                    _ => collect_links(value, links),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_links(item, links);
            }
        }
        _ => {}
    }
}

fn is_internal(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const SITE: &str = r#"{
        "client_name": "Acme",
        "pages": [
            {
                "page_name": "Home",
                "page_path": "/",
                "sections": [{
                    "section_name": "Hero",
                    "components": [
                        { "component_name": "Button", "props": { "label": "Quote", "href": "/contact" } },
                        { "component_name": "Button", "props": { "label": "Team", "href": "/team/?ref=home" } },
                        { "component_name": "Carousel" },
                        { "component_name": "Heading", "props": { "level": 2 } }
                    ]
                }]
            },
            { "page_name": "Contact", "page_path": "/contact" }
        ],
        "global_components": {
            "footer": {
                "component_name": "Footer",
                "props": {
                    "links": [{ "label": "Jobs", "href": "/jobs" }],
                    "social_links": [{ "label": "X", "url": "https://x.com/acme" }]
                }
            }
        }
    }"#;

    fn categories(warnings: &[LintWarning]) -> Vec<LintCategory> {
        warnings.iter().map(|w| w.category).collect()
    }

    #[test]
    fn test_check_reports_each_category() {
        let bp = parse(SITE).unwrap();
        let warnings = check(&bp, &ComponentRegistry::builtin());
        assert_eq!(
            categories(&warnings),
            vec![
                LintCategory::Link,
                LintCategory::Link,
                LintCategory::Component,
                LintCategory::Props,
            ]
        );
        assert_eq!(warnings[0].location, "global footer > Footer");
        assert!(warnings[0].message.contains("'/jobs'"));
        assert!(warnings[1].message.contains("/team/?ref=home"));
        assert!(warnings[2].location.contains("Carousel #3"));
        assert!(warnings[3].message.contains("text"));
    }

    #[test]
    fn test_clean_blueprint_has_no_warnings() {
        let bp = parse(
            r#"{
                "client_name": "Acme",
                "pages": [{
                    "page_name": "Home",
                    "page_path": "/",
                    "sections": [{
                        "section_name": "Top",
                        "components": [
                            { "component_name": "Button", "props": { "label": "Home", "href": "/index.html" } },
                            { "component_name": "Button", "props": { "label": "Out", "href": "https://example.com/missing" } }
                        ]
                    }]
                }]
            }"#,
        )
        .unwrap();
        assert!(check(&bp, &ComponentRegistry::builtin()).is_empty());
    }

    #[test]
    fn test_warning_display() {
        let warning = LintWarning {
            category: LintCategory::Component,
            location: "global header > Nav".to_string(),
            message: "unknown".to_string(),
        };
        assert_eq!(warning.to_string(), "[component] global header > Nav: unknown");
    }
}
