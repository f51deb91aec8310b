//! Blueprint data model and loader
//!
//! A blueprint is the declarative description of a site: ordered pages, each
//! made of ordered sections, each made of named components carrying an opaque
//! property bag. Blueprints are loaded once, validated, and then shared
//! read-only.

mod route;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::BlueprintError;

pub use route::{normalize_path, output_file, HOME};

/// Property bag forwarded verbatim to a component implementation
pub type Props = serde_json::Map<String, Value>;

/// Root of a site description
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Blueprint {
    /// Company or site name shown in titles and chrome
    #[serde(alias = "company_name", alias = "site_name", alias = "clientName")]
    pub client_name: String,
    /// Pages in declaration order
    pub pages: Vec<Page>,
    /// Site-wide components rendered around every page
    #[serde(default, alias = "globalComponents")]
    pub global_components: Option<GlobalComponents>,
    /// Design-system metadata (style tokens, fonts)
    #[serde(default, alias = "designSystem")]
    pub design_system: Option<DesignSystem>,
}

/// Components rendered on every page
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GlobalComponents {
    #[serde(default)]
    pub header: Option<BlueprintComponent>,
    #[serde(default)]
    pub footer: Option<BlueprintComponent>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DesignSystem {
    /// Named style tokens such as `primary_color`
    #[serde(default, alias = "styleTokens")]
    pub style_tokens: BTreeMap<String, Value>,
    #[serde(default, alias = "fontFamily")]
    pub font_family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(alias = "pageName", alias = "name")]
    pub page_name: String,
    #[serde(alias = "pagePath", alias = "path")]
    pub page_path: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Page {
    /// The normalized lookup key for this page
    pub fn route_key(&self) -> String {
        normalize_path(&self.page_path)
    }

    /// Iterate over every component of the page in render order
    pub fn components(&self) -> impl Iterator<Item = &BlueprintComponent> {
        self.sections.iter().flat_map(|s| s.components.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    #[serde(alias = "sectionName", alias = "name")]
    pub section_name: String,
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub components: Vec<BlueprintComponent>,
}

/// One named, parameterized unit of UI inside a section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlueprintComponent {
    /// Registry key
    #[serde(alias = "componentName", alias = "name")]
    pub component_name: String,
    #[serde(default, alias = "componentType")]
    pub component_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub props: Props,
    /// Free-text styling notes, never interpreted
    #[serde(default)]
    pub styles: Option<String>,
    /// Free-text interactivity notes, never interpreted
    #[serde(default)]
    pub interactivity: Option<String>,
}

impl BlueprintComponent {
    /// Create a component with an empty property bag
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            component_name: name.into(),
            component_type: None,
            props: Props::new(),
            styles: None,
            interactivity: None,
        }
    }

    /// Set a single prop
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Props, D::Error> {
    Ok(Option::<Props>::deserialize(deserializer)?.unwrap_or_default())
}

impl Blueprint {
    /// Load and validate a blueprint from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, BlueprintError> {
        let source = std::fs::read_to_string(path).map_err(|source| BlueprintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&source)
    }

    /// Find the page whose normalized path equals `key`
    pub fn find_page(&self, key: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.route_key() == key)
    }

    /// Check invariants that serde cannot express
    pub fn validate(&self) -> Result<(), BlueprintError> {
        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for page in &self.pages {
            let key = page.route_key();
            if let Some(first) = seen.get(&key) {
                return Err(BlueprintError::DuplicatePath {
                    path: key,
                    first: first.to_string(),
                    second: page.page_name.clone(),
                });
            }
            seen.insert(key, &page.page_name);
        }
        Ok(())
    }

    /// Header and footer, if declared
    pub fn globals(&self) -> (Option<&BlueprintComponent>, Option<&BlueprintComponent>) {
        match &self.global_components {
            Some(g) => (g.header.as_ref(), g.footer.as_ref()),
            None => (None, None),
        }
    }
}

/// Parse and validate a blueprint from JSON source
///
/// # Example
///
/// ```rust
/// use site_blueprint::parse;
///
/// let blueprint = parse(r#"{
///     "client_name": "Acme Freight",
///     "pages": [{ "page_name": "Home", "page_path": "/", "sections": [] }]
/// }"#).unwrap();
/// assert_eq!(blueprint.pages.len(), 1);
/// ```
pub fn parse(source: &str) -> Result<Blueprint, BlueprintError> {
    let blueprint: Blueprint = serde_json::from_str(source)?;
    blueprint.validate()?;
    Ok(blueprint)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "client_name": "Acme Freight",
        "pages": [
            {
                "id": "home",
                "page_name": "Home",
                "page_path": "/",
                "sections": [
                    {
                        "section_name": "Hero",
                        "heading": "Welcome",
                        "components": [
                            { "component_name": "Hero", "props": { "title": "Acme" } },
                            { "componentName": "Button", "props": null },
                            { "name": "Text" }
                        ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_minimal() {
        let bp = parse(MINIMAL).expect("Should parse");
        assert_eq!(bp.client_name, "Acme Freight");
        assert_eq!(bp.pages.len(), 1);
        let names: Vec<&str> = bp.pages[0]
            .components()
            .map(|c| c.component_name.as_str())
            .collect();
        assert_eq!(names, vec!["Hero", "Button", "Text"]);
    }

    #[test]
    fn test_null_and_missing_props_are_empty() {
        let bp = parse(MINIMAL).expect("Should parse");
        let comps: Vec<_> = bp.pages[0].components().collect();
        assert!(comps[1].props.is_empty());
        assert!(comps[2].props.is_empty());
        assert_eq!(comps[0].props.get("title"), Some(&Value::from("Acme")));
    }

    #[test]
    fn test_company_name_alias() {
        let bp = parse(r#"{ "company_name": "X", "pages": [] }"#).expect("Should parse");
        assert_eq!(bp.client_name, "X");
    }

    #[test]
    fn test_design_system_tokens() {
        let bp = parse(
            r##"{
                "client_name": "X",
                "pages": [],
                "design_system": {
                    "styleTokens": { "primary_color": "#112233" },
                    "fontFamily": "Inter",
                    "mood": "calm"
                }
            }"##,
        )
        .expect("Should parse");
        let ds = bp.design_system.expect("design system");
        assert_eq!(ds.style_tokens.get("primary_color"), Some(&Value::from("#112233")));
        assert_eq!(ds.font_family.as_deref(), Some("Inter"));
    }

    #[test]
    fn test_duplicate_paths_after_normalization() {
        let result = parse(
            r#"{
                "client_name": "X",
                "pages": [
                    { "page_name": "About", "page_path": "/about" },
                    { "page_name": "About again", "page_path": "about/" }
                ]
            }"#,
        );
        match result {
            Err(BlueprintError::DuplicatePath { path, first, second }) => {
                assert_eq!(path, "/about");
                assert_eq!(first, "About");
                assert_eq!(second, "About again");
            }
            other => panic!("expected duplicate path error, got {:?}", other),
        }
    }

    #[test]
    fn test_find_page_by_normalized_key() {
        let bp = parse(
            r#"{
                "client_name": "X",
                "pages": [
                    { "page_name": "Home", "page_path": "" },
                    { "page_name": "Pricing", "page_path": "pricing/" }
                ]
            }"#,
        )
        .expect("Should parse");
        assert_eq!(bp.find_page("/").map(|p| p.page_name.as_str()), Some("Home"));
        assert_eq!(
            bp.find_page("/pricing").map(|p| p.page_name.as_str()),
            Some("Pricing")
        );
        assert!(bp.find_page("/missing").is_none());
    }

    #[test]
    fn test_missing_required_field_is_schema_error() {
        let result = parse(r#"{ "pages": [] }"#);
        assert!(matches!(result, Err(BlueprintError::Schema { .. })));
    }

    #[test]
    fn test_syntax_error() {
        let result = parse(r#"{ "client_name": "X", "pages": [ }"#);
        assert!(matches!(result, Err(BlueprintError::Syntax { .. })));
    }

    #[test]
    fn test_globals() {
        let bp = parse(
            r#"{
                "client_name": "X",
                "pages": [],
                "global_components": { "header": { "component_name": "Header" } }
            }"#,
        )
        .expect("Should parse");
        let (header, footer) = bp.globals();
        assert_eq!(header.map(|h| h.component_name.as_str()), Some("Header"));
        assert!(footer.is_none());
    }
}
