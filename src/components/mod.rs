//! Built-in components
//!
//! A deliberately small, generic set of leaf renderers. Each type is its own
//! typed configuration, deserialized from the blueprint's property bag when
//! the component is rendered.

pub mod basic;
pub mod chrome;
pub mod diagnostic;
pub mod sections;

pub use basic::{Button, ButtonVariant, Heading, Text};
pub use chrome::{Footer, Header, NavLink};
pub use sections::{CallToAction, Feature, FeatureGrid, Hero};

use crate::dispatch::{ComponentRegistry, RegistryError};

/// Register every built-in component
pub fn register_builtins(registry: &mut ComponentRegistry) -> Result<(), RegistryError> {
    registry.register::<Button>()?;
    registry.register::<Heading>()?;
    registry.register::<Text>()?;
    registry.register::<Hero>()?;
    registry.register::<FeatureGrid>()?;
    registry.register::<CallToAction>()?;
    registry.register::<Header>()?;
    registry.register::<Footer>()?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::blueprint::Blueprint;
    use crate::renderer::{render_markup, Element, HtmlConfig, RenderContext};

    pub fn blueprint() -> Blueprint {
        crate::parse(
            r#"{
                "client_name": "Acme Freight",
                "pages": [
                    { "page_name": "Home", "page_path": "/" },
                    { "page_name": "Services", "page_path": "/services" },
                    { "page_name": "Contact", "page_path": "/contact" }
                ]
            }"#,
        )
        .unwrap()
    }

    /// Render an element compactly as it would appear on `path`
    pub fn html_at(path: &str, render: impl FnOnce(&RenderContext<'_>) -> Element) -> String {
        let bp = blueprint();
        let config = HtmlConfig::new().with_pretty_print(false);
        let ctx = RenderContext::new(&bp, path, &config);
        render_markup(&render(&ctx).into(), &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_register_once() {
        let registry = ComponentRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec![
                "Button",
                "CallToAction",
                "FeatureGrid",
                "Footer",
                "Header",
                "Heading",
                "Hero",
                "Text"
            ]
        );

        let mut again = registry.clone();
        assert!(register_builtins(&mut again).is_err());
    }
}
