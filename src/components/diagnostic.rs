//! Views rendered in place of content that could not be produced

use crate::dispatch::PropsError;
use crate::renderer::{Element, RenderContext};

/// Stand-in for a component name missing from the registry
pub fn placeholder(ctx: &RenderContext<'_>, name: &str) -> Element {
    Element::new("div")
        .class(ctx.class("placeholder"))
        .attr("role", "note")
        .attr("data-component", name)
        .child(Element::new("strong").text(name))
        .text(" is not a registered component")
}

/// Stand-in for a registered component whose props did not convert
pub fn invalid_props(ctx: &RenderContext<'_>, err: &PropsError) -> Element {
    Element::new("div")
        .class(ctx.class("invalid-props"))
        .attr("role", "note")
        .attr("data-component", err.component.clone())
        .child(Element::new("strong").text(err.component.clone()))
        .text(format!(" has invalid props: {}", err.message))
}

/// The 404 view
///
/// An empty context path renders the generic message used for the static
/// `404.html`, which answers for any missing path.
pub fn not_found(ctx: &RenderContext<'_>) -> Element {
    let message = if ctx.path.is_empty() {
        Element::new("p").text("The requested page does not exist.")
    } else {
        Element::new("p")
            .text("No page is declared for ")
            .child(Element::new("code").text(ctx.path))
    };
    Element::new("div")
        .class(ctx.class("not-found"))
        .child(Element::new("h1").text("404 Not Found"))
        .child(message)
        .child(
            Element::new("p").child(
                Element::new("a")
                    .attr("href", "/")
                    .text(format!("Back to {}", ctx.site_name())),
            ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::html_at;

    #[test]
    fn test_placeholder_names_component() {
        let html = html_at("/", |ctx| placeholder(ctx, "Carousel"));
        insta::assert_snapshot!(html, @r#"<div class="sb-placeholder" role="note" data-component="Carousel"><strong>Carousel</strong> is not a registered component</div>"#);
    }

    #[test]
    fn test_placeholder_escapes_name() {
        let html = html_at("/", |ctx| placeholder(ctx, "<Evil>"));
        assert!(html.contains("<strong>&lt;Evil&gt;</strong>"));
        assert!(html.contains(r#"data-component="&lt;Evil&gt;""#));
    }

    #[test]
    fn test_invalid_props_message() {
        let err = PropsError {
            component: "Button".to_string(),
            message: "missing field `label`".to_string(),
        };
        let html = html_at("/", |ctx| invalid_props(ctx, &err));
        assert!(html.contains("<strong>Button</strong> has invalid props: missing field `label`"));
    }

    #[test]
    fn test_not_found_shows_path() {
        let html = html_at("/missing", not_found);
        assert!(html.contains("<h1>404 Not Found</h1>"));
        assert!(html.contains("<code>/missing</code>"));
        assert!(html.contains("Back to Acme Freight"));
    }

    #[test]
    fn test_generic_not_found_names_no_path() {
        let html = html_at("", not_found);
        assert!(html.contains("<h1>404 Not Found</h1>"));
        assert!(html.contains("<p>The requested page does not exist.</p>"));
        assert!(!html.contains("<code>"));
    }
}
