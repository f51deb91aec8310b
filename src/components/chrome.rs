//! Site-wide header and footer

use serde::Deserialize;

use crate::dispatch::Component;
use crate::renderer::{Element, PageLink, RenderContext};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavLink {
    #[serde(alias = "text", alias = "name", alias = "platform")]
    pub label: String,
    #[serde(alias = "url", alias = "link")]
    pub href: String,
}

impl From<PageLink> for NavLink {
    fn from(link: PageLink) -> Self {
        Self {
            label: link.label,
            href: link.href,
        }
    }
}

/// Explicit links, or one per page when none were given
fn nav_links(ctx: &RenderContext<'_>, links: &Option<Vec<NavLink>>) -> Vec<NavLink> {
    match links {
        Some(links) => links.clone(),
        None => ctx.page_links().into_iter().map(NavLink::from).collect(),
    }
}

fn nav(ctx: &RenderContext<'_>, class: &str, links: &[NavLink]) -> Element {
    let items = links.iter().map(|link| {
        let current = ctx.is_current(&link.href).then_some("page");
        Element::new("li").child(
            Element::new("a")
                .attr("href", link.href.clone())
                .attr_opt("aria-current", current)
                .text(link.label.clone()),
        )
    });
    Element::new("nav")
        .class(ctx.class(class))
        .child(Element::new("ul").children(items))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Header {
    #[serde(default, alias = "logo_text", alias = "logoText")]
    pub brand: Option<String>,
    #[serde(default, alias = "navigation", alias = "nav_links", alias = "navLinks")]
    pub links: Option<Vec<NavLink>>,
}

impl Component for Header {
    const NAME: &'static str = "Header";

    fn render(&self, ctx: &RenderContext<'_>) -> Element {
        let brand = self.brand.as_deref().unwrap_or(ctx.site_name());
        Element::new("header")
            .class(ctx.class("header"))
            .child(
                Element::new("a")
                    .class(ctx.class("brand"))
                    .attr("href", "/")
                    .text(brand),
            )
            .child(nav(ctx, "nav", &nav_links(ctx, &self.links)))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Footer {
    #[serde(default, alias = "company_name", alias = "companyName")]
    pub brand: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<NavLink>>,
    /// Entries may use `url` in place of `href`
    #[serde(default, alias = "socialLinks")]
    pub social_links: Vec<NavLink>,
}

impl Component for Footer {
    const NAME: &'static str = "Footer";

    fn render(&self, ctx: &RenderContext<'_>) -> Element {
        let brand = self.brand.as_deref().unwrap_or(ctx.site_name());

        let social = (!self.social_links.is_empty()).then(|| {
            Element::new("ul")
                .class(ctx.class("social"))
                .children(self.social_links.iter().map(|link| {
                    Element::new("li").child(
                        Element::new("a")
                            .attr("href", link.href.clone())
                            .attr("rel", "noopener")
                            .text(link.label.clone()),
                    )
                }))
        });

        Element::new("footer")
            .class(ctx.class("footer"))
            .child(nav(ctx, "footer-nav", &nav_links(ctx, &self.links)))
            .child_opt(social)
            .child(
                Element::new("p")
                    .class(ctx.class("copyright"))
                    .text(format!("© {}", brand)),
            )
    }
}
