//! Composite marketing blocks

use serde::Deserialize;

use crate::dispatch::Component;
use crate::renderer::{Element, RenderContext};

use super::basic::{button_link, ButtonVariant};

/// Large intro block with up to two calls to action
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hero {
    pub title: String,
    #[serde(default, alias = "subtitle", alias = "subheadline")]
    pub headline: Option<String>,
    #[serde(default, alias = "primaryCta")]
    pub primary_cta: Option<String>,
    #[serde(default = "default_primary_href", alias = "primaryHref")]
    pub primary_href: String,
    #[serde(default, alias = "secondaryCta")]
    pub secondary_cta: Option<String>,
    #[serde(default = "default_secondary_href", alias = "secondaryHref")]
    pub secondary_href: String,
}

fn default_primary_href() -> String {
    "/contact".to_string()
}

fn default_secondary_href() -> String {
    "/services".to_string()
}

impl Component for Hero {
    const NAME: &'static str = "Hero";

    fn render(&self, ctx: &RenderContext<'_>) -> Element {
        let buttons: Vec<Element> = [
            (&self.primary_cta, &self.primary_href, ButtonVariant::Primary),
            (&self.secondary_cta, &self.secondary_href, ButtonVariant::Secondary),
        ]
        .into_iter()
        .filter_map(|(label, href, variant)| {
            label
                .as_deref()
                .map(|label| button_link(ctx, label, href, variant))
        })
        .collect();

        let actions =
            (!buttons.is_empty()).then(|| Element::new("div").class(ctx.class("hero-actions")).children(buttons));

        Element::new("div")
            .class(ctx.class("hero"))
            .child(Element::new("h1").class(ctx.class("hero-title")).text(self.title.clone()))
            .child_opt(
                self.headline
                    .as_ref()
                    .map(|h| Element::new("p").class(ctx.class("hero-headline")).text(h.clone())),
            )
            .child_opt(actions)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, alias = "text")]
    pub description: Option<String>,
}

/// A titled list of features or services
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureGrid {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(alias = "features", alias = "services")]
    pub items: Vec<Feature>,
}

impl Component for FeatureGrid {
    const NAME: &'static str = "FeatureGrid";

    fn render(&self, ctx: &RenderContext<'_>) -> Element {
        let items = self.items.iter().map(|item| {
            Element::new("li")
                .class(ctx.class("feature"))
                .child(Element::new("h3").text(item.title.clone()))
                .child_opt(
                    item.description
                        .as_ref()
                        .map(|d| Element::new("p").text(d.clone())),
                )
        });

        Element::new("div")
            .class(ctx.class("feature-grid"))
            .child_opt(
                self.title
                    .as_ref()
                    .map(|t| Element::new("h3").class(ctx.class("feature-grid-title")).text(t.clone())),
            )
            .child(Element::new("ul").class(ctx.class("feature-list")).children(items))
    }
}

/// Closing banner with a single button
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CallToAction {
    #[serde(alias = "title")]
    pub headline: String,
    #[serde(default, alias = "subtitle")]
    pub subheadline: Option<String>,
    #[serde(alias = "buttonText")]
    pub button_text: String,
    #[serde(alias = "buttonLink")]
    pub button_link: String,
}

impl Component for CallToAction {
    const NAME: &'static str = "CallToAction";

    fn render(&self, ctx: &RenderContext<'_>) -> Element {
        Element::new("div")
            .class(ctx.class("cta"))
            .child(Element::new("h3").class(ctx.class("cta-headline")).text(self.headline.clone()))
            .child_opt(
                self.subheadline
                    .as_ref()
                    .map(|s| Element::new("p").class(ctx.class("cta-subheadline")).text(s.clone())),
            )
            .child(button_link(
                ctx,
                &self.button_text,
                &self.button_link,
                ButtonVariant::Primary,
            ))
    }
}
