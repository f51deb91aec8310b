//! Leaf components: buttons, headings and body text

use serde::Deserialize;

use crate::dispatch::Component;
use crate::renderer::{Element, RenderContext};

/// A link styled as a button
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Button {
    #[serde(alias = "text")]
    pub label: String,
    #[serde(default, alias = "link", alias = "url")]
    pub href: Option<String>,
    #[serde(default)]
    pub variant: ButtonVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
}

impl ButtonVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
        }
    }
}

/// Anchor with button classes; shared by the composite components
pub(crate) fn button_link(
    ctx: &RenderContext<'_>,
    label: &str,
    href: &str,
    variant: ButtonVariant,
) -> Element {
    Element::new("a")
        .class(ctx.class("btn"))
        .class(ctx.class(&format!("btn-{}", variant.as_str())))
        .attr("href", href)
        .text(label)
}

impl Component for Button {
    const NAME: &'static str = "Button";

    fn render(&self, ctx: &RenderContext<'_>) -> Element {
        button_link(
            ctx,
            &self.label,
            self.href.as_deref().unwrap_or("#"),
            self.variant,
        )
    }
}

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Heading {
    #[serde(alias = "title")]
    pub text: String,
    /// Clamped to 1..=6 when rendered
    #[serde(default = "default_heading_level")]
    pub level: u8,
}

fn default_heading_level() -> u8 {
    2
}

impl Component for Heading {
    const NAME: &'static str = "Heading";

    fn render(&self, ctx: &RenderContext<'_>) -> Element {
        let level = self.level.clamp(1, 6) as usize;
        Element::new(HEADING_TAGS[level - 1])
            .class(ctx.class("heading"))
            .text(self.text.clone())
    }
}

/// A paragraph of body copy
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Text {
    #[serde(alias = "text", alias = "content")]
    pub body: String,
}

impl Component for Text {
    const NAME: &'static str = "Text";

    fn render(&self, ctx: &RenderContext<'_>) -> Element {
        Element::new("p").class(ctx.class("text")).text(self.body.clone())
    }
}
