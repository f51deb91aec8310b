//! HTML generation from resolved pages

use std::collections::HashSet;

use log::warn;

use crate::blueprint::Blueprint;
use crate::components::diagnostic;
use crate::dispatch::{PropsError, RenderNode, Resolution, ResolvedSection};
use crate::theme::Theme;

use super::{Element, HtmlConfig, Markup, RenderContext};

/// Build HTML output incrementally
pub struct HtmlBuilder {
    config: HtmlConfig,
    out: String,
    indent: usize,
}

impl HtmlBuilder {
    /// Create a new HTML builder
    pub fn new(config: HtmlConfig) -> Self {
        Self {
            config,
            out: String::new(),
            indent: 0,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &'static str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn line(&mut self, content: &str) {
        let indent = self.indent_str();
        let nl = self.newline();
        self.out.push_str(&indent);
        self.out.push_str(content);
        self.out.push_str(nl);
    }

    /// Append a node and its subtree
    pub fn write(&mut self, markup: &Markup) {
        match markup {
            Markup::Raw(raw) => self.line(raw),
            Markup::Text(text) => self.line(&escape_text(text)),
            Markup::Element(el) => self.write_element(el),
        }
    }

    fn write_element(&mut self, el: &Element) {
        if el.is_void() {
            self.line(&open_tag(el));
            return;
        }

        if el.is_inline() {
            let mut inline = String::new();
            write_inline(&mut inline, el);
            self.line(&inline);
            return;
        }

        self.line(&open_tag(el));
        self.indent += 1;
        for child in &el.children {
            self.write(child);
        }
        self.indent = self.indent.saturating_sub(1);
        self.line(&format!("</{}>", el.tag));
    }

    /// Build the final HTML string
    pub fn finish(self) -> String {
        self.out
    }
}

fn open_tag(el: &Element) -> String {
    let mut tag = format!("<{}", el.tag);
    for (name, value) in &el.attrs {
        tag.push_str(&format!(r#" {}="{}""#, name, escape_attr(value)));
    }
    tag.push('>');
    tag
}

fn write_inline(out: &mut String, el: &Element) {
    out.push_str(&open_tag(el));
    if el.is_void() {
        return;
    }
    for child in &el.children {
        match child {
            Markup::Element(e) => write_inline(out, e),
            Markup::Text(t) => out.push_str(&escape_text(t)),
            Markup::Raw(r) => out.push_str(r),
        }
    }
    out.push_str(&format!("</{}>", el.tag));
}

/// Serialize a markup tree on its own
pub fn render_markup(markup: &Markup, config: &HtmlConfig) -> String {
    let mut builder = HtmlBuilder::new(config.clone());
    builder.write(markup);
    builder.finish()
}

/// HTTP-style outcome of rendering a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    NotFound,
}

impl PageStatus {
    pub fn code(self) -> u16 {
        match self {
            PageStatus::Ok => 200,
            PageStatus::NotFound => 404,
        }
    }
}

/// A rendered document plus what went wrong while rendering it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub status: PageStatus,
    pub title: String,
    pub html: String,
    /// Component names that rendered as placeholders
    pub placeholders: Vec<String>,
    /// Components whose props did not match their typed configuration
    pub invalid_props: Vec<PropsError>,
}

#[derive(Default)]
struct Diagnostics {
    placeholders: Vec<String>,
    invalid_props: Vec<PropsError>,
}

/// Render a resolution into an HTML document
pub fn render_resolution(
    resolution: &Resolution<'_>,
    blueprint: &Blueprint,
    theme: &Theme,
    config: &HtmlConfig,
) -> RenderedPage {
    let mut diagnostics = Diagnostics::default();

    let (status, title, body) = match resolution {
        Resolution::Found(page) => {
            let ctx = RenderContext::new(blueprint, &page.path, config);
            let mut body = Vec::new();

            if let Some(header) = &page.header {
                body.push(render_node(header, &ctx, &mut diagnostics));
            }

            let mut main = Element::new("main").class(ctx.class("main"));
            let mut ids = HashSet::new();
            for (index, section) in page.sections.iter().enumerate() {
                let id = unique_section_id(&section.section.section_name, index, &mut ids);
                main = main.child(render_section(section, id, &ctx, &mut diagnostics));
            }
            body.push(main);

            if let Some(footer) = &page.footer {
                body.push(render_node(footer, &ctx, &mut diagnostics));
            }

            let title = format!("{} | {}", page.page.page_name, blueprint.client_name);
            (PageStatus::Ok, title, body)
        }
        Resolution::NotFound { path } => {
            let ctx = RenderContext::new(blueprint, path, config);
            let main = Element::new("main")
                .class(ctx.class("main"))
                .child(diagnostic::not_found(&ctx));
            let title = format!("Page not found | {}", blueprint.client_name);
            (PageStatus::NotFound, title, vec![main])
        }
    };

    let mut builder = HtmlBuilder::new(config.clone());
    for markup in document(&title, body, theme, config) {
        builder.write(&markup);
    }

    RenderedPage {
        status,
        title,
        html: builder.finish(),
        placeholders: diagnostics.placeholders,
        invalid_props: diagnostics.invalid_props,
    }
}

fn document(title: &str, body: Vec<Element>, theme: &Theme, config: &HtmlConfig) -> Vec<Markup> {
    if !config.standalone {
        return body.into_iter().map(Markup::from).collect();
    }

    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(title))
        .child(Element::new("style").child(Markup::Raw(theme.css(config))));

    let html = Element::new("html")
        .attr("lang", config.lang.clone())
        .child(head)
        .child(Element::new("body").class(config.class("site")).children(body));

    vec![Markup::Raw("<!DOCTYPE html>".to_string()), html.into()]
}

fn render_section(
    section: &ResolvedSection<'_>,
    id: String,
    ctx: &RenderContext<'_>,
    diagnostics: &mut Diagnostics,
) -> Element {
    let heading = section
        .section
        .heading
        .as_ref()
        .map(|h| Element::new("h2").class(ctx.class("section-heading")).text(h.clone()));

    let mut el = Element::new("section")
        .attr("id", id)
        .class(ctx.class("section"))
        .child_opt(heading);
    for node in &section.nodes {
        el = el.child(render_node(node, ctx, diagnostics));
    }
    el
}

fn render_node(
    node: &RenderNode<'_>,
    ctx: &RenderContext<'_>,
    diagnostics: &mut Diagnostics,
) -> Element {
    let component = node.component();
    let el = match node {
        RenderNode::Component { entry, component } => match entry.render(&component.props, ctx) {
            Ok(el) => el,
            Err(err) => {
                warn!("{} on page '{}'", err, ctx.path);
                let el = diagnostic::invalid_props(ctx, &err);
                diagnostics.invalid_props.push(err);
                el
            }
        },
        RenderNode::Placeholder { name, .. } => {
            diagnostics.placeholders.push(name.to_string());
            diagnostic::placeholder(ctx, name)
        }
    };

    if ctx.config.debug {
        el.attr("data-component", component.component_name.clone())
            .attr_opt("data-style", component.styles.clone())
            .attr_opt("data-interactivity", component.interactivity.clone())
    } else {
        el
    }
}

fn unique_section_id(name: &str, index: usize, used: &mut HashSet<String>) -> String {
    let base = slug::slugify(name);
    let base = if base.is_empty() {
        format!("section-{}", index + 1)
    } else {
        base
    };

    let mut id = base.clone();
    let mut n = 2;
    while !used.insert(id.clone()) {
        id = format!("{}-{}", base, n);
        n += 1;
    }
    id
}

/// Escape text content
pub(crate) fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape an attribute value
pub(crate) fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}
