//! HTML rendering for the node tree.
//!
//! Rendering consumes nodes. Escaping goes through `html-escape`; entity
//! idempotence is a parsing concern (recognized entities arrive here as
//! verbatim literals, bare ampersands as text).

use std::borrow::Cow;

use crate::ast::node::{Element, Link, LinkTarget, Media, Node};
use crate::engine::context::{Context, MediaDef};
use crate::options::Options;
use crate::source::Region;

pub(crate) fn render_node<'s>(node: Node<'s>, ctx: &mut Context) -> String {
    match node {
        Node::Root { children, .. } => render_root(children, ctx),
        Node::Element(el) => render_element(el, ctx),
        Node::Text { region } => render_text(&region, ctx),
        Node::Literal { region } => region.to_cow().into_owned(),
        Node::Selector { .. } => String::new(),
        Node::Formula {
            marker, children, ..
        } => render_formula(marker, children, ctx),
        Node::Link(link) => render_link(link, ctx),
        Node::Media(media) => render_media(media, ctx),
        Node::HtmlEscape { region } => html_escape::encode_text(&region.to_cow()).into_owned(),
    }
}

/// Top-level blocks are separated by single newlines; empty renders (blank
/// runs, unresolved references) are dropped.
fn render_root<'s>(children: Vec<Node<'s>>, ctx: &mut Context) -> String {
    let mut parts = Vec::with_capacity(children.len());
    for child in children {
        let html = ctx.render(child);
        if !html.is_empty() {
            parts.push(html);
        }
    }
    parts.join("\n")
}

fn render_element<'s>(el: Element<'s>, ctx: &mut Context) -> String {
    let Element {
        tag,
        region,
        selector,
        children,
    } = el;
    let mut out = String::with_capacity(64);
    out.push('<');
    out.push_str(&tag);
    if let Some(sel) = &selector {
        if let Some(id) = &sel.id {
            push_attr(&mut out, "id", id);
        }
        if !sel.classes.is_empty() {
            push_attr(&mut out, "class", &sel.classes.join(" "));
        }
    }
    push_source_indices(&mut out, &region, ctx.options());
    out.push('>');
    let inner = ctx.render_children(tag.clone(), children);
    out.push_str(&inner);
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
    out
}

fn render_formula<'s>(marker: &str, children: Vec<Node<'s>>, ctx: &mut Context) -> String {
    let mut out = String::from("<span class=\"formula\">");
    out.push_str(marker);
    out.push_str(&ctx.render_children(Cow::Borrowed("span"), children));
    out.push_str(marker);
    out.push_str("</span>");
    out
}

fn render_link<'s>(link: Link<'s>, ctx: &mut Context) -> String {
    let Link {
        region: _,
        target,
        children,
        headless,
    } = link;
    let (href, title, external) = match &target {
        LinkTarget::Inline { href } => (href.clone(), None, is_external_href(href)),
        LinkTarget::Reference { id } => match ctx.resolved(id) {
            Some(def) => (
                def.href.clone(),
                def.title.clone(),
                def.external.unwrap_or(false),
            ),
            // Silent degradation: unresolved references render as nothing.
            None => return String::new(),
        },
    };
    let mut out = String::from("<a");
    push_attr(&mut out, "href", &href);
    if let Some(t) = &title {
        push_attr(&mut out, "title", t);
    }
    if ctx.options().external_links && external {
        push_attr(&mut out, "target", "_blank");
    }
    out.push('>');
    if headless {
        let label = match (title, target) {
            (Some(t), _) => t,
            (None, LinkTarget::Reference { id }) => id,
            (None, LinkTarget::Inline { href }) => href,
        };
        out.push_str(&html_escape::encode_text(&label));
    } else {
        let inner = ctx.render_children(Cow::Borrowed("a"), children);
        out.push_str(&inner);
    }
    out.push_str("</a>");
    out
}

fn render_media<'s>(media: Media<'s>, ctx: &mut Context) -> String {
    let def = match &media.target {
        LinkTarget::Inline { href } => MediaDef::new(href.clone()),
        LinkTarget::Reference { id } => match ctx.resolved(id) {
            Some(def) => def.clone(),
            None => return String::new(),
        },
    };
    if let Some(custom) = def.custom_render.clone() {
        return custom(&def, &media.alt);
    }
    let mut out = String::from("<img");
    push_attr(&mut out, "src", &def.href);
    push_attr(&mut out, "alt", &media.alt);
    if let Some(t) = &def.title {
        push_attr(&mut out, "title", t);
    }
    out.push('>');
    out
}

fn render_text(region: &Region<'_>, ctx: &Context) -> String {
    let options = ctx.options();
    let mut text: Cow<'_, str> = region.to_cow();
    if options.substitutes_quotes() && !ctx.in_preformatted() {
        text = Cow::Owned(typographic(&text, options));
    }
    if options.strip_invalid_xml_chars && text.chars().any(|c| !valid_xml_char(c)) {
        text = Cow::Owned(text.chars().filter(|&c| valid_xml_char(c)).collect());
    }
    html_escape::encode_text(&text).into_owned()
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(value));
    out.push('"');
}

fn push_source_indices(out: &mut String, region: &Region<'_>, options: &Options) {
    if options.source_indices {
        out.push_str(" data-src=\"");
        out.push_str(&region.start().to_string());
        out.push('-');
        out.push_str(&region.end().to_string());
        out.push('"');
    }
}

fn is_external_href(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Straight-quote substitution. A quote opens after start-of-text,
/// whitespace or an opening bracket/dash; otherwise it closes (which also
/// covers apostrophes).
fn typographic(s: &str, options: &Options) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    for c in s.chars() {
        let substitute = match c {
            '"' => pick_quote(
                prev,
                options.left_double_quote.as_deref(),
                options.right_double_quote.as_deref(),
            ),
            '\'' => pick_quote(
                prev,
                options.left_single_quote.as_deref(),
                options.right_single_quote.as_deref(),
            ),
            _ => None,
        };
        match substitute {
            Some(q) => out.push_str(q),
            None => out.push(c),
        }
        prev = Some(c);
    }
    out
}

fn pick_quote<'a>(
    prev: Option<char>,
    left: Option<&'a str>,
    right: Option<&'a str>,
) -> Option<&'a str> {
    let opening = match prev {
        None => true,
        Some(p) => p.is_whitespace() || matches!(p, '(' | '[' | '{' | '-' | '–' | '—'),
    };
    if opening { left } else { right }
}

/// XML 1.0 character range.
fn valid_xml_char(c: char) -> bool {
    matches!(c, '\u{9}' | '\u{A}' | '\u{D}')
        || ('\u{20}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
        || c >= '\u{10000}'
}
