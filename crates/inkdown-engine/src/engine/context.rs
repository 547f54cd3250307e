//! Per-document render-time state.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::ast::Node;
use crate::ast::render;
use crate::engine::parser::Parser;
use crate::error::EngineError;
use crate::options::Options;
use crate::source::Region;

/// An AST rewrite pass: maps one node to its 0..N replacements.
pub type Transform = Rc<dyn for<'a> Fn(Node<'a>) -> Vec<Node<'a>>>;

/// A resolved link/media definition supplied by the embedder.
#[derive(Clone)]
pub struct MediaDef {
    pub href: String,
    pub title: Option<String>,
    pub external: Option<bool>,
    /// Replaces the default rendering entirely; receives the definition and
    /// the raw alt text.
    pub custom_render: Option<Rc<dyn Fn(&MediaDef, &str) -> String>>,
}

impl MediaDef {
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: None,
            external: None,
            custom_render: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_external(mut self, external: bool) -> Self {
        self.external = Some(external);
        self
    }

    #[must_use]
    pub fn with_custom_render(
        mut self,
        render: impl Fn(&MediaDef, &str) -> String + 'static,
    ) -> Self {
        self.custom_render = Some(Rc::new(render));
        self
    }
}

impl fmt::Debug for MediaDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaDef")
            .field("href", &self.href)
            .field("title", &self.title)
            .field("external", &self.external)
            .field("custom_render", &self.custom_render.is_some())
            .finish()
    }
}

/// State for exactly one render call.
///
/// Holds the instantiated parser registry, the media ids collected during
/// parsing, the id-to-definition resolution map, the render stack (for
/// ancestor-aware rendering) and the transform pipeline. A
/// [`Processor`](crate::engine::Processor) is reusable across documents; a
/// `Context` is not.
pub struct Context {
    options: Options,
    parsers: HashMap<String, Rc<Parser>>,
    media_ids: Vec<String>,
    resolved_media: HashMap<String, MediaDef>,
    render_stack: Vec<Cow<'static, str>>,
    transforms: Rc<Vec<Transform>>,
}

impl Context {
    pub(crate) fn new(
        options: Options,
        parsers: HashMap<String, Rc<Parser>>,
        transforms: Rc<Vec<Transform>>,
    ) -> Self {
        Self {
            options,
            parsers,
            media_ids: Vec::new(),
            resolved_media: HashMap::new(),
            render_stack: Vec::new(),
            transforms,
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Look up a parser instance by id.
    pub fn parser(&self, id: &str) -> Result<Rc<Parser>, EngineError> {
        self.parsers
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::UnknownParser { id: id.to_owned() })
    }

    /// Parse `region` with the named parser.
    pub fn parse<'s>(&mut self, id: &str, region: &Region<'s>) -> Result<Node<'s>, EngineError> {
        let parser = self.parser(id)?;
        parser.parse(region, self)
    }

    /// Record a reference id seen during parsing; first-seen order, deduped.
    pub fn record_media_id(&mut self, id: &str) {
        if !self.media_ids.iter().any(|known| known == id) {
            self.media_ids.push(id.to_owned());
        }
    }

    #[must_use]
    pub fn media_ids(&self) -> &[String] {
        &self.media_ids
    }

    pub fn resolve(&mut self, id: impl Into<String>, def: MediaDef) {
        self.resolved_media.insert(id.into(), def);
    }

    #[must_use]
    pub fn resolved(&self, id: &str) -> Option<&MediaDef> {
        self.resolved_media.get(id)
    }

    /// Render one node: apply the transform pipeline (in registration order,
    /// once per node), then render each surviving replacement. Transforms
    /// are re-applied independently as rendering recurses into children.
    pub fn render<'s>(&mut self, node: Node<'s>) -> String {
        let transforms = Rc::clone(&self.transforms);
        let mut nodes = vec![node];
        for transform in transforms.iter() {
            nodes = nodes.into_iter().flat_map(|n| transform(n)).collect();
        }
        nodes
            .into_iter()
            .map(|n| render::render_node(n, self))
            .collect()
    }

    /// Render children under `tag` on the render stack.
    pub fn render_children<'s>(
        &mut self,
        tag: Cow<'static, str>,
        children: Vec<Node<'s>>,
    ) -> String {
        self.render_stack.push(tag);
        let out = children.into_iter().map(|c| self.render(c)).collect();
        self.render_stack.pop();
        out
    }

    /// True when an ancestor element on the render stack has this tag.
    #[must_use]
    pub fn in_ancestor(&self, tag: &str) -> bool {
        self.render_stack.iter().any(|t| t == tag)
    }

    /// Typography is suppressed inside code-ish ancestors.
    pub(crate) fn in_preformatted(&self) -> bool {
        self.in_ancestor("code") || self.in_ancestor("pre")
    }
}
