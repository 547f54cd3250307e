//! The reusable render entrypoint.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, error};

use crate::ast::Node;
use crate::engine::context::{Context, MediaDef, Transform};
use crate::engine::parser::Parser;
use crate::engine::rule::Rule;
use crate::error::EngineError;
use crate::options::Options;
use crate::source::Region;

type ParserFactory = Rc<dyn Fn(&Options) -> Vec<Box<dyn Rule>>>;
type Amendment = Rc<dyn Fn(&mut Parser)>;

/// Holds named parser factories, the main parser id and the transform list.
///
/// A processor carries no per-document state and is safely reusable across
/// `to_html` calls; each call builds a fresh [`Context`].
pub struct Processor {
    options: Options,
    factories: HashMap<String, ParserFactory>,
    amendments: Vec<(String, Amendment)>,
    transforms: Vec<Transform>,
    main: String,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    /// A processor with the default grammar and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    #[must_use]
    pub fn with_options(options: Options) -> Self {
        let mut processor = Self {
            options,
            factories: HashMap::new(),
            amendments: Vec::new(),
            transforms: Vec::new(),
            main: "block".to_owned(),
        };
        crate::rules::install_default_grammar(&mut processor);
        processor
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Register (or override) a named grammar.
    pub fn define_parser(
        &mut self,
        id: impl Into<String>,
        factory: impl Fn(&Options) -> Vec<Box<dyn Rule>> + 'static,
    ) {
        self.factories.insert(id.into(), Rc::new(factory));
    }

    /// Register a chain-surgery hook applied to the named parser each time a
    /// context is built (see [`Parser::insert_rule_before`] and friends).
    pub fn customize_parser(&mut self, id: impl Into<String>, edit: impl Fn(&mut Parser) + 'static) {
        self.amendments.push((id.into(), Rc::new(edit)));
    }

    /// Register an AST rewrite pass; passes run in registration order.
    pub fn transform(&mut self, f: impl for<'a> Fn(Node<'a>) -> Vec<Node<'a>> + 'static) {
        self.transforms.push(Rc::new(f));
    }

    /// Select the grammar used for whole documents. Defaults to `"block"`.
    pub fn main_parser(&mut self, id: impl Into<String>) {
        self.main = id.into();
    }

    /// Parse `source` into a [`Document`], leaving reference resolution to
    /// the embedder.
    pub fn parse<'s>(&self, source: &'s str) -> Result<Document<'s>, EngineError> {
        debug!(len = source.len(), main = %self.main, "parsing document");
        let mut parsers = HashMap::new();
        for (id, factory) in &self.factories {
            let mut parser = Parser::new(id.clone(), factory(&self.options));
            for (target, edit) in &self.amendments {
                if target == id {
                    edit(&mut parser);
                }
            }
            parsers.insert(id.clone(), Rc::new(parser));
        }
        let mut context = Context::new(
            self.options.clone(),
            parsers,
            Rc::new(self.transforms.clone()),
        );
        let region = Region::new(source);
        let root = match context.parse(&self.main, &region) {
            Ok(root) => root,
            Err(e) => {
                error!(error = %e, "grammar failure");
                return Err(e);
            }
        };
        Ok(Document { root, context })
    }

    /// One-shot convenience: parse and render without reference resolution.
    pub fn to_html(&self, source: &str) -> Result<String, EngineError> {
        Ok(self.parse(source)?.render())
    }
}

/// A parsed document awaiting resolution and rendering.
///
/// Reference-style ids collected during parsing are available through
/// [`Document::media_ids`]; the embedder resolves them with
/// [`Document::resolve`] before rendering. Unresolved ids render as empty
/// strings.
pub struct Document<'s> {
    root: Node<'s>,
    context: Context,
}

impl<'s> Document<'s> {
    #[must_use]
    pub fn root(&self) -> &Node<'s> {
        &self.root
    }

    #[must_use]
    pub fn media_ids(&self) -> &[String] {
        self.context.media_ids()
    }

    pub fn resolve(&mut self, id: impl Into<String>, def: MediaDef) {
        self.context.resolve(id, def);
    }

    /// Render to HTML, consuming the document.
    #[must_use]
    pub fn render(self) -> String {
        let Document { root, mut context } = self;
        context.render(root)
    }
}
