//! Paired-marker inline constructs.
//!
//! [`BracketRule`] carries the shared template: require the cursor at the
//! open marker, locate the unescaped close marker, delegate the enclosed
//! span to a construct-specific sub-parser. A missing close marker means
//! the rule does not match at all — the open marker is left for the
//! plain-text/literal fallback instead of being silently consumed.

pub mod code_span;
pub mod emphasis;
pub mod formula;
pub mod html;
pub mod link;
pub mod text;

use crate::ast::Node;
use crate::engine::context::Context;
use crate::engine::rule::Rule;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

/// Hooks for one paired-marker construct.
pub trait BracketSpec {
    fn name(&self) -> &str;
    fn open_marker(&self) -> &'static str;
    fn close_marker(&self) -> &'static str;
    /// Id of the parser the enclosed span is delegated to.
    fn content_parser(&self) -> &'static str;
    fn wrap<'s>(&self, region: Region<'s>, children: Vec<Node<'s>>) -> Node<'s>;
}

pub struct BracketRule<B> {
    spec: B,
}

impl<B: BracketSpec + 'static> BracketRule<B> {
    pub fn boxed(spec: B) -> Box<dyn Rule> {
        Box::new(Self { spec })
    }
}

impl<B: BracketSpec> Rule for BracketRule<B> {
    fn name(&self) -> &str {
        self.spec.name()
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        let open = self.spec.open_marker();
        if !cursor.at(open) {
            return Ok(None);
        }
        let start = cursor.pos();
        cursor.skip(open.len());
        let Some(close) = cursor.index_of_escaped(self.spec.close_marker()) else {
            // unmatched: the parser restores the position, so not even the
            // open marker is consumed
            return Ok(None);
        };
        let inner = cursor.region().sub_region(cursor.pos(), close);
        let children = ctx.parse(self.spec.content_parser(), &inner)?.into_children();
        cursor.seek(close + self.spec.close_marker().len());
        let region = cursor.region().sub_region(start, cursor.pos());
        Ok(Some(self.spec.wrap(region, children)))
    }
}
