//! The grammar-alternative contract.

use crate::ast::Node;
use crate::engine::context::Context;
use crate::error::EngineError;
use crate::source::Cursor;

/// One grammar alternative.
///
/// A rule is a pure mapping from cursor position to an optional node.
/// Returning `Some` requires the cursor to have strictly advanced; on `None`
/// the enclosing [`Parser`](crate::engine::Parser) restores the entry
/// position, so rule bodies are free to scan ahead and bail.
pub trait Rule {
    /// Identity used in diagnostics and chain-surgery predicates.
    fn name(&self) -> &str;

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError>;
}

/// Forwards a single pass to a differently-named parser.
///
/// This is the indirection that lets mutually recursive grammars compose:
/// a list item delegates to the block parser, which may contain another
/// list, without any type-level recursion. Targets resolve through the
/// [`Context`] registry by id at parse time.
pub struct DelegateRule {
    name: String,
    target: String,
}

impl DelegateRule {
    #[must_use]
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }
}

impl Rule for DelegateRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        let parser = ctx.parser(&self.target)?;
        parser.parse_single_pass(cursor, ctx).map(Some)
    }
}
