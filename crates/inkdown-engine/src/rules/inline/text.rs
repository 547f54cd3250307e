//! Plain text runs, backslash escapes, and the literal catch-all.

use crate::ast::Node;
use crate::engine::context::Context;
use crate::engine::rule::Rule;
use crate::error::EngineError;
use crate::source::Cursor;

/// Consumes a run of ordinary characters, stopping at anything another
/// inline rule might claim.
pub struct PlainTextRule;

impl Rule for PlainTextRule {
    fn name(&self) -> &str {
        "plain-text"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        _ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        let start = cursor.pos();
        while let Some(b) = cursor.peek() {
            let special = match b {
                b'\\' | b'_' | b'*' | b'~' | b'`' | b'[' | b'<' | b'&' => true,
                b'!' => cursor.peek_ahead(1) == Some(b'['),
                b'$' => cursor.peek_ahead(1) == Some(b'$'),
                b'%' => cursor.peek_ahead(1) == Some(b'%'),
                _ => false,
            };
            if special {
                break;
            }
            cursor.skip(1);
        }
        if cursor.pos() == start {
            return Ok(None);
        }
        Ok(Some(Node::Text {
            region: cursor.region().sub_region(start, cursor.pos()),
        }))
    }
}

/// `\X` emits `X` for ASCII punctuation; anything else leaves the backslash
/// to the literal rule.
pub struct EscapeRule;

impl Rule for EscapeRule {
    fn name(&self) -> &str {
        "escape"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        _ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        if !cursor.at_code(b'\\') {
            return Ok(None);
        }
        if !cursor
            .peek_ahead(1)
            .is_some_and(|b| b.is_ascii_punctuation())
        {
            return Ok(None);
        }
        let start = cursor.pos();
        cursor.skip(2);
        Ok(Some(Node::Text {
            region: cursor.region().sub_region(start + 1, start + 2),
        }))
    }
}

/// Single-character emitter; the unconditional end of every inline chain.
pub struct LiteralRule;

impl Rule for LiteralRule {
    fn name(&self) -> &str {
        "literal"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        _ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        if cursor.at_end() {
            return Ok(None);
        }
        let start = cursor.pos();
        cursor.skip_char();
        Ok(Some(Node::Text {
            region: cursor.region().sub_region(start, cursor.pos()),
        }))
    }
}
