//! Inline HTML passthrough: tags, comments, entities.
//!
//! Recognized spans are emitted verbatim. Entities passing through
//! untouched is what keeps escaping idempotent: `&amp;` stays `&amp;`
//! while a bare `&` falls to the literal rule and becomes `&amp;`.

use crate::ast::Node;
use crate::engine::context::Context;
use crate::engine::rule::Rule;
use crate::error::EngineError;
use crate::source::Cursor;

/// `<tag attr="...">`, `</tag>`, `<br/>` — one line only.
pub struct HtmlTagRule;

impl Rule for HtmlTagRule {
    fn name(&self) -> &str {
        "html-tag"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        _ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        if !cursor.at_code(b'<') {
            return Ok(None);
        }
        let start = cursor.pos();
        let mut probe = cursor.clone();
        probe.skip(1);
        if probe.at_code(b'/') {
            probe.skip(1);
        }
        if !probe.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            return Ok(None);
        }
        while probe.at_identifier() {
            probe.skip(1);
        }
        loop {
            match probe.peek() {
                None | Some(b'\n') | Some(b'<') => return Ok(None),
                Some(b'>') => break,
                _ => probe.skip(1),
            }
        }
        probe.skip(1);
        cursor.seek(probe.pos());
        Ok(Some(Node::Literal {
            region: cursor.region().sub_region(start, cursor.pos()),
        }))
    }
}

/// `<!-- ... -->`, possibly spanning lines within the enclosing block.
pub struct HtmlCommentRule;

impl Rule for HtmlCommentRule {
    fn name(&self) -> &str {
        "html-comment"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        _ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        if !cursor.at("<!--") {
            return Ok(None);
        }
        let start = cursor.pos();
        let end = cursor.lookahead(|p| {
            p.skip(4);
            p.index_of("-->")
        });
        let Some(end) = end else {
            return Ok(None);
        };
        cursor.seek(end + 3);
        Ok(Some(Node::Literal {
            region: cursor.region().sub_region(start, cursor.pos()),
        }))
    }
}

const MAX_ENTITY_NAME: usize = 32;

/// `&name;`, `&#10;`, `&#xAF;`.
pub struct EntityRule;

impl Rule for EntityRule {
    fn name(&self) -> &str {
        "entity"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        _ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        if !cursor.at_code(b'&') {
            return Ok(None);
        }
        let start = cursor.pos();
        let mut probe = cursor.clone();
        probe.skip(1);
        let mut len = 0;
        if probe.at_code(b'#') {
            probe.skip(1);
            let hex = matches!(probe.peek(), Some(b'x' | b'X'));
            if hex {
                probe.skip(1);
            }
            while probe.peek().is_some_and(|b| {
                if hex {
                    b.is_ascii_hexdigit()
                } else {
                    b.is_ascii_digit()
                }
            }) {
                probe.skip(1);
                len += 1;
            }
        } else {
            if !probe.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
                return Ok(None);
            }
            while probe.peek().is_some_and(|b| b.is_ascii_alphanumeric()) {
                probe.skip(1);
                len += 1;
            }
        }
        if len == 0 || len > MAX_ENTITY_NAME || !probe.at_code(b';') {
            return Ok(None);
        }
        probe.skip(1);
        cursor.seek(probe.pos());
        Ok(Some(Node::Literal {
            region: cursor.region().sub_region(start, cursor.pos()),
        }))
    }
}
