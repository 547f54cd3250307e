//! Backtick code spans and the restricted code grammar.

use crate::ast::{Element, Node};
use crate::engine::context::Context;
use crate::engine::rule::Rule;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

use super::BracketSpec;

pub struct CodeSpanSpec;

impl BracketSpec for CodeSpanSpec {
    fn name(&self) -> &str {
        "code-span"
    }

    fn open_marker(&self) -> &'static str {
        "`"
    }

    fn close_marker(&self) -> &'static str {
        "`"
    }

    fn content_parser(&self) -> &'static str {
        "code"
    }

    fn wrap<'s>(&self, region: Region<'s>, children: Vec<Node<'s>>) -> Node<'s> {
        Node::Element(Element::new("code", region).with_children(children))
    }
}

/// A run of code content up to the next backslash escape; emitted
/// HTML-escaped with no markup expansion.
pub struct CodeRunRule;

impl Rule for CodeRunRule {
    fn name(&self) -> &str {
        "code-run"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        _ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        if cursor.at_end() || cursor.at_code(b'\\') {
            return Ok(None);
        }
        let start = cursor.pos();
        while let Some(b) = cursor.peek() {
            if b == b'\\' {
                break;
            }
            cursor.skip(1);
        }
        Ok(Some(Node::HtmlEscape {
            region: cursor.region().sub_region(start, cursor.pos()),
        }))
    }
}
