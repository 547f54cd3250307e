//! `$$formula$$` / `%%formula%%` spans.
//!
//! Formula content escapes only `&<>` and leaves backslashes verbatim so
//! MathJax still recognizes its commands; the delimiters are preserved in
//! the output for the client-side typesetter to find.

use crate::ast::Node;
use crate::engine::context::Context;
use crate::engine::rule::Rule;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

use super::BracketSpec;

pub struct FormulaSpec {
    marker: &'static str,
}

impl FormulaSpec {
    #[must_use]
    pub fn dollars() -> Self {
        Self { marker: "$$" }
    }

    #[must_use]
    pub fn percents() -> Self {
        Self { marker: "%%" }
    }
}

impl BracketSpec for FormulaSpec {
    fn name(&self) -> &str {
        "formula"
    }

    fn open_marker(&self) -> &'static str {
        self.marker
    }

    fn close_marker(&self) -> &'static str {
        self.marker
    }

    fn content_parser(&self) -> &'static str {
        "formula"
    }

    fn wrap<'s>(&self, region: Region<'s>, children: Vec<Node<'s>>) -> Node<'s> {
        Node::Formula {
            region,
            marker: self.marker,
            children,
        }
    }
}

/// Consumes the whole formula span in one go.
pub struct FormulaRunRule;

impl Rule for FormulaRunRule {
    fn name(&self) -> &str {
        "formula-run"
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
        let len = cursor.region().len();
        cursor.seek(len);
        Ok(Some(Node::HtmlEscape {
            region: cursor.region().sub_region(start, cursor.pos()),
        }))
    }
}
