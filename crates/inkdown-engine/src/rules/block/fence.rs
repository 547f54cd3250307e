//! Fenced blocks: ``` code fences and ~~~ div fences.
//!
//! A fence only matches as a whole: a missing close marker fails the rule
//! entirely and the text falls through to the paragraph rule.

use crate::ast::{Element, Node, SelectorData};
use crate::engine::context::Context;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

use super::BlockScan;

const MIN_FENCE_LEN: usize = 3;

enum FenceBody {
    /// Content renders through the restricted code grammar.
    Code,
    /// Content re-parses as nested blocks.
    Blocks,
}

pub struct FenceScan {
    name: &'static str,
    marker: u8,
    body: FenceBody,
}

impl FenceScan {
    /// ``` fences producing `<pre><code>`.
    #[must_use]
    pub fn code() -> Self {
        Self {
            name: "code-block",
            marker: b'`',
            body: FenceBody::Code,
        }
    }

    /// ~~~ fences producing a block-parsed `<div>`.
    #[must_use]
    pub fn div() -> Self {
        Self {
            name: "div-block",
            marker: b'~',
            body: FenceBody::Blocks,
        }
    }

    /// Consume the opening marker run, returning it as a slice.
    fn open_run<'s>(&self, cursor: &mut Cursor<'s>) -> Option<&'s str> {
        cursor.skip_spaces();
        let run_start = cursor.pos();
        while cursor.at_code(self.marker) {
            cursor.skip(1);
        }
        let len = cursor.pos() - run_start;
        if len < MIN_FENCE_LEN {
            return None;
        }
        Some(&cursor.region().raw()[run_start..run_start + len])
    }
}

impl BlockScan for FenceScan {
    fn name(&self) -> &str {
        self.name
    }

    fn scan_block(&self, cursor: &mut Cursor<'_>, _indent: usize) -> Option<usize> {
        let fence = self.open_run(cursor)?;
        cursor.skip_to_eol();
        if !cursor.skip_new_line() {
            return None;
        }
        let close = cursor.index_of_escaped(fence)?;
        cursor.seek(close + fence.len());
        cursor.skip_to_eol();
        cursor.skip_new_line();
        Some(cursor.pos())
    }

    fn parse_sub_region<'s>(
        &self,
        region: &Region<'s>,
        selector: Option<SelectorData>,
        _indent: usize,
        ctx: &mut Context,
    ) -> Result<Node<'s>, EngineError> {
        let mut cursor = Cursor::new(region.clone());
        // scan_block validated the shape; re-walk to find the content span
        let fence = self.open_run(&mut cursor).unwrap_or_default();
        cursor.skip_to_eol();
        cursor.skip_new_line();
        let content_start = cursor.pos();
        let close = cursor.index_of_escaped(fence).unwrap_or(region.len());
        let content = region.sub_region(content_start, close);
        match self.body {
            FenceBody::Code => {
                let children = ctx.parse("code", &content)?.into_children();
                let code = Element::new("code", content).with_children(children);
                Ok(Node::Element(
                    Element::new("pre", region.clone())
                        .with_selector(selector)
                        .with_children(vec![Node::Element(code)]),
                ))
            }
            FenceBody::Blocks => {
                let children = ctx.parse("block", &content)?.into_children();
                Ok(Node::Element(
                    Element::new("div", region.clone())
                        .with_selector(selector)
                        .with_children(children),
                ))
            }
        }
    }
}
