//! Paragraphs: the structural catch-all for any non-blank content.

use crate::ast::{Element, Node, SelectorData};
use crate::engine::context::Context;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

use super::BlockScan;

pub struct ParagraphScan;

impl BlockScan for ParagraphScan {
    fn name(&self) -> &str {
        "paragraph"
    }

    fn scan_block(&self, cursor: &mut Cursor<'_>, _indent: usize) -> Option<usize> {
        if cursor.at_end() {
            return None;
        }
        cursor.skip_to_end_of_block();
        Some(cursor.pos())
    }

    fn parse_sub_region<'s>(
        &self,
        region: &Region<'s>,
        selector: Option<SelectorData>,
        _indent: usize,
        ctx: &mut Context,
    ) -> Result<Node<'s>, EngineError> {
        let content = region.trim_start_spaces();
        let children = ctx.parse("inline", &content)?.into_children();
        Ok(Node::Element(
            Element::new("p", region.clone())
                .with_selector(selector)
                .with_children(children),
        ))
    }
}
