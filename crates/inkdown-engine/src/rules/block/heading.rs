//! ATX-style headings.

use crate::ast::{Element, Node, SelectorData};
use crate::engine::context::Context;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

use super::BlockScan;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// `#`-run headings; the run length fixes the output tag `h<level>`.
pub struct HeadingScan {
    min: usize,
    max: usize,
}

impl HeadingScan {
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min: min.clamp(1, HEADING_TAGS.len()),
            max: max.clamp(1, HEADING_TAGS.len()),
        }
    }

    fn level(&self, cursor: &mut Cursor<'_>) -> Option<usize> {
        cursor.skip_spaces();
        let mut level = 0;
        while cursor.at_code(b'#') {
            cursor.skip(1);
            level += 1;
        }
        if level < self.min || level > self.max {
            return None;
        }
        // a heading marker requires a following space
        if !cursor.at_code(b' ') {
            return None;
        }
        cursor.skip(1);
        Some(level)
    }
}

impl BlockScan for HeadingScan {
    fn name(&self) -> &str {
        "heading"
    }

    fn scan_block(&self, cursor: &mut Cursor<'_>, _indent: usize) -> Option<usize> {
        self.level(cursor)?;
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
        // scan_block already validated the marker
        let level = self.level(&mut cursor).unwrap_or(self.min);
        let content = region
            .sub_region(cursor.pos(), region.len())
            .trim_end_whitespace();
        let children = ctx.parse("inline", &content)?.into_children();
        Ok(Node::Element(
            Element::new(HEADING_TAGS[level - 1], region.clone())
                .with_selector(selector)
                .with_children(children),
        ))
    }
}
