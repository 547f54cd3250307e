//! Raw HTML blocks.
//!
//! An opening tag at line start swallows everything up to a same-name
//! closing tag at the same indentation followed by end-of-block. Content is
//! opaque: no inline processing, no selector capture.

use crate::ast::{Node, SelectorData};
use crate::engine::context::Context;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

use super::BlockScan;

pub struct HtmlBlockScan;

impl BlockScan for HtmlBlockScan {
    fn name(&self) -> &str {
        "html-block"
    }

    fn captures_selector(&self) -> bool {
        false
    }

    fn scan_block(&self, cursor: &mut Cursor<'_>, indent: usize) -> Option<usize> {
        cursor.skip_spaces();
        if !cursor.at_code(b'<') {
            return None;
        }
        cursor.skip(1);
        if !cursor.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        let name_start = cursor.pos();
        while cursor.at_identifier() {
            cursor.skip(1);
        }
        let name = &cursor.region().raw()[name_start..cursor.pos()];
        let opens = cursor.lookahead(|p| loop {
            match p.peek() {
                None | Some(b'\n') => return false,
                Some(b'>') => return true,
                _ => p.skip(1),
            }
        });
        if !opens {
            return None;
        }
        loop {
            cursor.skip_to_eol();
            if !cursor.skip_new_line() {
                // ran out of input without a closing tag
                return None;
            }
            if let Some(end) = close_at_line(cursor, name, indent) {
                return Some(end);
            }
        }
    }

    fn parse_sub_region<'s>(
        &self,
        region: &Region<'s>,
        _selector: Option<SelectorData>,
        _indent: usize,
        _ctx: &mut Context,
    ) -> Result<Node<'s>, EngineError> {
        Ok(Node::Literal {
            region: region.clone(),
        })
    }
}

/// Check whether the line at the cursor is `</name>` at exactly `indent`
/// columns, followed by end-of-block. Returns the block end position.
fn close_at_line(cursor: &Cursor<'_>, name: &str, indent: usize) -> Option<usize> {
    cursor.lookahead(|p| {
        if p.skip_spaces() != indent {
            return None;
        }
        if !p.at("</") {
            return None;
        }
        p.skip(2);
        if !p.at(name) {
            return None;
        }
        p.skip(name.len());
        if !p.at_code(b'>') {
            return None;
        }
        p.skip(1);
        p.skip_spaces();
        if p.at_end() {
            return Some(p.pos());
        }
        if !p.at_new_line() {
            return None;
        }
        p.skip_new_line();
        let blank = p.lookahead(|after| {
            after.skip_spaces();
            after.at_new_line() || after.at_end()
        });
        if blank { Some(p.pos()) } else { None }
    })
}
