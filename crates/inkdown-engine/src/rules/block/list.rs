//! Lists: sibling/continuation scanning and the once-per-list mode decision.
//!
//! `scan_block` extends past the first item while each following non-blank
//! line either restates the marker at the same indent (sibling) or is
//! indented further (continuation). The split into items happens in
//! `parse_sub_region`, followed by one global decision: if any item
//! contains an internal blank line, every item parses through the block
//! grammar; otherwise every item is terse (inline content only). The
//! uniformity is deliberate — mode is decided per list, never per item.

use crate::ast::{Element, Node, SelectorData};
use crate::engine::context::Context;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

use super::BlockScan;

/// Marker recognition hooks; sibling/continuation detection is otherwise
/// marker-agnostic.
pub trait ListMarker {
    fn rule_name(&self) -> &'static str;
    fn tag(&self) -> &'static str;
    fn is_at_marker(&self, cursor: &Cursor<'_>) -> bool;
    fn skip_marker(&self, cursor: &mut Cursor<'_>);
}

/// `* ` and `- ` bullets.
pub struct Bullets;

impl ListMarker for Bullets {
    fn rule_name(&self) -> &'static str {
        "list"
    }

    fn tag(&self) -> &'static str {
        "ul"
    }

    fn is_at_marker(&self, cursor: &Cursor<'_>) -> bool {
        matches!(cursor.peek(), Some(b'*' | b'-')) && cursor.peek_ahead(1) == Some(b' ')
    }

    fn skip_marker(&self, cursor: &mut Cursor<'_>) {
        cursor.skip(2);
    }
}

/// Variable-width `12. ` markers.
pub struct Numbered;

impl Numbered {
    fn digits(cursor: &Cursor<'_>) -> usize {
        let mut n = 0;
        while cursor.peek_ahead(n).is_some_and(|b| b.is_ascii_digit()) {
            n += 1;
        }
        n
    }
}

impl ListMarker for Numbered {
    fn rule_name(&self) -> &'static str {
        "numbered-list"
    }

    fn tag(&self) -> &'static str {
        "ol"
    }

    fn is_at_marker(&self, cursor: &Cursor<'_>) -> bool {
        let n = Self::digits(cursor);
        n > 0 && cursor.peek_ahead(n) == Some(b'.') && cursor.peek_ahead(n + 1) == Some(b' ')
    }

    fn skip_marker(&self, cursor: &mut Cursor<'_>) {
        let n = Self::digits(cursor);
        cursor.skip(n + 2);
    }
}

pub struct ListScan<M: ListMarker> {
    marker: M,
}

impl ListScan<Bullets> {
    #[must_use]
    pub fn bullets() -> Self {
        Self { marker: Bullets }
    }
}

impl ListScan<Numbered> {
    #[must_use]
    pub fn numbered() -> Self {
        Self { marker: Numbered }
    }
}

impl<M: ListMarker> BlockScan for ListScan<M> {
    fn name(&self) -> &str {
        self.marker.rule_name()
    }

    fn allows_adjacent_selectors(&self) -> bool {
        true
    }

    fn scan_block(&self, cursor: &mut Cursor<'_>, indent: usize) -> Option<usize> {
        cursor.skip_spaces();
        if !self.marker.is_at_marker(cursor) {
            return None;
        }
        cursor.skip_to_eol();
        let mut end = cursor.pos();
        loop {
            if !cursor.skip_new_line() {
                break;
            }
            let blank_here = cursor.lookahead(|p| {
                p.skip_spaces();
                p.at_new_line() || p.at_end()
            });
            if blank_here {
                // a blank gap keeps the list alive only when a sibling or a
                // deeper-indented line follows
                let mut probe = cursor.clone();
                probe.skip_blank_lines();
                if probe.at_end() {
                    break;
                }
                let continues = probe.lookahead(|p| {
                    let cols = p.skip_spaces();
                    cols > indent || (cols == indent && self.marker.is_at_marker(p))
                });
                if !continues {
                    break;
                }
                *cursor = probe;
            }
            let (cols, sibling) = cursor.lookahead(|p| {
                let cols = p.skip_spaces();
                (cols, self.marker.is_at_marker(p))
            });
            if (cols == indent && sibling) || cols > indent {
                cursor.skip_to_eol();
                end = cursor.pos();
            } else {
                break;
            }
        }
        Some(end)
    }

    fn parse_sub_region<'s>(
        &self,
        region: &Region<'s>,
        selector: Option<SelectorData>,
        indent: usize,
        ctx: &mut Context,
    ) -> Result<Node<'s>, EngineError> {
        // re-walk the region, splitting at each same-indent marker line
        let mut cursor = Cursor::new(region.clone());
        let mut items: Vec<(usize, usize)> = Vec::new();
        loop {
            let line_start = cursor.pos();
            let (cols, at_marker) = cursor.lookahead(|p| {
                let cols = p.skip_spaces();
                (cols, self.marker.is_at_marker(p))
            });
            if cols == indent && at_marker {
                if let Some(last) = items.last_mut() {
                    last.1 = line_start;
                }
                cursor.skip_spaces();
                self.marker.skip_marker(&mut cursor);
                items.push((cursor.pos(), region.len()));
            }
            cursor.skip_to_eol();
            if !cursor.skip_new_line() || cursor.at_end() {
                break;
            }
        }

        let raw = region.raw();
        let block_mode = items
            .iter()
            .any(|&(start, end)| contains_blank_line(&raw[start..end]));

        let mut li_nodes = Vec::with_capacity(items.len());
        for &(start, end) in &items {
            let item = region.sub_region(start, end).trim_end_whitespace();
            let children = if block_mode {
                ctx.parse("list-item", &item)?.into_children()
            } else {
                ctx.parse("inline", &item.trim_start_spaces())?.into_children()
            };
            li_nodes.push(Node::Element(
                Element::new("li", region.sub_region(start, end)).with_children(children),
            ));
        }
        Ok(Node::Element(
            Element::new(self.marker.tag(), region.clone())
                .with_selector(selector)
                .with_children(li_nodes),
        ))
    }
}

/// An interior blank line: two line breaks with only spaces between. A
/// trailing break at the very end of an item does not count.
fn contains_blank_line(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\n' {
            let mut j = i + 1;
            while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'\n' {
                return true;
            }
        }
        i += 1;
    }
    false
}
