//! Structural block scanning.
//!
//! [`BlockRule`] carries the shared template: skip blank lines, measure
//! indentation, let the concrete scan find the block's extent on a clone,
//! advance the real cursor, capture a trailing selector on the first line,
//! taint it out, and hand the trimmed region to the concrete sub-parse.

pub mod fence;
pub mod heading;
pub mod html_block;
pub mod list;
pub mod paragraph;

use crate::ast::{Node, SelectorData};
use crate::engine::context::Context;
use crate::engine::rule::Rule;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

/// Cap on how far into the first line a selector is searched. Keeps cost
/// bounded on long soft-wrapped lines.
const SELECTOR_LOOKAHEAD: usize = 120;

/// Hooks for one concrete block construct.
pub trait BlockScan {
    fn name(&self) -> &str;

    /// Scan from a clone positioned at the first non-blank line and return
    /// the region-relative end of the whole block, or `None` when the
    /// construct does not match. `indent` is the column width of the first
    /// line's leading whitespace (tab = 4).
    fn scan_block(&self, cursor: &mut Cursor<'_>, indent: usize) -> Option<usize>;

    /// Build the node for a scanned block. `region` is trimmed of trailing
    /// whitespace and already has any captured selector tainted out.
    fn parse_sub_region<'s>(
        &self,
        region: &Region<'s>,
        selector: Option<SelectorData>,
        indent: usize,
        ctx: &mut Context,
    ) -> Result<Node<'s>, EngineError>;

    /// Whether the first line may carry a chain of adjacent `{..}{..}`
    /// selectors (lists).
    fn allows_adjacent_selectors(&self) -> bool {
        false
    }

    /// HTML blocks are opaque and never capture selectors.
    fn captures_selector(&self) -> bool {
        true
    }
}

/// Adapter turning a [`BlockScan`] into a [`Rule`] via the shared template.
pub struct BlockRule<S> {
    scan: S,
}

impl<S: BlockScan + 'static> BlockRule<S> {
    pub fn boxed(scan: S) -> Box<dyn Rule> {
        Box::new(Self { scan })
    }
}

impl<S: BlockScan> Rule for BlockRule<S> {
    fn name(&self) -> &str {
        self.scan.name()
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        cursor.skip_blank_lines();
        if cursor.at_end() {
            return Ok(None);
        }
        let indent = cursor.lookahead(|c| c.skip_spaces());
        let start = cursor.pos();
        let end = {
            let mut probe = cursor.clone();
            match self.scan.scan_block(&mut probe, indent) {
                Some(end) => end,
                None => return Ok(None),
            }
        };
        cursor.seek(end);
        let mut block = cursor.region().sub_region(start, end);
        let selector = if self.scan.captures_selector() {
            capture_selectors(&mut block, self.scan.allows_adjacent_selectors())
        } else {
            None
        };
        let body = block.trim_end_whitespace();
        let node = self.scan.parse_sub_region(&body, selector, indent, ctx)?;
        Ok(Some(node))
    }
}

/// Consumes a whitespace-only remainder so trailing vertical space never
/// reaches the no-rule-matched fatal.
pub struct BlankLinesRule;

impl Rule for BlankLinesRule {
    fn name(&self) -> &str {
        "blank-lines"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        _ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        let start = cursor.pos();
        cursor.skip_whitespaces();
        if cursor.pos() == start || !cursor.at_end() {
            return Ok(None);
        }
        Ok(Some(Node::Literal {
            region: cursor.region().sub_region(start, start),
        }))
    }
}

/// Search the first line of `block` for a trailing `{#id.class}` selector
/// chain. On capture the span (plus surrounding spaces) is tainted out of
/// the block and the merged id/class data is returned.
fn capture_selectors(block: &mut Region<'_>, allow_adjacent: bool) -> Option<SelectorData> {
    let raw = block.raw();
    let bytes = raw.as_bytes();
    let line_end = raw.find('\n').unwrap_or(raw.len());
    let cap = line_end.min(SELECTOR_LOOKAHEAD);
    let mut i = 0;
    while i < cap {
        match bytes[i] {
            b'\\' => i += 2,
            b'{' => {
                if let Some((data, end)) = parse_selector_chain(raw, i, line_end, allow_adjacent) {
                    let mut from = i;
                    while from > 0 && (bytes[from - 1] == b' ' || bytes[from - 1] == b'\t') {
                        from -= 1;
                    }
                    *block = block.taint(from, end);
                    return Some(data);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

/// Parse one-or-more adjacent `{...}` selectors starting at `at`, requiring
/// the chain to be followed (modulo spaces) by end-of-line/input. Returns
/// the merged data and the end of the span to taint.
fn parse_selector_chain(
    raw: &str,
    at: usize,
    line_end: usize,
    allow_adjacent: bool,
) -> Option<(SelectorData, usize)> {
    let bytes = raw.as_bytes();
    let mut data = SelectorData::default();
    let mut i = at;
    loop {
        i = parse_one_selector(raw, i, line_end, &mut data)?;
        if allow_adjacent && i < line_end && bytes[i] == b'{' {
            continue;
        }
        break;
    }
    let mut j = i;
    while j < line_end && (bytes[j] == b' ' || bytes[j] == b'\t') {
        j += 1;
    }
    if j == line_end { Some((data, j)) } else { None }
}

/// Parse a single `{#id.class...}` starting at `at`; returns the index just
/// past the closing brace. At least one component is required.
fn parse_one_selector(
    raw: &str,
    at: usize,
    line_end: usize,
    data: &mut SelectorData,
) -> Option<usize> {
    let bytes = raw.as_bytes();
    let mut i = at + 1;
    let mut any = false;
    if i < line_end && bytes[i] == b'#' {
        i += 1;
        let s = i;
        while i < line_end && is_selector_ident(bytes[i]) {
            i += 1;
        }
        if i == s {
            return None;
        }
        if data.id.is_none() {
            data.id = Some(raw[s..i].to_owned());
        }
        any = true;
    }
    while i < line_end && bytes[i] == b'.' {
        i += 1;
        let s = i;
        while i < line_end && is_selector_ident(bytes[i]) {
            i += 1;
        }
        if i == s {
            return None;
        }
        data.classes.push(raw[s..i].to_owned());
        any = true;
    }
    if any && i < line_end && bytes[i] == b'}' {
        Some(i + 1)
    } else {
        None
    }
}

fn is_selector_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn captures_id_and_classes() {
        let mut block = Region::new("# Heading {#top.big}\n");
        let sel = capture_selectors(&mut block, false).unwrap();
        assert_eq!(sel.id.as_deref(), Some("top"));
        assert_eq!(sel.classes, vec!["big".to_owned()]);
        assert_eq!(block.to_cow(), "# Heading\n");
    }

    #[test]
    fn selector_must_sit_at_end_of_line() {
        let mut block = Region::new("text {#id} more\n");
        assert!(capture_selectors(&mut block, false).is_none());
        assert!(!block.is_tainted());
    }

    #[test]
    fn escaped_brace_is_not_a_selector() {
        let mut block = Region::new("text \\{#id}\n");
        assert!(capture_selectors(&mut block, false).is_none());
    }

    #[test]
    fn empty_braces_are_plain_text() {
        let mut block = Region::new("text {}\n");
        assert!(capture_selectors(&mut block, false).is_none());
    }

    #[test]
    fn adjacent_selectors_merge_when_allowed() {
        let mut block = Region::new("* item {#a.x}{.y}\n* two\n");
        let sel = capture_selectors(&mut block, true).unwrap();
        assert_eq!(sel.id.as_deref(), Some("a"));
        assert_eq!(sel.classes, vec!["x".to_owned(), "y".to_owned()]);
        assert_eq!(block.to_cow(), "* item\n* two\n");
    }

    #[test]
    fn adjacent_selectors_rejected_when_not_allowed() {
        let mut block = Region::new("text {#a}{.y}\n");
        assert!(capture_selectors(&mut block, false).is_none());
    }

    #[test]
    fn selector_beyond_lookahead_cap_is_ignored() {
        let mut line = "x".repeat(130);
        line.push_str(" {#id}\n");
        let mut block = Region::new(&line);
        assert!(capture_selectors(&mut block, false).is_none());
    }

    #[test]
    fn selector_only_on_first_line() {
        let mut block = Region::new("first\nsecond {#id}\n");
        assert!(capture_selectors(&mut block, false).is_none());
    }

    #[test]
    fn trailing_spaces_after_selector_are_tolerated_and_tainted() {
        let mut block = Region::new("text {.x}  \nrest");
        let sel = capture_selectors(&mut block, false).unwrap();
        assert_eq!(sel.classes, vec!["x".to_owned()]);
        assert_eq!(block.to_cow(), "text\nrest");
    }
}
