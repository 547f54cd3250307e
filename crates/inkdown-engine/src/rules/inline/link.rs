//! Links, media and the headless reference form.
//!
//! Link text may contain nested `![...]` media without closing early: a
//! nesting counter goes up on `![`, down on a matched `]`, and treats the
//! `][` idiom (media alt text flowing straight into its own ref-id bracket)
//! as a neutral pass-through. Backslash-escaped brackets never count.

use crate::ast::{Link, LinkTarget, Media, Node};
use crate::engine::context::Context;
use crate::engine::rule::Rule;
use crate::error::EngineError;
use crate::source::Cursor;

/// Find the `]` closing the bracket text the cursor is inside, honoring the
/// media nesting counter. Returns its region-relative index.
fn matching_close(cursor: &Cursor<'_>) -> Option<usize> {
    let bytes = cursor.region().raw().as_bytes();
    let mut i = cursor.pos();
    let mut depth = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'!' if bytes.get(i + 1) == Some(&b'[') => {
                depth += 1;
                i += 2;
            }
            b']' => {
                if depth == 0 {
                    return Some(i);
                }
                if bytes.get(i + 1) == Some(&b'[') {
                    // `][`: the media's own ref-id bracket opens as its alt
                    // text closes; net nesting is unchanged
                    i += 2;
                } else {
                    depth -= 1;
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// Parse the target following the closing bracket: `(href)` inline form or
/// `[id]` reference form. Records reference ids on the context.
fn parse_target(cursor: &mut Cursor<'_>, ctx: &mut Context) -> Option<LinkTarget> {
    match cursor.peek() {
        Some(b'(') => {
            cursor.skip(1);
            let end = cursor.index_of_escaped(")")?;
            let href = cursor
                .region()
                .substring(cursor.pos(), end)
                .trim()
                .to_owned();
            cursor.seek(end + 1);
            Some(LinkTarget::Inline { href })
        }
        Some(b'[') => {
            cursor.skip(1);
            let end = cursor.index_of_escaped("]")?;
            let id = cursor
                .region()
                .substring(cursor.pos(), end)
                .trim()
                .to_owned();
            if id.is_empty() {
                return None;
            }
            cursor.seek(end + 1);
            ctx.record_media_id(&id);
            Some(LinkTarget::Reference { id })
        }
        _ => None,
    }
}

/// `[text](href)` and `[text][id]`.
pub struct LinkRule;

impl Rule for LinkRule {
    fn name(&self) -> &str {
        "link"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        if !cursor.at_code(b'[') {
            return Ok(None);
        }
        let start = cursor.pos();
        cursor.skip(1);
        let text_start = cursor.pos();
        let Some(text_end) = matching_close(cursor) else {
            return Ok(None);
        };
        cursor.seek(text_end + 1);
        let Some(target) = parse_target(cursor, ctx) else {
            return Ok(None);
        };
        let text = cursor.region().sub_region(text_start, text_end);
        let children = ctx.parse("inline", &text)?.into_children();
        let region = cursor.region().sub_region(start, cursor.pos());
        Ok(Some(Node::Link(Link {
            region,
            target,
            children,
            headless: false,
        })))
    }
}

/// `![alt](href)` and `![alt][id]`. Alt text is never inline-parsed.
pub struct MediaRule;

impl Rule for MediaRule {
    fn name(&self) -> &str {
        "media"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        if !cursor.at("![") {
            return Ok(None);
        }
        let start = cursor.pos();
        cursor.skip(2);
        let alt_start = cursor.pos();
        let Some(alt_end) = matching_close(cursor) else {
            return Ok(None);
        };
        cursor.seek(alt_end + 1);
        let Some(target) = parse_target(cursor, ctx) else {
            return Ok(None);
        };
        let alt = cursor
            .region()
            .substring(alt_start, alt_end)
            .into_owned();
        let region = cursor.region().sub_region(start, cursor.pos());
        Ok(Some(Node::Media(Media { region, target, alt })))
    }
}

/// `[id]` with no text of its own; the resolved definition supplies the
/// label. Only identifier-shaped ids qualify, so ordinary bracketed prose
/// falls through to literal text.
pub struct HeadlessLinkRule;

impl Rule for HeadlessLinkRule {
    fn name(&self) -> &str {
        "headless-link"
    }

    fn try_parse<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        ctx: &mut Context,
    ) -> Result<Option<Node<'s>>, EngineError> {
        if !cursor.at_code(b'[') {
            return Ok(None);
        }
        let start = cursor.pos();
        cursor.skip(1);
        let id_start = cursor.pos();
        while cursor.at_identifier() {
            cursor.skip(1);
        }
        if cursor.pos() == id_start || !cursor.at_code(b']') {
            return Ok(None);
        }
        let id = cursor
            .region()
            .substring(id_start, cursor.pos())
            .into_owned();
        cursor.skip(1);
        ctx.record_media_id(&id);
        let region = cursor.region().sub_region(start, cursor.pos());
        Ok(Some(Node::Link(Link {
            region,
            target: LinkTarget::Reference { id },
            children: Vec::new(),
            headless: true,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Region;

    fn close_of(s: &str) -> Option<usize> {
        let region = Region::new(s);
        let mut c = Cursor::new(region);
        c.skip(1); // opening [
        matching_close(&c)
    }

    #[test]
    fn plain_text_closes_at_first_bracket() {
        assert_eq!(close_of("[hello] world"), Some(6));
    }

    #[test]
    fn nested_media_does_not_close_early() {
        // [see ![pic][img1] here]
        assert_eq!(close_of("[see ![pic][img1] here]"), Some(22));
    }

    #[test]
    fn escaped_brackets_are_inert() {
        assert_eq!(close_of(r"[a \] b]"), Some(7));
        assert_eq!(close_of(r"[a \]"), None);
    }

    #[test]
    fn unclosed_text_returns_none() {
        assert_eq!(close_of("[never ends"), None);
    }
}
