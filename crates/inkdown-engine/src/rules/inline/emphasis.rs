//! `_em_`, `*strong*` and `~strike~`.

use crate::ast::{Element, Node};
use crate::source::Region;

use super::BracketSpec;

pub struct EmphasisSpec {
    name: &'static str,
    marker: &'static str,
    tag: &'static str,
}

impl EmphasisSpec {
    #[must_use]
    pub fn em() -> Self {
        Self {
            name: "em",
            marker: "_",
            tag: "em",
        }
    }

    #[must_use]
    pub fn strong() -> Self {
        Self {
            name: "strong",
            marker: "*",
            tag: "strong",
        }
    }

    #[must_use]
    pub fn strike() -> Self {
        Self {
            name: "strike",
            marker: "~",
            tag: "s",
        }
    }
}

impl BracketSpec for EmphasisSpec {
    fn name(&self) -> &str {
        self.name
    }

    fn open_marker(&self) -> &'static str {
        self.marker
    }

    fn close_marker(&self) -> &'static str {
        self.marker
    }

    fn content_parser(&self) -> &'static str {
        "inline"
    }

    fn wrap<'s>(&self, region: Region<'s>, children: Vec<Node<'s>>) -> Node<'s> {
        Node::Element(Element::new(self.tag, region).with_children(children))
    }
}
