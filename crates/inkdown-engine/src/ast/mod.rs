pub mod node;
pub mod render;

pub use node::{Element, Link, LinkTarget, Media, Node, SelectorData};
