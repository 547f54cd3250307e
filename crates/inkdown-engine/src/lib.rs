//! Rule-based recursive-descent markup parser and HTML renderer.
//!
//! A [`Processor`] holds named grammars (ordered rule lists) and a transform
//! pipeline; each `to_html` call builds a fresh [`engine::Context`], parses
//! the source into a node tree over zero-copy [`source::Region`] views, and
//! renders it. Embedders resolve reference-style link/media ids between
//! parse and render through the two-phase [`engine::Document`] API.
//!
//! ```
//! use inkdown_engine::Processor;
//!
//! let html = Processor::new().to_html("Hello *world*!").unwrap();
//! assert_eq!(html, "<p>Hello <strong>world</strong>!</p>");
//! ```

pub mod ast;
pub mod engine;
pub mod error;
pub mod options;
pub mod rules;
pub mod source;

// Re-export key types for easier usage
pub use ast::{Element, Link, LinkTarget, Media, Node, SelectorData};
pub use engine::{Context, DelegateRule, Document, MediaDef, Parser, Processor, Rule, Transform};
pub use error::EngineError;
pub use options::Options;
pub use source::{Cursor, Region, Span};
