//! Fatal, programmer-facing error kinds.
//!
//! Malformed input markup is never an error: it resolves through rule
//! non-match and fallback. The variants here all signal grammar-authoring
//! defects and abort the render call.

/// Raised by the parse engine when a grammar is defective.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A rule returned a node without advancing the cursor.
    #[error(
        "rule `{rule}` in parser `{parser}` produced a node without advancing at byte {pos}: {snippet:?}"
    )]
    InvalidRule {
        rule: String,
        parser: String,
        pos: usize,
        snippet: String,
    },

    /// No rule matched; the parser is missing a catch-all rule.
    #[error(
        "no rule matched in parser `{parser}` at byte {pos} (grammar needs a catch-all rule): {snippet:?}"
    )]
    NoRuleMatched {
        parser: String,
        pos: usize,
        snippet: String,
    },

    /// A delegate or sub-parse referenced a parser id that was never defined.
    #[error("no parser registered under id `{id}`")]
    UnknownParser { id: String },
}
