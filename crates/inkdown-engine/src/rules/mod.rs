//! Concrete grammar rules and the default parser registry.

pub mod block;
pub mod inline;

use crate::engine::rule::{DelegateRule, Rule};
use crate::engine::Processor;
use crate::options::Options;

use block::fence::FenceScan;
use block::heading::HeadingScan;
use block::html_block::HtmlBlockScan;
use block::list::ListScan;
use block::paragraph::ParagraphScan;
use block::{BlankLinesRule, BlockRule};
use inline::code_span::{CodeRunRule, CodeSpanSpec};
use inline::emphasis::EmphasisSpec;
use inline::formula::{FormulaRunRule, FormulaSpec};
use inline::html::{EntityRule, HtmlCommentRule, HtmlTagRule};
use inline::link::{HeadlessLinkRule, LinkRule, MediaRule};
use inline::text::{EscapeRule, LiteralRule, PlainTextRule};
use inline::BracketRule;

pub(crate) fn install_default_grammar(processor: &mut Processor) {
    processor.define_parser("block", block_rules);
    processor.define_parser("inline", inline_rules);
    processor.define_parser("code", code_rules);
    processor.define_parser("formula", formula_rules);
    processor.define_parser("list-item", list_item_rules);
}

/// Block grammar, in priority order. Paragraph is the structural catch-all;
/// the blank-lines rule consumes whitespace-only remainders.
pub fn block_rules(_options: &Options) -> Vec<Box<dyn Rule>> {
    vec![
        BlockRule::boxed(FenceScan::code()),
        BlockRule::boxed(FenceScan::div()),
        BlockRule::boxed(HtmlBlockScan),
        BlockRule::boxed(HeadingScan::new(1, 6)),
        BlockRule::boxed(ListScan::bullets()),
        BlockRule::boxed(ListScan::numbered()),
        BlockRule::boxed(ParagraphScan),
        Box::new(BlankLinesRule),
    ]
}

/// Inline grammar. Ends with the single-character literal emitter so any
/// stray marker falls through to text instead of disappearing.
pub fn inline_rules(_options: &Options) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(EscapeRule),
        Box::new(HtmlCommentRule),
        Box::new(HtmlTagRule),
        Box::new(EntityRule),
        BracketRule::boxed(CodeSpanSpec),
        BracketRule::boxed(FormulaSpec::dollars()),
        BracketRule::boxed(FormulaSpec::percents()),
        Box::new(MediaRule),
        Box::new(LinkRule),
        Box::new(HeadlessLinkRule),
        BracketRule::boxed(EmphasisSpec::strong()),
        BracketRule::boxed(EmphasisSpec::em()),
        BracketRule::boxed(EmphasisSpec::strike()),
        Box::new(PlainTextRule),
        Box::new(LiteralRule),
    ]
}

/// Restricted grammar for code spans and fenced code: backslash escapes are
/// honored, everything else is emitted HTML-escaped with no further markup
/// expansion.
pub fn code_rules(_options: &Options) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(EscapeRule),
        Box::new(CodeRunRule),
        Box::new(LiteralRule),
    ]
}

/// Formula grammar: `&<>` are escaped, backslashes stay verbatim so MathJax
/// sees its own commands.
pub fn formula_rules(_options: &Options) -> Vec<Box<dyn Rule>> {
    vec![Box::new(FormulaRunRule)]
}

/// Items of block-mode lists delegate back to the block grammar; this
/// string-keyed indirection is what lets block-in-list-in-block recurse.
pub fn list_item_rules(_options: &Options) -> Vec<Box<dyn Rule>> {
    vec![Box::new(DelegateRule::new("list-item", "block"))]
}
