//! Ordered rule sets and the enforced execution contract.

use tracing::trace;

use crate::ast::Node;
use crate::engine::context::Context;
use crate::engine::rule::Rule;
use crate::error::EngineError;
use crate::source::{Cursor, Region};

/// An ordered set of rules forming one named grammar.
pub struct Parser {
    name: String,
    rules: Vec<Box<dyn Rule>>,
}

impl Parser {
    #[must_use]
    pub fn new(name: impl Into<String>, rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Try rules in order, first match wins.
    ///
    /// The advance/restore contract is enforced here: a rule that returns
    /// `None` has its position reset, and a rule that returns a node without
    /// advancing is a fatal grammar defect. So is running out of rules —
    /// every parser must end with a catch-all.
    pub fn parse_single_pass<'s>(
        &self,
        cursor: &mut Cursor<'s>,
        ctx: &mut Context,
    ) -> Result<Node<'s>, EngineError> {
        let entry = cursor.pos();
        for rule in &self.rules {
            match rule.try_parse(cursor, ctx)? {
                Some(node) => {
                    if cursor.pos() <= entry {
                        return Err(EngineError::InvalidRule {
                            rule: rule.name().to_owned(),
                            parser: self.name.clone(),
                            pos: entry,
                            snippet: snippet(cursor, entry),
                        });
                    }
                    trace!(parser = %self.name, rule = rule.name(), pos = entry, "rule matched");
                    return Ok(node);
                }
                None => cursor.seek(entry),
            }
        }
        Err(EngineError::NoRuleMatched {
            parser: self.name.clone(),
            pos: entry,
            snippet: snippet(cursor, entry),
        })
    }

    /// Repeat single passes until the region is exhausted, wrapping results
    /// in a synthetic root node. Tainted sub-ranges are excluded by parsing
    /// each maximal plain piece on its own cursor.
    pub fn parse<'s>(
        &self,
        region: &Region<'s>,
        ctx: &mut Context,
    ) -> Result<Node<'s>, EngineError> {
        let mut children = Vec::new();
        for piece in region.untaint() {
            let mut cursor = Cursor::new(piece);
            while !cursor.at_end() {
                children.push(self.parse_single_pass(&mut cursor, ctx)?);
            }
        }
        Ok(Node::Root {
            region: region.clone(),
            children,
        })
    }

    /// Rule names in priority order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    fn position(&self, matches: &dyn Fn(&dyn Rule) -> bool) -> Option<usize> {
        self.rules.iter().position(|r| matches(r.as_ref()))
    }

    /// Insert `rule` before the first rule matching the predicate. Returns
    /// false (leaving the chain unchanged) when nothing matches.
    pub fn insert_rule_before(
        &mut self,
        matches: impl Fn(&dyn Rule) -> bool,
        rule: Box<dyn Rule>,
    ) -> bool {
        match self.position(&matches) {
            Some(i) => {
                self.rules.insert(i, rule);
                true
            }
            None => false,
        }
    }

    pub fn insert_rule_after(
        &mut self,
        matches: impl Fn(&dyn Rule) -> bool,
        rule: Box<dyn Rule>,
    ) -> bool {
        match self.position(&matches) {
            Some(i) => {
                self.rules.insert(i + 1, rule);
                true
            }
            None => false,
        }
    }

    pub fn replace_rule(
        &mut self,
        matches: impl Fn(&dyn Rule) -> bool,
        rule: Box<dyn Rule>,
    ) -> bool {
        match self.position(&matches) {
            Some(i) => {
                self.rules[i] = rule;
                true
            }
            None => false,
        }
    }

    pub fn remove_rule(&mut self, matches: impl Fn(&dyn Rule) -> bool) -> bool {
        match self.position(&matches) {
            Some(i) => {
                self.rules.remove(i);
                true
            }
            None => false,
        }
    }
}

fn snippet(cursor: &Cursor<'_>, pos: usize) -> String {
    cursor.region().raw()[pos..].chars().take(32).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::options::Options;

    fn ctx() -> Context {
        Context::new(Options::default(), HashMap::new(), Rc::new(Vec::new()))
    }

    /// Consumes one character and emits it as text.
    struct CharRule;

    impl Rule for CharRule {
        fn name(&self) -> &str {
            "char"
        }

        fn try_parse<'s>(
            &self,
            cursor: &mut Cursor<'s>,
            _ctx: &mut Context,
        ) -> Result<Option<Node<'s>>, EngineError> {
            if cursor.at_end() {
                return Ok(None);
            }
            let start = cursor.pos();
            cursor.skip_char();
            Ok(Some(Node::Text {
                region: cursor.region().sub_region(start, cursor.pos()),
            }))
        }
    }

    /// Violates the contract: produces a node without advancing.
    struct StuckRule;

    impl Rule for StuckRule {
        fn name(&self) -> &str {
            "stuck"
        }

        fn try_parse<'s>(
            &self,
            cursor: &mut Cursor<'s>,
            _ctx: &mut Context,
        ) -> Result<Option<Node<'s>>, EngineError> {
            let pos = cursor.pos();
            Ok(Some(Node::Literal {
                region: cursor.region().sub_region(pos, pos),
            }))
        }
    }

    /// Scans ahead, then declines; the parser must restore the position.
    struct GreedyDecliner;

    impl Rule for GreedyDecliner {
        fn name(&self) -> &str {
            "greedy-decliner"
        }

        fn try_parse<'s>(
            &self,
            cursor: &mut Cursor<'s>,
            _ctx: &mut Context,
        ) -> Result<Option<Node<'s>>, EngineError> {
            cursor.skip(2);
            Ok(None)
        }
    }

    #[test]
    fn non_advancing_rule_is_a_fatal_invalid_rule() {
        let parser = Parser::new("test", vec![Box::new(StuckRule)]);
        let mut cursor = Cursor::new(Region::new("abc"));
        let err = parser.parse_single_pass(&mut cursor, &mut ctx()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRule { ref rule, .. } if rule == "stuck"));
    }

    #[test]
    fn exhausted_rule_list_is_a_fatal_no_rule_matched() {
        let parser = Parser::new("test", vec![Box::new(GreedyDecliner)]);
        let mut cursor = Cursor::new(Region::new("abc"));
        let err = parser.parse_single_pass(&mut cursor, &mut ctx()).unwrap_err();
        assert!(matches!(err, EngineError::NoRuleMatched { ref parser, .. } if parser == "test"));
        // the decliner's scan-ahead was rolled back
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn declined_rules_fall_through_to_the_next() {
        let parser = Parser::new(
            "test",
            vec![Box::new(GreedyDecliner), Box::new(CharRule)],
        );
        let mut cursor = Cursor::new(Region::new("ab"));
        let node = parser.parse_single_pass(&mut cursor, &mut ctx()).unwrap();
        assert_eq!(cursor.pos(), 1);
        assert!(matches!(node, Node::Text { .. }));
    }

    #[test]
    fn parse_wraps_passes_in_a_root() {
        let parser = Parser::new("test", vec![Box::new(CharRule)]);
        let root = parser.parse(&Region::new("abc"), &mut ctx()).unwrap();
        match root {
            Node::Root { children, .. } => assert_eq!(children.len(), 3),
            other => panic!("expected root, got {other:?}"),
        }
    }

    #[test]
    fn parse_skips_tainted_spans() {
        let parser = Parser::new("test", vec![Box::new(CharRule)]);
        let region = Region::new("ab{x}cd").taint(2, 5);
        let root = parser.parse(&region, &mut ctx()).unwrap();
        match root {
            Node::Root { children, .. } => assert_eq!(children.len(), 4),
            other => panic!("expected root, got {other:?}"),
        }
    }

    #[test]
    fn chain_surgery_by_predicate() {
        let mut parser = Parser::new("test", vec![Box::new(GreedyDecliner), Box::new(CharRule)]);
        assert_eq!(parser.rule_names(), vec!["greedy-decliner", "char"]);

        assert!(parser.insert_rule_before(|r| r.name() == "char", Box::new(StuckRule)));
        assert_eq!(parser.rule_names(), vec!["greedy-decliner", "stuck", "char"]);

        assert!(parser.replace_rule(|r| r.name() == "stuck", Box::new(CharRule)));
        assert_eq!(parser.rule_names(), vec!["greedy-decliner", "char", "char"]);

        assert!(parser.remove_rule(|r| r.name() == "greedy-decliner"));
        assert_eq!(parser.rule_names(), vec!["char", "char"]);

        assert!(!parser.remove_rule(|r| r.name() == "missing"));
        assert!(!parser.insert_rule_after(|r| r.name() == "missing", Box::new(StuckRule)));
    }
}
