use sn_core::{DerivationNode, RuleKey, SemanticValue, Session, TranslateError, TranslateErrorKind};

use crate::lexicon::Lexicon;
use crate::numbers::NumberWords;
use crate::rules::{RuleCall, RuleTable};

pub struct Evaluator<'t> {
    lexicon: &'t Lexicon,
    rules: &'t RuleTable,
    numbers: &'t dyn NumberWords,
}

impl<'t> Evaluator<'t> {
    pub fn new(lexicon: &'t Lexicon, rules: &'t RuleTable, numbers: &'t dyn NumberWords) -> Self {
        Self {
            lexicon,
            rules,
            numbers,
        }
    }

    pub fn evaluate(
        &self,
        node: &DerivationNode,
        mut session: Session,
    ) -> Result<(SemanticValue, Session), TranslateError> {
        let value = self.evaluate_node(node, &mut session)?;
        Ok((value, session))
    }

    fn evaluate_node(
        &self,
        node: &DerivationNode,
        session: &mut Session,
    ) -> Result<SemanticValue, TranslateError> {
        match node {
            DerivationNode::Leaf {
                category,
                word,
                span,
            } => {
                tracing::trace!(category = category.as_str(), word = word.as_str(), "lexicon");
                self.lexicon
                    .lookup(category, word)
                    .map_err(|error| error.at_node(category, *span))
            }
            DerivationNode::Rule {
                lhs,
                rhs,
                children,
                span,
            } => {
                let key = RuleKey::new(lhs.clone(), rhs.clone());
                self.check_shape(&key, children)
                    .map_err(|error| error.at_node(lhs, *span))?;
                let compose = self.rules.lookup(&key).ok_or_else(|| {
                    TranslateError::new(TranslateErrorKind::UnknownRule {
                        rule: key.to_string(),
                    })
                    .at_node(lhs, *span)
                })?;

                let mut values = Vec::with_capacity(children.len());
                for child in children {
                    values.push(self.evaluate_node(child, session)?);
                }

                tracing::trace!(rule = %key, "compose");
                let mut call = RuleCall::new(&key, values, session, self.numbers);
                compose(&mut call).map_err(|error| error.at_node(lhs, *span))
            }
        }
    }

    fn check_shape(&self, key: &RuleKey, children: &[DerivationNode]) -> Result<(), TranslateError> {
        if children.len() != key.rhs.len() {
            return Err(TranslateErrorKind::Arity {
                rule: key.to_string(),
                expected: key.rhs.len(),
                found: children.len(),
            }
            .into());
        }
        for (position, (child, expected)) in children.iter().zip(&key.rhs).enumerate() {
            if child.category() != expected {
                return Err(TranslateErrorKind::TreeSyntax {
                    message: format!(
                        "child {} of {} is {}, expected {}",
                        position,
                        key,
                        child.category(),
                        expected
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}
