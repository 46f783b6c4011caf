//! Reader for parenthesised derivations such as
//! `(AL (AP (SoundCommand (Stop stop))))`.
//!
//! A node whose only child is a bare word is a lexicon leaf; every other node
//! is a rule application whose right-hand side is the list of its children's
//! categories. Spans are assigned from leaf order. `;` starts a comment that
//! runs to the end of the line.

use regex::Regex;

use crate::error::{TranslateError, TranslateErrorKind};
use crate::types::DerivationNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Atom(&'a str),
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let regex =
        Regex::new(r";[^\n]*|\(|\)|[^\s();]+").expect("bracket token regex must compile");
    regex
        .find_iter(input)
        .filter(|found| !found.as_str().starts_with(';'))
        .map(|found| match found.as_str() {
            "(" => Token::Open,
            ")" => Token::Close,
            atom => Token::Atom(atom),
        })
        .collect()
}

fn syntax_error(message: impl Into<String>) -> TranslateError {
    TranslateErrorKind::TreeSyntax {
        message: message.into(),
    }
    .into()
}

struct Reader<'a> {
    tokens: Vec<Token<'a>>,
    index: usize,
}

impl<'a> Reader<'a> {
    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.tokens.get(self.index).copied();
        self.index += 1;
        token
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.index).copied()
    }

    fn node(&mut self) -> Result<DerivationNode, TranslateError> {
        match self.next() {
            Some(Token::Open) => {}
            Some(Token::Atom(atom)) => {
                return Err(syntax_error(format!("expected \"(\", found \"{}\"", atom)))
            }
            Some(Token::Close) => return Err(syntax_error("unexpected \")\"")),
            None => return Err(syntax_error("unexpected end of input")),
        }

        let category = match self.next() {
            Some(Token::Atom(category)) => category,
            _ => return Err(syntax_error("every node must start with a category")),
        };

        if let Some(Token::Atom(word)) = self.peek() {
            self.index += 1;
            return match self.next() {
                Some(Token::Close) => Ok(DerivationNode::leaf(category, word)),
                _ => Err(syntax_error(format!(
                    "leaf {} must hold exactly one word",
                    category
                ))),
            };
        }

        let mut children = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Close) => {
                    self.index += 1;
                    break;
                }
                Some(Token::Open) => children.push(self.node()?),
                Some(Token::Atom(atom)) => {
                    return Err(syntax_error(format!(
                        "bare word \"{}\" inside rule node {}",
                        atom, category
                    )))
                }
                None => return Err(syntax_error(format!("node {} is not closed", category))),
            }
        }

        if children.is_empty() {
            return Err(syntax_error(format!("node {} has no children", category)));
        }
        Ok(DerivationNode::rule(category, children))
    }
}

pub fn parse_bracketed(input: &str) -> Result<DerivationNode, TranslateError> {
    let mut reader = Reader {
        tokens: tokenize(input),
        index: 0,
    };
    let node = reader.node()?;
    if reader.peek().is_some() {
        return Err(syntax_error("trailing input after the root node"));
    }
    Ok(node.reindexed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenSpan;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_nested_rules_and_leaves() {
        let node = parse_bracketed(
            "(SoundCommand (Play play) (Det the) (NAME_OF_SOUND meow) (Sound sound))",
        )
        .expect("tree should parse");

        let expected = DerivationNode::rule(
            "SoundCommand",
            vec![
                DerivationNode::leaf("Play", "play"),
                DerivationNode::leaf("Det", "the"),
                DerivationNode::leaf("NAME_OF_SOUND", "meow"),
                DerivationNode::leaf("Sound", "sound"),
            ],
        )
        .reindexed();
        assert_eq!(node, expected);
        assert_eq!(node.span(), TokenSpan::new(0, 4));
    }

    #[test]
    fn tolerates_multiline_layout() {
        let node = parse_bracketed(
            "(AL\n  (AP (SoundCommand (Louder louder)))\n  (And and)\n  (AL (AP (SoundCommand (Faster faster)))))",
        )
        .expect("tree should parse");
        assert_eq!(node.sentence(), "louder and faster");
    }

    #[test]
    fn skips_line_comments() {
        let node = parse_bracketed("; stop everything\n(SoundCommand (Stop stop)) ; done")
            .expect("tree should parse");
        assert_eq!(node.sentence(), "stop");
    }

    #[test]
    fn rejects_malformed_trees() {
        for input in [
            "",
            "(AL",
            "(AL (AP x) y)",
            "(Stop stop now)",
            "(AL ())",
            "(Stop stop) (Stop stop)",
            "stop",
        ] {
            let error = parse_bracketed(input).expect_err("tree should be rejected");
            assert_eq!(error.code(), "TREE_SYNTAX", "input: {:?}", input);
        }
    }
}
