use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleKey {
    pub lhs: String,
    pub rhs: Vec<String>,
}

impl RuleKey {
    pub fn new(lhs: impl Into<String>, rhs: Vec<String>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs,
        }
    }

    pub fn parse(declaration: &str) -> Option<Self> {
        let (lhs, rhs) = declaration.split_once("->")?;
        let lhs = lhs.trim();
        let rhs = rhs
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if lhs.is_empty() || lhs.contains(char::is_whitespace) || rhs.is_empty() {
            return None;
        }
        Some(Self::new(lhs, rhs))
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DerivationNode {
    Rule {
        lhs: String,
        rhs: Vec<String>,
        children: Vec<DerivationNode>,
        #[serde(default)]
        span: TokenSpan,
    },
    Leaf {
        category: String,
        word: String,
        #[serde(default)]
        span: TokenSpan,
    },
}

impl DerivationNode {
    pub fn leaf(category: impl Into<String>, word: impl Into<String>) -> Self {
        Self::Leaf {
            category: category.into(),
            word: word.into(),
            span: TokenSpan::default(),
        }
    }

    pub fn rule(lhs: impl Into<String>, children: Vec<DerivationNode>) -> Self {
        let rhs = children
            .iter()
            .map(|child| child.category().to_string())
            .collect();
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => TokenSpan::new(first.span().start, last.span().end),
            _ => TokenSpan::default(),
        };
        Self::Rule {
            lhs: lhs.into(),
            rhs,
            children,
            span,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            Self::Rule { lhs, .. } => lhs,
            Self::Leaf { category, .. } => category,
        }
    }

    pub fn span(&self) -> TokenSpan {
        match self {
            Self::Rule { span, .. } | Self::Leaf { span, .. } => *span,
        }
    }

    pub fn words(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_words(&mut out);
        out
    }

    fn collect_words<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Rule { children, .. } => {
                for child in children {
                    child.collect_words(out);
                }
            }
            Self::Leaf { word, .. } => out.push(word),
        }
    }

    pub fn sentence(&self) -> String {
        self.words().join(" ")
    }

    // Reassigns spans from leaf order, leaf `i` covering `[i, i + 1)`.
    pub fn reindexed(mut self) -> Self {
        let mut next = 0usize;
        self.assign_spans(&mut next);
        self
    }

    fn assign_spans(&mut self, next: &mut usize) {
        match self {
            Self::Rule { children, span, .. } => {
                let start = *next;
                for child in children.iter_mut() {
                    child.assign_spans(next);
                }
                *span = TokenSpan::new(start, *next);
            }
            Self::Leaf { span, .. } => {
                *span = TokenSpan::new(*next, *next + 1);
                *next += 1;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Script {
    pub commands: Vec<Command>,
    pub variables: BTreeMap<String, serde_json::Value>,
    pub lists: BTreeMap<String, Vec<serde_json::Value>>,
}
