use crate::types::TokenSpan;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateErrorKind {
    #[error("word \"{word}\" is not in the lexicon for category {category}")]
    UnknownWord { category: String, word: String },
    #[error("rule {rule} expects {expected} children but the derivation has {found}")]
    Arity {
        rule: String,
        expected: usize,
        found: usize,
    },
    #[error("rule {rule} has no semantic action")]
    UnknownRule { rule: String },
    #[error("rule {rule} expected {expected} at child {position}, found {found}")]
    TypeMismatch {
        rule: String,
        position: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("variable \"{name}\" is not declared")]
    UnknownVariable { name: String },
    #[error("list \"{name}\" is not declared")]
    UnknownList { name: String },
    #[error("ordinal \"{word}\" is not supported")]
    UnsupportedOrdinal { word: String },
    #[error("sentence resolved to {found}, not an executable script")]
    UnresolvedTopLevel { found: &'static str },
    #[error("\"{word}\" cannot be read as a number")]
    NotANumber { word: String },
    #[error("derivation tree is malformed: {message}")]
    TreeSyntax { message: String },
    #[error("{found} has no wire form")]
    Serialize { found: &'static str },
}

impl TranslateErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownWord { .. } => "UNKNOWN_WORD",
            Self::Arity { .. } => "ARITY",
            Self::UnknownRule { .. } => "UNKNOWN_RULE",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::UnknownVariable { .. } => "UNKNOWN_VARIABLE",
            Self::UnknownList { .. } => "UNKNOWN_LIST",
            Self::UnsupportedOrdinal { .. } => "UNSUPPORTED_ORDINAL",
            Self::UnresolvedTopLevel { .. } => "UNRESOLVED_TOP_LEVEL",
            Self::NotANumber { .. } => "NOT_A_NUMBER",
            Self::TreeSyntax { .. } => "TREE_SYNTAX",
            Self::Serialize { .. } => "SERIALIZE",
        }
    }

    // Contract violations between the rule table and the derivation shape.
    // These point at a defect in the grammar wiring, never at user input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Arity { .. } | Self::UnknownRule { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}: {kind}", kind.code())]
pub struct TranslateError {
    pub kind: TranslateErrorKind,
    pub category: Option<String>,
    pub span: Option<TokenSpan>,
    pub sentence: Option<String>,
}

impl TranslateError {
    pub fn new(kind: TranslateErrorKind) -> Self {
        Self {
            kind,
            category: None,
            span: None,
            sentence: None,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    // Records the innermost failing node. Outer nodes leave an already
    // located error untouched.
    pub fn at_node(mut self, category: &str, span: TokenSpan) -> Self {
        if self.span.is_none() {
            self.category = Some(category.to_string());
            self.span = Some(span);
        }
        self
    }

    pub fn in_sentence(mut self, sentence: impl Into<String>) -> Self {
        self.sentence = Some(sentence.into());
        self
    }

    pub fn describe(&self) -> String {
        let mut message = self.kind.to_string();
        if let (Some(category), Some(span)) = (&self.category, self.span) {
            message.push_str(&format!(
                " (at {} covering tokens {}..{})",
                category, span.start, span.end
            ));
        }
        if let Some(sentence) = &self.sentence {
            message.push_str(&format!(" in \"{}\"", sentence));
        }
        message
    }
}

impl From<TranslateErrorKind> for TranslateError {
    fn from(kind: TranslateErrorKind) -> Self {
        Self::new(kind)
    }
}
