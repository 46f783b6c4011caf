use std::collections::HashMap;

use sn_core::{
    Command, Comparator, Declaration, Modifier, RuleKey, SemanticValue, Session, TranslateError,
    TranslateErrorKind,
};

use crate::numbers::NumberWords;

mod control;
mod data;
mod events;
mod lists;
mod logic;
mod operators;
mod sound;
mod structure;

pub use control::FOREVER;

pub type ComposeFn = fn(&mut RuleCall<'_>) -> Result<SemanticValue, TranslateError>;

pub struct RuleCall<'a> {
    pub key: &'a RuleKey,
    values: Vec<SemanticValue>,
    pub session: &'a mut Session,
    pub numbers: &'a dyn NumberWords,
}

impl<'a> RuleCall<'a> {
    pub fn new(
        key: &'a RuleKey,
        values: Vec<SemanticValue>,
        session: &'a mut Session,
        numbers: &'a dyn NumberWords,
    ) -> Self {
        Self {
            key,
            values,
            session,
            numbers,
        }
    }

    pub fn take(&mut self, position: usize) -> Result<SemanticValue, TranslateError> {
        let found = self.values.len();
        match self.values.get_mut(position) {
            Some(value) => Ok(std::mem::take(value)),
            None => Err(TranslateErrorKind::Arity {
                rule: self.key.to_string(),
                expected: position + 1,
                found,
            }
            .into()),
        }
    }

    pub fn mismatch(
        &self,
        position: usize,
        expected: &'static str,
        found: &SemanticValue,
    ) -> TranslateError {
        TranslateErrorKind::TypeMismatch {
            rule: self.key.to_string(),
            position,
            expected,
            found: found.type_name(),
        }
        .into()
    }

    pub fn operand(&mut self, position: usize) -> Result<SemanticValue, TranslateError> {
        let value = self.take(position)?;
        if value.is_operand() {
            return Ok(value);
        }
        Err(self.mismatch(position, "operand", &value))
    }

    // Operand of a data command. Every variable it reads must already be
    // declared.
    pub fn declared_operand(&mut self, position: usize) -> Result<SemanticValue, TranslateError> {
        let value = self.operand(position)?;
        self.require_reads(&value)?;
        Ok(value)
    }

    pub fn require_reads(&self, value: &SemanticValue) -> Result<(), TranslateError> {
        for name in value.variable_reads() {
            self.session.environment.require_variable(name)?;
        }
        Ok(())
    }

    pub fn number(&mut self, position: usize) -> Result<f64, TranslateError> {
        match self.take(position)? {
            SemanticValue::Number(value) => Ok(value),
            SemanticValue::StringLiteral(word) => {
                self.numbers.resolve(&word).ok_or_else(|| {
                    TranslateError::new(TranslateErrorKind::NotANumber { word })
                })
            }
            other => Err(self.mismatch(position, "number", &other)),
        }
    }

    pub fn count(&mut self, position: usize) -> Result<f64, TranslateError> {
        let value = self.number(position)?;
        if value.fract() != 0.0 || value < 0.0 {
            return Err(self.mismatch(position, "whole count", &SemanticValue::Number(value)));
        }
        Ok(value)
    }

    pub fn loose_operand(&mut self, position: usize) -> Result<SemanticValue, TranslateError> {
        match self.take(position)? {
            SemanticValue::StringLiteral(word) => Ok(match self.numbers.resolve(&word) {
                Some(value) => SemanticValue::Number(value),
                None => SemanticValue::StringLiteral(word),
            }),
            value if value.is_operand() => Ok(value),
            other => Err(self.mismatch(position, "operand", &other)),
        }
    }

    pub fn variable(&mut self, position: usize) -> Result<String, TranslateError> {
        match self.take(position)? {
            SemanticValue::VariableRef(name) => Ok(name),
            other => Err(self.mismatch(position, "variable name", &other)),
        }
    }

    pub fn list(&mut self, position: usize) -> Result<String, TranslateError> {
        match self.take(position)? {
            SemanticValue::ListRef(name) => Ok(name),
            other => Err(self.mismatch(position, "list name", &other)),
        }
    }

    pub fn name(&mut self, position: usize) -> Result<String, TranslateError> {
        match self.take(position)? {
            SemanticValue::StringLiteral(name) => Ok(name),
            SemanticValue::Number(value) => Ok(value.to_string()),
            other => Err(self.mismatch(position, "name", &other)),
        }
    }

    pub fn condition(&mut self, position: usize) -> Result<SemanticValue, TranslateError> {
        match self.take(position)? {
            value @ (SemanticValue::Expression(_) | SemanticValue::Number(_)) => Ok(value),
            other => Err(self.mismatch(position, "condition", &other)),
        }
    }

    // An action phrase or action list flattened into commands. Pure
    // declarations contribute nothing. Event handlers never splice into
    // another list.
    pub fn actions(&mut self, position: usize) -> Result<Vec<Command>, TranslateError> {
        let value = self.take(position)?;
        self.flatten(position, value)
    }

    pub fn script_body(&mut self, position: usize) -> Result<SemanticValue, TranslateError> {
        match self.take(position)? {
            handler @ SemanticValue::Handler(_) => Ok(handler),
            other => Ok(SemanticValue::CommandList(self.flatten(position, other)?)),
        }
    }

    fn flatten(&self, position: usize, value: SemanticValue) -> Result<Vec<Command>, TranslateError> {
        match value {
            SemanticValue::Command(command) => Ok(vec![command]),
            SemanticValue::CommandList(commands) => Ok(commands),
            SemanticValue::Null => Ok(Vec::new()),
            other => Err(self.mismatch(position, "action", &other)),
        }
    }

    pub fn comparator(&mut self, position: usize) -> Result<Comparator, TranslateError> {
        match self.take(position)? {
            SemanticValue::Comparator(comparator) => Ok(comparator),
            other => Err(self.mismatch(position, "comparator", &other)),
        }
    }

    pub fn modifier(&mut self, position: usize) -> Result<Modifier, TranslateError> {
        match self.take(position)? {
            SemanticValue::Modifier(modifier) => Ok(modifier),
            other => Err(self.mismatch(position, "modifier", &other)),
        }
    }

    pub fn declaration(&mut self, position: usize) -> Result<Declaration, TranslateError> {
        match self.take(position)? {
            SemanticValue::Declaration(declaration) => Ok(declaration),
            other => Err(self.mismatch(position, "declaration", &other)),
        }
    }
}

// Forwards child `N` unchanged; the other children are structural filler.
pub(crate) fn pass<const N: usize>(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    call.take(N)
}

pub(crate) fn nothing(_call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    Ok(SemanticValue::Null)
}

#[derive(Default)]
pub struct RuleTable {
    rules: HashMap<RuleKey, ComposeFn>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut table = Self::new();
        structure::register(&mut table);
        sound::register(&mut table);
        data::register(&mut table);
        lists::register(&mut table);
        operators::register(&mut table);
        logic::register(&mut table);
        control::register(&mut table);
        events::register(&mut table);
        table
    }

    // Registers `compose` under a `"Lhs -> Rhs1 Rhs2"` declaration. A later
    // registration of the same key replaces the earlier one.
    pub fn add(&mut self, declaration: &str, compose: ComposeFn) -> &mut Self {
        let key = RuleKey::parse(declaration)
            .unwrap_or_else(|| panic!("invalid rule declaration \"{}\"", declaration));
        self.rules.insert(key, compose);
        self
    }

    pub fn lookup(&self, key: &RuleKey) -> Option<ComposeFn> {
        self.rules.get(key).copied()
    }

    pub fn contains(&self, declaration: &str) -> bool {
        RuleKey::parse(declaration).is_some_and(|key| self.rules.contains_key(&key))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn keys(&self) -> Vec<&RuleKey> {
        let mut keys = self.rules.keys().collect::<Vec<_>>();
        keys.sort();
        keys
    }
}
