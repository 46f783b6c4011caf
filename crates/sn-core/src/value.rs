use serde::ser::{Error as _, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::{TranslateError, TranslateErrorKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SemanticValue {
    Number(f64),
    StringLiteral(String),
    VariableRef(String),
    ListRef(String),
    Expression(Expression),
    Modifier(Modifier),
    Comparator(Comparator),
    Command(Command),
    CommandList(Vec<Command>),
    // A trigger block followed by its body. It only stands as a whole script.
    Handler(Vec<Command>),
    Declaration(Declaration),
    #[default]
    Null,
}

impl SemanticValue {
    pub fn number(value: impl Into<f64>) -> Self {
        Self::Number(value.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::StringLiteral(value.into())
    }

    pub fn expression(opcode: &'static str, operands: Vec<SemanticValue>) -> Self {
        Self::Expression(Expression::new(opcode, operands))
    }

    pub fn command(opcode: &'static str, operands: Vec<SemanticValue>) -> Self {
        Self::Command(Command::new(opcode, operands))
    }

    pub fn read_variable(name: impl Into<String>) -> Self {
        Self::expression(opcodes::READ_VARIABLE, vec![Self::StringLiteral(name.into())])
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::StringLiteral(_) => "string",
            Self::VariableRef(_) => "variable",
            Self::ListRef(_) => "list",
            Self::Expression(_) => "expression",
            Self::Modifier(_) => "modifier",
            Self::Comparator(_) => "comparator",
            Self::Command(_) => "command",
            Self::CommandList(_) => "command list",
            Self::Handler(_) => "event handler",
            Self::Declaration(_) => "declaration",
            Self::Null => "null",
        }
    }

    pub fn variable_reads(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_reads(&mut names);
        names
    }

    fn collect_reads<'a>(&'a self, names: &mut Vec<&'a str>) {
        if let Self::Expression(expression) = self {
            if expression.opcode == opcodes::READ_VARIABLE {
                if let Some(Self::StringLiteral(name)) = expression.operands.first() {
                    names.push(name);
                }
                return;
            }
            for operand in &expression.operands {
                operand.collect_reads(names);
            }
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(
            self,
            Self::Number(_)
                | Self::StringLiteral(_)
                | Self::VariableRef(_)
                | Self::ListRef(_)
                | Self::Expression(_)
        )
    }

    pub fn to_wire(&self) -> Result<serde_json::Value, TranslateError> {
        if let Some(found) = self.first_deferred_part() {
            return Err(TranslateErrorKind::Serialize { found }.into());
        }
        serde_json::to_value(self).map_err(|_| {
            TranslateError::new(TranslateErrorKind::Serialize {
                found: self.type_name(),
            })
        })
    }

    fn first_deferred_part(&self) -> Option<&'static str> {
        match self {
            Self::Modifier(_) | Self::Comparator(_) | Self::Declaration(_) => Some(self.type_name()),
            Self::Expression(expression) => expression
                .operands
                .iter()
                .find_map(SemanticValue::first_deferred_part),
            Self::Command(command) => command
                .operands
                .iter()
                .find_map(SemanticValue::first_deferred_part),
            Self::CommandList(commands) | Self::Handler(commands) => commands
                .iter()
                .flat_map(|command| command.operands.iter())
                .find_map(SemanticValue::first_deferred_part),
            _ => None,
        }
    }
}

impl Serialize for SemanticValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(value) => serialize_number(*value, serializer),
            Self::StringLiteral(text) | Self::VariableRef(text) | Self::ListRef(text) => {
                serializer.serialize_str(text)
            }
            Self::Expression(expression) => expression.serialize(serializer),
            Self::Command(command) => command.serialize(serializer),
            Self::CommandList(commands) | Self::Handler(commands) => {
                commands.serialize(serializer)
            }
            Self::Null => serializer.serialize_unit(),
            other => Err(S::Error::custom(format!(
                "{} has no wire form",
                other.type_name()
            ))),
        }
    }
}

// Whole numbers go out as integers; the block runtime reads `10` and `10.0`
// differently in repeat counts.
fn serialize_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < EXACT_LIMIT {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

fn serialize_block<S: Serializer>(
    opcode: &str,
    operands: &[SemanticValue],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(operands.len() + 1))?;
    seq.serialize_element(opcode)?;
    for operand in operands {
        seq.serialize_element(operand)?;
    }
    seq.end()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub opcode: &'static str,
    pub operands: Vec<SemanticValue>,
}

impl Expression {
    pub fn new(opcode: &'static str, operands: Vec<SemanticValue>) -> Self {
        Self { opcode, operands }
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_block(self.opcode, &self.operands, serializer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub opcode: &'static str,
    pub operands: Vec<SemanticValue>,
}

impl Command {
    pub fn new(opcode: &'static str, operands: Vec<SemanticValue>) -> Self {
        Self { opcode, operands }
    }

    pub fn bare(opcode: &'static str) -> Self {
        Self::new(opcode, Vec::new())
    }
}

impl Serialize for Command {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_block(self.opcode, &self.operands, serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Affirm,
    Negate,
}

// Pending affirmation/negation. Layers are kept in surface order, so the
// rightmost layer is the innermost one and is applied first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modifier {
    layers: Vec<Polarity>,
}

impl Modifier {
    pub fn affirm() -> Self {
        Self {
            layers: vec![Polarity::Affirm],
        }
    }

    pub fn negate() -> Self {
        Self {
            layers: vec![Polarity::Negate],
        }
    }

    pub fn layers(&self) -> &[Polarity] {
        &self.layers
    }

    pub fn then(mut self, inner: Modifier) -> Self {
        self.layers.extend(inner.layers);
        self
    }

    pub fn apply(&self, value: SemanticValue) -> SemanticValue {
        self.layers
            .iter()
            .rev()
            .fold(value, |current, polarity| match polarity {
                Polarity::Affirm => current,
                Polarity::Negate => SemanticValue::expression(opcodes::NOT, vec![current]),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Less,
    Greater,
    Equal,
    GreaterOrEqual,
    LessOrEqual,
}

impl Relation {
    pub fn build(self, left: SemanticValue, right: SemanticValue) -> SemanticValue {
        match self {
            Self::Less => SemanticValue::expression(opcodes::LESS, vec![left, right]),
            Self::Greater => SemanticValue::expression(opcodes::GREATER, vec![left, right]),
            Self::Equal => SemanticValue::expression(opcodes::EQUAL, vec![left, right]),
            Self::GreaterOrEqual => SemanticValue::expression(
                opcodes::OR,
                vec![
                    Self::Greater.build(left.clone(), right.clone()),
                    Self::Equal.build(left, right),
                ],
            ),
            Self::LessOrEqual => SemanticValue::expression(
                opcodes::OR,
                vec![
                    Self::Less.build(left.clone(), right.clone()),
                    Self::Equal.build(left, right),
                ],
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    pub relation: Relation,
    pub modifier: Option<Modifier>,
}

impl Comparator {
    pub fn new(relation: Relation) -> Self {
        Self {
            relation,
            modifier: None,
        }
    }

    pub fn modified(mut self, outer: Modifier) -> Self {
        self.modifier = Some(match self.modifier.take() {
            Some(inner) => outer.then(inner),
            None => outer,
        });
        self
    }

    pub fn apply(&self, left: SemanticValue, right: SemanticValue) -> SemanticValue {
        let base = self.relation.build(left, right);
        match &self.modifier {
            Some(modifier) => modifier.apply(base),
            None => base,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Variable,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub names: Vec<String>,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            names: vec![name.into()],
        }
    }
}

// Opcode strings of the block runtime. These must stay byte-identical.
pub mod opcodes {
    pub const PLAY_SOUND_AND_WAIT: &str = "doPlaySoundAndWait";
    pub const SET_VOLUME: &str = "setVolumeTo:";
    pub const CHANGE_VOLUME: &str = "changeVolumeBy:";
    pub const CHANGE_TEMPO: &str = "changeTempoBy:";
    pub const STOP_ALL_SOUNDS: &str = "stopAllSounds";
    pub const CREATE_CLONE: &str = "createCloneOf:";
    pub const DELETE_CLONE: &str = "deleteClone";
    pub const SET_VAR: &str = "setVar:to:";
    pub const CHANGE_VAR: &str = "changeVar:by:";
    pub const APPEND_TO_LIST: &str = "append:toList:";
    pub const DELETE_LINE: &str = "deleteLine:ofList:";
    pub const SET_LINE: &str = "setLine:ofList:to:";
    pub const GET_LINE: &str = "getLine:ofList:";
    pub const LIST_CONTAINS: &str = "list:contains:";
    pub const TIMER_RESET: &str = "timerReset";
    pub const TIMER: &str = "timer";
    pub const IF: &str = "doIf";
    pub const IF_ELSE: &str = "doIfElse";
    pub const REPEAT: &str = "doRepeat";
    pub const UNTIL: &str = "doUntil";
    pub const FOREVER: &str = "doForever";
    pub const WAIT: &str = "wait:elapsed:from:";
    pub const WAIT_UNTIL: &str = "doWaitUntil";
    pub const WHEN_GREEN_FLAG: &str = "whenGreenFlag";
    pub const WHEN_KEY_PRESSED: &str = "whenKeyPressed";
    pub const WHEN_CLICKED: &str = "whenClicked";
    pub const WHEN_SCENE_STARTS: &str = "whenSceneStarts";
    pub const WHEN_I_RECEIVE: &str = "whenIReceive";
    pub const BROADCAST: &str = "broadcast:";
    pub const BROADCAST_AND_WAIT: &str = "doBroadcastAndWait:";
    pub const ADD: &str = "+";
    pub const SUBTRACT: &str = "-";
    pub const MULTIPLY: &str = "*";
    pub const DIVIDE: &str = "/";
    pub const LESS: &str = "<";
    pub const GREATER: &str = ">";
    pub const EQUAL: &str = "=";
    pub const OR: &str = "|";
    pub const AND: &str = "&";
    pub const NOT: &str = "not";
    pub const READ_VARIABLE: &str = "readVariable";
    pub const RANDOM: &str = "randomFrom:to:";
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn x_less_than_three() -> (SemanticValue, SemanticValue) {
        (SemanticValue::read_variable("x"), SemanticValue::number(3))
    }

    #[test]
    fn commands_serialize_opcode_first() {
        let command = Command::new(
            opcodes::REPEAT,
            vec![
                SemanticValue::number(10),
                SemanticValue::CommandList(vec![Command::new(
                    opcodes::PLAY_SOUND_AND_WAIT,
                    vec![SemanticValue::text("meow")],
                )]),
            ],
        );
        assert_eq!(
            serde_json::to_value(&command).expect("command should serialize"),
            json!(["doRepeat", 10, [["doPlaySoundAndWait", "meow"]]])
        );
    }

    #[test]
    fn fractional_numbers_stay_floats() {
        assert_eq!(
            SemanticValue::number(0.5).to_wire().expect("wire"),
            json!(0.5)
        );
        assert_eq!(SemanticValue::number(-10).to_wire().expect("wire"), json!(-10));
    }

    #[test]
    fn negated_comparator_wraps_base_predicate() {
        let (left, right) = x_less_than_three();
        let comparator = Comparator::new(Relation::Less).modified(Modifier::negate());
        assert_eq!(
            comparator.apply(left, right).to_wire().expect("wire"),
            json!(["not", ["<", ["readVariable", "x"], 3]])
        );
    }

    #[test]
    fn stacked_modifiers_apply_rightmost_first() {
        let (left, right) = x_less_than_three();
        let comparator = Comparator::new(Relation::Less)
            .modified(Modifier::negate())
            .modified(Modifier::affirm())
            .modified(Modifier::negate());
        assert_eq!(
            comparator.modifier.as_ref().map(Modifier::layers),
            Some(&[Polarity::Negate, Polarity::Affirm, Polarity::Negate][..])
        );
        assert_eq!(
            comparator.apply(left, right).to_wire().expect("wire"),
            json!(["not", ["not", ["<", ["readVariable", "x"], 3]]])
        );
    }

    #[test]
    fn modifier_composition_is_associative() {
        let left = Modifier::negate()
            .then(Modifier::affirm())
            .then(Modifier::negate());
        let right = Modifier::negate().then(Modifier::affirm().then(Modifier::negate()));
        assert_eq!(left, right);
    }

    #[test]
    fn greater_or_equal_is_a_disjunction() {
        let (left, right) = x_less_than_three();
        assert_eq!(
            Relation::GreaterOrEqual
                .build(left, right)
                .to_wire()
                .expect("wire"),
            json!([
                "|",
                [">", ["readVariable", "x"], 3],
                ["=", ["readVariable", "x"], 3]
            ])
        );
    }

    #[test]
    fn variable_reads_walk_nested_expressions() {
        let value = SemanticValue::expression(
            opcodes::ADD,
            vec![
                SemanticValue::read_variable("a"),
                SemanticValue::expression(
                    opcodes::MULTIPLY,
                    vec![SemanticValue::number(2), SemanticValue::read_variable("b")],
                ),
            ],
        );
        assert_eq!(value.variable_reads(), vec!["a", "b"]);
        assert!(SemanticValue::text("a").variable_reads().is_empty());
    }

    #[test]
    fn handlers_serialize_as_their_command_list() {
        let handler = SemanticValue::Handler(vec![
            Command::bare(opcodes::WHEN_GREEN_FLAG),
            Command::bare(opcodes::STOP_ALL_SOUNDS),
        ]);
        assert_eq!(
            handler.to_wire().expect("wire"),
            json!([["whenGreenFlag"], ["stopAllSounds"]])
        );
    }

    #[test]
    fn deferred_values_have_no_wire_form() {
        let nested = SemanticValue::command(
            opcodes::IF,
            vec![SemanticValue::Comparator(Comparator::new(Relation::Equal))],
        );
        let error = nested.to_wire().expect_err("comparator should not serialize");
        assert_eq!(
            error.kind,
            TranslateErrorKind::Serialize {
                found: "comparator"
            }
        );
    }
}
