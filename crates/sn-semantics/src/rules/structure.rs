use sn_core::{SemanticValue, TranslateError};

use super::{nothing, pass, RuleCall, RuleTable};

const ACTION_PHRASES: &[&str] = &[
    "SoundCommand",
    "CreateCommand",
    "DataCommand",
    "EventHandler",
    "OrderedCommand",
    "SequentialCommand",
    "ConditionalCommand",
    "LoopCommand",
    "TimerCommand",
    "BroadcastCommand",
    "ControlCommand",
];

pub(super) fn register(table: &mut RuleTable) {
    table
        .add("Start -> S", pass::<0>)
        .add("S -> AL", pass::<0>)
        .add("S -> BP", pass::<0>)
        .add("AL -> AP", single_action)
        .add("AL -> AP AL", prepend_action)
        .add("AL -> AP And AL", prepend_action_after_and);

    for phrase in ACTION_PHRASES {
        table.add(&format!("AP -> {}", phrase), pass::<0>);
    }

    table
        .add("OrderedCommand -> OrderAdverb AL", pass::<1>)
        .add("SequentialCommand -> SequenceAdverb AL", record_sequence);

    // Determiners, "called" and the like only disambiguate the grammar.
    table
        .add("Variable -> Det Variable", pass::<1>)
        .add("Variable -> Variable Called", pass::<0>)
        .add("VARIABLE_NAME -> Variable VARIABLE_NAME", pass::<1>)
        .add("List -> Det List", pass::<1>)
        .add("List -> List Called", pass::<0>)
        .add("LIST_NAME -> Det LIST_NAME", pass::<1>)
        .add("LIST_NAME -> List LIST_NAME", pass::<1>)
        .add("Keyname -> Key", nothing)
        .add("Keyname -> Det Key", nothing)
        .add("Keyname -> Det Key Called", nothing)
        .add("Keyname -> Key Called", nothing)
        .add("KEY_NAME -> Keyname KEY_NAME", pass::<1>)
        .add("KEY_NAME -> Det KEY_NAME", pass::<1>)
        .add("KEY_NAME -> KEY_NAME Key", pass::<0>)
        .add("MESSAGE_NAME -> Det MESSAGE_NAME", pass::<1>)
        .add("MESSAGE_NAME -> Message MESSAGE_NAME", pass::<1>)
        .add("Message -> New Message", pass::<1>)
        .add("Message -> Det Message", pass::<1>)
        .add("Message -> Message Called", pass::<0>)
        .add("Timer -> Det Timer", pass::<1>)
        .add("NEG -> Is NEG", pass::<1>);
}

fn single_action(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    call.script_body(0)
}

fn prepend_action(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    let mut commands = call.actions(0)?;
    commands.extend(call.actions(1)?);
    Ok(SemanticValue::CommandList(commands))
}

fn prepend_action_after_and(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    let mut commands = call.actions(0)?;
    commands.extend(call.actions(2)?);
    Ok(SemanticValue::CommandList(commands))
}

fn record_sequence(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    let actions = call.script_body(1)?;
    if call.session.program.is_some() {
        let wire = actions.to_wire()?;
        call.session.record(wire);
    }
    Ok(actions)
}
