use sn_core::{opcodes, SemanticValue, TranslateError};

use super::{pass, RuleCall, RuleTable};

pub(super) fn register(table: &mut RuleTable) {
    for phrase in [
        "EVENT -> When Det Green Flag Is Clicked",
        "EVENT -> When Green Flag Is Clicked",
        "EVENT -> When Det Program Starts",
        "EVENT -> When Program Starts",
    ] {
        table.add(phrase, |_| trigger(opcodes::WHEN_GREEN_FLAG, Vec::new()));
    }

    table
        .add("EVENT -> When KEY_NAME Is Clicked", |call| {
            let key = call.name(1)?;
            trigger(opcodes::WHEN_KEY_PRESSED, vec![SemanticValue::StringLiteral(key)])
        })
        .add("EVENT -> When Det Sprite Is Clicked", |_| {
            trigger(opcodes::WHEN_CLICKED, Vec::new())
        })
        .add("EVENT -> When Backdrop Switches To BACKDROP_NAME", |call| {
            backdrop(call, 4)
        })
        .add("EVENT -> When Backdrop Switches To Det BACKDROP_NAME", |call| {
            backdrop(call, 5)
        })
        .add("EVENT -> When I Receive MESSAGE_NAME", |call| {
            let message = call.name(3)?;
            trigger(opcodes::WHEN_I_RECEIVE, vec![SemanticValue::StringLiteral(message)])
        })
        // The runtime has no timer hat, so the handler waits on the timer.
        .add("EVENT -> When Timer CBP NP", |call| {
            let timer = call.operand(1)?;
            let comparator = call.comparator(2)?;
            let threshold = call.operand(3)?;
            trigger(
                opcodes::WAIT_UNTIL,
                vec![comparator.apply(timer, threshold)],
            )
        });

    table
        .add("SimpleEventHandler -> EVENT AL", simple_event)
        .add("EventHandler -> SimpleEventHandler Thats It", pass::<0>)
        .add(
            "EventHandler -> SimpleEventHandler At Det Same Time Thats It",
            pass::<0>,
        )
        .add("EventHandler -> SimpleEventHandler Too Thats It", pass::<0>)
        .add(
            "EventHandler -> SimpleEventHandler At Det Same Time Too Thats It",
            pass::<0>,
        );

    table
        .add("BroadcastCommand -> Broadcast MESSAGE_NAME", |call| {
            broadcast(call, opcodes::BROADCAST)
        })
        .add("BroadcastCommand -> Broadcast MESSAGE_NAME And Wait", |call| {
            broadcast(call, opcodes::BROADCAST_AND_WAIT)
        });
}

fn trigger(
    opcode: &'static str,
    operands: Vec<SemanticValue>,
) -> Result<SemanticValue, TranslateError> {
    Ok(SemanticValue::command(opcode, operands))
}

fn backdrop(call: &mut RuleCall<'_>, position: usize) -> Result<SemanticValue, TranslateError> {
    let name = call.name(position)?;
    trigger(
        opcodes::WHEN_SCENE_STARTS,
        vec![SemanticValue::StringLiteral(name)],
    )
}

// `[trigger] ++ body`, kept apart from plain command lists.
fn simple_event(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    let event = match call.take(0)? {
        SemanticValue::Command(command) => command,
        other => return Err(call.mismatch(0, "event trigger", &other)),
    };
    let mut commands = vec![event];
    commands.extend(call.actions(1)?);
    Ok(SemanticValue::Handler(commands))
}

fn broadcast(call: &mut RuleCall<'_>, opcode: &'static str) -> Result<SemanticValue, TranslateError> {
    let message = call.name(1)?;
    Ok(SemanticValue::command(
        opcode,
        vec![SemanticValue::StringLiteral(message)],
    ))
}
