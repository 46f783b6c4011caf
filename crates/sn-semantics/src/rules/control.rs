use sn_core::{opcodes, Command, SemanticValue, TranslateError};

use super::{pass, RuleCall, RuleTable};

pub const FOREVER: &str = "forever";

pub(super) fn register(table: &mut RuleTable) {
    table
        .add("ConditionalCommand -> If BP Then AL Thats It", |call| {
            let condition = call.condition(1)?;
            let body = call.actions(3)?;
            Ok(SemanticValue::command(
                opcodes::IF,
                vec![condition, SemanticValue::CommandList(body)],
            ))
        })
        .add(
            "ConditionalCommand -> If BP Then AL Thats It Else AL Thats It",
            |call| {
                let condition = call.condition(1)?;
                let then_body = call.actions(3)?;
                let else_body = call.actions(7)?;
                Ok(SemanticValue::command(
                    opcodes::IF_ELSE,
                    vec![
                        condition,
                        SemanticValue::CommandList(then_body),
                        SemanticValue::CommandList(else_body),
                    ],
                ))
            },
        );

    table
        .add("ControlCommand -> Wait Unk Seconds", |call| {
            let seconds = call.number(1)?;
            Ok(SemanticValue::command(
                opcodes::WAIT,
                vec![SemanticValue::Number(seconds)],
            ))
        })
        .add("ControlCommand -> Wait Until BP", |call| {
            let condition = call.condition(2)?;
            Ok(SemanticValue::command(opcodes::WAIT_UNTIL, vec![condition]))
        })
        .add("ControlCommand -> Repeat AL Until BP", |call| {
            let body = call.actions(1)?;
            let condition = call.condition(3)?;
            Ok(SemanticValue::command(
                opcodes::UNTIL,
                vec![condition, SemanticValue::CommandList(body)],
            ))
        })
        .add("ControlCommand -> Repeat AL Forever", |call| {
            let body = call.actions(1)?;
            Ok(forever(body))
        })
        .add("ControlCommand -> Repeat AL Unk Times", |call| {
            let body = call.actions(1)?;
            let count = call.count(2)?;
            Ok(repeat(count, body))
        })
        .add("ControlCommand -> Delete Det Clone", |_| {
            Ok(SemanticValue::command(opcodes::DELETE_CLONE, Vec::new()))
        })
        .add("TimerCommand -> Reset Timer", |_| {
            Ok(SemanticValue::command(opcodes::TIMER_RESET, Vec::new()))
        });

    table
        .add("Duration -> Unk Times", |call| {
            Ok(SemanticValue::Number(call.count(0)?))
        })
        .add("LoopCommand -> Repeat LoopCommandP", pass::<1>)
        .add("LoopCommand -> LoopCommandP", pass::<0>)
        .add("LoopCommand -> AL Should Be Repeated Duration", |call| {
            loop_over(call, 0, 4)
        })
        .add("LoopCommand -> AL That Should Be Repeated Duration", |call| {
            loop_over(call, 0, 5)
        })
        .add("LoopCommandP -> AP Duration", |call| loop_over(call, 0, 1))
        .add("LoopCommandP -> The Following Duration AL Thats It", |call| {
            loop_over(call, 3, 2)
        })
        .add(
            "LoopCommandP -> The Following Steps Duration AL Thats It",
            |call| loop_over(call, 4, 3),
        );
}

fn repeat(count: f64, body: Vec<Command>) -> SemanticValue {
    SemanticValue::command(
        opcodes::REPEAT,
        vec![SemanticValue::Number(count), SemanticValue::CommandList(body)],
    )
}

fn forever(body: Vec<Command>) -> SemanticValue {
    SemanticValue::command(opcodes::FOREVER, vec![SemanticValue::CommandList(body)])
}

fn loop_over(
    call: &mut RuleCall<'_>,
    body_position: usize,
    duration_position: usize,
) -> Result<SemanticValue, TranslateError> {
    let body = call.actions(body_position)?;
    match call.take(duration_position)? {
        SemanticValue::Number(count) => Ok(repeat(count, body)),
        SemanticValue::StringLiteral(word) if word == FOREVER => Ok(forever(body)),
        other => Err(call.mismatch(duration_position, "duration", &other)),
    }
}
