use sn_core::{opcodes, SemanticValue, TranslateError};

use super::{pass, RuleCall, RuleTable};

pub(super) fn register(table: &mut RuleTable) {
    table
        .add("NP -> Unk", |call| Ok(SemanticValue::Number(call.number(0)?)))
        .add("NP -> NPP", pass::<0>)
        .add("NP -> Det NPP", pass::<1>)
        .add("NP -> VARIABLE_NAME", |call| {
            Ok(SemanticValue::read_variable(call.variable(0)?))
        })
        .add("NP -> NP Plus NP", |call| binary(call, opcodes::ADD, 0, 2))
        .add("NP -> NP Added To NP", |call| binary(call, opcodes::ADD, 0, 3))
        .add("NPP -> Sum Of NP And NP", |call| {
            binary(call, opcodes::ADD, 2, 4)
        })
        .add("NP -> NP Minus NP", |call| {
            binary(call, opcodes::SUBTRACT, 0, 2)
        })
        .add("NP -> NP Subtracted By NP", |call| {
            binary(call, opcodes::SUBTRACT, 0, 3)
        })
        // "a subtracted from b" is b - a.
        .add("NP -> NP Subtracted From NP", |call| {
            binary(call, opcodes::SUBTRACT, 3, 0)
        })
        .add("NP -> NP Times NP", |call| {
            binary(call, opcodes::MULTIPLY, 0, 2)
        })
        .add("NP -> NP Multiplied By NP", |call| {
            binary(call, opcodes::MULTIPLY, 0, 3)
        })
        .add("NPP -> Product Of NP And NP", |call| {
            binary(call, opcodes::MULTIPLY, 2, 4)
        })
        .add("NP -> NP Divided By NP", |call| {
            binary(call, opcodes::DIVIDE, 0, 3)
        })
        .add("NPP -> Random Number Between NP And NP", |call| {
            binary(call, opcodes::RANDOM, 3, 5)
        })
        .add("NP -> Negative NP", |call| {
            let operand = call.operand(1)?;
            Ok(SemanticValue::expression(
                opcodes::MULTIPLY,
                vec![SemanticValue::number(-1), operand],
            ))
        });
}

fn binary(
    call: &mut RuleCall<'_>,
    opcode: &'static str,
    left: usize,
    right: usize,
) -> Result<SemanticValue, TranslateError> {
    let left = call.operand(left)?;
    let right = call.operand(right)?;
    Ok(SemanticValue::expression(opcode, vec![left, right]))
}
