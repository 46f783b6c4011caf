use sn_core::{opcodes, Declaration, DeclarationKind, SemanticValue, TranslateError};

use super::{RuleCall, RuleTable};

pub(super) fn register(table: &mut RuleTable) {
    table
        .add("CreateCommand -> Make Det Clone Of Myself", |_| {
            Ok(SemanticValue::command(
                opcodes::CREATE_CLONE,
                vec![SemanticValue::text("myself")],
            ))
        })
        .add("CreateCommand -> Make VARIABLE_LIST", create_variables)
        .add("CreateCommand -> Make List LIST_NAME", create_list)
        // Sprite scope is decided by the packager; both forms declare the list.
        .add(
            "CreateCommand -> Make List LIST_NAME For Det Single Sprite",
            create_list,
        )
        .add(
            "CreateCommand -> Make List LIST_NAME For All Det Sprites",
            create_list,
        )
        .add("VARIABLE_LIST -> VARIABLE_NAME", |call| {
            let name = call.variable(0)?;
            Ok(SemanticValue::Declaration(Declaration::new(
                DeclarationKind::Variable,
                name,
            )))
        })
        .add("VARIABLE_LIST -> VARIABLE_NAME And VARIABLE_LIST", |call| {
            let name = call.variable(0)?;
            let mut rest = call.declaration(2)?;
            rest.names.insert(0, name);
            Ok(SemanticValue::Declaration(rest))
        });

    table
        .add("DataCommand -> Delete VARIABLE_NAME", delete_variable)
        .add("DataCommand -> Set VARIABLE_NAME To BP", |call| {
            set_from(call, 1, 3)
        })
        .add("DataCommand -> Set VARIABLE_NAME To NP", |call| {
            set_from(call, 1, 3)
        })
        .add("DataCommand -> Set VARIABLE_NAME To ITEM", |call| {
            set_from(call, 1, 3)
        })
        .add("DataCommand -> Add NP To VARIABLE_NAME", |call| {
            let amount = call.declared_operand(1)?;
            change_by(call, 3, amount)
        })
        .add("DataCommand -> Increment VARIABLE_NAME By NP", |call| {
            let amount = call.declared_operand(3)?;
            change_by(call, 1, amount)
        })
        .add("DataCommand -> Add VARIABLE_NAME To VARIABLE_NAME", |call| {
            let amount = read_declared(call, 1)?;
            change_by(call, 3, amount)
        })
        .add("DataCommand -> Subtract NP From VARIABLE_NAME", |call| {
            let amount = call.declared_operand(1)?;
            change_by(call, 3, negated(amount))
        })
        .add("DataCommand -> Decrement VARIABLE_NAME By NP", |call| {
            let amount = call.declared_operand(3)?;
            change_by(call, 1, negated(amount))
        })
        .add(
            "DataCommand -> Subtract VARIABLE_NAME From VARIABLE_NAME",
            |call| {
                let amount = read_declared(call, 1)?;
                change_by(call, 3, negated(amount))
            },
        )
        .add("DataCommand -> Multiply VARIABLE_NAME By NP", |call| {
            let factor = call.declared_operand(3)?;
            scale(call, opcodes::MULTIPLY, factor)
        })
        .add("DataCommand -> Multiply VARIABLE_NAME By VARIABLE_NAME", |call| {
            let factor = read_declared(call, 3)?;
            scale(call, opcodes::MULTIPLY, factor)
        })
        .add("DataCommand -> Divide VARIABLE_NAME By NP", |call| {
            let divisor = call.declared_operand(3)?;
            scale(call, opcodes::DIVIDE, divisor)
        })
        .add("DataCommand -> Divide VARIABLE_NAME By VARIABLE_NAME", |call| {
            let divisor = read_declared(call, 3)?;
            scale(call, opcodes::DIVIDE, divisor)
        });
}

fn create_variables(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    let declaration = call.declaration(1)?;
    if declaration.kind != DeclarationKind::Variable {
        return Err(call.mismatch(
            1,
            "variable declaration",
            &SemanticValue::Declaration(declaration),
        ));
    }
    for name in &declaration.names {
        call.session.environment.declare_variable(name);
    }
    Ok(SemanticValue::Null)
}

fn create_list(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    let name = call.list(2)?;
    call.session.environment.declare_list(&name);
    Ok(SemanticValue::Null)
}

fn delete_variable(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    let name = call.variable(1)?;
    call.session.environment.delete_variable(&name)?;
    Ok(SemanticValue::Null)
}

fn assign(
    call: &mut RuleCall<'_>,
    name: String,
    value: SemanticValue,
) -> Result<SemanticValue, TranslateError> {
    let wire = value.to_wire()?;
    call.session.environment.assign_variable(&name, wire)?;
    Ok(SemanticValue::command(
        opcodes::SET_VAR,
        vec![SemanticValue::StringLiteral(name), value],
    ))
}

fn set_from(
    call: &mut RuleCall<'_>,
    name_position: usize,
    value_position: usize,
) -> Result<SemanticValue, TranslateError> {
    let name = call.variable(name_position)?;
    let value = call.declared_operand(value_position)?;
    assign(call, name, value)
}

fn read_declared(call: &mut RuleCall<'_>, position: usize) -> Result<SemanticValue, TranslateError> {
    let name = call.variable(position)?;
    call.session.environment.require_variable(&name)?;
    Ok(SemanticValue::read_variable(name))
}

fn negated(amount: SemanticValue) -> SemanticValue {
    SemanticValue::expression(opcodes::MULTIPLY, vec![amount, SemanticValue::number(-1)])
}

fn change_by(
    call: &mut RuleCall<'_>,
    name_position: usize,
    amount: SemanticValue,
) -> Result<SemanticValue, TranslateError> {
    let name = call.variable(name_position)?;
    call.session.environment.require_variable(&name)?;
    Ok(SemanticValue::command(
        opcodes::CHANGE_VAR,
        vec![SemanticValue::StringLiteral(name), amount],
    ))
}

// `multiply x by 3` becomes `set x to (x * 3)`.
fn scale(
    call: &mut RuleCall<'_>,
    opcode: &'static str,
    operand: SemanticValue,
) -> Result<SemanticValue, TranslateError> {
    let name = call.variable(1)?;
    call.session.environment.require_variable(&name)?;
    let value = SemanticValue::expression(
        opcode,
        vec![SemanticValue::read_variable(name.clone()), operand],
    );
    assign(call, name, value)
}
