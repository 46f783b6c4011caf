use sn_core::{opcodes, SemanticValue, TranslateError};

use super::{pass, RuleCall, RuleTable};

pub(super) fn register(table: &mut RuleTable) {
    table
        .add("ITEM -> NP", pass::<0>)
        .add("ITEM -> MESSAGE_NAME", pass::<0>)
        .add("ITEM -> Unk", pass::<0>)
        .add("ITEM -> VARIABLE_NAME", |call| {
            Ok(SemanticValue::read_variable(call.variable(0)?))
        })
        .add("ITEM -> DataReporter", pass::<0>)
        .add("NP -> DataReporter", pass::<0>);

    table
        .add("DataCommand -> Add ITEM To LIST_NAME", |call| {
            let item = call.declared_operand(1)?;
            let list = declared_list(call, 3)?;
            Ok(SemanticValue::command(
                opcodes::APPEND_TO_LIST,
                vec![item, list],
            ))
        })
        .add("DataCommand -> Delete Ele NP Of LIST_NAME", |call| {
            delete_line(call, 2, 4)
        })
        .add("DataCommand -> Delete Det OrderAdverb Ele Of LIST_NAME", |call| {
            delete_line(call, 2, 5)
        })
        .add("DataCommand -> Replace Ele NP Of LIST_NAME With ITEM", |call| {
            set_line(call, 2, 4, 6)
        })
        .add(
            "DataCommand -> Replace Det OrderAdverb Ele Of LIST_NAME With ITEM",
            |call| set_line(call, 2, 5, 7),
        )
        .add("DataCommand -> Set Ele NP Of LIST_NAME To ITEM", |call| {
            set_line(call, 2, 4, 6)
        })
        .add(
            "DataCommand -> Set Det OrderAdverb Ele Of LIST_NAME To ITEM",
            |call| set_line(call, 2, 5, 7),
        )
        .add("DataReporter -> The OrderAdverb Item In LIST_NAME", |call| {
            get_line(call, 1, 4)
        })
        .add("DataReporter -> Item NP Of LIST_NAME", |call| {
            get_line(call, 1, 3)
        });

    table
        .add("BP -> Item Unk In LIST_NAME", |call| {
            let item = call.loose_operand(1)?;
            let list = declared_list(call, 3)?;
            Ok(contains(list, item))
        })
        .add("BP -> Item Unk LMOD In LIST_NAME", |call| {
            let item = call.loose_operand(1)?;
            let modifier = call.modifier(2)?;
            let list = declared_list(call, 4)?;
            Ok(modifier.apply(contains(list, item)))
        })
        .add("BP -> LIST_NAME Contains ITEM", |call| {
            let list = declared_list(call, 0)?;
            let item = call.operand(2)?;
            Ok(contains(list, item))
        });
}

fn declared_list(call: &mut RuleCall<'_>, position: usize) -> Result<SemanticValue, TranslateError> {
    let name = call.list(position)?;
    call.session.environment.require_list(&name)?;
    Ok(SemanticValue::ListRef(name))
}

fn index(call: &mut RuleCall<'_>, position: usize) -> Result<SemanticValue, TranslateError> {
    match call.take(position)? {
        SemanticValue::Number(value) if value >= 1.0 && value.fract() == 0.0 => {
            Ok(SemanticValue::Number(value))
        }
        value @ SemanticValue::Expression(_) => {
            call.require_reads(&value)?;
            Ok(value)
        }
        other => Err(call.mismatch(position, "1-based index", &other)),
    }
}

fn delete_line(
    call: &mut RuleCall<'_>,
    index_position: usize,
    list_position: usize,
) -> Result<SemanticValue, TranslateError> {
    let index = index(call, index_position)?;
    let list = declared_list(call, list_position)?;
    Ok(SemanticValue::command(opcodes::DELETE_LINE, vec![index, list]))
}

fn set_line(
    call: &mut RuleCall<'_>,
    index_position: usize,
    list_position: usize,
    item_position: usize,
) -> Result<SemanticValue, TranslateError> {
    let index = index(call, index_position)?;
    let list = declared_list(call, list_position)?;
    let item = call.declared_operand(item_position)?;
    Ok(SemanticValue::command(opcodes::SET_LINE, vec![index, list, item]))
}

fn get_line(
    call: &mut RuleCall<'_>,
    index_position: usize,
    list_position: usize,
) -> Result<SemanticValue, TranslateError> {
    let index = index(call, index_position)?;
    let list = declared_list(call, list_position)?;
    Ok(SemanticValue::expression(opcodes::GET_LINE, vec![index, list]))
}

fn contains(list: SemanticValue, item: SemanticValue) -> SemanticValue {
    SemanticValue::expression(opcodes::LIST_CONTAINS, vec![list, item])
}
