use sn_core::{opcodes, Comparator, Relation, SemanticValue, TranslateError};

use super::{pass, RuleCall, RuleTable};

pub(super) fn register(table: &mut RuleTable) {
    table
        .add("CBP -> Equal To", |_| comparator(Relation::Equal))
        .add("CBP -> Greater Than", |_| comparator(Relation::Greater))
        .add("CBP -> Less Than", |_| comparator(Relation::Less))
        .add("CBP -> Greater Than Or Equal To", |_| {
            comparator(Relation::GreaterOrEqual)
        })
        .add("CBP -> Less Than Or Equal To", |_| {
            comparator(Relation::LessOrEqual)
        })
        .add("CBP -> LMOD CBP", |call| {
            let modifier = call.modifier(0)?;
            let base = call.comparator(1)?;
            Ok(SemanticValue::Comparator(base.modified(modifier)))
        })
        .add("LMOD -> POS", pass::<0>)
        .add("LMOD -> NEG", pass::<0>);

    table
        .add("BP -> VARIABLE_NAME CBP Unk", |call| {
            let left = SemanticValue::read_variable(call.variable(0)?);
            compare(call, left, 1, 2)
        })
        .add("BP -> VARIABLE_NAME CBP VARIABLE_NAME", |call| {
            let left = SemanticValue::read_variable(call.variable(0)?);
            let comparator = call.comparator(1)?;
            let right = SemanticValue::read_variable(call.variable(2)?);
            Ok(comparator.apply(left, right))
        })
        .add("BP -> Unk CBP Unk", |call| {
            let left = call.loose_operand(0)?;
            compare(call, left, 1, 2)
        })
        .add("BP -> Timer CBP Unk", |call| {
            let left = call.operand(0)?;
            compare(call, left, 1, 2)
        })
        .add("BP -> Boolean", pass::<0>)
        .add("Boolean -> BooleanLiteral", pass::<0>)
        .add("Boolean -> LMOD BooleanLiteral", |call| {
            let modifier = call.modifier(0)?;
            let literal = call.condition(1)?;
            Ok(modifier.apply(literal))
        })
        .add("BP -> BP And BP", |call| junction(call, opcodes::AND))
        .add("BP -> BP Or BP", |call| junction(call, opcodes::OR));
}

fn comparator(relation: Relation) -> Result<SemanticValue, TranslateError> {
    Ok(SemanticValue::Comparator(Comparator::new(relation)))
}

fn compare(
    call: &mut RuleCall<'_>,
    left: SemanticValue,
    comparator_position: usize,
    right_position: usize,
) -> Result<SemanticValue, TranslateError> {
    let comparator = call.comparator(comparator_position)?;
    let right = call.loose_operand(right_position)?;
    Ok(comparator.apply(left, right))
}

fn junction(call: &mut RuleCall<'_>, opcode: &'static str) -> Result<SemanticValue, TranslateError> {
    let left = call.condition(0)?;
    let right = call.condition(2)?;
    Ok(SemanticValue::expression(opcode, vec![left, right]))
}
