use sn_core::{opcodes, SemanticValue, TranslateError};

use super::{RuleCall, RuleTable};

const VOLUME_STEP: f64 = 10.0;
const TEMPO_STEP: f64 = 10.0;

pub(super) fn register(table: &mut RuleTable) {
    table
        .add("SoundCommand -> Play Det NAME_OF_SOUND Sound", play_sound)
        .add("SoundCommand -> Set Volume To Unk", |call| {
            set_volume(call, 3)
        })
        .add("SoundCommand -> Set Volume To Unk Percent", |call| {
            set_volume(call, 3)
        })
        .add("SoundCommand -> Change Volume By Unk", |call| {
            let amount = call.number(3)?;
            Ok(step(opcodes::CHANGE_VOLUME, amount))
        })
        .add("SoundCommand -> Change Pitch Effect By Unk", |call| {
            let amount = call.number(4)?;
            Ok(step(opcodes::CHANGE_TEMPO, amount))
        })
        .add("SoundCommand -> Stop All Sounds", stop_all)
        .add("SoundCommand -> Stop", stop_all)
        .add("SoundCommand -> Softer", |_| {
            Ok(step(opcodes::CHANGE_VOLUME, -VOLUME_STEP))
        })
        .add("SoundCommand -> Louder", |_| {
            Ok(step(opcodes::CHANGE_VOLUME, VOLUME_STEP))
        })
        .add("SoundCommand -> Slower", |_| {
            Ok(step(opcodes::CHANGE_TEMPO, -TEMPO_STEP))
        })
        .add("SoundCommand -> Faster", |_| {
            Ok(step(opcodes::CHANGE_TEMPO, TEMPO_STEP))
        });
}

fn play_sound(call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    let name = call.name(2)?;
    Ok(SemanticValue::command(
        opcodes::PLAY_SOUND_AND_WAIT,
        vec![SemanticValue::StringLiteral(name)],
    ))
}

fn set_volume(call: &mut RuleCall<'_>, position: usize) -> Result<SemanticValue, TranslateError> {
    let level = call.number(position)?;
    Ok(SemanticValue::command(
        opcodes::SET_VOLUME,
        vec![SemanticValue::Number(level)],
    ))
}

fn stop_all(_call: &mut RuleCall<'_>) -> Result<SemanticValue, TranslateError> {
    Ok(SemanticValue::command(opcodes::STOP_ALL_SOUNDS, Vec::new()))
}

fn step(opcode: &'static str, amount: f64) -> SemanticValue {
    SemanticValue::command(opcode, vec![SemanticValue::Number(amount)])
}
