use sn_core::{Environment, Script, SemanticValue, TranslateError, TranslateErrorKind};

pub fn assemble(root: SemanticValue, environment: &Environment) -> Result<Script, TranslateError> {
    let commands = match root {
        SemanticValue::Null => Vec::new(),
        SemanticValue::Command(command) => vec![command],
        SemanticValue::CommandList(commands) | SemanticValue::Handler(commands) => commands,
        other => {
            return Err(TranslateErrorKind::UnresolvedTopLevel {
                found: other.type_name(),
            }
            .into())
        }
    };

    Ok(Script {
        commands,
        variables: environment.variables.clone(),
        lists: environment.lists.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sn_core::{opcodes, Command, Comparator, Relation};

    #[test]
    fn null_root_keeps_declarations_only() {
        let mut environment = Environment::new();
        environment.declare_variable("x");
        let script = assemble(SemanticValue::Null, &environment).expect("assemble");
        assert!(script.commands.is_empty());
        assert_eq!(script.variables["x"], json!(0));
    }

    #[test]
    fn lone_command_is_wrapped() {
        let script = assemble(
            SemanticValue::command(opcodes::TIMER_RESET, Vec::new()),
            &Environment::new(),
        )
        .expect("assemble");
        assert_eq!(script.commands, vec![Command::bare(opcodes::TIMER_RESET)]);
    }

    #[test]
    fn expressions_and_comparators_are_not_scripts() {
        for root in [
            SemanticValue::expression(opcodes::EQUAL, vec![SemanticValue::number(1)]),
            SemanticValue::Comparator(Comparator::new(Relation::Less)),
            SemanticValue::number(3),
        ] {
            let error = assemble(root, &Environment::new()).expect_err("not executable");
            assert_eq!(error.code(), "UNRESOLVED_TOP_LEVEL");
        }
    }
}
