use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{TranslateError, TranslateErrorKind};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Environment {
    pub variables: BTreeMap<String, serde_json::Value>,
    pub lists: BTreeMap<String, Vec<serde_json::Value>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    // Binds `name` to 0. Redeclaring an existing variable resets it.
    pub fn declare_variable(&mut self, name: &str) {
        self.variables
            .insert(name.to_string(), serde_json::Value::from(0));
    }

    pub fn declare_list(&mut self, name: &str) {
        self.lists.insert(name.to_string(), Vec::new());
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn has_list(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    pub fn require_variable(&self, name: &str) -> Result<(), TranslateError> {
        if self.has_variable(name) {
            return Ok(());
        }
        Err(TranslateErrorKind::UnknownVariable {
            name: name.to_string(),
        }
        .into())
    }

    pub fn require_list(&self, name: &str) -> Result<(), TranslateError> {
        if self.has_list(name) {
            return Ok(());
        }
        Err(TranslateErrorKind::UnknownList {
            name: name.to_string(),
        }
        .into())
    }

    pub fn assign_variable(
        &mut self,
        name: &str,
        value: serde_json::Value,
    ) -> Result<(), TranslateError> {
        self.require_variable(name)?;
        self.variables.insert(name.to_string(), value);
        Ok(())
    }

    pub fn delete_variable(&mut self, name: &str) -> Result<(), TranslateError> {
        self.require_variable(name)?;
        self.variables.remove(name);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    pub environment: Environment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<Vec<serde_json::Value>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recording_program() -> Self {
        Self {
            environment: Environment::new(),
            program: Some(Vec::new()),
        }
    }

    pub fn with_environment(environment: Environment) -> Self {
        Self {
            environment,
            program: None,
        }
    }

    pub fn record(&mut self, action_list: serde_json::Value) -> bool {
        match self.program.as_mut() {
            Some(program) => {
                program.push(action_list);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn declared_variables_start_at_zero() {
        let mut environment = Environment::new();
        environment.declare_variable("x");
        assert_eq!(environment.variables["x"], json!(0));
    }

    #[test]
    fn redeclaration_resets_value() {
        let mut environment = Environment::new();
        environment.declare_variable("x");
        environment
            .assign_variable("x", json!(5))
            .expect("assign should pass");
        environment.declare_variable("x");
        assert_eq!(environment.variables["x"], json!(0));
    }

    #[test]
    fn assigning_or_deleting_unknown_variable_fails() {
        let mut environment = Environment::new();
        let error = environment
            .assign_variable("y", json!(1))
            .expect_err("unknown variable");
        assert_eq!(error.code(), "UNKNOWN_VARIABLE");
        let error = environment
            .delete_variable("y")
            .expect_err("unknown variable");
        assert_eq!(error.code(), "UNKNOWN_VARIABLE");
        assert!(environment.variables.is_empty());
    }

    #[test]
    fn record_is_a_no_op_without_program_buffer() {
        let mut session = Session::new();
        assert!(!session.record(json!([["stopAllSounds"]])));
        assert_eq!(session.program, None);

        let mut recording = Session::recording_program();
        assert!(recording.record(json!([["stopAllSounds"]])));
        assert_eq!(recording.program, Some(vec![json!([["stopAllSounds"]])]));
    }

    #[test]
    fn session_state_round_trips_through_json() {
        let mut session = Session::recording_program();
        session.environment.declare_variable("score");
        session.environment.declare_list("names");
        let raw = serde_json::to_string(&session).expect("session should serialize");
        let restored: Session = serde_json::from_str(&raw).expect("session should parse");
        assert_eq!(restored, session);
    }
}
