use std::fmt::Display;

use sn_api::BatchFailure;
use sn_core::TranslateError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub(crate) struct CliError {
    pub(crate) code: String,
    pub(crate) message: String,
}

impl CliError {
    pub(crate) fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<TranslateError> for CliError {
    fn from(error: TranslateError) -> Self {
        Self::new(error.code(), error.describe())
    }
}

impl From<BatchFailure> for CliError {
    fn from(failure: BatchFailure) -> Self {
        Self::new(
            failure.error.code(),
            format!("{}: {}", failure.source, failure.error.describe()),
        )
    }
}

fn map_error(code: &'static str, error: impl Display) -> CliError {
    CliError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: CliError) -> i32 {
    tracing::debug!(code = error.code.as_str(), "command failed");
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    1
}

pub(crate) fn map_cli_source_path(error: std::io::Error) -> CliError {
    map_error("CLI_SOURCE_PATH", error)
}

pub(crate) fn map_cli_source_scan(error: std::path::StripPrefixError) -> CliError {
    map_error("CLI_SOURCE_SCAN", error)
}

pub(crate) fn map_cli_source_read(error: std::io::Error) -> CliError {
    map_error("CLI_SOURCE_READ", error)
}

pub(crate) fn map_cli_state_write(error: std::io::Error) -> CliError {
    map_error("CLI_STATE_WRITE", error)
}

pub(crate) fn map_cli_state_read(error: std::io::Error) -> CliError {
    map_error("CLI_STATE_READ", error)
}

pub(crate) fn map_cli_state_invalid(error: serde_json::Error) -> CliError {
    map_error("CLI_STATE_INVALID", error)
}

pub(crate) fn map_cli_output(error: serde_json::Error) -> CliError {
    map_error("CLI_OUTPUT", error)
}

#[cfg(test)]
mod error_map_tests {
    use super::*;
    use sn_core::TranslateErrorKind;

    #[test]
    fn emit_error_returns_non_zero_exit_code() {
        let code = emit_error(CliError::new("ERR", "failed"));
        assert_eq!(code, 1);
    }

    #[test]
    fn translate_errors_keep_their_code() {
        let error = TranslateError::new(TranslateErrorKind::UnknownVariable {
            name: "y".to_string(),
        })
        .in_sentence("delete y");
        let mapped = CliError::from(error);
        assert_eq!(mapped.code, "UNKNOWN_VARIABLE");
        assert_eq!(mapped.message, "variable \"y\" is not declared in \"delete y\"");
    }

    #[test]
    fn batch_failures_name_the_source() {
        let mapped = CliError::from(BatchFailure {
            source: "02-set.tree".to_string(),
            error: TranslateError::new(TranslateErrorKind::UnknownList {
                name: "names".to_string(),
            }),
        });
        assert_eq!(mapped.code, "UNKNOWN_LIST");
        assert!(mapped.message.starts_with("02-set.tree: "));
    }

    #[test]
    fn mapping_helpers_keep_error_codes() {
        assert_eq!(
            map_cli_source_path(std::io::Error::other("path")).code,
            "CLI_SOURCE_PATH"
        );

        let strip_error = std::path::Path::new("/a")
            .strip_prefix("/b")
            .expect_err("strip prefix");
        assert_eq!(map_cli_source_scan(strip_error).code, "CLI_SOURCE_SCAN");

        assert_eq!(
            map_cli_source_read(std::io::Error::other("read")).code,
            "CLI_SOURCE_READ"
        );
        assert_eq!(
            map_cli_state_write(std::io::Error::other("write")).code,
            "CLI_STATE_WRITE"
        );
        assert_eq!(
            map_cli_state_read(std::io::Error::other("read")).code,
            "CLI_STATE_READ"
        );

        let invalid = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert_eq!(map_cli_state_invalid(invalid).code, "CLI_STATE_INVALID");
    }
}
