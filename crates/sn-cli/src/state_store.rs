use std::fs;
use std::path::Path;

use crate::{
    map_cli_output, map_cli_state_invalid, map_cli_state_read, map_cli_state_write, CliError,
    SessionStateV1, SESSION_STATE_SCHEMA,
};

pub(crate) fn save_session_state(path: &Path, state: &SessionStateV1) -> Result<(), CliError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(map_cli_state_write)?;

    let payload = serde_json::to_string(state).map_err(map_cli_output)?;
    fs::write(path, payload).map_err(map_cli_state_write)
}

pub(crate) fn load_session_state(path: &Path) -> Result<SessionStateV1, CliError> {
    if !path.exists() {
        return Err(CliError::new(
            "CLI_STATE_NOT_FOUND",
            format!("State file does not exist: {}", path.display()),
        ));
    }

    let raw = fs::read_to_string(path).map_err(map_cli_state_read)?;
    let state: SessionStateV1 = serde_json::from_str(&raw).map_err(map_cli_state_invalid)?;

    if state.schema_version != SESSION_STATE_SCHEMA {
        return Err(CliError::new(
            "CLI_STATE_SCHEMA",
            format!("Unsupported session state schema: {}", state.schema_version),
        ));
    }

    Ok(state)
}
