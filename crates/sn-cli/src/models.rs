use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sn_core::Session;

pub(crate) const SESSION_STATE_SCHEMA: &str = "sn-session.v1";

#[derive(Debug, Clone)]
pub(crate) struct LoadedTrees {
    pub(crate) root: PathBuf,
    pub(crate) sources: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionStateV1 {
    pub(crate) schema_version: String,
    pub(crate) session: Session,
}

impl SessionStateV1 {
    pub(crate) fn new(session: Session) -> Self {
        Self {
            schema_version: SESSION_STATE_SCHEMA.to_string(),
            session,
        }
    }
}
