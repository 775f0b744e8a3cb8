//! Types and helpers shared by several models.

use serde::{Deserialize, Serialize};

use crate::error::{InteractaError, Result};

/// Prefix of every resource path under the API base.
pub(crate) const EXTERNAL_V2: &str = "external/v2";

/// Build a resource path under `external/v2/`.
pub(crate) fn external_path(rest: &str) -> String {
    format!("{EXTERNAL_V2}/{rest}")
}

/// Reference to another object by id, as used in request payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: u64,
}

impl From<u64> for IdRef {
    fn from(id: u64) -> Self {
        Self { id }
    }
}

/// Reference to a named object (business unit, area, community).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Reduce lookup candidates to exactly one.
///
/// `what` names the lookup in the error message.
pub(crate) fn exactly_one<T>(mut candidates: Vec<T>, what: &str) -> Result<T> {
    match candidates.len() {
        0 => Err(InteractaError::ObjectNotFound(format!(
            "{what} not found in Interacta"
        ))),
        1 => Ok(candidates.remove(0)),
        n => Err(InteractaError::MultipleObjectsFound(format!(
            "{n} objects match {what} in Interacta"
        ))),
    }
}
