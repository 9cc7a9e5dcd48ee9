//! Waiting-key messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaitingAction {
    Increment { key: String },
    Decrement { key: String },
    Clear { key: String },
}
