//! Session and engine messages

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigAction {
    LoggedIn { username: String },
    LoggedOut,
    /// Connection to the local service is up
    EngineConnected,
    ChangedFocus { app_focused: bool },
    /// Replace the caller's follower and following sets
    SetFollowSets {
        followers: Vec<String>,
        following: Vec<String>,
    },
    SetDeletedSelf { deleted_username: String },
    /// Failure without a dedicated error update
    GlobalError { error: String },
}
