//! App state - pure data structure with no I/O logic

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::app::waiting::WaitingState;
use crate::models::{FollowSuggestion, Invitation, NotificationGroups, PeopleItem};
use crate::route::RouteState;
use crate::rpc::types::{Email, UnfurlMode};

/// Session facts shared by every section
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub logged_in: bool,
    pub username: Option<String>,
    pub app_focused: bool,
    pub followers: HashSet<String>,
    pub following: HashSet<String>,
    pub deleted_username: Option<String>,
    pub global_error: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct PeopleState {
    pub old_items: Vec<PeopleItem>,
    pub new_items: Vec<PeopleItem>,
    pub follow_suggestions: Vec<FollowSuggestion>,
    pub version: i32,
    pub last_viewed: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default)]
pub struct EmailState {
    pub new_email: String,
    pub emails: Vec<Email>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct PassphraseState {
    pub new_passphrase: String,
    pub new_passphrase_confirm: String,
    pub error: Option<String>,
    pub has_pgp_keys_on_server: Option<bool>,
    pub remember_passphrase: bool,
}

#[derive(Clone, Debug, Default)]
pub struct NotificationsState {
    /// `None` until loaded, and while a slow refresh clears stale data
    pub groups: Option<NotificationGroups>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct InvitesState {
    pub accepted: Vec<Invitation>,
    pub pending: Vec<Invitation>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct UnfurlState {
    pub mode: Option<UnfurlMode>,
    pub whitelist: Vec<String>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct SettingsState {
    pub waiting_for_response: bool,
    pub email: EmailState,
    pub passphrase: PassphraseState,
    pub notifications: NotificationsState,
    pub invites: InvitesState,
    pub allow_delete_account: bool,
    pub lockdown_mode: Option<bool>,
    pub unfurl: UnfurlState,
}

/// Main application state - pure data, no I/O
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub session: SessionState,
    pub route: RouteState,
    pub people: PeopleState,
    pub settings: SettingsState,
    pub waiting: WaitingState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
