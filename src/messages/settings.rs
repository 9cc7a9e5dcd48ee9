//! Account settings messages

use serde::{Deserialize, Serialize};

use crate::models::{Invitation, NotificationGroups};
use crate::rpc::types::{Email, UnfurlMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingsAction {
    /// Settings-wide spinner
    WaitingForResponse { waiting: bool },

    // PGP
    OnUpdatePgpSettings,
    OnUpdatedPgpSettings { has_keys: bool },

    // Email
    OnChangeNewEmail { email: String },
    OnSubmitNewEmail,
    OnUpdateEmailError { error: String },
    LoadSettings,
    LoadedSettings { emails: Vec<Email> },

    // Passphrase
    OnChangeNewPassphrase { passphrase: String },
    OnChangeNewPassphraseConfirm { passphrase: String },
    OnSubmitNewPassphrase,
    OnUpdatePassphraseError { error: String },
    LoadRememberPassphrase,
    LoadedRememberPassphrase { remember: bool },
    OnChangeRememberPassphrase { remember: bool },

    // Notifications
    NotificationsRefresh,
    /// `None` clears stale groups while a slow refresh is in flight
    NotificationsRefreshed { groups: Option<NotificationGroups> },
    NotificationsRefreshError { error: String },
    /// Flip one setting, or the group's unsubscribe-all switch when `name` is `None`
    NotificationsToggle { group: String, name: Option<String> },
    NotificationsSaved,
    NotificationsSaveError { error: String },

    // Invitations
    InvitesRefresh,
    InvitesRefreshed {
        accepted: Vec<Invitation>,
        pending: Vec<Invitation>,
    },
    InvitesRefreshError { error: String },
    InvitesSend { email: String, message: Option<String> },
    InvitesSent,
    InvitesSentError { error: String },
    InvitesReclaim { invite_id: String },
    InvitesReclaimed,
    InvitesReclaimedError { error_text: String },

    // Account
    DbNuke,
    SetAllowDeleteAccount { allow: bool },
    DeleteAccountForever,
    LoadLockdownMode,
    LoadedLockdownMode { status: Option<bool> },
    OnChangeLockdownMode { enabled: bool },

    // Diagnostics
    Trace { duration_seconds: u64 },
    ProcessorProfile { duration_seconds: u64 },

    // Link previews
    UnfurlSettingsRefresh,
    UnfurlSettingsRefreshed { mode: UnfurlMode, whitelist: Vec<String> },
    UnfurlSettingsSaved { mode: UnfurlMode, whitelist: Vec<String> },
    UnfurlSettingsError { error: String },
}
