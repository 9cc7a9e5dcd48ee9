//! Application constants
//!
//! Centralized location for waiting keys, backend endpoints and defaults.

use std::time::Duration;

/// Number of follow suggestions requested when a caller doesn't specify one
pub const DEFAULT_NUM_FOLLOW_SUGGESTIONS: u32 = 10;

/// Route name of the people tab (segment 0 of every people path)
pub const PEOPLE_TAB: &str = "tabs:peopleTab";

/// Route segment of a profile screen pushed on top of the people tab
pub const PROFILE_ROUTE: &str = "profile";

// Waiting keys
pub const GET_PEOPLE_DATA_WAITING_KEY: &str = "getPeopleData";
pub const SETTINGS_WAITING_KEY: &str = "settings:generic";
pub const CHAT_UNFURL_WAITING_KEY: &str = "settings:chatUnfurl";
pub const TRACE_IN_PROGRESS_KEY: &str = "settings:traceInProgress";
pub const PROCESSOR_PROFILE_IN_PROGRESS_KEY: &str = "settings:processorProfileInProgress";

// API server endpoints
pub const ENDPOINT_SUBSCRIBE: &str = "account/subscribe";
pub const ENDPOINT_SUBSCRIPTIONS: &str = "account/subscriptions";
pub const ENDPOINT_INVITATIONS_SENT: &str = "invitations_sent";
pub const ENDPOINT_SEND_INVITATION: &str = "send_invitation";
pub const ENDPOINT_CANCEL_INVITATION: &str = "cancel_invitation";

/// Notification group that is stored in chat settings instead of the API server
pub const SECURITY_GROUP: &str = "security";

/// Notification group that must be present before a toggle can be saved
pub const EMAIL_GROUP: &str = "email";

/// Prefix of a shareable invitation link
pub const INVITE_LINK_PREFIX: &str = "keybase.io/inv/";

/// Number of invitation id characters that make up the link
pub const INVITE_CODE_LEN: usize = 10;

/// Route pushed after an invitation was sent
pub const INVITE_SENT_ROUTE: &str = "inviteSent";

/// How long a notifications refresh may take before stale groups are cleared
pub const NOTIFICATIONS_CLEAR_DELAY: Duration = Duration::from_millis(500);

pub const PASSPHRASE_MISMATCH: &str = "Passphrases don't match";
pub const UNFURL_LOAD_ERROR: &str = "Unable to load link preview settings, please try again.";
pub const UNFURL_SAVE_ERROR: &str = "Unable to save link preview settings, please try again.";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
