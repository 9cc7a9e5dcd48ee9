//! Account settings DTOs: invitations and notification groups

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{INVITE_CODE_LEN, INVITE_LINK_PREFIX};

/// Invitation record as returned by the `invitations_sent` endpoint
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInvitation {
    #[serde(default)]
    pub assertion: Option<String>,
    /// Seconds since the epoch
    #[serde(default)]
    pub ctime: i64,
    #[serde(default)]
    pub email: Option<String>,
    pub invitation_id: String,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteType {
    Pending,
    Accepted,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: String,
    pub created: DateTime<Utc>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub uid: Option<String>,
    pub url: String,
    pub invite_type: InviteType,
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Shareable link built from the leading characters of an invitation id
pub fn invite_link(invitation_id: &str) -> String {
    let code: String = invitation_id.chars().take(INVITE_CODE_LEN).collect();
    format!("{}{}", INVITE_LINK_PREFIX, code)
}

impl Invitation {
    /// Accepted iff the record resolved to both a username and a uid.
    /// The backend's `type` field is not consulted.
    pub fn from_raw(raw: RawInvitation) -> Self {
        let invite_type = if non_empty(&raw.username) && non_empty(&raw.uid) {
            InviteType::Accepted
        } else {
            InviteType::Pending
        };
        Invitation {
            url: invite_link(&raw.invitation_id),
            created: Utc
                .timestamp_opt(raw.ctime, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            id: raw.invitation_id,
            email: raw.email,
            username: raw.username,
            uid: raw.uid,
            invite_type,
        }
    }
}

/// Split invitation records into `(accepted, pending)`
pub fn classify_invitations(raw: Vec<RawInvitation>) -> (Vec<Invitation>, Vec<Invitation>) {
    raw.into_iter()
        .map(Invitation::from_raw)
        .partition(|i| i.invite_type == InviteType::Accepted)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSetting {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subscribed: bool,
}

impl NotificationSetting {
    pub fn new(name: impl Into<String>, description: impl Into<String>, subscribed: bool) -> Self {
        NotificationSetting {
            name: name.into(),
            description: description.into(),
            subscribed,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationGroup {
    #[serde(default)]
    pub settings: Vec<NotificationSetting>,
    #[serde(default, rename = "unsub")]
    pub unsubscribed_from_all: bool,
}

impl NotificationGroup {
    pub fn setting_mut(&mut self, name: &str) -> Option<&mut NotificationSetting> {
        self.settings.iter_mut().find(|s| s.name == name)
    }
}

/// Notification groups keyed by group name
pub type NotificationGroups = BTreeMap<String, NotificationGroup>;
