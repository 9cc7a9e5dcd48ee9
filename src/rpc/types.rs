//! Request and response types exchanged with the backend

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ========================
// Home screen
// ========================

/// Kind tag of a home screen item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HomeScreenItemType {
    Todo,
    People,
    Announcement,
}

/// Kind of a todo item, also the argument of skip-todo
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HomeScreenTodoType {
    None,
    Bio,
    Proof,
    Device,
    Follow,
    Chat,
    Paperkey,
    Team,
    Folder,
    GitRepo,
    TeamShowcase,
    AvatarTeam,
    AvatarUser,
    AddPhoneNumber,
    VerifyAllPhoneNumber,
    VerifyAllEmail,
    LegacyEmailVisibility,
    AddEmail,
    Announcement,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeScreenTodo {
    pub todo_type: HomeScreenTodoType,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeScreenPeopleFollowed {
    pub username: String,
    /// Milliseconds since the epoch
    pub follow_time: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeScreenPeopleNotification {
    #[serde(default)]
    pub followed: Vec<HomeScreenPeopleFollowed>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeScreenAnnouncement {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub confirm_label: Option<String>,
    #[serde(default)]
    pub dismissable: bool,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// Payload of a home screen item, tagged by kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "camelCase")]
pub enum HomeScreenItemData {
    Todo(HomeScreenTodo),
    People(HomeScreenPeopleNotification),
    Announcement(HomeScreenAnnouncement),
}

impl HomeScreenItemData {
    pub fn kind(&self) -> HomeScreenItemType {
        match self {
            HomeScreenItemData::Todo(_) => HomeScreenItemType::Todo,
            HomeScreenItemData::People(_) => HomeScreenItemType::People,
            HomeScreenItemData::Announcement(_) => HomeScreenItemType::Announcement,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeScreenItem {
    #[serde(default)]
    pub badged: bool,
    pub data: HomeScreenItemData,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeUserSummary {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeScreen {
    /// Milliseconds since the epoch
    pub last_viewed: i64,
    pub version: i32,
    #[serde(default)]
    pub items: Option<Vec<HomeScreenItem>>,
    #[serde(default)]
    pub follow_suggestions: Option<Vec<HomeUserSummary>>,
}

// ========================
// API server
// ========================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StringKvPair {
    pub key: String,
    pub value: String,
}

impl StringKvPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        StringKvPair {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Raw API server response; `body` is a JSON document
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRes {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub http_status: i32,
    #[serde(default)]
    pub app_status: String,
}

// ========================
// Account
// ========================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassphraseChangeArg {
    pub old_passphrase: String,
    pub passphrase: String,
    pub force: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub email: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub emails: Vec<Email>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockdownHistory {
    pub status: bool,
    pub creation_time: i64,
    #[serde(default)]
    pub device_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GetLockdownResponse {
    #[serde(default)]
    pub history: Vec<LockdownHistory>,
    pub status: bool,
}

// ========================
// Chat
// ========================

/// Chat-wide notification switches
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalAppNotificationSetting {
    NewMessages,
    PlaintextMobile,
    PlaintextDesktop,
    DefaultSoundMobile,
    DisableTyping,
}

impl GlobalAppNotificationSetting {
    /// Look a setting up by the name used in notification groups
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "newmessages" => Some(Self::NewMessages),
            "plaintextmobile" => Some(Self::PlaintextMobile),
            "plaintextdesktop" => Some(Self::PlaintextDesktop),
            "defaultsoundmobile" => Some(Self::DefaultSoundMobile),
            "disabletyping" => Some(Self::DisableTyping),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NewMessages => "newmessages",
            Self::PlaintextMobile => "plaintextmobile",
            Self::PlaintextDesktop => "plaintextdesktop",
            Self::DefaultSoundMobile => "defaultsoundmobile",
            Self::DisableTyping => "disabletyping",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalAppNotificationSettings {
    #[serde(default)]
    pub settings: BTreeMap<GlobalAppNotificationSetting, bool>,
}

impl GlobalAppNotificationSettings {
    pub fn get(&self, setting: GlobalAppNotificationSetting) -> bool {
        self.settings.get(&setting).copied().unwrap_or(false)
    }
}

/// Link preview mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnfurlMode {
    #[default]
    Always,
    Never,
    WhitelistedOnly,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnfurlSettingsDisplay {
    pub mode: UnfurlMode,
    #[serde(default)]
    pub whitelist: Option<Vec<String>>,
}
