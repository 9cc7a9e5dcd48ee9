//! Domain DTOs produced from RPC responses and consumed by app state

pub mod people;
pub mod settings;

pub use people::{FollowSuggestion, FollowedNotification, PeopleItem};
pub use settings::{
    Invitation, InviteType, NotificationGroup, NotificationGroups, NotificationSetting,
    RawInvitation,
};
