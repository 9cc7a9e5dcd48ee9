//! People feed entries and follow suggestions

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::rpc::types::{HomeScreenItem, HomeScreenItemData, HomeScreenItemType, HomeScreenTodoType};

/// Convert backend milliseconds to a timestamp, clamping garbage to the epoch
pub fn millis_to_datetime(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowedNotification {
    pub username: String,
    pub follow_time: DateTime<Utc>,
}

/// One entry of the people feed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PeopleItem {
    Todo {
        badged: bool,
        todo_type: HomeScreenTodoType,
    },
    Notification {
        badged: bool,
        new_follows: Vec<FollowedNotification>,
        notification_time: DateTime<Utc>,
    },
    Announcement {
        badged: bool,
        id: i64,
        text: String,
        url: Option<String>,
        confirm_label: Option<String>,
        dismissable: bool,
        icon_url: Option<String>,
    },
}

impl PeopleItem {
    pub fn from_rpc(item: HomeScreenItem) -> Self {
        let badged = item.badged;
        match item.data {
            HomeScreenItemData::Todo(todo) => PeopleItem::Todo {
                badged,
                todo_type: todo.todo_type,
            },
            HomeScreenItemData::People(people) => {
                let notification_time = people
                    .followed
                    .iter()
                    .map(|f| f.follow_time)
                    .max()
                    .map(millis_to_datetime)
                    .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
                PeopleItem::Notification {
                    badged,
                    new_follows: people
                        .followed
                        .into_iter()
                        .map(|f| FollowedNotification {
                            username: f.username,
                            follow_time: millis_to_datetime(f.follow_time),
                        })
                        .collect(),
                    notification_time,
                }
            }
            HomeScreenItemData::Announcement(a) => PeopleItem::Announcement {
                badged,
                id: a.id,
                text: a.text,
                url: a.url,
                confirm_label: a.confirm_label,
                dismissable: a.dismissable,
                icon_url: a.icon_url,
            },
        }
    }

    pub fn badged(&self) -> bool {
        match self {
            PeopleItem::Todo { badged, .. }
            | PeopleItem::Notification { badged, .. }
            | PeopleItem::Announcement { badged, .. } => *badged,
        }
    }
}

/// An item is new when it's badged or a todo
pub fn is_new_item(item: &HomeScreenItem) -> bool {
    item.badged || item.data.kind() == HomeScreenItemType::Todo
}

/// Split feed items into `(old, new)` in a single pass, preserving order
pub fn partition_items(items: Vec<HomeScreenItem>) -> (Vec<PeopleItem>, Vec<PeopleItem>) {
    items
        .into_iter()
        .fold((Vec::new(), Vec::new()), |(mut old, mut new), item| {
            if is_new_item(&item) {
                new.push(PeopleItem::from_rpc(item));
            } else {
                old.push(PeopleItem::from_rpc(item));
            }
            (old, new)
        })
}

/// A suggested user, annotated with the caller's relationship to them
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowSuggestion {
    pub username: String,
    pub full_name: String,
    pub follows_me: bool,
    pub i_follow: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::types::{
        HomeScreenAnnouncement, HomeScreenPeopleFollowed, HomeScreenPeopleNotification,
        HomeScreenTodo,
    };

    fn todo(badged: bool) -> HomeScreenItem {
        HomeScreenItem {
            badged,
            data: HomeScreenItemData::Todo(HomeScreenTodo {
                todo_type: HomeScreenTodoType::Bio,
            }),
        }
    }

    fn follow(badged: bool, times: &[i64]) -> HomeScreenItem {
        HomeScreenItem {
            badged,
            data: HomeScreenItemData::People(HomeScreenPeopleNotification {
                followed: times
                    .iter()
                    .enumerate()
                    .map(|(i, t)| HomeScreenPeopleFollowed {
                        username: format!("user{}", i),
                        follow_time: *t,
                    })
                    .collect(),
            }),
        }
    }

    fn announcement(badged: bool) -> HomeScreenItem {
        HomeScreenItem {
            badged,
            data: HomeScreenItemData::Announcement(HomeScreenAnnouncement {
                id: 9,
                text: "New app version".into(),
                url: None,
                confirm_label: Some("Update".into()),
                dismissable: true,
                icon_url: None,
            }),
        }
    }

    #[test]
    fn test_partition_places_every_item_once() {
        let items = vec![
            todo(false),
            todo(true),
            follow(false, &[1]),
            follow(true, &[2]),
            announcement(false),
            announcement(true),
        ];
        let expected_new: Vec<bool> = items.iter().map(is_new_item).collect();
        let (old, new) = partition_items(items);

        assert_eq!(old.len() + new.len(), 6);
        assert_eq!(new.len(), expected_new.iter().filter(|n| **n).count());
        // unbadged todos are still new
        assert!(new.iter().any(|i| matches!(i, PeopleItem::Todo { badged: false, .. })));
        assert!(old.iter().all(|i| !i.badged()));
        assert!(old.iter().all(|i| !matches!(i, PeopleItem::Todo { .. })));
    }

    #[test]
    fn test_partition_keeps_order() {
        let (old, new) = partition_items(vec![follow(false, &[1]), announcement(false)]);
        assert!(new.is_empty());
        assert!(matches!(old[0], PeopleItem::Notification { .. }));
        assert!(matches!(old[1], PeopleItem::Announcement { .. }));
    }

    #[test]
    fn test_notification_time_is_latest_follow() {
        let item = PeopleItem::from_rpc(follow(true, &[1_000, 5_000, 3_000]));
        match item {
            PeopleItem::Notification {
                new_follows,
                notification_time,
                ..
            } => {
                assert_eq!(new_follows.len(), 3);
                assert_eq!(notification_time, millis_to_datetime(5_000));
            }
            other => panic!("unexpected item {:?}", other),
        }
    }

    #[test]
    fn test_millis_to_datetime() {
        assert_eq!(millis_to_datetime(0), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(millis_to_datetime(1_500).timestamp_millis(), 1_500);
    }
}
