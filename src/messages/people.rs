//! People feed messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FollowSuggestion, PeopleItem};
use crate::rpc::types::HomeScreenTodoType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeopleAction {
    /// Fetch the feed
    GetPeopleData {
        mark_viewed: bool,
        num_follow_suggestions_wanted: u32,
    },
    /// Feed fetched and partitioned
    PeopleDataProcessed {
        old_items: Vec<PeopleItem>,
        new_items: Vec<PeopleItem>,
        follow_suggestions: Vec<FollowSuggestion>,
        version: i32,
        last_viewed: DateTime<Utc>,
    },
    /// Tell the backend the feed was seen
    MarkViewed,
    /// Hide a todo item, then refetch
    SkipTodo { todo_type: HomeScreenTodoType },
    DismissAnnouncement { id: i64 },
    /// Incoming call from the backend: the feed changed
    HomeUiRefresh,
}
