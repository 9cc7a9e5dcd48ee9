//! People feed handlers and people-tab visibility

use std::collections::HashSet;

use crate::app::AppState;
use crate::constants::{
    DEFAULT_NUM_FOLLOW_SUGGESTIONS, GET_PEOPLE_DATA_WAITING_KEY, PEOPLE_TAB, PROFILE_ROUTE,
};
use crate::effects::{with_waiting_key, Sequence};
use crate::error::HandlerError;
use crate::messages::{Action, PeopleAction};
use crate::models::people::{millis_to_datetime, partition_items};
use crate::models::FollowSuggestion;
use crate::route::RouteState;
use crate::rpc::{HomeScreen, HomeScreenTodoType};
use crate::sagas::{global_error, SagaContext};

fn default_refresh() -> Action {
    PeopleAction::GetPeopleData {
        mark_viewed: false,
        num_follow_suggestions_wanted: DEFAULT_NUM_FOLLOW_SUGGESTIONS,
    }
    .into()
}

/// Inputs of one feed refresh, copied from state at trigger time
#[derive(Clone, Debug)]
pub struct FeedRequest {
    pub mark_viewed: bool,
    pub num_follow_suggestions_wanted: u32,
    pub app_focused: bool,
    pub logged_in: bool,
    pub followers: HashSet<String>,
    pub following: HashSet<String>,
}

impl FeedRequest {
    pub fn new(state: &AppState, mark_viewed: bool, num_follow_suggestions_wanted: u32) -> Self {
        FeedRequest {
            mark_viewed,
            num_follow_suggestions_wanted,
            app_focused: state.session.app_focused,
            logged_in: state.session.logged_in,
            followers: state.session.followers.clone(),
            following: state.session.following.clone(),
        }
    }

    /// Partition the feed and annotate suggestions with follow relationships
    pub fn process(&self, screen: HomeScreen) -> PeopleAction {
        let (old_items, new_items) = partition_items(screen.items.unwrap_or_default());
        let follow_suggestions = screen
            .follow_suggestions
            .unwrap_or_default()
            .into_iter()
            .map(|s| FollowSuggestion {
                follows_me: self.followers.contains(&s.username),
                i_follow: self.following.contains(&s.username),
                username: s.username,
                full_name: s.full_name,
            })
            .collect();

        PeopleAction::PeopleDataProcessed {
            old_items,
            new_items,
            follow_suggestions,
            version: screen.version,
            last_viewed: millis_to_datetime(screen.last_viewed),
        }
    }
}

/// Fetch the feed. Failures are logged and never shown to the user.
pub async fn get_people_data(ctx: SagaContext, request: FeedRequest) {
    tracing::info!(
        app_focused = request.app_focused,
        logged_in = request.logged_in,
        mark_viewed = request.mark_viewed,
        num = request.num_follow_suggestions_wanted,
        "Fetching people data"
    );

    let screen = with_waiting_key(
        &ctx.tx,
        GET_PEOPLE_DATA_WAITING_KEY,
        ctx.rpc
            .home_get_screen(request.mark_viewed, request.num_follow_suggestions_wanted),
    )
    .await;

    match screen {
        Ok(screen) => ctx.tx.put(request.process(screen)),
        Err(e) => tracing::debug!(error = %e, "People data refresh failed"),
    }
}

pub async fn dismiss_announcement(ctx: SagaContext, id: i64) {
    if let Err(e) = ctx.rpc.home_dismiss_announcement(id).await {
        ctx.tx.put(global_error(e));
    }
}

pub async fn mark_viewed(ctx: SagaContext) {
    if let Err(e) = ctx.rpc.home_mark_viewed().await {
        let e = HandlerError::from(e);
        if e.is_network_error() {
            tracing::warn!(error = %e, "Network error calling home_mark_viewed");
        } else {
            ctx.tx.put(global_error(e));
        }
    }
}

/// Skip a todo, then refetch the feed
pub async fn skip_todo(ctx: SagaContext, todo_type: HomeScreenTodoType) {
    let rpc = ctx.rpc.clone();
    Sequence::new()
        .call(async move {
            rpc.home_skip_todo_type(todo_type).await?;
            Ok::<_, HandlerError>(None)
        })
        .put(default_refresh())
        .run(&ctx.tx, |e| Some(global_error(e)))
        .await;
}

pub async fn register_home_ui(ctx: SagaContext) {
    match ctx.rpc.register_home_ui().await {
        Ok(()) => tracing::info!("Registered home UI"),
        Err(e) => tracing::warn!(error = %e, "Error registering home UI"),
    }
}

/// Whether navigation sits on the people tab. Owned by the people sagas and
/// fed every navigation after it was reduced; the last event wins.
#[derive(Debug, Default)]
pub struct PeopleTabTracker {
    on_people_tab: bool,
}

impl PeopleTabTracker {
    pub fn is_on_people_tab(&self) -> bool {
        self.on_people_tab
    }

    /// Leaving the people tab root marks the feed viewed
    pub fn on_tab_change(&mut self, path: &[String], route: &RouteState) -> Option<Action> {
        let root = path.first().map(String::as_str);
        let people_path = route.path_for(PEOPLE_TAB);

        if root != Some(PEOPLE_TAB) && self.on_people_tab && people_path.len() == 1 {
            self.on_people_tab = false;
            return Some(PeopleAction::MarkViewed.into());
        }
        if root == Some(PEOPLE_TAB) && !self.on_people_tab {
            self.on_people_tab = true;
        }
        None
    }

    /// Opening a profile from the people tab root marks the feed viewed
    pub fn on_navigate_to(&self, path: &[String], route: &RouteState) -> Option<Action> {
        let root = path.first().map(String::as_str);
        let people_path = route.path_for(PEOPLE_TAB);

        let to_profile = people_path.len() == 2 && people_path[1] == PROFILE_ROUTE;
        if root == Some(PEOPLE_TAB) && to_profile && self.on_people_tab {
            return Some(PeopleAction::MarkViewed.into());
        }
        None
    }

    /// Backend says the feed changed; refetch only if it is visible
    pub fn on_home_ui_refresh(&self) -> Option<Action> {
        self.on_people_tab.then(default_refresh)
    }
}
