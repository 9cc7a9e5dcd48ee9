//! Sagas - asynchronous handlers reacting to dispatched actions
//!
//! The store hands every action to [`Sagas::handle`] after the reducer has
//! applied it. Inputs are copied out of the state right there, so handlers
//! run on a snapshot and talk back only through their [`ActionSender`].

pub mod invites;
pub mod notifications;
pub mod people;
pub mod settings;

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::app::{ActionSender, AppState};
use crate::config::{Config, Platform};
use crate::constants::DEFAULT_NUM_FOLLOW_SUGGESTIONS;
use crate::error::HandlerError;
use crate::messages::{Action, ConfigAction, PeopleAction, RouteAction, SettingsAction};
use crate::rpc::RpcClient;

pub use people::{FeedRequest, PeopleTabTracker};

/// Everything a handler needs besides its inputs
#[derive(Clone)]
pub struct SagaContext {
    pub rpc: Arc<dyn RpcClient>,
    pub tx: ActionSender,
    pub platform: Platform,
    pub pprof_dir: Option<String>,
}

impl SagaContext {
    pub fn new(rpc: Arc<dyn RpcClient>, tx: ActionSender, config: &Config) -> Self {
        SagaContext {
            rpc,
            tx,
            platform: config.platform,
            pprof_dir: config.pprof_dir.clone(),
        }
    }
}

/// Error update for failures without a dedicated error action
pub fn global_error(error: impl Into<HandlerError>) -> Action {
    Action::global_error(error.into().message())
}

pub struct Sagas {
    ctx: SagaContext,
    people_tab: PeopleTabTracker,
    tasks: JoinSet<()>,
}

impl Sagas {
    pub fn new(ctx: SagaContext) -> Self {
        Sagas {
            ctx,
            people_tab: PeopleTabTracker::default(),
            tasks: JoinSet::new(),
        }
    }

    /// No handler is running
    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for the next handler to finish; `None` when idle
    pub async fn join_next(&mut self) -> Option<()> {
        let result = self.tasks.join_next().await?;
        if let Err(e) = result {
            if e.is_panic() {
                tracing::error!(error = %e, "Handler panicked");
            }
        }
        Some(())
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Route one reduced action to its handlers
    pub fn handle(&mut self, action: &Action, state: &AppState) {
        match action {
            Action::Config(action) => self.on_config(action, state),
            Action::People(action) => self.on_people(action, state),
            Action::Route(action) => self.on_route(action, state),
            Action::Settings(action) => self.on_settings(action, state),
            Action::Waiting(_) => {}
        }
    }

    fn on_config(&mut self, action: &ConfigAction, state: &AppState) {
        let ctx = self.ctx.clone();
        match action {
            ConfigAction::LoggedIn { .. } => {
                let request = FeedRequest::new(state, false, DEFAULT_NUM_FOLLOW_SUGGESTIONS);
                self.spawn(people::get_people_data(ctx, request));
            }
            ConfigAction::EngineConnected => self.spawn(people::register_home_ui(ctx)),
            _ => {}
        }
    }

    fn on_people(&mut self, action: &PeopleAction, state: &AppState) {
        let ctx = self.ctx.clone();
        match action {
            PeopleAction::GetPeopleData {
                mark_viewed,
                num_follow_suggestions_wanted,
            } => {
                let request = FeedRequest::new(state, *mark_viewed, *num_follow_suggestions_wanted);
                self.spawn(people::get_people_data(ctx, request));
            }
            PeopleAction::MarkViewed => self.spawn(people::mark_viewed(ctx)),
            PeopleAction::SkipTodo { todo_type } => {
                self.spawn(people::skip_todo(ctx, *todo_type))
            }
            PeopleAction::DismissAnnouncement { id } => {
                self.spawn(people::dismiss_announcement(ctx, *id))
            }
            PeopleAction::HomeUiRefresh => {
                if let Some(refresh) = self.people_tab.on_home_ui_refresh() {
                    ctx.tx.put(refresh);
                }
            }
            PeopleAction::PeopleDataProcessed { .. } => {}
        }
    }

    fn on_route(&mut self, action: &RouteAction, state: &AppState) {
        let update = match action {
            RouteAction::SwitchTo { path } => self.people_tab.on_tab_change(path, &state.route),
            RouteAction::NavigateTo { path } => self.people_tab.on_navigate_to(path, &state.route),
            RouteAction::NavigateAppend { .. } | RouteAction::NavigateUp => None,
        };
        if let Some(update) = update {
            self.ctx.tx.put(update);
        }
    }

    fn on_settings(&mut self, action: &SettingsAction, state: &AppState) {
        let ctx = self.ctx.clone();
        let logged_in = state.session.logged_in;
        match action {
            SettingsAction::OnUpdatePgpSettings => self.spawn(settings::update_pgp_settings(ctx)),
            SettingsAction::OnSubmitNewEmail => {
                let new_email = state.settings.email.new_email.clone();
                self.spawn(settings::submit_new_email(ctx, new_email));
            }
            SettingsAction::OnSubmitNewPassphrase => {
                let passphrase = &state.settings.passphrase;
                self.spawn(settings::submit_new_passphrase(
                    ctx,
                    passphrase.new_passphrase.clone(),
                    passphrase.new_passphrase_confirm.clone(),
                ));
            }
            SettingsAction::LoadSettings => self.spawn(settings::load_settings(ctx)),
            SettingsAction::LoadRememberPassphrase => {
                self.spawn(settings::load_remember_passphrase(ctx))
            }
            SettingsAction::OnChangeRememberPassphrase { remember } => {
                self.spawn(settings::set_remember_passphrase(ctx, *remember))
            }

            SettingsAction::NotificationsRefresh => {
                self.spawn(notifications::refresh_notifications(ctx))
            }
            SettingsAction::NotificationsToggle { .. } => {
                let groups = state.settings.notifications.groups.clone();
                self.spawn(notifications::toggle_notifications(ctx, groups));
            }

            SettingsAction::InvitesRefresh => self.spawn(invites::refresh_invites(ctx)),
            SettingsAction::InvitesSend { email, message } => {
                self.spawn(invites::send_invite(ctx, email.clone(), message.clone()))
            }
            SettingsAction::InvitesReclaim { invite_id } => {
                self.spawn(invites::reclaim_invite(ctx, invite_id.clone()))
            }

            SettingsAction::DbNuke => self.spawn(settings::db_nuke(ctx)),
            SettingsAction::DeleteAccountForever => {
                let username = state.session.username.clone();
                let allow = state.settings.allow_delete_account;
                self.spawn(settings::delete_account_forever(ctx, username, allow));
            }

            SettingsAction::Trace { duration_seconds } => {
                self.spawn(settings::trace(ctx, *duration_seconds))
            }
            SettingsAction::ProcessorProfile { duration_seconds } => {
                self.spawn(settings::processor_profile(ctx, *duration_seconds))
            }

            SettingsAction::LoadLockdownMode if logged_in => {
                self.spawn(settings::load_lockdown_mode(ctx))
            }
            SettingsAction::OnChangeLockdownMode { enabled } if logged_in => {
                self.spawn(settings::set_lockdown_mode(ctx, *enabled))
            }
            SettingsAction::UnfurlSettingsRefresh if logged_in => {
                self.spawn(settings::refresh_unfurl_settings(ctx))
            }
            SettingsAction::UnfurlSettingsSaved { mode, whitelist } if logged_in => {
                self.spawn(settings::save_unfurl_settings(ctx, *mode, whitelist.clone()))
            }
            SettingsAction::LoadLockdownMode
            | SettingsAction::OnChangeLockdownMode { .. }
            | SettingsAction::UnfurlSettingsRefresh
            | SettingsAction::UnfurlSettingsSaved { .. } => {
                tracing::debug!(?action, "Not logged in, skipping");
            }

            _ => {}
        }
    }
}
