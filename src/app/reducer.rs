//! Reducer - applies every dispatched action to app state

use crate::app::AppState;
use crate::constants::SECURITY_GROUP;
use crate::messages::{
    Action, ConfigAction, PeopleAction, RouteAction, SettingsAction, WaitingAction,
};

impl AppState {
    pub fn reduce(&mut self, action: &Action) {
        match action {
            Action::Config(action) => self.reduce_config(action),
            Action::People(action) => self.reduce_people(action),
            Action::Route(action) => self.reduce_route(action),
            Action::Settings(action) => self.reduce_settings(action),
            Action::Waiting(action) => self.reduce_waiting(action),
        }
    }

    // ========================
    // Session
    // ========================

    fn reduce_config(&mut self, action: &ConfigAction) {
        let session = &mut self.session;
        match action {
            ConfigAction::LoggedIn { username } => {
                session.logged_in = true;
                session.username = Some(username.clone());
            }
            ConfigAction::LoggedOut => {
                session.logged_in = false;
                session.username = None;
                session.followers.clear();
                session.following.clear();
            }
            ConfigAction::ChangedFocus { app_focused } => session.app_focused = *app_focused,
            ConfigAction::SetFollowSets {
                followers,
                following,
            } => {
                session.followers = followers.iter().cloned().collect();
                session.following = following.iter().cloned().collect();
            }
            ConfigAction::SetDeletedSelf { deleted_username } => {
                session.deleted_username = Some(deleted_username.clone());
                session.logged_in = false;
            }
            ConfigAction::GlobalError { error } => session.global_error = Some(error.clone()),
            ConfigAction::EngineConnected => {}
        }
    }

    // ========================
    // People
    // ========================

    fn reduce_people(&mut self, action: &PeopleAction) {
        if let PeopleAction::PeopleDataProcessed {
            old_items,
            new_items,
            follow_suggestions,
            version,
            last_viewed,
        } = action
        {
            self.people.old_items = old_items.clone();
            self.people.new_items = new_items.clone();
            self.people.follow_suggestions = follow_suggestions.clone();
            self.people.version = *version;
            self.people.last_viewed = Some(*last_viewed);
        }
    }

    // ========================
    // Navigation
    // ========================

    fn reduce_route(&mut self, action: &RouteAction) {
        match action {
            RouteAction::SwitchTo { path } => self.route.switch_to(path),
            RouteAction::NavigateTo { path } => self.route.navigate_to(path),
            RouteAction::NavigateAppend { path } => self.route.navigate_append(path),
            RouteAction::NavigateUp => self.route.navigate_up(),
        }
    }

    // ========================
    // Waiting
    // ========================

    fn reduce_waiting(&mut self, action: &WaitingAction) {
        match action {
            WaitingAction::Increment { key } => self.waiting.increment(key),
            WaitingAction::Decrement { key } => self.waiting.decrement(key),
            WaitingAction::Clear { key } => self.waiting.clear(key),
        }
    }

    // ========================
    // Settings
    // ========================

    fn reduce_settings(&mut self, action: &SettingsAction) {
        let settings = &mut self.settings;
        match action {
            SettingsAction::WaitingForResponse { waiting } => {
                settings.waiting_for_response = *waiting
            }

            SettingsAction::OnUpdatedPgpSettings { has_keys } => {
                settings.passphrase.has_pgp_keys_on_server = Some(*has_keys)
            }

            SettingsAction::OnChangeNewEmail { email } => {
                settings.email.new_email = email.clone();
                settings.email.error = None;
            }
            SettingsAction::OnUpdateEmailError { error } => {
                settings.email.error = Some(error.clone())
            }
            SettingsAction::LoadedSettings { emails } => {
                settings.email.emails = emails.clone();
                settings.email.new_email.clear();
            }

            SettingsAction::OnChangeNewPassphrase { passphrase } => {
                settings.passphrase.new_passphrase = passphrase.clone();
                settings.passphrase.error = None;
            }
            SettingsAction::OnChangeNewPassphraseConfirm { passphrase } => {
                settings.passphrase.new_passphrase_confirm = passphrase.clone();
                settings.passphrase.error = None;
            }
            SettingsAction::OnUpdatePassphraseError { error } => {
                settings.passphrase.error = Some(error.clone())
            }
            SettingsAction::LoadedRememberPassphrase { remember }
            | SettingsAction::OnChangeRememberPassphrase { remember } => {
                settings.passphrase.remember_passphrase = *remember
            }

            SettingsAction::NotificationsRefreshed { groups } => {
                settings.notifications.groups = groups.clone();
                settings.notifications.error = None;
            }
            SettingsAction::NotificationsRefreshError { error }
            | SettingsAction::NotificationsSaveError { error } => {
                settings.notifications.error = Some(error.clone())
            }
            SettingsAction::NotificationsToggle { group, name } => {
                self.toggle_notification(group, name.as_deref())
            }
            SettingsAction::NotificationsSaved => settings.notifications.error = None,

            SettingsAction::InvitesRefreshed { accepted, pending } => {
                settings.invites.accepted = accepted.clone();
                settings.invites.pending = pending.clone();
                settings.invites.error = None;
            }
            SettingsAction::InvitesRefreshError { error }
            | SettingsAction::InvitesSentError { error } => {
                settings.invites.error = Some(error.clone())
            }
            SettingsAction::InvitesReclaimedError { error_text } => {
                settings.invites.error = Some(error_text.clone())
            }
            SettingsAction::InvitesSent | SettingsAction::InvitesReclaimed => {
                settings.invites.error = None
            }

            SettingsAction::SetAllowDeleteAccount { allow } => {
                settings.allow_delete_account = *allow
            }
            SettingsAction::LoadedLockdownMode { status } => settings.lockdown_mode = *status,

            SettingsAction::UnfurlSettingsRefreshed { mode, whitelist } => {
                settings.unfurl.mode = Some(*mode);
                settings.unfurl.whitelist = whitelist.clone();
                settings.unfurl.error = None;
            }
            SettingsAction::UnfurlSettingsError { error } => {
                settings.unfurl.error = Some(error.clone())
            }

            // Triggers handled by sagas only
            SettingsAction::OnUpdatePgpSettings
            | SettingsAction::OnSubmitNewEmail
            | SettingsAction::LoadSettings
            | SettingsAction::OnSubmitNewPassphrase
            | SettingsAction::LoadRememberPassphrase
            | SettingsAction::NotificationsRefresh
            | SettingsAction::InvitesRefresh
            | SettingsAction::InvitesSend { .. }
            | SettingsAction::InvitesReclaim { .. }
            | SettingsAction::DbNuke
            | SettingsAction::DeleteAccountForever
            | SettingsAction::LoadLockdownMode
            | SettingsAction::OnChangeLockdownMode { .. }
            | SettingsAction::Trace { .. }
            | SettingsAction::ProcessorProfile { .. }
            | SettingsAction::UnfurlSettingsRefresh
            | SettingsAction::UnfurlSettingsSaved { .. } => {}
        }
    }

    /// Flip one setting, or a whole group's unsubscribe switch.
    /// Subscribing to anything clears unsubscribe-all; unsubscribing from
    /// all turns every setting off.
    fn toggle_notification(&mut self, group: &str, name: Option<&str>) {
        let Some(groups) = self.settings.notifications.groups.as_mut() else {
            tracing::warn!(group, "Toggle before notifications loaded");
            return;
        };
        let Some(group_state) = groups.get_mut(group) else {
            tracing::warn!(group, "Toggle of unknown notification group");
            return;
        };

        match name {
            Some(name) => {
                if let Some(setting) = group_state.setting_mut(name) {
                    setting.subscribed = !setting.subscribed;
                    if setting.subscribed {
                        group_state.unsubscribed_from_all = false;
                    }
                }
            }
            None if group == SECURITY_GROUP => {
                tracing::warn!("Security notifications have no unsubscribe-all switch");
            }
            None => {
                group_state.unsubscribed_from_all = !group_state.unsubscribed_from_all;
                if group_state.unsubscribed_from_all {
                    for setting in &mut group_state.settings {
                        setting.subscribed = false;
                    }
                }
            }
        }
    }
}
