//! Message types flowing through the dispatcher.
//!
//! A single [`Action`] type carries both triggers (user input, navigation,
//! incoming backend calls) and the state updates handlers publish in reply.

pub mod config;
pub mod people;
pub mod route;
pub mod settings;
pub mod waiting;

use serde::{Deserialize, Serialize};

pub use config::ConfigAction;
pub use people::PeopleAction;
pub use route::{PathSegment, RouteAction};
pub use settings::SettingsAction;
pub use waiting::WaitingAction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Config(ConfigAction),
    People(PeopleAction),
    Route(RouteAction),
    Settings(SettingsAction),
    Waiting(WaitingAction),
}

impl From<ConfigAction> for Action {
    fn from(action: ConfigAction) -> Self {
        Action::Config(action)
    }
}

impl From<PeopleAction> for Action {
    fn from(action: PeopleAction) -> Self {
        Action::People(action)
    }
}

impl From<RouteAction> for Action {
    fn from(action: RouteAction) -> Self {
        Action::Route(action)
    }
}

impl From<SettingsAction> for Action {
    fn from(action: SettingsAction) -> Self {
        Action::Settings(action)
    }
}

impl From<WaitingAction> for Action {
    fn from(action: WaitingAction) -> Self {
        Action::Waiting(action)
    }
}

impl Action {
    pub fn global_error(error: impl ToString) -> Self {
        ConfigAction::GlobalError {
            error: error.to_string(),
        }
        .into()
    }

    /// Check if this update reports a failure to the user
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Action::Config(ConfigAction::GlobalError { .. })
                | Action::Settings(
                    SettingsAction::OnUpdateEmailError { .. }
                        | SettingsAction::OnUpdatePassphraseError { .. }
                        | SettingsAction::NotificationsRefreshError { .. }
                        | SettingsAction::NotificationsSaveError { .. }
                        | SettingsAction::InvitesRefreshError { .. }
                        | SettingsAction::InvitesSentError { .. }
                        | SettingsAction::InvitesReclaimedError { .. }
                        | SettingsAction::UnfurlSettingsError { .. }
                )
        )
    }
}
