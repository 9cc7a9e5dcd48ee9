//! Notification settings: refresh with merge, and save after a toggle

use futures_util::future;
use serde::Deserialize;

use crate::config::Platform;
use crate::constants::{
    EMAIL_GROUP, ENDPOINT_SUBSCRIBE, ENDPOINT_SUBSCRIPTIONS, NOTIFICATIONS_CLEAR_DELAY,
    SECURITY_GROUP,
};
use crate::effects::{bracket, DelayedPut, Waiting};
use crate::error::{HandlerError, HandlerResult};
use crate::messages::SettingsAction;
use crate::models::{NotificationGroup, NotificationGroups, NotificationSetting};
use crate::rpc::{GlobalAppNotificationSetting, GlobalAppNotificationSettings, StringKvPair};
use crate::sagas::SagaContext;

#[derive(Deserialize)]
struct SubscriptionsBody {
    notifications: NotificationGroups,
}

/// Build the `security` group from chat's global settings
fn security_group(chat: &GlobalAppNotificationSettings, platform: &Platform) -> NotificationGroup {
    let mut settings = vec![NotificationSetting::new(
        GlobalAppNotificationSetting::PlaintextMobile.name(),
        "Display mobile plaintext notifications",
        chat.get(GlobalAppNotificationSetting::PlaintextMobile),
    )];
    // newer Android versions pick the sound per notification channel
    if !platform.is_android_newer_than_n {
        settings.push(NotificationSetting::new(
            GlobalAppNotificationSetting::DefaultSoundMobile.name(),
            "Use mobile system default notification sound",
            chat.get(GlobalAppNotificationSetting::DefaultSoundMobile),
        ));
    }
    NotificationGroup {
        settings,
        unsubscribed_from_all: false,
    }
}

/// Merge the subscriptions document with chat settings into one group map
pub fn merge_notifications(
    subscriptions_body: &str,
    chat: &GlobalAppNotificationSettings,
    platform: &Platform,
) -> HandlerResult<NotificationGroups> {
    let SubscriptionsBody { mut notifications } = serde_json::from_str(subscriptions_body)?;
    notifications.insert(SECURITY_GROUP.into(), security_group(chat, platform));
    Ok(notifications)
}

/// Split groups into the subscribe payload and chat's global settings
pub fn save_payload(
    groups: &NotificationGroups,
) -> (Vec<StringKvPair>, GlobalAppNotificationSettings) {
    let flag = |on: bool| if on { "1" } else { "0" };
    let mut payload = Vec::new();
    let mut chat = GlobalAppNotificationSettings::default();

    for (group_name, group) in groups {
        if group_name == SECURITY_GROUP {
            for setting in &group.settings {
                match GlobalAppNotificationSetting::from_name(&setting.name) {
                    Some(key) => {
                        chat.settings.insert(key, setting.subscribed);
                    }
                    None => tracing::warn!(name = %setting.name, "Unknown chat notification setting"),
                }
            }
            continue;
        }
        for setting in &group.settings {
            payload.push(StringKvPair::new(
                format!("{}|{}", setting.name, group_name),
                flag(setting.subscribed),
            ));
        }
        payload.push(StringKvPair::new(
            format!("unsub|{}", group_name),
            flag(group.unsubscribed_from_all),
        ));
    }
    (payload, chat)
}

/// The subscribe endpoint answers `{"status": {"code": 0}}` on success
fn check_status(body: &str) -> HandlerResult<()> {
    if body.is_empty() {
        return Err(HandlerError::InvalidResponse("(no result)".into()));
    }
    let parsed: serde_json::Value = serde_json::from_str(body)?;
    match parsed["status"]["code"].as_i64() {
        Some(0) => Ok(()),
        _ => Err(HandlerError::InvalidResponse(body.to_string())),
    }
}

async fn fetch_notifications(ctx: &SagaContext) -> HandlerResult<NotificationGroups> {
    let (subscriptions, chat) = future::join(
        ctx.rpc
            .apiserver_get_with_session(ENDPOINT_SUBSCRIPTIONS, Vec::new()),
        ctx.rpc.get_global_app_notification_settings(),
    )
    .await;
    merge_notifications(&subscriptions?.body, &chat?, &ctx.platform)
}

/// Refresh notification groups. Stale groups are cleared only if the fetch
/// is slow.
pub async fn refresh_notifications(ctx: SagaContext) {
    let clear = DelayedPut::schedule(
        &ctx.tx,
        NOTIFICATIONS_CLEAR_DELAY,
        SettingsAction::NotificationsRefreshed { groups: None },
    );
    let result = fetch_notifications(&ctx).await;
    if !clear.cancel().await {
        tracing::debug!("Notifications fetch outlasted the clear delay");
    }

    match result {
        Ok(groups) => ctx.tx.put(SettingsAction::NotificationsRefreshed {
            groups: Some(groups),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Unable to refresh notifications");
            ctx.tx.put(SettingsAction::NotificationsRefreshError { error: e.message() });
        }
    }
}

/// Save the groups as they stand after the toggle was reduced
pub async fn toggle_notifications(ctx: SagaContext, groups: Option<NotificationGroups>) {
    let tx = &ctx.tx;
    bracket(
        tx,
        Waiting::Response,
        async {
            let groups = groups
                .filter(|g| g.contains_key(EMAIL_GROUP))
                .ok_or_else(|| HandlerError::Precondition("No notifications loaded yet".into()))?;
            let (payload, chat) = save_payload(&groups);

            let (subscribed, chat_saved) = future::join(
                ctx.rpc
                    .apiserver_post_json(ENDPOINT_SUBSCRIBE, Vec::new(), payload),
                ctx.rpc.set_global_app_notification_settings(chat),
            )
            .await;
            check_status(&subscribed?.body)?;
            chat_saved?;

            tx.put(SettingsAction::NotificationsSaved);
            Ok::<_, HandlerError>(())
        },
        |e| Some(SettingsAction::NotificationsSaveError { error: e.message() }.into()),
    )
    .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ActionSender;
    use crate::messages::Action;
    use crate::rpc::{ApiRes, RpcError, StatusCode};
    use crate::testing::{drain, FakeRpc};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    const SUBSCRIPTIONS: &str = r#"{
        "notifications": {
            "email": {
                "settings": [
                    {"name": "newsletter", "description": "News", "subscribed": true},
                    {"name": "follow", "description": "Followers", "subscribed": false}
                ],
                "unsub": false
            }
        }
    }"#;

    fn context(rpc: FakeRpc, platform: Platform) -> (SagaContext, Arc<FakeRpc>, UnboundedReceiver<Action>) {
        let rpc = Arc::new(rpc);
        let (tx, rx) = ActionSender::channel();
        let ctx = SagaContext {
            rpc: rpc.clone(),
            tx,
            platform,
            pprof_dir: None,
        };
        (ctx, rpc, rx)
    }

    fn chat_settings() -> GlobalAppNotificationSettings {
        GlobalAppNotificationSettings {
            settings: BTreeMap::from([
                (GlobalAppNotificationSetting::PlaintextMobile, true),
                (GlobalAppNotificationSetting::DefaultSoundMobile, false),
            ]),
        }
    }

    fn ok_body(body: &str) -> ApiRes {
        ApiRes {
            status: "OK".into(),
            body: body.into(),
            http_status: 200,
            app_status: String::new(),
        }
    }

    #[test]
    fn test_merge_adds_security_group() {
        let groups =
            merge_notifications(SUBSCRIPTIONS, &chat_settings(), &Platform::default()).unwrap();
        assert_eq!(groups.len(), 2);

        let security = &groups[SECURITY_GROUP];
        let names: Vec<_> = security.settings.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["plaintextmobile", "defaultsoundmobile"]);
        assert!(security.settings[0].subscribed);
        assert!(!security.unsubscribed_from_all);
        assert_eq!(groups[EMAIL_GROUP].settings.len(), 2);
    }

    #[test]
    fn test_merge_skips_sound_on_newer_android() {
        let platform = Platform {
            is_mobile: true,
            is_android_newer_than_n: true,
        };
        let groups = merge_notifications(SUBSCRIPTIONS, &chat_settings(), &platform).unwrap();
        let security = &groups[SECURITY_GROUP];
        assert_eq!(security.settings.len(), 1);
        assert_eq!(security.settings[0].name, "plaintextmobile");
    }

    #[test]
    fn test_merge_rejects_garbage() {
        let err = merge_notifications("", &chat_settings(), &Platform::default()).unwrap_err();
        assert!(matches!(err, HandlerError::Decode(_)));
    }

    #[test]
    fn test_save_payload() {
        let groups =
            merge_notifications(SUBSCRIPTIONS, &chat_settings(), &Platform::default()).unwrap();
        let (payload, chat) = save_payload(&groups);

        assert_eq!(
            payload,
            vec![
                StringKvPair::new("newsletter|email", "1"),
                StringKvPair::new("follow|email", "0"),
                StringKvPair::new("unsub|email", "0"),
            ]
        );
        assert_eq!(chat, chat_settings());
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(r#"{"status": {"code": 0}}"#).is_ok());
        assert!(matches!(
            check_status(r#"{"status": {"code": 100}}"#),
            Err(HandlerError::InvalidResponse(_))
        ));
        assert!(check_status("").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_refresh_never_clears() {
        let (ctx, _rpc, mut rx) = context(
            FakeRpc::new()
                .reply("apiserver_get_with_session", ok_body(SUBSCRIPTIONS))
                .reply("get_global_app_notification_settings", chat_settings())
                .delay("apiserver_get_with_session", Duration::from_millis(100)),
            Platform::default(),
        );
        refresh_notifications(ctx).await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        let actions = drain(&mut rx);
        assert_eq!(actions.len(), 1);
        assert!(matches!(
            &actions[0],
            Action::Settings(SettingsAction::NotificationsRefreshed { groups: Some(_) })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_refresh_clears_first() {
        let (ctx, rpc, mut rx) = context(
            FakeRpc::new()
                .reply("apiserver_get_with_session", ok_body(SUBSCRIPTIONS))
                .delay("get_global_app_notification_settings", Duration::from_secs(2)),
            Platform::default(),
        );
        refresh_notifications(ctx).await;

        assert_eq!(
            rpc.args("apiserver_get_with_session"),
            Some(json!({ "endpoint": ENDPOINT_SUBSCRIPTIONS, "args": {} }))
        );
        let actions = drain(&mut rx);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], SettingsAction::NotificationsRefreshed { groups: None }.into());
        assert!(matches!(
            &actions[1],
            Action::Settings(SettingsAction::NotificationsRefreshed { groups: Some(_) })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_error() {
        let (ctx, _rpc, mut rx) = context(
            FakeRpc::new().fail(
                "apiserver_get_with_session",
                RpcError::new(StatusCode::API_NETWORK_ERROR, "", "offline"),
            ),
            Platform::default(),
        );
        refresh_notifications(ctx).await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(
            drain(&mut rx),
            vec![SettingsAction::NotificationsRefreshError {
                error: "offline".into()
            }
            .into()]
        );
    }

    #[tokio::test]
    async fn test_toggle_saves_both_sources() {
        let (ctx, rpc, mut rx) = context(
            FakeRpc::new().reply("apiserver_post_json", ok_body(r#"{"status": {"code": 0}}"#)),
            Platform::default(),
        );
        let groups =
            merge_notifications(SUBSCRIPTIONS, &chat_settings(), &Platform::default()).unwrap();
        toggle_notifications(ctx, Some(groups)).await;

        assert_eq!(
            rpc.args("apiserver_post_json"),
            Some(json!({
                "endpoint": ENDPOINT_SUBSCRIBE,
                "args": {},
                "jsonPayload": {"newsletter|email": "1", "follow|email": "0", "unsub|email": "0"},
            }))
        );
        assert_eq!(
            rpc.args("set_global_app_notification_settings"),
            Some(json!({ "settings": { "plaintextmobile": true, "defaultsoundmobile": false } }))
        );
        assert_eq!(
            drain(&mut rx),
            vec![
                SettingsAction::WaitingForResponse { waiting: true }.into(),
                SettingsAction::NotificationsSaved.into(),
                SettingsAction::WaitingForResponse { waiting: false }.into(),
            ]
        );
    }

    #[tokio::test]
    async fn test_toggle_before_load() {
        let (ctx, rpc, mut rx) = context(FakeRpc::new(), Platform::default());
        toggle_notifications(ctx, None).await;

        assert!(rpc.calls().is_empty());
        let actions = drain(&mut rx);
        assert_eq!(actions.len(), 3);
        assert_eq!(
            actions[1],
            SettingsAction::NotificationsSaveError {
                error: "No notifications loaded yet".into()
            }
            .into()
        );
    }

    #[tokio::test]
    async fn test_toggle_rejected_by_backend() {
        let (ctx, _rpc, mut rx) = context(
            FakeRpc::new().reply("apiserver_post_json", ok_body(r#"{"status": {"code": 205}}"#)),
            Platform::default(),
        );
        let groups =
            merge_notifications(SUBSCRIPTIONS, &chat_settings(), &Platform::default()).unwrap();
        toggle_notifications(ctx, Some(groups)).await;

        let actions = drain(&mut rx);
        assert!(actions[1].is_error());
        assert_eq!(actions.len(), 3);
    }
}
