//! Test helpers: queue draining and a recording RPC fake

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::messages::Action;
use crate::rpc::*;

/// Everything currently queued, in order
pub fn drain(rx: &mut UnboundedReceiver<Action>) -> Vec<Action> {
    let mut actions = Vec::new();
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub args: Value,
}

/// RPC fake answering from canned replies. Unconfigured methods succeed with
/// the response type's default value.
#[derive(Default)]
pub struct FakeRpc {
    replies: HashMap<&'static str, RpcResult<Value>>,
    delays: HashMap<&'static str, Duration>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, method: &'static str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap();
        self.replies.insert(method, Ok(value));
        self
    }

    pub fn fail(mut self, method: &'static str, error: RpcError) -> Self {
        self.replies.insert(method, Err(error));
        self
    }

    /// Hold the reply back; use with a paused clock
    pub fn delay(mut self, method: &'static str, delay: Duration) -> Self {
        self.delays.insert(method, delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.method).collect()
    }

    pub fn called(&self, method: &str) -> bool {
        self.calls().iter().any(|c| c.method == method)
    }

    /// Arguments of the last call to `method`
    pub fn args(&self, method: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|c| c.method == method)
            .map(|c| c.args)
    }

    async fn respond<T>(&self, method: &'static str, args: Value) -> RpcResult<T>
    where
        T: DeserializeOwned + Default,
    {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall { method, args });
        if let Some(delay) = self.delays.get(method) {
            tokio::time::sleep(*delay).await;
        }
        match self.replies.get(method) {
            Some(Ok(value)) => Ok(serde_json::from_value(value.clone()).unwrap()),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(T::default()),
        }
    }
}

fn pairs(args: &[StringKvPair]) -> Value {
    args.iter()
        .map(|p| (p.key.clone(), Value::String(p.value.clone())))
        .collect::<serde_json::Map<_, _>>()
        .into()
}

#[async_trait]
impl RpcClient for FakeRpc {
    async fn home_get_screen(
        &self,
        mark_viewed: bool,
        num_follow_suggestions_wanted: u32,
    ) -> RpcResult<HomeScreen> {
        let args = json!({ "markViewed": mark_viewed, "num": num_follow_suggestions_wanted });
        self.respond("home_get_screen", args).await
    }

    async fn home_dismiss_announcement(&self, id: i64) -> RpcResult<()> {
        self.respond("home_dismiss_announcement", json!({ "id": id })).await
    }

    async fn home_mark_viewed(&self) -> RpcResult<()> {
        self.respond("home_mark_viewed", Value::Null).await
    }

    async fn home_skip_todo_type(&self, todo_type: HomeScreenTodoType) -> RpcResult<()> {
        self.respond("home_skip_todo_type", json!({ "t": todo_type })).await
    }

    async fn register_home_ui(&self) -> RpcResult<()> {
        self.respond("register_home_ui", Value::Null).await
    }

    async fn account_has_server_keys(&self) -> RpcResult<bool> {
        self.respond("account_has_server_keys", Value::Null).await
    }

    async fn account_email_change(&self, new_email: &str) -> RpcResult<()> {
        self.respond("account_email_change", json!({ "newEmail": new_email }))
            .await
    }

    async fn account_passphrase_change(&self, arg: PassphraseChangeArg) -> RpcResult<()> {
        self.respond("account_passphrase_change", json!(arg)).await
    }

    async fn account_get_lockdown_mode(&self) -> RpcResult<GetLockdownResponse> {
        self.respond("account_get_lockdown_mode", Value::Null).await
    }

    async fn account_set_lockdown_mode(&self, enabled: bool) -> RpcResult<()> {
        self.respond("account_set_lockdown_mode", json!({ "enabled": enabled }))
            .await
    }

    async fn login_account_delete(&self) -> RpcResult<()> {
        self.respond("login_account_delete", Value::Null).await
    }

    async fn user_load_my_settings(&self) -> RpcResult<UserSettings> {
        self.respond("user_load_my_settings", Value::Null).await
    }

    async fn apiserver_get_with_session(
        &self,
        endpoint: &str,
        args: Vec<StringKvPair>,
    ) -> RpcResult<ApiRes> {
        let args = json!({ "endpoint": endpoint, "args": pairs(&args) });
        self.respond("apiserver_get_with_session", args).await
    }

    async fn apiserver_post(&self, endpoint: &str, args: Vec<StringKvPair>) -> RpcResult<ApiRes> {
        let args = json!({ "endpoint": endpoint, "args": pairs(&args) });
        self.respond("apiserver_post", args).await
    }

    async fn apiserver_post_json(
        &self,
        endpoint: &str,
        args: Vec<StringKvPair>,
        json_payload: Vec<StringKvPair>,
    ) -> RpcResult<ApiRes> {
        let args = json!({
            "endpoint": endpoint,
            "args": pairs(&args),
            "jsonPayload": pairs(&json_payload),
        });
        self.respond("apiserver_post_json", args).await
    }

    async fn get_global_app_notification_settings(
        &self,
    ) -> RpcResult<GlobalAppNotificationSettings> {
        self.respond("get_global_app_notification_settings", Value::Null)
            .await
    }

    async fn set_global_app_notification_settings(
        &self,
        settings: GlobalAppNotificationSettings,
    ) -> RpcResult<()> {
        self.respond("set_global_app_notification_settings", json!(settings))
            .await
    }

    async fn get_unfurl_settings(&self) -> RpcResult<UnfurlSettingsDisplay> {
        self.respond("get_unfurl_settings", Value::Null).await
    }

    async fn save_unfurl_settings(&self, mode: UnfurlMode, whitelist: Vec<String>) -> RpcResult<()> {
        let args = json!({ "mode": mode, "whitelist": whitelist });
        self.respond("save_unfurl_settings", args).await
    }

    async fn ctl_db_nuke(&self) -> RpcResult<()> {
        self.respond("ctl_db_nuke", Value::Null).await
    }

    async fn config_get_remember_passphrase(&self) -> RpcResult<bool> {
        self.respond("config_get_remember_passphrase", Value::Null).await
    }

    async fn config_set_remember_passphrase(&self, remember: bool) -> RpcResult<()> {
        let args = json!({ "remember": remember });
        self.respond("config_set_remember_passphrase", args).await
    }

    async fn pprof_log_trace(&self, log_dir: Option<&str>, duration_seconds: u64) -> RpcResult<()> {
        let args = json!({ "logDirForMobile": log_dir, "traceDurationSeconds": duration_seconds });
        self.respond("pprof_log_trace", args).await
    }

    async fn pprof_log_processor_profile(
        &self,
        log_dir: Option<&str>,
        duration_seconds: u64,
    ) -> RpcResult<()> {
        let args = json!({ "logDirForMobile": log_dir, "profileDurationSeconds": duration_seconds });
        self.respond("pprof_log_processor_profile", args).await
    }
}
