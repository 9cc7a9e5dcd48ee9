//! HTTP adapter - carries RPC calls as JSON over HTTP

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::rpc::error::{RpcError, StatusCode};
use crate::rpc::types::*;
use crate::rpc::{RpcClient, RpcResult};

#[derive(Serialize)]
struct CallEnvelope<'a> {
    params: &'a Value,
}

#[derive(Deserialize)]
struct ReplyEnvelope {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcError>,
}

/// RPC client that POSTs `{"params": ...}` to `{base_url}/rpc/{method}`
#[derive(Clone)]
pub struct HttpRpcClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRpcClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        HttpRpcClient {
            client: create_client(timeout),
            base_url: base_url.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/rpc/{}", self.base_url.trim_end_matches('/'), method)
    }

    async fn call<R: DeserializeOwned>(&self, method: &str, params: Value) -> RpcResult<R> {
        let start = Instant::now();
        tracing::debug!(method, "Calling backend");

        let response = self
            .client
            .post(self.method_url(method))
            .json(&CallEnvelope { params: &params })
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        let reply = parse_reply(status, &body)?;

        let time_ms = start.elapsed().as_millis() as u64;
        if let Some(err) = reply.error {
            tracing::debug!(method, time_ms, code = %err.code, "Call failed");
            return Err(err);
        }
        tracing::debug!(method, time_ms, "Call settled");

        serde_json::from_value(reply.result)
            .map_err(|e| RpcError::generic(format!("Invalid result for {}: {}", method, e)))
    }
}

/// Classify a transport failure the way the backend would report it
fn transport_error(e: reqwest::Error) -> RpcError {
    if e.is_timeout() {
        RpcError::new(StatusCode::TIMEOUT, "SC_TIMEOUT", format!("Request timed out: {}", e))
    } else if e.is_connect() {
        RpcError::new(
            StatusCode::API_NETWORK_ERROR,
            "SC_API_NETWORK_ERROR",
            format!("Connection failed: {}", e),
        )
    } else {
        generic_api_error(format!("Request failed: {}", e))
    }
}

/// Decode the reply envelope. A body without one, from a gateway or a
/// restarting backend, is a generic API failure.
fn parse_reply(status: reqwest::StatusCode, body: &[u8]) -> RpcResult<ReplyEnvelope> {
    match serde_json::from_slice::<ReplyEnvelope>(body) {
        Ok(reply) if status.is_success() || reply.error.is_some() => Ok(reply),
        Ok(_) => Err(generic_api_error(format!("HTTP {}", status))),
        Err(e) if status.is_success() => Err(generic_api_error(format!("Invalid response: {}", e))),
        Err(_) => Err(generic_api_error(format!(
            "HTTP {}: {}",
            status,
            String::from_utf8_lossy(body).trim()
        ))),
    }
}

fn generic_api_error(desc: impl Into<String>) -> RpcError {
    RpcError::new(StatusCode::GENERIC_API_ERROR, "SC_GENERIC_API_ERROR", desc)
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[async_trait]
impl RpcClient for HttpRpcClient {
    async fn home_get_screen(
        &self,
        mark_viewed: bool,
        num_follow_suggestions_wanted: u32,
    ) -> RpcResult<HomeScreen> {
        self.call(
            "keybase.1.home.homeGetScreen",
            json!({
                "markViewed": mark_viewed,
                "numFollowSuggestionsWanted": num_follow_suggestions_wanted,
            }),
        )
        .await
    }

    async fn home_dismiss_announcement(&self, id: i64) -> RpcResult<()> {
        self.call("keybase.1.home.homeDismissAnnouncement", json!({ "i": id }))
            .await
    }

    async fn home_mark_viewed(&self) -> RpcResult<()> {
        self.call("keybase.1.home.homeMarkViewed", Value::Null).await
    }

    async fn home_skip_todo_type(&self, todo_type: HomeScreenTodoType) -> RpcResult<()> {
        self.call("keybase.1.home.homeSkipTodoType", json!({ "t": todo_type }))
            .await
    }

    async fn register_home_ui(&self) -> RpcResult<()> {
        self.call("keybase.1.delegateUiCtl.registerHomeUI", Value::Null)
            .await
    }

    async fn account_has_server_keys(&self) -> RpcResult<bool> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct HasServerKeys {
            has_server_keys: bool,
        }
        let res: HasServerKeys = self
            .call("keybase.1.account.hasServerKeys", Value::Null)
            .await?;
        Ok(res.has_server_keys)
    }

    async fn account_email_change(&self, new_email: &str) -> RpcResult<()> {
        self.call("keybase.1.account.emailChange", json!({ "newEmail": new_email }))
            .await
    }

    async fn account_passphrase_change(&self, arg: PassphraseChangeArg) -> RpcResult<()> {
        let params = serde_json::to_value(arg)
            .map_err(|e| RpcError::generic(format!("Unable to encode arguments: {}", e)))?;
        self.call("keybase.1.account.passphraseChange", params).await
    }

    async fn account_get_lockdown_mode(&self) -> RpcResult<GetLockdownResponse> {
        self.call("keybase.1.account.getLockdownMode", Value::Null).await
    }

    async fn account_set_lockdown_mode(&self, enabled: bool) -> RpcResult<()> {
        self.call("keybase.1.account.setLockdownMode", json!({ "enabled": enabled }))
            .await
    }

    async fn login_account_delete(&self) -> RpcResult<()> {
        self.call("keybase.1.login.accountDelete", Value::Null).await
    }

    async fn user_load_my_settings(&self) -> RpcResult<UserSettings> {
        self.call("keybase.1.user.loadMySettings", Value::Null).await
    }

    async fn apiserver_get_with_session(
        &self,
        endpoint: &str,
        args: Vec<StringKvPair>,
    ) -> RpcResult<ApiRes> {
        self.call(
            "keybase.1.apiserver.GetWithSession",
            json!({ "endpoint": endpoint, "args": args }),
        )
        .await
    }

    async fn apiserver_post(&self, endpoint: &str, args: Vec<StringKvPair>) -> RpcResult<ApiRes> {
        self.call(
            "keybase.1.apiserver.Post",
            json!({ "endpoint": endpoint, "args": args }),
        )
        .await
    }

    async fn apiserver_post_json(
        &self,
        endpoint: &str,
        args: Vec<StringKvPair>,
        json_payload: Vec<StringKvPair>,
    ) -> RpcResult<ApiRes> {
        self.call(
            "keybase.1.apiserver.PostJSON",
            json!({ "endpoint": endpoint, "args": args, "JSONPayload": json_payload }),
        )
        .await
    }

    async fn get_global_app_notification_settings(
        &self,
    ) -> RpcResult<GlobalAppNotificationSettings> {
        self.call("chat.1.local.getGlobalAppNotificationSettingsLocal", Value::Null)
            .await
    }

    async fn set_global_app_notification_settings(
        &self,
        settings: GlobalAppNotificationSettings,
    ) -> RpcResult<()> {
        self.call(
            "chat.1.local.setGlobalAppNotificationSettingsLocal",
            json!({ "settings": settings.settings }),
        )
        .await
    }

    async fn get_unfurl_settings(&self) -> RpcResult<UnfurlSettingsDisplay> {
        self.call("chat.1.local.getUnfurlSettings", Value::Null).await
    }

    async fn save_unfurl_settings(&self, mode: UnfurlMode, whitelist: Vec<String>) -> RpcResult<()> {
        self.call(
            "chat.1.local.saveUnfurlSettings",
            json!({ "mode": mode, "whitelist": whitelist }),
        )
        .await
    }

    async fn ctl_db_nuke(&self) -> RpcResult<()> {
        self.call("keybase.1.ctl.dbNuke", Value::Null).await
    }

    async fn config_get_remember_passphrase(&self) -> RpcResult<bool> {
        self.call("keybase.1.config.getRememberPassphrase", Value::Null)
            .await
    }

    async fn config_set_remember_passphrase(&self, remember: bool) -> RpcResult<()> {
        self.call(
            "keybase.1.config.setRememberPassphrase",
            json!({ "remember": remember }),
        )
        .await
    }

    async fn pprof_log_trace(&self, log_dir: Option<&str>, duration_seconds: u64) -> RpcResult<()> {
        self.call(
            "keybase.1.pprof.logTrace",
            json!({ "logDirForMobile": log_dir, "traceDurationSeconds": duration_seconds }),
        )
        .await
    }

    async fn pprof_log_processor_profile(
        &self,
        log_dir: Option<&str>,
        duration_seconds: u64,
    ) -> RpcResult<()> {
        self.call(
            "keybase.1.pprof.logProcessorProfile",
            json!({ "logDirForMobile": log_dir, "profileDurationSeconds": duration_seconds }),
        )
        .await
    }
}
