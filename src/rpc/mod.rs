//! RPC layer - typed access to the backend
//!
//! Every remote procedure the action layer needs is one method on
//! [`RpcClient`]. Each call settles once, with a response or an [`RpcError`].

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::HttpRpcClient;
pub use error::{RpcError, StatusCode};
pub use types::*;

pub type RpcResult<T> = Result<T, RpcError>;

/// Remote procedures consumed by the sagas
#[async_trait]
pub trait RpcClient: Send + Sync {
    // Home screen
    async fn home_get_screen(
        &self,
        mark_viewed: bool,
        num_follow_suggestions_wanted: u32,
    ) -> RpcResult<HomeScreen>;
    async fn home_dismiss_announcement(&self, id: i64) -> RpcResult<()>;
    async fn home_mark_viewed(&self) -> RpcResult<()>;
    async fn home_skip_todo_type(&self, todo_type: HomeScreenTodoType) -> RpcResult<()>;
    async fn register_home_ui(&self) -> RpcResult<()>;

    // Account
    async fn account_has_server_keys(&self) -> RpcResult<bool>;
    async fn account_email_change(&self, new_email: &str) -> RpcResult<()>;
    async fn account_passphrase_change(&self, arg: PassphraseChangeArg) -> RpcResult<()>;
    async fn account_get_lockdown_mode(&self) -> RpcResult<GetLockdownResponse>;
    async fn account_set_lockdown_mode(&self, enabled: bool) -> RpcResult<()>;
    async fn login_account_delete(&self) -> RpcResult<()>;
    async fn user_load_my_settings(&self) -> RpcResult<UserSettings>;

    // API server passthrough
    async fn apiserver_get_with_session(
        &self,
        endpoint: &str,
        args: Vec<StringKvPair>,
    ) -> RpcResult<ApiRes>;
    async fn apiserver_post(&self, endpoint: &str, args: Vec<StringKvPair>) -> RpcResult<ApiRes>;
    async fn apiserver_post_json(
        &self,
        endpoint: &str,
        args: Vec<StringKvPair>,
        json_payload: Vec<StringKvPair>,
    ) -> RpcResult<ApiRes>;

    // Chat
    async fn get_global_app_notification_settings(
        &self,
    ) -> RpcResult<GlobalAppNotificationSettings>;
    async fn set_global_app_notification_settings(
        &self,
        settings: GlobalAppNotificationSettings,
    ) -> RpcResult<()>;
    async fn get_unfurl_settings(&self) -> RpcResult<UnfurlSettingsDisplay>;
    async fn save_unfurl_settings(&self, mode: UnfurlMode, whitelist: Vec<String>) -> RpcResult<()>;

    // Local service
    async fn ctl_db_nuke(&self) -> RpcResult<()>;
    async fn config_get_remember_passphrase(&self) -> RpcResult<bool>;
    async fn config_set_remember_passphrase(&self, remember: bool) -> RpcResult<()>;
    async fn pprof_log_trace(&self, log_dir: Option<&str>, duration_seconds: u64) -> RpcResult<()>;
    async fn pprof_log_processor_profile(
        &self,
        log_dir: Option<&str>,
        duration_seconds: u64,
    ) -> RpcResult<()>;
}
