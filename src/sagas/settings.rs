//! Account settings handlers: email, passphrase, account, diagnostics,
//! lockdown and link previews

use std::future::Future;
use std::time::Duration;

use crate::constants::{
    CHAT_UNFURL_WAITING_KEY, PASSPHRASE_MISMATCH, PROCESSOR_PROFILE_IN_PROGRESS_KEY,
    SETTINGS_WAITING_KEY, TRACE_IN_PROGRESS_KEY, UNFURL_LOAD_ERROR, UNFURL_SAVE_ERROR,
};
use crate::effects::{bracket, with_waiting_key, Sequence, Waiting};
use crate::error::{HandlerError, HandlerResult};
use crate::messages::{ConfigAction, RouteAction, SettingsAction, WaitingAction};
use crate::rpc::{PassphraseChangeArg, RpcResult, UnfurlMode};
use crate::sagas::{global_error, SagaContext};

// ========================
// PGP / email / passphrase
// ========================

pub async fn update_pgp_settings(ctx: SagaContext) {
    match ctx.rpc.account_has_server_keys().await {
        Ok(has_keys) => ctx.tx.put(SettingsAction::OnUpdatedPgpSettings { has_keys }),
        Err(e) => ctx.tx.put(SettingsAction::OnUpdatePassphraseError {
            error: HandlerError::from(e).message(),
        }),
    }
}

pub async fn submit_new_email(ctx: SagaContext, new_email: String) {
    let tx = &ctx.tx;
    bracket(
        tx,
        Waiting::Response,
        async {
            ctx.rpc.account_email_change(&new_email).await?;
            tx.put(SettingsAction::LoadSettings);
            tx.put(RouteAction::NavigateUp);
            Ok::<_, HandlerError>(())
        },
        |e| Some(SettingsAction::OnUpdateEmailError { error: e.message() }.into()),
    )
    .await;
}

pub async fn submit_new_passphrase(ctx: SagaContext, passphrase: String, confirm: String) {
    let tx = &ctx.tx;
    bracket(
        tx,
        Waiting::Response,
        async {
            if passphrase != confirm {
                return Err(HandlerError::Validation(PASSPHRASE_MISMATCH.into()));
            }
            let arg = PassphraseChangeArg {
                old_passphrase: String::new(),
                passphrase,
                force: true,
            };
            ctx.rpc.account_passphrase_change(arg).await?;
            tx.put(RouteAction::NavigateUp);
            Ok::<_, HandlerError>(())
        },
        |e| Some(SettingsAction::OnUpdatePassphraseError { error: e.message() }.into()),
    )
    .await;
}

pub async fn load_settings(ctx: SagaContext) {
    match ctx.rpc.user_load_my_settings().await {
        Ok(settings) => ctx.tx.put(SettingsAction::LoadedSettings {
            emails: settings.emails,
        }),
        Err(e) => ctx.tx.put(global_error(e)),
    }
}

pub async fn load_remember_passphrase(ctx: SagaContext) {
    match ctx.rpc.config_get_remember_passphrase().await {
        Ok(remember) => ctx.tx.put(SettingsAction::LoadedRememberPassphrase { remember }),
        Err(e) => ctx.tx.put(global_error(e)),
    }
}

pub async fn set_remember_passphrase(ctx: SagaContext, remember: bool) {
    if let Err(e) = ctx.rpc.config_set_remember_passphrase(remember).await {
        ctx.tx.put(global_error(e));
    }
}

// ========================
// Account
// ========================

pub async fn db_nuke(ctx: SagaContext) {
    tracing::warn!("Nuking local database");
    if let Err(e) = ctx.rpc.ctl_db_nuke().await {
        ctx.tx.put(global_error(e));
    }
}

fn check_delete_allowed(username: Option<String>, allow: bool) -> HandlerResult<String> {
    let username = username.filter(|u| !u.is_empty()).ok_or_else(|| {
        HandlerError::Precondition("Unable to delete account: no username set".into())
    })?;
    if !allow {
        return Err(HandlerError::Precondition(
            "Account deletion failsafe was not disengaged".into(),
        ));
    }
    Ok(username)
}

/// Delete the account; refused unless a user is logged in and the failsafe
/// was disengaged
pub async fn delete_account_forever(ctx: SagaContext, username: Option<String>, allow: bool) {
    let username = match check_delete_allowed(username, allow) {
        Ok(username) => username,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to delete account");
            ctx.tx.put(global_error(e));
            return;
        }
    };

    let rpc = ctx.rpc.clone();
    Sequence::new()
        .call(async move {
            rpc.login_account_delete().await?;
            Ok::<_, HandlerError>(None)
        })
        .put(ConfigAction::SetDeletedSelf {
            deleted_username: username,
        })
        .run(&ctx.tx, |e| Some(global_error(e)))
        .await;
}

// ========================
// Diagnostics
// ========================

/// Start a backend diagnostic, then hold `key` for as long as it records
async fn run_diagnostic<F>(ctx: &SagaContext, key: &str, duration_seconds: u64, start: F)
where
    F: Future<Output = RpcResult<()>> + Send + 'static,
{
    Sequence::new()
        .call(async move {
            start.await?;
            Ok::<_, HandlerError>(None)
        })
        .put(WaitingAction::Increment { key: key.into() })
        .delay(Duration::from_secs(duration_seconds))
        .put(WaitingAction::Decrement { key: key.into() })
        .run(&ctx.tx, |e| Some(global_error(e)))
        .await;
}

pub async fn trace(ctx: SagaContext, duration_seconds: u64) {
    let rpc = ctx.rpc.clone();
    let dir = ctx.pprof_dir.clone();
    let start = async move { rpc.pprof_log_trace(dir.as_deref(), duration_seconds).await };
    run_diagnostic(&ctx, TRACE_IN_PROGRESS_KEY, duration_seconds, start).await;
}

pub async fn processor_profile(ctx: SagaContext, duration_seconds: u64) {
    let rpc = ctx.rpc.clone();
    let dir = ctx.pprof_dir.clone();
    let start = async move {
        rpc.pprof_log_processor_profile(dir.as_deref(), duration_seconds)
            .await
    };
    run_diagnostic(&ctx, PROCESSOR_PROFILE_IN_PROGRESS_KEY, duration_seconds, start).await;
}

// ========================
// Lockdown
// ========================

pub async fn load_lockdown_mode(ctx: SagaContext) {
    let status = with_waiting_key(
        &ctx.tx,
        SETTINGS_WAITING_KEY,
        ctx.rpc.account_get_lockdown_mode(),
    )
    .await
    .map(|res| res.status)
    .map_err(|e| tracing::warn!(error = %e, "Unable to load lockdown mode"))
    .ok();
    ctx.tx.put(SettingsAction::LoadedLockdownMode { status });
}

/// On failure, reload so the toggle shows the backend's value
pub async fn set_lockdown_mode(ctx: SagaContext, enabled: bool) {
    let result = with_waiting_key(
        &ctx.tx,
        SETTINGS_WAITING_KEY,
        ctx.rpc.account_set_lockdown_mode(enabled),
    )
    .await;
    match result {
        Ok(()) => ctx.tx.put(SettingsAction::LoadedLockdownMode {
            status: Some(enabled),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Unable to change lockdown mode");
            ctx.tx.put(SettingsAction::LoadLockdownMode);
        }
    }
}

// ========================
// Link previews
// ========================

pub async fn refresh_unfurl_settings(ctx: SagaContext) {
    let result = with_waiting_key(&ctx.tx, CHAT_UNFURL_WAITING_KEY, ctx.rpc.get_unfurl_settings()).await;
    match result {
        Ok(settings) => ctx.tx.put(SettingsAction::UnfurlSettingsRefreshed {
            mode: settings.mode,
            whitelist: settings.whitelist.unwrap_or_default(),
        }),
        Err(e) => {
            tracing::warn!(error = %e, "Unable to load unfurl settings");
            ctx.tx.put(SettingsAction::UnfurlSettingsError {
                error: UNFURL_LOAD_ERROR.into(),
            });
        }
    }
}

pub async fn save_unfurl_settings(ctx: SagaContext, mode: UnfurlMode, whitelist: Vec<String>) {
    let result = with_waiting_key(
        &ctx.tx,
        CHAT_UNFURL_WAITING_KEY,
        ctx.rpc.save_unfurl_settings(mode, whitelist),
    )
    .await;
    match result {
        Ok(()) => ctx.tx.put(SettingsAction::UnfurlSettingsRefresh),
        Err(e) => {
            tracing::warn!(error = %e, "Unable to save unfurl settings");
            ctx.tx.put(SettingsAction::UnfurlSettingsError {
                error: UNFURL_SAVE_ERROR.into(),
            });
        }
    }
}
