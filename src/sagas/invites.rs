//! Invitation handlers

use serde::Deserialize;

use crate::constants::{
    ENDPOINT_CANCEL_INVITATION, ENDPOINT_INVITATIONS_SENT, ENDPOINT_SEND_INVITATION,
    INVITE_SENT_ROUTE,
};
use crate::effects::{bracket, Waiting};
use crate::error::{HandlerError, HandlerResult};
use crate::messages::{PathSegment, RouteAction, SettingsAction};
use crate::models::settings::{classify_invitations, invite_link};
use crate::models::RawInvitation;
use crate::rpc::StringKvPair;
use crate::sagas::SagaContext;

#[derive(Deserialize)]
struct InvitationsBody {
    #[serde(default)]
    invitations: Vec<RawInvitation>,
}

#[derive(Deserialize)]
struct SentInvitationBody {
    invitation_id: String,
}

async fn fetch_invitations(ctx: &SagaContext) -> HandlerResult<SettingsAction> {
    let res = ctx
        .rpc
        .apiserver_get_with_session(ENDPOINT_INVITATIONS_SENT, Vec::new())
        .await?;
    let body: InvitationsBody = serde_json::from_str(&res.body)?;
    let (accepted, pending) = classify_invitations(body.invitations);
    Ok(SettingsAction::InvitesRefreshed { accepted, pending })
}

pub async fn refresh_invites(ctx: SagaContext) {
    match fetch_invitations(&ctx).await {
        Ok(refreshed) => ctx.tx.put(refreshed),
        Err(e) => {
            tracing::warn!(error = %e, "Unable to refresh invitations");
            ctx.tx.put(SettingsAction::InvitesRefreshError { error: e.message() });
        }
    }
}

/// Send an invitation and show its link. The list is refreshed afterwards
/// whether or not sending worked.
pub async fn send_invite(ctx: SagaContext, email: String, message: Option<String>) {
    let tx = &ctx.tx;
    bracket(
        tx,
        Waiting::Response,
        async {
            let email = email.trim();
            let mut args = vec![StringKvPair::new("email", email)];
            if let Some(message) = message.filter(|m| !m.is_empty()) {
                args.push(StringKvPair::new("invitation_message", message));
            }

            let res = ctx.rpc.apiserver_post(ENDPOINT_SEND_INVITATION, args).await?;
            let sent: SentInvitationBody = serde_json::from_str(&res.body)?;
            let link = invite_link(&sent.invitation_id);
            tracing::info!(invitation_id = %sent.invitation_id, "Invitation sent");

            tx.put(SettingsAction::InvitesSent);
            tx.put(RouteAction::NavigateAppend {
                path: vec![PathSegment::new(INVITE_SENT_ROUTE)
                    .with_prop("email", email)
                    .with_prop("link", link)],
            });
            Ok::<_, HandlerError>(())
        },
        |e| {
            tracing::warn!(error = %e, "Error sending an invite");
            Some(SettingsAction::InvitesSentError { error: e.message() }.into())
        },
    )
    .await;
    ctx.tx.put(SettingsAction::InvitesRefresh);
}

/// Cancel a pending invitation, then refresh the list
pub async fn reclaim_invite(ctx: SagaContext, invite_id: String) {
    let args = vec![StringKvPair::new("invitation_id", invite_id)];
    match ctx.rpc.apiserver_post(ENDPOINT_CANCEL_INVITATION, args).await {
        Ok(_) => ctx.tx.put(SettingsAction::InvitesReclaimed),
        Err(e) => {
            tracing::warn!(error = %e, "Error reclaiming an invite");
            ctx.tx.put(SettingsAction::InvitesReclaimedError {
                error_text: format!("{}{}", e.desc, e.name),
            });
        }
    }
    ctx.tx.put(SettingsAction::InvitesRefresh);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ActionSender;
    use crate::messages::Action;
    use crate::models::InviteType;
    use crate::rpc::{ApiRes, RpcError, StatusCode};
    use crate::testing::{drain, FakeRpc};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn context(rpc: FakeRpc) -> (SagaContext, Arc<FakeRpc>, UnboundedReceiver<Action>) {
        let rpc = Arc::new(rpc);
        let (tx, rx) = ActionSender::channel();
        let ctx = SagaContext {
            rpc: rpc.clone(),
            tx,
            platform: Default::default(),
            pprof_dir: None,
        };
        (ctx, rpc, rx)
    }

    fn body(body: serde_json::Value) -> ApiRes {
        ApiRes {
            body: body.to_string(),
            ..ApiRes::default()
        }
    }

    fn waiting(on: bool) -> Action {
        SettingsAction::WaitingForResponse { waiting: on }.into()
    }

    #[tokio::test]
    async fn test_refresh_classifies() {
        let invitations = json!({
            "invitations": [
                {"invitation_id": "abcdefghijklmnop", "ctime": 1540000000, "email": "a@b.c",
                 "username": "max", "uid": "d1e2f3", "type": "pending"},
                {"invitation_id": "zyxwvutsrqponm", "ctime": 1540000001, "email": "x@y.z",
                 "username": "", "uid": "", "type": "accepted"}
            ]
        });
        let (ctx, _rpc, mut rx) =
            context(FakeRpc::new().reply("apiserver_get_with_session", body(invitations)));
        refresh_invites(ctx).await;

        let actions = drain(&mut rx);
        let [Action::Settings(SettingsAction::InvitesRefreshed { accepted, pending })] =
            actions.as_slice()
        else {
            panic!("unexpected actions {:?}", actions);
        };
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].invite_type, InviteType::Accepted);
        assert_eq!(accepted[0].url, "keybase.io/inv/abcdefghij");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "zyxwvutsrqponm");
    }

    #[tokio::test]
    async fn test_refresh_bad_body() {
        let (ctx, _rpc, mut rx) = context(FakeRpc::new());
        refresh_invites(ctx).await;
        let actions = drain(&mut rx);
        assert_eq!(actions.len(), 1);
        assert!(matches!(
            actions[0],
            Action::Settings(SettingsAction::InvitesRefreshError { .. })
        ));
    }

    #[tokio::test]
    async fn test_send_invite() {
        let (ctx, rpc, mut rx) = context(
            FakeRpc::new().reply("apiserver_post", body(json!({"invitation_id": "0123456789abcdef"}))),
        );
        send_invite(ctx, "  max@example.com ".into(), Some("join us".into())).await;

        assert_eq!(
            rpc.args("apiserver_post"),
            Some(json!({
                "endpoint": ENDPOINT_SEND_INVITATION,
                "args": {"email": "max@example.com", "invitation_message": "join us"},
            }))
        );
        assert_eq!(
            drain(&mut rx),
            vec![
                waiting(true),
                SettingsAction::InvitesSent.into(),
                RouteAction::NavigateAppend {
                    path: vec![PathSegment::new(INVITE_SENT_ROUTE)
                        .with_prop("email", "max@example.com")
                        .with_prop("link", "keybase.io/inv/0123456789")],
                }
                .into(),
                waiting(false),
                SettingsAction::InvitesRefresh.into(),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_invite_error_still_refreshes() {
        let (ctx, rpc, mut rx) = context(
            FakeRpc::new().fail("apiserver_post", RpcError::generic("rate limited")),
        );
        send_invite(ctx, "max@example.com".into(), None).await;

        assert_eq!(
            rpc.args("apiserver_post"),
            Some(json!({ "endpoint": ENDPOINT_SEND_INVITATION, "args": {"email": "max@example.com"} }))
        );
        assert_eq!(
            drain(&mut rx),
            vec![
                waiting(true),
                SettingsAction::InvitesSentError {
                    error: "rate limited".into()
                }
                .into(),
                waiting(false),
                SettingsAction::InvitesRefresh.into(),
            ]
        );
    }

    #[tokio::test]
    async fn test_reclaim_always_refreshes() {
        let (ctx, rpc, mut rx) = context(FakeRpc::new());
        reclaim_invite(ctx, "abc".into()).await;
        assert_eq!(
            rpc.args("apiserver_post"),
            Some(json!({ "endpoint": ENDPOINT_CANCEL_INVITATION, "args": {"invitation_id": "abc"} }))
        );
        assert_eq!(
            drain(&mut rx),
            vec![
                SettingsAction::InvitesReclaimed.into(),
                SettingsAction::InvitesRefresh.into()
            ]
        );

        let (ctx, _rpc, mut rx) = context(FakeRpc::new().fail(
            "apiserver_post",
            RpcError::new(StatusCode::NOT_FOUND, "NOT_FOUND", "no such invite: "),
        ));
        reclaim_invite(ctx, "abc".into()).await;
        assert_eq!(
            drain(&mut rx),
            vec![
                SettingsAction::InvitesReclaimedError {
                    error_text: "no such invite: NOT_FOUND".into()
                }
                .into(),
                SettingsAction::InvitesRefresh.into()
            ]
        );
    }
}
