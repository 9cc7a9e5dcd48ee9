//! Profile section routes

use crate::config::Platform;
use crate::route::{LeafTags, RouteBuilder, RouteDefNode, Screen};

pub const SEND_RECEIVE_FORM_ROUTE: &str = "sendReceiveForm";
pub const CONFIRM_FORM_ROUTE: &str = "confirmForm";
pub const CHOOSE_ASSET_FORM_ROUTE: &str = "chooseAssetForm";

/// PGP key setup flow, reachable from a profile
pub fn pgp_route(_platform: &Platform) -> RouteDefNode {
    RouteDefNode::new(Screen::PgpChoice)
        .child("import", RouteDefNode::new(Screen::PgpImport))
        .child(
            "provideInfo",
            RouteDefNode::new(Screen::PgpProvideInfo).child(
                "generate",
                RouteDefNode::new(Screen::PgpGenerate)
                    .child("finished", RouteDefNode::new(Screen::PgpFinished)),
            ),
        )
}

fn prove_enter_username() -> RouteDefNode {
    RouteDefNode::new(Screen::ProveEnterUsername)
        .child("confirmOrPending", RouteDefNode::new(Screen::ConfirmOrPending))
        .child(
            "postProof",
            RouteDefNode::new(Screen::PostProof)
                .child("confirmOrPending", RouteDefNode::new(Screen::ConfirmOrPending)),
        )
}

fn send_receive_form(platform: &Platform) -> RouteDefNode {
    let layered = !platform.is_mobile;
    RouteDefNode::new(Screen::SendForm)
        .tags(
            LeafTags::default()
                .layer_on_top(layered)
                .render_topmost_only(true)
                .under_notch(true),
        )
        .child(
            CONFIRM_FORM_ROUTE,
            RouteDefNode::new(Screen::ConfirmForm).tags(
                LeafTags::default()
                    .layer_on_top(layered)
                    .render_topmost_only(true)
                    .under_notch(true),
            ),
        )
        .child(
            CHOOSE_ASSET_FORM_ROUTE,
            RouteDefNode::new(Screen::ChooseAsset).tags(
                LeafTags::default()
                    .hide_status_bar(true)
                    .layer_on_top(layered)
                    .render_topmost_only(true),
            ),
        )
        .child(
            "qrScan",
            RouteDefNode::new(Screen::QrScan)
                .tags(LeafTags::default().layer_on_top(true).under_notch(true)),
        )
}

/// Root of the profile section. `profile` children loop back here lazily.
pub fn profile_route(platform: &Platform) -> RouteDefNode {
    let layered = || LeafTags::default().layer_on_top(!platform.is_mobile);

    RouteDefNode::new(Screen::Profile)
        .tags(LeafTags::default().title("Profile").under_notch(true))
        .initial_state("currentFriendshipsTab", "Followers")
        .child(
            "addToTeam",
            RouteDefNode::new(Screen::AddToTeam).tags(layered()).child(
                "controlledRolePicker",
                RouteDefNode::new(Screen::ControlledRolePicker).tags(layered()),
            ),
        )
        .child("editAvatar", RouteDefNode::new(Screen::EditAvatar).tags(layered()))
        .child(
            "editAvatarPlaceholder",
            RouteDefNode::new(Screen::EditAvatarPlaceholder),
        )
        .child("editProfile", RouteDefNode::new(Screen::EditProfile))
        .child(
            "nonUserProfile",
            RouteDefNode::new(Screen::NonUserProfile).child("profile", profile_route as RouteBuilder),
        )
        .child("pgp", pgp_route as RouteBuilder)
        .child("profile", profile_route as RouteBuilder)
        .child("proveEnterUsername", prove_enter_username())
        .child(
            "proveWebsiteChoice",
            RouteDefNode::new(Screen::ProveWebsiteChoice)
                .child("proveEnterUsername", prove_enter_username()),
        )
        .child("revoke", RouteDefNode::new(Screen::Revoke))
        .child("search", RouteDefNode::new(Screen::SearchPopup).tags(layered()))
        .child(
            "showcaseTeamOffer",
            RouteDefNode::new(Screen::ShowcaseTeamOffer).tags(layered()),
        )
        .child(SEND_RECEIVE_FORM_ROUTE, send_receive_form(platform))
}
