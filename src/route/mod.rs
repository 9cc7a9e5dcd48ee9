//! Route configuration - a static tree of named screens
//!
//! Nodes carry an optional screen handle and a set of leaf tags. Children
//! that refer back up the tree (a profile opened from a profile) are stored
//! lazily and built when walked.

pub mod profile;
pub mod state;

use std::collections::BTreeMap;
use std::fmt;

use crate::config::Platform;

pub use profile::profile_route;
pub use state::RouteState;

/// Screen handles; rendering them is someone else's job
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Profile,
    AddToTeam,
    ControlledRolePicker,
    EditAvatar,
    EditAvatarPlaceholder,
    EditProfile,
    NonUserProfile,
    ProveEnterUsername,
    ProveWebsiteChoice,
    PostProof,
    ConfirmOrPending,
    Revoke,
    SearchPopup,
    ShowcaseTeamOffer,
    SendForm,
    ConfirmForm,
    ChooseAsset,
    QrScan,
    PgpChoice,
    PgpImport,
    PgpProvideInfo,
    PgpGenerate,
    PgpFinished,
}

/// Per-node presentation flags
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeafTags {
    /// Render above the current stack instead of pushing onto it
    pub layer_on_top: bool,
    /// Only the topmost layered screen is drawn
    pub render_topmost_only: bool,
    pub hide_status_bar: bool,
    /// Allowed to draw under the device notch
    pub under_notch: bool,
    pub title: Option<String>,
}

impl LeafTags {
    pub fn layer_on_top(mut self, on: bool) -> Self {
        self.layer_on_top = on;
        self
    }

    pub fn render_topmost_only(mut self, on: bool) -> Self {
        self.render_topmost_only = on;
        self
    }

    pub fn hide_status_bar(mut self, on: bool) -> Self {
        self.hide_status_bar = on;
        self
    }

    pub fn under_notch(mut self, on: bool) -> Self {
        self.under_notch = on;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

pub type RouteBuilder = fn(&Platform) -> RouteDefNode;

#[derive(Clone)]
pub enum RouteChild {
    Node(RouteDefNode),
    Lazy(RouteBuilder),
}

impl fmt::Debug for RouteChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteChild::Node(node) => f.debug_tuple("Node").field(node).finish(),
            RouteChild::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<RouteDefNode> for RouteChild {
    fn from(node: RouteDefNode) -> Self {
        RouteChild::Node(node)
    }
}

impl From<RouteBuilder> for RouteChild {
    fn from(builder: RouteBuilder) -> Self {
        RouteChild::Lazy(builder)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RouteDefNode {
    pub component: Option<Screen>,
    pub children: BTreeMap<String, RouteChild>,
    pub tags: LeafTags,
    pub initial_state: BTreeMap<String, String>,
}

impl RouteDefNode {
    pub fn new(component: Screen) -> Self {
        RouteDefNode {
            component: Some(component),
            ..Default::default()
        }
    }

    pub fn tags(mut self, tags: LeafTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn child(mut self, name: impl Into<String>, child: impl Into<RouteChild>) -> Self {
        self.children.insert(name.into(), child.into());
        self
    }

    pub fn initial_state(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.initial_state.insert(key.into(), value.into());
        self
    }

    /// Build the named child, expanding lazy children
    pub fn get_child(&self, name: &str, platform: &Platform) -> Option<RouteDefNode> {
        match self.children.get(name)? {
            RouteChild::Node(node) => Some(node.clone()),
            RouteChild::Lazy(build) => Some(build(platform)),
        }
    }

    /// Walk `path` from this node; an empty path is the node itself
    pub fn resolve<S: AsRef<str>>(&self, path: &[S], platform: &Platform) -> Option<RouteDefNode> {
        let mut node = self.clone();
        for segment in path {
            node = node.get_child(segment.as_ref(), platform)?;
        }
        Some(node)
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looping(_: &Platform) -> RouteDefNode {
        RouteDefNode::new(Screen::Profile).child("again", looping as RouteBuilder)
    }

    #[test]
    fn test_resolve_walks_children() {
        let tree = RouteDefNode::new(Screen::Profile).child(
            "revoke",
            RouteDefNode::new(Screen::Revoke).tags(LeafTags::default().title("Revoke")),
        );
        let platform = Platform::default();

        let node = tree.resolve(&["revoke"], &platform).unwrap();
        assert_eq!(node.component, Some(Screen::Revoke));
        assert_eq!(node.tags.title.as_deref(), Some("Revoke"));
        assert!(tree.resolve(&["missing"], &platform).is_none());

        let empty: [&str; 0] = [];
        assert_eq!(tree.resolve(&empty, &platform).unwrap().component, Some(Screen::Profile));
    }

    #[test]
    fn test_lazy_children_expand_on_demand() {
        let tree = looping(&Platform::default());
        let deep = tree
            .resolve(&["again", "again", "again"], &Platform::default())
            .unwrap();
        assert_eq!(deep.component, Some(Screen::Profile));
    }
}
