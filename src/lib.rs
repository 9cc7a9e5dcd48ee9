//! # idclient
//!
//! Action and effect layer of a chat and identity client.
//!
//! ## Features
//! - People feed refresh, mark-viewed, todo skipping, announcements
//! - People-tab visibility tracking
//! - Account settings: email, passphrase, notifications, invitations,
//!   lockdown, link previews, account deletion, diagnostics
//! - Profile route tree
//!
//! ## Architecture
//! Actor-based with channels:
//! - Store actor - owns state, runs the reducer
//! - Sagas - async handlers spawned per action, replying with more actions
//! - RPC layer - backend access behind the [`RpcClient`] trait

pub mod app;
pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod messages;
pub mod models;
pub mod route;
pub mod rpc;
pub mod sagas;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use app::{ActionSender, AppState, StoreActor};
pub use config::{Config, Platform};
pub use error::{HandlerError, HandlerResult};
pub use messages::Action;
pub use route::{profile_route, RouteDefNode};
pub use rpc::{HttpRpcClient, RpcClient, RpcError, StatusCode};
