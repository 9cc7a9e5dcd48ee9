//! Waiting brackets - a spinner that is released exactly once

use std::future::Future;

use crate::app::ActionSender;
use crate::messages::{Action, SettingsAction, WaitingAction};

/// What a bracket shows while it is open
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Waiting {
    /// Settings-wide `waiting_for_response` flag
    Response,
    /// Counter in the waiting registry
    Key(String),
}

impl Waiting {
    pub fn key(key: impl Into<String>) -> Self {
        Waiting::Key(key.into())
    }

    pub fn start_action(&self) -> Action {
        match self {
            Waiting::Response => SettingsAction::WaitingForResponse { waiting: true }.into(),
            Waiting::Key(key) => WaitingAction::Increment { key: key.clone() }.into(),
        }
    }

    pub fn end_action(&self) -> Action {
        match self {
            Waiting::Response => SettingsAction::WaitingForResponse { waiting: false }.into(),
            Waiting::Key(key) => WaitingAction::Decrement { key: key.clone() }.into(),
        }
    }
}

/// Publishes the start update when created and the end update when dropped.
/// Drop runs on every exit path, including panics and aborted tasks.
pub struct WaitingGuard {
    tx: ActionSender,
    waiting: Waiting,
}

impl WaitingGuard {
    pub fn start(tx: &ActionSender, waiting: Waiting) -> Self {
        tx.put(waiting.start_action());
        WaitingGuard {
            tx: tx.clone(),
            waiting,
        }
    }
}

impl Drop for WaitingGuard {
    fn drop(&mut self) {
        self.tx.put(self.waiting.end_action());
    }
}

/// Terminal state of a bracketed operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Run `body` inside a waiting bracket.
///
/// On error, `on_error` turns the failure into at most one update, published
/// before the bracket closes. Returning `None` marks the error as ignorable and
/// the bracket completes as a success.
pub async fn bracket<T, E, F, H>(tx: &ActionSender, waiting: Waiting, body: F, on_error: H) -> Outcome
where
    F: Future<Output = Result<T, E>>,
    H: FnOnce(E) -> Option<Action>,
{
    let _guard = WaitingGuard::start(tx, waiting);
    match body.await {
        Ok(_) => Outcome::Success,
        Err(e) => match on_error(e) {
            Some(update) => {
                tx.put(update);
                Outcome::Failure
            }
            None => Outcome::Success,
        },
    }
}

/// Hold a waiting-registry key for the duration of one call
pub async fn with_waiting_key<F: Future>(tx: &ActionSender, key: &str, call: F) -> F::Output {
    let _guard = WaitingGuard::start(tx, Waiting::key(key));
    call.await
}
