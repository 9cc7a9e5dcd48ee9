//! Effect sequences - ordered lists of calls, updates and delays
//!
//! Steps run strictly one after another. A `Concurrent` step issues two calls
//! together and waits for both; their follow-up updates are published in
//! declaration order. The first failing step aborts the rest.

use std::future::Future;
use std::time::Duration;

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::app::ActionSender;
use crate::effects::bracket::{Outcome, Waiting, WaitingGuard};
use crate::error::{HandlerError, HandlerResult};
use crate::messages::Action;

/// A remote call, optionally yielding a follow-up update
pub type CallFuture = BoxFuture<'static, HandlerResult<Option<Action>>>;

pub enum Step {
    Call(CallFuture),
    Put(Action),
    Delay(Duration),
    Concurrent(CallFuture, CallFuture),
}

/// Lifecycle of one sequence run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    WaitingStarted,
    StepsRunning,
    StepsSettled,
    WaitingEnded,
    Terminal(Outcome),
}

#[derive(Default)]
pub struct Sequence {
    steps: Vec<Step>,
    waiting: Option<Waiting>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bracket the whole run with a waiting indicator
    pub fn waiting(mut self, waiting: Waiting) -> Self {
        self.waiting = Some(waiting);
        self
    }

    pub fn call<F>(mut self, call: F) -> Self
    where
        F: Future<Output = HandlerResult<Option<Action>>> + Send + 'static,
    {
        self.steps.push(Step::Call(call.boxed()));
        self
    }

    pub fn put(mut self, action: impl Into<Action>) -> Self {
        self.steps.push(Step::Put(action.into()));
        self
    }

    pub fn delay(mut self, duration: Duration) -> Self {
        self.steps.push(Step::Delay(duration));
        self
    }

    pub fn concurrent<A, B>(mut self, first: A, second: B) -> Self
    where
        A: Future<Output = HandlerResult<Option<Action>>> + Send + 'static,
        B: Future<Output = HandlerResult<Option<Action>>> + Send + 'static,
    {
        self.steps
            .push(Step::Concurrent(first.boxed(), second.boxed()));
        self
    }

    /// Run every step. `on_error` maps the aborting failure to at most one
    /// update; `None` classifies it as ignorable.
    pub async fn run<H>(self, tx: &ActionSender, on_error: H) -> Outcome
    where
        H: FnOnce(HandlerError) -> Option<Action>,
    {
        let mut phase = Phase::Idle;
        let guard = self.waiting.map(|w| {
            advance(&mut phase, Phase::WaitingStarted);
            WaitingGuard::start(tx, w)
        });

        advance(&mut phase, Phase::StepsRunning);
        let result = run_steps(self.steps, tx).await;
        advance(&mut phase, Phase::StepsSettled);

        let outcome = match result {
            Ok(()) => Outcome::Success,
            Err(e) => match on_error(e) {
                Some(update) => {
                    tx.put(update);
                    Outcome::Failure
                }
                None => Outcome::Success,
            },
        };

        drop(guard);
        advance(&mut phase, Phase::WaitingEnded);
        advance(&mut phase, Phase::Terminal(outcome));
        outcome
    }
}

fn advance(phase: &mut Phase, next: Phase) {
    tracing::trace!(from = ?*phase, to = ?next, "sequence phase");
    *phase = next;
}

async fn run_steps(steps: Vec<Step>, tx: &ActionSender) -> HandlerResult<()> {
    for step in steps {
        match step {
            Step::Call(call) => {
                if let Some(update) = call.await? {
                    tx.put(update);
                }
            }
            Step::Put(action) => tx.put(action),
            Step::Delay(duration) => tokio::time::sleep(duration).await,
            Step::Concurrent(first, second) => {
                let (a, b) = future::join(first, second).await;
                for update in [a?, b?].into_iter().flatten() {
                    tx.put(update);
                }
            }
        }
    }
    Ok(())
}
