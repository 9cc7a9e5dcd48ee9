//! Store actor - owns app state, reduces actions and runs sagas

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::sender::ActionSender;
use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::Action;
use crate::rpc::RpcClient;
use crate::sagas::{SagaContext, Sagas};

/// Single owner of [`AppState`]. Actions come from outside through the
/// inbound channel and from sagas through the loopback channel.
pub struct StoreActor {
    state: AppState,
    sagas: Sagas,
    loopback_rx: mpsc::UnboundedReceiver<Action>,
    observer: Option<mpsc::UnboundedSender<Action>>,
}

impl StoreActor {
    pub fn new(rpc: Arc<dyn RpcClient>, config: &Config) -> Self {
        let (tx, loopback_rx) = ActionSender::channel();
        StoreActor {
            state: AppState::new(),
            sagas: Sagas::new(SagaContext::new(rpc, tx, config)),
            loopback_rx,
            observer: None,
        }
    }

    /// Forward every dispatched action, after it was reduced
    pub fn with_observer(mut self, observer: mpsc::UnboundedSender<Action>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Reduce, then hand the action to the sagas
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "Dispatching");
        self.state.reduce(&action);
        self.sagas.handle(&action, &self.state);
        if let Some(observer) = &self.observer {
            let _ = observer.send(action);
        }
    }

    /// Run the actor message loop. Once the inbound channel closes, in-flight
    /// handlers are allowed to finish and the final state is returned.
    pub async fn run(mut self, mut inbound_rx: mpsc::UnboundedReceiver<Action>) -> AppState {
        let mut inbound_open = true;

        loop {
            if !inbound_open && self.sagas.is_idle() {
                match self.loopback_rx.try_recv() {
                    Ok(action) => {
                        self.dispatch(action);
                        continue;
                    }
                    Err(_) => break,
                }
            }

            tokio::select! {
                biased;

                // Handler replies first, so a trigger's updates land before
                // the next external action
                Some(action) = self.loopback_rx.recv() => self.dispatch(action),

                inbound = inbound_rx.recv(), if inbound_open => match inbound {
                    Some(action) => self.dispatch(action),
                    None => {
                        tracing::info!("Inbound closed, waiting for handlers");
                        inbound_open = false;
                    }
                },

                Some(()) = self.sagas.join_next() => {}
            }
        }

        tracing::info!("Store actor stopped");
        self.state
    }
}
