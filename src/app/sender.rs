//! Handle handlers use to enqueue actions

use tokio::sync::mpsc;

use crate::messages::Action;

#[derive(Clone, Debug)]
pub struct ActionSender {
    tx: mpsc::UnboundedSender<Action>,
}

impl ActionSender {
    pub fn new(tx: mpsc::UnboundedSender<Action>) -> Self {
        ActionSender { tx }
    }

    /// A sender plus the receiving end of its queue
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ActionSender::new(tx), rx)
    }

    /// Enqueue an action; dropped silently once the dispatcher is gone
    pub fn put(&self, action: impl Into<Action>) {
        let action = action.into();
        tracing::trace!(?action, "put");
        if self.tx.send(action).is_err() {
            tracing::debug!("Dispatcher closed, dropping action");
        }
    }
}
