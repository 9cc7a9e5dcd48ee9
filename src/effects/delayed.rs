//! Puts scheduled for later, cancellable until they fire

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::app::ActionSender;
use crate::messages::Action;

/// A put that fires after a delay unless cancelled first.
/// Dropping the handle cancels it too.
pub struct DelayedPut {
    handle: JoinHandle<()>,
    fired: Arc<AtomicBool>,
}

impl DelayedPut {
    pub fn schedule(tx: &ActionSender, delay: Duration, action: impl Into<Action>) -> Self {
        let tx = tx.clone();
        let action = action.into();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            flag.store(true, Ordering::SeqCst);
            tx.put(action);
        });
        DelayedPut { handle, fired }
    }

    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    /// Returns `true` if the put was stopped before firing. Waits for the
    /// task to settle, so a put that already fired has landed on return.
    pub async fn cancel(mut self) -> bool {
        self.handle.abort();
        let _ = (&mut self.handle).await;
        !self.has_fired()
    }
}

impl Drop for DelayedPut {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
