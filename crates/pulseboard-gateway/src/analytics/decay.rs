//! Real-time gauge decay.
//!
//! Every page view queues a deadline; one task per store sleeps until the
//! oldest deadline, then decrements the gauge under the store lock. Timers
//! are coalesced but the net effect is still one decrement per page view.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use super::store::Shared;

pub(crate) fn spawn(shared: Arc<Shared>) -> JoinHandle<()> {
    tokio::spawn(run(shared))
}

async fn run(shared: Arc<Shared>) {
    loop {
        match shared.expire_due(Instant::now()) {
            Some(deadline) => {
                tokio::select! {
                    _ = time::sleep_until(deadline) => {}
                    _ = shared.wake.notified() => {}
                }
            }
            // Queue empty: park until the next page view.
            None => shared.wake.notified().await,
        }
    }
}
