// crates/orders/src/jobs/runner.rs
//! Runner that owns the per-order completion tasks.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;

use super::types::CompletionHandle;
use crate::state::{OrderId, OrderStatus, OrderStore};

/// Spawns the simulated processing for each submitted order.
///
/// Each task sleeps for `delay`, then marks its order `Completed`. The
/// handle with the highest generation per order id is retained so callers
/// can await it; any other handle is detached and its task still runs to
/// completion. Finished handles are pruned whenever a task is started.
pub struct CompletionRunner {
    orders: OrderStore,
    delay: Duration,
    handles: Mutex<HashMap<OrderId, CompletionHandle>>,
}

impl CompletionRunner {
    pub fn new(orders: OrderStore, delay: Duration) -> Self {
        Self {
            orders,
            delay,
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Start the completion task for one submission of `id`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, id: OrderId, generation: u64) {
        let orders = self.orders.clone();
        let delay = self.delay;
        let join = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match orders.complete(id) {
                Some(submitted_at) => {
                    let elapsed_ms = (Utc::now() - submitted_at).num_milliseconds();
                    tracing::debug!(order_id = id, generation, elapsed_ms, "order completed");
                }
                None => tracing::warn!(order_id = id, generation, "completed order has no record"),
            }
        });

        let handle = CompletionHandle::new(id, generation, join);
        match self.handles.lock() {
            Ok(mut handles) => {
                handles.retain(|_, h| !h.is_finished());
                let keep_current = handles
                    .get(&id)
                    .is_some_and(|current| current.generation > generation);
                let detached = if keep_current {
                    handle
                } else {
                    match handles.insert(id, handle) {
                        Some(previous) => previous,
                        None => return,
                    }
                };
                if !detached.is_finished() {
                    tracing::debug!(
                        order_id = detached.order_id,
                        generation = detached.generation,
                        "detaching overlapping completion"
                    );
                }
            }
            Err(e) => tracing::error!("Mutex poisoned writing completion handles: {e}"),
        }
    }

    /// Wait for the completion task of the latest tracked submission of `id`.
    ///
    /// A task that already finished and was pruned counts as done when the
    /// order is `Completed`. Returns `false` if nothing is tracked for `id`
    /// or the task did not finish normally.
    pub async fn wait_for(&self, id: OrderId) -> bool {
        let handle = match self.handles.lock() {
            Ok(mut handles) => handles.remove(&id),
            Err(e) => {
                tracing::error!("Mutex poisoned reading completion handles: {e}");
                None
            }
        };
        let Some(handle) = handle else {
            return self.orders.status(id) == Some(OrderStatus::Completed);
        };

        let order_id = handle.order_id;
        let generation = handle.generation;
        match handle.join().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    order_id,
                    generation,
                    error = %e,
                    "completion task did not finish"
                );
                false
            }
        }
    }

    /// Number of tracked completion tasks that have not finished yet.
    pub fn pending(&self) -> usize {
        match self.handles.lock() {
            Ok(mut handles) => {
                handles.retain(|_, h| !h.is_finished());
                handles.len()
            }
            Err(e) => {
                tracing::error!("Mutex poisoned reading completion handles: {e}");
                0
            }
        }
    }

    /// Abort the tracked completion task for `id`, leaving it at `Processing`.
    pub fn abort(&self, id: OrderId) -> bool {
        match self.handles.lock() {
            Ok(handles) => match handles.get(&id) {
                Some(handle) => {
                    handle.abort();
                    true
                }
                None => false,
            },
            Err(e) => {
                tracing::error!("Mutex poisoned reading completion handles: {e}");
                false
            }
        }
    }
}
