// crates/orders/src/jobs/types.rs
//! Types for the completion task system.

use tokio::task::{JoinError, JoinHandle};

use crate::state::OrderId;

/// Handle to the completion task started by one submission of an order.
///
/// Dropping the handle detaches the task; it keeps running.
pub struct CompletionHandle {
    pub order_id: OrderId,
    pub generation: u64,
    join: JoinHandle<()>,
}

impl CompletionHandle {
    pub(crate) fn new(order_id: OrderId, generation: u64, join: JoinHandle<()>) -> Self {
        Self {
            order_id,
            generation,
            join,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Abort the task. The order stays at `Processing`.
    pub fn abort(&self) {
        self.join.abort();
    }

    /// Wait for the task to finish.
    pub async fn join(self) -> Result<(), JoinError> {
        self.join.await
    }
}
