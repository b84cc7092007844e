// crates/orders/src/state.rs
//! Shared state for the order lifecycle tracker.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::jobs::CompletionRunner;

/// Identifier supplied by the client on order creation.
pub type OrderId = i64;

/// Simulated processing time before an order flips to `Completed`.
pub const PROCESSING_DELAY: Duration = Duration::from_secs(10);

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Completed,
}

/// A tracked order.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub status: OrderStatus,
    pub submitted_at: DateTime<Utc>,
    /// Number of times this id has been submitted.
    pub generation: u64,
}

/// Concurrent map from order id to its record.
///
/// Records are only ever created by [`OrderStore::submit`] and are never
/// removed. Every mutation touches a single key.
#[derive(Clone, Default)]
pub struct OrderStore {
    orders: Arc<DashMap<OrderId, OrderRecord>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `id` as `Processing`. Returns the new generation.
    pub fn submit(&self, id: OrderId) -> u64 {
        let mut entry = self.orders.entry(id).or_insert(OrderRecord {
            status: OrderStatus::Processing,
            submitted_at: Utc::now(),
            generation: 0,
        });
        entry.status = OrderStatus::Processing;
        entry.submitted_at = Utc::now();
        entry.generation += 1;
        entry.generation
    }

    /// Mark `id` as completed and return when the current submission was
    /// made. Last writer wins; a record that was re-submitted in the
    /// meantime is still overwritten.
    pub fn complete(&self, id: OrderId) -> Option<DateTime<Utc>> {
        let mut record = self.orders.get_mut(&id)?;
        record.status = OrderStatus::Completed;
        Some(record.submitted_at)
    }

    pub fn status(&self, id: OrderId) -> Option<OrderStatus> {
        self.orders.get(&id).map(|r| r.status)
    }

    /// Submission time of the longest-waiting order still processing.
    pub fn oldest_processing(&self) -> Option<DateTime<Utc>> {
        self.orders
            .iter()
            .filter(|r| r.status == OrderStatus::Processing)
            .map(|r| r.submitted_at)
            .min()
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.orders.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    pub orders: OrderStore,
    /// Owns the per-order completion tasks.
    pub completions: CompletionRunner,
}

impl AppState {
    /// Create state using the fixed production delay.
    pub fn new() -> Arc<Self> {
        Self::with_delay(PROCESSING_DELAY)
    }

    /// Create state with a custom processing delay (tests).
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        let orders = OrderStore::new();
        Arc::new(Self {
            start_time: Instant::now(),
            completions: CompletionRunner::new(orders.clone(), delay),
            orders,
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_id_is_absent() {
        let store = OrderStore::new();
        assert_eq!(store.status(999), None);
        assert!(!store.contains(999));
        assert!(store.is_empty());
    }

    #[test]
    fn test_submit_then_complete() {
        let store = OrderStore::new();
        let before = Utc::now();
        assert_eq!(store.submit(42), 1);
        assert_eq!(store.status(42), Some(OrderStatus::Processing));

        let submitted_at = store.complete(42).unwrap();
        assert!(submitted_at >= before);
        assert!(submitted_at <= Utc::now());
        assert_eq!(store.status(42), Some(OrderStatus::Completed));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_resubmit_resets_to_processing() {
        let store = OrderStore::new();
        store.submit(7);
        let first = store.complete(7).unwrap();

        assert_eq!(store.submit(7), 2);
        assert_eq!(store.status(7), Some(OrderStatus::Processing));
        let second = store.oldest_processing().unwrap();
        assert!(second >= first);
    }

    #[test]
    fn test_complete_never_fabricates_record() {
        let store = OrderStore::new();
        assert_eq!(store.complete(5), None);
        assert!(!store.contains(5));
    }

    #[test]
    fn test_oldest_processing_skips_completed() {
        let store = OrderStore::new();
        assert_eq!(store.oldest_processing(), None);

        store.submit(1);
        store.submit(2);
        let first = store.complete(1).unwrap();
        let oldest = store.oldest_processing().unwrap();
        assert!(oldest >= first);

        store.complete(2);
        assert_eq!(store.oldest_processing(), None);
    }

    #[test]
    fn test_status_serializes_as_plain_name() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Processing).unwrap(),
            "\"Processing\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"Completed\""
        );
    }

    #[test]
    fn test_clones_share_orders() {
        let store = OrderStore::new();
        let other = store.clone();
        store.submit(1);
        assert!(other.contains(1));
    }
}
