// crates/orders/src/jobs/mod.rs
//! Background completion tasks for submitted orders.
//!
//! Provides:
//! - `CompletionRunner` — spawns one completion task per submission and keeps its handle
//! - `CompletionHandle` — the retained task handle for a single submission

pub mod runner;
pub mod types;

pub use runner::CompletionRunner;
pub use types::CompletionHandle;
