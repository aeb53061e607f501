//! telemetry/mod.rs
//! Engine telemetry: counters, stage timers, and immutable snapshots.
//!
//! Notes:
//! - Counters only hold sizes and outcomes, never key or payload bytes.
//! - Snapshots are immutable copies, safe to hand to logs or exporters.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
