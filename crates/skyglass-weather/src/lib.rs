//! Weather data contract for Skyglass
//!
//! Snapshot types as pushed by the host's data warehouse, plus the
//! subscription seam the widget consumes them through.

pub mod timestamp;
pub mod types;
pub mod warehouse;

pub use timestamp::normalize_epoch_seconds;
pub use types::*;
pub use warehouse::{DataWarehouse, HostContext, SnapshotCallback, SnapshotHub, Subscription};
