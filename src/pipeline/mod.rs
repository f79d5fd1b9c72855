//! Word of the day reconciliation.
//!
//! - `window`: required calendar days and day keys
//! - `reconcile`: keep / evict / fetch partition of the cache
//! - `sync`: `RollingWindowSync`, the read-repair pass over store and remote

pub mod reconcile;
pub mod sync;
pub mod window;

pub use reconcile::ReconcilePlan;
pub use sync::{ReconcileReport, RollingWindowSync};
pub use window::{RequiredWindow, local_day_key, utc_day_key};
