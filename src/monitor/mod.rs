//! Monitor core — the three state owners driven by the scheduler.
//!
//! Each owner consumes one sample per tick and returns an intent; none of
//! them performs I/O.  The [`Scheduler`](crate::scheduler::Scheduler)
//! executes the intents through the port traits.
//!
//! | Owner               | Input            | Intent                       |
//! |---------------------|------------------|------------------------------|
//! | `CosWatchdog`       | COS level        | key / unkey                  |
//! | `ShutdownDebouncer` | button pressed   | shutdown                     |
//! | `NetworkIndicator`  | probe address    | LED level                    |

pub mod cos;
pub mod network;
pub mod shutdown;

pub use cos::{CosIntent, CosWatchdog, UnkeyReason};
pub use network::{NetworkChange, NetworkIndicator};
pub use shutdown::{ShutdownDebouncer, ShutdownIntent};
