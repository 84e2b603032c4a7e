//! Single-threaded cooperative runtime: deferred work and scroll subscriptions.
//!
//! Every registration hands back a guard whose `Drop` deregisters it, so a component that is
//! torn down cannot leave callbacks behind.

pub(crate) mod hub;
pub(crate) mod scheduler;
