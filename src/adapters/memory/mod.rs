//! In-memory persistence gateway.
//!
//! Implements both signup ports over process memory. Used by tests and for
//! running the service without a database; data is lost on restart.

mod in_memory_waitlist;

pub use in_memory_waitlist::InMemoryWaitlist;
