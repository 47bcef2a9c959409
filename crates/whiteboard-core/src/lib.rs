//! Room state machine: the per-room pipeline that ingests events, assigns
//! monotonic sequence numbers, resolves concurrency conflicts, and retains
//! an ordered log with snapshot and incremental catch-up.
//!
//! # Architecture
//!
//! Four small, independently testable pieces compose into [`room::RoomCoordinator`]:
//!
//! - [`validator`] — pure structural/semantic validation (component B)
//! - [`resolver`] — pure accept/reject decision (component C)
//! - [`sequencer`] — monotonic per-room counter (component A)
//! - [`event_log`] — the append-only log itself (component D)
//!
//! None of these touch the network or a socket. Concurrency (serializing
//! `submit` calls per room) is the caller's responsibility — see
//! `whiteboard-server`'s Room Registry.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod env;
pub mod error;
pub mod event_log;
pub mod resolver;
pub mod room;
pub mod sequencer;
pub mod validator;

pub use config::CoreConfig;
pub use env::Environment;
pub use error::CoreError;
pub use room::RoomCoordinator;
