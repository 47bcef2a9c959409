//! Whiteboard room server: websocket driver, admin HTTP surface, and
//! process bootstrap glue around `whiteboard_core`'s room state machine.
//!
//! # Architecture
//!
//! - [`hub::Hub`] is the single shared surface both the websocket and HTTP
//!   routes call into — one Registry, Membership Table, and Broadcaster
//!   per process (§9).
//! - [`registry::RoomRegistry`] (component F) hands out a per-room lock so
//!   rooms proceed fully in parallel.
//! - [`membership::MembershipTable`] (component G) and [`broadcast::Broadcaster`]
//!   (component I) track who is where and fan events out to them.
//! - [`session::Session`] (component H) is per-socket state.
//! - [`transport`] drives one websocket connection end to end.
//! - [`http`] exposes the same [`hub::Hub`] over plain REST.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use axum::{
    Router,
    routing::{any, get},
};
use tower_http::trace::TraceLayer;

pub mod broadcast;
pub mod config;
pub mod http;
pub mod hub;
pub mod membership;
pub mod registry;
pub mod server_error;
pub mod session;
pub mod system_env;
pub mod transport;

pub use config::ServerConfig;
pub use hub::{Hub, SharedHub};
pub use server_error::ServerError;
pub use system_env::SystemEnv;
pub use transport::ConnectionTimings;

/// Builds the full application router: the `/ws` websocket upgrade route,
/// `/health`, and the admin HTTP surface, all sharing one [`SharedHub`]
/// (§9). Used by both the production binary and integration tests so
/// neither can drift from the other's wiring.
#[must_use]
pub fn app(hub: SharedHub, timings: ConnectionTimings) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/ws", any(transport::websocket_upgrade))
        .merge(http::router())
        .layer(TraceLayer::new_for_http())
        .with_state(hub)
        .layer(axum::Extension(timings))
}
