//! Server-level configuration (§6.3), layered on top of the room pipeline's
//! `CoreConfig`.

use std::time::Duration;

use whiteboard_core::CoreConfig;

/// Runtime configuration for the whole server process: transport, admin
/// surface, and the room pipeline underneath.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the websocket/admin HTTP listener binds to.
    pub bind_address: String,
    /// Interval between heartbeat pings sent to idle sessions (§4.H).
    pub heartbeat_interval: Duration,
    /// How long a session may go without any inbound activity (a frame or a
    /// pong) before it is disconnected as a dead peer (§4.H).
    pub idle_timeout: Duration,
    /// Hard cap on concurrent sessions; connections beyond this are closed
    /// immediately on accept (§6.3).
    pub max_connections: usize,
    /// Room pipeline configuration (clear cooldown, log cap, size limits).
    pub core: CoreConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_owned(),
            heartbeat_interval: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(10),
            max_connections: 10_000,
            core: CoreConfig::default(),
        }
    }
}
