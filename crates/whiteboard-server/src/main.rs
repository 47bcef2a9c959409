//! Whiteboard server binary.
//!
//! # Usage
//!
//! ```bash
//! whiteboard-server --bind 0.0.0.0:8080
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use whiteboard_core::CoreConfig;
use whiteboard_server::{ConnectionTimings, Hub, ServerConfig};

/// Whiteboard room server
#[derive(Parser, Debug)]
#[command(name = "whiteboard-server")]
#[command(about = "Collaborative whiteboard room server")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Minimum inter-CLEAR_CANVAS timestamp gap, in milliseconds
    #[arg(long, default_value_t = CoreConfig::default().clear_cooldown_ms)]
    clear_cooldown_ms: i64,

    /// Soft cap on events retained per room
    #[arg(long, default_value_t = CoreConfig::default().max_events_per_room)]
    max_events_per_room: usize,

    /// Maximum accepted frame size, in bytes
    #[arg(long, default_value_t = CoreConfig::default().max_event_size_bytes)]
    max_event_size_bytes: usize,

    /// Maximum points per DRAW_LINE/DRAW_PATH event
    #[arg(long, default_value_t = CoreConfig::default().max_points_per_event)]
    max_points_per_event: usize,

    /// Heartbeat ping interval, in seconds
    #[arg(long, default_value_t = 30)]
    heartbeat_secs: u64,

    /// How long a session may go without inbound activity before being
    /// disconnected as a dead peer, in seconds
    #[arg(long, default_value_t = 10)]
    idle_timeout_secs: u64,

    /// Maximum concurrent sessions
    #[arg(long, default_value_t = ServerConfig::default().max_connections)]
    max_connections: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_server_config(self) -> ServerConfig {
        ServerConfig {
            bind_address: self.bind,
            heartbeat_interval: std::time::Duration::from_secs(self.heartbeat_secs),
            idle_timeout: std::time::Duration::from_secs(self.idle_timeout_secs),
            max_connections: self.max_connections,
            core: CoreConfig {
                clear_cooldown_ms: self.clear_cooldown_ms,
                max_events_per_room: self.max_events_per_room,
                max_event_size_bytes: self.max_event_size_bytes,
                max_points_per_event: self.max_points_per_event,
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let log_level = args.log_level.clone();
    let config = args.into_server_config();

    tracing::info!("whiteboard server starting");
    tracing::info!(bind = %config.bind_address, log_level, "binding");

    let hub = Arc::new(Hub::with_max_connections(config.core, config.max_connections));
    let timings = ConnectionTimings { heartbeat: config.heartbeat_interval, idle_timeout: config.idle_timeout };
    let app = whiteboard_server::app(hub, timings);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
