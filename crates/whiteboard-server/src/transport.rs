//! Websocket transport: one task per connection, translating wire frames
//! into [`Hub`] calls and [`Hub`] broadcasts back out over the socket.

use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use whiteboard_core::{env::Environment, validator};
use whiteboard_proto::{Candidate, ClientFrame, ServerMessage, decode_client_frame};

use crate::{hub::SharedHub, session::Session, system_env::SystemEnv};

/// Heartbeat/idle-timeout pair threaded from `ServerConfig` through axum's
/// router state into [`handle_socket`] (§4.H, §6.3).
#[derive(Debug, Clone, Copy)]
pub struct ConnectionTimings {
    /// Interval between heartbeat pings sent to idle sessions.
    pub heartbeat: Duration,
    /// How long a session may go without inbound activity before being
    /// disconnected as a dead peer.
    pub idle_timeout: Duration,
}

/// Axum handler for `/ws`: accepts the upgrade and hands the socket to
/// [`handle_socket`] with the production [`SystemEnv`].
pub async fn websocket_upgrade(
    axum::extract::State(hub): axum::extract::State<SharedHub>,
    axum::Extension(timings): axum::Extension<ConnectionTimings>,
    ws: axum::extract::ws::WebSocketUpgrade,
) -> axum::response::Response {
    ws.on_upgrade(move |socket| handle_socket(socket, hub, SystemEnv::new(), timings.heartbeat, timings.idle_timeout))
}

/// Drives a single accepted websocket connection until it closes.
///
/// A single task multiplexes three event sources with `select!`: inbound
/// frames from the client, outbound frames queued by the Broadcaster for
/// this session, and a heartbeat tick that keeps idle connections alive and
/// detects dead ones (§4.H). A session that goes `idle_timeout` without any
/// inbound activity (a frame, or a pong answering our ping) is disconnected
/// as a dead peer.
pub async fn handle_socket<E: Environment>(
    mut socket: WebSocket,
    hub: SharedHub,
    env: E,
    heartbeat: Duration,
    idle_timeout: Duration,
) {
    let (mut session, mut outbound_rx) = Session::new(&env);
    let session_id = session.id();

    if !hub.register_session(session_id, session.outbound_sender()) {
        tracing::warn!(session_id, "rejecting connection: max connections exceeded");
        let _ = send_message(&mut socket, &ServerMessage::error("Server is at capacity")).await;
        let _ = socket.close().await;
        return;
    }
    tracing::debug!(session_id, "session connected");

    if send_message(&mut socket, &ServerMessage::connected(session.id_hex())).await.is_err() {
        hub.disconnect_session(session_id);
        return;
    }

    let mut ticker = tokio::time::interval(heartbeat);
    ticker.tick().await; // first tick fires immediately; only later ticks matter
    let mut last_activity = env.now();

    loop {
        tokio::select! {
            inbound = socket.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        last_activity = env.now();
                        handle_text_frame(&hub, &mut session, &env, text.as_str());
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => last_activity = env.now(), // binary/ping/pong carry no protocol meaning, but count as activity
                    Some(Err(_)) => break,
                }
            }
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(message) if send_message(&mut socket, &message).await.is_ok() => {}
                    _ => break,
                }
            }
            _ = ticker.tick() => {
                if env.now() - last_activity >= idle_timeout {
                    tracing::debug!(session_id, "idle timeout exceeded, disconnecting");
                    break;
                }
                if socket.send(Message::Ping(Vec::new().into())).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::debug!(session_id, "session disconnected");
    hub.disconnect_session(session_id);
}

fn handle_text_frame<E: Environment>(hub: &SharedHub, session: &mut Session, env: &E, text: &str) {
    if validator::validate_frame_size(text.len(), hub.config()).is_err() {
        hub.send_error(session.id(), "frame too large");
        return;
    }

    let frame = match decode_client_frame(text) {
        Ok(frame) => frame,
        Err(err) => {
            tracing::debug!(session_id = session.id(), error = %err, "frame decode failed");
            hub.send_error(session.id(), "Invalid message format");
            return;
        }
    };

    match frame {
        ClientFrame::JoinRoom(body) => {
            if validator::validate_user_id(&body.user_id).is_err()
                || validator::validate_room_id(&body.room_id).is_err()
            {
                hub.send_error(session.id(), "Invalid event");
                return;
            }
            session.set_room(Some(body.room_id.clone()));
            hub.join_room(session.id(), &body.room_id);
        }
        ClientFrame::LeaveRoom(body) => {
            if validator::validate_user_id(&body.user_id).is_err()
                || validator::validate_room_id(&body.room_id).is_err()
            {
                hub.send_error(session.id(), "Invalid event");
                return;
            }
            session.set_room(None);
            hub.leave_room(session.id(), &body.room_id);
        }
        other => handle_event_frame(hub, session, env, other),
    }
}

fn handle_event_frame<E: Environment>(hub: &SharedHub, session: &Session, env: &E, frame: ClientFrame) {
    let Some(room_id) = session.room().map(str::to_owned) else {
        hub.send_error(session.id(), "Not in a room");
        return;
    };

    let user_id = frame.user_id().to_owned();
    if validator::validate_user_id(&user_id).is_err() {
        hub.send_error(session.id(), "Invalid event");
        return;
    }

    let Some(kind) = frame.into_event_kind() else {
        // JOIN_ROOM/LEAVE_ROOM never reach here (handled above); any other
        // variant always produces a kind.
        hub.send_error(session.id(), "Invalid event");
        return;
    };

    if let Err(err) = validator::validate_kind(&kind, hub.config()) {
        hub.send_error(session.id(), err.client_message());
        return;
    }

    let candidate = Candidate { user_id, room_id, timestamp: env.unix_millis(), kind };
    if let Err(err) = hub.submit_event(candidate) {
        hub.send_error(session.id(), err.client_message());
    }
}

async fn send_message(socket: &mut WebSocket, message: &ServerMessage) -> Result<(), axum::Error> {
    let text = message.to_json().unwrap_or_else(|_| "{}".to_owned());
    socket.send(Message::Text(text.into())).await
}
