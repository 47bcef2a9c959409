//! Admin HTTP surface (§6.2): thin wrappers over the same [`Hub`] the
//! websocket driver uses, so a room mutated over HTTP is immediately
//! visible to connected sockets and vice versa — the opposite of the
//! independently-constructed-service bug this design explicitly avoids.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use whiteboard_core::validator;
use whiteboard_proto::{Candidate, Event, EventKind};

use crate::{hub::SharedHub, server_error::ServerError};

/// Builds the admin router, to be merged into the main app router.
pub fn router() -> Router<SharedHub> {
    Router::new()
        .route("/rooms", get(list_rooms))
        .route("/rooms/{room_id}/state", get(room_state))
        .route("/rooms/{room_id}", delete(delete_room))
        .route("/events/{room_id}", get(room_events))
        .route("/events", post(submit_event))
}

#[derive(Serialize)]
struct RoomsResponse {
    rooms: Vec<String>,
    count: usize,
}

async fn list_rooms(State(hub): State<SharedHub>) -> Json<RoomsResponse> {
    let rooms = hub.list_rooms();
    Json(RoomsResponse { count: rooms.len(), rooms })
}

#[derive(Serialize)]
struct RoomStateResponse {
    room_id: String,
    events: Vec<Event>,
    event_count: usize,
    exists: bool,
}

async fn room_state(State(hub): State<SharedHub>, Path(room_id): Path<String>) -> Json<RoomStateResponse> {
    match hub.room_state(&room_id, None) {
        Some(events) => {
            Json(RoomStateResponse { room_id, event_count: events.len(), events, exists: true })
        }
        None => Json(RoomStateResponse { room_id, events: Vec::new(), event_count: 0, exists: false }),
    }
}

#[derive(Serialize)]
struct DeleteRoomResponse {
    room_id: String,
    cleared: bool,
}

async fn delete_room(
    State(hub): State<SharedHub>,
    Path(room_id): Path<String>,
) -> Result<Json<DeleteRoomResponse>, ServerError> {
    if hub.reset_room(&room_id) {
        Ok(Json(DeleteRoomResponse { room_id, cleared: true }))
    } else {
        Err(ServerError::RoomNotFound(room_id))
    }
}

#[derive(Deserialize)]
struct EventsQuery {
    after: Option<u64>,
}

async fn room_events(
    State(hub): State<SharedHub>,
    Path(room_id): Path<String>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<RoomStateResponse>, ServerError> {
    let events = hub.room_state(&room_id, query.after).ok_or_else(|| ServerError::RoomNotFound(room_id.clone()))?;
    Ok(Json(RoomStateResponse { room_id, event_count: events.len(), events, exists: true }))
}

#[derive(Deserialize)]
struct SubmitEventRequest {
    room_id: String,
    event: IncomingEvent,
}

/// The `event` payload of `POST /events`: a header plus an `EventKind`,
/// identical in shape to [`Candidate`] but accepted directly as JSON rather
/// than wrapped in a [`whiteboard_proto::ClientFrame`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingEvent {
    user_id: String,
    #[serde(flatten)]
    kind: EventKind,
}

async fn submit_event(
    State(hub): State<SharedHub>,
    Json(request): Json<SubmitEventRequest>,
) -> Result<Json<Event>, ServerError> {
    validator::validate_user_id(&request.event.user_id)?;
    validator::validate_room_id(&request.room_id)?;
    validator::validate_kind(&request.event.kind, hub.config())?;

    let candidate = Candidate {
        user_id: request.event.user_id,
        room_id: request.room_id,
        timestamp: wall_clock_millis(),
        kind: request.event.kind,
    };
    let accepted = hub.submit_event(candidate)?;
    Ok(Json(accepted))
}

#[allow(clippy::expect_used)]
fn wall_clock_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("invariant: system clock is after Unix epoch (1970-01-01)")
        .as_millis() as i64
}
