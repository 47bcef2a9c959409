//! Event Validator (component B).
//!
//! A pure function: given an already-decoded frame, accept or reject. Never
//! touches the clock, the log, or any other room state — determinism makes
//! it trivially testable and safe to call outside the per-room critical
//! section.

use whiteboard_proto::EventKind;

use crate::{config::CoreConfig, error::CoreError};

/// Rejects empty user ids. Applies to every frame, control or whiteboard
/// event alike (§4.B rule 1).
pub fn validate_user_id(user_id: &str) -> Result<(), CoreError> {
    if user_id.is_empty() {
        return Err(CoreError::InvalidEvent { reason: "userId must not be empty".to_owned() });
    }
    Ok(())
}

/// Rejects empty room ids. Applies to every frame that names a room
/// directly (`JOIN_ROOM`/`LEAVE_ROOM`) or is submitted over the admin HTTP
/// surface; whiteboard-event frames over the websocket never carry a
/// client-supplied `roomId` to validate (§4.B rule 1).
pub fn validate_room_id(room_id: &str) -> Result<(), CoreError> {
    if room_id.is_empty() {
        return Err(CoreError::InvalidEvent { reason: "roomId must not be empty".to_owned() });
    }
    Ok(())
}

/// Rejects a frame whose serialized size exceeds the configured maximum,
/// before any JSON parsing is attempted.
pub fn validate_frame_size(raw_len: usize, config: &CoreConfig) -> Result<(), CoreError> {
    if raw_len > config.max_event_size_bytes {
        return Err(CoreError::InvalidEvent {
            reason: format!(
                "frame of {raw_len} bytes exceeds max size of {} bytes",
                config.max_event_size_bytes
            ),
        });
    }
    Ok(())
}

/// Validates the semantic rules for a decoded event payload (§4.B rules 2-4).
pub fn validate_kind(kind: &EventKind, config: &CoreConfig) -> Result<(), CoreError> {
    match kind {
        EventKind::DrawLine { points, color, stroke_width }
        | EventKind::DrawPath { path: points, color, stroke_width } => {
            validate_points(points, config)?;
            validate_color(color)?;
            validate_stroke_width(*stroke_width)?;
        },
        EventKind::Erase { region } => {
            if !region.x.is_finite() || !region.y.is_finite() {
                return Err(invalid("region coordinates must be finite"));
            }
            if !region.width.is_finite() || !region.height.is_finite() {
                return Err(invalid("region dimensions must be finite"));
            }
            if region.width <= 0.0 {
                return Err(invalid("region width must be > 0"));
            }
            if region.height <= 0.0 {
                return Err(invalid("region height must be > 0"));
            }
        },
        EventKind::ClearCanvas => {},
    }
    Ok(())
}

fn validate_points(points: &[[f64; 2]], config: &CoreConfig) -> Result<(), CoreError> {
    if points.len() < 2 {
        return Err(invalid("at least 2 points are required"));
    }
    if points.len() > config.max_points_per_event {
        return Err(invalid(format!(
            "{} points exceeds max of {}",
            points.len(),
            config.max_points_per_event
        )));
    }
    for [x, y] in points {
        if !x.is_finite() || !y.is_finite() {
            return Err(invalid("point coordinates must be finite"));
        }
    }
    Ok(())
}

fn validate_color(color: &str) -> Result<(), CoreError> {
    if is_hex_color(color) {
        Ok(())
    } else {
        Err(invalid("color must match #RRGGBB"))
    }
}

fn is_hex_color(color: &str) -> bool {
    let bytes = color.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

fn validate_stroke_width(width: f64) -> Result<(), CoreError> {
    if width.is_finite() && width > 0.0 && width <= 100.0 {
        Ok(())
    } else {
        Err(invalid("strokeWidth must be in (0, 100]"))
    }
}

fn invalid(reason: impl Into<String>) -> CoreError {
    CoreError::InvalidEvent { reason: reason.into() }
}

#[cfg(test)]
mod tests {
    use whiteboard_proto::Rect;

    use super::*;

    fn line(points: Vec<[f64; 2]>, color: &str, stroke_width: f64) -> EventKind {
        EventKind::DrawLine { points, color: color.to_owned(), stroke_width }
    }

    #[test]
    fn accepts_well_formed_draw_line() {
        let config = CoreConfig::default();
        let kind = line(vec![[0.0, 0.0], [1.0, 1.0]], "#FF00AA", 2.5);
        assert!(validate_kind(&kind, &config).is_ok());
    }

    #[test]
    fn rejects_invalid_color() {
        let config = CoreConfig::default();
        let kind = line(vec![[0.0, 0.0], [1.0, 1.0]], "red", 2.5);
        assert!(matches!(validate_kind(&kind, &config), Err(CoreError::InvalidEvent { .. })));
    }

    #[test]
    fn rejects_single_point() {
        let config = CoreConfig::default();
        let kind = line(vec![[0.0, 0.0]], "#FFFFFF", 1.0);
        assert!(validate_kind(&kind, &config).is_err());
    }

    #[test]
    fn rejects_stroke_width_out_of_range() {
        let config = CoreConfig::default();
        assert!(validate_kind(&line(vec![[0.0, 0.0], [1.0, 1.0]], "#FFFFFF", 0.0), &config).is_err());
        assert!(validate_kind(&line(vec![[0.0, 0.0], [1.0, 1.0]], "#FFFFFF", 101.0), &config).is_err());
    }

    #[test]
    fn rejects_too_many_points() {
        let config = CoreConfig { max_points_per_event: 3, ..CoreConfig::default() };
        let points = vec![[0.0, 0.0]; 4];
        assert!(validate_kind(&line(points, "#FFFFFF", 1.0), &config).is_err());
    }

    #[test]
    fn erase_requires_positive_dimensions() {
        let config = CoreConfig::default();
        let region = Rect { x: 0.0, y: 0.0, width: 0.0, height: 5.0 };
        assert!(validate_kind(&EventKind::Erase { region }, &config).is_err());
    }

    #[test]
    fn clear_canvas_always_valid() {
        assert!(validate_kind(&EventKind::ClearCanvas, &CoreConfig::default()).is_ok());
    }

    #[test]
    fn rejects_empty_user_id() {
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("u1").is_ok());
    }

    #[test]
    fn rejects_empty_room_id() {
        assert!(validate_room_id("").is_err());
        assert!(validate_room_id("r1").is_ok());
    }
}
