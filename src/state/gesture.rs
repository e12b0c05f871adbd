use super::viewport::Point;

/// Transient gesture state. At most one gesture is active at a time; starting
/// a new one replaces whatever was in progress, so a simultaneous drag and
/// pinch is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        start_pointer: Point,
        start_translation: Point,
    },
    Pinching {
        start_distance: f64,
        start_zoom: f64,
        // Midpoint at gesture start. Move events pivot on the live
        // midpoint instead.
        origin: Point,
    },
}

/// Euclidean distance between two contacts.
pub fn contact_distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Axis-wise midpoint of two contacts: `max - |diff| / 2` per axis.
pub fn contact_midpoint(a: Point, b: Point) -> Point {
    let x1 = a.x.max(b.x);
    let x2 = a.x.min(b.x);
    let y1 = a.y.max(b.y);
    let y2 = a.y.min(b.y);
    Point::new(x1 - (x1 - x2) / 2.0, y1 - (y1 - y2) / 2.0)
}
