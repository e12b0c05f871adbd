// Device-space geometry shared by the recognizers.

/// A point in device (client) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Container bounding box in device pixels, sampled fresh on demand so layout
/// changes between events are always picked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Geometric center in device coordinates (button-zoom origin).
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Converts a device-space point into viewport-local coordinates.
    pub fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.left, p.y - self.top)
    }
}
