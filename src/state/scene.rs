use super::viewport::{Point, ViewRect};

/// The single source of truth for the view transform: a pixel translation of
/// the scene origin plus a normalized zoom level in `[0, 1]`.
///
/// The actual magnification is derived, never stored: it sweeps
/// exponentially from `min_scale` to `max_scale` as `zoom` goes 0 → 1, which
/// gives the zoom a logarithmic feel.
#[derive(Debug, Clone)]
pub struct Scene {
    pub x: f64,
    pub y: f64,
    zoom: f64,
    min_scale: f64,
    max_scale: f64,
}

impl Scene {
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 0.0,
            min_scale,
            max_scale,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, silently clamping into `[0, 1]`. Out-of-range
    /// values are expected here (they come from unbounded input deltas);
    /// clamping is the policy, not an error.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(0.0, 1.0);
    }

    /// Derived magnification factor, always in `[min_scale, max_scale]`.
    pub fn scale(&self) -> f64 {
        self.min_scale * (self.max_scale / self.min_scale).powf(self.zoom)
    }

    /// Changes the zoom level while keeping the scene point currently under
    /// `origin` (device coordinates) fixed on screen.
    ///
    /// The origin may lie outside the viewport; the math holds either way.
    /// At a clamp boundary the zoom no longer changes but the translation is
    /// still recomputed consistently, so repeated calls converge.
    pub fn zoom_to(&mut self, origin: Point, zoom: f64, rect: &ViewRect) {
        let local = rect.to_local(origin);

        let scale = self.scale();
        let scene_x = (local.x - self.x) / scale;
        let scene_y = (local.y - self.y) / scale;

        self.set_zoom(zoom);

        let scale = self.scale();
        self.x = local.x - scene_x * scale;
        self.y = local.y - scene_y * scale;
    }

    /// Back to the initial view: identity translation, fully zoomed out.
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.zoom = 0.0;
    }
}
