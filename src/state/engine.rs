use crate::config::ViewerConfig;

use super::gesture::{Gesture, contact_distance, contact_midpoint};
use super::scene::Scene;
use super::viewport::{Point, ViewRect};

/// Owns the scene and the current gesture and exposes one mutation method per
/// input event. The host layer extracts plain coordinates from DOM events,
/// samples the container rect fresh, and calls in; a `true` return means the
/// scene changed and should be re-projected.
#[derive(Debug)]
pub struct MapEngine {
    scene: Scene,
    gesture: Gesture,
    config: ViewerConfig,
}

impl MapEngine {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            scene: Scene::new(config.min_scale, config.max_scale),
            gesture: Gesture::Idle,
            config,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Mouse button pressed on the surface: start a drag, cancelling any
    /// gesture in progress.
    pub fn pointer_down(&mut self, p: Point) {
        self.gesture = Gesture::Dragging {
            start_pointer: p,
            start_translation: Point::new(self.scene.x, self.scene.y),
        };
    }

    /// Mouse moved. Pure translation while dragging: the scene moves by
    /// exactly the pointer displacement since the drag started, zoom is
    /// untouched.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        match self.gesture {
            Gesture::Dragging {
                start_pointer,
                start_translation,
            } => {
                self.scene.x = start_translation.x + p.x - start_pointer.x;
                self.scene.y = start_translation.y + p.y - start_pointer.y;
                true
            }
            _ => false,
        }
    }

    /// Mouse released or left the document.
    pub fn pointer_up(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Contacts touched down. One contact starts a drag, exactly two start a
    /// pinch; any other count (including a third finger landing mid-gesture)
    /// aborts to idle.
    pub fn touch_start(&mut self, contacts: &[Point]) {
        self.gesture = match contacts {
            [p] => Gesture::Dragging {
                start_pointer: *p,
                start_translation: Point::new(self.scene.x, self.scene.y),
            },
            [a, b] => Gesture::Pinching {
                start_distance: contact_distance(*a, *b),
                start_zoom: self.scene.zoom(),
                origin: contact_midpoint(*a, *b),
            },
            _ => Gesture::Idle,
        };
    }

    /// Contacts moved. The pinch pivots on the live midpoint so the scene
    /// stays under the fingers as they travel; a contact count that no longer
    /// matches the gesture drops back to idle without touching the scene.
    pub fn touch_move(&mut self, contacts: &[Point], rect: &ViewRect) -> bool {
        match (self.gesture, contacts) {
            (
                Gesture::Dragging {
                    start_pointer,
                    start_translation,
                },
                [p],
            ) => {
                self.scene.x = start_translation.x + p.x - start_pointer.x;
                self.scene.y = start_translation.y + p.y - start_pointer.y;
                true
            }
            (
                Gesture::Pinching {
                    start_distance,
                    start_zoom,
                    ..
                },
                [a, b],
            ) => {
                let distance = contact_distance(*a, *b);
                let delta = (distance - start_distance) / self.config.pinch_divisor;
                self.scene
                    .zoom_to(contact_midpoint(*a, *b), start_zoom + delta, rect);
                true
            }
            (Gesture::Idle, _) => false,
            _ => {
                self.gesture = Gesture::Idle;
                false
            }
        }
    }

    /// Contacts lifted or the touch sequence was cancelled.
    pub fn touch_end(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Wheel turned over the surface. Skips the call entirely when already
    /// pinned at the boundary the delta pushes past; zoom-to-point is
    /// idempotent there anyway, this just avoids the recomputation.
    pub fn wheel(&mut self, delta_y: f64, origin: Point, rect: &ViewRect) -> bool {
        let zoom = self.scene.zoom();
        if delta_y > 0.0 && zoom == 0.0 {
            return false;
        }
        if delta_y < 0.0 && zoom == 1.0 {
            return false;
        }
        let delta = -delta_y / self.config.wheel_divisor;
        self.scene.zoom_to(origin, zoom + delta, rect);
        true
    }

    /// Zoom button pressed: one fixed step around the viewport center.
    pub fn zoom_in(&mut self, rect: &ViewRect) {
        self.nudge(self.config.zoom_step, rect);
    }

    pub fn zoom_out(&mut self, rect: &ViewRect) {
        self.nudge(-self.config.zoom_step, rect);
    }

    fn nudge(&mut self, step: f64, rect: &ViewRect) {
        let zoom = self.scene.zoom() + step;
        self.scene.zoom_to(rect.center(), zoom, rect);
    }

    /// Viewport resized: back to the initial view, no attempt to preserve the
    /// visual center.
    pub fn reset(&mut self) {
        self.scene.reset();
        self.gesture = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> MapEngine {
        MapEngine::new(ViewerConfig::default())
    }

    fn rect() -> ViewRect {
        ViewRect::new(0.0, 0.0, 500.0, 500.0)
    }

    #[test]
    fn drag_translates_by_the_pointer_displacement() {
        let mut eng = engine();
        eng.pointer_down(Point::new(10.0, 20.0));
        assert!(eng.pointer_move(Point::new(35.0, -4.0)));
        assert_eq!((eng.scene().x, eng.scene().y), (25.0, -24.0));
        // the displacement is measured from the start, not the last move
        assert!(eng.pointer_move(Point::new(11.0, 21.0)));
        assert_eq!((eng.scene().x, eng.scene().y), (1.0, 1.0));
        assert_eq!(eng.scene().zoom(), 0.0);
        eng.pointer_up();
        assert_eq!(eng.gesture(), Gesture::Idle);
        assert!(!eng.pointer_move(Point::new(99.0, 99.0)));
    }

    #[test]
    fn single_touch_drags_like_a_pointer() {
        let mut eng = engine();
        eng.touch_start(&[Point::new(50.0, 50.0)]);
        assert!(eng.touch_move(&[Point::new(60.0, 45.0)], &rect()));
        assert_eq!((eng.scene().x, eng.scene().y), (10.0, -5.0));
        eng.touch_end();
        assert_eq!(eng.gesture(), Gesture::Idle);
    }

    #[test]
    fn two_contacts_start_a_pinch_not_a_drag() {
        let mut eng = engine();
        eng.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        match eng.gesture() {
            Gesture::Pinching {
                start_distance,
                start_zoom,
                origin,
            } => {
                assert_eq!(start_distance, 100.0);
                assert_eq!(start_zoom, 0.0);
                assert_eq!(origin, Point::new(150.0, 100.0));
            }
            other => panic!("expected a pinch, got {other:?}"),
        }
    }

    #[test]
    fn three_contacts_abort_to_idle() {
        let mut eng = engine();
        eng.touch_start(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        ]);
        assert_eq!(eng.gesture(), Gesture::Idle);
    }

    #[test]
    fn pinch_spread_zooms_on_the_live_midpoint() {
        let mut eng = engine();
        eng.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        assert!(eng.touch_move(&[Point::new(80.0, 100.0), Point::new(220.0, 100.0)], &rect()));
        // distance went 100 -> 140
        let expected = 40.0 / 500.0;
        assert!((eng.scene().zoom() - expected).abs() < 1e-12);

        // the current midpoint (150, 100) stays fixed on screen
        let local = rect().to_local(Point::new(150.0, 100.0));
        let scene_x = (local.x - eng.scene().x) / eng.scene().scale();
        assert!((scene_x - 150.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_pinch_leaves_zoom_at_start() {
        let mut eng = engine();
        let p = Point::new(150.0, 150.0);
        eng.touch_start(&[p, p]);
        assert!(eng.touch_move(&[p, p], &rect()));
        assert_eq!(eng.scene().zoom(), 0.0);
    }

    #[test]
    fn contact_count_change_mid_gesture_drops_to_idle() {
        let mut eng = engine();
        eng.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        assert!(!eng.touch_move(&[Point::new(100.0, 100.0)], &rect()));
        assert_eq!(eng.gesture(), Gesture::Idle);

        eng.touch_start(&[Point::new(50.0, 50.0)]);
        assert!(!eng.touch_move(&[], &rect()));
        assert_eq!(eng.gesture(), Gesture::Idle);
    }

    #[test]
    fn starting_a_drag_cancels_a_pinch() {
        let mut eng = engine();
        eng.touch_start(&[Point::new(100.0, 100.0), Point::new(200.0, 100.0)]);
        eng.pointer_down(Point::new(10.0, 10.0));
        assert!(matches!(eng.gesture(), Gesture::Dragging { .. }));
    }

    #[test]
    fn wheel_zooms_toward_the_pointer() {
        let mut eng = engine();
        assert!(eng.wheel(-1000.0, Point::new(250.0, 250.0), &rect()));
        assert_eq!(eng.scene().zoom(), 1.0);
        assert!((eng.scene().x - -250.0).abs() < 1e-9);
        assert!((eng.scene().y - -250.0).abs() < 1e-9);
    }

    #[test]
    fn wheel_is_skipped_when_pinned_at_the_boundary() {
        let mut eng = engine();
        // zoomed all the way out, scrolling further out does nothing
        assert!(!eng.wheel(120.0, Point::new(10.0, 10.0), &rect()));
        assert_eq!((eng.scene().x, eng.scene().y), (0.0, 0.0));

        assert!(eng.wheel(-1000.0, Point::new(250.0, 250.0), &rect()));
        let (x, y) = (eng.scene().x, eng.scene().y);
        // zoomed all the way in, scrolling further in does nothing
        assert!(!eng.wheel(-120.0, Point::new(400.0, 10.0), &rect()));
        assert_eq!((eng.scene().x, eng.scene().y), (x, y));
    }

    #[test]
    fn buttons_step_the_zoom_around_the_viewport_center() {
        let mut eng = engine();
        eng.zoom_in(&rect());
        assert!((eng.scene().zoom() - 0.1).abs() < 1e-12);

        // the center point stays fixed
        let local = rect().to_local(rect().center());
        let scene_x = (local.x - eng.scene().x) / eng.scene().scale();
        assert!((scene_x - 250.0).abs() < 1e-9);

        eng.zoom_out(&rect());
        assert!(eng.scene().zoom().abs() < 1e-12);
    }

    #[test]
    fn reset_restores_the_initial_view_and_idles() {
        let mut eng = engine();
        eng.wheel(-300.0, Point::new(123.0, 45.0), &rect());
        eng.pointer_down(Point::new(0.0, 0.0));
        eng.reset();
        assert_eq!(eng.scene().zoom(), 0.0);
        assert_eq!((eng.scene().x, eng.scene().y), (0.0, 0.0));
        assert_eq!(eng.gesture(), Gesture::Idle);
    }
}
