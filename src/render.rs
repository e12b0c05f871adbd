use web_sys::{HtmlElement, SvgElement};

use crate::state::Scene;

/// CSS transform carrying the scene onto the render target.
pub fn transform_value(scene: &Scene) -> String {
    format!(
        "translate({}px, {}px) scale({})",
        scene.x,
        scene.y,
        scene.scale()
    )
}

/// Whole-number percentage readout: 100% fully zoomed out, 200% fully in
/// (with the stock 1..2 scale range).
pub fn zoom_readout(scene: &Scene) -> String {
    format!("{}%", 100 + (100.0 * scene.zoom()).floor() as i64)
}

/// Pushes the current scene onto the host surface: transform on the SVG,
/// percentage on the readout.
pub fn project(svg: &SvgElement, readout: Option<&HtmlElement>, scene: &Scene) {
    let _ = svg.style().set_property("transform", &transform_value(scene));
    if let Some(el) = readout {
        el.set_text_content(Some(&zoom_readout(scene)));
    }
}
