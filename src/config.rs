use serde::Deserialize;

use crate::util::clog;

/// Engine tuning constants. Fixed for the lifetime of the engine; defaults
/// match the stock map behavior and can be overridden with a JSON blob under
/// the `mz_config` localStorage key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Magnification at zoom level 0.
    pub min_scale: f64,
    /// Magnification at zoom level 1.
    pub max_scale: f64,
    /// Wheel sensitivity: zoom delta is `-deltaY / wheel_divisor`.
    pub wheel_divisor: f64,
    /// Pinch sensitivity: zoom delta is `(distance - start) / pinch_divisor`.
    pub pinch_divisor: f64,
    /// Zoom level step applied by the - / + buttons.
    pub zoom_step: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 2.0,
            wheel_divisor: 1000.0,
            pinch_divisor: 500.0,
            zoom_step: 0.1,
        }
    }
}

impl ViewerConfig {
    /// Loads the localStorage override, falling back to defaults when the key
    /// is absent or unreadable.
    pub fn load() -> Self {
        if let Some(win) = web_sys::window() {
            if let Ok(Some(store)) = win.local_storage() {
                if let Ok(Some(raw)) = store.get_item("mz_config") {
                    match serde_json::from_str(&raw) {
                        Ok(cfg) => return cfg,
                        Err(_) => clog("mz_config is not valid JSON, using defaults"),
                    }
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_map() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.min_scale, 1.0);
        assert_eq!(cfg.max_scale, 2.0);
        assert_eq!(cfg.wheel_divisor, 1000.0);
        assert_eq!(cfg.pinch_divisor, 500.0);
        assert_eq!(cfg.zoom_step, 0.1);
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let cfg: ViewerConfig =
            serde_json::from_str(r#"{"max_scale": 4.0, "zoom_step": 0.25}"#).unwrap();
        assert_eq!(cfg.max_scale, 4.0);
        assert_eq!(cfg.zoom_step, 0.25);
        assert_eq!(cfg.min_scale, 1.0);
        assert_eq!(cfg.wheel_divisor, 1000.0);
    }

    #[test]
    fn garbage_override_is_rejected() {
        assert!(serde_json::from_str::<ViewerConfig>("{min_scale:").is_err());
    }
}
