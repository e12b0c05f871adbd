pub mod engine;
pub mod gesture;
pub mod scene;
pub mod viewport;

pub use engine::MapEngine;
pub use gesture::Gesture;
pub use scene::Scene;
pub use viewport::{Point, ViewRect};
