pub mod app;
pub mod map_view;
pub mod zoom_controls;

pub use app::App;
