//! UIコンポーネント

pub mod analysis_panel;
pub mod consultant_panel;
pub mod header;
pub mod material_panel;
pub mod settings_panel;
pub mod upload_area;
pub mod visualizer;
