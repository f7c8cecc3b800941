/// egui shell: selector panel, toolbar, and chart rendering.
pub mod panels;
pub mod plot;
