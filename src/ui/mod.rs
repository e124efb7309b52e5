pub mod refresh;
pub mod theme;
pub mod week_view;
