//! Panel rendering modules.

mod control_panel;
mod preview_view;
pub mod theme;
