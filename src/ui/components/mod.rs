//! Reusable UI components

mod button;
mod dialog;
mod table;

pub use button::{render_action_button, render_sidebar_button, BUTTON_HEIGHT};
pub use dialog::render_notice_dialog;
pub use table::{render_table, Column};
