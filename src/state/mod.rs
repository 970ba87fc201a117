//! Application state module

mod app_state;
mod forms;
mod students;

pub use app_state::*;
pub use forms::*;
pub use students::*;
