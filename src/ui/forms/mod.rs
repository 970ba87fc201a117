//! Form rendering module
//!
//! This module contains UI components for rendering forms:
//! - `field_renderer`: Field rendering utilities
//! - `enrollment_form`: The three-step enrollment wizard

mod enrollment_form;
mod field_renderer;

pub use enrollment_form::draw_enrollment;
