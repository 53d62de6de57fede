//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `register_form`: The account registration card

mod field_renderer;
mod register_form;

pub use register_form::draw_register;
