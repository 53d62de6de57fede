//! Form domain layer
//!
//! Type-safe field handling for the registration view.

mod field;
mod form_state;

pub use field::{Field, FieldErrors, FormField};
pub use form_state::{Form, RegisterButton, RegistrationForm};
