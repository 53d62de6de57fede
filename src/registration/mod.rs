//! Registration: validation and submission of the sign-up form

mod flow;
mod validation;

pub use flow::{submit_registration, RetryPolicy};
pub use validation::{to_request, validate, MIN_PASSWORD_LEN};
