//! Step definitions and per-step draft validation.

mod step;
mod validator;

pub use step::{InvalidStep, Step, TOTAL_STEPS};
pub use validator::{
    Field, MAX_GUESTS, MIN_BUDGET, MIN_GUESTS, MIN_REQUIREMENTS_LEN, ValidationResult,
    validate_all, validate_step,
};
