//! Error types.
//!
//! Two failure classes are kept strictly apart:
//!
//! - [`FieldError`] / [`FieldErrors`]: expected, per-request validation failures.
//!   They are data, accumulated and returned inside a `stillwater::Validation`.
//! - [`RuleError`] / [`EngineError`]: schema authoring bugs (bad parameters,
//!   unknown rules, malformed paths). They abort the pass and propagate with `?`.

mod engine_error;
mod field_error;

pub use engine_error::{EngineError, RuleError};
pub use field_error::{FieldError, FieldErrors};
pub use crate::registry::RegistryError;
