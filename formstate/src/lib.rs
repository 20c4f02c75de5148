//! Form state and validation engine.
//!
//! A [`FormEngine`] owns the current value and error of every field in a
//! form. Values change one field at a time through [`FormEngine::change`];
//! [`FormEngine::submit`] validates every field and calls the success
//! callback only when none of them fail.
//!
//! # Example
//!
//! ```no_run
//! use formstate::prelude::*;
//!
//! # fn main() -> Result<(), FormError> {
//! let mut form = FormEngine::builder()
//!     .schema([("email", ""), ("password", "")])
//!     .rule("email", Rule::function(|value, _| {
//!         required_error(value, None).or_else(|| email_format_error(value, None))
//!     }))
//!     .rule("password", Rule::function(|value, _| required_error(value, None)))
//!     .on_submit(|values| println!("login {:?}", values))
//!     .on_errors(|errors| println!("invalid {:?}", errors))
//!     .build()?;
//!
//! form.change("email", "bad")?;
//! form.submit(); // on_errors: email invalid, password required
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod declaration;
pub mod engine;
pub mod error;
pub mod outcome;
pub mod rule;
pub mod state;
pub mod types;
pub mod validators;

pub use config::{FormConfig, UnknownFieldPolicy};
pub use declaration::{FormDeclaration, FunctionRef, RuleDeclaration, ValidatorRegistry};
pub use engine::{FormBuilder, FormEngine};
pub use error::FormError;
pub use outcome::SubmitOutcome;
pub use rule::{Rule, RuleSet, ValidatorFn};
pub use state::{FieldErrors, FieldValues, Schema};

pub mod prelude {
    pub use crate::config::{FormConfig, UnknownFieldPolicy};
    pub use crate::declaration::{FormDeclaration, ValidatorRegistry};
    pub use crate::engine::{FormBuilder, FormEngine};
    pub use crate::error::FormError;
    pub use crate::outcome::SubmitOutcome;
    pub use crate::rule::{Rule, RuleSet};
    pub use crate::state::{FieldErrors, FieldValues, Schema};
    pub use crate::validators::{email_format_error, required_error};
}
