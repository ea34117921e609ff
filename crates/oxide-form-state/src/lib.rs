//! # oxide-form-state
//!
//! Form state for `oxide-forms` controls.
//!
//! This crate provides:
//! - A per-form state container with initial values, touched flags and
//!   submit handling
//! - Field binding with implicit field registration
//! - Per-field change subscriptions
//! - Validation functions and reusable field validators
//! - File selection and object-URL lifecycle helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_form_state::{
//!     ErrorMap, FormOptions, FormState, FormValues, LogSubmit, SelectOption,
//!     SubmitOutcome,
//! };
//!
//! fn validate(values: &FormValues) -> ErrorMap {
//!     let mut errors = ErrorMap::new();
//!     if values.get("prefecture").is_empty() {
//!         errors.add("prefecture", "選択してください");
//!     }
//!     errors
//! }
//!
//! let mut form = FormState::new(FormValues::new(), FormOptions::default())
//!     .with_validator(validate);
//!
//! let mut prefecture = form.bind("prefecture");
//! prefecture.select(Some(SelectOption::same("新潟県")));
//! prefecture.blur();
//!
//! let outcome = form.handle_submit(&LogSubmit::default()).unwrap();
//! assert_eq!(outcome, SubmitOutcome::Submitted);
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use oxide_form_state::{FormValues, Rules, Validate};
//! use oxide_form_state::validation::{EmailValidator, RequiredValidator};
//!
//! let rules = Rules::new()
//!     .rule("email", RequiredValidator::new())
//!     .rule("email", EmailValidator::new());
//!
//! let errors = rules.validate(&FormValues::new().with("email", "nope"));
//! assert_eq!(errors.get("email"), Some("Enter a valid email address."));
//! ```

mod binder;
mod error;
mod event;
mod field;
pub mod files;
mod options;
mod state;
mod submit;
pub mod validation;
mod value;

pub use binder::FieldBinder;
pub use error::{ErrorMap, FormError, Result, SubmitError};
pub use event::FieldEvent;
pub use field::{FieldMeta, FieldSnapshot, FieldSubscription, SubscriptionMask};
pub use options::{FormOptions, ValidationMode};
pub use state::FormState;
pub use submit::{LogSubmit, SubmitAttempt, SubmitHandler, SubmitOutcome, SubmitStatus};
pub use validation::{Rules, Validate, Validator};
pub use value::{FieldPath, FieldValue, FormValues, PathSegment, SelectOption, MAX_INDEX};
