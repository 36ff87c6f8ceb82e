//! Optional capabilities for field types that are not primitives themselves.
//!
//! A wrapper such as "a string that may be unset" cannot classify as a scalar, but
//! it can stand in for one. Annotate the field with a pretend type
//! (`#[urlenc = "key,omitempty,string"]`) and implement the hooks:
//!
//! ```
//! use urlenc::{Error, ExtractValue, FieldValue, InjectValue, Value};
//!
//! #[derive(Default)]
//! pub struct MaybeString {
//!     pub valid: bool,
//!     pub string: String,
//! }
//!
//! impl ExtractValue for MaybeString {
//!     fn extract_value(&self) -> Option<Value> {
//!         self.valid.then(|| Value::text(self.string.as_str()))
//!     }
//! }
//!
//! impl InjectValue for MaybeString {
//!     fn inject_value(&mut self, value: Value) -> Result<(), Error> {
//!         self.string = String::from_value(value)?;
//!         self.valid = true;
//!         Ok(())
//!     }
//! }
//! ```
//!
//! The derive macro picks the hooks up per field at compile time. A field type with a
//! hook uses it in preference to its native [`FieldValue`](crate::FieldValue)
//! conversion.
//!
//! `omitempty` asks the field itself through [`ExtractValue::is_zero`], so a wrapper
//! that is set to empty text is still encoded as `key=`.
//!
//! An `Option<W>` field whose `W` has the hooks works too. `None` is never encoded,
//! and decoding into `None` stores `W::default()` first and then injects into it, so
//! `W` must implement `Default` to be decoded through an `Option`.

use crate::{Error, Value};

/// Read a substitute primitive out of a field before encoding.
pub trait ExtractValue {
    /// The value to encode in place of `self`; `None` means unset and the key is
    /// left out.
    fn extract_value(&self) -> Option<Value>;

    /// Whether `self` is its type's zero value, for fields annotated `omitempty`.
    /// Defaults to "nothing to extract".
    fn is_zero(&self) -> bool {
        self.extract_value().is_none()
    }
}

/// Accept a decoded primitive into a field instead of plain assignment.
pub trait InjectValue {
    /// Validate and store `value`. The value has the field's declared (or pretend)
    /// shape and kind.
    ///
    /// # Errors
    ///
    /// Any error returned aborts the decode and is handed to the caller unchanged.
    /// Use [`Error::rejected`] for validation failures.
    fn inject_value(&mut self, value: Value) -> Result<(), Error>;
}
