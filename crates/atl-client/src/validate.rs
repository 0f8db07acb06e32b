//! Pre-flight validation of required request fields.
//!
//! Every endpoint declares the identifiers it cannot be called without, in
//! order, and checks them before building a request:
//!
//! ```rust
//! use atl_client::Requirements;
//!
//! fn get_comment(issue_key_or_id: &str, comment_id: &str) -> atl_client::Result<()> {
//!     Requirements::new()
//!         .field("issueKeyOrId", issue_key_or_id)
//!         .field("commentId", comment_id)
//!         .check()?;
//!     // ... issue the request
//!     Ok(())
//! }
//!
//! let err = get_comment("ABC-1", "").unwrap_err();
//! assert_eq!(err.validation_field(), Some("commentId"));
//! ```
//!
//! The first missing field is reported; later fields are not evaluated.

use tracing::debug;

use crate::error::{Error, Result};

/// A value that can be absent in the sense of a required request field.
///
/// Text and collections are missing when empty (text also when only
/// whitespace), numbers when zero, options when `None` or when the inner
/// value is missing.
pub trait Required {
    /// Returns true if the value is the zero/empty value for its type.
    fn is_missing(&self) -> bool;
}

impl Required for str {
    fn is_missing(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Required for String {
    fn is_missing(&self) -> bool {
        self.as_str().is_missing()
    }
}

impl<T: Required + ?Sized> Required for &T {
    fn is_missing(&self) -> bool {
        (**self).is_missing()
    }
}

impl<T: Required> Required for Option<T> {
    fn is_missing(&self) -> bool {
        self.as_ref().is_none_or(Required::is_missing)
    }
}

impl<T> Required for [T] {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Required for Vec<T> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! impl_required_non_zero {
    ($($ty:ty),*) => {
        $(
            impl Required for $ty {
                fn is_missing(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_required_non_zero!(u8, u16, u32, u64, usize, i32, i64);

/// Check a single required field.
pub fn validate<V: Required + ?Sized>(field: &'static str, value: &V) -> Result<()> {
    Requirements::new().field(field, value).check()
}

/// An endpoint's ordered list of required fields.
#[derive(Debug, Default, Clone, Copy)]
#[must_use = "call `check()` to surface the first missing field"]
pub struct Requirements {
    failed: Option<&'static str>,
}

impl Requirements {
    /// Start an empty requirement list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `value` to be non-empty (text, collections) or non-zero
    /// (numbers).
    pub fn field<V: Required + ?Sized>(mut self, field: &'static str, value: &V) -> Self {
        if self.failed.is_none() && value.is_missing() {
            self.failed = Some(field);
        }
        self
    }

    /// Require a caller-evaluated predicate to hold for `field`.
    pub fn custom(mut self, field: &'static str, holds: bool) -> Self {
        if self.failed.is_none() && !holds {
            self.failed = Some(field);
        }
        self
    }

    /// Fail with the first missing field, if any.
    pub fn check(self) -> Result<()> {
        match self.failed {
            Some(field) => {
                debug!(field, "Rejected call with missing required field");
                Err(Error::validation(field))
            }
            None => Ok(()),
        }
    }
}
