//!
//! # Error-Helper Utilities
//!
//! Shared by the walkers which check technology data, each of which
//! carries some state (typically a context stack) worth reporting upon failure.
//!
//! ```rust
//! use tech21utils::error::{ErrorHelper, Unwrapper};
//!
//! /// Checker which knows which layer it is looking at.
//! struct LayerChecker {
//!     layer: String,
//! }
//! impl ErrorHelper for LayerChecker {
//!     type Error = String;
//!     fn err(&self, msg: impl Into<String>) -> Self::Error {
//!         format!("Layer `{}`: {}", self.layer, msg.into())
//!     }
//! }
//! impl LayerChecker {
//!     fn check(&self, opacity: f64, cif: Option<&str>) -> Result<(), String> {
//!         self.assert((0.0..=1.0).contains(&opacity), "Opacity out of range")?;
//!         cif.unwrapper(self, "Missing CIF name")?;
//!         Ok(())
//!     }
//! }
//! let checker = LayerChecker { layer: "Metal".into() };
//! assert!(checker.check(0.8, Some("CM")).is_ok());
//! assert_eq!(
//!     checker.check(1.5, Some("CM")),
//!     Err("Layer `Metal`: Opacity out of range".to_string())
//! );
//! ```
//!

///
/// # ErrorHelper
///
/// Implementers provide `err`, which decorates a message with their internal state.
/// `fail`, `unwrap` and `assert` are provided on top of it.
///
pub trait ErrorHelper {
    type Error;

    /// Create and return a [Self::Error] value.
    fn err(&self, msg: impl Into<String>) -> Self::Error;
    /// Return failure
    fn fail<T>(&self, msg: impl Into<String>) -> Result<T, Self::Error> {
        Err(self.err(msg))
    }
    /// Unwrap the [Option] `opt` if it is [Some], and return our error if not.
    fn unwrap<T>(&self, opt: Option<T>, msg: impl Into<String>) -> Result<T, Self::Error> {
        match opt {
            Some(val) => Ok(val),
            None => self.fail(msg),
        }
    }
    /// Assert a boolean condition. Returns through `self.fail` if it is not satisfied.
    fn assert(&self, b: bool, msg: impl Into<String>) -> Result<(), Self::Error> {
        match b {
            true => Ok(()),
            false => self.fail(msg),
        }
    }
}

///
/// # Unwrapper
///
/// Post-fix flavor of [`ErrorHelper::unwrap`], for [`Option`]s and [`Result`]s.
/// Failures are routed through the helper rather than panicking.
///
/// ```rust
/// use tech21utils::error::{ErrorHelper, Unwrapper};
///
/// fn lookup(h: &impl ErrorHelper<Error = String>, names: &[&str]) -> Result<usize, String> {
///     names.iter().position(|n| *n == "Metal").unwrapper(h, "No `Metal` layer")
/// }
/// ```
///
pub trait Unwrapper {
    type Ok;
    fn unwrapper<H>(self, helper: &H, msg: impl Into<String>) -> Result<Self::Ok, H::Error>
    where
        H: ErrorHelper;
}

impl<T> Unwrapper for Option<T> {
    type Ok = T;
    fn unwrapper<H>(self, helper: &H, msg: impl Into<String>) -> Result<Self::Ok, H::Error>
    where
        H: ErrorHelper,
    {
        match self {
            Some(t) => Ok(t),
            None => helper.fail(msg),
        }
    }
}

/// The inner error of a failed [`Result`] is discarded in favor of the helper's.
impl<T, E> Unwrapper for Result<T, E> {
    type Ok = T;
    fn unwrapper<H>(
        self,
        helper: &H,
        msg: impl Into<String>,
    ) -> Result<<Self as Unwrapper>::Ok, H::Error>
    where
        H: ErrorHelper,
    {
        match self {
            Ok(t) => Ok(t),
            Err(_) => helper.fail(msg),
        }
    }
}
