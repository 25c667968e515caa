//!
//! # Tech21 Internal Utilities Crate
//!
//! Shared between the technology data-model and its command-line tools:
//! * [SerializationFormat] and [SerdeFile] for technology-file IO
//! * [ErrorHelper] and [Unwrapper] for validation-walkers
//! * [ErrorContext] for locating validation failures
//! * The [enumstr] macro and its [EnumStr] trait
//!

pub mod ser;
pub use ser::*;

pub mod error;
pub use error::*;

pub mod context;
pub use context::*;

pub mod enumstr;
pub use enumstr::*;
