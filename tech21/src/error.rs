//!
//! # Technology Result and Error Types
//!

// Local Imports
pub use crate::utils::{self, ErrorContext};

/// # [TechError] Result Type
pub type TechResult<T> = Result<T, TechError>;

///
/// # Technology Error Enumeration
///
pub enum TechError {
    /// Invalid technology data, with the context in which it was found
    Validation {
        message: String,
        stack: Vec<ErrorContext>,
    },
    /// Second registration of the same name
    Duplicate { kind: &'static str, name: String },
    /// Lookup of a name which is not registered
    NotFound { kind: &'static str, name: String },
    /// Boxed External Errors
    Boxed(Box<dyn std::error::Error + Send + Sync>),
    /// Uncategorized Error, with String Message
    Str(String),
}
impl TechError {
    /// Create a [TechError::Str] from anything String-convertible
    pub fn msg(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }
    /// Create an error-variant [Result] of our [TechError::Str] variant from anything String-convertible
    pub fn fail<T>(s: impl Into<String>) -> Result<T, Self> {
        Err(Self::msg(s))
    }
    /// Create a [TechError::NotFound]
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}
impl std::fmt::Debug for TechError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TechError::Validation { message, stack } => {
                write!(f, "Validation Error: \n - {} \n - {:?}", message, stack)
            }
            TechError::Duplicate { kind, name } => {
                write!(f, "Duplicate {} `{}`", kind, name)
            }
            TechError::NotFound { kind, name } => write!(f, "No {} named `{}`", kind, name),
            TechError::Boxed(err) => err.fmt(f),
            TechError::Str(err) => err.fmt(f),
        }
    }
}
impl std::fmt::Display for TechError {
    /// Delegates to the [Debug] implementation
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
impl std::error::Error for TechError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Boxed(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<String> for TechError {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for TechError {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
impl From<utils::ser::Error> for TechError {
    fn from(e: utils::ser::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl From<std::io::Error> for TechError {
    fn from(e: std::io::Error) -> Self {
        Self::Boxed(Box::new(e))
    }
}
impl<T: std::error::Error + Send + Sync + 'static> From<Box<T>> for TechError {
    fn from(e: Box<T>) -> Self {
        Self::Boxed(e)
    }
}
