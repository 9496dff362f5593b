mod args;
mod error;

pub use args::*;
pub use error::*;

/// Convenience definition for the boxed error type.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

pub fn boxed_err<T, E: Into<BoxedError>>(err: E) -> Result<T, BoxedError> {
    Err(err.into())
}
