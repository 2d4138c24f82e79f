use thiserror::Error;

use super::{Kind};

/// Returned when an operation on an [`Array`] or [`UniformArray`] cannot be
/// carried out.
///
/// No operation partially applies an edit before failing: all checks happen
/// before anything is allocated.
///
/// [`Array`]: super::Array
/// [`UniformArray`]: super::UniformArray
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Error {
    /// An index argument was outside the range accepted by the operation.
    #[error("Index {index} is out of bounds for an array of length {length}.")]
    IndexOutOfBounds { index: usize, length: usize },

    /// The call was malformed, e.g. an empty sequence of arrays was given
    /// where an element type must be inferred, or a non-array was given
    /// where an array was required.
    #[error("Invalid argument: {0}.")]
    InvalidArgument(&'static str),

    /// Elements of different types were combined in one array.
    #[error("Expected elements of type `{expected}` but found `{found}`.")]
    TypeMismatch { expected: Kind, found: Kind },
}

/// The `Result` type of this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            Error::IndexOutOfBounds {index: 4, length: 3}.to_string(),
            "Index 4 is out of bounds for an array of length 3.",
        );
        assert_eq!(
            Error::InvalidArgument("not an array").to_string(),
            "Invalid argument: not an array.",
        );
        assert_eq!(
            Error::TypeMismatch {expected: Kind::I32, found: Kind::Text}.to_string(),
            "Expected elements of type `i32` but found `text`.",
        );
    }
}
