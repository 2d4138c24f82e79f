use std::fmt::{self, Display, Formatter};

use super::{Array, Element};

/// The text placed around and between the elements of a formatted [`Array`].
///
/// Every level of nesting is delimited by its own `open` and `close`.
///
/// ```
/// use arrayplus::{array, Array, Punctuation};
/// let a: Array<Array<i32>> = array![array![1, 2], array![3]];
/// let p = Punctuation::new("[", "]").separator(";");
/// assert_eq!(a.format_nested(&p), "[[1;2];[3]]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Punctuation {
    /// Written before the first element of each array.
    pub open: String,

    /// Written after the last element of each array.
    pub close: String,

    /// Written between adjacent elements of each array.
    pub separator: String,
}

impl Punctuation {
    pub const OPEN: &'static str = "{";
    pub const CLOSE: &'static str = "}";
    pub const SEPARATOR: &'static str = ", ";

    /// Constructs a `Punctuation` with the default separator.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {open: open.into(), close: close.into(), separator: Self::SEPARATOR.into()}
    }

    /// Replaces the separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for Punctuation {
    fn default() -> Self { Self::new(Self::OPEN, Self::CLOSE) }
}

// ----------------------------------------------------------------------------

/// The return type of [`Array::nested()`].
#[derive(Debug, Copy, Clone)]
pub struct Nested<'a, T>(&'a Array<T>, &'a Punctuation);

impl<'a, T: Element> Nested<'a, T> {
    pub(crate) fn new(array: &'a Array<T>, punctuation: &'a Punctuation) -> Self {
        Nested(array, punctuation)
    }
}

impl<'a, T: Element> Display for Nested<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.write_nested(f, self.1)
    }
}

/// Formats with the default [`Punctuation`].
impl<T: Element> Display for Array<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_nested(f, &Punctuation::default())
    }
}
