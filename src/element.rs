//! Discovering the nesting structure of an [`Array`] from its type.
//!
//! Every element type is either a [`Scalar`], which is a leaf of the nesting
//! structure, or an [`Array`] of some other element type. Both implement
//! [`Element`], which knows its rank at compile time. Recursive algorithms
//! therefore decide whether to descend by looking at [`Element::RANK`], and
//! never by inspecting an element. In particular they work on empty arrays.
//!
//! [`Array`]: super::Array

use std::fmt::{self, Formatter};

use super::{Array, Punctuation};

/// Implemented by element types that have no array-like structure.
///
/// A type that implements `Scalar` automatically implements [`Element`],
/// as do [`Array`]s of it, [`Array`]s of those, and so on. You are encouraged
/// to implement `Scalar` for your own types.
///
/// [`Array`]: super::Array
pub trait Scalar: Clone + PartialEq {
    /// Write `self` as it appears inside a formatted [`Array`].
    ///
    /// Text should be quoted.
    ///
    /// [`Array`]: super::Array
    fn write_scalar(&self, f: &mut Formatter<'_>) -> fmt::Result;
}

macro_rules! impl_scalar_display {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            fn write_scalar(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "{}", self) }
        }
    )*};
}

impl_scalar_display!(bool, char);
impl_scalar_display!(i8, i16, i32, i64, i128, isize);
impl_scalar_display!(u8, u16, u32, u64, u128, usize);

/// Writes a finite float with a fractional part, e.g. `1.0` rather than `1`
/// and `1.0e20` rather than `1e20`. `text` is the `Debug` form.
fn write_float(f: &mut Formatter<'_>, finite: bool, text: &str) -> fmt::Result {
    if !finite || text.contains('.') { return f.write_str(text); }
    match text.find('e') {
        Some(e) => write!(f, "{}.0{}", &text[..e], &text[e..]),
        None => write!(f, "{}.0", text),
    }
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            fn write_scalar(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write_float(f, self.is_finite(), &format!("{:?}", self))
            }
        }
    )*};
}

impl_scalar_float!(f32, f64);

impl Scalar for String {
    fn write_scalar(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "\"{}\"", self) }
}

impl<'a> Scalar for &'a str {
    fn write_scalar(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "\"{}\"", self) }
}

// ----------------------------------------------------------------------------

/// Implemented by every type that can be stored in an [`Array`].
///
/// You probably shouldn't write any implementations of this trait. Implement
/// [`Scalar`] instead, and take advantage of the blanket implementations.
///
/// [`Array`]: super::Array
pub trait Element: Clone {
    /// The [`Scalar`] type at the bottom of the nesting structure.
    type Leaf: Scalar;

    /// The number of levels of [`Array`] above the [`Leaf`]s.
    ///
    /// This is `0` for a `Scalar`, `1` for `Array<Scalar>` and so on.
    ///
    /// [`Array`]: super::Array
    /// [`Leaf`]: Self::Leaf
    const RANK: usize;

    /// The number of [`Leaf`]s in `self`.
    ///
    /// [`Leaf`]: Self::Leaf
    fn leaf_count(&self) -> usize;

    /// The number of [`Leaf`]s in `self` that equal `value`.
    ///
    /// [`Leaf`]: Self::Leaf
    fn occurrences(&self, value: &Self::Leaf) -> usize;

    /// Write `self`, with every level of nesting delimited by `punctuation`.
    fn write_nested(&self, f: &mut Formatter<'_>, punctuation: &Punctuation) -> fmt::Result;
}

impl<T: Scalar> Element for T {
    type Leaf = T;

    const RANK: usize = 0;

    fn leaf_count(&self) -> usize { 1 }

    fn occurrences(&self, value: &Self::Leaf) -> usize { (self == value) as usize }

    fn write_nested(&self, f: &mut Formatter<'_>, _: &Punctuation) -> fmt::Result {
        self.write_scalar(f)
    }
}

impl<T: Element> Element for Array<T> {
    type Leaf = T::Leaf;

    const RANK: usize = T::RANK + 1;

    fn leaf_count(&self) -> usize {
        if T::RANK == 0 {
            self.len()
        } else {
            self.iter().map(T::leaf_count).sum()
        }
    }

    fn occurrences(&self, value: &Self::Leaf) -> usize {
        self.iter().map(|t| t.occurrences(value)).sum()
    }

    fn write_nested(&self, f: &mut Formatter<'_>, punctuation: &Punctuation) -> fmt::Result {
        f.write_str(&punctuation.open)?;
        for (i, t) in self.iter().enumerate() {
            if i > 0 { f.write_str(&punctuation.separator)?; }
            t.write_nested(f, punctuation)?;
        }
        f.write_str(&punctuation.close)
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;

    #[test]
    fn floats() {
        assert_eq!(array![1e20f64, 0.1, 3.0, 1.5e-7].to_string(), "{1.0e20, 0.1, 3.0, 1.5e-7}");
        assert_eq!(array![1e-7f32, -2.0].to_string(), "{1.0e-7, -2.0}");
        assert_eq!(array![f64::NAN, f64::INFINITY].to_string(), "{NaN, inf}");
    }

    #[test]
    fn rank() {
        assert_eq!(<u8 as Element>::RANK, 0);
        assert_eq!(<Array<u8> as Element>::RANK, 1);
        assert_eq!(<Array<Array<Array<&str>>> as Element>::RANK, 3);
    }

    #[test]
    fn leaf_count() {
        let a: Array<Array<Array<i32>>> = array![
            array![array![1, 2], array![]],
            array![],
            array![array![3], array![4, 5, 6]],
        ];
        assert_eq!(a.leaf_count(), 6);
        assert_eq!(7i32.leaf_count(), 1);
    }

    #[test]
    fn occurrences() {
        let a: Array<Array<Array<char>>> = array![
            array![array!['a', 'b'], array!['a']],
            array![array!['c', 'a']],
        ];
        assert_eq!(a.occurrences(&'a'), 3);
        assert_eq!(a.occurrences(&'z'), 0);
    }

    #[test]
    fn empty_nested() {
        let a: Array<Array<Array<u8>>> = array![];
        assert_eq!(a.leaf_count(), 0);
        assert_eq!(a.occurrences(&0), 0);
    }
}
