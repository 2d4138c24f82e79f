//! A pure-Rust library for editing, searching and formatting arrays without
//! index bookkeeping, including arrays of arrays to any depth.
//!
//! [`Array<T>`] is a fixed-length array of `T`, stored in a [`Box<[T]>`].
//! Its methods never modify it; instead, methods such as [`Array::insert()`],
//! [`Array::remove_at()`] and [`Array::reverse()`] return a new `Array<T>`.
//! The element type of the result is always the element type of the input,
//! because it is the same type parameter `T`.
//!
//! `T` may itself be an `Array`. The depth of nesting (the rank) is a
//! property of the type, computed by trait [`Element`] from the blanket
//! implementations for [`Scalar`] leaf types and for `Array<T>`. Methods that
//! walk the whole nesting structure, such as [`Array::total_element_count()`],
//! [`Array::occurrences_of()`] and [`Array::format_nested()`], therefore
//! behave correctly on empty arrays at any level.
//!
//! ```
//! use arrayplus::{array, Array, Punctuation};
//! let a: Array<Array<i32>> = array![array![1, 2], array![3, 4, 5]];
//! assert_eq!(a.total_element_count(), 5);
//! assert_eq!(a.to_string(), "{{1, 2}, {3, 4, 5}}");
//! let b = a.insert(1, array![]).unwrap();
//! assert_eq!(b.format_nested(&Punctuation::new("[", "]")), "[[1, 2], [], [3, 4, 5]]");
//! ```
//!
//! When the element type is only known at run time, [`to_uniform()`] boxes
//! an array of any [`Primitive`] type into a [`UniformArray`], which checks
//! element types as it goes. Arrays that already hold objects are returned
//! unchanged.

mod error;
pub use error::{Error, Result};

pub mod element;
pub use element::{Scalar, Element};

mod format;
pub use format::{Punctuation, Nested};

mod array;
pub use array::{Array};

pub mod uniform;
pub use uniform::{Kind, Boxed, Primitive, UniformArray, AnyArray, Uniform, to_uniform, to_uniform_any};
