//! Arrays whose element type is only known at run time.
//!
//! An [`Array<P>`] of some [`Primitive`] `P` can be normalised into a
//! [`UniformArray`], whose elements are all [`Boxed`] and whose element type
//! is recorded as a [`Kind`]. Arrays of different primitive types can then be
//! handled by the same code. Since the element type is no longer checked by
//! the compiler, [`UniformArray`] checks it instead, and reports
//! [`Error::TypeMismatch`] when elements of different [`Kind`]s meet.

use std::any::{Any};
use std::fmt::{self, Display, Formatter};

use log::{debug, trace};

use super::{Array, Error, Result, Scalar};

/// The run-time identity of a [`Primitive`] type.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Text,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Bool => "bool",
            Kind::Char => "char",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::I128 => "i128",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::U128 => "u128",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Text => "text",
        })
    }
}

// ----------------------------------------------------------------------------

/// A value of any [`Primitive`] type.
#[derive(Debug, Clone, PartialEq)]
pub enum Boxed {
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    F32(f32),
    F64(f64),
    Text(String),
}

/// Evaluates `$e` with `$x` bound to the contents of `$boxed`.
macro_rules! with_boxed {
    ($boxed:expr, $x:ident => $e:expr) => {
        match $boxed {
            Boxed::Bool($x) => $e,
            Boxed::Char($x) => $e,
            Boxed::I8($x) => $e,
            Boxed::I16($x) => $e,
            Boxed::I32($x) => $e,
            Boxed::I64($x) => $e,
            Boxed::I128($x) => $e,
            Boxed::Isize($x) => $e,
            Boxed::U8($x) => $e,
            Boxed::U16($x) => $e,
            Boxed::U32($x) => $e,
            Boxed::U64($x) => $e,
            Boxed::U128($x) => $e,
            Boxed::Usize($x) => $e,
            Boxed::F32($x) => $e,
            Boxed::F64($x) => $e,
            Boxed::Text($x) => $e,
        }
    };
}

impl Boxed {
    /// The [`Kind`] of the contents.
    pub fn kind(&self) -> Kind {
        fn kind_of<P: Primitive>(_: &P) -> Kind { P::KIND }
        with_boxed!(self, x => kind_of(x))
    }
}

impl Scalar for Boxed {
    fn write_scalar(&self, f: &mut Formatter<'_>) -> fmt::Result {
        with_boxed!(self, x => x.write_scalar(f))
    }
}

// ----------------------------------------------------------------------------

/// Implemented by the [`Scalar`] types that can be [`Boxed`].
pub trait Primitive: Scalar + Into<Boxed> + 'static {
    const KIND: Kind;

    /// Returns the contents of `boxed` if it is of kind [`Self::KIND`].
    fn unbox(boxed: Boxed) -> Option<Self>;
}

macro_rules! impl_primitive {
    ($($t:ty => $kind:ident),*) => {$(
        impl Primitive for $t {
            const KIND: Kind = Kind::$kind;
            fn unbox(boxed: Boxed) -> Option<Self> {
                match boxed { Boxed::$kind(x) => Some(x), _ => None }
            }
        }

        impl From<$t> for Boxed {
            fn from(x: $t) -> Self { Boxed::$kind(x) }
        }
    )*};
}

impl_primitive!(bool => Bool, char => Char);
impl_primitive!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => Isize);
impl_primitive!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128, usize => Usize);
impl_primitive!(f32 => F32, f64 => F64, String => Text);

// ----------------------------------------------------------------------------

/// An [`Array`] of [`Boxed`] values, all of the same [`Kind`].
///
/// ```
/// use arrayplus::{Array, Boxed, Kind, UniformArray};
/// let u = UniformArray::from_primitives(Array::new([1u8, 2, 3]));
/// assert_eq!(u.kind(), Kind::U8);
/// assert_eq!(u.to_string(), "{1, 2, 3}");
/// assert!(u.append(Boxed::U8(4)).is_ok());
/// assert!(u.append(Boxed::Bool(true)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UniformArray {
    kind: Kind,
    items: Array<Boxed>,
}

impl UniformArray {
    /// Constructs an empty `UniformArray` of kind `kind`.
    pub fn empty(kind: Kind) -> Self {
        Self {kind, items: Array::default()}
    }

    /// Boxes every element of `array`, preserving order and length.
    pub fn from_primitives<P: Primitive>(array: Array<P>) -> Self {
        Self {kind: P::KIND, items: array.into_iter().map(Into::<Boxed>::into).collect()}
    }

    /// Adopts `array` without copying it.
    ///
    /// Fails with [`Error::InvalidArgument`] if `array` is empty, because
    /// then its [`Kind`] cannot be inferred, and with [`Error::TypeMismatch`]
    /// if its elements are not all of the same `Kind`.
    pub fn from_boxed(array: Array<Boxed>) -> Result<Self> {
        let kind = match array.iter().next() {
            Some(first) => first.kind(),
            None => return Err(Error::InvalidArgument("cannot infer the element type of an empty array")),
        };
        let uniform = Self {kind, items: array};
        for item in uniform.items.iter() { uniform.check(item)?; }
        Ok(uniform)
    }

    pub fn kind(&self) -> Kind { self.kind }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn as_array(&self) -> &Array<Boxed> { &self.items }

    pub fn into_array(self) -> Array<Boxed> { self.items }

    /// Converts `self` back to an `Array<P>`.
    ///
    /// Fails with [`Error::TypeMismatch`] unless `P::KIND` is `self.kind()`.
    ///
    /// ```
    /// use arrayplus::{Array, UniformArray};
    /// let u = UniformArray::from_primitives(Array::new([0.5f64, 1.5]));
    /// assert_eq!(u.unbox::<f64>().unwrap().as_ref(), [0.5, 1.5]);
    /// assert!(u.unbox::<f32>().is_err());
    /// ```
    pub fn unbox<P: Primitive>(&self) -> Result<Array<P>> {
        if P::KIND != self.kind {
            return Err(Error::TypeMismatch {expected: P::KIND, found: self.kind});
        }
        Ok(self.items.iter().cloned().filter_map(P::unbox).collect())
    }

    /// Fails unless `value` is of kind `self.kind()`.
    fn check(&self, value: &Boxed) -> Result<()> {
        let found = value.kind();
        if found == self.kind { return Ok(()); }
        debug!("Rejected a `{}` value for an array of `{}`", found, self.kind);
        Err(Error::TypeMismatch {expected: self.kind, found})
    }

    fn with_items(&self, items: Array<Boxed>) -> Self {
        Self {kind: self.kind, items}
    }

    /// See [`Array::insert()`].
    pub fn insert(&self, index: usize, value: Boxed) -> Result<Self> {
        self.check(&value)?;
        Ok(self.with_items(self.items.insert(index, value)?))
    }

    /// See [`Array::append()`].
    pub fn append(&self, value: Boxed) -> Result<Self> {
        self.check(&value)?;
        Ok(self.with_items(self.items.append(value)))
    }

    /// See [`Array::set()`].
    pub fn set(&self, index: usize, value: Boxed) -> Result<Self> {
        self.check(&value)?;
        Ok(self.with_items(self.items.set(index, value)?))
    }

    /// See [`Array::remove_at()`].
    pub fn remove_at(&self, index: usize) -> Result<Self> {
        Ok(self.with_items(self.items.remove_at(index)?))
    }

    /// See [`Array::reverse()`].
    pub fn reverse(&self) -> Self { self.with_items(self.items.reverse()) }

    /// Joins `arrays` end to end, in order.
    ///
    /// Fails with [`Error::InvalidArgument`] if `arrays` is empty and with
    /// [`Error::TypeMismatch`] if they are not all of the same [`Kind`].
    ///
    /// ```
    /// use arrayplus::{Array, Error, Kind, UniformArray};
    /// let a = UniformArray::from_primitives(Array::new([1i32, 2]));
    /// let b = UniformArray::from_primitives(Array::new([3i32]));
    /// let c = UniformArray::from_primitives(Array::new(['x']));
    /// assert_eq!(UniformArray::concatenate(&[a.clone(), b]).unwrap().len(), 3);
    /// assert_eq!(
    ///     UniformArray::concatenate(&[a, c]),
    ///     Err(Error::TypeMismatch {expected: Kind::I32, found: Kind::Char}),
    /// );
    /// ```
    pub fn concatenate(arrays: &[UniformArray]) -> Result<Self> {
        let first = arrays.first().ok_or(
            Error::InvalidArgument("cannot infer the element type of zero arrays"),
        )?;
        for a in arrays {
            if a.kind != first.kind {
                debug!("Rejected concatenation of `{}` with `{}`", first.kind, a.kind);
                return Err(Error::TypeMismatch {expected: first.kind, found: a.kind});
            }
        }
        let items = Array::concatenate(arrays.iter().map(|a| &a.items))?;
        Ok(first.with_items(items))
    }
}

impl Display for UniformArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { Display::fmt(&self.items, f) }
}

impl<P: Primitive> From<Array<P>> for UniformArray {
    fn from(array: Array<P>) -> Self { Self::from_primitives(array) }
}

// ----------------------------------------------------------------------------

/// Implemented by every array type that [`to_uniform()`] accepts.
pub trait AnyArray: Any {
    /// Forgets that `self` is an array.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: 'static> AnyArray for Array<T> {
    fn into_any(self: Box<Self>) -> Box<dyn Any> { self }
}

impl<T: 'static> AnyArray for Vec<T> {
    fn into_any(self: Box<Self>) -> Box<dyn Any> { self }
}

impl AnyArray for UniformArray {
    fn into_any(self: Box<Self>) -> Box<dyn Any> { self }
}

/// The return type of [`to_uniform()`].
#[derive(Debug)]
pub enum Uniform {
    /// The elements were primitives, and are now [`Boxed`]. Also used for
    /// arrays that were already uniform.
    Boxed(UniformArray),

    /// The elements were already objects, e.g. arrays, or [`Boxed`] values
    /// whose [`Kind`] could not be settled. The array is returned as it was.
    Objects(Box<dyn Any>),
}

impl Uniform {
    pub fn into_boxed(self) -> Option<UniformArray> {
        match self { Uniform::Boxed(uniform) => Some(uniform), Uniform::Objects(_) => None }
    }

    pub fn into_objects(self) -> Option<Box<dyn Any>> {
        match self { Uniform::Boxed(_) => None, Uniform::Objects(value) => Some(value) }
    }
}

// ----------------------------------------------------------------------------

type Boxing = fn(Box<dyn Any>) -> std::result::Result<Uniform, Box<dyn Any>>;

fn boxing<P: Primitive>(value: Box<dyn Any>) -> std::result::Result<Uniform, Box<dyn Any>> {
    let value = match value.downcast::<Array<P>>() {
        Ok(array) => return Ok(Uniform::Boxed(UniformArray::from_primitives(*array))),
        Err(value) => value,
    };
    value.downcast::<Vec<P>>().map(|v| Uniform::Boxed(UniformArray::from_primitives(Array::from_vec(*v))))
}

fn boxing_str(value: Box<dyn Any>) -> std::result::Result<Uniform, Box<dyn Any>> {
    fn text(items: &[&str]) -> Uniform {
        let items = items.iter().map(|s| Boxed::Text(s.to_string())).collect();
        Uniform::Boxed(UniformArray {kind: Kind::Text, items})
    }
    let value = match value.downcast::<Array<&'static str>>() {
        Ok(array) => return Ok(text((*array).as_ref())),
        Err(value) => value,
    };
    value.downcast::<Vec<&'static str>>().map(|v| text(&v))
}

/// Adopts an array of [`Boxed`] values if they settle on one [`Kind`], and
/// otherwise passes it through.
fn adopting(value: Box<dyn Any>) -> std::result::Result<Uniform, Box<dyn Any>> {
    fn common_kind(items: &[Boxed]) -> Option<Kind> {
        let kind = items.first()?.kind();
        items.iter().all(|item| item.kind() == kind).then_some(kind)
    }
    let kind = if let Some(array) = value.downcast_ref::<Array<Boxed>>() {
        common_kind(array.as_ref())
    } else if let Some(v) = value.downcast_ref::<Vec<Boxed>>() {
        common_kind(v)
    } else {
        return Err(value);
    };
    let Some(kind) = kind else {
        trace!("Boxed values of no single kind; passing through");
        return Ok(Uniform::Objects(value));
    };
    let value = match value.downcast::<Array<Boxed>>() {
        Ok(items) => return Ok(Uniform::Boxed(UniformArray {kind, items: *items})),
        Err(value) => value,
    };
    value.downcast::<Vec<Boxed>>().map(|v| Uniform::Boxed(UniformArray {kind, items: Array::from_vec(*v)}))
}

fn passing(value: Box<dyn Any>) -> std::result::Result<Uniform, Box<dyn Any>> {
    let uniform = value.downcast::<UniformArray>()?;
    trace!("Already uniform; passing through");
    Ok(Uniform::Boxed(*uniform))
}

const BOXINGS: &[Boxing] = &[
    passing, adopting,
    boxing::<bool>, boxing::<char>,
    boxing::<i8>, boxing::<i16>, boxing::<i32>, boxing::<i64>, boxing::<i128>, boxing::<isize>,
    boxing::<u8>, boxing::<u16>, boxing::<u32>, boxing::<u64>, boxing::<u128>, boxing::<usize>,
    boxing::<f32>, boxing::<f64>, boxing::<String>, boxing_str,
];

/// Tries each of [`BOXINGS`] in turn, returning `value` if none applies.
fn normalise(mut value: Box<dyn Any>) -> std::result::Result<Uniform, Box<dyn Any>> {
    for attempt in BOXINGS {
        match attempt(value) {
            Ok(uniform) => return Ok(uniform),
            Err(v) => { value = v; },
        }
    }
    Err(value)
}

/// Normalises an array of any [`Primitive`] type into a [`UniformArray`].
///
/// Elements of an `Array<P>` or `Vec<P>` are boxed in order, where `P` is a
/// `Primitive` or `&'static str`. A `UniformArray` is returned as it is, and
/// an array of `Boxed` values of one [`Kind`] is adopted without copying.
/// Any other array already holds objects, and is returned unchanged as
/// [`Uniform::Objects`].
///
/// ```
/// use arrayplus::{array, to_uniform, Array, Kind};
/// let u = to_uniform(Box::new(vec![true, false])).into_boxed().unwrap();
/// assert_eq!(u.kind(), Kind::Bool);
/// let v = to_uniform(Box::new(u.clone())).into_boxed().unwrap();
/// assert_eq!(u, v);
/// let nested: Array<Array<u8>> = array![array![1], array![2]];
/// let objects = to_uniform(Box::new(nested.clone())).into_objects().unwrap();
/// assert_eq!(objects.downcast_ref::<Array<Array<u8>>>(), Some(&nested));
/// ```
pub fn to_uniform(value: Box<dyn AnyArray>) -> Uniform {
    normalise(value.into_any()).unwrap_or_else(Uniform::Objects)
}

/// Like [`to_uniform()`], but for a value that might not be an array.
///
/// Only arrays that `to_uniform()` would box or adopt can be recognised in
/// a `dyn Any`, as can any array already wrapped as a `Box<dyn AnyArray>`.
/// Anything else fails with [`Error::InvalidArgument`].
///
/// ```
/// use arrayplus::{to_uniform_any, AnyArray, Array, Error};
/// assert!(to_uniform_any(Box::new([1.5f32].to_vec())).is_ok());
/// let wrapped: Box<dyn AnyArray> = Box::new(Array::new([Array::new([1])]));
/// assert!(to_uniform_any(Box::new(wrapped)).is_ok());
/// assert_eq!(to_uniform_any(Box::new(42)).unwrap_err(), Error::InvalidArgument("not an array"));
/// ```
pub fn to_uniform_any(value: Box<dyn Any>) -> Result<Uniform> {
    let value = match value.downcast::<Box<dyn AnyArray>>() {
        Ok(array) => return Ok(to_uniform(*array)),
        Err(value) => value,
    };
    normalise(value).map_err(|_| {
        debug!("Rejected a value that is not an array");
        Error::InvalidArgument("not an array")
    })
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array;

    fn boxed(value: Box<dyn AnyArray>) -> UniformArray {
        match to_uniform(value) {
            Uniform::Boxed(uniform) => uniform,
            Uniform::Objects(_) => panic!("expected the elements to be boxed"),
        }
    }

    #[test]
    fn kinds() {
        assert_eq!(Boxed::from(3u64).kind(), Kind::U64);
        assert_eq!(Boxed::from(String::from("s")).kind(), Kind::Text);
        assert_eq!(Kind::Isize.to_string(), "isize");
    }

    #[test]
    fn boxing_preserves_order() {
        let u = boxed(Box::new(array![3i16, 1, 2]));
        assert_eq!(u.kind(), Kind::I16);
        assert_eq!(u.as_array(), &array![Boxed::I16(3), Boxed::I16(1), Boxed::I16(2)]);
    }

    #[test]
    fn empty_primitive_array() {
        let u = boxed(Box::new(Array::<char>::default()));
        assert_eq!(u.kind(), Kind::Char);
        assert!(u.is_empty());
        assert_eq!(u.to_string(), "{}");
    }

    #[test]
    fn text_is_quoted() {
        let u = boxed(Box::new(vec![String::from("a"), String::from("b")]));
        assert_eq!(u.to_string(), "{\"a\", \"b\"}");
    }

    #[test]
    fn str_arrays_are_text() {
        let u = boxed(Box::new(array!["a", "b"]));
        assert_eq!(u.kind(), Kind::Text);
        assert_eq!(u.unbox::<String>().unwrap(), array![String::from("a"), String::from("b")]);
        assert_eq!(boxed(Box::new(vec!["c"])).len(), 1);
    }

    #[test]
    fn pass_through() {
        let items: Array<Boxed> = array![Boxed::F32(1.0), Boxed::F32(2.0)];
        let address = items.as_ref().as_ptr();
        let u = boxed(Box::new(items));
        assert_eq!(u.kind(), Kind::F32);
        assert_eq!(u.as_array().as_ref().as_ptr(), address);
        let address = u.as_array().as_ref().as_ptr();
        let v = boxed(Box::new(u));
        assert_eq!(v.as_array().as_ref().as_ptr(), address);
    }

    #[test]
    fn nested_arrays_pass_through() {
        let nested: Array<Array<u8>> = array![array![1], array![2]];
        let address = nested.as_ref().as_ptr();
        let objects = to_uniform(Box::new(nested)).into_objects().unwrap();
        let nested = objects.downcast::<Array<Array<u8>>>().unwrap();
        assert_eq!((*nested).as_ref().as_ptr(), address);
        assert_eq!(*nested, array![array![1], array![2]]);
    }

    #[test]
    fn unsettled_boxed_arrays_pass_through() {
        let empty = to_uniform(Box::new(Array::<Boxed>::default())).into_objects().unwrap();
        assert!(empty.downcast_ref::<Array<Boxed>>().unwrap().is_empty());
        let mixed: Array<Boxed> = array![Boxed::U8(1), Boxed::I8(1)];
        let objects = to_uniform(Box::new(mixed.clone())).into_objects().unwrap();
        assert_eq!(objects.downcast_ref::<Array<Boxed>>(), Some(&mixed));
    }

    #[test]
    fn not_an_array() {
        let not_an_array = Error::InvalidArgument("not an array");
        assert_eq!(to_uniform_any(Box::new(7u8)).unwrap_err(), not_an_array);
        assert_eq!(to_uniform_any(Box::new("text")).unwrap_err(), not_an_array);
        let u = to_uniform_any(Box::new(array![1u32])).unwrap().into_boxed().unwrap();
        assert_eq!(u.kind(), Kind::U32);
        let wrapped: Box<dyn AnyArray> = Box::new(array![array!['x']]);
        assert!(to_uniform_any(Box::new(wrapped)).unwrap().into_objects().is_some());
    }

    #[test]
    fn from_boxed() {
        assert_eq!(
            UniformArray::from_boxed(Array::default()),
            Err(Error::InvalidArgument("cannot infer the element type of an empty array")),
        );
        assert_eq!(
            UniformArray::from_boxed(array![Boxed::U8(1), Boxed::I8(1)]),
            Err(Error::TypeMismatch {expected: Kind::U8, found: Kind::I8}),
        );
    }

    #[test]
    fn edits_check_kind() {
        let u = UniformArray::from_primitives(array![10i32, 20, 30]);
        let mismatch = Err(Error::TypeMismatch {expected: Kind::I32, found: Kind::I64});
        assert_eq!(u.insert(1, Boxed::I64(99)), mismatch);
        assert_eq!(u.set(0, Boxed::I64(99)), mismatch);
        assert_eq!(u.insert(1, Boxed::I32(99)).unwrap().unbox::<i32>().unwrap(), array![10, 99, 20, 30]);
        assert_eq!(u.insert(5, Boxed::I32(0)), Err(Error::IndexOutOfBounds {index: 5, length: 3}));
        assert_eq!(u.remove_at(0).unwrap().reverse().unbox::<i32>().unwrap(), array![30, 20]);
    }

    #[test]
    fn concatenate_empty() {
        assert_eq!(
            UniformArray::concatenate(&[]),
            Err(Error::InvalidArgument("cannot infer the element type of zero arrays")),
        );
        let e = UniformArray::empty(Kind::Text);
        assert_eq!(UniformArray::concatenate(&[e.clone(), e]).unwrap().kind(), Kind::Text);
    }
}
