use std::borrow::{Cow};

use log::{debug, trace};

use super::{Element, Error, Nested, Punctuation, Result};

/// A dense, fixed-length array of `T`s.
///
/// `T` may itself be an `Array`, in which case `self` is a nested array. The
/// rank of the nesting is a property of the type; see [`Element`].
///
/// An `Array` is never modified by the methods of this crate. Every method
/// that "changes" an array returns a new one, with the same element type.
///
/// Two `Array`s are equal if they have the same length and their elements
/// are pairwise equal according to `T`'s own `PartialEq`. Nested arrays
/// therefore compare by content, level by level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Array<T> {
    items: Box<[T]>,
}

/// Constructs an [`Array`] from a list of elements.
///
/// ```
/// use arrayplus::{array, Array};
/// let a: Array<Array<i32>> = array![array![1, 2], array![3, 4, 5]];
/// assert_eq!(a.len(), 2);
/// ```
#[macro_export]
macro_rules! array {
    ($($t:expr),* $(,)?) => { $crate::Array::new(::std::vec![$($t),*]) };
}

impl<T> Array<T> {
    /// Constructs an `Array` given its elements.
    ///
    /// ```
    /// use arrayplus::{Array};
    /// let a = Array::new([10, 20, 30]);
    /// assert_eq!(a[1], 20);
    /// ```
    pub fn new(items: impl Into<Box<[T]>>) -> Self {
        Self {items: items.into()}
    }

    /// Constructs an `Array` of length `len` from a function.
    ///
    /// ```
    /// use arrayplus::{Array};
    /// let a = Array::from_fn(4, |i| i * i);
    /// assert_eq!(a.as_ref(), [0, 1, 4, 9]);
    /// ```
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        (0..len).map(f).collect()
    }

    /// Constructs an `Array` that owns the storage of `items`.
    pub fn from_vec(items: Vec<T>) -> Self { Self::new(items) }

    /// Returns the raw array elements.
    pub fn into_raw(self) -> Box<[T]> { self.items }

    /// Returns the elements as a `Vec`, without copying them.
    pub fn into_vec(self) -> Vec<T> { self.items.into_vec() }

    /// The number of elements.
    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, T> { self.items.iter() }

    /// Creates an `Array` that applies `f` to the elements of `self`.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Array<U> {
        self.iter().map(f).collect()
    }

    /// Converts every element to a `U` that can losslessly represent it.
    ///
    /// ```
    /// use arrayplus::{Array};
    /// let a = Array::new([1i32, -2, 3]);
    /// let b: Array<f64> = a.convert();
    /// assert_eq!(b.as_ref(), [1.0, -2.0, 3.0]);
    /// ```
    pub fn convert<U: From<T>>(&self) -> Array<U> where T: Clone {
        self.map(|t| U::from(t.clone()))
    }

    /// Fails unless `index < limit`.
    fn check_index(&self, index: usize, limit: usize) -> Result<()> {
        if index < limit { return Ok(()); }
        debug!("Rejected index {} for an array of length {}", index, self.len());
        Err(Error::IndexOutOfBounds {index, length: self.len()})
    }
}

impl<T: Clone> Array<T> {
    /// Returns a copy of the elements as a `Vec`.
    pub fn to_vec(&self) -> Vec<T> { self.items.to_vec() }

    /// Returns a copy of `self` with the element at `index` omitted.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] unless `index < self.len()`.
    ///
    /// ```
    /// use arrayplus::{Array, Error};
    /// let a = Array::new(['a', 'b', 'c']);
    /// assert_eq!(a.remove_at(0).unwrap().as_ref(), ['b', 'c']);
    /// assert_eq!(a.remove_at(3), Err(Error::IndexOutOfBounds {index: 3, length: 3}));
    /// ```
    pub fn remove_at(&self, index: usize) -> Result<Self> {
        self.check_index(index, self.len())?;
        let mut items = Vec::with_capacity(self.len() - 1);
        items.extend_from_slice(&self.items[..index]);
        items.extend_from_slice(&self.items[index + 1..]);
        Ok(Self::from_vec(items))
    }

    /// Returns a copy of `self` with `value` inserted at `index`.
    ///
    /// `index` may equal `self.len()`, in which case `value` is appended.
    /// Otherwise, fails with [`Error::IndexOutOfBounds`] unless
    /// `index < self.len()`.
    ///
    /// ```
    /// use arrayplus::{Array};
    /// let a = Array::new([10, 20, 30]);
    /// assert_eq!(a.insert(1, 99).unwrap().as_ref(), [10, 99, 20, 30]);
    /// assert_eq!(a.insert(3, 99).unwrap(), a.append(99));
    /// assert!(a.insert(4, 99).is_err());
    /// ```
    pub fn insert(&self, index: usize, value: T) -> Result<Self> {
        self.check_index(index, self.len() + 1)?;
        let mut items = Vec::with_capacity(self.len() + 1);
        items.extend_from_slice(&self.items[..index]);
        items.push(value);
        items.extend_from_slice(&self.items[index..]);
        Ok(Self::from_vec(items))
    }

    /// Returns a copy of `self` with `value` added at the end.
    pub fn append(&self, value: T) -> Self {
        let mut items = Vec::with_capacity(self.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(value);
        Self::from_vec(items)
    }

    /// Returns a copy of `self` with the element at `index` replaced by
    /// `value`.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] unless `index < self.len()`.
    pub fn set(&self, index: usize, value: T) -> Result<Self> {
        self.check_index(index, self.len())?;
        let mut items = self.to_vec();
        items[index] = value;
        Ok(Self::from_vec(items))
    }

    /// Returns a copy of `self` with the elements in the opposite order.
    ///
    /// ```
    /// use arrayplus::{Array};
    /// let a = Array::new(["x", "y", "z"]);
    /// assert_eq!(a.reverse().as_ref(), ["z", "y", "x"]);
    /// ```
    pub fn reverse(&self) -> Self {
        self.iter().rev().cloned().collect()
    }

    /// Joins `arrays` end to end, in order.
    ///
    /// Fails with [`Error::InvalidArgument`] if `arrays` is empty. Arrays of
    /// different element types cannot be passed at all.
    ///
    /// ```
    /// use arrayplus::{Array};
    /// let a = Array::new([1, 2]);
    /// let b = Array::new([3]);
    /// let ab: Array<i32> = Array::concatenate([&a, &b, &a]).unwrap();
    /// assert_eq!(ab.as_ref(), [1, 2, 3, 1, 2]);
    /// ```
    pub fn concatenate<A: AsRef<[T]>>(arrays: impl IntoIterator<Item=A>) -> Result<Self> {
        let arrays: Vec<A> = arrays.into_iter().collect();
        if arrays.is_empty() {
            debug!("Rejected concatenation of zero arrays");
            return Err(Error::InvalidArgument("cannot concatenate an empty sequence of arrays"));
        }
        let length = arrays.iter().map(|a| a.as_ref().len()).sum();
        trace!("Concatenating {} arrays into {} elements", arrays.len(), length);
        let mut items = Vec::with_capacity(length);
        for a in &arrays { items.extend_from_slice(a.as_ref()); }
        Ok(Self::from_vec(items))
    }
}

impl<T: PartialEq> Array<T> {
    /// Returns the position of the first element equal to `value`.
    ///
    /// ```
    /// use arrayplus::{Array};
    /// let a = Array::new([5, 6, 5]);
    /// assert_eq!(a.index_of(&5), Some(0));
    /// assert_eq!(a.last_index_of(&5), Some(2));
    /// assert_eq!(a.index_of(&7), None);
    /// ```
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|t| t == value)
    }

    /// Returns the position of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize> {
        self.iter().rposition(|t| t == value)
    }
}

impl<T: Clone + PartialEq> Array<T> {
    /// Returns a copy of `self` without the first element equal to `value`.
    ///
    /// Only the top level of a nested array is searched. If there is no such
    /// element, `self` is returned unchanged, as [`Cow::Borrowed`].
    ///
    /// ```
    /// use std::borrow::{Cow};
    /// use arrayplus::{Array};
    /// let a = Array::new(["a", "b", "c", "b"]);
    /// assert_eq!(a.remove_value(&"b").to_vec(), ["a", "c", "b"]);
    /// assert!(matches!(a.remove_value(&"z"), Cow::Borrowed(_)));
    /// ```
    pub fn remove_value(&self, value: &T) -> Cow<'_, Self> {
        match self.index_of(value) {
            Some(index) => {
                let mut items = Vec::with_capacity(self.len() - 1);
                items.extend_from_slice(&self.items[..index]);
                items.extend_from_slice(&self.items[index + 1..]);
                Cow::Owned(Self::from_vec(items))
            },
            None => {
                trace!("Value absent; passing through {} elements", self.len());
                Cow::Borrowed(self)
            },
        }
    }
}

impl<T: Element> Array<T> {
    /// The number of levels of nesting, e.g. `2` for `Array<Array<f32>>`.
    pub fn rank(&self) -> usize { <Self as Element>::RANK }

    /// The number of leaf elements at any depth.
    ///
    /// ```
    /// use arrayplus::{array, Array};
    /// let a: Array<Array<i32>> = array![array![1, 2], array![3, 4, 5]];
    /// assert_eq!(a.total_element_count(), 5);
    /// let e: Array<Array<i32>> = array![];
    /// assert_eq!(e.total_element_count(), 0);
    /// ```
    pub fn total_element_count(&self) -> usize { self.leaf_count() }

    /// The number of leaf elements at any depth that equal `value`.
    ///
    /// ```
    /// use arrayplus::{array, Array};
    /// let a: Array<Array<i32>> = array![array![1, 2], array![2, 2, 5]];
    /// assert_eq!(a.occurrences_of(&2), 3);
    /// assert!(a.contains(&5));
    /// assert!(!a.contains(&9));
    /// ```
    pub fn occurrences_of(&self, value: &T::Leaf) -> usize { self.occurrences(value) }

    /// Whether any leaf element at any depth equals `value`.
    pub fn contains(&self, value: &T::Leaf) -> bool { self.occurrences_of(value) > 0 }

    /// Returns a [`Display`]able rendering of `self` using `punctuation`.
    ///
    /// [`Display`]: std::fmt::Display
    pub fn nested<'a>(&'a self, punctuation: &'a Punctuation) -> Nested<'a, T> {
        Nested::new(self, punctuation)
    }

    /// Renders `self` as text, delimiting every level of nesting with
    /// `punctuation`. Text leaves are quoted.
    ///
    /// ```
    /// use arrayplus::{array, Array, Punctuation};
    /// let a: Array<Array<&str>> = array![array!["a"], array![]];
    /// assert_eq!(a.format_nested(&Punctuation::default()), "{{\"a\"}, {}}");
    /// ```
    pub fn format_nested(&self, punctuation: &Punctuation) -> String {
        self.nested(punctuation).to_string()
    }
}

impl<T> std::convert::AsRef<[T]> for Array<T> {
    fn as_ref(&self) -> &[T] { &self.items }
}

impl<T> std::ops::Index<usize> for Array<T> {
    type Output = T;
    fn index(&self, index: usize) -> &T { &self.items[index] }
}

impl<T> Default for Array<T> {
    fn default() -> Self { Self::from_vec(Vec::new()) }
}

// ----------------------------------------------------------------------------

impl<T> From<Vec<T>> for Array<T> {
    fn from(items: Vec<T>) -> Self { Self::from_vec(items) }
}

impl<T, const N: usize> From<[T; N]> for Array<T> {
    fn from(items: [T; N]) -> Self { Self::new(items) }
}

impl<T> From<Array<T>> for Vec<T> {
    fn from(array: Array<T>) -> Self { array.into_vec() }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item=T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Array<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter { self.into_vec().into_iter() }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn insert_middle() {
        let a = Array::new([10, 20, 30]);
        assert_eq!(a.insert(1, 99), Ok(Array::new([10, 99, 20, 30])));
        assert_eq!(a.as_ref(), [10, 20, 30]);
    }

    #[test]
    fn out_of_bounds() {
        let a = Array::new([1u8, 2, 3]);
        let error = Error::IndexOutOfBounds {index: 3, length: 3};
        assert_eq!(a.remove_at(3), Err(error));
        assert_eq!(a.set(3, 0), Err(error));
        assert_eq!(a.insert(4, 0), Err(Error::IndexOutOfBounds {index: 4, length: 3}));
        let e: Array<u8> = Array::default();
        assert_eq!(e.remove_at(0), Err(Error::IndexOutOfBounds {index: 0, length: 0}));
        assert_eq!(e.insert(0, 5), Ok(Array::new([5])));
    }

    #[test]
    fn set() {
        let a = Array::new(["p", "q"]);
        assert_eq!(a.set(1, "r").unwrap().as_ref(), ["p", "r"]);
        assert_eq!(a.as_ref(), ["p", "q"]);
    }

    #[test]
    fn remove_value() {
        let a = Array::new([String::from("a"), String::from("b"), String::from("c")]);
        let removed = a.remove_value(&String::from("b"));
        assert_eq!(removed.as_ref(), &Array::new([String::from("a"), String::from("c")]));
        let same = a.remove_value(&String::from("z"));
        assert!(std::ptr::eq(&*same, &a));
    }

    #[test]
    fn remove_value_is_flat() {
        let a: Array<Array<i32>> = array![array![1], array![2, 3]];
        assert!(a.contains(&2));
        assert_eq!(a.remove_value(&array![2, 3]).into_owned(), array![array![1]]);
        assert!(matches!(a.remove_value(&array![2]), Cow::Borrowed(_)));
    }

    #[test]
    fn search() {
        let a = Array::new(['x', 'y', 'x', 'z']);
        assert_eq!(a.index_of(&'x'), Some(0));
        assert_eq!(a.last_index_of(&'x'), Some(2));
        assert_eq!(a.last_index_of(&'q'), None);
        assert_eq!(a.occurrences_of(&'x'), 2);
    }

    #[test]
    fn concatenate() {
        let a = Array::new([1.5f32]);
        let b: Array<f32> = Array::default();
        let c = vec![2.5f32, 3.5];
        let abc: Array<f32> = Array::concatenate([a.as_ref(), b.as_ref(), c.as_slice()]).unwrap();
        assert_eq!(abc.as_ref(), [1.5, 2.5, 3.5]);
        let none: Vec<Array<f32>> = Vec::new();
        assert_eq!(
            Array::<f32>::concatenate(none),
            Err(Error::InvalidArgument("cannot concatenate an empty sequence of arrays")),
        );
    }

    #[test]
    fn nested() {
        let a: Array<Array<i32>> = array![array![1, 2], array![3, 4, 5]];
        assert_eq!(a.rank(), 2);
        assert_eq!(a.total_element_count(), 5);
        assert_eq!(a.format_nested(&Punctuation::default()), "{{1, 2}, {3, 4, 5}}");
        let e: Array<i32> = array![];
        assert_eq!(e.format_nested(&Punctuation::default()), "{}");
    }

    #[test]
    fn nested_equality() {
        let a: Array<Array<i32>> = array![array![1], array![2, 3]];
        assert_eq!(a, array![array![1], array![2, 3]]);
        assert_ne!(a, array![array![1], array![2, 4]]);
        assert_ne!(a, array![array![1, 2], array![3]]);
        let empty: Array<Array<i32>> = array![array![]];
        assert_ne!(empty, array![]);
    }

    #[test]
    fn conversions() {
        let a: Array<u16> = vec![1, 2, 3].into();
        assert_eq!(a.to_vec(), vec![1, 2, 3]);
        let b: Array<u64> = a.convert();
        assert_eq!(Vec::from(b), vec![1u64, 2, 3]);
        let doubled: Array<u16> = a.iter().map(|x| x * 2).collect();
        assert_eq!(doubled.into_vec(), vec![2, 4, 6]);
    }

    proptest! {
        #[test]
        fn insert_then_remove(items in prop::collection::vec(any::<i64>(), 0..20), seed: usize, value: i64) {
            let a = Array::from_vec(items);
            let index = seed % (a.len() + 1);
            let b = a.insert(index, value).unwrap();
            prop_assert_eq!(b[index], value);
            prop_assert_eq!(b.remove_at(index).unwrap(), a);
        }

        #[test]
        fn reverse_twice(items in prop::collection::vec(any::<u8>(), 0..20)) {
            let a = Array::from_vec(items);
            prop_assert_eq!(a.reverse().reverse(), a);
        }

        #[test]
        fn concatenate_length(
            xs in prop::collection::vec(any::<i32>(), 1..20),
            ys in prop::collection::vec(any::<i32>(), 1..20),
        ) {
            let (a, b) = (Array::from_vec(xs), Array::from_vec(ys));
            let ab: Array<i32> = Array::concatenate([&a, &b]).unwrap();
            prop_assert_eq!(ab.total_element_count(), a.len() + b.len());
        }

        #[test]
        fn insert_at_end_is_append(items in prop::collection::vec(any::<bool>(), 0..20), value: bool) {
            let a = Array::from_vec(items);
            prop_assert_eq!(a.insert(a.len(), value).unwrap(), a.append(value));
        }
    }
}
