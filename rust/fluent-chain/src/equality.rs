//! Value equality, deep structural equivalence and same-ness.
//!
//! Equality delegates to [`PartialEq`]. Equivalence compares the [`Structure`] of two values:
//! members are matched by name, ordered collections by position, sets and maps as multisets,
//! and neither the type name nor the member declaration order takes part in the comparison.
use crate::sequence;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
    hash::BuildHasher,
    ptr,
    rc::Rc,
    sync::Arc,
};

/// Equality that tolerates absent values: `None` equals `None` and never equals `Some`.
pub fn are_equal<A, B>(a: Option<&A>, b: Option<&B>) -> bool
where
    A: PartialEq<B> + ?Sized,
    B: ?Sized,
{
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Deep structural comparison of two values, possibly of different types.
///
/// ```
/// use fluent_chain::equality::are_equivalent;
/// use std::collections::HashSet;
///
/// assert!(are_equivalent(&vec![1u8, 2, 3], &[1i64, 2, 3]));
/// assert!(are_equivalent(&HashSet::from([3, 1, 2]), &HashSet::from([1, 2, 3])));
/// assert!(!are_equivalent(&Some("a"), &None::<&str>));
/// ```
pub fn are_equivalent<A, B>(a: &A, b: &B) -> bool
where
    A: Structural + ?Sized,
    B: Structural + ?Sized,
{
    a.structure().is_equivalent(&b.structure())
}

/// The shape of a value as seen by equivalence checks.
#[derive(Clone, Debug)]
pub enum Structure {
    Null,
    Bool(bool),
    Integer(i128),
    /// A `u128` above `i128::MAX`; every other integer is an `Integer`.
    WideInteger(u128),
    Float(f64),
    Char(char),
    Text(String),
    Sequence(Vec<Structure>),
    Set(Vec<Structure>),
    Map(Vec<(Structure, Structure)>),
    Record(BTreeMap<String, Structure>),
    Variant { name: String, payload: Box<Structure> },
}

impl Structure {
    pub fn record<'n, I>(members: I) -> Self
    where I: IntoIterator<Item = (&'n str, Structure)> {
        Structure::Record(members.into_iter().map(|(name, s)| (name.to_owned(), s)).collect())
    }

    pub fn variant(name: &str, payload: Structure) -> Self {
        Structure::Variant {
            name: name.to_owned(),
            payload: Box::new(payload),
        }
    }

    pub fn is_equivalent(&self, other: &Structure) -> bool {
        match (self, other) {
            (Structure::Null, Structure::Null) => true,
            (Structure::Bool(a), Structure::Bool(b)) => a == b,
            (Structure::Integer(a), Structure::Integer(b)) => a == b,
            (Structure::WideInteger(a), Structure::WideInteger(b)) => a == b,
            // NaN is equivalent to itself, otherwise equivalence would not be reflexive
            (Structure::Float(a), Structure::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Structure::Char(a), Structure::Char(b)) => a == b,
            (Structure::Text(a), Structure::Text(b)) => a == b,
            (Structure::Sequence(a), Structure::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.is_equivalent(y))
            },
            (Structure::Set(a), Structure::Set(b)) => {
                a.len() == b.len() && sequence::multiset_difference(a, b, |x, y| x.is_equivalent(y)).is_empty()
            },
            (Structure::Map(a), Structure::Map(b)) => {
                a.len() == b.len()
                    && sequence::multiset_difference(a, b, |(k1, v1), (k2, v2)| k1.is_equivalent(k2) && v1.is_equivalent(v2))
                        .is_empty()
            },
            (Structure::Record(a), Structure::Record(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(name, member)| b.get(name).map_or(false, |other| member.is_equivalent(other)))
            },
            (
                Structure::Variant { name: n1, payload: p1 },
                Structure::Variant { name: n2, payload: p2 },
            ) => n1 == n2 && p1.is_equivalent(p2),
            _ => false,
        }
    }
}

/// Exposes the members of a value to [`are_equivalent`].
///
/// Implement it by hand, or with `#[derive(Structural)]` on structs and enums.
pub trait Structural {
    fn structure(&self) -> Structure;
}

macro_rules! integer_structural {
    ($($t:ty),*) => {
        $(
            impl Structural for $t {
                fn structure(&self) -> Structure {
                    Structure::Integer(*self as i128)
                }
            }
        )*
    };
}

integer_structural!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl Structural for u128 {
    fn structure(&self) -> Structure {
        match i128::try_from(*self) {
            Ok(value) => Structure::Integer(value),
            Err(_) => Structure::WideInteger(*self),
        }
    }
}

impl Structural for f32 {
    fn structure(&self) -> Structure {
        Structure::Float(*self as f64)
    }
}

impl Structural for f64 {
    fn structure(&self) -> Structure {
        Structure::Float(*self)
    }
}

impl Structural for bool {
    fn structure(&self) -> Structure {
        Structure::Bool(*self)
    }
}

impl Structural for char {
    fn structure(&self) -> Structure {
        Structure::Char(*self)
    }
}

impl Structural for str {
    fn structure(&self) -> Structure {
        Structure::Text(self.to_owned())
    }
}

impl Structural for String {
    fn structure(&self) -> Structure {
        Structure::Text(self.clone())
    }
}

impl Structural for () {
    fn structure(&self) -> Structure {
        Structure::Sequence(vec![])
    }
}

impl<T: Structural> Structural for Option<T> {
    fn structure(&self) -> Structure {
        match self {
            Some(v) => v.structure(),
            None => Structure::Null,
        }
    }
}

macro_rules! pointer_structural {
    ($($p:ident),*) => {
        $(
            impl<T: Structural + ?Sized> Structural for $p<T> {
                fn structure(&self) -> Structure {
                    (**self).structure()
                }
            }
        )*
    };
}

pointer_structural!(Box, Rc, Arc);

impl<T: Structural + ?Sized> Structural for &T {
    fn structure(&self) -> Structure {
        (**self).structure()
    }
}

impl<T: Structural + ?Sized> Structural for &mut T {
    fn structure(&self) -> Structure {
        (**self).structure()
    }
}

fn sequence_of<'t, T: Structural + 't>(items: impl IntoIterator<Item = &'t T>) -> Structure {
    Structure::Sequence(items.into_iter().map(Structural::structure).collect())
}

impl<T: Structural> Structural for [T] {
    fn structure(&self) -> Structure {
        sequence_of(self)
    }
}

impl<T: Structural, const N: usize> Structural for [T; N] {
    fn structure(&self) -> Structure {
        sequence_of(self)
    }
}

impl<T: Structural> Structural for Vec<T> {
    fn structure(&self) -> Structure {
        sequence_of(self)
    }
}

impl<T: Structural> Structural for VecDeque<T> {
    fn structure(&self) -> Structure {
        sequence_of(self)
    }
}

impl<T: Structural> Structural for LinkedList<T> {
    fn structure(&self) -> Structure {
        sequence_of(self)
    }
}

impl<T: Structural, S: BuildHasher> Structural for HashSet<T, S> {
    fn structure(&self) -> Structure {
        Structure::Set(self.iter().map(Structural::structure).collect())
    }
}

impl<T: Structural> Structural for BTreeSet<T> {
    fn structure(&self) -> Structure {
        Structure::Set(self.iter().map(Structural::structure).collect())
    }
}

impl<K: Structural, V: Structural, S: BuildHasher> Structural for HashMap<K, V, S> {
    fn structure(&self) -> Structure {
        Structure::Map(self.iter().map(|(k, v)| (k.structure(), v.structure())).collect())
    }
}

impl<K: Structural, V: Structural> Structural for BTreeMap<K, V> {
    fn structure(&self) -> Structure {
        Structure::Map(self.iter().map(|(k, v)| (k.structure(), v.structure())).collect())
    }
}

macro_rules! tuple_structural {
    ($(($($name:ident . $index:tt),+)),*) => {
        $(
            impl<$($name: Structural),+> Structural for ($($name,)+) {
                fn structure(&self) -> Structure {
                    Structure::Sequence(vec![$(self.$index.structure()),+])
                }
            }
        )*
    };
}

tuple_structural!(
    (A.0),
    (A.0, B.1),
    (A.0, B.1, C.2),
    (A.0, B.1, C.2, D.3),
    (A.0, B.1, C.2, D.3, E.4),
    (A.0, B.1, C.2, D.3, E.4, F.5)
);

/// Same-ness. Reference-like values compare by address; value types have no identity of
/// their own, so for them being the same means being equal.
pub trait Identity {
    fn is_same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for &T {
    fn is_same(&self, other: &Self) -> bool {
        ptr::eq(*self, *other)
    }
}

impl<T: ?Sized> Identity for Box<T> {
    fn is_same(&self, other: &Self) -> bool {
        ptr::eq(&**self, &**other)
    }
}

impl<T: ?Sized> Identity for Rc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

macro_rules! value_identity {
    ($($t:ty),*) => {
        $(
            impl Identity for $t {
                fn is_same(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

value_identity!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, (), String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn are_equal_handles_absent_values() {
        assert!(are_equal::<i32, i32>(None, None));
        assert!(!are_equal(Some(&1), None::<&i32>));
        assert!(!are_equal(None::<&i32>, Some(&1)));
        assert!(are_equal(Some("a"), Some("a")));
        assert!(are_equal(Some(&String::from("a")), Some("a")));
    }

    #[test]
    fn integers_of_different_widths_are_equivalent() {
        assert!(are_equivalent(&5u8, &5i64));
        assert!(!are_equivalent(&5u8, &5.0f64));
    }

    #[test]
    fn wide_unsigned_integers_keep_their_value() {
        assert!(are_equivalent(&u128::MAX, &u128::MAX));
        assert!(!are_equivalent(&u128::MAX, &(u128::MAX - 1)));
        assert!(!are_equivalent(&u128::MAX, &-1i128));
        assert!(!are_equivalent(&(i128::MAX as u128 + 1), &i128::MIN));
        assert!(are_equivalent(&5u128, &5i8));
        assert!(are_equivalent(&(i128::MAX as u128), &i128::MAX));
    }

    #[test]
    fn nan_is_equivalent_to_itself() {
        assert!(are_equivalent(&f64::NAN, &f64::NAN));
        assert!(!are_equivalent(&f64::NAN, &1.0));
    }

    #[test]
    fn sequences_compare_positionally() {
        assert!(are_equivalent(&vec!["a", "b"], &VecDeque::from(vec!["a".to_owned(), "b".to_owned()])));
        assert!(!are_equivalent(&vec![1, 2], &vec![2, 1]));
        assert!(!are_equivalent(&vec![1, 2], &vec![1, 2, 3]));
    }

    #[test]
    fn sets_and_maps_ignore_order() {
        let a: HashMap<&str, i32> = [("x", 1), ("y", 2)].into_iter().collect();
        let b: BTreeMap<String, i64> = [("y".to_owned(), 2), ("x".to_owned(), 1)].into_iter().collect();

        assert!(are_equivalent(&a, &b));
        assert!(are_equivalent(&BTreeSet::from([1, 2]), &HashSet::from([2, 1])));
        assert!(!are_equivalent(&BTreeSet::from([1, 2]), &HashSet::from([2, 3])));
    }

    #[test]
    fn records_match_members_by_name() {
        let a = Structure::record([("name", "x".structure()), ("age", 3.structure())]);
        let b = Structure::record([("age", 3u64.structure()), ("name", "x".structure())]);
        let c = Structure::record([("age", 3u64.structure())]);

        assert!(a.is_equivalent(&b));
        assert!(!a.is_equivalent(&c));
        assert!(!c.is_equivalent(&a));
    }

    #[test]
    fn variants_compare_name_and_payload() {
        let a = Structure::variant("Some", 1.structure());

        assert!(a.is_equivalent(&Structure::variant("Some", 1u8.structure())));
        assert!(!a.is_equivalent(&Structure::variant("Other", 1.structure())));
    }

    #[test]
    fn references_are_same_only_at_the_same_address() {
        let a = String::from("value");
        let b = String::from("value");

        assert!((&a).is_same(&&a));
        assert!(!(&a).is_same(&&b));
    }

    #[test]
    fn shared_pointers_compare_by_allocation() {
        let a = Rc::new(5);
        let b = Rc::new(5);

        assert!(a.is_same(&a.clone()));
        assert!(!a.is_same(&b));
    }

    #[test]
    fn value_types_are_same_when_equal() {
        assert!(5.is_same(&5));
        assert!(!5.is_same(&6));
        assert!(String::from("a").is_same(&String::from("a")));
        assert!(!String::from("a").is_same(&String::from("b")));
    }
}
