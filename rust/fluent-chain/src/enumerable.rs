use crate::{any::ToAny, assertion::Assertion, nullable::Nullable, sequence};
use std::{
    any::Any,
    collections::{BTreeSet, HashSet, LinkedList, VecDeque},
    fmt::Debug,
    hash::BuildHasher,
};

/// Collections whose elements can be listed in iteration order. `None` is the absent collection.
pub trait Enumerable {
    type Item;

    fn elements(&self) -> Option<Vec<&Self::Item>>;
}

macro_rules! enumerable_through_iter {
    ($($t:ident),*) => {
        $(
            impl<T> Enumerable for $t<T> {
                type Item = T;

                fn elements(&self) -> Option<Vec<&T>> {
                    Some(self.iter().collect())
                }
            }
        )*
    };
}

enumerable_through_iter!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T> Enumerable for [T] {
    type Item = T;

    fn elements(&self) -> Option<Vec<&T>> {
        Some(self.iter().collect())
    }
}

impl<T, const N: usize> Enumerable for [T; N] {
    type Item = T;

    fn elements(&self) -> Option<Vec<&T>> {
        Some(self.iter().collect())
    }
}

impl<T, S: BuildHasher> Enumerable for HashSet<T, S> {
    type Item = T;

    fn elements(&self) -> Option<Vec<&T>> {
        Some(self.iter().collect())
    }
}

impl<C: Enumerable + ?Sized> Enumerable for &C {
    type Item = C::Item;

    fn elements(&self) -> Option<Vec<&C::Item>> {
        (**self).elements()
    }
}

impl<C: Enumerable + ?Sized> Enumerable for Box<C> {
    type Item = C::Item;

    fn elements(&self) -> Option<Vec<&C::Item>> {
        (**self).elements()
    }
}

impl<C: Enumerable> Enumerable for Option<C> {
    type Item = C::Item;

    fn elements(&self) -> Option<Vec<&C::Item>> {
        self.as_ref().and_then(Enumerable::elements)
    }
}

fn item_eq<T: PartialEq<E> + ?Sized, E>(actual: &&T, expected: &E) -> bool {
    **actual == *expected
}

/// Assertions for collections implementing [`Enumerable`].
///
/// Expectations about what the collection holds fail on an absent subject; expectations about
/// what it does not hold pass.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// assert_that(vec![1, 2, 3])
///     .has_size(3)
///     .contains([3, 1])
///     .does_not_contain([4])
///     .contains_only([1, 2, 3, 4])
///     .contains_exactly([1, 2, 3])
///     .contains_exactly_in_any_order([3, 2, 1])
///     .contains_sequence([2, 3])
///     .contains_interleaved_sequence([1, 3])
///     .all_satisfy(|x| *x > 0);
///
/// // derived views keep reporting through the same handler
/// let numbers = assert_that([1, 2, 3, 4]);
/// numbers.filter(|x| *x % 2 == 0).contains_exactly([&2, &4]);
/// numbers.map(|x| x * 10).contains([40]);
/// ```
pub trait EnumerableAssertions<C: Enumerable>: Sized {
    fn is_empty(self) -> Self;
    fn is_not_empty(self) -> Self;
    fn is_null_or_empty(self) -> Self;
    fn is_not_null_or_empty(self) -> Self;
    fn has_size(self, size: usize) -> Self;
    fn has_at_least_size(self, size: usize) -> Self;
    fn has_at_most_size(self, size: usize) -> Self;

    /// Every value must be present; order and multiplicity do not matter.
    fn contains<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    fn does_not_contain<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    /// Every element of the subject must be one of `values`.
    fn contains_only<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq + PartialEq<E>,
        E: Debug;

    fn does_not_contain_only<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq + PartialEq<E>,
        E: Debug;

    /// Same elements in the same order.
    fn contains_exactly<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    fn does_not_contain_exactly<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    /// Same elements with the same multiplicities, in any order.
    fn contains_exactly_in_any_order<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    fn does_not_contain_exactly_in_any_order<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    /// `values` must occur as a contiguous run.
    fn contains_sequence<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    fn does_not_contain_sequence<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    /// `values` must occur in order, other elements allowed in between.
    fn contains_interleaved_sequence<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    fn does_not_contain_interleaved_sequence<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug;

    fn contains_null(self) -> Self
    where C::Item: Nullable;

    fn does_not_contain_null(self) -> Self
    where C::Item: Nullable;

    fn all_satisfy<P: Fn(&C::Item) -> bool>(self, predicate: P) -> Self;
    fn some_satisfy<P: Fn(&C::Item) -> bool>(self, predicate: P) -> Self;
    fn none_satisfy<P: Fn(&C::Item) -> bool>(self, predicate: P) -> Self;

    fn contains_duplicates(self) -> Self
    where C::Item: PartialEq;

    fn does_not_contain_duplicates(self) -> Self
    where C::Item: PartialEq;

    /// A chain over the elements matching `predicate`, reporting to the same handler.
    fn filter<P: Fn(&C::Item) -> bool>(&self, predicate: P) -> Assertion<Option<Vec<&C::Item>>>;

    /// A chain over the projected elements, reporting to the same handler.
    fn map<U, F: Fn(&C::Item) -> U>(&self, projector: F) -> Assertion<Option<Vec<U>>>;

    /// A chain over the elements whose dynamic type is `U`, reporting to the same handler.
    fn of_type<U: Any>(&self) -> Assertion<Option<Vec<&U>>>
    where C::Item: ToAny;
}

impl<C> Assertion<C>
where
    C: Enumerable,
    C::Item: Debug,
{
    fn expect_count<F>(self, operation: &str, expectation: String, holds: F) -> Self
    where F: FnOnce(usize) -> bool {
        match self.subject().elements() {
            None => self.report(self.failure(operation).expecting(expectation).with_null("but was")),
            Some(items) => {
                if !holds(items.len()) {
                    self.report(
                        self.failure(operation)
                            .expecting(expectation)
                            .with_message("but had size", items.len().to_string())
                            .with_sequence("subject", &items),
                    );
                }
            },
        }

        self
    }

    /// Compares the elements against `expected` with `check`; an absent subject fails when
    /// `fails_on_null` is set and passes otherwise.
    fn expect_values<E, R>(
        self,
        operation: &str,
        prompt: &str,
        expected: &[E],
        fails_on_null: bool,
        check: R,
    ) -> Self
    where
        E: Debug,
        R: FnOnce(&[&C::Item]) -> Option<Vec<(String, String)>>,
    {
        match self.subject().elements() {
            None => {
                if fails_on_null {
                    self.report(
                        self.failure(operation)
                            .with_sequence(prompt, expected)
                            .with_null("but was"),
                    );
                }
            },
            Some(items) => {
                if let Some(facts) = check(&items) {
                    let failure = facts
                        .into_iter()
                        .fold(self.failure(operation).with_sequence(prompt, expected), |f, (label, value)| {
                            f.with_message(&label, value)
                        });

                    self.report(failure.with_sequence("subject", &items));
                }
            },
        }

        self
    }

    fn expect_items<R>(self, operation: &str, statement: &str, fails_on_null: bool, check: R) -> Self
    where R: FnOnce(&[&C::Item]) -> Option<(String, String)> {
        match self.subject().elements() {
            None => {
                if fails_on_null {
                    self.report(self.failure(operation).with_statement(statement).with_null("but was"));
                }
            },
            Some(items) => {
                if let Some((label, value)) = check(&items) {
                    self.report(
                        self.failure(operation)
                            .with_statement(statement)
                            .with_message(&label, value)
                            .with_sequence("subject", &items),
                    );
                }
            },
        }

        self
    }
}

fn listed<T: Debug>(label: &str, items: &[T]) -> Option<Vec<(String, String)>> {
    Some(vec![(label.to_owned(), crate::failure::render_sequence(items))])
}

impl<C> EnumerableAssertions<C> for Assertion<C>
where
    C: Enumerable,
    C::Item: Debug,
{
    fn is_empty(self) -> Self {
        self.expect_items("is_empty()", "expecting subject to be empty", true, |items| {
            (!items.is_empty()).then(|| ("but had size".to_owned(), items.len().to_string()))
        })
    }

    fn is_not_empty(self) -> Self {
        self.expect_items("is_not_empty()", "expecting subject not to be empty", true, |items| {
            items.is_empty().then(|| ("but was".to_owned(), "[]".to_owned()))
        })
    }

    fn is_null_or_empty(self) -> Self {
        self.expect_items("is_null_or_empty()", "expecting subject to be null or empty", false, |items| {
            (!items.is_empty()).then(|| ("but had size".to_owned(), items.len().to_string()))
        })
    }

    fn is_not_null_or_empty(self) -> Self {
        self.expect_items(
            "is_not_null_or_empty()",
            "expecting subject not to be null or empty",
            true,
            |items| items.is_empty().then(|| ("but was".to_owned(), "[]".to_owned())),
        )
    }

    fn has_size(self, size: usize) -> Self {
        self.expect_count("has_size()", format!("subject to have size {}", size), |n| n == size)
    }

    fn has_at_least_size(self, size: usize) -> Self {
        self.expect_count("has_at_least_size()", format!("subject to have at least size {}", size), |n| {
            n >= size
        })
    }

    fn has_at_most_size(self, size: usize) -> Self {
        self.expect_count("has_at_most_size()", format!("subject to have at most size {}", size), |n| {
            n <= size
        })
    }

    fn contains<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let expected: Vec<E> = values.into_iter().collect();

        self.expect_values("contains()", "expecting subject to contain", &expected, true, |items| {
            let missing = sequence::missing_values(&expected, items, item_eq);
            (!missing.is_empty()).then(|| listed("but misses", &missing)).flatten()
        })
    }

    fn does_not_contain<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let unexpected: Vec<E> = values.into_iter().collect();

        self.expect_values("does_not_contain()", "expecting subject not to contain", &unexpected, false, |items| {
            let present = sequence::present_values(&unexpected, items, item_eq);
            (!present.is_empty()).then(|| listed("but contains", &present)).flatten()
        })
    }

    fn contains_only<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq + PartialEq<E>,
        E: Debug,
    {
        let allowed: Vec<E> = values.into_iter().collect();

        self.expect_values("contains_only()", "expecting subject to contain only", &allowed, true, |items| {
            let extra = sequence::unexpected_values(items, &allowed, item_eq);
            (!extra.is_empty()).then(|| listed("but also contains", &extra)).flatten()
        })
    }

    fn does_not_contain_only<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq + PartialEq<E>,
        E: Debug,
    {
        let allowed: Vec<E> = values.into_iter().collect();

        self.expect_values(
            "does_not_contain_only()",
            "expecting subject to contain something other than",
            &allowed,
            false,
            |items| {
                sequence::unexpected_values(items, &allowed, item_eq)
                    .is_empty()
                    .then(|| vec![("but".to_owned(), "every element is one of them".to_owned())])
            },
        )
    }

    fn contains_exactly<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let expected: Vec<E> = values.into_iter().collect();

        self.expect_values("contains_exactly()", "expecting subject to contain exactly", &expected, true, |items| {
            sequence::first_mismatch(items, &expected, item_eq)
                .map(|index| vec![("but differs at index".to_owned(), index.to_string())])
        })
    }

    fn does_not_contain_exactly<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let unexpected: Vec<E> = values.into_iter().collect();

        self.expect_values(
            "does_not_contain_exactly()",
            "expecting subject not to contain exactly",
            &unexpected,
            false,
            |items| {
                sequence::first_mismatch(items, &unexpected, item_eq)
                    .is_none()
                    .then(|| vec![("but".to_owned(), "every element matches in order".to_owned())])
            },
        )
    }

    fn contains_exactly_in_any_order<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let expected: Vec<E> = values.into_iter().collect();

        self.expect_values(
            "contains_exactly_in_any_order()",
            "expecting subject to contain exactly in any order",
            &expected,
            true,
            |items| {
                let difference = sequence::multiset_difference(&expected, items, item_eq);
                (!difference.is_empty()).then(|| {
                    vec![
                        ("but misses".to_owned(), crate::failure::render_sequence(&difference.missing)),
                        ("and has in excess".to_owned(), crate::failure::render_sequence(&difference.excess)),
                    ]
                })
            },
        )
    }

    fn does_not_contain_exactly_in_any_order<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let unexpected: Vec<E> = values.into_iter().collect();

        self.expect_values(
            "does_not_contain_exactly_in_any_order()",
            "expecting subject not to contain exactly in any order",
            &unexpected,
            false,
            |items| {
                sequence::multiset_difference(&unexpected, items, item_eq)
                    .is_empty()
                    .then(|| vec![("but".to_owned(), "every element is matched exactly once".to_owned())])
            },
        )
    }

    fn contains_sequence<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let expected: Vec<E> = values.into_iter().collect();

        self.expect_values("contains_sequence()", "expecting subject to contain the sequence", &expected, true, |items| {
            sequence::index_of_sequence(items, &expected, item_eq)
                .is_none()
                .then(|| vec![("but".to_owned(), "no contiguous run matches".to_owned())])
        })
    }

    fn does_not_contain_sequence<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let unexpected: Vec<E> = values.into_iter().collect();

        self.expect_values(
            "does_not_contain_sequence()",
            "expecting subject not to contain the sequence",
            &unexpected,
            false,
            |items| {
                sequence::index_of_sequence(items, &unexpected, item_eq)
                    .map(|index| vec![("but found it at index".to_owned(), index.to_string())])
            },
        )
    }

    fn contains_interleaved_sequence<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let expected: Vec<E> = values.into_iter().collect();

        self.expect_values(
            "contains_interleaved_sequence()",
            "expecting subject to contain, in order,",
            &expected,
            true,
            |items| {
                (!sequence::is_interleaved_subsequence(items, &expected, item_eq))
                    .then(|| vec![("but".to_owned(), "the elements do not occur in that order".to_owned())])
            },
        )
    }

    fn does_not_contain_interleaved_sequence<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        C::Item: PartialEq<E>,
        E: Debug,
    {
        let unexpected: Vec<E> = values.into_iter().collect();

        self.expect_values(
            "does_not_contain_interleaved_sequence()",
            "expecting subject not to contain, in order,",
            &unexpected,
            false,
            |items| {
                sequence::is_interleaved_subsequence(items, &unexpected, item_eq)
                    .then(|| vec![("but".to_owned(), "the elements occur in that order".to_owned())])
            },
        )
    }

    fn contains_null(self) -> Self
    where C::Item: Nullable {
        self.expect_items("contains_null()", "expecting subject to contain a null element", true, |items| {
            (!items.iter().any(|i| i.is_null())).then(|| ("but".to_owned(), "every element is present".to_owned()))
        })
    }

    fn does_not_contain_null(self) -> Self
    where C::Item: Nullable {
        self.expect_items(
            "does_not_contain_null()",
            "expecting subject not to contain a null element",
            false,
            |items| {
                items
                    .iter()
                    .position(|i| i.is_null())
                    .map(|index| ("but found one at index".to_owned(), index.to_string()))
            },
        )
    }

    fn all_satisfy<P: Fn(&C::Item) -> bool>(self, predicate: P) -> Self {
        self.expect_items("all_satisfy()", "expecting all elements to satisfy the predicate", true, |items| {
            let failing: Vec<_> = items.iter().filter(|i| !predicate(i)).collect();
            (!failing.is_empty()).then(|| ("but these do not".to_owned(), crate::failure::render_sequence(&failing)))
        })
    }

    fn some_satisfy<P: Fn(&C::Item) -> bool>(self, predicate: P) -> Self {
        self.expect_items("some_satisfy()", "expecting some element to satisfy the predicate", true, |items| {
            (!items.iter().any(|i| predicate(i))).then(|| ("but".to_owned(), "none does".to_owned()))
        })
    }

    fn none_satisfy<P: Fn(&C::Item) -> bool>(self, predicate: P) -> Self {
        self.expect_items("none_satisfy()", "expecting no element to satisfy the predicate", false, |items| {
            let offending: Vec<_> = items.iter().filter(|i| predicate(i)).collect();
            (!offending.is_empty()).then(|| ("but these do".to_owned(), crate::failure::render_sequence(&offending)))
        })
    }

    fn contains_duplicates(self) -> Self
    where C::Item: PartialEq {
        self.expect_items("contains_duplicates()", "expecting subject to contain duplicates", true, |items| {
            sequence::duplicates(items)
                .is_empty()
                .then(|| ("but".to_owned(), "every element is distinct".to_owned()))
        })
    }

    fn does_not_contain_duplicates(self) -> Self
    where C::Item: PartialEq {
        self.expect_items(
            "does_not_contain_duplicates()",
            "expecting subject not to contain duplicates",
            false,
            |items| {
                let duplicated = sequence::duplicates(items);
                (!duplicated.is_empty()).then(|| ("but found".to_owned(), crate::failure::render_sequence(&duplicated)))
            },
        )
    }

    fn filter<P: Fn(&C::Item) -> bool>(&self, predicate: P) -> Assertion<Option<Vec<&C::Item>>> {
        let view = self
            .subject()
            .elements()
            .map(|items| items.into_iter().filter(|i| predicate(i)).collect());

        self.derive("filter()", view)
    }

    fn map<U, F: Fn(&C::Item) -> U>(&self, projector: F) -> Assertion<Option<Vec<U>>> {
        let view = self
            .subject()
            .elements()
            .map(|items| items.into_iter().map(|i| projector(i)).collect());

        self.derive("map()", view)
    }

    fn of_type<U: Any>(&self) -> Assertion<Option<Vec<&U>>>
    where C::Item: ToAny {
        let view = self
            .subject()
            .elements()
            .map(|items| items.into_iter().filter_map(|i| i.to_any().downcast_ref::<U>()).collect());

        self.derive("of_type()", view)
    }
}
