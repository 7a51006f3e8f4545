use crate::{
    equality::{are_equivalent, Identity, Structural},
    failure::{AssertionFailure, DebugMessage},
    handler::{FailureHandler, PanicHandler},
};
use std::{borrow::Borrow, fmt::Debug, rc::Rc};

/// Starts a strict chain: the first expectation that does not hold panics with its message.
///
/// ```
/// use fluent_chain::*;
///
/// assert_that(5).is_equal_to(5).is_positive().is_less_than(10);
/// assert_that("hello world").starts_with("hello").does_not_contain("bye");
/// ```
pub fn assert_that<T>(subject: T) -> Assertion<T> {
    Assertion::new(subject, Rc::new(PanicHandler))
}

/// Blanket extension starting a chain from any value.
///
/// ```
/// use fluent_chain::*;
/// use std::rc::Rc;
///
/// 20.0_f64.assert_that().is_greater_than(10.0);
///
/// let soft = Rc::new(CollectingHandler::new());
/// "abc".assert_with(soft.clone()).is_empty();
/// assert_eq!(soft.len(), 1);
/// ```
pub trait Assertable: Sized {
    fn assert_that(self) -> Assertion<Self>;
    fn assert_with(self, handler: Rc<dyn FailureHandler>) -> Assertion<Self>;
}

impl<T> Assertable for T {
    fn assert_that(self) -> Assertion<Self> {
        assert_that(self)
    }

    fn assert_with(self, handler: Rc<dyn FailureHandler>) -> Assertion<Self> {
        Assertion::new(self, handler)
    }
}

/// A subject under test, the handler its failures go to and an optional description.
///
/// Every operation evaluates its expectation, reports a failure to the handler when it does not
/// hold, and returns the chain either way. Only the handler decides whether a failure stops the
/// test, so a collecting handler sees every failing link of a chain.
///
/// Most operations live in extension traits implemented on `Assertion<T>` for suitable `T`
/// (e.g. [`OrderedAssertions`](crate::OrderedAssertions) for `T: PartialOrd`). User defined
/// assertions follow the same pattern through [`AssertionChain`].
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// #[derive(Debug, PartialEq)]
/// struct Point(i32, i32);
///
/// assert_that(Point(1, 2))
///     .is_equal_to(Point(1, 2))
///     .is_not_equal_to(Point(2, 1))
///     .satisfies(|p| p.0 < p.1);
///
/// assert_that(3).is_one_of([1, 2, 3]);
/// ```
pub struct Assertion<T> {
    subject: T,
    handler: Rc<dyn FailureHandler>,
    description: Option<String>,
}

impl<T> Assertion<T> {
    pub fn new(subject: T, handler: Rc<dyn FailureHandler>) -> Self {
        Assertion {
            subject,
            handler,
            description: None,
        }
    }

    pub fn subject(&self) -> &T {
        &self.subject
    }

    pub fn into_subject(self) -> T {
        self.subject
    }

    pub fn handler(&self) -> &Rc<dyn FailureHandler> {
        &self.handler
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Attaches a message shown ahead of the generated text of every later failure.
    ///
    /// ```
    /// use fluent_chain::*;
    ///
    /// should_fail_with_message!(
    ///     assert_that(3).described_as("stock level").is_zero(),
    ///     "[stock level]*is_zero() expectation failed"
    /// );
    /// ```
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Hands `message` to the handler, unconditionally.
    pub fn fail(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        log::debug!("[Assertion::fail()] {}", message);

        self.handler.fail(message);
    }

    /// A failure message builder for `operation`, carrying this chain's description.
    pub fn failure(&self, operation: &str) -> AssertionFailure {
        AssertionFailure::new(format!("assert_that().{}", operation)).with_custom_message(self.description())
    }

    pub(crate) fn report(&self, failure: AssertionFailure) {
        self.fail(failure.finish())
    }

    /// A new chain over `subject` sharing this chain's handler and description.
    pub(crate) fn derive<U>(&self, operation: &str, subject: U) -> Assertion<U> {
        log::trace!("[Assertion::derive()] deriving chain from {}", operation);

        Assertion {
            subject,
            handler: self.handler.clone(),
            description: self.description.clone(),
        }
    }

    /// Turns this chain into one over `f(subject)`, keeping the handler and description.
    pub(crate) fn map_subject<U, F: FnOnce(T) -> U>(self, f: F) -> Assertion<U> {
        Assertion {
            subject: f(self.subject),
            handler: self.handler,
            description: self.description,
        }
    }

    pub fn satisfies<F>(self, predicate: F) -> Self
    where
        F: FnOnce(&T) -> bool,
        T: Debug,
    {
        if !predicate(&self.subject) {
            self.report(
                self.failure("satisfies()")
                    .with_statement("expecting subject to satisfy the given predicate")
                    .subject(&self.subject),
            );
        }

        self
    }

    pub fn is_equal_to<E>(self, expected: E) -> Self
    where
        T: PartialEq<E> + Debug,
        E: Debug,
    {
        if self.subject != expected {
            self.report(self.failure("is_equal_to()").expected(&expected).but_was(&self.subject));
        }

        self
    }

    pub fn is_not_equal_to<E>(self, unexpected: E) -> Self
    where
        T: PartialEq<E> + Debug,
        E: Debug,
    {
        if self.subject == unexpected {
            self.report(
                self.failure("is_not_equal_to()")
                    .with_value("expecting subject not to be equal to", &unexpected)
                    .but_was(&self.subject),
            );
        }

        self
    }

    /// Deep structural comparison, see [`are_equivalent`].
    pub fn is_equivalent_to<E>(self, expected: E) -> Self
    where
        T: Structural + Debug,
        E: Structural + Debug,
    {
        if !are_equivalent(&self.subject, &expected) {
            self.report(
                self.failure("is_equivalent_to()")
                    .with_value("expecting subject to be equivalent to", &expected)
                    .but_was(&self.subject),
            );
        }

        self
    }

    pub fn is_not_equivalent_to<E>(self, unexpected: E) -> Self
    where
        T: Structural + Debug,
        E: Structural + Debug,
    {
        if are_equivalent(&self.subject, &unexpected) {
            self.report(
                self.failure("is_not_equivalent_to()")
                    .with_value("expecting subject not to be equivalent to", &unexpected)
                    .but_was(&self.subject),
            );
        }

        self
    }

    /// Same-ness as defined by [`Identity`]: references and shared pointers must point at the
    /// same value, value types must be equal.
    pub fn is_same_as<E>(self, other: E) -> Self
    where
        T: Identity + Debug,
        E: Borrow<T>,
    {
        let other = other.borrow();

        if !self.subject.is_same(other) {
            self.report(
                self.failure("is_same_as()")
                    .with_value("expecting subject to be the same instance as", other)
                    .but_was(&self.subject),
            );
        }

        self
    }

    pub fn is_not_same_as<E>(self, other: E) -> Self
    where
        T: Identity + Debug,
        E: Borrow<T>,
    {
        let other = other.borrow();

        if self.subject.is_same(other) {
            self.report(
                self.failure("is_not_same_as()")
                    .with_value("expecting subject not to be the same instance as", other)
                    .but_was(&self.subject),
            );
        }

        self
    }

    pub fn is_one_of<E, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = E>,
        T: PartialEq<E> + Debug,
        E: Debug,
    {
        let values: Vec<E> = values.into_iter().collect();

        if !values.iter().any(|v| self.subject == *v) {
            self.report(
                self.failure("is_one_of()")
                    .with_sequence("expecting subject to be one of", &values)
                    .but_was(&self.subject),
            );
        }

        self
    }
}

/// The seam for user defined assertions: implement an extension trait for every `A` that is an
/// `AssertionChain` over the subject type, and report through [`AssertionChain::fail`].
///
/// ```
/// use fluent_chain::*;
///
/// trait EvenAssertions {
///     fn is_even(self) -> Self;
/// }
///
/// impl<A: AssertionChain<Subject = u32>> EvenAssertions for A {
///     fn is_even(self) -> Self {
///         if self.subject() % 2 != 0 {
///             self.fail(format!("expecting <{}> to be even", self.subject()));
///         }
///         self
///     }
/// }
///
/// assert_that(4u32).is_even().is_positive();
/// should_fail_with_message!(assert_that(3u32).is_even(), "expecting <3> to be even");
/// ```
pub trait AssertionChain {
    type Subject;

    fn subject(&self) -> &Self::Subject;
    fn failure_handler(&self) -> &Rc<dyn FailureHandler>;
    fn description(&self) -> Option<&str>;
    fn fail(&self, message: impl AsRef<str>);
}

impl<T> AssertionChain for Assertion<T> {
    type Subject = T;

    fn subject(&self) -> &T {
        Assertion::subject(self)
    }

    fn failure_handler(&self) -> &Rc<dyn FailureHandler> {
        self.handler()
    }

    fn description(&self) -> Option<&str> {
        Assertion::description(self)
    }

    fn fail(&self, message: impl AsRef<str>) {
        Assertion::fail(self, message)
    }
}

impl<T: Debug> Debug for Assertion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("subject", &self.subject.debug_message())
            .field("description", &self.description)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::{rc::Rc, sync::Arc};

    #[test]
    fn is_equal_to_accepts_borrowed_forms() {
        assert_that(5).is_equal_to(5);
        assert_that(String::from("abc")).is_equal_to("abc");
        assert_that(&5).is_equal_to(&5);
    }

    #[test]
    fn is_equal_to_reports_expected_and_actual() {
        should_fail_with_message!(assert_that(3).is_equal_to(4), "is_equal_to() expectation failed expected: 4 but was: 3");
    }

    #[test]
    fn is_not_equal_to_fails_on_equal_values() {
        assert_that("a").is_not_equal_to("b");
        should_fail_with_message!(
            assert_that("a").is_not_equal_to("a"),
            "expecting subject not to be equal to: \"a\" but was: \"a\""
        );
    }

    #[test]
    fn absent_values_are_equal_to_each_other_only() {
        assert_that(None::<i32>).is_equal_to(None::<i32>);
        should_fail_with_message!(assert_that(Some(1)).is_equal_to(None::<i32>), "expected: None but was: Some(1)");
    }

    #[test]
    fn is_equivalent_to_compares_across_types() {
        assert_that(vec![1u8, 2]).is_equivalent_to([1i64, 2]);
        assert_that(vec![1, 2]).is_not_equivalent_to(vec![2, 1]);
        should_fail_with_message!(
            assert_that(vec![1]).is_equivalent_to(vec![2]),
            "expecting subject to be equivalent to: [2] but was: [1]"
        );
    }

    #[test]
    fn is_same_as_uses_reference_identity() {
        let a = String::from("x");
        let b = String::from("x");

        assert_that(&a).is_same_as(&a).is_not_same_as(&b).is_equal_to(&b);
        should_fail_with_message!(assert_that(&a).is_same_as(&b), "expecting subject to be the same instance as");
    }

    #[test]
    fn is_same_as_uses_pointer_identity_for_shared_pointers() {
        let a = Rc::new(1);
        let b = Arc::new(1);

        assert_that(a.clone()).is_same_as(&a).is_not_same_as(Rc::new(1));
        assert_that(b.clone()).is_same_as(b);
    }

    #[test]
    fn is_same_as_falls_back_to_equality_for_values() {
        assert_that(5).is_same_as(5).is_not_same_as(6);
    }

    #[test]
    fn satisfies_reports_the_subject() {
        assert_that((3, 4)).satisfies(|t| t.0 < t.1);
        should_fail_with_message!(
            assert_that((4, 3)).satisfies(|t| t.0 < t.1),
            "expecting subject to satisfy the given predicate subject: (4, 3)"
        );
    }

    #[test]
    fn is_one_of_lists_candidates() {
        should_fail_with_message!(
            assert_that("d").is_one_of(["a", "b"]),
            "expecting subject to be one of: [\"a\", \"b\"] but was: \"d\""
        );
    }

    #[test]
    fn description_comes_first_and_keeps_generated_text() {
        should_fail_with_message!(
            assert_that(1).described_as("answer").is_equal_to(2),
            "[answer] assert_that().is_equal_to() expectation failed expected: 2"
        );
    }

    #[test]
    fn failing_link_does_not_stop_the_chain() {
        let handler = Rc::new(CollectingHandler::new());

        1i32.assert_with(handler.clone()).is_equal_to(2).is_equal_to(3).is_equal_to(1);

        assert_eq!(handler.len(), 2);
    }

    #[test]
    fn derived_chain_shares_handler_and_description() {
        let handler = Rc::new(CollectingHandler::new());
        let parent = 1i32.assert_with(handler.clone()).described_as("parent");
        let child = parent.derive("test", "child");

        assert!(Rc::ptr_eq(parent.handler(), child.handler()));
        assert_eq!(child.description(), Some("parent"));
    }

    #[test]
    fn into_subject_returns_the_value() {
        assert_eq!(assert_that(vec![1]).into_subject(), vec![1]);
    }
}
