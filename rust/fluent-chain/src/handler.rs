use crate::{assertion::Assertion, error::SoftAssertionError};
use std::{cell::RefCell, rc::Rc};

/// Decides what happens to a composed failure message.
///
/// Assertions never panic or return early on their own when an expectation does not hold;
/// they call [`FailureHandler::fail`] and keep going. Interrupting control flow is entirely
/// the handler's choice.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
/// use std::{cell::Cell, rc::Rc};
///
/// #[derive(Default)]
/// struct CountingHandler {
///     count: Cell<usize>,
/// }
///
/// impl FailureHandler for CountingHandler {
///     fn fail(&self, _message: &str) {
///         self.count.set(self.count.get() + 1);
///     }
/// }
///
/// let handler = Rc::new(CountingHandler::default());
/// 5i32.assert_with(handler.clone()).is_less_than(3).is_zero();
///
/// assert_eq!(handler.count.get(), 2);
/// ```
pub trait FailureHandler {
    fn fail(&self, message: &str);
}

/// The strict handler: panics with the failure message. Used by [`assert_that`](crate::assert_that).
#[derive(Clone, Copy, Debug, Default)]
pub struct PanicHandler;

impl FailureHandler for PanicHandler {
    fn fail(&self, message: &str) {
        panic!("{}", message);
    }
}

/// Swallows every failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct IgnoringHandler;

impl FailureHandler for IgnoringHandler {
    fn fail(&self, _message: &str) {}
}

/// Records failures so several can be reported together.
///
/// Not synchronized: a collecting handler belongs to a single test execution.
#[derive(Debug, Default)]
pub struct CollectingHandler {
    failures: RefCell<Vec<String>>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.failures.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.borrow().is_empty()
    }

    /// Drains the recorded failures into a result.
    pub fn take_result(&self) -> Result<(), SoftAssertionError> {
        let failures = self.failures.take();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(SoftAssertionError { failures })
        }
    }

    /// Panics with every recorded failure, if any.
    pub fn assert_all(&self) {
        if let Err(e) = self.take_result() {
            panic!("{}", e);
        }
    }
}

impl FailureHandler for CollectingHandler {
    fn fail(&self, message: &str) {
        self.failures.borrow_mut().push(message.to_owned());
    }
}

/// A batch of assertions sharing one [`CollectingHandler`].
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// let soft = SoftAssertions::new();
/// soft.that(3).is_greater_than(5);
/// soft.that("abc").starts_with("x");
///
/// let error = soft.into_result().unwrap_err();
/// assert_eq!(error.failures.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SoftAssertions {
    handler: Rc<CollectingHandler>,
}

impl SoftAssertions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn that<T>(&self, subject: T) -> Assertion<T> {
        Assertion::new(subject, self.handler.clone())
    }

    pub fn handler(&self) -> &Rc<CollectingHandler> {
        &self.handler
    }

    pub fn failures(&self) -> Vec<String> {
        self.handler.failures()
    }

    pub fn into_result(self) -> Result<(), SoftAssertionError> {
        self.handler.take_result()
    }

    pub fn assert_all(self) {
        self.handler.assert_all()
    }
}

/// Runs a batch of soft assertions and panics once with every failure collected.
///
/// ```
/// use fluent_chain::*;
///
/// assert_all(|soft| {
///     soft.that(vec![1, 2, 3]).contains([3, 1]);
///     soft.that(true).is_true();
/// });
/// ```
pub fn assert_all<F: FnOnce(&SoftAssertions)>(assertions: F) {
    let soft = SoftAssertions::new();

    assertions(&soft);

    soft.assert_all();
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn collecting_handler_keeps_failures_in_order() {
        let handler = CollectingHandler::new();
        handler.fail("first");
        handler.fail("second");

        assert_eq!(handler.failures(), vec!["first", "second"]);
        assert_eq!(handler.len(), 2);
    }

    #[test]
    fn take_result_drains_failures() {
        let handler = CollectingHandler::new();
        handler.fail("boom");

        assert!(handler.take_result().is_err());
        assert!(handler.is_empty());
        assert_eq!(handler.take_result(), Ok(()));
    }

    #[test]
    fn soft_assertions_share_the_same_handler() {
        let soft = SoftAssertions::new();
        let first = soft.that(1);
        let second = soft.that(2);

        assert!(std::rc::Rc::ptr_eq(first.handler(), second.handler()));
    }

    #[test]
    fn assert_all_reports_every_failure_once() {
        should_fail_with_message!(
            assert_all(|soft| {
                soft.that(1).is_equal_to(2);
                soft.that("abc").contains("x");
            }),
            "2 assertion(s) failed:*1)*is_equal_to()*2)*contains()"
        );
    }

    #[test]
    fn assert_all_passes_when_nothing_failed() {
        assert_all(|soft| {
            soft.that(1).is_equal_to(1);
        });
    }

    #[test]
    fn ignoring_handler_lets_chains_continue() {
        let chain = 3i32.assert_with(std::rc::Rc::new(IgnoringHandler)).is_negative().is_zero();

        assert_eq!(*chain.subject(), 3);
    }
}
