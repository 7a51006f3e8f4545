//! Assertions on actions that may raise errors.
//!
//! An action is any `FnOnce() -> R` where `R` is `()` or a `Result`. It raises when it returns
//! `Err` or panics; a panic is captured as a [`PanicError`] carrying the panic message.
//! Wrapping errors through [`Error::source`] is the Rust counterpart of exception subtyping and
//! of inner exceptions.
use crate::{assertion::Assertion, failure::glob_is_match};
use std::{
    any::{type_name, Any},
    error::Error,
    fmt,
    iter,
    panic::{self, AssertUnwindSafe},
    rc::Rc,
};
use thiserror::Error;

/// A panic captured while running an action.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct PanicError {
    pub message: String,
}

impl PanicError {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(m) = payload.downcast_ref::<String>() {
            m.to_owned()
        } else if let Some(m) = payload.downcast_ref::<&str>() {
            m.to_string()
        } else {
            "<non-string panic payload>".to_owned()
        };

        PanicError { message }
    }
}

/// What an action hands back: `()`, or a `Result` whose error converts into `Box<dyn Error>`.
///
/// While an action runs, the process panic hook is replaced by one that only logs, and the
/// previous hook is put back afterwards. The hook is process-global: a panic on another
/// thread during that window (e.g. a parallel test) goes to the logging hook too, and a hook
/// installed by another thread meanwhile is overwritten on restore.
pub trait Outcome {
    type Value;

    fn into_result(self) -> Result<Self::Value, Box<dyn Error>>;
}

impl Outcome for () {
    type Value = ();

    fn into_result(self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

impl<T, E: Into<Box<dyn Error>>> Outcome for Result<T, E> {
    type Value = T;

    fn into_result(self) -> Result<T, Box<dyn Error>> {
        self.map_err(Into::into)
    }
}

fn run_action<F, R>(action: F) -> Result<R::Value, Box<dyn Error>>
where
    F: FnOnce() -> R,
    R: Outcome,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|p| {
        log::debug!("[run_action()] panic captured: {}", p);
    }));

    let result = panic::catch_unwind(AssertUnwindSafe(action));

    panic::set_hook(previous);

    match result {
        Ok(outcome) => outcome.into_result(),
        Err(payload) => Err(Box::new(PanicError::from_payload(payload))),
    }
}

/// `error` followed by everything it wraps, outermost first.
fn source_chain<'e>(error: &'e (dyn Error + 'static)) -> impl Iterator<Item = &'e (dyn Error + 'static)> {
    iter::successors(Some(error), |&e| e.source())
}

/// A raised error, positioned at one level of its source chain.
#[derive(Clone)]
pub struct Exception {
    root: Rc<dyn Error>,
    depth: usize,
}

impl Exception {
    pub fn new(error: Box<dyn Error>) -> Self {
        Exception {
            root: Rc::from(error),
            depth: 0,
        }
    }

    /// The error at this level.
    pub fn error(&self) -> &(dyn Error + 'static) {
        let mut current: &(dyn Error + 'static) = &*self.root;

        for _ in 0..self.depth {
            match current.source() {
                Some(source) => current = source,
                None => break,
            }
        }

        current
    }

    pub fn message(&self) -> String {
        self.error().to_string()
    }

    pub fn is<E: Error + 'static>(&self) -> bool {
        self.error().is::<E>()
    }

    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.error().downcast_ref::<E>()
    }

    /// The error this one wraps, if any.
    pub fn inner(&self) -> Option<Exception> {
        self.error().source().map(|_| self.at(self.depth + 1))
    }

    /// The first level, starting with this one, whose error is an `E`.
    pub fn find<E: Error + 'static>(&self) -> Option<Exception> {
        source_chain(self.error())
            .position(|e| e.is::<E>())
            .map(|offset| self.at(self.depth + offset))
    }

    fn at(&self, depth: usize) -> Exception {
        Exception {
            root: self.root.clone(),
            depth,
        }
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.error(), f)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.error(), f)
    }
}

/// Assertions for closures implementing [`FnOnce() -> R`](std::ops::FnOnce) where `R` is an
/// [`Outcome`]. The action runs exactly once, when the assertion is evaluated.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
/// use std::num::ParseIntError;
///
/// // test the action returns without raising, then assert on its value
/// assert_that(|| "42".parse::<i32>()).does_not_throw().is_equal_to(Some(42));
///
/// // test the action raises a given error type, then assert on the error
/// assert_that(|| "x".parse::<i32>())
///     .throws_error::<ParseIntError>()
///     .with_message("invalid digit found in string")
///     .with_no_inner_exception();
///
/// // panics are captured as PanicError
/// assert_that(|| -> () {
///     panic!("this \t is\n the     message");
/// })
/// .throws_exactly::<PanicError>()
/// .with_message_matching("this is the m?ss*");
/// ```
pub trait ActionAssertions<V> {
    fn does_not_throw(self) -> Assertion<Option<V>>;
    /// Fails only if an `E` is anywhere in the raised error's source chain.
    fn does_not_throw_error<E: Error + 'static>(self) -> Assertion<Option<V>>;
    /// Fails only if the raised error itself is an `E`.
    fn does_not_throw_exactly<E: Error + 'static>(self) -> Assertion<Option<V>>;
    fn throws(self) -> Assertion<Option<Exception>>;
    /// Passes if an `E` is anywhere in the raised error's source chain, and continues with it.
    fn throws_error<E: Error + 'static>(self) -> Assertion<Option<Exception>>;
    /// Passes if the raised error itself is an `E`.
    fn throws_exactly<E: Error + 'static>(self) -> Assertion<Option<Exception>>;
}

impl<F, R> ActionAssertions<R::Value> for Assertion<F>
where
    F: FnOnce() -> R,
    R: Outcome,
{
    fn does_not_throw(self) -> Assertion<Option<R::Value>> {
        let outcome = self.map_subject(run_action);

        if let Err(e) = outcome.subject() {
            outcome.report(
                outcome
                    .failure("does_not_throw()")
                    .with_statement("expecting the action not to raise an error")
                    .with_message("but raised", e.to_string()),
            );
        }

        outcome.map_subject(Result::ok)
    }

    fn does_not_throw_error<E: Error + 'static>(self) -> Assertion<Option<R::Value>> {
        let outcome = self.map_subject(run_action);

        if let Err(e) = outcome.subject() {
            if source_chain(e.as_ref()).any(|e| e.is::<E>()) {
                outcome.report(
                    outcome
                        .failure("does_not_throw_error()")
                        .with_message("expecting the action not to raise an error of type", type_name::<E>())
                        .with_message("but raised", e.to_string()),
                );
            }
        }

        outcome.map_subject(Result::ok)
    }

    fn does_not_throw_exactly<E: Error + 'static>(self) -> Assertion<Option<R::Value>> {
        let outcome = self.map_subject(run_action);

        if let Err(e) = outcome.subject() {
            if e.is::<E>() {
                outcome.report(
                    outcome
                        .failure("does_not_throw_exactly()")
                        .with_message("expecting the action not to raise exactly", type_name::<E>())
                        .with_message("but raised", e.to_string()),
                );
            }
        }

        outcome.map_subject(Result::ok)
    }

    fn throws(self) -> Assertion<Option<Exception>> {
        let outcome = self.map_subject(run_action);

        if outcome.subject().is_ok() {
            outcome.report(
                outcome
                    .failure("throws()")
                    .with_statement("expecting the action to raise an error")
                    .but("nothing was raised"),
            );
        }

        outcome.map_subject(|r| r.err().map(Exception::new))
    }

    fn throws_error<E: Error + 'static>(self) -> Assertion<Option<Exception>> {
        let outcome = self.map_subject(|action| run_action(action).map_err(Exception::new));
        let matching = outcome.subject().as_ref().err().and_then(Exception::find::<E>);

        if matching.is_none() {
            outcome.report(unexpected_outcome(
                &outcome,
                "throws_error()",
                "expecting the action to raise an error of type",
                type_name::<E>(),
            ));
        }

        outcome.map_subject(|_| matching)
    }

    fn throws_exactly<E: Error + 'static>(self) -> Assertion<Option<Exception>> {
        let outcome = self.map_subject(|action| run_action(action).map_err(Exception::new));
        let exact = match outcome.subject() {
            Err(e) if e.is::<E>() => Some(e.clone()),
            _ => None,
        };

        if exact.is_none() {
            outcome.report(unexpected_outcome(
                &outcome,
                "throws_exactly()",
                "expecting the action to raise exactly",
                type_name::<E>(),
            ));
        }

        outcome.map_subject(|_| exact)
    }
}

fn unexpected_outcome<V>(
    outcome: &Assertion<Result<V, Exception>>,
    operation: &str,
    prompt: &str,
    expected_type: &str,
) -> crate::failure::AssertionFailure {
    let failure = outcome.failure(operation).with_message(prompt, expected_type);

    match outcome.subject() {
        Ok(_) => failure.but("nothing was raised"),
        Err(e) => failure.with_message("but raised", e.message()),
    }
}

/// Assertions on a captured [`Exception`]. On an absent subject, left by an earlier failed
/// expectation, every assertion fails with a message saying so and the chain goes on.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
/// use thiserror::Error;
///
/// #[derive(Debug, Error)]
/// #[error("loading failed")]
/// struct LoadError(#[source] std::io::Error);
///
/// assert_that(|| -> Result<(), LoadError> {
///     Err(LoadError(std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt")))
/// })
/// .throws_exactly::<LoadError>()
/// .with_message_containing("loading")
/// .with_inner_exception_of::<std::io::Error>()
/// .with_message("missing.txt")
/// .with_no_inner_exception();
/// ```
pub trait ExceptionAssertions: Sized {
    /// The error's `Display` text must equal `expected`.
    fn with_message<M: AsRef<str>>(self, expected: M) -> Self;
    fn with_message_containing<M: AsRef<str>>(self, fragment: M) -> Self;
    /// `*` matches any run of characters and `?` a single one; whitespace runs compare equal.
    fn with_message_matching<M: AsRef<str>>(self, pattern: M) -> Self;
    fn with_no_inner_exception(self) -> Self;
    /// Continues with the wrapped error, or with nothing if there is none.
    fn with_inner_exception(self) -> Assertion<Option<Exception>>;
    fn with_inner_exception_of<E: Error + 'static>(self) -> Assertion<Option<Exception>>;
    /// The error at this level must be an `E`.
    fn which_is<E: Error + 'static>(self) -> Self;
}

impl Assertion<Option<Exception>> {
    fn report_missing_exception(&self, operation: &str) {
        self.report(self.failure(operation).but("no exception was captured"));
    }

    fn check_message(self, operation: &str, prompt: &str, expected: &str, holds: impl FnOnce(&str) -> bool) -> Self {
        match self.subject() {
            None => self.report(self.failure(operation).with_value(prompt, expected).but("no exception was captured")),
            Some(exception) => {
                let message = exception.message();
                if !holds(&message) {
                    self.report(self.failure(operation).with_value(prompt, expected).but_was(&message));
                }
            },
        }

        self
    }
}

impl ExceptionAssertions for Assertion<Option<Exception>> {
    fn with_message<M: AsRef<str>>(self, expected: M) -> Self {
        let expected = expected.as_ref();

        self.check_message("with_message()", "expecting message", expected, |m| m == expected)
    }

    fn with_message_containing<M: AsRef<str>>(self, fragment: M) -> Self {
        let fragment = fragment.as_ref();

        self.check_message("with_message_containing()", "expecting message to contain", fragment, |m| {
            m.contains(fragment)
        })
    }

    fn with_message_matching<M: AsRef<str>>(self, pattern: M) -> Self {
        let pattern = pattern.as_ref();

        self.check_message("with_message_matching()", "expecting message matching pattern", pattern, |m| {
            glob_is_match(m, pattern)
        })
    }

    fn with_no_inner_exception(self) -> Self {
        match self.subject() {
            None => self.report_missing_exception("with_no_inner_exception()"),
            Some(exception) => {
                if let Some(inner) = exception.inner() {
                    self.report(
                        self.failure("with_no_inner_exception()")
                            .with_statement("expecting no inner exception")
                            .with_message("but found", inner.message()),
                    );
                }
            },
        }

        self
    }

    fn with_inner_exception(self) -> Assertion<Option<Exception>> {
        let inner = self.subject().as_ref().and_then(Exception::inner);

        match self.subject() {
            None => self.report_missing_exception("with_inner_exception()"),
            Some(exception) if inner.is_none() => self.report(
                self.failure("with_inner_exception()")
                    .with_statement("expecting an inner exception")
                    .with_message("but none is wrapped by", exception.message()),
            ),
            Some(_) => {},
        }

        self.derive("with_inner_exception()", inner)
    }

    fn with_inner_exception_of<E: Error + 'static>(self) -> Assertion<Option<Exception>> {
        let inner = self.subject().as_ref().and_then(Exception::inner);
        let matching = inner.clone().filter(Exception::is::<E>);

        match (self.subject(), &inner) {
            (None, _) => self.report_missing_exception("with_inner_exception_of()"),
            (Some(exception), None) => self.report(
                self.failure("with_inner_exception_of()")
                    .with_message("expecting an inner exception of type", type_name::<E>())
                    .with_message("but none is wrapped by", exception.message()),
            ),
            (Some(_), Some(other)) if matching.is_none() => self.report(
                self.failure("with_inner_exception_of()")
                    .with_message("expecting an inner exception of type", type_name::<E>())
                    .with_message("but found", other.message()),
            ),
            _ => {},
        }

        self.derive("with_inner_exception_of()", matching)
    }

    fn which_is<E: Error + 'static>(self) -> Self {
        match self.subject() {
            None => self.report_missing_exception("which_is()"),
            Some(exception) => {
                if !exception.is::<E>() {
                    self.report(
                        self.failure("which_is()")
                            .with_message("expecting exception of type", type_name::<E>())
                            .with_message("but was", exception.message()),
                    );
                }
            },
        }

        self
    }
}
