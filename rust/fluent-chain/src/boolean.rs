use crate::assertion::Assertion;
use std::borrow::Borrow;

/// Assertions for types implementing [`Borrow`](std::borrow::Borrow)<[`bool`]>.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// // test subject to be true
/// assert_that(true).is_true();
///
/// // or false
/// assert_that(&false).is_false();
/// ```
pub trait BooleanAssertions {
    fn is_true(self) -> Self;
    fn is_false(self) -> Self;
}

impl<T: Borrow<bool>> BooleanAssertions for Assertion<T> {
    fn is_true(self) -> Self {
        if !Borrow::<bool>::borrow(self.subject()) {
            self.report(self.failure("is_true()").expected(true).but_was(false));
        }

        self
    }

    fn is_false(self) -> Self {
        if *Borrow::<bool>::borrow(self.subject()) {
            self.report(self.failure("is_false()").expected(false).but_was(true));
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    pub fn is_true_passes_for_true() {
        assert_that(true).is_true();
    }

    #[test]
    pub fn is_true_works_for_borrowed_forms() {
        assert_that(&true).is_true();
        assert_that(&mut true).is_true();
    }

    #[test]
    pub fn is_true_fails_for_false() {
        should_fail_with_message!(assert_that(false).is_true(), "expected: true*but was: false");
    }

    #[test]
    pub fn is_false_passes_for_false() {
        assert_that(false).is_false();
    }

    #[test]
    pub fn is_false_fails_for_true() {
        should_fail_with_message!(assert_that(true).is_false(), "expected: false*but was: true");
    }
}
