use crate::{assertion::Assertion, error::UsageError, failure::DebugMessage};
use num::{Float, Zero};
use std::{borrow::Borrow, cmp::PartialOrd, fmt::Debug, ops::Sub};

/// Assertions for types implementing [`PartialOrd`](std::cmp::PartialOrd). Incomparable
/// values, such as NaN, fail every comparison.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// // test subject < target value
/// assert_that(1).is_less_than(2);
///
/// // test subject <= target value
/// assert_that("One").is_less_than_or_equal_to("Two");
///
/// // test subject > target value
/// assert_that(5f32).is_greater_than(3f32);
///
/// // test subject >= target value
/// assert_that(33u8).is_greater_than_or_equal_to(&33u8);
///
/// // test subject in [min, max]
/// assert_that(10).is_in_range(1, 10).is_not_in_range(11, 20);
/// ```
pub trait OrderedAssertions<T>: Sized
where T: PartialOrd
{
    fn is_less_than<E: Borrow<T>>(self, other: E) -> Self;
    fn is_less_than_or_equal_to<E: Borrow<T>>(self, other: E) -> Self;
    fn is_greater_than<E: Borrow<T>>(self, other: E) -> Self;
    fn is_greater_than_or_equal_to<E: Borrow<T>>(self, other: E) -> Self;

    /// Panics with [`UsageError::InvalidRange`] unless `max > min`, whatever the subject.
    fn is_in_range<E: Borrow<T>>(self, min: E, max: E) -> Self {
        self.try_is_in_range(min, max).unwrap_or_else(|e| e.raise())
    }

    /// Panics with [`UsageError::InvalidRange`] unless `max > min`, whatever the subject.
    fn is_not_in_range<E: Borrow<T>>(self, min: E, max: E) -> Self {
        self.try_is_not_in_range(min, max).unwrap_or_else(|e| e.raise())
    }

    fn try_is_in_range<E: Borrow<T>>(self, min: E, max: E) -> Result<Self, UsageError>;
    fn try_is_not_in_range<E: Borrow<T>>(self, min: E, max: E) -> Result<Self, UsageError>;
}

fn check_range<T: PartialOrd + Debug>(min: &T, max: &T) -> Result<(), UsageError> {
    if max > min {
        Ok(())
    } else {
        Err(UsageError::InvalidRange {
            min: min.debug_message(),
            max: max.debug_message(),
        })
    }
}

impl<T> Assertion<T>
where T: PartialOrd + Debug
{
    fn compare(self, operation: &str, relation: &str, other: &T, holds: bool) -> Self {
        if !holds {
            self.report(
                self.failure(operation)
                    .with_value(&format!("expecting subject to be {}", relation), other)
                    .but_was(self.subject()),
            );
        }

        self
    }
}

impl<T> OrderedAssertions<T> for Assertion<T>
where T: PartialOrd + Debug
{
    fn is_less_than<E: Borrow<T>>(self, other: E) -> Self {
        let other = other.borrow();
        let holds = self.subject() < other;

        self.compare("is_less_than()", "less than", other, holds)
    }

    fn is_less_than_or_equal_to<E: Borrow<T>>(self, other: E) -> Self {
        let other = other.borrow();
        let holds = self.subject() <= other;

        self.compare("is_less_than_or_equal_to()", "less than or equal to", other, holds)
    }

    fn is_greater_than<E: Borrow<T>>(self, other: E) -> Self {
        let other = other.borrow();
        let holds = self.subject() > other;

        self.compare("is_greater_than()", "greater than", other, holds)
    }

    fn is_greater_than_or_equal_to<E: Borrow<T>>(self, other: E) -> Self {
        let other = other.borrow();
        let holds = self.subject() >= other;

        self.compare("is_greater_than_or_equal_to()", "greater than or equal to", other, holds)
    }

    fn try_is_in_range<E: Borrow<T>>(self, min: E, max: E) -> Result<Self, UsageError> {
        let (min, max) = (min.borrow(), max.borrow());
        check_range(min, max)?;

        let subject = self.subject();
        if !(subject >= min && subject <= max) {
            self.report(
                self.failure("is_in_range()")
                    .with_message("expecting subject to be in range", format!("[{:?}, {:?}]", min, max))
                    .but_was(subject),
            );
        }

        Ok(self)
    }

    fn try_is_not_in_range<E: Borrow<T>>(self, min: E, max: E) -> Result<Self, UsageError> {
        let (min, max) = (min.borrow(), max.borrow());
        check_range(min, max)?;

        let subject = self.subject();
        if subject >= min && subject <= max {
            self.report(
                self.failure("is_not_in_range()")
                    .with_message("expecting subject not to be in range", format!("[{:?}, {:?}]", min, max))
                    .but_was(subject),
            );
        }

        Ok(self)
    }
}

/// Sign and closeness assertions for numbers.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// assert_that(0u8).is_zero().is_positive_or_zero().is_negative_or_zero();
/// assert_that(-3).is_negative().is_not_zero();
/// assert_that(10u32).is_approximately(12, 2).is_not_approximately(13, 2);
/// assert_that(2.0f64).is_approximately(2.005, 0.01);
/// ```
pub trait SignAssertions<T> {
    fn is_zero(self) -> Self;
    fn is_not_zero(self) -> Self;
    fn is_positive(self) -> Self;
    fn is_positive_or_zero(self) -> Self;
    fn is_negative(self) -> Self;
    fn is_negative_or_zero(self) -> Self;

    /// Passes when `other - margin <= subject <= other + margin`. A negative margin panics
    /// with [`UsageError::NegativeMargin`].
    fn is_approximately(self, other: T, margin: T) -> Self
    where T: Sub<Output = T> + Copy;
    fn is_not_approximately(self, other: T, margin: T) -> Self
    where T: Sub<Output = T> + Copy;
}

/// `other - margin <= subject <= other + margin`, evaluated without overflow: the smaller
/// value is only subtracted from the larger when both share a sign, otherwise the margin is
/// taken off the non-negative side. Equal values are always within, infinities included.
fn is_within<T>(subject: T, other: T, margin: T) -> bool
where T: Zero + PartialOrd + Sub<Output = T> + Copy + Debug {
    if margin < T::zero() {
        UsageError::NegativeMargin(margin.debug_message()).raise();
    }

    if subject == other {
        return true;
    }

    let (high, low) = if subject >= other { (subject, other) } else { (other, subject) };

    if low < T::zero() && high >= T::zero() {
        high - margin <= low
    } else {
        high - low <= margin
    }
}

impl<T> Assertion<T>
where T: Zero + PartialOrd + Debug
{
    fn check_sign(self, operation: &str, expectation: &str, holds: bool) -> Self {
        if !holds {
            self.report(
                self.failure(operation)
                    .expecting(format!("subject to be {}", expectation))
                    .but_was(self.subject()),
            );
        }

        self
    }
}

impl<T> SignAssertions<T> for Assertion<T>
where T: Zero + PartialOrd + Debug
{
    fn is_zero(self) -> Self {
        let holds = self.subject().is_zero();
        self.check_sign("is_zero()", "zero", holds)
    }

    fn is_not_zero(self) -> Self {
        let holds = !self.subject().is_zero();
        self.check_sign("is_not_zero()", "not zero", holds)
    }

    fn is_positive(self) -> Self {
        let holds = *self.subject() > T::zero();
        self.check_sign("is_positive()", "positive", holds)
    }

    fn is_positive_or_zero(self) -> Self {
        let holds = *self.subject() >= T::zero();
        self.check_sign("is_positive_or_zero()", "positive or zero", holds)
    }

    fn is_negative(self) -> Self {
        let holds = *self.subject() < T::zero();
        self.check_sign("is_negative()", "negative", holds)
    }

    fn is_negative_or_zero(self) -> Self {
        let holds = *self.subject() <= T::zero();
        self.check_sign("is_negative_or_zero()", "negative or zero", holds)
    }

    fn is_approximately(self, other: T, margin: T) -> Self
    where T: Sub<Output = T> + Copy {
        if !is_within(*self.subject(), other, margin) {
            self.report(
                self.failure("is_approximately()")
                    .with_message(
                        "expecting subject to be approximately",
                        format!("{:?} +/- {:?}", other, margin),
                    )
                    .but_was(self.subject()),
            );
        }

        self
    }

    fn is_not_approximately(self, other: T, margin: T) -> Self
    where T: Sub<Output = T> + Copy {
        if is_within(*self.subject(), other, margin) {
            self.report(
                self.failure("is_not_approximately()")
                    .with_message(
                        "expecting subject not to be approximately",
                        format!("{:?} +/- {:?}", other, margin),
                    )
                    .but_was(self.subject()),
            );
        }

        self
    }
}

/// Assertions for types implementing [`Float`](num::Float).
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// assert_that(1.5f64).is_finite().is_not_nan().is_not_infinity();
/// assert_that(f32::NEG_INFINITY).is_infinity().is_negative_infinity().is_not_positive_infinity();
/// assert_that(f64::NAN).is_nan().is_not_finite();
/// ```
pub trait FloatAssertions {
    fn is_finite(self) -> Self;
    fn is_not_finite(self) -> Self;
    fn is_infinity(self) -> Self;
    fn is_not_infinity(self) -> Self;
    fn is_negative_infinity(self) -> Self;
    fn is_not_negative_infinity(self) -> Self;
    fn is_positive_infinity(self) -> Self;
    fn is_not_positive_infinity(self) -> Self;
    fn is_nan(self) -> Self;
    fn is_not_nan(self) -> Self;
}

impl<T: Float + Debug> Assertion<T> {
    fn classify(self, operation: &str, expectation: &str, holds: bool) -> Self {
        if !holds {
            self.report(
                self.failure(operation)
                    .expecting(format!("subject to be {}", expectation))
                    .but_was(self.subject()),
            );
        }

        self
    }
}

impl<T: Float + Debug> FloatAssertions for Assertion<T> {
    fn is_finite(self) -> Self {
        let holds = self.subject().is_finite();
        self.classify("is_finite()", "finite", holds)
    }

    fn is_not_finite(self) -> Self {
        let holds = !self.subject().is_finite();
        self.classify("is_not_finite()", "not finite", holds)
    }

    fn is_infinity(self) -> Self {
        let holds = self.subject().is_infinite();
        self.classify("is_infinity()", "infinity", holds)
    }

    fn is_not_infinity(self) -> Self {
        let holds = !self.subject().is_infinite();
        self.classify("is_not_infinity()", "not infinity", holds)
    }

    fn is_negative_infinity(self) -> Self {
        let holds = *self.subject() == T::neg_infinity();
        self.classify("is_negative_infinity()", "negative infinity", holds)
    }

    fn is_not_negative_infinity(self) -> Self {
        let holds = *self.subject() != T::neg_infinity();
        self.classify("is_not_negative_infinity()", "not negative infinity", holds)
    }

    fn is_positive_infinity(self) -> Self {
        let holds = *self.subject() == T::infinity();
        self.classify("is_positive_infinity()", "positive infinity", holds)
    }

    fn is_not_positive_infinity(self) -> Self {
        let holds = *self.subject() != T::infinity();
        self.classify("is_not_positive_infinity()", "not positive infinity", holds)
    }

    fn is_nan(self) -> Self {
        let holds = self.subject().is_nan();
        self.classify("is_nan()", "NaN", holds)
    }

    fn is_not_nan(self) -> Self {
        let holds = !self.subject().is_nan();
        self.classify("is_not_nan()", "not NaN", holds)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::rc::Rc;

    #[test]
    fn ordering_allows_borrowed_forms() {
        assert_that(1).is_less_than(2).is_less_than(&2).is_less_than(&mut 2);
    }

    #[test]
    fn is_greater_than_passes_and_fails() {
        assert_that(20.0).is_greater_than(10.0);
        should_fail_with_message!(
            assert_that(15.0).is_greater_than(15.0),
            "is_greater_than() expectation failed expecting subject to be greater than: 15.0 but was: 15.0"
        );
    }

    #[test]
    fn is_less_than_or_equal_to_fails_for_greater_values() {
        should_fail_with_message!(assert_that(3).is_less_than_or_equal_to(2), "less than or equal to: 2 but was: 3");
    }

    #[test]
    fn nan_fails_every_comparison() {
        let handler = Rc::new(CollectingHandler::new());

        f64::NAN
            .assert_with(handler.clone())
            .is_less_than(1.0)
            .is_greater_than(1.0)
            .is_greater_than_or_equal_to(f64::NAN)
            .is_less_than_or_equal_to(f64::NAN);

        assert_eq!(handler.len(), 4);
    }

    #[test]
    fn is_in_range_is_inclusive() {
        assert_that(1).is_in_range(1, 3).is_in_range(0, 1);
        should_fail_with_message!(assert_that(4).is_in_range(1, 3), "expecting subject to be in range: [1, 3] but was: 4");
        should_fail_with_message!(assert_that(3).is_not_in_range(1, 3), "not to be in range: [1, 3]");
    }

    #[test]
    fn inverted_range_is_a_usage_error_for_every_subject() {
        for subject in [-100, 8, 9, 10, 100] {
            should_fail_with_message!(
                assert_that(subject).is_in_range(10, 8),
                "Invalid range: max <8> must be greater than min <10>."
            );
            should_fail_with_message!(
                assert_that(subject).is_not_in_range(10, 8),
                "Invalid range: max <8> must be greater than min <10>."
            );
        }
    }

    #[test]
    fn usage_error_bypasses_a_collecting_handler() {
        let handler = Rc::new(CollectingHandler::new());

        should_fail_with_message!(5i32.assert_with(handler.clone()).is_in_range(3, 3), "Invalid range");
        assert!(handler.is_empty());
    }

    #[test]
    fn try_is_in_range_returns_usage_errors() {
        let error = assert_that(5).try_is_in_range(10, 8).err();

        assert_eq!(
            error,
            Some(UsageError::InvalidRange {
                min: "10".to_owned(),
                max: "8".to_owned(),
            })
        );
        assert!(assert_that(5).try_is_not_in_range(6, 8).is_ok());
    }

    #[test]
    fn sign_assertions() {
        assert_that(0).is_zero().is_positive_or_zero().is_negative_or_zero();
        assert_that(2.5).is_positive().is_not_zero();
        should_fail_with_message!(assert_that(0).is_positive(), "expecting: subject to be positive but was: 0");
        should_fail_with_message!(assert_that(-1).is_positive_or_zero(), "positive or zero but was: -1");
        should_fail_with_message!(assert_that(1u8).is_negative(), "negative but was: 1");
    }

    #[test]
    fn approximately_uses_an_inclusive_margin() {
        assert_that(10).is_approximately(8, 2).is_approximately(12, 2);
        assert_that(10).is_not_approximately(7, 2);
        should_fail_with_message!(
            assert_that(10).is_approximately(13, 2),
            "expecting subject to be approximately: 13 +/- 2 but was: 10"
        );
    }

    #[test]
    fn approximately_does_not_underflow_unsigned() {
        assert_that(0u8).is_approximately(255, 255).is_not_approximately(255, 254);
    }

    #[test]
    fn approximately_does_not_overflow_signed_extremes() {
        let handler = Rc::new(CollectingHandler::new());

        100i8
            .assert_with(handler.clone())
            .is_approximately(-100, 10)
            .is_not_approximately(-100, 127)
            .is_approximately(-100, 127);
        i32::MAX.assert_with(handler.clone()).is_approximately(i32::MIN, i32::MAX);
        (-1i8).assert_with(handler.clone()).is_approximately(126, 127).is_not_approximately(126, 126);

        assert_eq!(handler.len(), 3);
        assert!(handler.failures()[0].contains("expecting subject to be approximately:\n  -100 +/- 10"));
    }

    #[test]
    fn approximately_accepts_equal_infinities() {
        assert_that(f64::INFINITY)
            .is_approximately(f64::INFINITY, 1.0)
            .is_not_approximately(f64::NEG_INFINITY, 1.0)
            .is_not_approximately(1.0, 1e300);
        assert_that(f32::NEG_INFINITY).is_approximately(f32::NEG_INFINITY, 0.0);
        should_fail_with_message!(assert_that(f64::NAN).is_approximately(f64::NAN, 1.0), "but was: NaN");
    }

    #[test]
    fn negative_margin_is_a_usage_error() {
        should_fail_with_message!(assert_that(1).is_approximately(1, -1), "Margin <-1> must not be negative.");
    }

    #[test]
    fn float_classification() {
        assert_that(f64::INFINITY).is_infinity().is_positive_infinity().is_not_negative_infinity();
        should_fail_with_message!(assert_that(1.0f32).is_nan(), "expecting: subject to be NaN but was: 1.0");
        should_fail_with_message!(assert_that(f64::NAN).is_finite(), "subject to be finite but was: NaN");
        should_fail_with_message!(
            assert_that(f64::NEG_INFINITY).is_not_infinity(),
            "subject to be not infinity but was: -inf"
        );
    }
}
