use crate::{
    assertion::Assertion,
    error::UsageError,
    failure::{glob_is_full_match, AssertionFailure},
};
use regex::Regex;
use std::{borrow::Cow, rc::Rc, sync::Arc};

/// String-like subjects. `None` is the absent string.
pub trait Text {
    fn text(&self) -> Option<&str>;
}

impl Text for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl Text for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl Text for Cow<'_, str> {
    fn text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl Text for Box<str> {
    fn text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl Text for Rc<str> {
    fn text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl Text for Arc<str> {
    fn text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

impl<T: Text + ?Sized> Text for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }
}

impl<T: Text> Text for Option<T> {
    fn text(&self) -> Option<&str> {
        self.as_ref().and_then(Text::text)
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        UsageError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: e.to_string(),
        }
        .raise()
    })
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Assertions for subjects implementing [`Text`]: `str`, `String`, `Cow<str>`, boxed and shared
/// strings, references to them and `Option`s of them.
///
/// Expectations about what the text holds fail on an absent subject; expectations about what
/// it does not hold pass.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// assert_that("Hello World")
///     .starts_with("Hello")
///     .ends_with_ignoring_case("WORLD")
///     .contains("lo W")
///     .does_not_contain("bye")
///     .contains_pattern("^H.*d$")
///     .matches_glob("H*W?rld")
///     .has_size(11);
///
/// assert_that(None::<String>).is_null_or_empty().does_not_contain("x");
/// assert_that(" \t").is_null_or_whitespace();
/// ```
pub trait TextAssertions {
    fn is_equal_to_ignoring_case<E: AsRef<str>>(self, expected: E) -> Self;
    fn contains<E: AsRef<str>>(self, expected: E) -> Self;
    fn does_not_contain<E: AsRef<str>>(self, unexpected: E) -> Self;
    fn contains_ignoring_case<E: AsRef<str>>(self, expected: E) -> Self;
    fn does_not_contain_ignoring_case<E: AsRef<str>>(self, unexpected: E) -> Self;
    fn starts_with<E: AsRef<str>>(self, prefix: E) -> Self;
    fn does_not_start_with<E: AsRef<str>>(self, prefix: E) -> Self;
    fn starts_with_ignoring_case<E: AsRef<str>>(self, prefix: E) -> Self;
    fn ends_with<E: AsRef<str>>(self, suffix: E) -> Self;
    fn does_not_end_with<E: AsRef<str>>(self, suffix: E) -> Self;
    fn ends_with_ignoring_case<E: AsRef<str>>(self, suffix: E) -> Self;
    /// Panics with [`UsageError::InvalidPattern`] if `pattern` is not a valid regular expression.
    fn contains_pattern<E: AsRef<str>>(self, pattern: E) -> Self;
    fn does_not_contain_pattern<E: AsRef<str>>(self, pattern: E) -> Self;
    /// `*` matches any run of characters, `?` a single one, and whitespace runs compare equal.
    fn matches_glob<E: AsRef<str>>(self, pattern: E) -> Self;
    fn is_empty(self) -> Self;
    fn is_not_empty(self) -> Self;
    fn is_null_or_empty(self) -> Self;
    fn is_not_null_or_empty(self) -> Self;
    fn is_null_or_whitespace(self) -> Self;
    /// Sizes count characters, not bytes.
    fn has_size(self, size: usize) -> Self;
    fn has_at_least_size(self, size: usize) -> Self;
    fn has_at_most_size(self, size: usize) -> Self;
}

impl<S: Text> Assertion<S> {
    fn text_failure(&self, operation: &str, prompt: &str, value: &str) -> AssertionFailure {
        self.failure(operation).with_value(prompt, value)
    }

    /// Reports `operation` against an absent subject.
    fn report_null_text(&self, operation: &str, prompt: &str, value: &str) {
        self.report(self.text_failure(operation, prompt, value).with_null("but was"));
    }

    /// Evaluates a positive expectation: absent text fails, otherwise `holds` decides.
    fn expect_text<F>(self, operation: &str, prompt: &str, value: &str, holds: F) -> Self
    where F: FnOnce(&str) -> bool {
        match self.subject().text() {
            None => self.report_null_text(operation, prompt, value),
            Some(text) => {
                if !holds(text) {
                    self.report(self.text_failure(operation, prompt, value).but_was(text));
                }
            },
        }

        self
    }

    /// Evaluates a negative expectation: absent text passes.
    fn reject_text<F>(self, operation: &str, prompt: &str, value: &str, violated: F) -> Self
    where F: FnOnce(&str) -> bool {
        if let Some(text) = self.subject().text() {
            if violated(text) {
                self.report(self.text_failure(operation, prompt, value).but_was(text));
            }
        }

        self
    }

    fn expect_text_size<F>(self, operation: &str, expectation: String, holds: F) -> Self
    where F: FnOnce(usize) -> bool {
        match self.subject().text() {
            None => self.report(self.failure(operation).expecting(expectation).with_null("but was")),
            Some(text) => {
                let size = char_count(text);
                if !holds(size) {
                    self.report(
                        self.failure(operation)
                            .expecting(expectation)
                            .with_message("but was", format!("{:?} of size {}", text, size)),
                    );
                }
            },
        }

        self
    }
}

impl<S: Text> TextAssertions for Assertion<S> {
    fn is_equal_to_ignoring_case<E: AsRef<str>>(self, expected: E) -> Self {
        let expected = expected.as_ref();

        self.expect_text(
            "is_equal_to_ignoring_case()",
            "expecting subject to be equal, ignoring case, to",
            expected,
            |text| text.to_lowercase() == expected.to_lowercase(),
        )
    }

    fn contains<E: AsRef<str>>(self, expected: E) -> Self {
        let expected = expected.as_ref();

        self.expect_text("contains()", "expecting subject to contain", expected, |text| {
            text.contains(expected)
        })
    }

    fn does_not_contain<E: AsRef<str>>(self, unexpected: E) -> Self {
        let unexpected = unexpected.as_ref();

        self.reject_text("does_not_contain()", "expecting subject not to contain", unexpected, |text| {
            text.contains(unexpected)
        })
    }

    fn contains_ignoring_case<E: AsRef<str>>(self, expected: E) -> Self {
        let expected = expected.as_ref();

        self.expect_text(
            "contains_ignoring_case()",
            "expecting subject to contain, ignoring case",
            expected,
            |text| text.to_lowercase().contains(&expected.to_lowercase()),
        )
    }

    fn does_not_contain_ignoring_case<E: AsRef<str>>(self, unexpected: E) -> Self {
        let unexpected = unexpected.as_ref();

        self.reject_text(
            "does_not_contain_ignoring_case()",
            "expecting subject not to contain, ignoring case",
            unexpected,
            |text| text.to_lowercase().contains(&unexpected.to_lowercase()),
        )
    }

    fn starts_with<E: AsRef<str>>(self, prefix: E) -> Self {
        let prefix = prefix.as_ref();

        self.expect_text("starts_with()", "expecting subject to start with", prefix, |text| {
            text.starts_with(prefix)
        })
    }

    fn does_not_start_with<E: AsRef<str>>(self, prefix: E) -> Self {
        let prefix = prefix.as_ref();

        self.reject_text("does_not_start_with()", "expecting subject not to start with", prefix, |text| {
            text.starts_with(prefix)
        })
    }

    fn starts_with_ignoring_case<E: AsRef<str>>(self, prefix: E) -> Self {
        let prefix = prefix.as_ref();

        self.expect_text(
            "starts_with_ignoring_case()",
            "expecting subject to start, ignoring case, with",
            prefix,
            |text| text.to_lowercase().starts_with(&prefix.to_lowercase()),
        )
    }

    fn ends_with<E: AsRef<str>>(self, suffix: E) -> Self {
        let suffix = suffix.as_ref();

        self.expect_text("ends_with()", "expecting subject to end with", suffix, |text| {
            text.ends_with(suffix)
        })
    }

    fn does_not_end_with<E: AsRef<str>>(self, suffix: E) -> Self {
        let suffix = suffix.as_ref();

        self.reject_text("does_not_end_with()", "expecting subject not to end with", suffix, |text| {
            text.ends_with(suffix)
        })
    }

    fn ends_with_ignoring_case<E: AsRef<str>>(self, suffix: E) -> Self {
        let suffix = suffix.as_ref();

        self.expect_text(
            "ends_with_ignoring_case()",
            "expecting subject to end, ignoring case, with",
            suffix,
            |text| text.to_lowercase().ends_with(&suffix.to_lowercase()),
        )
    }

    fn contains_pattern<E: AsRef<str>>(self, pattern: E) -> Self {
        let pattern = pattern.as_ref();
        let regex = compile(pattern);

        self.expect_text(
            "contains_pattern()",
            "expecting subject to contain a match for",
            pattern,
            |text| regex.is_match(text),
        )
    }

    fn does_not_contain_pattern<E: AsRef<str>>(self, pattern: E) -> Self {
        let pattern = pattern.as_ref();
        let regex = compile(pattern);

        self.reject_text(
            "does_not_contain_pattern()",
            "expecting subject not to contain a match for",
            pattern,
            |text| regex.is_match(text),
        )
    }

    fn matches_glob<E: AsRef<str>>(self, pattern: E) -> Self {
        let pattern = pattern.as_ref();

        self.expect_text("matches_glob()", "expecting subject to match", pattern, |text| {
            glob_is_full_match(text, pattern)
        })
    }

    fn is_empty(self) -> Self {
        match self.subject().text() {
            None => self.report(
                self.failure("is_empty()")
                    .with_statement("expecting subject to be empty")
                    .with_null("but was"),
            ),
            Some(text) if !text.is_empty() => self.report(
                self.failure("is_empty()")
                    .with_statement("expecting subject to be empty")
                    .but_was(text),
            ),
            Some(_) => {},
        }

        self
    }

    fn is_not_empty(self) -> Self {
        match self.subject().text() {
            None => self.report(
                self.failure("is_not_empty()")
                    .with_statement("expecting subject not to be empty")
                    .with_null("but was"),
            ),
            Some("") => self.report(
                self.failure("is_not_empty()")
                    .with_statement("expecting subject not to be empty")
                    .but_was(""),
            ),
            Some(_) => {},
        }

        self
    }

    fn is_null_or_empty(self) -> Self {
        if let Some(text) = self.subject().text().filter(|t| !t.is_empty()) {
            self.report(
                self.failure("is_null_or_empty()")
                    .with_statement("expecting subject to be null or empty")
                    .but_was(text),
            );
        }

        self
    }

    fn is_not_null_or_empty(self) -> Self {
        match self.subject().text() {
            None => self.report(
                self.failure("is_not_null_or_empty()")
                    .with_statement("expecting subject not to be null or empty")
                    .with_null("but was"),
            ),
            Some("") => self.report(
                self.failure("is_not_null_or_empty()")
                    .with_statement("expecting subject not to be null or empty")
                    .but_was(""),
            ),
            Some(_) => {},
        }

        self
    }

    fn is_null_or_whitespace(self) -> Self {
        if let Some(text) = self.subject().text().filter(|t| !t.trim().is_empty()) {
            self.report(
                self.failure("is_null_or_whitespace()")
                    .with_statement("expecting subject to be null, empty or whitespace")
                    .but_was(text),
            );
        }

        self
    }

    fn has_size(self, size: usize) -> Self {
        self.expect_text_size("has_size()", format!("subject to have size {}", size), |n| n == size)
    }

    fn has_at_least_size(self, size: usize) -> Self {
        self.expect_text_size("has_at_least_size()", format!("subject to have at least size {}", size), |n| {
            n >= size
        })
    }

    fn has_at_most_size(self, size: usize) -> Self {
        self.expect_text_size("has_at_most_size()", format!("subject to have at most size {}", size), |n| {
            n <= size
        })
    }
}
