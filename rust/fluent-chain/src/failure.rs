//! Composition of assertion failure messages.
//!
//! Every assertion that does not hold builds one [`AssertionFailure`], appends the facts
//! describing the mismatch in the order they should be read, and hands the finished text to
//! the chain's [`FailureHandler`](crate::FailureHandler).
use crate::error::UsageError;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::{escape, Regex};
use std::fmt::Debug;

/// Rendering of an absent value. Real string data is rendered quoted, so `"null"` and
/// `<null>` can never be confused.
pub const NULL_MARKER: &str = "<null>";

const INDENT: &str = "  ";

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new("(?s)\\s+").expect("whitespace pattern is valid");
}

/// Display form used in failure messages.
pub trait DebugMessage {
    fn debug_message(&self) -> String;
}

impl<T: Debug + ?Sized> DebugMessage for T {
    fn debug_message(&self) -> String {
        format!("{:?}", self)
    }
}

/// Renders each item with its `Debug` form inside brackets, e.g. `[1, 2, 3]`.
pub fn render_sequence<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Debug,
{
    format!("[{}]", items.into_iter().map(|item| item.debug_message()).join(", "))
}

/// Renders `Some(v)` as `v` and `None` as [`NULL_MARKER`].
pub fn render_option<T: Debug>(value: Option<T>) -> String {
    match value {
        Some(v) => v.debug_message(),
        None => NULL_MARKER.to_owned(),
    }
}

/// A helper class to generate consistent assertion failure messages.
///
/// ```
/// use fluent_chain::failure::AssertionFailure;
///
/// let message = AssertionFailure::new("assert_that().contains()")
///     .with_custom_message(Some("inventory check"))
///     .with_sequence("expecting subject to contain", [1, 2, 4])
///     .with_sequence("but misses", [4])
///     .finish();
///
/// assert_eq!(
///     message,
///     "[inventory check]\nassert_that().contains() expectation failed\n\
///      expecting subject to contain:\n  [1, 2, 4]\nbut misses:\n  [4]"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct AssertionFailure {
    custom_message: Option<String>,
    header: String,
    facts: Vec<String>,
}

impl AssertionFailure {
    pub fn new(operation: impl AsRef<str>) -> Self {
        AssertionFailure {
            custom_message: None,
            header: format!("{} expectation failed", operation.as_ref()),
            facts: vec![],
        }
    }

    /// User supplied context, rendered ahead of everything else. `None` adds nothing.
    pub fn with_custom_message(mut self, message: Option<&str>) -> Self {
        if let Some(m) = message {
            self.custom_message = Some(format!("[{}]", m));
        }
        self
    }

    pub fn with_message(mut self, prompt: &str, message: impl AsRef<str>) -> Self {
        self.facts.push(format!("{}:\n{}{}", prompt, INDENT, message.as_ref()));
        self
    }

    pub fn with_statement(mut self, statement: impl AsRef<str>) -> Self {
        self.facts.push(statement.as_ref().to_owned());
        self
    }

    pub fn with_value<T: Debug + ?Sized>(self, prompt: &str, value: &T) -> Self {
        self.with_message(prompt, value.debug_message())
    }

    pub fn with_sequence<I>(self, prompt: &str, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Debug,
    {
        self.with_message(prompt, render_sequence(items))
    }

    pub fn with_null(self, prompt: &str) -> Self {
        self.with_message(prompt, NULL_MARKER)
    }

    pub fn expected<T: Debug>(self, expected: T) -> Self {
        self.with_message("expected", expected.debug_message())
    }

    pub fn expecting(self, expecting: impl AsRef<str>) -> Self {
        self.with_message("expecting", expecting.as_ref())
    }

    pub fn but(self, but: impl AsRef<str>) -> Self {
        self.with_message("but", but.as_ref())
    }

    pub fn but_was<T: Debug>(self, actual: T) -> Self {
        self.with_message("but was", actual.debug_message())
    }

    pub fn subject<T: Debug>(self, value: T) -> Self {
        self.with_message("subject", value.debug_message())
    }

    pub fn finish(self) -> String {
        self.custom_message
            .into_iter()
            .chain(std::iter::once(self.header))
            .chain(self.facts)
            .join("\n")
    }
}

pub(crate) fn normalize_whitespace(input: &str) -> String {
    WHITESPACE.replace_all(input, " ").trim().to_string()
}

/// `*` matches any run of characters and `?` a single one; runs of whitespace are collapsed on
/// both sides before matching. The pattern may match anywhere in the text.
pub(crate) fn glob_is_match(text: &str, pattern: &str) -> bool {
    glob_match(text, pattern, false)
}

/// Like [`glob_is_match`], but the pattern has to cover the whole text.
pub(crate) fn glob_is_full_match(text: &str, pattern: &str) -> bool {
    glob_match(text, pattern, true)
}

fn glob_match(text: &str, pattern: &str, whole: bool) -> bool {
    let reg_pattern = normalize_whitespace(&escape(pattern).replace("\\*", ".*").replace("\\?", "."));
    let reg_pattern = if whole {
        format!("(?s)^{}$", reg_pattern)
    } else {
        format!("(?s){}", reg_pattern)
    };

    match Regex::new(&reg_pattern) {
        Ok(regex) => regex.is_match(&normalize_whitespace(text)),
        Err(e) => UsageError::InvalidPattern {
            pattern: pattern.to_owned(),
            reason: e.to_string(),
        }
        .raise(),
    }
}

#[macro_export]
/// Convenient macro to assert that the specified expression, when evaluated under the
/// default panicking handler, fails with a message matching the glob `message`.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// should_fail_with_message!(assert_that(3).is_greater_than(5), "greater than*5*but was*3");
/// ```
macro_rules! should_fail_with_message {
    ($expression:expr, $message:expr) => {{
        use $crate::{ActionAssertions, ExceptionAssertions};
        $crate::assert_that(|| {
            let _ = $expression;
        })
        .throws_exactly::<$crate::PanicError>()
        .with_message_matching($message);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facts_are_rendered_in_append_order() {
        let message = AssertionFailure::new("assert_that().is_equal_to()")
            .expected(4)
            .but_was(3)
            .with_statement("values differ")
            .finish();

        assert_eq!(
            message,
            "assert_that().is_equal_to() expectation failed\nexpected:\n  4\nbut was:\n  3\nvalues differ"
        );
    }

    #[test]
    fn custom_message_comes_first() {
        let message = AssertionFailure::new("op()")
            .expected(1)
            .with_custom_message(Some("context"))
            .finish();

        assert!(message.starts_with("[context]\nop() expectation failed"));
    }

    #[test]
    fn absent_custom_message_adds_nothing() {
        let message = AssertionFailure::new("op()").with_custom_message(None).finish();

        assert_eq!(message, "op() expectation failed");
    }

    #[test]
    fn null_is_distinguishable_from_null_text() {
        let message = AssertionFailure::new("op()")
            .with_null("subject")
            .with_value("value", "null")
            .finish();

        assert!(message.contains("subject:\n  <null>"));
        assert!(message.contains("value:\n  \"null\""));
    }

    #[test]
    fn sequences_render_their_elements() {
        assert_eq!(render_sequence(vec!["a", "b"]), "[\"a\", \"b\"]");
        assert_eq!(render_sequence(Vec::<u8>::new()), "[]");
        assert_eq!(render_option(None::<u8>), "<null>");
        assert_eq!(render_option(Some(3)), "3");
    }

    #[test]
    fn glob_supports_wildcards_and_whitespace() {
        assert!(glob_is_match("this is the message", "mes*ge"));
        assert!(glob_is_match("hello world", "h*w???d"));
        assert!(glob_is_match("this \nis  the \t message", "this is the message "));
        assert!(!glob_is_match("hello", "bye"));
    }

    #[test]
    fn full_glob_match_is_anchored() {
        assert!(glob_is_full_match("hello world", "h*d"));
        assert!(!glob_is_full_match("hello world", "ello"));
        assert!(glob_is_match("hello world", "ello"));
    }
}
