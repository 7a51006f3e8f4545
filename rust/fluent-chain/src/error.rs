use itertools::Itertools;
use thiserror::Error;

/// Misuse of the assertion API. These never go through a
/// [`FailureHandler`](crate::FailureHandler): the assertion panics with the
/// error text straight away, or the `try_*` variant returns it.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum UsageError {
    #[error("Invalid range: max <{max}> must be greater than min <{min}>.")]
    InvalidRange { min: String, max: String },
    #[error("Invalid regular expression pattern <{pattern}>: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Margin <{0}> must not be negative.")]
    NegativeMargin(String),
}

impl UsageError {
    pub(crate) fn raise(self) -> ! {
        panic!("{}", self)
    }
}

/// Every failure recorded by a [`CollectingHandler`](crate::CollectingHandler).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{}", render_failures(.failures))]
pub struct SoftAssertionError {
    pub failures: Vec<String>,
}

fn render_failures(failures: &[String]) -> String {
    let listed = failures
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{}) {}", i + 1, f.replace('\n', "\n   ")))
        .join("\n");

    format!("{} assertion(s) failed:\n{}", failures.len(), listed)
}
