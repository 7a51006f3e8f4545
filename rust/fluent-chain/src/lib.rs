//! # Fluent, chainable assertions
//!
//! fluent-chain makes assertions read like plain English: start a chain on the subject under
//! test, then append expectations one after another.
//!
//! ```rust
//! use fluent_chain::*;
//!
//! assert_that("Hello World!").starts_with("H").ends_with("!").has_size(12);
//! ```
//!
//! Methods available to assert with depend on the type of the subject. They live in
//! `*Assertions` extension traits implemented on [`Assertion`], and there is an extension point
//! ([`AssertionChain`]) to write customized assertions for your own types.
//!
//! ## Usage
//!
//! To quickly start using assertions, `use` the fluent_chain root module:
//!
//! ```rust
//! use fluent_chain::*;
//! ```
//!
//! ## Failures and handlers
//!
//! An expectation that does not hold composes a message and hands it to the chain's
//! [`FailureHandler`]. With [`assert_that`] the handler panics, which fails the test with output
//! like:
//!
//! ```bash
//! assert_that().starts_with() expectation failed
//! expecting subject to start with:
//!   "H"
//! but was:
//!   "ello World!"
//! ```
//!
//! The chain itself never stops on a failure. A [`CollectingHandler`] therefore sees every
//! failing link, which is what [`SoftAssertions`] builds on:
//!
//! ```
//! use fluent_chain::*;
//!
//! let soft = SoftAssertions::new();
//! soft.that(vec![1, 2, 3]).contains([4]).has_size(2);
//! soft.that(1.5).described_as("ratio").is_in_range(0.0, 1.0);
//!
//! assert_eq!(soft.failures().len(), 3);
//! ```
//!
//! Calling an assertion with arguments that make no sense, like a range whose max is not
//! above its min, is a [`UsageError`]. It panics straight away, whatever the handler.
//!
//! ## More examples
//!
//! ```rust
//! use fluent_chain::*;
//! use std::collections::HashSet;
//!
//! // working with booleans and options
//! assert_that(true).is_true();
//! assert_that(Some(5)).is_not_null().is_equal_to(Some(5));
//!
//! // working with numbers
//! assert_that(3).is_greater_than(2).is_less_than_or_equal_to(3).is_in_range(1, 5);
//! assert_that(0.1 + 0.2).is_approximately(0.3, 1e-9).is_finite();
//!
//! // working with collections
//! assert_that(vec![1, 2, 2, 3]).contains_duplicates().contains_sequence([2, 3]);
//! assert_that(HashSet::from(["a", "b"])).contains_exactly_in_any_order(["b", "a"]);
//!
//! // comparing structure rather than types
//! assert_that(vec![1u8, 2]).is_equivalent_to([1i64, 2]);
//!
//! // working with actions
//! assert_that(|| "x".parse::<u8>()).throws().with_message_containing("invalid digit");
//! ```
mod any;
mod assertion;
mod boolean;
mod enumerable;
pub mod equality;
mod error;
mod exception;
#[macro_use]
pub mod failure;
mod handler;
mod nullable;
mod numeric;
pub mod sequence;
mod string;

/// Exposes the members of a struct or enum to [`is_equivalent_to`](Assertion::is_equivalent_to).
///
/// Named fields become record members compared by name, tuple fields a sequence compared by
/// position, and enum values a variant compared by variant name and payload. Every field type
/// has to implement [`Structural`](trait@Structural) too.
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// #[derive(Debug, Structural)]
/// struct Customer {
///     name: String,
///     orders: Vec<u32>,
/// }
///
/// #[derive(Debug, Structural)]
/// struct CustomerView {
///     orders: [u64; 2],
///     name: &'static str,
/// }
///
/// assert_that(Customer { name: "Ann".into(), orders: vec![1, 2] })
///     .is_equivalent_to(CustomerView { orders: [1, 2], name: "Ann" });
/// ```
#[cfg(feature = "derive")]
pub use fluent_chain_derive::Structural;

pub use any::{AnyAssertions, ToAny};
pub use assertion::{assert_that, Assertable, Assertion, AssertionChain};
pub use boolean::BooleanAssertions;
pub use enumerable::{Enumerable, EnumerableAssertions};
pub use equality::{Identity, Structural, Structure};
pub use error::{SoftAssertionError, UsageError};
pub use exception::{ActionAssertions, Exception, ExceptionAssertions, Outcome, PanicError};
pub use failure::AssertionFailure;
pub use handler::{assert_all, CollectingHandler, FailureHandler, IgnoringHandler, PanicHandler, SoftAssertions};
pub use nullable::{NullAssertions, Nullable};
pub use numeric::{FloatAssertions, OrderedAssertions, SignAssertions};
pub use string::{Text, TextAssertions};
