use crate::assertion::Assertion;
use std::{fmt::Debug, rc::Rc, sync::Arc};

/// Values that may be absent. `None` is the null of this crate.
pub trait Nullable {
    fn is_null(&self) -> bool;
}

impl<T> Nullable for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: Nullable + ?Sized> Nullable for &T {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Nullable + ?Sized> Nullable for Box<T> {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Nullable + ?Sized> Nullable for Rc<T> {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Nullable + ?Sized> Nullable for Arc<T> {
    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

/// Assertions for subjects implementing [`Nullable`].
///
/// ### Examples
/// ```
/// use fluent_chain::*;
///
/// assert_that(None::<u8>).is_null();
/// assert_that(Some("value")).is_not_null();
/// assert_that(&Some(3)).is_not_null();
/// ```
pub trait NullAssertions {
    fn is_null(self) -> Self;
    fn is_not_null(self) -> Self;
}

impl<T: Nullable + Debug> NullAssertions for Assertion<T> {
    fn is_null(self) -> Self {
        if !self.subject().is_null() {
            self.report(self.failure("is_null()").expected(None::<()>).but_was(self.subject()));
        }

        self
    }

    fn is_not_null(self) -> Self {
        if self.subject().is_null() {
            self.report(
                self.failure("is_not_null()")
                    .with_statement("expecting subject not to be null")
                    .with_null("but was"),
            );
        }

        self
    }
}
