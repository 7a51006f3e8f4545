use crate::assertion::Assertion;
use std::{
    any::{type_name, Any},
    rc::Rc,
    sync::Arc,
};

/// Values that expose their contents as `&dyn Any`, so their dynamic type can be checked.
pub trait ToAny {
    fn to_any(&self) -> &dyn Any;
}

macro_rules! to_any_through_deref {
    ($($t:ty),*) => {
        $(
            impl ToAny for $t {
                fn to_any(&self) -> &dyn Any {
                    self.as_ref()
                }
            }
        )*
    };
}

to_any_through_deref!(
    Box<dyn Any>,
    Box<dyn Any + Send>,
    Box<dyn Any + Send + Sync>,
    Rc<dyn Any>,
    Arc<dyn Any>,
    Arc<dyn Any + Send>,
    Arc<dyn Any + Send + Sync>
);

impl ToAny for &dyn Any {
    fn to_any(&self) -> &dyn Any {
        *self
    }
}

impl ToAny for &(dyn Any + Send) {
    fn to_any(&self) -> &dyn Any {
        *self
    }
}

impl ToAny for &(dyn Any + Send + Sync) {
    fn to_any(&self) -> &dyn Any {
        *self
    }
}

/// Assertions on the dynamic type behind a [`ToAny`] subject, like
/// [`Box`](std::boxed::Box)<[`Any`](std::any::Any)> or `&(dyn`[`Any`](std::any::Any)` + Send)`.
///
/// ## Examples
/// ```rust
/// use fluent_chain::*;
/// use std::any::Any;
///
/// let v: Box<dyn Any> = Box::new(3u32);
/// assert_that(v).is_of_type::<u32>().is_not_of_type::<i32>();
/// ```
pub trait AnyAssertions {
    fn is_of_type<U: Any>(self) -> Self;
    fn is_not_of_type<U: Any>(self) -> Self;
}

impl<S: ToAny> AnyAssertions for Assertion<S> {
    fn is_of_type<U: Any>(self) -> Self {
        if !self.subject().to_any().is::<U>() {
            self.report(
                self.failure("is_of_type()")
                    .with_message("expecting subject to be of type", format!("<{}>", type_name::<U>()))
                    .but("subject has a different type"),
            );
        }

        self
    }

    fn is_not_of_type<U: Any>(self) -> Self {
        if self.subject().to_any().is::<U>() {
            self.report(
                self.failure("is_not_of_type()")
                    .with_message("expecting subject not to be of type", format!("<{}>", type_name::<U>()))
                    .but("subject has exactly that type"),
            );
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::{any::Any, rc::Rc, sync::Arc};

    #[test]
    fn is_of_type_passes_if_type_matches() {
        let v: Box<dyn Any> = Box::new(3u32);

        assert_that(v).is_of_type::<u32>();
    }

    #[test]
    fn is_of_type_fails_if_type_mismatches() {
        should_fail_with_message!(
            {
                let v: Box<dyn Any> = Box::new(3u32);
                assert_that(v).is_of_type::<&str>()
            },
            "expecting subject to be of type: <&str> but: subject has a different type"
        );
    }

    #[test]
    fn is_not_of_type_fails_if_type_matches() {
        should_fail_with_message!(
            {
                let v: Arc<dyn Any + Send + Sync> = Arc::new("text");
                assert_that(v).is_not_of_type::<&str>()
            },
            "expecting subject not to be of type: <&str>"
        );
    }

    #[test]
    fn multiple_any_types_work() {
        let box_any: Box<dyn Any> = Box::new(3u32);
        let box_any_send: Box<dyn Any + Send> = Box::new(3u32);
        let box_any_send_sync: Box<dyn Any + Send + Sync> = Box::new(3u32);
        let ref_any: &dyn Any = box_any.as_ref();
        let ref_any_send: &(dyn Any + Send) = box_any_send.as_ref();
        let ref_any_send_sync: &(dyn Any + Send + Sync) = box_any_send_sync.as_ref();
        let rc_any: Rc<dyn Any> = Rc::new(3u32);
        let arc_any: Arc<dyn Any> = Arc::new(3u32);

        assert_that(ref_any).is_of_type::<u32>();
        assert_that(ref_any_send).is_of_type::<u32>();
        assert_that(ref_any_send_sync).is_of_type::<u32>();
        assert_that(rc_any).is_of_type::<u32>();
        assert_that(arc_any).is_of_type::<u32>();
        assert_that(box_any_send).is_of_type::<u32>();
        assert_that(box_any_send_sync).is_of_type::<u32>();
    }
}
