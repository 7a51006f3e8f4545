use fluent_chain::*;
use std::{
    panic,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

// Kept alone in this binary: the panic hook is process-global.
#[test]
fn actions_restore_the_installed_panic_hook() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    assert_that(|| "x".parse::<u8>()).throws();
    assert_that(|| -> () { panic!("captured") }).throws_exactly::<PanicError>();
    assert_eq!(seen.load(Ordering::SeqCst), 0);

    let outcome = panic::catch_unwind(|| -> () { panic!("after the assertions") });
    let _ = panic::take_hook();

    assert!(outcome.is_err());
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}
