use fluent_chain::FailureHandler;
use std::cell::RefCell;

/// Records every message handed to it and never interrupts the chain.
#[derive(Default)]
pub struct SpyHandler {
    messages: RefCell<Vec<String>>,
}

impl SpyHandler {
    pub fn calls(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.borrow().last().cloned()
    }
}

impl FailureHandler for SpyHandler {
    fn fail(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_owned());
    }
}
