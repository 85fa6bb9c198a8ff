use release_helper::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Mock ProgressReporter recording every call as a line of text
///
/// Clones share the same log, so a test can keep a handle after moving the
/// reporter into a use case.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    log: Rc<RefCell<Vec<String>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn record(&self, line: String) {
        self.log.borrow_mut().push(line);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.record(match message {
            Some(m) => format!("Progress: {}/{} - {}", current, total, m),
            None => format!("Progress: {}/{}", current, total),
        });
    }

    fn report_error(&self, message: &str) {
        self.record(format!("Error: {}", message));
    }

    fn report_completion(&self, message: &str) {
        self.record(format!("Completed: {}", message));
    }
}
