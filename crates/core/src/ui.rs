//! User interaction surface.
//!
//! Imports talk to the user through three primitives: a blocking OK/Cancel
//! confirmation, a blocking alert and a transient toast. The CLI provides a
//! terminal implementation; [`testing::RecordingUi`] scripts answers and
//! records everything shown.

/// Answer to a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Ok,
    Cancel,
}

impl Confirmation {
    #[must_use]
    pub fn is_ok(self) -> bool {
        matches!(self, Confirmation::Ok)
    }
}

/// Dialogs and notifications shown while running a command.
pub trait Ui {
    /// Ask an OK/Cancel question. Anything but an explicit OK is a cancel.
    fn confirm(&mut self, title: &str, message: &str) -> Confirmation;

    /// Show a blocking message.
    fn alert(&mut self, title: &str, message: &str);

    /// Show a transient progress message.
    fn toast(&mut self, message: &str);
}

/// UI double for tests and non-interactive runs.
pub mod testing {
    use super::{Confirmation, Ui};

    /// Answers every confirmation with a fixed response and records what was shown.
    #[derive(Debug, Clone)]
    pub struct RecordingUi {
        pub answer: Confirmation,
        pub confirmations: Vec<String>,
        pub alerts: Vec<(String, String)>,
        pub toasts: Vec<String>,
    }

    impl RecordingUi {
        #[must_use]
        pub fn new(answer: Confirmation) -> Self {
            RecordingUi {
                answer,
                confirmations: Vec::new(),
                alerts: Vec::new(),
                toasts: Vec::new(),
            }
        }

        #[must_use]
        pub fn confirming() -> Self {
            Self::new(Confirmation::Ok)
        }

        #[must_use]
        pub fn cancelling() -> Self {
            Self::new(Confirmation::Cancel)
        }
    }

    impl Ui for RecordingUi {
        fn confirm(&mut self, title: &str, _message: &str) -> Confirmation {
            self.confirmations.push(title.to_string());
            self.answer
        }

        fn alert(&mut self, title: &str, message: &str) {
            self.alerts.push((title.to_string(), message.to_string()));
        }

        fn toast(&mut self, message: &str) {
            self.toasts.push(message.to_string());
        }
    }
}
