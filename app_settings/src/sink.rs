//! Bounded log of failures recorded while errors are tolerated.

use parking_lot::Mutex;

/// Maximum number of messages an [`ErrorSink`] retains.
pub const MAX_ERRORS: usize = 10;

/// Ordered, bounded list of failure messages.
///
/// Once [`MAX_ERRORS`] messages are held, every further failure overwrites
/// the final slot with a marker noting that more errors were suppressed.
/// There is no reset; create a new resolver to start afresh.
///
/// # Examples
///
/// ```rust
/// use app_settings::{ErrorSink, MAX_ERRORS};
///
/// let sink = ErrorSink::default();
/// for n in 0..=MAX_ERRORS {
///     sink.record(format!("failure {n}"));
/// }
/// let errors = sink.errors();
/// assert_eq!(errors.len(), MAX_ERRORS);
/// assert_eq!(errors[MAX_ERRORS - 1], ErrorSink::suppressed_marker());
/// ```
#[derive(Debug, Default)]
pub struct ErrorSink {
    messages: Mutex<Vec<String>>,
}

impl ErrorSink {
    /// Text that replaces the final message once the sink is full.
    #[must_use]
    pub fn suppressed_marker() -> String {
        format!("More errors occurred but only {MAX_ERRORS} are shown")
    }

    /// Appends `message`, or overwrites the final slot with the suppression
    /// marker when the sink is full.
    pub fn record(&self, message: impl Into<String>) {
        let mut messages = self.messages.lock();
        if messages.len() < MAX_ERRORS {
            messages.push(message.into());
        } else if let Some(last) = messages.last_mut() {
            *last = Self::suppressed_marker();
        }
    }

    /// Snapshot of the recorded messages in order.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    /// Whether any failure has been recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.messages.lock().is_empty()
    }
}
