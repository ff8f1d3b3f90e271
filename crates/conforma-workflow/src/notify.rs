//! User-facing notifications.
//!
//! Workflows report their outcome through a [`Notifier`] passed in by the
//! caller. The CLI uses [`TracingNotifier`]; tests record the messages.

/// Sink for success and error messages shown to the user.
pub trait Notifier: Send + Sync {
    /// An operation completed.
    fn success(&self, message: &str);

    /// An operation failed; `message` is suitable for display.
    fn error(&self, message: &str);
}

/// Writes notifications as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "conforma::notify", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "conforma::notify", "{message}");
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn success(&self, message: &str) {
        (**self).success(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}
