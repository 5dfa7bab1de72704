//! Transient user-facing notifications.
//!
//! The browser site shows these as toasts. Nothing here is persisted; a
//! notifier only forwards the message to whatever surface the host has.

pub const LOGIN_SUCCEEDED: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
pub const REGISTER_SUCCEEDED: &str = "Registration successful!";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const LOGOUT_SUCCEEDED: &str = "Logged out successfully!";

pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that writes to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(kind = "success", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(kind = "error", "{message}");
    }
}
