//! Forced navigation hook.
//!
//! The session layer has to send the user to the login page when a session
//! ends underneath them. How that happens is platform specific (a full page
//! load in the browser, a router push on desktop), so it is injected.

/// Sends the client to an application route.
pub trait Navigator {
    fn redirect(&self, route: &str);
}

/// Navigator for contexts without a UI, such as CLIs and tests that do not
/// care about navigation. Redirects are only logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, route: &str) {
        tracing::info!(route, "redirect requested");
    }
}
