//! The automation seam between the translation engine and a live browser.
//!
//! The engine never talks to CDP directly; it drives this trait. The real
//! implementation is [`crate::session::Session`], and tests substitute a
//! scripted mock so orchestration behavior can be verified without a
//! browser process.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Operations the translation engine needs from a browser.
///
/// Methods take `&mut self`: a driver is exclusively owned by whoever runs
/// a translation against it, which makes concurrent DOM access against one
/// session unrepresentable.
#[async_trait]
pub trait BrowserDriver: Send {
    /// Navigate to a URL.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Wait until `document.readyState` is `"complete"`.
    ///
    /// Returns [`crate::Error::Timeout`] when the deadline passes.
    async fn wait_ready_state(&mut self, timeout: Duration) -> Result<()>;

    /// Poll for an element's presence.
    ///
    /// Returns [`crate::Error::Timeout`] when the deadline passes.
    async fn wait_for_element(&mut self, selector: &str, timeout: Duration) -> Result<()>;

    /// Focus an element and inject text as simulated keystrokes.
    ///
    /// Keystrokes, not a value assignment: provider pages translate in
    /// response to input events, which a direct DOM write never fires.
    async fn type_keys(&mut self, selector: &str, text: &str) -> Result<()>;

    /// Read an element's rendered text content.
    async fn element_text(&mut self, selector: &str) -> Result<String>;

    /// Click an element.
    async fn click(&mut self, selector: &str) -> Result<()>;

    /// Release the underlying browser. Must be idempotent.
    async fn close(&mut self) -> Result<()>;
}
