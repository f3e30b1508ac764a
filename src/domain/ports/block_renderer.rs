//! Block Renderer Port
//!
//! Defines the interface for the block action.

use crate::domain::value_objects::CountryCode;

/// Replaces the page with a blocking notice.
///
/// Contract: after `render` returns, the page's original content is gone
/// and no further script execution or resource loading from the original
/// page may proceed. The operation is one-shot and irreversible for the
/// remainder of the page's lifetime. The gate never constructs markup
/// itself and never does anything after calling this.
///
/// If the page was already halted the notice may not be written; the
/// halt still holds and the gate still reports the visitor as blocked.
pub trait BlockRenderer: Send + Sync {
    fn render(&self, country: &CountryCode);
}
