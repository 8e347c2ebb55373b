//! Page interaction controller with a deterministic document harness.
//!
//! [`PageController`] wires the interaction behaviors of a page (error banner
//! scroll, card hover emphasis, button press feedback, input focus highlight
//! and the mobile navigation toggle) onto any [`PageSurface`]. [`Harness`] is
//! the bundled surface: it parses HTML into an in-memory document, dispatches
//! user events and exposes assertions, so every behavior can be exercised in
//! plain `cargo test` without a browser.
//!
//! ```
//! use page_interactions::{Harness, PageController};
//!
//! # fn main() -> page_interactions::Result<()> {
//! let mut h = Harness::from_html("<button id='go'>Go</button>")?;
//! let controller = PageController::default();
//! h.dom_content_loaded(&controller)?;
//!
//! h.press("#go")?;
//! h.assert_class("#go", "is-pressed", true)?;
//! h.release("#go")?;
//! h.assert_class("#go", "is-pressed", false)?;
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

mod config;
mod controller;
mod dom;
mod events;
mod harness;
mod html;
mod selector;
mod surface;
mod trace;

pub use config::{ClassNames, InlineStyles, InteractionConfig, SelectorConfig, StyleMode};
pub use controller::{InitOutcome, InitReport, PageController, VisualState};
pub use dom::NodeId;
pub use events::{Effect, EventKind};
pub use harness::{Harness, ScrollRequest};
pub use surface::{GlobalAction, PageSurface, ScrollBehavior, ScrollBlock, ScrollIntoViewOptions};

pub(crate) use dom::Dom;
pub(crate) use events::{EventState, Listener, ListenerStore};
pub(crate) use html::parse_html;
pub(crate) use selector::SelectorList;
pub(crate) use trace::TraceState;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

#[cfg(test)]
mod tests;
