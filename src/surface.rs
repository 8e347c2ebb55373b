use serde::{Deserialize, Serialize};

use super::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollBehavior {
    Auto,
    #[default]
    Smooth,
    Instant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollBlock {
    Start,
    #[default]
    Center,
    End,
    Nearest,
}

/// Mirrors the `scrollIntoView({ behavior, block })` options bag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// A zero-argument function a page can call from its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalAction {
    /// Flip `class` on the element with id `id`; a missing element is a no-op.
    ToggleClassById { id: String, class: String },
}

impl GlobalAction {
    /// Runs the action and returns the resulting state, `None` when its
    /// target does not exist.
    pub fn run<S: PageSurface + ?Sized>(&self, surface: &mut S) -> Result<Option<bool>> {
        match self {
            GlobalAction::ToggleClassById { id, class } => {
                let Some(element) = surface.element_by_id(id) else {
                    return Ok(None);
                };
                surface.toggle_class(element, class).map(Some)
            }
        }
    }
}

/// The document capabilities [`PageController`] needs.
///
/// Element handles are opaque; every mutation goes through the surface so a
/// fake document can stand in for a real one.
pub trait PageSurface {
    type Element: Copy + Eq + fmt::Debug;

    fn is_initialized(&self) -> bool;

    /// Records that a wiring pass completed.
    fn mark_initialized(&mut self);

    fn viewport_width(&self) -> u32;

    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>>;

    /// Matches in document order, each element at most once.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    fn scroll_into_view(
        &mut self,
        element: Self::Element,
        options: ScrollIntoViewOptions,
    ) -> Result<()>;

    fn add_listener(
        &mut self,
        element: Self::Element,
        event: EventKind,
        effects: Vec<Effect>,
    ) -> Result<()>;

    fn apply_effect(&mut self, element: Self::Element, effect: &Effect) -> Result<()>;

    fn has_class(&self, element: Self::Element, class_name: &str) -> Result<bool>;

    /// Returns the new presence of the class.
    fn toggle_class(&mut self, element: Self::Element, class_name: &str) -> Result<bool>;

    /// Inline style value, empty when unset.
    fn style_value(&self, element: Self::Element, property: &str) -> Result<String>;

    fn expose_global(&mut self, name: &str, action: GlobalAction) -> Result<()>;
}
