use tracing::{debug, info};

use super::*;

/// Binary presentation state of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    Lifted,
    Pressed,
    Focused,
    Open,
}

/// What one initialization pass wired up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub banner_scrolled: bool,
    pub hover_enabled: bool,
    pub cards_wired: usize,
    pub buttons_wired: usize,
    pub inputs_wired: usize,
    pub listeners_attached: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Initialized(InitReport),
    AlreadyInitialized,
}

impl InitOutcome {
    pub fn report(&self) -> Option<&InitReport> {
        match self {
            InitOutcome::Initialized(report) => Some(report),
            InitOutcome::AlreadyInitialized => None,
        }
    }
}

/// Elements one wiring pass acts on; `cards` is `None` below the hover threshold.
struct Targets<E> {
    banner: Option<E>,
    cards: Option<Vec<E>>,
    buttons: Vec<E>,
    inputs: Vec<E>,
}

/// Wires the page's interaction behaviors onto a [`PageSurface`].
#[derive(Debug, Clone, Default)]
pub struct PageController {
    config: InteractionConfig,
}

impl PageController {
    pub fn new(config: InteractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Runs the one-time wiring pass. Later calls on the same surface do nothing.
    ///
    /// Every element is looked up before anything is attached, so a failed
    /// lookup leaves the page untouched and the pass can be retried.
    pub fn initialize<S: PageSurface + ?Sized>(&self, page: &mut S) -> Result<InitOutcome> {
        if page.is_initialized() {
            debug!("page already initialized, skipping wiring");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        let targets = self.collect_targets(page)?;
        let mut report = InitReport {
            banner_scrolled: targets.banner.is_some(),
            hover_enabled: targets.cards.is_some(),
            cards_wired: targets.cards.as_ref().map_or(0, Vec::len),
            buttons_wired: targets.buttons.len(),
            inputs_wired: targets.inputs.len(),
            listeners_attached: 0,
        };

        if let Some(banner) = targets.banner {
            page.scroll_into_view(banner, self.config.scroll)?;
        }
        if let Some(cards) = &targets.cards {
            self.wire_card_hover(page, cards, &mut report)?;
        }
        self.wire_button_press(page, &targets.buttons, &mut report)?;
        self.wire_input_focus(page, &targets.inputs, &mut report)?;
        self.install_globals(page)?;
        page.mark_initialized();

        info!(
            banner_scrolled = report.banner_scrolled,
            hover_enabled = report.hover_enabled,
            listeners = report.listeners_attached,
            "page interactions initialized"
        );
        Ok(InitOutcome::Initialized(report))
    }

    /// Exposes the page's global functions (`toggleMobileNav`).
    ///
    /// Independent of [`PageController::initialize`]; installing twice
    /// replaces the earlier registration.
    pub fn install_globals<S: PageSurface + ?Sized>(&self, page: &mut S) -> Result<()> {
        page.expose_global(&self.config.global_toggle_name, self.mobile_nav_action())
    }

    /// Flips the mobile navigation panel's open class.
    ///
    /// Returns the new open state, or `None` when the page has no panel.
    pub fn toggle_mobile_nav<S: PageSurface + ?Sized>(&self, page: &mut S) -> Result<Option<bool>> {
        self.mobile_nav_action().run(page)
    }

    /// Reads a visual state back in whichever presentation mode is configured.
    pub fn visual_state<S: PageSurface + ?Sized>(
        &self,
        page: &S,
        element: S::Element,
        state: VisualState,
    ) -> Result<bool> {
        match self.inline_property(state) {
            Some((property, on_value, _)) => {
                Ok(page.style_value(element, property)? == on_value)
            }
            None => page.has_class(element, self.class_name(state)),
        }
    }

    /// Effects that switch `state` on or off for one element.
    pub fn effects(&self, state: VisualState, on: bool) -> Vec<Effect> {
        if let Some((property, on_value, off_value)) = self.inline_property(state) {
            let value = if on { on_value } else { off_value };
            return vec![Effect::SetStyle {
                property: property.to_string(),
                value: value.to_string(),
            }];
        }

        let class_name = self.class_name(state).to_string();
        if on {
            vec![Effect::AddClass(class_name)]
        } else {
            vec![Effect::RemoveClass(class_name)]
        }
    }

    fn mobile_nav_action(&self) -> GlobalAction {
        GlobalAction::ToggleClassById {
            id: self.config.selectors.mobile_nav_id.clone(),
            class: self.config.classes.open.clone(),
        }
    }

    fn class_name(&self, state: VisualState) -> &str {
        let classes = &self.config.classes;
        match state {
            VisualState::Lifted => &classes.lifted,
            VisualState::Pressed => &classes.pressed,
            VisualState::Focused => &classes.focused,
            VisualState::Open => &classes.open,
        }
    }

    /// `(property, on, off)` in inline mode; the nav panel always uses its class.
    fn inline_property(&self, state: VisualState) -> Option<(&str, &str, &str)> {
        if self.config.style_mode != StyleMode::InlineStyle {
            return None;
        }
        let inline = &self.config.inline;
        match state {
            VisualState::Lifted => Some(("transform", &inline.card_lifted, &inline.card_resting)),
            VisualState::Pressed => Some((
                "transform",
                &inline.button_pressed,
                &inline.button_released,
            )),
            VisualState::Focused => Some((
                "box-shadow",
                &inline.input_focused,
                &inline.input_blurred,
            )),
            VisualState::Open => None,
        }
    }

    fn collect_targets<S: PageSurface + ?Sized>(&self, page: &S) -> Result<Targets<S::Element>> {
        let selectors = &self.config.selectors;
        let width = page.viewport_width();
        let cards = if width > self.config.hover_min_viewport_width {
            Some(page.query_selector_all(&selectors.cards)?)
        } else {
            debug!(
                width,
                threshold = self.config.hover_min_viewport_width,
                "card hover emphasis disabled for narrow viewport"
            );
            None
        };

        Ok(Targets {
            banner: page.query_selector(&selectors.error_banner)?,
            cards,
            buttons: page.query_selector_all(&selectors.buttons)?,
            inputs: page.query_selector_all(&selectors.inputs)?,
        })
    }

    fn wire_card_hover<S: PageSurface + ?Sized>(
        &self,
        page: &mut S,
        cards: &[S::Element],
        report: &mut InitReport,
    ) -> Result<()> {
        for card in cards {
            if self.config.style_mode == StyleMode::InlineStyle {
                page.apply_effect(
                    *card,
                    &Effect::SetStyle {
                        property: "transition".into(),
                        value: self.config.inline.card_transition.clone(),
                    },
                )?;
            }
            self.attach(page, *card, EventKind::MouseEnter, VisualState::Lifted, true, report)?;
            self.attach(page, *card, EventKind::MouseLeave, VisualState::Lifted, false, report)?;
        }
        debug!(cards = cards.len(), "card hover emphasis wired");
        Ok(())
    }

    fn wire_button_press<S: PageSurface + ?Sized>(
        &self,
        page: &mut S,
        buttons: &[S::Element],
        report: &mut InitReport,
    ) -> Result<()> {
        for button in buttons {
            self.attach(page, *button, EventKind::MouseDown, VisualState::Pressed, true, report)?;
            self.attach(page, *button, EventKind::MouseUp, VisualState::Pressed, false, report)?;
            // Leaving before release must not leave the button stuck pressed.
            self.attach(page, *button, EventKind::MouseLeave, VisualState::Pressed, false, report)?;
        }
        debug!(buttons = buttons.len(), "button press feedback wired");
        Ok(())
    }

    fn wire_input_focus<S: PageSurface + ?Sized>(
        &self,
        page: &mut S,
        inputs: &[S::Element],
        report: &mut InitReport,
    ) -> Result<()> {
        for input in inputs {
            self.attach(page, *input, EventKind::Focus, VisualState::Focused, true, report)?;
            self.attach(page, *input, EventKind::Blur, VisualState::Focused, false, report)?;
        }
        debug!(inputs = inputs.len(), "input focus highlight wired");
        Ok(())
    }

    fn attach<S: PageSurface + ?Sized>(
        &self,
        page: &mut S,
        element: S::Element,
        event: EventKind,
        state: VisualState,
        on: bool,
        report: &mut InitReport,
    ) -> Result<()> {
        page.add_listener(element, event, self.effects(state, on))?;
        report.listeners_attached += 1;
        Ok(())
    }
}
