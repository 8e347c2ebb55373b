use super::*;

fn inline_config() -> InteractionConfig {
    InteractionConfig {
        style_mode: StyleMode::InlineStyle,
        ..InteractionConfig::default()
    }
}

#[test]
fn initialization_reports_every_behavior_group() -> Result<()> {
    init_tracing();
    let mut h = Harness::from_html(LANDING_PAGE)?;
    let outcome = h.dom_content_loaded(&PageController::default())?;

    let report = outcome.report().cloned().unwrap_or_default();
    assert_eq!(
        report,
        InitReport {
            banner_scrolled: true,
            hover_enabled: true,
            cards_wired: 2,
            buttons_wired: 2,
            inputs_wired: 3,
            listeners_attached: 2 * 2 + 2 * 3 + 3 * 2,
        }
    );
    assert_eq!(h.total_listeners(), report.listeners_attached);
    assert!(h.is_initialized());
    assert!(h.has_global("toggleMobileNav"));
    Ok(())
}

#[test]
fn second_initialization_is_a_no_op() -> Result<()> {
    let controller = PageController::default();
    let mut h = Harness::from_html(LANDING_PAGE)?;
    h.dom_content_loaded(&controller)?;
    let before = h.total_listeners();

    assert_eq!(controller.initialize(&mut h)?, InitOutcome::AlreadyInitialized);
    assert_eq!(h.total_listeners(), before);
    assert_eq!(h.scroll_requests().len(), 1);
    assert_eq!(h.listener_count("#submit", EventKind::MouseDown)?, 1);
    Ok(())
}

#[test]
fn error_banner_is_scrolled_into_view_smoothly_and_centered() -> Result<()> {
    let h = loaded(LANDING_PAGE, InteractionConfig::default())?;
    let banner = h.select("#error")?;
    assert_eq!(
        h.scroll_requests(),
        &[ScrollRequest {
            target: banner,
            label: "#error".into(),
            options: ScrollIntoViewOptions {
                behavior: ScrollBehavior::Smooth,
                block: ScrollBlock::Center,
            },
        }]
    );
    Ok(())
}

#[test]
fn only_the_first_banner_is_scrolled() -> Result<()> {
    let html = "<p class='alert-danger' id='one'>a</p><p class='alert-danger' id='two'>b</p>";
    let h = loaded(html, InteractionConfig::default())?;
    assert_eq!(h.scroll_requests().len(), 1);
    assert_eq!(h.scroll_requests()[0].label, "#one");
    Ok(())
}

#[test]
fn missing_banner_is_silently_ignored() -> Result<()> {
    let mut h = Harness::from_html("<div class='alert alert-info'>ok</div>")?;
    let outcome = h.dom_content_loaded(&PageController::default())?;
    assert_eq!(outcome.report().map(|r| r.banner_scrolled), Some(false));
    assert!(h.scroll_requests().is_empty());
    Ok(())
}

#[test]
fn card_hover_lifts_and_restores_with_classes() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, InteractionConfig::default())?;
    for _ in 0..3 {
        h.hover("#hero")?;
        h.assert_class("#hero", "is-lifted", true)?;
        h.unhover("#hero")?;
        h.assert_class("#hero", "is-lifted", false)?;
    }
    assert_eq!(h.class_list("#hero")?, vec!["heroCard"]);
    Ok(())
}

#[test]
fn card_hover_is_skipped_at_or_below_threshold() -> Result<()> {
    for width in [320, 899, 900] {
        let mut h = Harness::with_viewport(LANDING_PAGE, width)?;
        let outcome = h.dom_content_loaded(&PageController::default())?;
        assert_eq!(outcome.report().map(|r| r.hover_enabled), Some(false));
        assert_eq!(h.listener_count("#hero", EventKind::MouseEnter)?, 0);
        assert_eq!(h.listener_count("#predict", EventKind::MouseLeave)?, 0);

        h.hover("#hero")?;
        h.assert_class("#hero", "is-lifted", false)?;
    }
    Ok(())
}

#[test]
fn viewport_changes_after_initialization_are_not_observed() -> Result<()> {
    let mut h = Harness::with_viewport(LANDING_PAGE, 800)?;
    h.dom_content_loaded(&PageController::default())?;
    h.set_viewport_width(1600);
    h.hover("#hero")?;
    h.assert_class("#hero", "is-lifted", false)?;
    Ok(())
}

#[test]
fn card_hover_uses_inline_transform_and_transition() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, inline_config())?;
    h.assert_style("#hero", "transition", "transform 0.2s ease")?;
    h.assert_style("#hero", "transform", "")?;

    h.hover("#hero")?;
    h.assert_style("#hero", "transform", "translateY(-4px)")?;
    h.unhover("#hero")?;
    h.assert_style("#hero", "transform", "translateY(0)")?;
    Ok(())
}

#[test]
fn button_press_and_release_with_classes() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, InteractionConfig::default())?;
    h.press("#submit")?;
    h.assert_class("#submit", "is-pressed", true)?;
    h.release("#submit")?;
    h.assert_class("#submit", "is-pressed", false)?;

    h.press("#submit")?;
    h.unhover("#submit")?;
    h.assert_class("#submit", "is-pressed", false)?;
    Ok(())
}

#[test]
fn button_stays_pressed_until_released() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, InteractionConfig::default())?;
    h.press("#submit")?;
    h.hover("#submit")?;
    h.press("#submit")?;
    h.assert_class("#submit", "is-pressed", true)?;
    assert_eq!(h.class_list("#submit")?, vec!["is-pressed"]);
    Ok(())
}

#[test]
fn button_press_uses_inline_scale() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, inline_config())?;
    h.press("#menu")?;
    h.assert_style("#menu", "transform", "scale(0.97)")?;
    h.release("#menu")?;
    h.assert_style("#menu", "transform", "scale(1)")?;
    h.press("#menu")?;
    h.unhover("#menu")?;
    h.assert_style("#menu", "transform", "scale(1)")?;
    Ok(())
}

#[test]
fn pressing_a_button_inside_a_card_does_not_lift_the_card() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, InteractionConfig::default())?;
    h.press("#submit")?;
    h.assert_class("#predict", "is-lifted", false)?;
    h.assert_class("#predict", "is-pressed", false)?;
    Ok(())
}

#[test]
fn input_focus_highlight_with_classes() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, InteractionConfig::default())?;
    for selector in ["#age", "#education", "#notes"] {
        h.focus(selector)?;
        h.assert_class(selector, "is-focused", true)?;
        h.blur(selector)?;
        h.assert_class(selector, "is-focused", false)?;
    }
    Ok(())
}

#[test]
fn focusing_another_input_clears_the_previous_highlight() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, InteractionConfig::default())?;
    h.focus("#age")?;
    h.focus("#notes")?;
    h.assert_class("#age", "is-focused", false)?;
    h.assert_class("#notes", "is-focused", true)?;
    Ok(())
}

#[test]
fn input_focus_uses_inline_box_shadow() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, inline_config())?;
    h.focus("#age")?;
    h.assert_style("#age", "box-shadow", "0 0 0 2px rgba(37,99,235,0.25)")?;
    h.blur("#age")?;
    h.assert_style("#age", "box-shadow", "none")?;
    Ok(())
}

#[test]
fn mobile_nav_toggle_flips_open_class() -> Result<()> {
    let controller = PageController::default();
    let mut h = Harness::from_html(LANDING_PAGE)?;

    // Callable before initialization.
    assert_eq!(controller.toggle_mobile_nav(&mut h)?, Some(true));
    h.assert_class("#mobileNav", "open", true)?;
    assert_eq!(controller.toggle_mobile_nav(&mut h)?, Some(false));
    h.assert_class("#mobileNav", "open", false)?;
    assert_eq!(h.class_list("#mobileNav")?, vec!["mobile-nav"]);
    Ok(())
}

#[test]
fn mobile_nav_toggle_without_panel_is_a_no_op() -> Result<()> {
    let controller = PageController::default();
    let mut h = Harness::from_html("<button id='menu'>Menu</button>")?;
    assert_eq!(controller.toggle_mobile_nav(&mut h)?, None);
    Ok(())
}

#[test]
fn inline_onclick_calls_the_exposed_toggle() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, InteractionConfig::default())?;
    h.click("#menu")?;
    h.assert_class("#mobileNav", "open", true)?;
    h.assert_class("#menu", "is-pressed", false)?;
    h.click("#menu")?;
    h.assert_class("#mobileNav", "open", false)?;
    assert_eq!(h.call_global("toggleMobileNav")?, Some(true));
    Ok(())
}

#[test]
fn onclick_toggle_works_before_the_document_is_ready() -> Result<()> {
    let mut h = Harness::from_html(
        "<button id='m' onclick='toggleMobileNav()'>Menu</button><nav id='mobileNav'></nav>",
    )?;
    assert!(!h.is_initialized());
    h.click("#m")?;
    h.assert_class("#mobileNav", "open", true)?;
    assert_eq!(h.call_global("toggleMobileNav")?, Some(false));
    Ok(())
}

#[test]
fn install_globals_is_independent_of_initialization() -> Result<()> {
    let mut config = InteractionConfig::default();
    config.global_toggle_name = "toggleDrawer".into();
    let controller = PageController::new(config)?;
    let mut h = Harness::from_html(LANDING_PAGE)?;

    controller.install_globals(&mut h)?;
    assert!(!h.is_initialized());
    assert_eq!(h.call_global("toggleDrawer")?, Some(true));
    assert_eq!(h.total_listeners(), 0);
    Ok(())
}

#[test]
fn onclick_naming_an_unknown_global_is_an_error() -> Result<()> {
    let mut h = Harness::from_html("<button id='b' onclick='openDrawer()'>x</button>")?;
    assert_eq!(
        h.click("#b"),
        Err(Error::Runtime("openDrawer is not defined".into()))
    );
    Ok(())
}

/// Harness wrapper whose bulk queries fail for one selector.
struct FailingQuery {
    page: Harness,
    failing: Option<String>,
}

impl PageSurface for FailingQuery {
    type Element = NodeId;

    fn is_initialized(&self) -> bool {
        self.page.is_initialized()
    }

    fn mark_initialized(&mut self) {
        self.page.mark_initialized();
    }

    fn viewport_width(&self) -> u32 {
        self.page.viewport_width()
    }

    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        PageSurface::query_selector(&self.page, selector)
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        if self.failing.as_deref() == Some(selector) {
            return Err(Error::Runtime(format!("query failed: {selector}")));
        }
        PageSurface::query_selector_all(&self.page, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.page.element_by_id(id)
    }

    fn scroll_into_view(&mut self, element: NodeId, options: ScrollIntoViewOptions) -> Result<()> {
        self.page.scroll_into_view(element, options)
    }

    fn add_listener(&mut self, element: NodeId, event: EventKind, effects: Vec<Effect>) -> Result<()> {
        self.page.add_listener(element, event, effects)
    }

    fn apply_effect(&mut self, element: NodeId, effect: &Effect) -> Result<()> {
        self.page.apply_effect(element, effect)
    }

    fn has_class(&self, element: NodeId, class_name: &str) -> Result<bool> {
        self.page.has_class(element, class_name)
    }

    fn toggle_class(&mut self, element: NodeId, class_name: &str) -> Result<bool> {
        self.page.toggle_class(element, class_name)
    }

    fn style_value(&self, element: NodeId, property: &str) -> Result<String> {
        self.page.style_value(element, property)
    }

    fn expose_global(&mut self, name: &str, action: GlobalAction) -> Result<()> {
        self.page.expose_global(name, action)
    }
}

#[test]
fn failed_wiring_pass_leaves_the_page_untouched_and_retryable() -> Result<()> {
    let controller = PageController::default();
    let mut surface = FailingQuery {
        page: Harness::from_html(LANDING_PAGE)?,
        failing: Some("input, select, textarea".into()),
    };

    assert!(matches!(controller.initialize(&mut surface), Err(Error::Runtime(_))));
    assert!(!surface.is_initialized());
    assert_eq!(surface.page.total_listeners(), 0);
    assert!(surface.page.scroll_requests().is_empty());

    surface.failing = None;
    let outcome = controller.initialize(&mut surface)?;
    assert_eq!(outcome.report().map(|r| r.listeners_attached), Some(16));
    assert_eq!(surface.page.total_listeners(), 16);
    assert_eq!(surface.page.scroll_requests().len(), 1);
    assert_eq!(controller.initialize(&mut surface)?, InitOutcome::AlreadyInitialized);
    Ok(())
}

#[test]
fn focusing_a_plain_element_keeps_the_input_highlight() -> Result<()> {
    let html = "<input id='a'><div id='d'>text</div>";
    let mut h = loaded(html, InteractionConfig::default())?;
    h.focus("#a")?;
    h.focus("#d")?;
    h.assert_focused("#a")?;
    h.assert_class("#a", "is-focused", true)?;
    Ok(())
}

#[test]
fn nav_toggle_uses_a_class_in_inline_mode() -> Result<()> {
    let mut h = loaded(LANDING_PAGE, inline_config())?;
    h.call_global("toggleMobileNav")?;
    h.assert_class("#mobileNav", "open", true)?;
    h.assert_style("#mobileNav", "transform", "")?;
    Ok(())
}

#[test]
fn visual_state_reads_back_in_both_modes() -> Result<()> {
    for config in [InteractionConfig::default(), inline_config()] {
        let controller = PageController::new(config)?;
        let mut h = Harness::from_html(LANDING_PAGE)?;
        h.dom_content_loaded(&controller)?;
        let hero = h.select("#hero")?;
        let age = h.select("#age")?;

        assert!(!controller.visual_state(&h, hero, VisualState::Lifted)?);
        h.hover("#hero")?;
        assert!(controller.visual_state(&h, hero, VisualState::Lifted)?);

        h.focus("#age")?;
        assert!(controller.visual_state(&h, age, VisualState::Focused)?);
        h.blur("#age")?;
        assert!(!controller.visual_state(&h, age, VisualState::Focused)?);
    }
    Ok(())
}

#[test]
fn custom_selectors_and_class_names_are_honored() -> Result<()> {
    let mut config = InteractionConfig::default();
    config.selectors.cards = "article.tile".into();
    config.selectors.mobile_nav_id = "drawer".into();
    config.classes.lifted = "raised".into();
    config.classes.open = "is-open".into();
    config.global_toggle_name = "toggleDrawer".into();

    let html = "<article id='t' class='tile'></article><aside id='drawer'></aside>\
                <div id='legacy' class='glassCard'></div>";
    let mut h = loaded(html, config)?;
    h.hover("#t")?;
    h.assert_class("#t", "raised", true)?;
    h.hover("#legacy")?;
    h.assert_class("#legacy", "raised", false)?;
    assert_eq!(h.call_global("toggleDrawer")?, Some(true));
    h.assert_class("#drawer", "is-open", true)?;
    assert!(h.has_global("toggleDrawer"));
    Ok(())
}

#[test]
fn effects_follow_the_presentation_mode() -> Result<()> {
    let classes = PageController::default();
    assert_eq!(
        classes.effects(VisualState::Pressed, true),
        vec![Effect::AddClass("is-pressed".into())]
    );
    assert_eq!(
        classes.effects(VisualState::Open, false),
        vec![Effect::RemoveClass("open".into())]
    );

    let inline = PageController::new(inline_config())?;
    assert_eq!(
        inline.effects(VisualState::Focused, false),
        vec![Effect::SetStyle {
            property: "box-shadow".into(),
            value: "none".into(),
        }]
    );
    assert_eq!(
        inline.effects(VisualState::Open, true),
        vec![Effect::AddClass("open".into())]
    );
    Ok(())
}

#[test]
fn controller_rejects_invalid_configuration() {
    let mut config = InteractionConfig::default();
    config.selectors.buttons = "button:hover".into();
    assert!(matches!(PageController::new(config), Err(Error::Config(_))));
}
