use super::*;

const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

/// A scroll-into-view request recorded by the harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: NodeId,
    pub label: String,
    pub options: ScrollIntoViewOptions,
}

/// Deterministic in-memory page.
///
/// Built from HTML, it implements [`PageSurface`] and drives the page the way
/// a user would: hovering, pressing, focusing and clicking elements found by
/// selector.
#[derive(Debug)]
pub struct Harness {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) globals: HashMap<String, GlobalAction>,
    pub(crate) active_element: Option<NodeId>,
    pub(crate) viewport_width: u32,
    pub(crate) initialized: bool,
    pub(crate) scroll_requests: Vec<ScrollRequest>,
    pub(crate) trace: TraceState,
}

impl Harness {
    /// Parses `html` and exposes the default controller's globals, so inline
    /// `onclick` handlers work before the document is ready.
    pub fn from_html(html: &str) -> Result<Self> {
        let mut harness = Self {
            dom: parse_html(html)?,
            listeners: ListenerStore::default(),
            globals: HashMap::new(),
            active_element: None,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            initialized: false,
            scroll_requests: Vec::new(),
            trace: TraceState::default(),
        };
        PageController::default().install_globals(&mut harness)?;
        Ok(harness)
    }

    /// Like [`Harness::from_html`] with an explicit viewport width.
    pub fn with_viewport(html: &str, width: u32) -> Result<Self> {
        let mut harness = Self::from_html(html)?;
        harness.viewport_width = width;
        Ok(harness)
    }

    /// Fires the "document ready" hook: runs the controller's wiring pass.
    pub fn dom_content_loaded(&mut self, controller: &PageController) -> Result<InitOutcome> {
        self.trace_line(|_| "[ready] DOMContentLoaded".to_string());
        controller.initialize(self)
    }

    /// Changes the viewport; wiring that already happened is unaffected.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace.enabled = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace.events = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.trace.set_log_limit(max_entries)
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace.take()
    }

    pub fn hover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, EventKind::MouseEnter)?;
        Ok(())
    }

    pub fn unhover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, EventKind::MouseLeave)?;
        Ok(())
    }

    pub fn press(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, EventKind::MouseDown)?;
        Ok(())
    }

    pub fn release(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, EventKind::MouseUp)?;
        Ok(())
    }

    /// Full click: press, release, `click`, then any `onclick="fn()"` global.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        self.dispatch_event(target, EventKind::MouseDown)?;
        self.dispatch_event(target, EventKind::MouseUp)?;
        self.dispatch_event(target, EventKind::Click)?;

        if let Some(name) = self
            .dom
            .attr(target, "onclick")
            .as_deref()
            .and_then(parse_inline_call)
        {
            self.call_global(&name)?;
        }
        Ok(())
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.focus_node(target)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.blur_node(target)
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let kind = EventKind::parse(event)
            .ok_or_else(|| Error::Runtime(format!("unsupported event type: {event}")))?;
        self.dispatch_event(target, kind)?;
        Ok(())
    }

    /// Calls a global exposed by the page; `None` when the action's target is
    /// missing.
    pub fn call_global(&mut self, name: &str) -> Result<Option<bool>> {
        let action = self
            .globals
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Runtime(format!("{name} is not defined")))?;
        let outcome = action.run(self)?;
        self.trace_line(|_| format!("[global] {name}() -> {outcome:?}"));
        Ok(outcome)
    }

    pub fn has_global(&self, name: &str) -> bool {
        self.globals.contains_key(name)
    }

    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    pub fn select(&self, selector: &str) -> Result<NodeId> {
        self.select_one(selector)
    }

    pub fn select_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    /// Listeners for `event` on the first element matching `selector`.
    pub fn listener_count(&self, selector: &str, event: EventKind) -> Result<usize> {
        let target = self.select_one(selector)?;
        Ok(self.listeners.count(target, event))
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.total()
    }

    pub fn class_list(&self, selector: &str) -> Result<Vec<String>> {
        let target = self.select_one(selector)?;
        Ok(self
            .dom
            .attr(target, "class")
            .map(|classes| classes.split_whitespace().map(ToOwned::to_owned).collect())
            .unwrap_or_default())
    }

    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.style_get(target, property)
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        self.check(selector, target, expected, &actual)
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.class_contains(target, class_name)?;
        self.check(
            selector,
            target,
            &class_state(class_name, expected),
            &class_state(class_name, actual),
        )
    }

    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style_get(target, property)?;
        self.check(
            selector,
            target,
            &format!("{property}: {expected}"),
            &format!("{property}: {actual}"),
        )
    }

    pub fn assert_focused(&self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self
            .active_element
            .map(|node| self.trace_node_label(node))
            .unwrap_or_else(|| "none".into());
        self.check(selector, target, &self.trace_node_label(target), &actual)
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    fn check(&self, selector: &str, target: NodeId, expected: &str, actual: &str) -> Result<()> {
        if actual == expected {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            dom_snippet: self.node_snippet(target),
        })
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        dom::truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    fn ensure_element(&self, node_id: NodeId) -> Result<()> {
        if self.dom.is_valid_node(node_id) && self.dom.element(node_id).is_some() {
            Ok(())
        } else {
            Err(Error::Runtime(format!("{node_id:?} is not an element")))
        }
    }

    fn dispatch_event(&mut self, target: NodeId, kind: EventKind) -> Result<EventState> {
        let mut event = EventState::new(kind, target);

        // Target first, then ancestors for bubbling events.
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            event.current_target = node;
            self.invoke_listeners(&mut event)?;
            if !kind.bubbles() {
                break;
            }
            cursor = self.dom.parent(node);
        }

        self.trace_event_line(|this| {
            format!(
                "[event] done {} target={} listeners={}",
                event.kind,
                this.trace_node_label(event.target),
                event.listeners_run
            )
        });
        Ok(event)
    }

    fn invoke_listeners(&mut self, event: &mut EventState) -> Result<()> {
        let node = event.current_target;
        for listener in self.listeners.get(node, event.kind) {
            self.trace_event_line(|this| {
                format!(
                    "[event] {} target={} current={} effects=[{}]",
                    event.kind,
                    this.trace_node_label(event.target),
                    this.trace_node_label(node),
                    listener
                        .effects
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            });
            for effect in &listener.effects {
                self.apply_effect_to(node, effect)?;
            }
            event.listeners_run += 1;
        }
        Ok(())
    }

    fn apply_effect_to(&mut self, node: NodeId, effect: &Effect) -> Result<()> {
        match effect {
            Effect::AddClass(class_name) => self.dom.class_add(node, class_name),
            Effect::RemoveClass(class_name) => self.dom.class_remove(node, class_name),
            Effect::SetStyle { property, value } => self.dom.style_set(node, property, value),
        }
    }

    fn focus_node(&mut self, node: NodeId) -> Result<()> {
        if !self.dom.is_focusable(node) || self.active_element == Some(node) {
            return Ok(());
        }
        if let Some(current) = self.active_element {
            self.blur_node(current)?;
        }
        self.active_element = Some(node);
        self.dispatch_event(node, EventKind::Focus)?;
        Ok(())
    }

    fn blur_node(&mut self, node: NodeId) -> Result<()> {
        if self.active_element != Some(node) {
            return Ok(());
        }
        self.active_element = None;
        self.dispatch_event(node, EventKind::Blur)?;
        Ok(())
    }

    fn trace_event_line(&mut self, line: impl FnOnce(&Self) -> String) {
        if self.trace.wants_events() {
            let line = line(self);
            self.trace.record(line);
        }
    }

    fn trace_line(&mut self, line: impl FnOnce(&Self) -> String) {
        if self.trace.enabled {
            let line = line(self);
            self.trace.record(line);
        }
    }

    fn trace_node_label(&self, node: NodeId) -> String {
        if let Some(id) = self.dom.attr(node, "id").filter(|id| !id.is_empty()) {
            return format!("#{id}");
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }
}

impl PageSurface for Harness {
    type Element = NodeId;

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector(selector)
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.by_id(id)
    }

    fn scroll_into_view(&mut self, element: NodeId, options: ScrollIntoViewOptions) -> Result<()> {
        self.ensure_element(element)?;
        let label = self.trace_node_label(element);
        self.trace_line(|_| {
            format!(
                "[scroll] {label} behavior={:?} block={:?}",
                options.behavior, options.block
            )
        });
        self.scroll_requests.push(ScrollRequest {
            target: element,
            label,
            options,
        });
        Ok(())
    }

    fn add_listener(&mut self, element: NodeId, event: EventKind, effects: Vec<Effect>) -> Result<()> {
        self.ensure_element(element)?;
        self.listeners.add(element, event, Listener { effects });
        Ok(())
    }

    fn apply_effect(&mut self, element: NodeId, effect: &Effect) -> Result<()> {
        self.apply_effect_to(element, effect)
    }

    fn has_class(&self, element: NodeId, class_name: &str) -> Result<bool> {
        self.dom.class_contains(element, class_name)
    }

    fn toggle_class(&mut self, element: NodeId, class_name: &str) -> Result<bool> {
        self.dom.class_toggle(element, class_name)
    }

    fn style_value(&self, element: NodeId, property: &str) -> Result<String> {
        self.dom.style_get(element, property)
    }

    fn expose_global(&mut self, name: &str, action: GlobalAction) -> Result<()> {
        self.globals.insert(name.to_string(), action);
        Ok(())
    }
}

fn class_state(class_name: &str, present: bool) -> String {
    if present {
        format!(".{class_name} present")
    } else {
        format!(".{class_name} absent")
    }
}

/// `toggleMobileNav()` or `toggleMobileNav();` → `toggleMobileNav`.
pub(crate) fn parse_inline_call(source: &str) -> Option<String> {
    let call = source.trim().trim_end_matches(';').trim_end();
    let name = call.strip_suffix("()")?.trim_end();
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !name.starts_with(|c: char| c.is_ascii_digit());
    valid.then(|| name.to_string())
}
