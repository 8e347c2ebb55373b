use super::*;

/// User interface events the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    MouseEnter,
    MouseLeave,
    MouseDown,
    MouseUp,
    Focus,
    Blur,
    Click,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::MouseEnter,
        EventKind::MouseLeave,
        EventKind::MouseDown,
        EventKind::MouseUp,
        EventKind::Focus,
        EventKind::Blur,
        EventKind::Click,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseUp => "mouseup",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::Click => "click",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Enter/leave and focus/blur are delivered to the target only.
    pub fn bubbles(self) -> bool {
        matches!(
            self,
            EventKind::MouseDown | EventKind::MouseUp | EventKind::Click
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One presentation mutation applied to the element a listener is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    AddClass(String),
    RemoveClass(String),
    SetStyle { property: String, value: String },
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::AddClass(class_name) => write!(f, "+.{class_name}"),
            Effect::RemoveClass(class_name) => write!(f, "-.{class_name}"),
            Effect::SetStyle { property, value } => write!(f, "{property}: {value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) effects: Vec<Effect>,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<EventKind, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: EventKind, listener: Listener) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default()
            .push(listener);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: EventKind) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(&event))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, node_id: NodeId, event: EventKind) -> usize {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(&event))
            .map_or(0, Vec::len)
    }

    pub(crate) fn total(&self) -> usize {
        self.map
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) kind: EventKind,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) listeners_run: usize,
}

impl EventState {
    pub(crate) fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            listeners_run: 0,
        }
    }
}
