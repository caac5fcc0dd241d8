//! Injected transient-notification service.

use std::{cell::RefCell, rc::Rc};

use crate::event_bus::{EventBus, Topic};

/// Visual category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Completed action.
    Success,
    /// Failed action.
    Error,
    /// Neutral information.
    Info,
}

impl ToastKind {
    /// Stable token used for styling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Identifier of one shown toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

/// One active notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    /// How long the container keeps the toast visible.
    pub duration_ms: u32,
}

#[derive(Debug, Default)]
struct ToastState {
    next_id: u64,
    active: Vec<Toast>,
}

/// Notification dispatcher shared through the runtime context.
///
/// The service only tracks the active list; the container view owns timers and calls
/// [`ToastCenter::dismiss`] when a toast expires. Every change publishes
/// [`Topic::ToastsUpdated`].
#[derive(Clone)]
pub struct ToastCenter {
    state: Rc<RefCell<ToastState>>,
    bus: EventBus,
    default_duration_ms: u32,
}

impl ToastCenter {
    /// Creates a center publishing on `bus`.
    pub fn new(bus: EventBus, default_duration_ms: u32) -> Self {
        Self {
            state: Rc::default(),
            bus,
            default_duration_ms,
        }
    }

    /// Shows a toast and returns its id. `None` uses the default duration.
    pub fn show(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
        duration_ms: Option<u32>,
    ) -> ToastId {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = ToastId(state.next_id);
            state.next_id += 1;
            state.active.push(Toast {
                id,
                message: message.into(),
                kind,
                duration_ms: duration_ms.unwrap_or(self.default_duration_ms),
            });
            id
        };
        self.bus.publish(Topic::ToastsUpdated);
        id
    }

    /// Removes a toast. Unknown ids are ignored.
    pub fn dismiss(&self, id: ToastId) {
        let removed = {
            let mut state = self.state.borrow_mut();
            let before = state.active.len();
            state.active.retain(|toast| toast.id != id);
            state.active.len() != before
        };
        if removed {
            self.bus.publish(Topic::ToastsUpdated);
        }
    }

    /// Snapshot of the active toasts, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.state.borrow().active.clone()
    }
}

impl std::fmt::Debug for ToastCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastCenter")
            .field("active", &self.state.borrow().active.len())
            .field("default_duration_ms", &self.default_duration_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn show_uses_default_duration_and_publishes() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let _sub = {
            let hits = Rc::clone(&hits);
            bus.subscribe(Topic::ToastsUpdated, move || hits.set(hits.get() + 1))
        };
        let toasts = ToastCenter::new(bus, 3000);

        let id = toasts.show("Saved", ToastKind::Info, None);
        let explicit = toasts.show("Added", ToastKind::Success, Some(2000));

        let active = toasts.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, id);
        assert_eq!(active[0].duration_ms, 3000);
        assert_eq!(active[1].id, explicit);
        assert_eq!(active[1].duration_ms, 2000);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn dismiss_removes_only_known_ids() {
        let bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let _sub = {
            let hits = Rc::clone(&hits);
            bus.subscribe(Topic::ToastsUpdated, move || hits.set(hits.get() + 1))
        };
        let toasts = ToastCenter::new(bus, 3000);
        let id = toasts.show("Oops", ToastKind::Error, None);

        toasts.dismiss(ToastId(99));
        assert_eq!(hits.get(), 1);
        toasts.dismiss(id);
        assert_eq!(hits.get(), 2);
        assert!(toasts.active().is_empty());
    }

    #[test]
    fn separate_centers_are_isolated() {
        let first = ToastCenter::new(EventBus::new(), 3000);
        let second = ToastCenter::new(EventBus::new(), 3000);
        first.show("one", ToastKind::Info, None);
        assert!(second.active().is_empty());
    }
}
