//! Outside-click dismissal for dropdowns.
//!
//! A dropdown registers once and marks clicks that land inside it. The
//! themed root dispatches after the click has bubbled, closing every
//! dropdown that did not see the click.

use datacore_core::dismiss::{DismissToken, OutsideClick};
use dioxus::prelude::*;

#[derive(Clone, Copy)]
pub struct DismissContext {
    registry: Signal<OutsideClick>,
}

impl DismissContext {
    pub fn new() -> Self {
        Self {
            registry: Signal::new(OutsideClick::new()),
        }
    }

    /// Called by the root click handler.
    pub fn dispatch(&mut self) {
        let closed = self.registry.write().dispatch();
        if closed > 0 {
            tracing::trace!("Outside click closed {} dropdown(s)", closed);
        }
    }
}

impl Default for DismissContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`use_outside_click`].
#[derive(Clone, Copy)]
pub struct DismissHandle {
    ctx: DismissContext,
    token: Signal<Option<DismissToken>>,
}

impl DismissHandle {
    /// Call from the dropdown container's `onclick`.
    pub fn inside(&self) {
        if let Some(token) = *self.token.peek() {
            let mut registry = self.ctx.registry;
            registry.write().mark_inside(token);
        }
    }
}

/// Close `open` on clicks outside the caller's container. Registers while
/// open and deregisters on close or unmount.
pub fn use_outside_click(mut open: Signal<bool>) -> DismissHandle {
    let ctx = use_context::<DismissContext>();
    let mut token = use_signal(|| None::<DismissToken>);

    use_effect(move || {
        let is_open = open();
        let mut registry = ctx.registry;
        match (is_open, *token.peek()) {
            (true, None) => {
                let registered = registry.write().register(move || open.set(false));
                token.set(Some(registered));
            }
            (false, Some(registered)) => {
                registry.write().deregister(registered);
                token.set(None);
            }
            _ => {}
        }
    });

    use_drop(move || {
        let mut registry = ctx.registry;
        if let (Some(registered), Ok(mut registry)) = (*token.peek(), registry.try_write()) {
            registry.deregister(registered);
        }
    });

    DismissHandle { ctx, token }
}
