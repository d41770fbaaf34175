//! Outside-click dismissal for dropdowns and popovers.
//!
//! A popover registers while open and keeps the returned token. Clicks
//! inside it are marked with [`OutsideClick::mark_inside`] as the event
//! bubbles; when the click reaches the root, [`OutsideClick::dispatch`]
//! dismisses every registration that was not marked.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DismissToken(u64);

type OnDismiss = Box<dyn FnMut()>;

#[derive(Default)]
pub struct OutsideClick {
    registrations: BTreeMap<DismissToken, OnDismiss>,
    inside: BTreeSet<DismissToken>,
    next_token: u64,
}

impl OutsideClick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, on_dismiss: impl FnMut() + 'static) -> DismissToken {
        self.next_token += 1;
        let token = DismissToken(self.next_token);
        self.registrations.insert(token, Box::new(on_dismiss));
        token
    }

    pub fn deregister(&mut self, token: DismissToken) -> bool {
        self.inside.remove(&token);
        self.registrations.remove(&token).is_some()
    }

    pub fn is_registered(&self, token: DismissToken) -> bool {
        self.registrations.contains_key(&token)
    }

    /// The current click started inside the popover owning `token`.
    pub fn mark_inside(&mut self, token: DismissToken) {
        self.inside.insert(token);
    }

    /// Finish a click: dismiss and drop every unmarked registration.
    /// Returns how many were dismissed.
    pub fn dispatch(&mut self) -> usize {
        let inside = std::mem::take(&mut self.inside);
        let outside: Vec<DismissToken> = self
            .registrations
            .keys()
            .filter(|t| !inside.contains(*t))
            .copied()
            .collect();
        for token in &outside {
            if let Some(mut on_dismiss) = self.registrations.remove(token) {
                on_dismiss();
            }
        }
        outside.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_outside_click_dismisses() {
        let mut registry = OutsideClick::new();
        let closed = Rc::new(Cell::new(false));
        let flag = closed.clone();
        let token = registry.register(move || flag.set(true));

        assert_eq!(registry.dispatch(), 1);
        assert!(closed.get());
        assert!(!registry.is_registered(token));
    }

    #[test]
    fn test_inside_click_keeps_open() {
        let mut registry = OutsideClick::new();
        let closed = Rc::new(Cell::new(false));
        let flag = closed.clone();
        let token = registry.register(move || flag.set(true));

        registry.mark_inside(token);
        assert_eq!(registry.dispatch(), 0);
        assert!(!closed.get());

        // The mark only lasts for one click.
        assert_eq!(registry.dispatch(), 1);
    }

    #[test]
    fn test_deregister_prevents_dismiss() {
        let mut registry = OutsideClick::new();
        let closed = Rc::new(Cell::new(false));
        let flag = closed.clone();
        let token = registry.register(move || flag.set(true));
        assert!(registry.deregister(token));
        registry.dispatch();
        assert!(!closed.get());
    }
}
