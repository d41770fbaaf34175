//! Subscribe-able media-query observables.
//!
//! The UI feeds these from `matchMedia`; everything else reads the current
//! value synchronously or subscribes for changes.

use std::collections::BTreeMap;

/// Query used for the reduced-motion gate.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Query below which the sidebar becomes the mobile nav.
pub const MOBILE_QUERY: &str = "(max-width: 768px)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaToken(u64);

type Listener = Box<dyn FnMut(bool)>;

/// A single media query's match state.
pub struct MediaQuery {
    query: &'static str,
    matches: bool,
    listeners: BTreeMap<MediaToken, Listener>,
    next_token: u64,
}

impl std::fmt::Debug for MediaQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaQuery")
            .field("query", &self.query)
            .field("matches", &self.matches)
            .finish_non_exhaustive()
    }
}

impl MediaQuery {
    /// Create with the synchronous initial read.
    pub fn new(query: &'static str, initial: bool) -> Self {
        Self {
            query,
            matches: initial,
            listeners: BTreeMap::new(),
            next_token: 0,
        }
    }

    pub fn query(&self) -> &'static str {
        self.query
    }

    pub fn matches(&self) -> bool {
        self.matches
    }

    pub fn subscribe(&mut self, listener: impl FnMut(bool) + 'static) -> MediaToken {
        self.next_token += 1;
        let token = MediaToken(self.next_token);
        self.listeners.insert(token, Box::new(listener));
        token
    }

    pub fn unsubscribe(&mut self, token: MediaToken) -> bool {
        self.listeners.remove(&token).is_some()
    }

    /// Record a new match state. Listeners only hear actual changes.
    pub fn update(&mut self, matches: bool) {
        if matches == self.matches {
            return;
        }
        self.matches = matches;
        for listener in self.listeners.values_mut() {
            listener(matches);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_initial_read_is_synchronous() {
        let mq = MediaQuery::new(MOBILE_QUERY, true);
        assert!(mq.matches());
    }

    #[test]
    fn test_listeners_hear_changes_only() {
        let mut mq = MediaQuery::new(REDUCED_MOTION_QUERY, false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let token = mq.subscribe(move |m| sink.borrow_mut().push(m));

        mq.update(false);
        mq.update(true);
        mq.update(true);
        assert_eq!(*seen.borrow(), vec![true]);

        mq.unsubscribe(token);
        mq.update(false);
        assert_eq!(*seen.borrow(), vec![true]);
    }
}
