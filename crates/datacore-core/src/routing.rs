//! Theme-aware route table.
//!
//! Each logical route key binds a pathname pattern to a standard page and,
//! optionally, a console page. Resolution picks the console page only when a
//! console variant is active and one is bound; otherwise the standard page
//! is used unchanged and re-skinned through CSS variables.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::theme::Theme;

/// How long the content fade runs after a pathname change.
pub const PAGE_OUT_DURATION: Duration = Duration::from_millis(100);

/// Abstract identifier for a page, e.g. `vehicles/detail`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteKey(pub &'static str);

impl RouteKey {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Pages bound to one route key.
#[derive(Clone, Debug)]
pub struct RouteBinding<P> {
    pub pattern: &'static str,
    pub standard: P,
    pub console: Option<P>,
}

impl<P> RouteBinding<P> {
    pub fn page_for(&self, theme: Theme) -> &P {
        match (&self.console, theme.is_console()) {
            (Some(console), true) => console,
            _ => &self.standard,
        }
    }
}

/// A matched pathname.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    pub key: RouteKey,
    pub params: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Integer path parameter, e.g. `:id`.
    pub fn id(&self, name: &str) -> Option<u64> {
        self.param(name).and_then(|v| v.parse().ok())
    }
}

/// Data-driven binding table, matched in insertion order.
#[derive(Clone, Debug)]
pub struct RouteTable<P> {
    bindings: Vec<(RouteKey, RouteBinding<P>)>,
}

impl<P> Default for RouteTable<P> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<P> RouteTable<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to a pattern and its standard page. Rebinding replaces.
    pub fn route(mut self, key: &'static str, pattern: &'static str, standard: P) -> Self {
        let key = RouteKey(key);
        let binding = RouteBinding {
            pattern,
            standard,
            console: None,
        };
        match self.bindings.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = binding,
            None => self.bindings.push((key, binding)),
        }
        self
    }

    /// Attach a console page to an already-bound key. Unknown keys are ignored.
    pub fn console(mut self, key: &'static str, page: P) -> Self {
        match self.bindings.iter_mut().find(|(k, _)| k.0 == key) {
            Some((_, binding)) => binding.console = Some(page),
            None => tracing::warn!("Console page for unbound route {}", key),
        }
        self
    }

    pub fn binding(&self, key: RouteKey) -> Option<&RouteBinding<P>> {
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, b)| b)
    }

    pub fn keys(&self) -> impl Iterator<Item = RouteKey> + '_ {
        self.bindings.iter().map(|(k, _)| *k)
    }

    pub fn has_console_page(&self, key: RouteKey) -> bool {
        self.binding(key).is_some_and(|b| b.console.is_some())
    }

    pub fn resolve(&self, key: RouteKey, theme: Theme) -> Option<&P> {
        self.binding(key).map(|b| b.page_for(theme))
    }

    /// Match a pathname against the bound patterns.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        let path = pathname(path);
        self.bindings.iter().find_map(|(key, binding)| {
            match_pattern(binding.pattern, path).map(|params| RouteMatch { key: *key, params })
        })
    }

    pub fn resolve_path(&self, path: &str, theme: Theme) -> Option<(RouteMatch, &P)> {
        let matched = self.match_path(path)?;
        let page = self.resolve(matched.key, theme)?;
        Some((matched, page))
    }
}

/// Strip query and fragment.
pub fn pathname(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Match `/a/:id/b` style patterns. Returns captured parameters.
pub fn match_pattern(pattern: &str, path: &str) -> Option<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();
    let mut want = segments(pattern);
    let mut have = segments(path);
    loop {
        match (want.next(), have.next()) {
            (None, None) => return Some(params),
            (Some(w), Some(h)) => {
                if let Some(name) = w.strip_prefix(':') {
                    params.insert(name.to_string(), h.to_string());
                } else if w != h {
                    return None;
                }
            }
            _ => return None,
        }
    }
}

/// Top-level section for sidebar highlighting. The root path is `dashboard`.
pub fn section_of(path: &str) -> &str {
    segments(pathname(path)).next().unwrap_or("dashboard")
}

/// Pending content fade, identified by generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageOut {
    pub generation: u64,
    pub duration: Duration,
}

/// Tracks pathname changes and raises the page-out signal.
#[derive(Clone, Debug, Default)]
pub struct PageTransition {
    current: Option<String>,
    generation: u64,
    active: bool,
}

impl PageTransition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether the page-out class should be applied.
    pub fn is_page_out(&self) -> bool {
        self.active
    }

    /// The fade currently running, if any.
    pub fn active(&self) -> Option<PageOut> {
        self.active.then_some(PageOut {
            generation: self.generation,
            duration: PAGE_OUT_DURATION,
        })
    }

    /// Record a navigation. Returns a page-out when the pathname changed;
    /// query or fragment changes alone do not fade. The first navigation
    /// only records the path.
    pub fn navigate(&mut self, path: &str) -> Option<PageOut> {
        let next = pathname(path);
        match self.current.as_deref() {
            Some(current) if current == next => None,
            None => {
                self.current = Some(next.to_string());
                None
            }
            Some(_) => {
                self.current = Some(next.to_string());
                self.generation += 1;
                self.active = true;
                Some(PageOut {
                    generation: self.generation,
                    duration: PAGE_OUT_DURATION,
                })
            }
        }
    }

    /// End a fade. A newer navigation's fade is left running.
    pub fn finish(&mut self, page_out: PageOut) {
        if page_out.generation == self.generation {
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable<&'static str> {
        RouteTable::new()
            .route("dashboard", "/", "Dashboard")
            .route("vehicles", "/vehicles", "Vehicles")
            .route("vehicles/detail", "/vehicles/:id", "VehicleDetail")
            .route("infra/host/detail", "/infrastructure/hosts/:id", "HostDetail")
            .console("vehicles/detail", "ConsoleVehicleDetail")
    }

    #[test]
    fn test_console_page_only_under_console_theme() {
        let t = table();
        let key = RouteKey("vehicles/detail");
        assert_eq!(t.resolve(key, Theme::Standard), Some(&"VehicleDetail"));
        assert_eq!(t.resolve(key, Theme::ClassicConsole), Some(&"ConsoleVehicleDetail"));
        assert_eq!(t.resolve(key, Theme::ModernConsole), Some(&"ConsoleVehicleDetail"));
    }

    #[test]
    fn test_unpaired_route_falls_back_to_standard() {
        let t = table();
        assert_eq!(
            t.resolve(RouteKey("vehicles"), Theme::ClassicConsole),
            Some(&"Vehicles")
        );
        assert!(!t.has_console_page(RouteKey("vehicles")));
    }

    #[test]
    fn test_match_path_with_params() {
        let t = table();
        let m = t.match_path("/infrastructure/hosts/12?tab=containers").unwrap();
        assert_eq!(m.key, RouteKey("infra/host/detail"));
        assert_eq!(m.id("id"), Some(12));

        assert_eq!(t.match_path("/").unwrap().key, RouteKey("dashboard"));
        assert!(t.match_path("/nowhere").is_none());
    }

    #[test]
    fn test_console_for_unbound_key_is_ignored() {
        let t = table().console("trek", "ConsoleTrek");
        assert!(t.binding(RouteKey("trek")).is_none());
    }

    #[test]
    fn test_section_of() {
        assert_eq!(section_of("/"), "dashboard");
        assert_eq!(section_of("/projects/3/kanban"), "projects");
    }

    #[test]
    fn test_page_out_on_pathname_change_only() {
        let mut transition = PageTransition::new();
        assert_eq!(transition.navigate("/vehicles"), None);
        assert_eq!(transition.navigate("/vehicles?sort=asc"), None);

        let out = transition.navigate("/projects").unwrap();
        assert!(transition.is_page_out());
        assert_eq!(out.duration, Duration::from_millis(100));

        transition.finish(out);
        assert!(!transition.is_page_out());
    }

    #[test]
    fn test_stale_finish_keeps_newer_fade() {
        let mut transition = PageTransition::new();
        transition.navigate("/a");
        let first = transition.navigate("/b").unwrap();
        let second = transition.navigate("/c").unwrap();

        transition.finish(first);
        assert!(transition.is_page_out());
        transition.finish(second);
        assert!(!transition.is_page_out());
    }

    #[test]
    fn test_active_reports_latest_fade() {
        let mut transition = PageTransition::new();
        transition.navigate("/a");
        assert_eq!(transition.active(), None);

        transition.navigate("/b");
        let second = transition.navigate("/c").unwrap();
        assert_eq!(transition.active(), Some(second));
        assert_eq!(second.duration, PAGE_OUT_DURATION);

        transition.finish(second);
        assert_eq!(transition.active(), None);
    }
}
