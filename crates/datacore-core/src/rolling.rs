//! Per-glyph change detection for rolling text.

use std::time::{Duration, Instant};

/// How long a changed glyph keeps its roll class.
pub const ROLL_DURATION: Duration = Duration::from_millis(250);

/// Positions in `next` whose glyph differs from `prev`.
///
/// Positions past the end of `prev` count as changed; glyphs removed from
/// the end are not reported since there is nothing left to animate.
pub fn changed_positions(prev: &str, next: &str) -> Vec<usize> {
    let mut old = prev.chars();
    next.chars()
        .enumerate()
        .filter_map(|(i, c)| match old.next() {
            Some(o) if o == c => None,
            _ => Some(i),
        })
        .collect()
}

/// Positions that roll when `prev` becomes `next`.
///
/// A changed digit rolls its whole digit field, so `12:00:00 → 12:00:01`
/// rolls the seconds pair and a stardate tick rolls only the decimal.
/// Other glyphs roll alone.
pub fn rolling_positions(prev: &str, next: &str) -> Vec<usize> {
    let glyphs: Vec<char> = next.chars().collect();
    let mut rolling = vec![false; glyphs.len()];
    for i in changed_positions(prev, next) {
        if !glyphs[i].is_ascii_digit() {
            rolling[i] = true;
            continue;
        }
        let mut start = i;
        while start > 0 && glyphs[start - 1].is_ascii_digit() {
            start -= 1;
        }
        let mut end = i;
        while end + 1 < glyphs.len() && glyphs[end + 1].is_ascii_digit() {
            end += 1;
        }
        rolling[start..=end].iter_mut().for_each(|r| *r = true);
    }
    rolling
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.then_some(i))
        .collect()
}

/// One glyph ready to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub rolling: bool,
}

/// Rolling-text model. The previous committed text is the diff base;
/// overlapping updates coalesce so only the latest roll is shown.
#[derive(Clone, Debug, Default)]
pub struct RollingText {
    text: String,
    changed: Vec<usize>,
    rolled_at: Option<Instant>,
    generation: u64,
}

impl RollingText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Incremented on every update that flagged glyphs.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Commit new text at `now`. Returns the positions that will roll.
    pub fn update(&mut self, next: &str, now: Instant) -> &[usize] {
        if next == self.text {
            return &[];
        }
        self.changed = rolling_positions(&self.text, next);
        self.text = next.to_string();
        self.rolled_at = Some(now);
        self.generation += 1;
        &self.changed
    }

    /// Positions still rolling at `now`.
    pub fn rolling_at(&self, now: Instant) -> &[usize] {
        match self.rolled_at {
            Some(at) if now.saturating_duration_since(at) < ROLL_DURATION => &self.changed,
            _ => &[],
        }
    }

    /// Clear the roll flags once the animation for `generation` is over.
    pub fn settle(&mut self, generation: u64) {
        if generation == self.generation {
            self.changed.clear();
            self.rolled_at = None;
        }
    }

    pub fn glyphs(&self, now: Instant) -> Vec<Glyph> {
        let rolling = self.rolling_at(now);
        self.text
            .chars()
            .enumerate()
            .map(|(i, ch)| Glyph {
                ch,
                rolling: rolling.contains(&i),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_trailing_digit() {
        assert_eq!(changed_positions("12:00:00", "12:00:01"), vec![7]);
    }

    #[test]
    fn test_carry_flags_trailing_pair() {
        assert_eq!(changed_positions("12:00:09", "12:00:10"), vec![6, 7]);
    }

    #[test]
    fn test_changed_digit_rolls_its_field() {
        assert_eq!(rolling_positions("12:00:00", "12:00:01"), vec![6, 7]);
        assert_eq!(rolling_positions("80291.4", "80291.5"), vec![6]);
        assert_eq!(rolling_positions("OFFLINE", "ONLINE"), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_growth_flags_new_positions() {
        assert_eq!(changed_positions("99", "100"), vec![0, 1, 2]);
        assert_eq!(changed_positions("100", "10"), Vec::<usize>::new());
    }

    #[test]
    fn test_roll_expires_after_duration() {
        let t0 = Instant::now();
        let mut text = RollingText::new("12:00:09");
        assert_eq!(text.update("12:00:10", t0), &[6, 7]);

        assert_eq!(text.rolling_at(t0 + Duration::from_millis(100)), &[6, 7]);
        assert!(text.rolling_at(t0 + ROLL_DURATION).is_empty());
    }

    #[test]
    fn test_overlapping_updates_coalesce() {
        let t0 = Instant::now();
        let mut text = RollingText::new("12:00:59");
        text.update("12:01:00", t0);
        let first = text.generation();
        text.update("12:01:01", t0 + Duration::from_millis(50));

        // The diff base was the committed "12:01:00", so only seconds roll.
        assert_eq!(text.rolling_at(t0 + Duration::from_millis(60)), &[6, 7]);

        // Settling the superseded roll leaves the newer one alone.
        text.settle(first);
        assert_eq!(text.rolling_at(t0 + Duration::from_millis(60)), &[6, 7]);
        text.settle(text.generation());
        assert!(text.rolling_at(t0 + Duration::from_millis(60)).is_empty());
    }

    #[test]
    fn test_unchanged_update_is_noop() {
        let t0 = Instant::now();
        let mut text = RollingText::new("A");
        assert!(text.update("A", t0).is_empty());
        assert_eq!(text.generation(), 0);
        assert_eq!(
            text.glyphs(t0),
            vec![Glyph {
                ch: 'A',
                rolling: false
            }]
        );
    }
}
