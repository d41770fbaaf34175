//! Deterministic data cascade generator.
//!
//! The cascade is a thin vertical strip of colored blocks. The same seed
//! always yields the same strip, so re-renders do not reshuffle it. The
//! rendered container holds the sequence twice and translates `-50% → 0`,
//! which makes the loop seamless.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::theme::ConsoleVariant;

/// Warm hues of the classic console.
const CLASSIC_COLORS: &[&str] = &[
    "var(--lcars-sunflower)",
    "var(--lcars-african-violet)",
    "var(--lcars-butterscotch)",
    "var(--lcars-tanoi)",
    "var(--lcars-gold)",
    "var(--lcars-almond-creme)",
];

/// Cooler hues of the modern console.
const MODERN_COLORS: &[&str] = &[
    "var(--lcars-ice)",
    "var(--lcars-sky)",
    "var(--lcars-lilac)",
    "var(--lcars-moonlit-violet)",
    "var(--lcars-green)",
    "var(--lcars-gray)",
];

pub fn colors_for(variant: ConsoleVariant) -> &'static [&'static str] {
    match variant {
        ConsoleVariant::Classic => CLASSIC_COLORS,
        ConsoleVariant::Modern => MODERN_COLORS,
    }
}

/// One block of the strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeBlock {
    /// Height in pixels.
    pub height: u32,
    pub color: &'static str,
    /// Decorative 4-hex-digit overlay.
    pub label: Option<String>,
}

/// Parameters for a cascade strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CascadeSpec {
    pub seed: u64,
    pub blocks: usize,
    pub variant: ConsoleVariant,
    pub labels: bool,
}

impl CascadeSpec {
    pub fn new(seed: u64, variant: ConsoleVariant) -> Self {
        Self {
            seed,
            blocks: 24,
            variant,
            labels: true,
        }
    }
}

/// Generate the block sequence for `spec`.
pub fn generate(spec: &CascadeSpec) -> Vec<CascadeBlock> {
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let palette = colors_for(spec.variant);
    (0..spec.blocks)
        .map(|_| {
            let height = rng.random_range(8..=48);
            let color = palette[rng.random_range(0..palette.len())];
            let label = (spec.labels && rng.random_bool(0.3))
                .then(|| format!("{:04X}", rng.random_range(0..=0xFFFFu32)));
            CascadeBlock {
                height,
                color,
                label,
            }
        })
        .collect()
}

/// The sequence twice over, for the looping container.
pub fn looped(blocks: &[CascadeBlock]) -> Vec<CascadeBlock> {
    blocks.iter().chain(blocks.iter()).cloned().collect()
}

/// Total height of one pass.
pub fn pass_height(blocks: &[CascadeBlock]) -> u32 {
    blocks.iter().map(|b| b.height).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_strip() {
        let spec = CascadeSpec::new(47, ConsoleVariant::Classic);
        assert_eq!(generate(&spec), generate(&spec));
    }

    #[test]
    fn test_different_seed_differs() {
        let a = generate(&CascadeSpec::new(1, ConsoleVariant::Classic));
        let b = generate(&CascadeSpec::new(2, ConsoleVariant::Classic));
        assert_ne!(a, b);
    }

    #[test]
    fn test_colors_follow_variant() {
        let blocks = generate(&CascadeSpec::new(9, ConsoleVariant::Modern));
        assert!(blocks.iter().all(|b| MODERN_COLORS.contains(&b.color)));
    }

    #[test]
    fn test_labels_are_four_hex_digits() {
        let blocks = generate(&CascadeSpec::new(3, ConsoleVariant::Classic));
        for label in blocks.iter().filter_map(|b| b.label.as_ref()) {
            assert_eq!(label.len(), 4);
            assert!(label.chars().all(|c| c.is_ascii_hexdigit()));
        }

        let mut spec = CascadeSpec::new(3, ConsoleVariant::Classic);
        spec.labels = false;
        assert!(generate(&spec).iter().all(|b| b.label.is_none()));
    }

    #[test]
    fn test_looped_is_double_height() {
        let blocks = generate(&CascadeSpec::new(5, ConsoleVariant::Classic));
        let looped = looped(&blocks);
        assert_eq!(looped.len(), blocks.len() * 2);
        assert_eq!(pass_height(&looped), pass_height(&blocks) * 2);
    }
}
