//! Animated data cascade strip.

use datacore_core::ConsoleVariant;
use datacore_core::cascade::{CascadeSpec, generate, looped, pass_height};
use dioxus::prelude::*;

use crate::provider::use_reduced_motion;

/// Seeded strip of colored blocks. The inner column holds the sequence
/// twice and is animated by CSS from `-50%` to `0`.
#[component]
pub fn Cascade(
    seed: u64,
    variant: ConsoleVariant,
    #[props(default = true)] labels: bool,
    #[props(default = 24)] blocks: usize,
) -> Element {
    let reduced = use_reduced_motion();
    let spec = CascadeSpec {
        seed,
        blocks,
        variant,
        labels,
    };
    let strip = generate(&spec);
    let height = pass_height(&strip);
    let inner_class = if reduced {
        "cascade-inner"
    } else {
        "cascade-inner cascade-animated"
    };

    rsx! {
        div { class: "cascade",
            div {
                class: "{inner_class}",
                style: "--cascade-pass: {height}px",
                for (i, block) in looped(&strip).into_iter().enumerate() {
                    div {
                        key: "{i}",
                        class: "cascade-block",
                        style: "height: {block.height}px; background: {block.color}",
                        if let Some(label) = block.label {
                            span { class: "cascade-label", "{label}" }
                        }
                    }
                }
            }
        }
    }
}
