//! Rolling text widget.

use std::time::Instant;

use datacore_core::rolling::{ROLL_DURATION, RollingText as RollingModel};
use dioxus::prelude::*;

use crate::provider::use_reduced_motion;

/// Renders `text` glyph by glyph; glyphs that changed since the last
/// committed value carry the `rolling` class for a short while.
#[component]
pub fn RollingText(text: String, #[props(default)] class: String) -> Element {
    let reduced = use_reduced_motion();
    let mut model = use_signal(|| RollingModel::new(text.clone()));

    use_effect(use_reactive((&text,), move |(text,)| {
        if model.peek().text() == text {
            return;
        }
        let generation = {
            let mut m = model.write();
            m.update(&text, Instant::now());
            m.generation()
        };
        spawn(async move {
            tokio::time::sleep(ROLL_DURATION).await;
            model.write().settle(generation);
        });
    }));

    let glyphs = model.read().glyphs(Instant::now());

    rsx! {
        span { class: "rolling-text {class}",
            for (i, glyph) in glyphs.into_iter().enumerate() {
                span {
                    key: "{i}",
                    class: if glyph.rolling && !reduced { "glyph rolling" } else { "glyph" },
                    "{glyph.ch}"
                }
            }
        }
    }
}
