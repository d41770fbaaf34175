//! Media-query and window hooks.

use datacore_core::media::{MOBILE_QUERY, MediaQuery};
use dioxus::prelude::*;

/// Subscribe to a CSS media query. Starts `false` until the webview
/// reports the first match, then tracks `change` events.
pub fn use_media_query(query: &'static str) -> Memo<bool> {
    let mut media = use_signal(|| MediaQuery::new(query, false));

    use_future(move || async move {
        let mut eval = document::eval(&format!(
            r#"
            const mq = window.matchMedia({query:?});
            dioxus.send(mq.matches);
            mq.addEventListener("change", (e) => dioxus.send(e.matches));
            await new Promise(() => {{}});
            "#
        ));
        while let Ok(matches) = eval.recv::<bool>().await {
            media.write().update(matches);
        }
        tracing::debug!("Media query {} listener closed", query);
    });

    use_memo(move || media.read().matches())
}

/// Narrow viewport (phone layout).
pub fn use_is_mobile() -> Memo<bool> {
    use_media_query(MOBILE_QUERY)
}

/// Scroll the content region back to the top.
pub fn scroll_content_to_top() {
    document::eval(
        "var el = document.getElementById('content-scroll'); if (el) el.scrollTop = 0;",
    );
}
