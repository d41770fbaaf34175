//! Computer drawer: a small command line toggled from the header.

use chrono::Utc;
use datacore_core::AlertCondition;
use datacore_core::clock::format_stardate;
use datacore_ui::{ChatContext, use_nav, use_theme};
use dioxus::prelude::*;

use crate::routes::NAV_ITEMS;

/// What a command asks the shell to do.
#[derive(Clone, Debug, PartialEq)]
enum Command {
    Navigate(&'static str),
    Alert(AlertCondition),
    Stardate,
    Unknown,
}

fn interpret(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let text = lowered
        .strip_prefix("computer")
        .map(|rest| rest.trim_start_matches([',', ' ']))
        .unwrap_or(&lowered)
        .trim();

    match text {
        "red alert" => return Command::Alert(AlertCondition::Critical),
        "yellow alert" => return Command::Alert(AlertCondition::Caution),
        "stand down" | "cancel alert" => return Command::Alert(AlertCondition::Nominal),
        "stardate" | "what is the stardate" => return Command::Stardate,
        _ => {}
    }

    let target = ["show ", "open ", "go to "]
        .iter()
        .find_map(|verb| text.strip_prefix(verb))
        .unwrap_or(text)
        .trim();
    NAV_ITEMS
        .iter()
        .find(|item| item.label.eq_ignore_ascii_case(target) || item.path.trim_start_matches('/') == target)
        .map(|item| Command::Navigate(item.path))
        .unwrap_or(Command::Unknown)
}

#[derive(Clone, Debug, PartialEq)]
struct Line {
    from_computer: bool,
    text: String,
}

/// Drawer toggled by the header's chat button.
#[component]
pub fn ChatDrawer() -> Element {
    let chat = try_use_context::<ChatContext>();
    let mut nav = use_nav();
    let mut store = use_theme().store;
    let mut draft = use_signal(String::new);
    let mut log = use_signal(|| {
        vec![Line {
            from_computer: true,
            text: "Ready.".to_string(),
        }]
    });

    let mut run = move || {
        let input = draft.peek().trim().to_string();
        if input.is_empty() {
            return;
        }
        draft.set(String::new());
        let reply = match interpret(&input) {
            Command::Navigate(path) => {
                nav.navigate(path);
                format!("Displaying {}.", path)
            }
            Command::Alert(condition) => {
                store.write().set_alert_condition(condition);
                format!("{}.", condition.label())
            }
            Command::Stardate => format!("Stardate {}.", format_stardate(Utc::now())),
            Command::Unknown => "Unable to comply.".to_string(),
        };
        tracing::debug!("Computer: {} -> {}", input, reply);
        let mut lines = log.write();
        lines.push(Line { from_computer: false, text: input });
        lines.push(Line { from_computer: true, text: reply });
    };

    let Some(mut open) = chat.map(|c| c.open) else {
        return rsx! {};
    };
    if !open() {
        return rsx! {};
    }

    rsx! {
        aside { class: "chat-drawer",
            header { class: "panel-header",
                span { class: "panel-title", "Computer" }
                button { class: "link-button", onclick: move |_| open.set(false), "\u{2715}" }
            }
            div { class: "chat-log",
                for (i, line) in log().into_iter().enumerate() {
                    div {
                        key: "{i}",
                        class: if line.from_computer { "chat-line computer" } else { "chat-line" },
                        "{line.text}"
                    }
                }
            }
            input {
                class: "chat-input",
                placeholder: "Computer, show projects",
                value: "{draft}",
                oninput: move |e| draft.set(e.value()),
                onkeydown: move |e: KeyboardEvent| {
                    if e.key() == Key::Enter {
                        run();
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_navigation() {
        assert_eq!(interpret("Computer, show projects"), Command::Navigate("/projects"));
        assert_eq!(interpret("open infra"), Command::Navigate("/infrastructure"));
        assert_eq!(interpret("go to infrastructure"), Command::Navigate("/infrastructure"));
        assert_eq!(interpret("dashboard"), Command::Navigate("/"));
    }

    #[test]
    fn test_interpret_alerts() {
        assert_eq!(interpret("computer red alert"), Command::Alert(AlertCondition::Critical));
        assert_eq!(interpret("Yellow Alert"), Command::Alert(AlertCondition::Caution));
        assert_eq!(interpret("stand down"), Command::Alert(AlertCondition::Nominal));
    }

    #[test]
    fn test_interpret_unknown() {
        assert_eq!(interpret("make it so"), Command::Unknown);
        assert_eq!(interpret("stardate"), Command::Stardate);
    }
}
