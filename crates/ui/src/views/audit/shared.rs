use dioxus::prelude::*;

use crate::vm::{AgeChipVm, AuditIntent, StatsVm};

#[component]
pub(crate) fn AgeNavigation(
    title: &'static str,
    ages: Vec<AgeChipVm>,
    highlight_active: bool,
    on_intent: EventHandler<AuditIntent>,
) -> Element {
    rsx! {
        div { class: "age-navigation",
            h3 { "{title}" }
            div { class: "age-buttons",
                for (index, chip) in ages.into_iter().enumerate() {
                    button {
                        key: "{chip.label}",
                        class: if highlight_active && chip.active { "age-btn active" } else { "age-btn" },
                        onclick: move |_| on_intent.call(AuditIntent::JumpTo(index)),
                        "{chip.label}"
                    }
                }
            }
        }
    }
}

#[component]
pub(crate) fn PersonCounts(title: &'static str, stats: StatsVm) -> Element {
    rsx! {
        h3 { "{title}" }
        div { class: "person-stats",
            for row in stats.people {
                div { key: "{row.name}", class: "person-stat",
                    span { class: "person-name", "{row.name}:" }
                    span { class: "person-count", "{row.skills} skills" }
                }
            }
        }
    }
}
