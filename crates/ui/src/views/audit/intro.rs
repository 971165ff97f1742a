use dioxus::prelude::*;

use super::shared::AgeNavigation;
use crate::vm::{AuditIntent, AuditVm};

#[component]
pub(crate) fn AgeIntroScreen(vm: AuditVm, on_intent: EventHandler<AuditIntent>) -> Element {
    rsx! {
        div { class: "container",
            div { class: "age-intro-card",
                h1 { "Age {vm.age_label}" }
                p { class: "skill-count", "{vm.skill_count} skills to review" }
                button {
                    class: "btn-primary",
                    onclick: move |_| on_intent.call(AuditIntent::StartChapter),
                    "Start Chapter"
                }
                AgeNavigation {
                    title: "Jump to Age:",
                    ages: vm.ages.clone(),
                    highlight_active: true,
                    on_intent,
                }
                if let Some(saved) = vm.last_saved.clone() {
                    p { class: "last-saved", "Last saved {saved}" }
                }
                button {
                    class: "btn-reset",
                    onclick: move |_| on_intent.call(AuditIntent::Reset),
                    "Reset All Progress"
                }
            }
        }
    }
}
