use dioxus::prelude::*;

use super::shared::{AgeNavigation, PersonCounts};
use crate::vm::{AuditIntent, AuditVm};

#[component]
pub(crate) fn ChapterSummaryScreen(vm: AuditVm, on_intent: EventHandler<AuditIntent>) -> Element {
    let continue_label = if vm.has_next_group {
        "Next Chapter"
    } else {
        "View Final Summary"
    };

    rsx! {
        div { class: "container",
            div { class: "summary-card",
                h1 { "Age {vm.age_label} - Complete!" }
                div { class: "summary-stats",
                    p { class: "stat-large",
                        "{vm.chapter.completed}/{vm.chapter.total} skills reviewed"
                    }
                    PersonCounts { title: "Skills by Person:", stats: vm.chapter.clone() }
                }
                button {
                    class: "btn-primary",
                    onclick: move |_| on_intent.call(AuditIntent::ContinueFromSummary),
                    "{continue_label}"
                }
                AgeNavigation {
                    title: "Jump to Age:",
                    ages: vm.ages.clone(),
                    highlight_active: true,
                    on_intent,
                }
            }
        }
    }
}

#[component]
pub(crate) fn FinalSummaryScreen(vm: AuditVm, on_intent: EventHandler<AuditIntent>) -> Element {
    rsx! {
        div { class: "container",
            div { class: "summary-card",
                h1 { "Audit Complete!" }
                div { class: "summary-stats",
                    p { class: "stat-large",
                        "{vm.overall.completed}/{vm.overall.total} total skills reviewed"
                    }
                    PersonCounts { title: "Total Skills by Person:", stats: vm.overall.clone() }
                }
                button {
                    class: "btn-primary",
                    onclick: move |_| on_intent.call(AuditIntent::Reset),
                    "Start New Audit"
                }
                AgeNavigation {
                    title: "Review a Chapter:",
                    ages: vm.ages.clone(),
                    highlight_active: false,
                    on_intent,
                }
            }
        }
    }
}
