use dioxus::prelude::*;

use crate::vm::{AuditIntent, AuditVm, PersonToggleVm};

#[component]
pub(crate) fn SkillPromptScreen(vm: AuditVm, on_intent: EventHandler<AuditIntent>) -> Element {
    let prompt = vm.prompt.clone();

    rsx! {
        div { class: "container",
            div { class: "progress-header",
                span { class: "progress-text", "Age {vm.age_label} - {prompt.progress}" }
                button {
                    class: "btn-menu",
                    onclick: move |_| on_intent.call(AuditIntent::OpenMenu),
                    "Menu"
                }
            }

            div { class: "skill-card",
                h2 { class: "skill-title", "{prompt.name}" }
                p { class: "skill-description", "{prompt.description}" }

                div { class: "response-section",
                    button {
                        class: "btn-all",
                        onclick: move |_| on_intent.call(AuditIntent::MarkAllCapable),
                        "✓ All of us can do this!"
                    }

                    div { class: "divider", "or select individuals:" }

                    div { class: "individual-buttons",
                        for (index, person) in prompt.people.clone().into_iter().enumerate() {
                            PersonButton { key: "{index}", person, on_intent }
                        }
                    }

                    // Selections accumulate; only this button moves to the next skill.
                    if prompt.can_advance {
                        button {
                            class: "btn-next",
                            onclick: move |_| on_intent.call(AuditIntent::Advance),
                            "Next Skill →"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PersonButton(person: PersonToggleVm, on_intent: EventHandler<AuditIntent>) -> Element {
    let name = person.name.clone();

    rsx! {
        button {
            class: if person.selected { "btn-person selected" } else { "btn-person" },
            onclick: move |_| on_intent.call(AuditIntent::Toggle(name.clone())),
            "{person.name}"
        }
    }
}
