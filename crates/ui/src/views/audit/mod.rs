mod intro;
mod prompt;
mod shared;
mod summary;

use audit_core::model::ViewMode;
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AuditIntent, AuditVm, dispatch_intent};

pub(crate) use intro::AgeIntroScreen;
pub(crate) use prompt::SkillPromptScreen;
pub(crate) use summary::{ChapterSummaryScreen, FinalSummaryScreen};

#[component]
pub fn AuditView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = ctx.controller();
    let mut error = use_signal(|| None::<ViewError>);

    let mut resource = {
        let controller = controller.clone();
        use_resource(move || {
            let controller = controller.clone();
            async move {
                let guard = controller.lock().await;
                Ok::<_, ViewError>(AuditVm::capture(&guard))
            }
        })
    };

    // Intents run one at a time behind the controller lock; the snapshot is
    // re-read afterwards whether or not the intent succeeded.
    let on_intent = use_callback(move |intent: AuditIntent| {
        let controller = controller.clone();
        spawn(async move {
            match dispatch_intent(&controller, intent).await {
                Ok(_) => error.set(None),
                Err(err) => error.set(Some(err)),
            }
            resource.restart();
        });
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page audit",
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    AuditScreen { vm, on_intent }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

/// Picks the screen for the snapshot's view mode.
#[component]
pub(crate) fn AuditScreen(vm: AuditVm, on_intent: EventHandler<AuditIntent>) -> Element {
    match vm.mode {
        ViewMode::AgeIntro => rsx! { AgeIntroScreen { vm, on_intent } },
        ViewMode::SkillPrompt => rsx! { SkillPromptScreen { vm, on_intent } },
        ViewMode::ChapterSummary => rsx! { ChapterSummaryScreen { vm, on_intent } },
        ViewMode::FinalSummary => rsx! { FinalSummaryScreen { vm, on_intent } },
    }
}
