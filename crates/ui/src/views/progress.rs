use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ChapterRowVm, StatsVm, map_chapter_rows};

#[derive(Clone, Debug, PartialEq)]
struct ProgressData {
    overall: StatsVm,
    chapters: Vec<ChapterRowVm>,
}

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let controller = ctx.controller();
    let storage_label = ctx.storage_label().to_owned();

    let resource = use_resource(move || {
        let controller = controller.clone();
        async move {
            let guard = controller.lock().await;
            let session = guard.session();
            Ok::<_, ViewError>(ProgressData {
                overall: StatsVm::from(&session.overall_stats()),
                chapters: map_chapter_rows(session),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Progress" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    ProgressDetails { overall: data.overall, chapters: data.chapters }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }

            p { class: "storage-label", "Saved to {storage_label}" }
        }
    }
}

#[component]
pub(crate) fn ProgressDetails(overall: StatsVm, chapters: Vec<ChapterRowVm>) -> Element {
    rsx! {
        p { class: "stat-large", "{overall.completed}/{overall.total} total skills reviewed" }
        if overall.complete {
            p { class: "badge-complete", "All skills reviewed" }
        }

        dl { class: "summary",
            for row in chapters {
                div { key: "{row.label}", class: if row.current { "chapter current" } else { "chapter" },
                    dt { "Age {row.label}" }
                    dd { "{row.completed}/{row.total}" }
                }
            }
        }

        ul { class: "person-stats",
            for person in overall.people.iter() {
                li { key: "{person.name}", "{person.name}: {person.skills} skills" }
            }
        }
    }
}
