use dioxus::prelude::*;

use crate::test_support::shared_controller;
use crate::views::audit::AuditScreen;
use crate::views::progress::ProgressDetails;
use crate::vm::{AuditIntent, AuditVm, ChapterRowVm, StatsVm, dispatch_intent, map_chapter_rows};

#[derive(Props, Clone, PartialEq)]
struct ScreenHarnessProps {
    vm: AuditVm,
}

#[component]
fn ScreenHarness(props: ScreenHarnessProps) -> Element {
    rsx! {
        AuditScreen { vm: props.vm.clone(), on_intent: move |_: AuditIntent| {} }
    }
}

fn render_screen(vm: AuditVm) -> String {
    let mut dom = VirtualDom::new_with_props(ScreenHarness, ScreenHarnessProps { vm });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

async fn vm_after(intents: Vec<AuditIntent>) -> AuditVm {
    let shared = shared_controller().await;
    let mut vm = AuditVm::capture(&*shared.lock().await);
    for intent in intents {
        vm = dispatch_intent(&shared, intent).await.expect("intent");
    }
    vm
}

#[tokio::test(flavor = "current_thread")]
async fn intro_renders_chapter_and_navigation() {
    let html = render_screen(vm_after(vec![]).await);
    assert!(html.contains("Age 3"), "missing title in {html}");
    assert!(html.contains("1 skills to review"), "missing count in {html}");
    assert!(html.contains("Start Chapter"), "missing start in {html}");
    assert!(html.contains("age-btn active"), "missing active chip in {html}");
    assert!(html.contains("Reset All Progress"), "missing reset in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn prompt_hides_next_until_someone_is_selected() {
    let html = render_screen(vm_after(vec![AuditIntent::StartChapter]).await);
    assert!(html.contains("sharing"), "missing skill in {html}");
    assert!(html.contains("Age 3 - 1/1"), "missing progress in {html}");
    assert!(!html.contains("Next Skill"), "unexpected next button in {html}");

    let html = render_screen(
        vm_after(vec![
            AuditIntent::StartChapter,
            AuditIntent::Toggle("Alice".into()),
        ])
        .await,
    );
    assert!(html.contains("Next Skill"), "missing next button in {html}");
    assert!(html.contains("btn-person selected"), "missing selection in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chapter_summary_renders_tallies() {
    let html = render_screen(vm_after(vec![AuditIntent::MarkAllCapable]).await);
    assert!(html.contains("Complete!"), "missing title in {html}");
    assert!(html.contains("1/1 skills reviewed"), "missing stats in {html}");
    assert!(html.contains("Alice:"), "missing person in {html}");
    assert!(html.contains("Next Chapter"), "missing continue in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn final_summary_renders_totals() {
    let html = render_screen(
        vm_after(vec![
            AuditIntent::MarkAllCapable,
            AuditIntent::ContinueFromSummary,
            AuditIntent::MarkAllCapable,
            AuditIntent::ContinueFromSummary,
        ])
        .await,
    );
    assert!(html.contains("Audit Complete!"), "missing title in {html}");
    assert!(html.contains("2/2 total skills reviewed"), "missing totals in {html}");
    assert!(html.contains("Start New Audit"), "missing restart in {html}");
    assert!(!html.contains("age-btn active"), "final summary highlights a chip in {html}");
}

#[derive(Props, Clone, PartialEq)]
struct ProgressHarnessProps {
    overall: StatsVm,
    chapters: Vec<ChapterRowVm>,
}

#[component]
fn ProgressHarness(props: ProgressHarnessProps) -> Element {
    rsx! {
        ProgressDetails { overall: props.overall.clone(), chapters: props.chapters.clone() }
    }
}

async fn render_progress(intents: Vec<AuditIntent>) -> String {
    let shared = shared_controller().await;
    for intent in intents {
        dispatch_intent(&shared, intent).await.expect("intent");
    }
    let (overall, chapters) = {
        let guard = shared.lock().await;
        let session = guard.session();
        (
            StatsVm::from(&session.overall_stats()),
            map_chapter_rows(session),
        )
    };

    let mut dom = VirtualDom::new_with_props(
        ProgressHarness,
        ProgressHarnessProps { overall, chapters },
    );
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[tokio::test(flavor = "current_thread")]
async fn progress_details_list_every_chapter() {
    let html = render_progress(vec![AuditIntent::MarkAllCapable]).await;
    assert!(html.contains("1/2 total skills reviewed"), "missing totals in {html}");
    assert!(html.contains("Age 5"), "missing chapter in {html}");
    assert!(html.contains("Bob: 1 skills"), "missing tally in {html}");
    assert!(!html.contains("All skills reviewed"), "premature badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_details_flag_a_finished_audit() {
    let html = render_progress(vec![
        AuditIntent::MarkAllCapable,
        AuditIntent::ContinueFromSummary,
        AuditIntent::MarkAllCapable,
    ])
    .await;
    assert!(html.contains("2/2 total skills reviewed"), "missing totals in {html}");
    assert!(html.contains("All skills reviewed"), "missing badge in {html}");
}
